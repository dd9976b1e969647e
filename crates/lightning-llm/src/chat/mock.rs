//! Scripted completion provider for tests and offline runs

use async_trait::async_trait;
use lightning_core::{CompletionProvider, CompletionRequest, Result, VaultError};
use std::collections::VecDeque;
use std::sync::Mutex;

/// Answers with queued replies in order, then with the fallback if one is set.
///
/// Every request is recorded for inspection.
#[derive(Debug, Default)]
pub struct MockCompletionProvider {
    replies: Mutex<VecDeque<String>>,
    fallback: Option<String>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl MockCompletionProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue replies, first reply first.
    pub fn with_replies<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    /// Reply used once the queue is empty.
    pub fn with_fallback(mut self, reply: impl Into<String>) -> Self {
        self.fallback = Some(reply.into());
        self
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl CompletionProvider for MockCompletionProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<String> {
        if let Ok(mut seen) = self.requests.lock() {
            seen.push(request);
        }
        let queued = self.replies.lock().ok().and_then(|mut q| q.pop_front());
        queued
            .or_else(|| self.fallback.clone())
            .ok_or_else(|| VaultError::Completion("mock completion script exhausted".to_string()))
    }

    fn model_name(&self) -> &str {
        "mock-completion"
    }
}
