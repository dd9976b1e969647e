//! Chat completion providers

mod mock;
mod openai;

pub use mock::MockCompletionProvider;
pub use openai::OpenAICompletionProvider;
