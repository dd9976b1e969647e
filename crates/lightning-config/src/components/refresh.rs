//! Refresh cycle counts

use serde::{Deserialize, Serialize};

/// How many similar notes to rank and how many to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshConfig {
    /// Ranked similar notes kept per note in the persisted index
    #[serde(default = "default_similar_count")]
    pub similar_count: usize,
    /// Entries written to each note's related-notes section
    #[serde(default = "default_links_count")]
    pub links_count: usize,
}

fn default_similar_count() -> usize {
    10
}

fn default_links_count() -> usize {
    3
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            similar_count: default_similar_count(),
            links_count: default_links_count(),
        }
    }
}

impl RefreshConfig {
    /// Displayed links must be a prefix of the ranked list.
    pub fn is_consistent(&self) -> bool {
        self.links_count <= self.similar_count
    }
}
