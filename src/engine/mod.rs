//! Recommendation core
//!
//! Pure functions over a snapshot of catalog, user and interaction log. Nothing
//! in here performs I/O or touches shared state.

pub mod content;
pub mod graph;
pub mod ranker;
pub mod tokenizer;

pub use content::{content_score, UserProfile};
pub use graph::{graph_scores, index_videos, VideoIndex};
pub use ranker::{mood_fallback, rank, rank_with_scores, ScoredVideo};
pub use tokenizer::tokenize;

/// Result count used when the caller does not ask for one
pub const DEFAULT_LIMIT: usize = 10;

/// Rejected ranking input
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("limit must be positive, got {0}")]
    InvalidLimit(usize),
}
