//! Store and engine error types.
//!
//! Defined in `dojoscore-core` so callers can classify storage failures
//! (unavailable vs. corrupt vs. conflicting write) without string matching.
//! "Unavailable" and "corrupt" are deliberately distinct from an empty
//! table: the legacy contract flattens them to empty at the read path, but
//! the ROI aggregator must be able to tell the difference.

use thiserror::Error;

/// Errors from a progress-store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing medium could not be reached or read.
    #[error("backing store unavailable: {0}")]
    Unavailable(String),

    /// The backing medium was readable but its contents did not parse.
    #[error("backing store corrupt: {0}")]
    Corrupt(String),

    /// An optimistic write found the backing data changed underneath it.
    #[error("concurrent modification detected, write refused")]
    Conflict,

    /// A remote backend returned an error response.
    #[error("remote store error (HTTP {status}): {message}")]
    Remote { status: u16, message: String },
}

impl StoreError {
    /// Returns `true` for the failures the legacy read contract degrades
    /// to an empty table rather than surfacing.
    pub fn degrades_to_empty(&self) -> bool {
        matches!(self, StoreError::Unavailable(_) | StoreError::Corrupt(_))
    }
}

/// Errors from the progress engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The submission left questions unanswered. All questions are
    /// required; this is checked before any grading happens.
    #[error("quiz incomplete: {missing} unanswered question(s)")]
    IncompleteQuiz { missing: usize },

    #[error(transparent)]
    Store(#[from] StoreError),
}
