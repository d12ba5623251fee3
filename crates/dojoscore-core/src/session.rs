//! Per-login session state.
//!
//! The legacy UI kept this in ambient reactive globals; here it is an
//! explicit context object passed into each handler.

use crate::quiz::QuestionRecord;

/// Everything a handler needs to know about the current login session.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    /// Logged-in user, if any.
    pub username: Option<String>,
    /// Score as loaded at login plus points earned this session.
    pub score: u64,
    /// Stored session count, including this session once recorded.
    pub active_sessions: u64,
    /// Whether this session has already been counted toward the stored
    /// session total. At most one increment per session.
    pub interaction_recorded: bool,
    /// The quiz currently being taken, if any.
    pub active_quiz: Option<Vec<QuestionRecord>>,
}

impl SessionContext {
    pub fn is_logged_in(&self) -> bool {
        self.username.is_some()
    }

    /// Logout: clear the documented subset of session state so the next
    /// login starts clean. (The legacy UI deleted the same named keys.)
    pub fn reset_on_logout(&mut self) {
        self.username = None;
        self.score = 0;
        self.active_sessions = 0;
        self.interaction_recorded = false;
        self.active_quiz = None;
    }
}
