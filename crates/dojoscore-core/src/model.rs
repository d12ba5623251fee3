//! Persisted user records and the user table.
//!
//! The wire format is a JSON mapping of username to record. Records carry
//! fields owned by the excluded auth collaborator (`password_hash`, ...);
//! those must survive a read-modify-write round trip untouched, so anything
//! this crate does not model is kept in a flattened map.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One user's persisted progress.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Total accumulated score. Monotonically non-decreasing in normal
    /// operation; only quiz completions raise it.
    #[serde(default)]
    pub score: u64,
    /// Number of usage sessions, bumped at most once per login session.
    #[serde(default)]
    pub active_sessions: u64,
    /// "admin" or "user"; absent in older records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Fields owned by other collaborators (e.g. `password_hash`),
    /// preserved verbatim across rewrites.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// The whole persisted mapping, keyed by username.
///
/// A `BTreeMap` keeps serialization order deterministic, which keeps the
/// backing file diffable and the generation fingerprint stable.
pub type UserTable = BTreeMap<String, UserRecord>;

/// The slice of a record the progress contract exposes to callers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProgress {
    pub score: u64,
    pub active_sessions: u64,
}

impl From<&UserRecord> for UserProgress {
    fn from(record: &UserRecord) -> Self {
        Self {
            score: record.score,
            active_sessions: record.active_sessions,
        }
    }
}
