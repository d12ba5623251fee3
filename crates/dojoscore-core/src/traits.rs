//! The progress-store contract and its convenience layer.
//!
//! Backends live in the `dojoscore-store` crate; this module defines the
//! trait they implement plus [`ProgressTracker`], the get/set facade with
//! the legacy degrade-to-empty read semantics.

use async_trait::async_trait;

use crate::error::StoreError;
use crate::model::{UserProgress, UserRecord, UserTable};

/// Opaque fingerprint of the persisted bytes, used for optimistic
/// compare-and-swap. Backends that cannot fingerprint report `None`
/// generations and stay last-writer-wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation(pub String);

/// A full read of the backing store.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub table: UserTable,
    pub generation: Option<Generation>,
}

/// Trait for progress-store backends.
///
/// The contract is whole-collection: every read loads the full mapping,
/// every write replaces it. There is no partial update. `store_all` with
/// `expected: None` is the legacy unconditional overwrite; passing the
/// generation observed at load time requests a checked write that fails
/// with [`StoreError::Conflict`] if the data changed underneath.
#[async_trait]
pub trait ProgressStore: Send + Sync {
    /// Backend name for logs and reports (e.g. "json-file").
    fn name(&self) -> &str;

    /// Load the entire user table. A missing-but-creatable backing medium
    /// is an empty table, not an error.
    async fn load_all(&self) -> Result<Snapshot, StoreError>;

    /// Replace the entire user table.
    async fn store_all(
        &self,
        table: &UserTable,
        expected: Option<&Generation>,
    ) -> Result<(), StoreError>;
}

/// How many times a checked write retries after losing a CAS race.
const MAX_CAS_ATTEMPTS: u32 = 3;

/// The get/set facade over a backend.
///
/// Reads degrade unreadable or corrupt storage to an empty table (the
/// legacy non-error contract); write failures propagate. Unknown users
/// read as zeros — not found is valid input, not a failure.
pub struct ProgressTracker {
    store: Box<dyn ProgressStore>,
}

impl ProgressTracker {
    pub fn new(store: Box<dyn ProgressStore>) -> Self {
        Self { store }
    }

    pub fn store_name(&self) -> &str {
        self.store.name()
    }

    /// Direct, non-degrading access for callers that must distinguish
    /// "empty" from "unavailable" (the ROI aggregator).
    pub async fn snapshot(&self) -> Result<Snapshot, StoreError> {
        self.store.load_all().await
    }

    async fn load_or_empty(&self) -> Snapshot {
        match self.store.load_all().await {
            Ok(snapshot) => snapshot,
            Err(e) if e.degrades_to_empty() => {
                tracing::warn!(store = self.store.name(), error = %e, "degrading unreadable store to empty table");
                Snapshot {
                    table: UserTable::new(),
                    generation: None,
                }
            }
            Err(e) => {
                // Conflict/remote errors cannot occur on a plain load; treat
                // them like unavailable rather than panicking.
                tracing::warn!(store = self.store.name(), error = %e, "unexpected load error, degrading to empty table");
                Snapshot {
                    table: UserTable::new(),
                    generation: None,
                }
            }
        }
    }

    /// Current progress for `username`; zeros when unknown or unreadable.
    pub async fn get(&self, username: &str) -> UserProgress {
        let snapshot = self.load_or_empty().await;
        snapshot
            .table
            .get(username)
            .map(UserProgress::from)
            .unwrap_or_default()
    }

    /// Read-modify-write one user's entry and persist the whole table.
    ///
    /// `score` overwrites unconditionally — this store does not know quiz
    /// deltas, so callers read-modify-add before calling. The overwrite is
    /// unconditional at file granularity too: concurrent writers race,
    /// last writer wins (see [`set_checked`](Self::set_checked)).
    pub async fn set(
        &self,
        username: &str,
        score: Option<u64>,
        increment_session: bool,
    ) -> Result<(), StoreError> {
        let mut snapshot = self.load_or_empty().await;
        apply_update(&mut snapshot.table, username, score, increment_session);
        self.store.store_all(&snapshot.table, None).await
    }

    /// Like [`set`](Self::set), but under generation compare-and-swap with
    /// bounded retries. Falls back to last-writer-wins on backends without
    /// generation support. Hardening, not required by the legacy contract.
    pub async fn set_checked(
        &self,
        username: &str,
        score: Option<u64>,
        increment_session: bool,
    ) -> Result<(), StoreError> {
        for attempt in 1..=MAX_CAS_ATTEMPTS {
            let mut snapshot = self.store.load_all().await?;
            apply_update(&mut snapshot.table, username, score, increment_session);
            match self
                .store
                .store_all(&snapshot.table, snapshot.generation.as_ref())
                .await
            {
                Ok(()) => return Ok(()),
                Err(StoreError::Conflict) if attempt < MAX_CAS_ATTEMPTS => {
                    tracing::debug!(attempt, username, "lost CAS race, reloading");
                }
                Err(e) => return Err(e),
            }
        }
        Err(StoreError::Conflict)
    }
}

/// The single-entry mutation both write paths share: create the record if
/// absent, overwrite the score if given, bump the session counter if asked.
fn apply_update(
    table: &mut UserTable,
    username: &str,
    score: Option<u64>,
    increment_session: bool,
) {
    let record = table.entry(username.to_string()).or_insert_with(UserRecord::default);
    if let Some(score) = score {
        record.score = score;
    }
    if increment_session {
        record.active_sessions += 1;
    }
}
