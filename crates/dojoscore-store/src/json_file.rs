//! Local JSON-file backend.
//!
//! Whole-file load and overwrite of the user mapping, pretty-printed so the
//! file stays hand-inspectable. There is no file locking: uncoordinated
//! writers race at file granularity exactly as the legacy design did. The
//! generation fingerprint (SHA-256 of the raw bytes) gives callers that opt
//! in a way to detect the race instead of losing the update.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use tracing::instrument;

use dojoscore_core::error::StoreError;
use dojoscore_core::model::UserTable;
use dojoscore_core::traits::{Generation, ProgressStore, Snapshot};

/// File-backed progress store.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn fingerprint(bytes: &[u8]) -> Generation {
        let digest = Sha256::digest(bytes);
        Generation(format!("{digest:x}"))
    }

    /// Fingerprint of the file as it exists right now; `None` when absent.
    fn current_generation(&self) -> Result<Option<Generation>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let bytes = std::fs::read(&self.path)
            .map_err(|e| StoreError::Unavailable(format!("{}: {e}", self.path.display())))?;
        Ok(Some(Self::fingerprint(&bytes)))
    }
}

#[async_trait]
impl ProgressStore for JsonFileStore {
    fn name(&self) -> &str {
        "json-file"
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn load_all(&self) -> Result<Snapshot, StoreError> {
        if !self.path.exists() {
            // First run: nothing persisted yet is an empty table, not an error.
            return Ok(Snapshot {
                table: UserTable::new(),
                generation: None,
            });
        }

        let bytes = std::fs::read(&self.path)
            .map_err(|e| StoreError::Unavailable(format!("{}: {e}", self.path.display())))?;
        let table: UserTable = serde_json::from_slice(&bytes)
            .map_err(|e| StoreError::Corrupt(format!("{}: {e}", self.path.display())))?;

        Ok(Snapshot {
            generation: Some(Self::fingerprint(&bytes)),
            table,
        })
    }

    #[instrument(skip(self, table), fields(path = %self.path.display(), users = table.len()))]
    async fn store_all(
        &self,
        table: &UserTable,
        expected: Option<&Generation>,
    ) -> Result<(), StoreError> {
        if let Some(expected) = expected {
            // Re-hash immediately before writing; a mismatch means someone
            // else rewrote the file since our load.
            if self.current_generation()?.as_ref() != Some(expected) {
                return Err(StoreError::Conflict);
            }
        }

        let json = serde_json::to_string_pretty(table)
            .map_err(|e| StoreError::Corrupt(e.to_string()))?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| StoreError::Unavailable(format!("{}: {e}", parent.display())))?;
            }
        }
        std::fs::write(&self.path, json)
            .map_err(|e| StoreError::Unavailable(format!("{}: {e}", self.path.display())))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dojoscore_core::model::UserRecord;
    use dojoscore_core::traits::ProgressTracker;

    fn record(score: u64, sessions: u64) -> UserRecord {
        UserRecord {
            score,
            active_sessions: sessions,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn missing_file_loads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("progress.json"));

        let snapshot = store.load_all().await.unwrap();
        assert!(snapshot.table.is_empty());
        assert!(snapshot.generation.is_none());
    }

    #[tokio::test]
    async fn write_then_read_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("progress.json"));

        let mut table = UserTable::new();
        table.insert("ana".into(), record(120, 4));
        store.store_all(&table, None).await.unwrap();

        let snapshot = store.load_all().await.unwrap();
        assert_eq!(snapshot.table, table);
        assert!(snapshot.generation.is_some());
    }

    #[tokio::test]
    async fn corrupt_file_is_reported_not_swallowed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = JsonFileStore::new(&path);
        let err = store.load_all().await.unwrap_err();
        assert!(matches!(err, StoreError::Corrupt(_)));
    }

    #[tokio::test]
    async fn foreign_fields_survive_rewrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.json");
        std::fs::write(
            &path,
            r#"{"ana": {"password_hash": "cafe", "score": 10, "active_sessions": 1, "role": "user"}}"#,
        )
        .unwrap();

        let tracker = ProgressTracker::new(Box::new(JsonFileStore::new(&path)));
        tracker.set("ana", Some(20), true).await.unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["ana"]["password_hash"], "cafe");
        assert_eq!(raw["ana"]["score"], 20);
        assert_eq!(raw["ana"]["active_sessions"], 2);
        assert_eq!(raw["ana"]["role"], "user");
    }

    #[tokio::test]
    async fn checked_write_detects_an_interleaved_rewrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.json");

        let writer_a = JsonFileStore::new(&path);
        let writer_b = JsonFileStore::new(&path);

        let mut table = UserTable::new();
        table.insert("ana".into(), record(10, 1));
        writer_a.store_all(&table, None).await.unwrap();

        // Both writers observe the same generation.
        let seen_a = writer_a.load_all().await.unwrap();
        let seen_b = writer_b.load_all().await.unwrap();

        // B commits first; A's checked write must now be refused.
        let mut table_b = seen_b.table.clone();
        table_b.insert("bo".into(), record(30, 2));
        writer_b
            .store_all(&table_b, seen_b.generation.as_ref())
            .await
            .unwrap();

        let mut table_a = seen_a.table.clone();
        table_a.get_mut("ana").unwrap().score = 999;
        let err = writer_a
            .store_all(&table_a, seen_a.generation.as_ref())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict));

        // B's update survived.
        let current = writer_a.load_all().await.unwrap();
        assert!(current.table.contains_key("bo"));
        assert_eq!(current.table["ana"].score, 10);
    }

    #[tokio::test]
    async fn unchecked_writers_race_last_writer_wins() {
        // The legacy lost-update behavior, demonstrated on purpose: two
        // read-modify-write cycles that interleave lose the first update.
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.json");

        let writer_a = JsonFileStore::new(&path);
        let writer_b = JsonFileStore::new(&path);

        let seen_a = writer_a.load_all().await.unwrap();
        let seen_b = writer_b.load_all().await.unwrap();

        let mut table_a = seen_a.table;
        table_a.insert("ana".into(), record(10, 1));
        writer_a.store_all(&table_a, None).await.unwrap();

        let mut table_b = seen_b.table;
        table_b.insert("bo".into(), record(20, 1));
        writer_b.store_all(&table_b, None).await.unwrap();

        let current = writer_a.load_all().await.unwrap();
        assert!(current.table.contains_key("bo"));
        assert!(
            !current.table.contains_key("ana"),
            "the first write is lost at file granularity"
        );
    }

    #[tokio::test]
    async fn tracker_set_checked_recovers_from_the_race() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.json");

        let tracker_a = ProgressTracker::new(Box::new(JsonFileStore::new(&path)));
        let tracker_b = ProgressTracker::new(Box::new(JsonFileStore::new(&path)));

        tracker_a.set_checked("ana", Some(10), false).await.unwrap();
        tracker_b.set_checked("bo", Some(20), false).await.unwrap();

        assert_eq!(tracker_a.get("ana").await.score, 10);
        assert_eq!(tracker_a.get("bo").await.score, 20);
    }
}
