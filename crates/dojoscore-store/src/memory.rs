//! In-memory store for tests.

use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use dojoscore_core::error::StoreError;
use dojoscore_core::model::UserTable;
use dojoscore_core::traits::{Generation, ProgressStore, Snapshot};

/// An in-memory progress store with call counting and failure injection,
/// for exercising the engine and aggregator without touching disk.
#[derive(Default)]
pub struct MemoryStore {
    table: Mutex<UserTable>,
    generation: AtomicU64,
    load_count: AtomicU32,
    store_count: AtomicU32,
    fail_loads: AtomicBool,
    fail_stores: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with a table.
    pub fn with_table(table: UserTable) -> Self {
        Self {
            table: Mutex::new(table),
            ..Default::default()
        }
    }

    /// Make every subsequent load fail as unavailable.
    pub fn fail_loads(&self, fail: bool) {
        self.fail_loads.store(fail, Ordering::Relaxed);
    }

    /// Make every subsequent store fail as unavailable.
    pub fn fail_stores(&self, fail: bool) {
        self.fail_stores.store(fail, Ordering::Relaxed);
    }

    pub fn load_count(&self) -> u32 {
        self.load_count.load(Ordering::Relaxed)
    }

    pub fn store_count(&self) -> u32 {
        self.store_count.load(Ordering::Relaxed)
    }

    /// Current table contents, for assertions.
    pub fn table(&self) -> UserTable {
        self.table.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProgressStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn load_all(&self) -> Result<Snapshot, StoreError> {
        self.load_count.fetch_add(1, Ordering::Relaxed);
        if self.fail_loads.load(Ordering::Relaxed) {
            return Err(StoreError::Unavailable("injected load failure".into()));
        }
        Ok(Snapshot {
            table: self.table.lock().unwrap().clone(),
            generation: Some(Generation(
                self.generation.load(Ordering::Relaxed).to_string(),
            )),
        })
    }

    async fn store_all(
        &self,
        table: &UserTable,
        expected: Option<&Generation>,
    ) -> Result<(), StoreError> {
        self.store_count.fetch_add(1, Ordering::Relaxed);
        if self.fail_stores.load(Ordering::Relaxed) {
            return Err(StoreError::Unavailable("injected store failure".into()));
        }

        let current = Generation(self.generation.load(Ordering::Relaxed).to_string());
        if let Some(expected) = expected {
            if *expected != current {
                return Err(StoreError::Conflict);
            }
        }

        *self.table.lock().unwrap() = table.clone();
        self.generation.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}
