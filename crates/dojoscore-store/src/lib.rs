//! dojoscore-store — Progress-store backends.
//!
//! Implements the `ProgressStore` trait from `dojoscore-core` for a local
//! JSON file, a remote spreadsheet-backed table, and an in-memory store for
//! tests, plus configuration loading and the backend factory.

pub mod config;
pub mod json_file;
pub mod memory;
pub mod sheet;

pub use config::{create_store, load_config, load_config_from, DojoscoreConfig, StoreConfig};
pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
pub use sheet::SheetStore;
