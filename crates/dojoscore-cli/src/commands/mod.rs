pub mod compare;
pub mod grade;
pub mod init;
pub mod progress;
pub mod record;
pub mod roi;
pub mod roster;

use std::path::PathBuf;

use anyhow::Result;
use dojoscore_core::traits::ProgressTracker;
use dojoscore_store::{create_store, load_config_from, DojoscoreConfig};

/// Load config and build the tracker every store-facing command shares.
pub(crate) fn open_tracker(config: Option<&PathBuf>) -> Result<(DojoscoreConfig, ProgressTracker)> {
    let config = load_config_from(config.map(|p| p.as_path()))?;
    let store = create_store(&config.store);
    Ok((config, ProgressTracker::new(store)))
}
