//! The `dojoscore roster` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use comfy_table::Table;

use dojoscore_core::belts::{current_belt, next_belt};

use super::open_tracker;

pub async fn execute(format: String, config: Option<PathBuf>) -> Result<()> {
    let (config, tracker) = open_tracker(config.as_ref())?;
    let snapshot = tracker
        .snapshot()
        .await
        .context("roster unavailable, progress store unreachable")?;

    if format == "csv" {
        print!(
            "{}",
            dojoscore_report::csv::roster(&snapshot.table, &config.admin_username)
        );
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Username", "Score", "Belt", "Next", "Sessions"]);
    for (username, record) in &snapshot.table {
        if username == &config.admin_username {
            continue;
        }
        let belt = current_belt(record.score);
        table.add_row(vec![
            username.clone(),
            record.score.to_string(),
            belt.name.to_string(),
            next_belt(record.score).label().to_string(),
            record.active_sessions.to_string(),
        ]);
    }
    println!("{table}");

    Ok(())
}
