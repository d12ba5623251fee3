//! The `dojoscore roi` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use comfy_table::Table;

use dojoscore_core::report::RoiReport;
use dojoscore_core::roi::{RoiInputs, RoiMetrics};

use super::open_tracker;

#[allow(clippy::too_many_arguments)]
pub async fn execute(
    time_saved: Option<f64>,
    cost_per_hour: Option<f64>,
    threshold: Option<u64>,
    format: String,
    output: Option<PathBuf>,
    config: Option<PathBuf>,
) -> Result<()> {
    let (config, tracker) = open_tracker(config.as_ref())?;
    let inputs = config.roi_inputs(time_saved, cost_per_hour, threshold);

    // "Store unreachable" must stay distinguishable from "no users yet",
    // so this path surfaces the error instead of degrading to zeros.
    let snapshot = tracker
        .snapshot()
        .await
        .context("ROI unavailable, progress store unreachable")?;
    let metrics = dojoscore_core::roi::compute_roi(&snapshot.table, &inputs);

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&metrics)?),
        "markdown" | "md" => {
            println!("{}", dojoscore_report::markdown::roi_dashboard(&metrics, &inputs));
        }
        _ => print_text(&metrics, &inputs),
    }

    if let Some(path) = output {
        let report = RoiReport::new(tracker.store_name(), inputs, metrics);
        report.save_json(&path)?;
        println!("Saved snapshot to {}", path.display());
    }

    Ok(())
}

fn print_text(metrics: &RoiMetrics, inputs: &RoiInputs) {
    if metrics.n == 0 {
        println!("No users on record (administrative account excluded).");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["Term", "Value"]);
    table.add_row(vec!["Users (N)".to_string(), metrics.n.to_string()]);
    table.add_row(vec![
        "Participation (P)".to_string(),
        format!(
            "{:.1}% ({} active, >= {} sessions)",
            metrics.participation_rate * 100.0,
            metrics.active_count,
            inputs.participation_threshold
        ),
    ]);
    table.add_row(vec![
        "Frequency (F)".to_string(),
        format!("{:.1} sessions", metrics.mean_frequency),
    ]);
    table.add_row(vec![
        "Operational hours (AH_op)".to_string(),
        format!("{:.1} h", metrics.operational_hours),
    ]);
    table.add_row(vec![
        "Evolution multiplier (Me)".to_string(),
        format!("x{:.2}", metrics.evolution_multiplier),
    ]);
    table.add_row(vec![
        "Total value".to_string(),
        format!("{:.2}", metrics.total_value),
    ]);
    println!("{table}");
}
