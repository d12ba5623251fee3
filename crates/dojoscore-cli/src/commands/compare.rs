//! The `dojoscore compare` command.

use std::path::PathBuf;

use anyhow::Result;

use dojoscore_core::report::RoiReport;

pub fn execute(
    baseline_path: PathBuf,
    current_path: PathBuf,
    format: String,
    fail_on_decline: bool,
) -> Result<()> {
    let baseline = RoiReport::load_json(&baseline_path)?;
    let current = RoiReport::load_json(&current_path)?;

    let delta = current.compare(&baseline);

    match format.as_str() {
        "markdown" | "md" => {
            println!("{}", delta.to_markdown());
        }
        "json" => {
            println!("{}", serde_json::to_string_pretty(&delta)?);
        }
        _ => {
            println!(
                "ROI trend {} -> {}:",
                delta.baseline_at.format("%Y-%m-%d"),
                delta.current_at.format("%Y-%m-%d")
            );
            println!("  Users (N):          {:+}", delta.users);
            println!("  Active users:       {:+}", delta.active_users);
            println!(
                "  Participation (P):  {:+.1}%",
                delta.participation_rate * 100.0
            );
            println!("  Frequency (F):      {:+.1}", delta.mean_frequency);
            println!("  Evolution (Me):     {:+.2}", delta.evolution_multiplier);
            println!("  Total value:        {:+.2}", delta.total_value);
        }
    }

    if fail_on_decline && delta.value_declined() {
        std::process::exit(1);
    }

    Ok(())
}
