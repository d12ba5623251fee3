//! Markdown rendering of the ROI dashboard.
//!
//! Mirrors the three sections of the admin UI: operational savings with the
//! N/P/F breakdown, the evolution multiplier, and the total value.

use dojoscore_core::roi::{RoiInputs, RoiMetrics};

/// Render the full dashboard as markdown.
pub fn roi_dashboard(metrics: &RoiMetrics, inputs: &RoiInputs) -> String {
    let mut md = String::new();

    md.push_str("# ROI Dashboard\n\n");

    if metrics.n == 0 {
        md.push_str("_No users on record (administrative account excluded)._\n");
        return md;
    }

    md.push_str("## 1. Operational savings (AH_op)\n\n");
    md.push_str("`AH_op = (N * P) * (F * Ts)`\n\n");
    md.push_str("| Term | Value |\n|------|-------|\n");
    md.push_str(&format!("| Users (N) | {} |\n", metrics.n));
    md.push_str(&format!(
        "| Participation (P) | {:.1}% ({} user(s) with >= {} sessions) |\n",
        metrics.participation_rate * 100.0,
        metrics.active_count,
        inputs.participation_threshold
    ));
    md.push_str(&format!(
        "| Frequency (F) | {:.1} sessions (mean over active users) |\n",
        metrics.mean_frequency
    ));
    md.push_str(&format!(
        "| Time saved per interaction (Ts) | {:.2} h |\n",
        inputs.time_saved_hours
    ));
    md.push_str(&format!(
        "| Base savings | {:.1} h |\n\n",
        metrics.operational_hours
    ));

    md.push_str("## 2. Evolution multiplier (Me)\n\n");
    md.push_str("`Me = 1 + (belt tier / max tier)`, averaged over active users\n\n");
    md.push_str(&format!(
        "Average multiplier: **x{:.2}**\n\n",
        metrics.evolution_multiplier
    ));

    md.push_str("## 3. Total value\n\n");
    md.push_str("`Value = (AH_op * Me) * Ch`\n\n");
    md.push_str(&format!(
        "Estimated savings: **{:.2}** (at {:.2} per hour)\n",
        metrics.total_value, inputs.cost_per_hour
    ));

    md
}
