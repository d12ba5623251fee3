//! ROI report snapshots with JSON persistence and trend comparison.
//!
//! An administrator saves a snapshot per review period and compares the
//! latest against a baseline to see whether adoption and value are moving.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::roi::{RoiInputs, RoiMetrics};

/// A persisted ROI computation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoiReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the snapshot was taken.
    pub created_at: DateTime<Utc>,
    /// Backend name the table was read from.
    pub store: String,
    /// Inputs the metrics were computed with.
    pub inputs: RoiInputs,
    /// The computed metrics.
    pub metrics: RoiMetrics,
}

impl RoiReport {
    pub fn new(store: &str, inputs: RoiInputs, metrics: RoiMetrics) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            store: store.to_string(),
            inputs,
            metrics,
        }
    }

    /// Save the report as pretty-printed JSON.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: RoiReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Per-term deltas against an earlier snapshot.
    pub fn compare(&self, baseline: &RoiReport) -> RoiDelta {
        RoiDelta {
            baseline_at: baseline.created_at,
            current_at: self.created_at,
            users: self.metrics.n as i64 - baseline.metrics.n as i64,
            active_users: self.metrics.active_count as i64 - baseline.metrics.active_count as i64,
            participation_rate: self.metrics.participation_rate
                - baseline.metrics.participation_rate,
            mean_frequency: self.metrics.mean_frequency - baseline.metrics.mean_frequency,
            evolution_multiplier: self.metrics.evolution_multiplier
                - baseline.metrics.evolution_multiplier,
            total_value: self.metrics.total_value - baseline.metrics.total_value,
        }
    }
}

/// Result of comparing two ROI snapshots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoiDelta {
    pub baseline_at: DateTime<Utc>,
    pub current_at: DateTime<Utc>,
    pub users: i64,
    pub active_users: i64,
    pub participation_rate: f64,
    pub mean_frequency: f64,
    pub evolution_multiplier: f64,
    pub total_value: f64,
}

impl RoiDelta {
    /// Returns `true` when the estimated value went down.
    pub fn value_declined(&self) -> bool {
        self.total_value < 0.0
    }

    /// Format the delta as a markdown table.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();
        md.push_str(&format!(
            "**ROI trend:** {} -> {}\n\n",
            self.baseline_at.format("%Y-%m-%d"),
            self.current_at.format("%Y-%m-%d")
        ));
        md.push_str("| Term | Delta |\n|------|-------|\n");
        md.push_str(&format!("| Users (N) | {:+} |\n", self.users));
        md.push_str(&format!("| Active users | {:+} |\n", self.active_users));
        md.push_str(&format!(
            "| Participation (P) | {:+.1}% |\n",
            self.participation_rate * 100.0
        ));
        md.push_str(&format!("| Frequency (F) | {:+.1} |\n", self.mean_frequency));
        md.push_str(&format!(
            "| Evolution (Me) | {:+.2} |\n",
            self.evolution_multiplier
        ));
        md.push_str(&format!("| Total value | {:+.2} |\n", self.total_value));
        md
    }
}
