//! Fleet-wide ROI metrics.
//!
//! Implements the published dashboard formula:
//!
//! ```text
//! AH_op = (N * P) * (F * Ts)
//! Me    = mean over active users of 1 + tier_index / max_index
//! Value = AH_op * Me * Ch
//! ```
//!
//! `N * P` algebraically equals the active-user count; the two-step form is
//! kept to mirror the formula as published, not as an optimization target.

use serde::{Deserialize, Serialize};

use crate::belts::{belt_index, BELTS};
use crate::error::StoreError;
use crate::model::UserTable;
use crate::traits::ProgressStore;

/// Tunable inputs to the ROI computation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoiInputs {
    /// Hours saved per mentor interaction (Ts). Must be positive.
    pub time_saved_hours: f64,
    /// Mean fully-loaded cost of an employee hour (Ch). Must be positive.
    pub cost_per_hour: f64,
    /// Minimum session count for a user to count as active.
    pub participation_threshold: u64,
    /// Account excluded from every aggregate.
    pub admin_username: String,
}

impl Default for RoiInputs {
    fn default() -> Self {
        Self {
            time_saved_hours: 0.25,
            cost_per_hour: 50.0,
            participation_threshold: 10,
            admin_username: "admin".to_string(),
        }
    }
}

/// The computed metrics. Every intermediate term is part of the contract:
/// the dashboard displays the breakdown, not just the final value.
///
/// Serde names follow the published formula symbols.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiMetrics {
    /// Total users, admin excluded.
    #[serde(rename = "N")]
    pub n: u64,
    /// Participation rate in [0, 1].
    #[serde(rename = "P")]
    pub participation_rate: f64,
    /// Mean session count among active users.
    #[serde(rename = "F")]
    pub mean_frequency: f64,
    /// Aggregate operational hours saved.
    #[serde(rename = "AH_op")]
    pub operational_hours: f64,
    /// Mean evolution multiplier, >= 1.
    #[serde(rename = "Me")]
    pub evolution_multiplier: f64,
    /// Monetary estimate: AH_op * Me * Ch.
    #[serde(rename = "Total_Value")]
    pub total_value: f64,
    /// Users at or above the participation threshold.
    pub active_count: u64,
}

impl RoiMetrics {
    /// Metrics for a readable but user-less store: everything zero, the
    /// multiplier at its neutral value.
    pub fn zeroed() -> Self {
        Self {
            n: 0,
            participation_rate: 0.0,
            mean_frequency: 0.0,
            operational_hours: 0.0,
            evolution_multiplier: 1.0,
            total_value: 0.0,
            active_count: 0,
        }
    }
}

/// Per-user evolution multiplier: 1 + tier_index / max_index.
///
/// A single-tier table would divide by zero; the degenerate case counts as
/// max_index 1 and every user contributes the neutral multiplier.
fn evolution_multiplier(score: u64) -> f64 {
    let max_index = (BELTS.len() - 1).max(1);
    1.0 + belt_index(score) as f64 / max_index as f64
}

/// Compute the metrics from an already-loaded table. Pure.
pub fn compute_roi(table: &UserTable, inputs: &RoiInputs) -> RoiMetrics {
    let users: Vec<_> = table
        .iter()
        .filter(|(name, _)| name.as_str() != inputs.admin_username)
        .map(|(_, record)| record)
        .collect();

    let n = users.len() as u64;
    if n == 0 {
        return RoiMetrics::zeroed();
    }

    let active: Vec<_> = users
        .iter()
        .filter(|r| r.active_sessions >= inputs.participation_threshold)
        .collect();
    let active_count = active.len() as u64;

    let participation_rate = active_count as f64 / n as f64;

    let mean_frequency = if active.is_empty() {
        0.0
    } else {
        active.iter().map(|r| r.active_sessions as f64).sum::<f64>() / active.len() as f64
    };

    let operational_hours =
        (n as f64 * participation_rate) * (mean_frequency * inputs.time_saved_hours);

    let evolution = if active.is_empty() {
        1.0
    } else {
        active
            .iter()
            .map(|r| evolution_multiplier(r.score))
            .sum::<f64>()
            / active.len() as f64
    };

    RoiMetrics {
        n,
        participation_rate,
        mean_frequency,
        operational_hours,
        evolution_multiplier: evolution,
        total_value: operational_hours * evolution * inputs.cost_per_hour,
        active_count,
    }
}

/// Store-facing aggregation: scans the whole store on demand.
pub struct RoiAggregator;

impl RoiAggregator {
    /// `Ok(None)` when the store is unavailable or corrupt — distinct from
    /// `Ok(Some(zeroed))`, a readable store with no non-admin users.
    pub async fn compute(
        store: &dyn ProgressStore,
        inputs: &RoiInputs,
    ) -> Option<RoiMetrics> {
        match store.load_all().await {
            Ok(snapshot) => Some(compute_roi(&snapshot.table, inputs)),
            Err(e) => {
                tracing::warn!(store = store.name(), error = %e, "ROI unavailable, store unreachable");
                None
            }
        }
    }

    /// Variant that surfaces the underlying error for diagnostics.
    pub async fn try_compute(
        store: &dyn ProgressStore,
        inputs: &RoiInputs,
    ) -> Result<RoiMetrics, StoreError> {
        let snapshot = store.load_all().await?;
        Ok(compute_roi(&snapshot.table, inputs))
    }
}
