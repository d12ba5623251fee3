//! dojoscore-report — Render ROI metrics and the user roster for display.

pub mod csv;
pub mod markdown;
