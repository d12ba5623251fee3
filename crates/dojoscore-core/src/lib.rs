//! dojoscore-core — Belt progression, quiz scoring, and ROI metrics.
//!
//! This crate defines the fundamental data model, the progress-store trait,
//! and the scoring logic that the entire dojoscore system builds on.

pub mod belts;
pub mod engine;
pub mod error;
pub mod model;
pub mod parser;
pub mod quiz;
pub mod report;
pub mod roi;
pub mod session;
pub mod traits;
