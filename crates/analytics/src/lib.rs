//! # Analytics
//!
//! Turns the period return series produced by the backtester into the
//! cumulative curves used for comparison and a summary `PerformanceReport`.
//!
//! Everything here is a stateless calculation over slices of `f64`. Returns
//! are aggregated additively, never compounded.

// Declare the modules that constitute this crate.
pub mod curve;
pub mod engine;
pub mod error;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use curve::cumulative_curve;
pub use engine::AnalyticsEngine;
pub use error::AnalyticsError;
pub use report::{PerformanceReport, SeriesStats};
