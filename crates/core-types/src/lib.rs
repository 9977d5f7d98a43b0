//! # Core Types
//!
//! The shared data model of the backtester: the side enum, the input
//! series wrappers, the derived weight matrix and the selection
//! diagnostics. Pure types, no I/O.

pub mod diagnostics;
pub mod enums;
pub mod error;
pub mod series;

// Re-export the core types to provide a clean public API.
pub use diagnostics::SelectionDiagnostics;
pub use enums::Side;
pub use error::CoreError;
pub use series::{BenchmarkSeries, DateIndex, PredictionMatrix, ReturnSeries, WeightMatrix};
