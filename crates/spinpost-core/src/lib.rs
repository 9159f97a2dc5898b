#![deny(missing_docs)]

//! Shared value types and structured errors for the spinpost analyzers.

/// Simulation dataset model and validation.
pub mod dataset;
/// Structured error types.
pub mod errors;
/// Closed species-label bookkeeping.
pub mod species;
/// Condition value types.
pub mod types;

pub use dataset::{AxisSeries, Dataset};
pub use errors::{ErrorInfo, SpinpostError};
pub use species::SpeciesTable;
pub use types::{Condition, ConditionKey};
