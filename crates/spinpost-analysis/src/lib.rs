#![deny(missing_docs)]

//! Condition deduplication and observable aggregation for spin-simulation
//! trajectories.
//!
//! The pipeline turns raw per-run time series into one thermodynamic
//! observable row per distinct (temperature, field) condition: runs sharing
//! a condition are grouped, their series concatenated, a burn-in prefix
//! dropped, and magnetization / susceptibility / specific-heat statistics
//! taken over the equilibrated window.

/// Per-class trajectory concatenation.
pub mod aggregate;
/// YAML configuration schema and policy enums.
pub mod config;
/// Condition deduplication into equivalence classes.
pub mod dedup;
/// Observable formulas and statistics helpers.
pub mod observables;
/// End-to-end pipeline driver.
pub mod pipeline;
/// Output table serialization.
pub mod table;
/// Burn-in cutoff derivation.
pub mod truncate;

pub use aggregate::{aggregate_class, AggregatedCondition, VectorSeries};
pub use config::{
    AnalysisConfig, BurnInPolicy, DegeneratePolicy, GroupingStrategy, ZeroTemperaturePolicy,
};
pub use dedup::{group_conditions, verify_classes, EquivalenceClass};
pub use observables::{compute_observables, ConditionObservables, SpeciesObservables};
pub use pipeline::{run_analysis, AnalysisReport, SkipReason, SkippedCondition};
pub use table::{table_to_string, write_table, write_table_path};
pub use truncate::{burn_in_cutoff, equilibrated};
