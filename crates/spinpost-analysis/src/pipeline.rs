//! End-to-end analysis driver: dedup, aggregate, truncate, observe.

use log::warn;
use serde::{Deserialize, Serialize};
use spinpost_core::{Dataset, ErrorInfo, SpinpostError};

use crate::aggregate::aggregate_class;
use crate::config::{AnalysisConfig, DegeneratePolicy, ZeroTemperaturePolicy};
use crate::dedup::group_conditions;
use crate::observables::{compute_observables, ConditionObservables};
use crate::truncate::burn_in_cutoff;

/// Why a condition was dropped from the output table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkipReason {
    /// The post-cutoff window was empty.
    EmptyWindow,
    /// Zero temperature under the reject policy.
    ZeroTemperature,
}

/// Record of one dropped condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedCondition {
    /// Simulation temperature of the dropped condition.
    pub temperature: f64,
    /// Applied field of the dropped condition.
    pub field: f64,
    /// Drop cause.
    pub reason: SkipReason,
}

/// Result of one full pipeline invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Seed echoed from the dataset attributes.
    pub seed: u64,
    /// Declared species labels in lexicographic order; drives the table's
    /// species columns independently of how many rows survived.
    #[serde(default)]
    pub species: Vec<String>,
    /// Surviving conditions in deduplicated order.
    pub rows: Vec<ConditionObservables>,
    /// Conditions dropped per the configured policies.
    #[serde(default)]
    pub skipped: Vec<SkippedCondition>,
}

/// Runs the full pipeline over a validated dataset.
///
/// Stages run strictly in order: deduplication, aggregation, truncation,
/// observables. Fatal errors (integrity, missing series, shapes) abort
/// before any row is produced; the degenerate-window and zero-temperature
/// edge cases follow the configured per-condition policies.
pub fn run_analysis(
    dataset: &Dataset,
    config: &AnalysisConfig,
) -> Result<AnalysisReport, SpinpostError> {
    config.validate()?;
    dataset.validate()?;

    let table = dataset.species_table();
    let num_sites = dataset.num_sites();
    let conditions = dataset.conditions();
    let classes = group_conditions(&conditions, config.grouping)?;

    let mut rows = Vec::with_capacity(classes.len());
    let mut skipped = Vec::new();
    for class in &classes {
        let agg = aggregate_class(dataset, class, &table)?;
        let tau = burn_in_cutoff(&config.burn_in, agg.energy.len(), dataset.mcs)?;

        if tau >= agg.energy.len() {
            match config.degenerate {
                DegeneratePolicy::Skip => {
                    warn!(
                        "empty post-cutoff window at T={} H={} (tau={}, len={}); skipping",
                        class.condition.temperature,
                        class.condition.field,
                        tau,
                        agg.energy.len()
                    );
                    skipped.push(SkippedCondition {
                        temperature: class.condition.temperature,
                        field: class.condition.field,
                        reason: SkipReason::EmptyWindow,
                    });
                    continue;
                }
                DegeneratePolicy::Fail => {
                    return Err(SpinpostError::Degenerate(
                        ErrorInfo::new(
                            "empty-window",
                            "post-cutoff window is empty for a condition",
                        )
                        .with_context("temperature", class.condition.temperature.to_string())
                        .with_context("field", class.condition.field.to_string())
                        .with_context("tau", tau.to_string())
                        .with_context("len", agg.energy.len().to_string())
                        .with_hint("lower the burn-in denominator or record more sweeps"),
                    ));
                }
            }
        }

        if class.condition.temperature == 0.0 {
            match config.zero_temperature {
                ZeroTemperaturePolicy::Reject => {
                    warn!(
                        "zero temperature at H={}; dropping condition",
                        class.condition.field
                    );
                    skipped.push(SkippedCondition {
                        temperature: 0.0,
                        field: class.condition.field,
                        reason: SkipReason::ZeroTemperature,
                    });
                    continue;
                }
                ZeroTemperaturePolicy::Sentinel => {
                    warn!(
                        "zero temperature at H={}; susceptibility and specific heat are NaN",
                        class.condition.field
                    );
                }
            }
        }

        rows.push(compute_observables(&agg, tau, &table, num_sites, dataset.kb)?);
    }

    Ok(AnalysisReport {
        seed: dataset.seed,
        species: table.labels().map(str::to_string).collect(),
        rows,
        skipped,
    })
}
