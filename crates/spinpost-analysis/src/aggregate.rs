//! Per-class trajectory concatenation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use spinpost_core::{Condition, Dataset, ErrorInfo, SpeciesTable, SpinpostError};

use crate::dedup::EquivalenceClass;

/// Concatenated per-axis series for one vector quantity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VectorSeries {
    /// X component samples.
    pub x: Vec<f64>,
    /// Y component samples.
    pub y: Vec<f64>,
    /// Z component samples.
    pub z: Vec<f64>,
}

/// One surviving condition with the joined time series of all its runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedCondition {
    /// Representative condition.
    pub condition: Condition,
    /// Member run indices the series were concatenated from.
    pub members: Vec<usize>,
    /// Concatenated energy samples.
    pub energy: Vec<f64>,
    /// Concatenated total magnetization samples.
    pub magnetization: VectorSeries,
    /// Concatenated per-species magnetization samples, keyed by label.
    pub species: BTreeMap<String, VectorSeries>,
}

/// Joins the member runs' series end-to-end in ascending member order.
///
/// No resampling or weighting; the output length is
/// `members.len() * mcs` for every tracked quantity.
pub fn aggregate_class(
    dataset: &Dataset,
    class: &EquivalenceClass,
    table: &SpeciesTable,
) -> Result<AggregatedCondition, SpinpostError> {
    let samples = class.members.len() * dataset.mcs;
    let mut energy = Vec::with_capacity(samples);
    let mut magnetization = VectorSeries::default();
    for &member in &class.members {
        energy.extend_from_slice(&dataset.energy[member]);
        magnetization.x.extend_from_slice(&dataset.magnetization.x[member]);
        magnetization.y.extend_from_slice(&dataset.magnetization.y[member]);
        magnetization.z.extend_from_slice(&dataset.magnetization.z[member]);
    }

    let mut species = BTreeMap::new();
    for label in table.labels() {
        let source = dataset.species.get(label).ok_or_else(|| {
            SpinpostError::Dataset(
                ErrorInfo::new(
                    "missing-species-series",
                    format!("no magnetization series recorded for species `{label}`"),
                )
                .with_context("species", label.to_string()),
            )
        })?;
        let mut joined = VectorSeries::default();
        for &member in &class.members {
            joined.x.extend_from_slice(&source.x[member]);
            joined.y.extend_from_slice(&source.y[member]);
            joined.z.extend_from_slice(&source.z[member]);
        }
        species.insert(label.to_string(), joined);
    }

    Ok(AggregatedCondition {
        condition: class.condition,
        members: class.members.clone(),
        energy,
        magnetization,
        species,
    })
}
