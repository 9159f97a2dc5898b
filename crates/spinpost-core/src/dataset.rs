//! In-memory image of one simulation output file.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, SpinpostError};
use crate::species::SpeciesTable;
use crate::types::Condition;

fn default_kb() -> f64 {
    1.0
}

/// One tracked vector quantity: a run-by-sweep matrix per Cartesian axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisSeries {
    /// X component, `[num_runs][mcs]`.
    pub x: Vec<Vec<f64>>,
    /// Y component, `[num_runs][mcs]`.
    pub y: Vec<Vec<f64>>,
    /// Z component, `[num_runs][mcs]`.
    pub z: Vec<Vec<f64>>,
}

/// Loaded simulation dataset, immutable once validated.
///
/// The on-disk format is JSON produced by an external converter; the HDF5
/// container written by the simulation engine is outside this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// Monte-Carlo sweeps recorded per raw run.
    pub mcs: usize,
    /// Random seed the simulation ran with, echoed into the output table.
    pub seed: u64,
    /// Boltzmann-constant scale factor applied to fluctuation observables.
    #[serde(default = "default_kb")]
    pub kb: f64,
    /// Per-run temperatures, length `num_runs`.
    pub temperature: Vec<f64>,
    /// Per-run applied fields, length `num_runs`.
    pub field: Vec<f64>,
    /// Site positions, `[num_sites][3]`.
    pub positions: Vec<[f64; 3]>,
    /// Per-site species label, length `num_sites`.
    pub types: Vec<String>,
    /// Total energy time series, `[num_runs][mcs]`.
    pub energy: Vec<Vec<f64>>,
    /// Total magnetization time series per axis.
    pub magnetization: AxisSeries,
    /// Per-species magnetization time series, keyed by label.
    #[serde(default)]
    pub species: BTreeMap<String, AxisSeries>,
    /// Final spin configuration per run, `[num_runs][num_sites][3]`.
    /// Consumed only by external visualization tools.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finalstates: Option<Vec<Vec<[f64; 3]>>>,
}

impl Dataset {
    /// Loads and validates a dataset from a JSON file.
    pub fn load(path: &Path) -> Result<Self, SpinpostError> {
        let text = fs::read_to_string(path).map_err(|err| {
            SpinpostError::Io(
                ErrorInfo::new("dataset-read", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        let dataset: Dataset = serde_json::from_str(&text).map_err(|err| {
            SpinpostError::Serde(
                ErrorInfo::new("dataset-parse", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        dataset.validate()?;
        Ok(dataset)
    }

    /// Number of raw runs recorded in the file.
    pub fn num_runs(&self) -> usize {
        self.temperature.len()
    }

    /// Number of lattice sites.
    pub fn num_sites(&self) -> usize {
        self.positions.len()
    }

    /// Per-run conditions in recorded order.
    pub fn conditions(&self) -> Vec<Condition> {
        self.temperature
            .iter()
            .zip(self.field.iter())
            .map(|(&temperature, &field)| Condition::new(temperature, field))
            .collect()
    }

    /// Builds the closed species table from the static site metadata.
    pub fn species_table(&self) -> SpeciesTable {
        SpeciesTable::from_types(&self.types)
    }

    /// Checks array shapes and per-species series coverage.
    ///
    /// Every distinct label in `types` must come with its own per-axis
    /// series; a missing series makes per-species observables impossible
    /// and aborts the whole run.
    pub fn validate(&self) -> Result<(), SpinpostError> {
        let num_runs = self.num_runs();
        if self.field.len() != num_runs {
            return Err(shape_error(
                "field",
                self.field.len(),
                num_runs,
                "one field value per run",
            ));
        }
        if self.types.len() != self.positions.len() {
            return Err(shape_error(
                "types",
                self.types.len(),
                self.positions.len(),
                "one species label per site",
            ));
        }
        check_matrix("energy", &self.energy, num_runs, self.mcs)?;
        check_axes("magnetization", &self.magnetization, num_runs, self.mcs)?;

        let labels: BTreeSet<&String> = self.types.iter().collect();
        for label in labels {
            let series = self.species.get(label).ok_or_else(|| {
                SpinpostError::Dataset(
                    ErrorInfo::new(
                        "missing-species-series",
                        format!("no magnetization series recorded for species `{label}`"),
                    )
                    .with_context("species", label.clone())
                    .with_hint("re-run the converter with per-species series enabled"),
                )
            })?;
            check_axes(label, series, num_runs, self.mcs)?;
        }

        if let Some(finalstates) = &self.finalstates {
            if finalstates.len() != num_runs {
                return Err(shape_error(
                    "finalstates",
                    finalstates.len(),
                    num_runs,
                    "one final configuration per run",
                ));
            }
        }
        Ok(())
    }
}

fn shape_error(name: &str, got: usize, want: usize, detail: &str) -> SpinpostError {
    SpinpostError::Dataset(
        ErrorInfo::new("shape-mismatch", format!("`{name}` has inconsistent shape: {detail}"))
            .with_context("dataset", name.to_string())
            .with_context("got", got.to_string())
            .with_context("want", want.to_string()),
    )
}

fn check_matrix(
    name: &str,
    matrix: &[Vec<f64>],
    num_runs: usize,
    mcs: usize,
) -> Result<(), SpinpostError> {
    if matrix.len() != num_runs {
        return Err(shape_error(name, matrix.len(), num_runs, "one row per run"));
    }
    for (run, row) in matrix.iter().enumerate() {
        if row.len() != mcs {
            return Err(SpinpostError::Dataset(
                ErrorInfo::new(
                    "shape-mismatch",
                    format!("`{name}` row {run} does not span the sweep count"),
                )
                .with_context("dataset", name.to_string())
                .with_context("run", run.to_string())
                .with_context("got", row.len().to_string())
                .with_context("want", mcs.to_string()),
            ));
        }
    }
    Ok(())
}

fn check_axes(
    name: &str,
    series: &AxisSeries,
    num_runs: usize,
    mcs: usize,
) -> Result<(), SpinpostError> {
    check_matrix(&format!("{name}_x"), &series.x, num_runs, mcs)?;
    check_matrix(&format!("{name}_y"), &series.y, num_runs, mcs)?;
    check_matrix(&format!("{name}_z"), &series.z, num_runs, mcs)?;
    Ok(())
}
