//! Thermodynamic observables over post-cutoff windows.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use spinpost_core::{ErrorInfo, SpeciesTable, SpinpostError};

use crate::aggregate::AggregatedCondition;
use crate::truncate::equilibrated;

/// Per-species scalar observables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesObservables {
    /// Mean magnetization magnitude per site of the species.
    pub mean_mag: f64,
    /// Mean field-aligned magnetization per site of the species.
    pub mean_mag_z: f64,
    /// Magnetic susceptibility of the species.
    pub susceptibility: f64,
}

/// Scalar observables for one surviving condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionObservables {
    /// Simulation temperature.
    pub temperature: f64,
    /// Applied field.
    pub field: f64,
    /// Mean energy per site.
    pub mean_energy: f64,
    /// Specific heat per site.
    pub specific_heat: f64,
    /// Mean magnetization magnitude per site.
    pub mean_mag: f64,
    /// Mean field-aligned magnetization per site.
    pub mean_mag_z: f64,
    /// Magnetic susceptibility per site.
    pub susceptibility: f64,
    /// Per-species observables in lexicographic label order.
    pub species: BTreeMap<String, SpeciesObservables>,
}

/// Arithmetic mean of a non-empty slice.
pub fn mean(samples: &[f64]) -> f64 {
    samples.iter().sum::<f64>() / samples.len() as f64
}

/// Population variance (denominator = sample count, the biased estimator).
///
/// This matches the reference numbers exactly; the sample variance
/// (count - 1) would not.
pub fn population_variance(samples: &[f64]) -> f64 {
    let mean_value = mean(samples);
    let mean_sq = samples.iter().map(|&s| s * s).sum::<f64>() / samples.len() as f64;
    (mean_sq - mean_value * mean_value).max(0.0)
}

/// Per-sample Euclidean norms of three equal-length axis slices.
pub fn magnitude_series(x: &[f64], y: &[f64], z: &[f64]) -> Vec<f64> {
    x.iter()
        .zip(y.iter())
        .zip(z.iter())
        .map(|((&sx, &sy), &sz)| (sx * sx + sy * sy + sz * sz).sqrt())
        .collect()
}

/// Computes all observables for one aggregated condition.
///
/// The post-cutoff window must be non-empty; the pipeline enforces that
/// before calling. At `temperature == 0` the susceptibility and specific
/// heat are set to NaN explicitly (the formulas divide by temperature);
/// the caller decides whether such a row is kept.
pub fn compute_observables(
    agg: &AggregatedCondition,
    tau: usize,
    table: &SpeciesTable,
    num_sites: usize,
    kb: f64,
) -> Result<ConditionObservables, SpinpostError> {
    let temperature = agg.condition.temperature;
    let sites = num_sites as f64;

    let energy = equilibrated(&agg.energy, tau);
    let magnitude = magnitude_series(
        equilibrated(&agg.magnetization.x, tau),
        equilibrated(&agg.magnetization.y, tau),
        equilibrated(&agg.magnetization.z, tau),
    );
    let mag_z = equilibrated(&agg.magnetization.z, tau);

    let mean_energy = mean(energy) / sites;
    let mean_mag = mean(&magnitude) / sites;
    let mean_mag_z = mean(mag_z) / sites;
    let (susceptibility, specific_heat) = if temperature == 0.0 {
        (f64::NAN, f64::NAN)
    } else {
        (
            population_variance(&magnitude) / (kb * temperature) / sites,
            population_variance(energy) / (kb * temperature * temperature) / sites,
        )
    };

    let mut species = BTreeMap::new();
    for (label, count) in table.iter() {
        let series = agg.species.get(label).ok_or_else(|| {
            SpinpostError::Dataset(
                ErrorInfo::new(
                    "missing-species-series",
                    format!("aggregated condition lacks series for species `{label}`"),
                )
                .with_context("species", label.to_string()),
            )
        })?;
        // Convention: per-species observables divide by the species' own
        // site count, not the global one.
        let species_sites = count as f64;
        let magnitude = magnitude_series(
            equilibrated(&series.x, tau),
            equilibrated(&series.y, tau),
            equilibrated(&series.z, tau),
        );
        let mag_z = equilibrated(&series.z, tau);
        let susceptibility = if temperature == 0.0 {
            f64::NAN
        } else {
            population_variance(&magnitude) / (kb * temperature) / species_sites
        };
        species.insert(
            label.to_string(),
            SpeciesObservables {
                mean_mag: mean(&magnitude) / species_sites,
                mean_mag_z: mean(mag_z) / species_sites,
                susceptibility,
            },
        );
    }

    Ok(ConditionObservables {
        temperature,
        field: agg.condition.field,
        mean_energy,
        specific_heat,
        mean_mag,
        mean_mag_z,
        susceptibility,
        species,
    })
}
