use std::collections::BTreeMap;

use spinpost_analysis::observables::{magnitude_series, mean, population_variance};
use spinpost_analysis::{compute_observables, AggregatedCondition, VectorSeries};
use spinpost_core::{Condition, SpeciesTable};

fn vector(x: Vec<f64>, y: Vec<f64>, z: Vec<f64>) -> VectorSeries {
    VectorSeries { x, y, z }
}

fn aggregated(
    condition: Condition,
    energy: Vec<f64>,
    magnetization: VectorSeries,
    species: BTreeMap<String, VectorSeries>,
) -> AggregatedCondition {
    AggregatedCondition {
        condition,
        members: vec![0],
        energy,
        magnetization,
        species,
    }
}

#[test]
fn population_variance_uses_biased_denominator() {
    // Sample variance of [1, 2, 3, 4] would be 5/3; population is 1.25.
    assert_eq!(population_variance(&[1.0, 2.0, 3.0, 4.0]), 1.25);
    assert_eq!(population_variance(&[7.0]), 0.0);
}

#[test]
fn magnitude_is_per_sample_euclidean_norm() {
    let norms = magnitude_series(&[3.0, 0.0], &[4.0, 0.0], &[0.0, 2.0]);
    assert_eq!(norms, vec![5.0, 2.0]);
}

#[test]
fn constant_energy_series_has_zero_specific_heat() {
    let zeros = vec![0.0; 5];
    let agg = aggregated(
        Condition::new(2.0, 0.0),
        vec![1.0; 5],
        vector(zeros.clone(), zeros.clone(), zeros),
        BTreeMap::new(),
    );
    let table = SpeciesTable::from_types(&[]);
    let obs = compute_observables(&agg, 0, &table, 1, 1.0).unwrap();
    assert_eq!(obs.mean_energy, 1.0);
    assert_eq!(obs.specific_heat, 0.0);
    assert_eq!(obs.mean_mag, 0.0);
    assert_eq!(obs.susceptibility, 0.0);
}

#[test]
fn susceptibility_matches_hand_computation() {
    // |M| samples are [0, 2]: mean 1, population variance 1.
    let agg = aggregated(
        Condition::new(1.0, 0.0),
        vec![0.0, 0.0],
        vector(vec![0.0, 2.0], vec![0.0, 0.0], vec![0.0, 0.0]),
        BTreeMap::new(),
    );
    let table = SpeciesTable::from_types(&[]);
    let obs = compute_observables(&agg, 0, &table, 1, 1.0).unwrap();
    assert_eq!(obs.mean_mag, 1.0);
    assert_eq!(obs.susceptibility, 1.0);
}

#[test]
fn boltzmann_scale_divides_fluctuation_observables() {
    let agg = aggregated(
        Condition::new(1.0, 0.0),
        vec![0.0, 2.0],
        vector(vec![0.0, 2.0], vec![0.0, 0.0], vec![0.0, 0.0]),
        BTreeMap::new(),
    );
    let table = SpeciesTable::from_types(&[]);
    let unscaled = compute_observables(&agg, 0, &table, 1, 1.0).unwrap();
    let scaled = compute_observables(&agg, 0, &table, 1, 2.0).unwrap();
    assert_eq!(scaled.susceptibility, unscaled.susceptibility / 2.0);
    assert_eq!(scaled.specific_heat, unscaled.specific_heat / 2.0);
    // Means carry no temperature factor and are unaffected.
    assert_eq!(scaled.mean_energy, unscaled.mean_energy);
    assert_eq!(scaled.mean_mag, unscaled.mean_mag);
}

#[test]
fn cutoff_is_applied_before_statistics() {
    // tau = 1 discards the first (outlier) sample.
    let zeros = vec![0.0; 5];
    let agg = aggregated(
        Condition::new(2.0, 0.0),
        vec![100.0, 1.0, 1.0, 1.0, 1.0],
        vector(zeros.clone(), zeros.clone(), zeros),
        BTreeMap::new(),
    );
    let table = SpeciesTable::from_types(&[]);
    let obs = compute_observables(&agg, 1, &table, 1, 1.0).unwrap();
    assert_eq!(obs.mean_energy, 1.0);
    assert_eq!(obs.specific_heat, 0.0);
}

#[test]
fn site_counts_normalize_totals_and_species() {
    let labels = vec!["Fe".to_string(), "Fe".to_string(), "Nd".to_string()];
    let table = SpeciesTable::from_types(&labels);
    let mut species = BTreeMap::new();
    // Fe carries |M| = 4 per sample over 2 sites; Nd |M| = 3 over 1 site.
    species.insert(
        "Fe".to_string(),
        vector(vec![4.0, 4.0], vec![0.0, 0.0], vec![0.0, 0.0]),
    );
    species.insert(
        "Nd".to_string(),
        vector(vec![0.0, 0.0], vec![0.0, 0.0], vec![3.0, 3.0]),
    );
    let agg = aggregated(
        Condition::new(1.0, 0.0),
        vec![-3.0, -3.0],
        vector(vec![0.0, 0.0], vec![0.0, 0.0], vec![6.0, 6.0]),
        species,
    );
    let obs = compute_observables(&agg, 0, &table, 3, 1.0).unwrap();
    assert_eq!(obs.mean_energy, -1.0);
    assert_eq!(obs.mean_mag_z, 2.0);
    let fe = &obs.species["Fe"];
    assert_eq!(fe.mean_mag, 2.0);
    assert_eq!(fe.mean_mag_z, 0.0);
    let nd = &obs.species["Nd"];
    assert_eq!(nd.mean_mag, 3.0);
    assert_eq!(nd.mean_mag_z, 3.0);
}

#[test]
fn zero_temperature_yields_nan_sentinels() {
    let agg = aggregated(
        Condition::new(0.0, 1.0),
        vec![1.0, 2.0],
        vector(vec![1.0, 2.0], vec![0.0, 0.0], vec![0.0, 0.0]),
        BTreeMap::new(),
    );
    let table = SpeciesTable::from_types(&[]);
    let obs = compute_observables(&agg, 0, &table, 1, 1.0).unwrap();
    assert!(obs.susceptibility.is_nan());
    assert!(obs.specific_heat.is_nan());
    // Means stay well defined.
    assert_eq!(obs.mean_energy, 1.5);
    assert_eq!(obs.mean_mag, 1.5);
}
