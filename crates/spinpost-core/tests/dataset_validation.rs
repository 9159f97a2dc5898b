use std::collections::BTreeMap;
use std::io::Write;

use spinpost_core::{AxisSeries, Condition, Dataset, SpeciesTable, SpinpostError};

fn matrix(num_runs: usize, mcs: usize, value: f64) -> Vec<Vec<f64>> {
    vec![vec![value; mcs]; num_runs]
}

fn axes(num_runs: usize, mcs: usize, value: f64) -> AxisSeries {
    AxisSeries {
        x: matrix(num_runs, mcs, value),
        y: matrix(num_runs, mcs, value),
        z: matrix(num_runs, mcs, value),
    }
}

fn sample_dataset() -> Dataset {
    let mut species = BTreeMap::new();
    species.insert("Fe".to_string(), axes(2, 4, 0.5));
    species.insert("Nd".to_string(), axes(2, 4, 0.25));
    Dataset {
        mcs: 4,
        seed: 42,
        kb: 1.0,
        temperature: vec![1.0, 2.0],
        field: vec![0.0, 0.0],
        positions: vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
        types: vec!["Fe".to_string(), "Fe".to_string(), "Nd".to_string()],
        energy: matrix(2, 4, -1.0),
        magnetization: axes(2, 4, 1.0),
        species,
        finalstates: None,
    }
}

#[test]
fn valid_dataset_passes() {
    assert!(sample_dataset().validate().is_ok());
}

#[test]
fn missing_species_series_is_fatal() {
    let mut dataset = sample_dataset();
    dataset.species.remove("Nd");
    let err = dataset.validate().unwrap_err();
    match err {
        SpinpostError::Dataset(info) => {
            assert_eq!(info.code, "missing-species-series");
            assert_eq!(info.context.get("species").map(String::as_str), Some("Nd"));
        }
        other => panic!("expected dataset error, got {other:?}"),
    }
}

#[test]
fn ragged_energy_matrix_is_rejected() {
    let mut dataset = sample_dataset();
    dataset.energy[1].pop();
    let err = dataset.validate().unwrap_err();
    assert_eq!(err.info().code, "shape-mismatch");
}

#[test]
fn field_length_mismatch_is_rejected() {
    let mut dataset = sample_dataset();
    dataset.field.push(3.0);
    let err = dataset.validate().unwrap_err();
    assert_eq!(err.info().code, "shape-mismatch");
}

#[test]
fn kb_defaults_to_one_when_absent() {
    let mut value = serde_json::to_value(sample_dataset()).unwrap();
    value.as_object_mut().unwrap().remove("kb");
    let dataset: Dataset = serde_json::from_value(value).unwrap();
    assert_eq!(dataset.kb, 1.0);
}

#[test]
fn load_reads_and_validates_json() {
    let dataset = sample_dataset();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(serde_json::to_string(&dataset).unwrap().as_bytes())
        .unwrap();
    let loaded = Dataset::load(file.path()).unwrap();
    assert_eq!(loaded, dataset);
}

#[test]
fn load_rejects_invalid_shapes() {
    let mut dataset = sample_dataset();
    dataset.energy.pop();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(serde_json::to_string(&dataset).unwrap().as_bytes())
        .unwrap();
    assert!(Dataset::load(file.path()).is_err());
}

#[test]
fn species_table_counts_and_order() {
    let table = sample_dataset().species_table();
    assert_eq!(table.len(), 2);
    assert_eq!(table.count("Fe"), Some(2));
    assert_eq!(table.count("Nd"), Some(1));
    assert_eq!(table.count("Dy"), None);
    assert_eq!(table.total_sites(), 3);
    let labels: Vec<&str> = table.labels().collect();
    assert_eq!(labels, vec!["Fe", "Nd"]);
}

#[test]
fn conditions_compare_bitwise() {
    assert_eq!(Condition::new(1.5, 0.0), Condition::new(1.5, 0.0));
    assert_ne!(Condition::new(1.5, 0.0), Condition::new(1.5, 1.0));
    // Bit identity distinguishes signed zeros; the grouping contract is
    // bit-for-bit, not numeric.
    assert_ne!(Condition::new(0.0, 0.0), Condition::new(-0.0, 0.0));
}

#[test]
fn species_table_from_empty_types_is_empty() {
    let table = SpeciesTable::from_types(&[]);
    assert!(table.is_empty());
    assert_eq!(table.total_sites(), 0);
}
