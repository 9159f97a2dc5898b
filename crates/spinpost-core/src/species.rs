//! Closed per-species site bookkeeping.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Mapping from species label to its site count.
///
/// Built exactly once from the static `types` metadata before the pipeline
/// starts and shared read-only by the aggregation and observable stages.
/// Iteration order is lexicographic, which the table serializer relies on
/// for reproducible column order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesTable {
    counts: BTreeMap<String, usize>,
}

impl SpeciesTable {
    /// Builds the table from the per-site species labels.
    pub fn from_types(types: &[String]) -> Self {
        let mut counts = BTreeMap::new();
        for label in types {
            *counts.entry(label.clone()).or_insert(0usize) += 1;
        }
        Self { counts }
    }

    /// Number of sites carrying the given label, if the label exists.
    pub fn count(&self, label: &str) -> Option<usize> {
        self.counts.get(label).copied()
    }

    /// Iterates labels in lexicographic order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(String::as_str)
    }

    /// Iterates (label, site count) pairs in lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(label, count)| (label.as_str(), *count))
    }

    /// Number of distinct species labels.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns true when no species labels were declared.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total number of sites across all species.
    pub fn total_sites(&self) -> usize {
        self.counts.values().sum()
    }
}
