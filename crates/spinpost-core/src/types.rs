//! Value types identifying simulated state points.

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// One simulated state point: an ordered (temperature, field) pair.
///
/// Equality and hashing compare the raw IEEE-754 bit patterns of both
/// components. The simulation engine re-derives repeated conditions from the
/// same floating-point literals, so bit-identity is the grouping contract;
/// introducing a tolerance here would change which runs merge.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Condition {
    /// Simulation temperature.
    pub temperature: f64,
    /// Applied field magnitude.
    pub field: f64,
}

/// Bit-level identity key for a [`Condition`], usable in hash and tree maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConditionKey(u64, u64);

impl Condition {
    /// Creates a condition from its two components.
    pub fn new(temperature: f64, field: f64) -> Self {
        Self { temperature, field }
    }

    /// Returns the bit-identity key used for grouping.
    pub fn key(&self) -> ConditionKey {
        ConditionKey(self.temperature.to_bits(), self.field.to_bits())
    }
}

impl PartialEq for Condition {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Condition {}

impl Hash for Condition {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}
