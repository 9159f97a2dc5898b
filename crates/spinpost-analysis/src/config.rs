//! YAML-configurable analysis parameters.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use spinpost_core::{ErrorInfo, SpinpostError};

/// Parameters governing one analysis invocation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Burn-in cutoff derivation.
    #[serde(default)]
    pub burn_in: BurnInPolicy,
    /// Condition grouping strategy.
    #[serde(default)]
    pub grouping: GroupingStrategy,
    /// Handling of conditions whose post-cutoff window is empty.
    #[serde(default)]
    pub degenerate: DegeneratePolicy,
    /// Handling of zero-temperature conditions in the fluctuation formulas.
    #[serde(default)]
    pub zero_temperature: ZeroTemperaturePolicy,
}

/// How the equilibration cutoff `tau` is derived for a condition.
///
/// The analyzer variants this crate replaces disagreed on the denominator
/// base: some divided the concatenated series length, others the raw sweep
/// count. Both conventions stay available.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum BurnInPolicy {
    /// `tau = concatenated_series_len / denominator`, per condition.
    SeriesFraction {
        /// Integer divisor applied to the concatenated length.
        #[serde(default = "default_denominator")]
        denominator: usize,
    },
    /// `tau = mcs / denominator`, uniform across all conditions.
    SweepFraction {
        /// Integer divisor applied to the sweep count.
        #[serde(default = "default_denominator")]
        denominator: usize,
    },
}

fn default_denominator() -> usize {
    5
}

impl Default for BurnInPolicy {
    fn default() -> Self {
        BurnInPolicy::SeriesFraction {
            denominator: default_denominator(),
        }
    }
}

/// Supported condition grouping strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum GroupingStrategy {
    /// Merge only contiguous blocks of equal conditions (the historical
    /// behavior; non-adjacent equal blocks stay separate classes).
    #[default]
    ContiguousRuns,
    /// Merge equal conditions wherever they occur in the sequence.
    ByValue,
}

/// Policy for conditions whose post-cutoff window is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum DegeneratePolicy {
    /// Omit the condition's row and log a warning.
    #[default]
    Skip,
    /// Abort the whole analysis.
    Fail,
}

/// Policy for `temperature == 0` in the susceptibility and specific-heat
/// formulas, where the division is otherwise undefined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ZeroTemperaturePolicy {
    /// Emit NaN for the two fluctuation observables and log a warning.
    #[default]
    Sentinel,
    /// Omit the condition's row and log a warning.
    Reject,
}

impl AnalysisConfig {
    /// Loads a configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self, SpinpostError> {
        let text = fs::read_to_string(path).map_err(|err| {
            SpinpostError::Io(
                ErrorInfo::new("config-read", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        let config: AnalysisConfig = serde_yaml::from_str(&text).map_err(|err| {
            SpinpostError::Config(
                ErrorInfo::new("config-parse", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects parameter values the pipeline cannot honor.
    pub fn validate(&self) -> Result<(), SpinpostError> {
        let denominator = match self.burn_in {
            BurnInPolicy::SeriesFraction { denominator } => denominator,
            BurnInPolicy::SweepFraction { denominator } => denominator,
        };
        if denominator == 0 {
            return Err(SpinpostError::Config(
                ErrorInfo::new("zero-denominator", "burn-in denominator must be non-zero")
                    .with_hint("use 5 for the standard tau = len / 5 cutoff"),
            ));
        }
        Ok(())
    }
}
