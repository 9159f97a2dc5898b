//! Equilibration burn-in truncation.

use spinpost_core::{ErrorInfo, SpinpostError};

use crate::config::BurnInPolicy;

/// Derives the burn-in cutoff `tau` for one condition.
///
/// `series_len` is the concatenated series length; `mcs` the raw sweep
/// count per run. Integer division floors, so a series shorter than the
/// denominator keeps all of its samples. A zero denominator is rejected
/// here as well as in [`crate::AnalysisConfig::validate`], so direct
/// library callers cannot hit a divide-by-zero panic.
pub fn burn_in_cutoff(
    policy: &BurnInPolicy,
    series_len: usize,
    mcs: usize,
) -> Result<usize, SpinpostError> {
    let (numerator, denominator) = match *policy {
        BurnInPolicy::SeriesFraction { denominator } => (series_len, denominator),
        BurnInPolicy::SweepFraction { denominator } => (mcs, denominator),
    };
    if denominator == 0 {
        return Err(SpinpostError::Config(
            ErrorInfo::new("zero-denominator", "burn-in denominator must be non-zero")
                .with_hint("use 5 for the standard tau = len / 5 cutoff"),
        ));
    }
    Ok(numerator / denominator)
}

/// Returns the post-cutoff window of a series.
///
/// Empty when `tau >= series.len()`; callers decide whether that is a
/// skip or a fatal error.
pub fn equilibrated(series: &[f64], tau: usize) -> &[f64] {
    if tau >= series.len() {
        &[]
    } else {
        &series[tau..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_series_keeps_everything() {
        let policy = BurnInPolicy::SeriesFraction { denominator: 5 };
        assert_eq!(burn_in_cutoff(&policy, 4, 0).unwrap(), 0);
        assert_eq!(equilibrated(&[1.0, 2.0, 3.0, 4.0], 0).len(), 4);
    }

    #[test]
    fn length_five_drops_exactly_one() {
        let policy = BurnInPolicy::SeriesFraction { denominator: 5 };
        let tau = burn_in_cutoff(&policy, 5, 0).unwrap();
        assert_eq!(tau, 1);
        assert_eq!(equilibrated(&[9.0, 1.0, 2.0, 3.0, 4.0], tau), &[1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn sweep_fraction_ignores_series_length() {
        let policy = BurnInPolicy::SweepFraction { denominator: 2 };
        assert_eq!(burn_in_cutoff(&policy, 100, 10).unwrap(), 5);
    }

    #[test]
    fn zero_denominator_is_an_error_not_a_panic() {
        for policy in [
            BurnInPolicy::SeriesFraction { denominator: 0 },
            BurnInPolicy::SweepFraction { denominator: 0 },
        ] {
            let err = burn_in_cutoff(&policy, 10, 10).unwrap_err();
            assert_eq!(err.info().code, "zero-denominator");
        }
    }

    #[test]
    fn cutoff_past_end_yields_empty_window() {
        assert!(equilibrated(&[1.0, 2.0], 2).is_empty());
        assert!(equilibrated(&[], 0).is_empty());
    }
}
