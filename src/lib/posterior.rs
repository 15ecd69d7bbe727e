use crate::error::EstimateError;
use crate::prior::{alpha_beta, BetaParams};
use log::debug;

/// Share of the true electorate the candidate must exceed to win.
pub const WIN_THRESHOLD: f64 = 0.5;

/// How far the count has progressed.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CountState {
    pub total_votes: f64,
    pub fraction_counted: f64,
}

impl CountState {
    pub fn new(total_votes: f64, fraction_counted: f64) -> Result<Self, EstimateError> {
        if !total_votes.is_finite() || total_votes < 0.0 {
            return Err(EstimateError::InvalidTotalVotes(total_votes));
        }
        check_fraction("fraction_counted", fraction_counted)?;
        Ok(Self {
            total_votes,
            fraction_counted,
        })
    }

    pub fn counted_votes(&self) -> f64 {
        self.total_votes * self.fraction_counted
    }

    /// Splits the counted votes into `(votes_in_favor, votes_against)`.
    pub fn split(&self, fraction_in_favor: f64) -> Result<(f64, f64), EstimateError> {
        check_fraction("fraction_in_favor", fraction_in_favor)?;
        let counted_votes = self.counted_votes();
        let votes_in_favor = counted_votes * fraction_in_favor;
        // max(0) guards against -0.0 style rounding when fraction_in_favor == 1
        let votes_against = (counted_votes - votes_in_favor).max(0.0);
        Ok((votes_in_favor, votes_against))
    }
}

fn check_fraction(name: &'static str, value: f64) -> Result<(), EstimateError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(EstimateError::InvalidFraction { name, value });
    }
    Ok(())
}

/// Posterior probability that the true vote share exceeds one half, given the
/// prior shape parameters, the count state and the share of counted votes in favor.
pub fn posterior_winning_probability(
    prior: &BetaParams,
    count: &CountState,
    fraction_in_favor: f64,
) -> Result<f64, EstimateError> {
    let (votes_in_favor, votes_against) = count.split(fraction_in_favor)?;
    let posterior = prior.update(votes_in_favor, votes_against);
    posterior.probability_above(WIN_THRESHOLD)
}

pub fn winning_probability(
    prior_mu: f64,
    prior_sigma: f64,
    total_votes: f64,
    fraction_counted: f64,
    fraction_in_favor: f64,
) -> Result<f64, EstimateError> {
    let prior = alpha_beta(prior_mu, prior_sigma)?;
    let count = CountState::new(total_votes, fraction_counted)?;
    posterior_winning_probability(&prior, &count, fraction_in_favor)
}

/// Vectorized form of [`winning_probability`]. The output has one entry per
/// input fraction, in the same order. The first failing scenario aborts the call.
pub fn winning_probabilities(
    prior_mu: f64,
    prior_sigma: f64,
    total_votes: f64,
    fraction_counted: f64,
    fractions_in_favor: &[f64],
) -> Result<Vec<f64>, EstimateError> {
    let prior = alpha_beta(prior_mu, prior_sigma)?;
    let count = CountState::new(total_votes, fraction_counted)?;
    debug!(
        "Estimating {} scenarios with {:.1} counted votes",
        fractions_in_favor.len(),
        count.counted_votes()
    );
    fractions_in_favor
        .iter()
        .map(|&fraction_in_favor| posterior_winning_probability(&prior, &count, fraction_in_favor))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sweep::linspace;
    use itertools::Itertools;

    #[test]
    fn test_count_state() {
        let count = CountState::new(100000.0, 0.01).unwrap();
        assert!((count.counted_votes() - 1000.0).abs() < 1e-9);
        let (in_favor, against) = count.split(0.3).unwrap();
        assert!((in_favor - 300.0).abs() < 1e-9);
        assert!((against - 700.0).abs() < 1e-9);
        assert!((in_favor + against - count.counted_votes()).abs() < 1e-9);

        let (in_favor, against) = count.split(1.0).unwrap();
        assert!((in_favor - 1000.0).abs() < 1e-9);
        assert_eq!(against, 0.0);
    }

    #[test]
    fn test_count_state_rejects_invalid_input() {
        assert_eq!(
            CountState::new(-1.0, 0.5),
            Err(EstimateError::InvalidTotalVotes(-1.0))
        );
        assert!(CountState::new(f64::INFINITY, 0.5).is_err());
        assert!(matches!(
            CountState::new(100.0, 1.5),
            Err(EstimateError::InvalidFraction {
                name: "fraction_counted",
                ..
            })
        ));
        assert!(CountState::new(100.0, f64::NAN).is_err());
        let count = CountState::new(100.0, 0.5).unwrap();
        assert!(matches!(
            count.split(-0.1),
            Err(EstimateError::InvalidFraction {
                name: "fraction_in_favor",
                ..
            })
        ));
    }

    #[test]
    fn test_nothing_counted_returns_prior() {
        let prior = alpha_beta(0.4, 0.05).unwrap();
        let expected = 1.0 - prior.cdf(0.5).unwrap();
        for x in [0.0, 0.2, 0.5, 0.77, 1.0] {
            let p = winning_probability(0.4, 0.05, 100000.0, 0.0, x).unwrap();
            assert!((p - expected).abs() < 1e-12, "x={}: {} vs {}", x, p, expected);
        }
        let p = winning_probability(0.4, 0.05, 0.0, 0.3, 0.9).unwrap();
        assert!((p - expected).abs() < 1e-12);
    }

    #[test]
    fn test_default_scenario() {
        // Prior Beta(38, 57), 1000 counted votes split evenly -> Beta(538, 557)
        let p = winning_probability(0.4, 0.05, 100000.0, 0.01, 0.5).unwrap();
        assert!((p - 0.282844863).abs() < 1e-6);
        let baseline = winning_probability(0.4, 0.05, 100000.0, 0.0, 0.5).unwrap();
        assert!(baseline < p && p < 0.5);
    }

    #[test]
    fn test_extreme_fractions_in_favor() {
        let none = winning_probability(0.4, 0.05, 100000.0, 0.01, 0.0).unwrap();
        let all = winning_probability(0.4, 0.05, 100000.0, 0.01, 1.0).unwrap();
        assert!(none < 1e-200);
        assert!((all - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_monotonic_in_fraction_in_favor() {
        let grid = linspace(0.0, 1.0, 401);
        for &(mu, sigma, total, counted) in &[
            (0.4, 0.05, 100000.0, 0.01),
            (0.7, 0.1, 10000.0, 0.05),
            (0.2, 0.02, 1e7, 0.001),
        ] {
            let ps = winning_probabilities(mu, sigma, total, counted, &grid).unwrap();
            assert_eq!(ps.len(), grid.len());
            for (a, b) in ps.iter().tuple_windows() {
                assert!(b >= a, "mu={}: {} then {}", mu, a, b);
            }
        }
    }

    #[test]
    fn test_concentrates_as_count_completes() {
        let winning = winning_probability(0.4, 0.05, 1e6, 1.0, 0.52).unwrap();
        let losing = winning_probability(0.4, 0.05, 1e6, 1.0, 0.48).unwrap();
        assert!(winning > 1.0 - 1e-9);
        assert!(losing < 1e-9);

        let mut previous = 0.0;
        for counted in [0.01, 0.1, 0.5, 1.0] {
            let p = winning_probability(0.4, 0.05, 1e6, counted, 0.52).unwrap();
            assert!(p >= previous);
            previous = p;
        }

        // Sharper with more votes
        let small = winning_probability(0.4, 0.05, 1e4, 1.0, 0.505).unwrap();
        let large = winning_probability(0.4, 0.05, 1e6, 1.0, 0.505).unwrap();
        assert!(small < large);
        assert!((small - 0.78994).abs() < 1e-3);
    }

    #[test]
    fn test_large_electorate() {
        let p = winning_probability(0.4, 0.05, 1e7, 1.0, 0.5).unwrap();
        assert!((p - 0.497603).abs() < 1e-4);
    }

    #[test]
    fn test_vectorized_preserves_order() {
        let fractions = vec![0.6, 0.4, 0.5, 0.45];
        let ps = winning_probabilities(0.4, 0.05, 100000.0, 0.01, &fractions).unwrap();
        assert_eq!(ps.len(), 4);
        for (&x, &p) in fractions.iter().zip(ps.iter()) {
            assert_eq!(p, winning_probability(0.4, 0.05, 100000.0, 0.01, x).unwrap());
        }
        assert!(winning_probabilities(0.4, 0.05, 100000.0, 0.01, &[]).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(matches!(
            winning_probability(0.5, 0.9, 100000.0, 0.01, 0.5),
            Err(EstimateError::InvalidPrior { .. })
        ));
        assert!(matches!(
            winning_probability(0.4, 0.05, -5.0, 0.01, 0.5),
            Err(EstimateError::InvalidTotalVotes(_))
        ));
        assert!(matches!(
            winning_probabilities(0.4, 0.05, 100.0, 0.01, &[0.2, 1.2]),
            Err(EstimateError::InvalidFraction { .. })
        ));
    }
}
