use thiserror::Error;

/// Errors raised by a single estimation call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EstimateError {
    #[error("Invalid prior (mu = {mu}, sigma = {sigma}): {reason}")]
    InvalidPrior {
        mu: f64,
        sigma: f64,
        reason: &'static str,
    },

    #[error("Invalid {name}: {value} is not within [0, 1]")]
    InvalidFraction { name: &'static str, value: f64 },

    #[error("Invalid total votes: {0}. Must be a finite, non-negative number")]
    InvalidTotalVotes(f64),

    #[error("Incomplete beta evaluation failed for a = {a}, b = {b}, x = {x}")]
    NumericalFailure { a: f64, b: f64, x: f64 },
}
