use crate::beta_function::regularized_incomplete_beta;
use crate::error::EstimateError;
use log::debug;

/// Belief about the candidate's true vote share before any votes are counted.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PriorBelief {
    pub mu: f64,
    pub sigma: f64,
}

impl PriorBelief {
    pub fn new(mu: f64, sigma: f64) -> Self {
        Self { mu, sigma }
    }

    pub fn to_beta(&self) -> Result<BetaParams, EstimateError> {
        alpha_beta(self.mu, self.sigma)
    }
}

/// Shape parameters of a Beta distribution
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BetaParams {
    pub alpha: f64,
    pub beta: f64,
}

impl BetaParams {
    pub fn new(alpha: f64, beta: f64) -> Self {
        Self { alpha, beta }
    }

    /// Conjugate update with `in_favor` successes and `against` failures.
    /// Counts are real valued pseudo-counts.
    pub fn update(&self, in_favor: f64, against: f64) -> Self {
        Self {
            alpha: self.alpha + in_favor,
            beta: self.beta + against,
        }
    }

    pub fn mean(&self) -> f64 {
        self.alpha / (self.alpha + self.beta)
    }

    pub fn variance(&self) -> f64 {
        let numerator = self.alpha * self.beta;
        let denominator = (self.alpha + self.beta).powf(2.0) * (self.alpha + self.beta + 1.0);
        numerator / denominator
    }

    pub fn standard_deviation(&self) -> f64 {
        self.variance().sqrt()
    }

    pub fn cdf(&self, x: f64) -> Result<f64, EstimateError> {
        regularized_incomplete_beta(self.alpha, self.beta, x)
    }

    /// Probability mass strictly above `threshold`.
    ///
    /// Evaluated as `I_{1-t}(beta, alpha)` instead of `1 - I_t(alpha, beta)`
    /// so that small upper tails are not lost to cancellation.
    pub fn probability_above(&self, threshold: f64) -> Result<f64, EstimateError> {
        regularized_incomplete_beta(self.beta, self.alpha, 1.0 - threshold)
    }
}

/// Method-of-moments conversion of a mean and standard deviation into Beta
/// shape parameters.
///
/// Fails with `InvalidPrior` when `mu` is outside (0, 1), when `sigma` is not
/// positive, or when `sigma^2 >= mu * (1 - mu)`, the largest variance a Beta
/// distribution with mean `mu` can have.
pub fn alpha_beta(mu: f64, sigma: f64) -> Result<BetaParams, EstimateError> {
    let invalid = |reason| EstimateError::InvalidPrior { mu, sigma, reason };

    if !mu.is_finite() || mu <= 0.0 || mu >= 1.0 {
        return Err(invalid("mu must lie strictly between 0 and 1"));
    }
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(invalid("sigma must be a positive finite number"));
    }
    if sigma * sigma >= mu * (1.0 - mu) {
        return Err(invalid("variance exceeds mu * (1 - mu)"));
    }

    let alpha = mu.powi(2) * ((1.0 - mu) / sigma.powi(2) - 1.0 / mu);
    let beta = alpha * (1.0 / mu - 1.0);

    // Rounding can still push a borderline case to zero, and a tiny sigma to infinity
    if !(alpha.is_finite() && beta.is_finite() && alpha > 0.0 && beta > 0.0) {
        return Err(invalid("derived shape parameters are not positive and finite"));
    }
    debug!("Prior mu = {}, sigma = {} -> α = {:.6}, β = {:.6}", mu, sigma, alpha, beta);
    Ok(BetaParams::new(alpha, beta))
}
