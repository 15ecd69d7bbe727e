use crate::error::EstimateError;
use statrs::function::gamma::ln_gamma;

/// Iteration cap for the continued fraction. Convergence needs roughly
/// `sqrt(max(a, b))` iterations near the mean, so this covers shape
/// parameters far beyond 10^7 pseudo-counts.
pub const MAX_ITERATIONS: usize = 100_000;
const EPSILON: f64 = 1e-15;
const FPMIN: f64 = 1e-300;

pub fn log_beta(a: f64, b: f64) -> f64 {
    ln_gamma(a) + ln_gamma(b) - ln_gamma(a + b)
}

/// Regularized incomplete beta function `I_x(a, b)`, the CDF of Beta(a, b) at `x`.
pub fn regularized_incomplete_beta(a: f64, b: f64, x: f64) -> Result<f64, EstimateError> {
    regularized_incomplete_beta_with_limit(a, b, x, MAX_ITERATIONS)
}

fn regularized_incomplete_beta_with_limit(
    a: f64,
    b: f64,
    x: f64,
    max_iterations: usize,
) -> Result<f64, EstimateError> {
    let failure = EstimateError::NumericalFailure { a, b, x };
    if !(a.is_finite() && b.is_finite() && a > 0.0 && b > 0.0) || x.is_nan() {
        return Err(failure);
    }
    if x <= 0.0 {
        return Ok(0.0);
    }
    if x >= 1.0 {
        return Ok(1.0);
    }

    // log of x^a (1-x)^b / B(a, b)
    let log_front = a * x.ln() + b * (-x).ln_1p() - log_beta(a, b);
    if !log_front.is_finite() {
        return Err(failure);
    }
    let front = log_front.exp();

    let value = if x < (a + 1.0) / (a + b + 2.0) {
        let fraction = continued_fraction(a, b, x, max_iterations).ok_or(failure.clone())?;
        front * fraction / a
    } else {
        let fraction = continued_fraction(b, a, 1.0 - x, max_iterations).ok_or(failure.clone())?;
        1.0 - front * fraction / b
    };

    if !value.is_finite() {
        return Err(failure);
    }
    Ok(value.clamp(0.0, 1.0))
}

/// Modified Lentz evaluation of the incomplete beta continued fraction.
/// Returns `None` if it has not converged after `max_iterations`.
fn continued_fraction(a: f64, b: f64, x: f64, max_iterations: usize) -> Option<f64> {
    let qab = a + b;
    let qap = a + 1.0;
    let qam = a - 1.0;

    let mut c = 1.0;
    let mut d = 1.0 - qab * x / qap;
    if d.abs() < FPMIN {
        d = FPMIN;
    }
    d = 1.0 / d;
    let mut h = d;

    for m in 1..=max_iterations {
        let m = m as f64;
        let m2 = 2.0 * m;

        // even step
        let aa = m * (b - m) * x / ((qam + m2) * (a + m2));
        d = 1.0 + aa * d;
        if d.abs() < FPMIN {
            d = FPMIN;
        }
        c = 1.0 + aa / c;
        if c.abs() < FPMIN {
            c = FPMIN;
        }
        d = 1.0 / d;
        h *= d * c;

        // odd step
        let aa = -(a + m) * (qab + m) * x / ((a + m2) * (qap + m2));
        d = 1.0 + aa * d;
        if d.abs() < FPMIN {
            d = FPMIN;
        }
        c = 1.0 + aa / c;
        if c.abs() < FPMIN {
            c = FPMIN;
        }
        d = 1.0 / d;
        let delta = d * c;
        h *= delta;

        if (delta - 1.0).abs() < EPSILON {
            return Some(h);
        }
    }
    None
}
