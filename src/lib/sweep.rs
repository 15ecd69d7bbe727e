use crate::config::SweepConfig;
use crate::error::EstimateError;
use crate::line_role::{role, LineRole};
use crate::posterior::{posterior_winning_probability, CountState};
use crate::prior::PriorBelief;
use anyhow::{bail, Result};
use itertools::Itertools;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use strum_macros::EnumIter;

pub const X_LABEL: &str = "Percentage of counted votes in favor";
pub const Y_LABEL: &str = "Probability of winning";

/// The input varied from curve to curve within a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepAxis {
    PriorMu,
    PriorSigma,
    TotalVotes,
    FractionCounted,
}

impl SweepAxis {
    pub fn as_str(&self) -> &'static str {
        match self {
            SweepAxis::PriorMu => "mu",
            SweepAxis::PriorSigma => "sigma",
            SweepAxis::TotalVotes => "total_votes",
            SweepAxis::FractionCounted => "fraction_counted",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            SweepAxis::PriorMu => "Varying mu of beta prior",
            SweepAxis::PriorSigma => "Varying sigma of beta prior",
            SweepAxis::TotalVotes => "Varying total votes",
            SweepAxis::FractionCounted => "Varying fraction counted",
        }
    }

    pub fn legend_location(&self) -> LegendLocation {
        match self {
            SweepAxis::TotalVotes => LegendLocation::LowerRight,
            _ => LegendLocation::UpperLeft,
        }
    }
}

impl fmt::Display for SweepAxis {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SweepAxis {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mu" | "prior_mu" => Ok(SweepAxis::PriorMu),
            "sigma" | "prior_sigma" => Ok(SweepAxis::PriorSigma),
            "total_votes" => Ok(SweepAxis::TotalVotes),
            "fraction_counted" => Ok(SweepAxis::FractionCounted),
            _ => bail!("Invalid sweep axis: {}", s),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegendLocation {
    UpperLeft,
    LowerRight,
}

/// All scalar inputs of an estimation apart from the fraction in favor.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EstimateInputs {
    pub prior_mu: f64,
    pub prior_sigma: f64,
    pub total_votes: f64,
    pub fraction_counted: f64,
}

impl EstimateInputs {
    pub fn prior(&self) -> PriorBelief {
        PriorBelief::new(self.prior_mu, self.prior_sigma)
    }

    /// Copy of `self` with the input named by `axis` replaced by `value`.
    pub fn with_value(&self, axis: SweepAxis, value: f64) -> Self {
        let mut inputs = *self;
        match axis {
            SweepAxis::PriorMu => inputs.prior_mu = value,
            SweepAxis::PriorSigma => inputs.prior_sigma = value,
            SweepAxis::TotalVotes => inputs.total_votes = value,
            SweepAxis::FractionCounted => inputs.fraction_counted = value,
        }
        inputs
    }

    /// Estimates every scenario in `fractions_in_favor`.
    ///
    /// Invalid prior or count inputs fail the whole curve. A scenario that
    /// fails on its own is left out of both sequences.
    pub fn curve(
        &self,
        label: String,
        role: LineRole,
        fractions_in_favor: &[f64],
    ) -> Result<Curve, EstimateError> {
        let prior = self.prior().to_beta()?;
        let count = CountState::new(self.total_votes, self.fraction_counted)?;

        let mut curve = Curve {
            label,
            role,
            fractions_in_favor: Vec::with_capacity(fractions_in_favor.len()),
            winning_probabilities: Vec::with_capacity(fractions_in_favor.len()),
        };
        for &fraction_in_favor in fractions_in_favor {
            match posterior_winning_probability(&prior, &count, fraction_in_favor) {
                Ok(p) => {
                    curve.fractions_in_favor.push(fraction_in_favor);
                    curve.winning_probabilities.push(p);
                }
                Err(e) => warn!("Skipping point {} of curve {}: {}", fraction_in_favor, curve.label, e),
            }
        }
        Ok(curve)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    pub label: String,
    pub role: LineRole,
    pub fractions_in_favor: Vec<f64>,
    pub winning_probabilities: Vec<f64>,
}

impl Curve {
    pub fn len(&self) -> usize {
        self.fractions_in_favor.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fractions_in_favor.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.fractions_in_favor
            .iter()
            .cloned()
            .zip(self.winning_probabilities.iter().cloned())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SkippedCurve {
    pub label: String,
    pub reason: String,
}

/// Everything the renderer needs to draw one chart.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    pub axis: SweepAxis,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub legend_location: LegendLocation,
    pub curves: Vec<Curve>,
    pub skipped: Vec<SkippedCurve>,
}

impl Chart {
    pub fn new(axis: SweepAxis) -> Self {
        Self {
            axis,
            title: axis.title().to_string(),
            x_label: X_LABEL.to_string(),
            y_label: Y_LABEL.to_string(),
            legend_location: axis.legend_location(),
            curves: Vec::new(),
            skipped: Vec::new(),
        }
    }
}

/// Legend label for a swept value, e.g. `0.1`, `100000`.
pub fn format_label(value: f64) -> String {
    format!("{}", value)
}

/// `points` evenly spaced values from `start` to `end`, both included.
pub fn linspace(start: f64, end: f64, points: usize) -> Vec<f64> {
    match points {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (points - 1) as f64;
            (0..points)
                .map(|i| if i == points - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}

/// Sweeps `axis` over `values`, holding the rest of `base` fixed.
pub fn sweep(
    axis: SweepAxis,
    base: &EstimateInputs,
    values: &[f64],
    fractions_in_favor: &[f64],
) -> Chart {
    let mut chart = Chart::new(axis);
    for (i, &value) in values.iter().enumerate() {
        let label = format_label(value);
        let inputs = base.with_value(axis, value);
        debug!("{}: estimating curve {} with {:?}", axis, label, inputs);
        match inputs.curve(label.clone(), role(i, values.len()), fractions_in_favor) {
            Ok(curve) => chart.curves.push(curve),
            Err(e) => {
                warn!("Skipping {} = {}: {}", axis, label, e);
                chart.skipped.push(SkippedCurve {
                    label,
                    reason: e.to_string(),
                });
            }
        }
    }
    if !chart.skipped.is_empty() {
        warn!(
            "{}: skipped {} curve(s): {}",
            chart.title,
            chart.skipped.len(),
            chart.skipped.iter().map(|s| s.label.as_str()).join(", ")
        );
    }
    chart
}

/// Runs the configured sweep for each axis in `axes`, in order.
pub fn run_sweeps(config: &SweepConfig, axes: &[SweepAxis]) -> Vec<Chart> {
    let base = config.base_inputs();
    axes.iter()
        .map(|&axis| {
            let axis_sweep = config.axis_sweep(axis);
            info!(
                "{}: {} curves over {} scenarios",
                axis.title(),
                axis_sweep.values.len(),
                axis_sweep.grid.points
            );
            sweep(axis, &base, &axis_sweep.values, &axis_sweep.grid.values())
        })
        .collect()
}
