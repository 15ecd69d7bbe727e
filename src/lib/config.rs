use crate::sweep::{linspace, EstimateInputs, SweepAxis};
use anyhow::Result;
use log::info;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub const DEFAULT_PRIOR_MU: f64 = 0.4;
pub const DEFAULT_PRIOR_SIGMA: f64 = 0.05;
pub const DEFAULT_TOTAL_VOTES: f64 = 100000.0;
pub const DEFAULT_FRACTION_COUNTED: f64 = 0.01;

/// Uniform grid of `fraction_in_favor` scenarios.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    pub start: f64,
    pub end: f64,
    pub points: usize,
}

impl GridSpec {
    pub fn new(start: f64, end: f64, points: usize) -> Self {
        Self { start, end, points }
    }

    pub fn values(&self) -> Vec<f64> {
        linspace(self.start, self.end, self.points)
    }
}

/// Values taken by the swept input and the scenario grid each curve is drawn over.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AxisSweep {
    pub values: Vec<f64>,
    pub grid: GridSpec,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    pub prior_mu: f64,
    pub prior_sigma: f64,
    pub total_votes: f64,
    pub fraction_counted: f64,
    pub mu_sweep: AxisSweep,
    pub sigma_sweep: AxisSweep,
    pub total_votes_sweep: AxisSweep,
    pub fraction_counted_sweep: AxisSweep,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            prior_mu: DEFAULT_PRIOR_MU,
            prior_sigma: DEFAULT_PRIOR_SIGMA,
            total_votes: DEFAULT_TOTAL_VOTES,
            fraction_counted: DEFAULT_FRACTION_COUNTED,
            mu_sweep: AxisSweep {
                values: vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9],
                grid: GridSpec::new(0.4, 0.6, 200),
            },
            sigma_sweep: AxisSweep {
                values: vec![0.02, 0.04, 0.06, 0.08, 1.0],
                grid: GridSpec::new(0.45, 0.65, 200),
            },
            total_votes_sweep: AxisSweep {
                values: vec![10000.0, 100000.0, 1000000.0, 10000000.0],
                grid: GridSpec::new(0.4, 0.8, 400),
            },
            fraction_counted_sweep: AxisSweep {
                values: vec![0.001, 0.01, 0.02, 0.05, 0.1],
                grid: GridSpec::new(0.4, 0.8, 400),
            },
        }
    }
}

impl SweepConfig {
    /// Reads a JSON config. Fields missing from the file keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .map_err(|e| anyhow::anyhow!("Could not open config file: {} ({})", path.display(), e))?;
        let config: SweepConfig = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| anyhow::anyhow!("Could not parse config file: {} ({})", path.display(), e))?;
        info!("Loaded sweep config from {}", path.display());
        Ok(config)
    }

    pub fn base_inputs(&self) -> EstimateInputs {
        EstimateInputs {
            prior_mu: self.prior_mu,
            prior_sigma: self.prior_sigma,
            total_votes: self.total_votes,
            fraction_counted: self.fraction_counted,
        }
    }

    pub fn axis_sweep(&self, axis: SweepAxis) -> &AxisSweep {
        match axis {
            SweepAxis::PriorMu => &self.mu_sweep,
            SweepAxis::PriorSigma => &self.sigma_sweep,
            SweepAxis::TotalVotes => &self.total_votes_sweep,
            SweepAxis::FractionCounted => &self.fraction_counted_sweep,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_base_inputs() {
        let base = SweepConfig::default().base_inputs();
        assert_eq!(base.prior_mu, 0.4);
        assert_eq!(base.prior_sigma, 0.05);
        assert_eq!(base.total_votes, 100000.0);
        assert_eq!(base.fraction_counted, 0.01);
    }

    #[test]
    fn test_axis_sweep_lookup() {
        let config = SweepConfig::default();
        assert_eq!(config.axis_sweep(SweepAxis::PriorMu).values.len(), 9);
        assert_eq!(config.axis_sweep(SweepAxis::PriorSigma).grid.start, 0.45);
        assert_eq!(config.axis_sweep(SweepAxis::TotalVotes).grid.points, 400);
        assert_eq!(
            config.axis_sweep(SweepAxis::FractionCounted).values,
            vec![0.001, 0.01, 0.02, 0.05, 0.1]
        );
    }

    #[test]
    fn test_grid_values() {
        let grid = GridSpec::new(0.4, 0.8, 400).values();
        assert_eq!(grid.len(), 400);
        assert_eq!(grid[0], 0.4);
        assert_eq!(grid[399], 0.8);
    }

    #[test]
    fn test_from_json_file_partial_override() {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        write!(
            file,
            r#"{{"prior_mu": 0.55, "total_votes_sweep": {{"values": [500.0, 5000.0], "grid": {{"start": 0.3, "end": 0.7, "points": 11}}}}}}"#
        )
        .expect("Failed to write config");

        let config = SweepConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.prior_mu, 0.55);
        assert_eq!(config.prior_sigma, DEFAULT_PRIOR_SIGMA);
        assert_eq!(config.total_votes_sweep.values, vec![500.0, 5000.0]);
        assert_eq!(config.total_votes_sweep.grid.points, 11);
        assert_eq!(config.mu_sweep, SweepConfig::default().mu_sweep);
    }

    #[test]
    fn test_from_json_file_errors() {
        assert!(SweepConfig::from_json_file(Path::new("does/not/exist.json")).is_err());

        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        write!(file, "not json").expect("Failed to write config");
        assert!(SweepConfig::from_json_file(file.path()).is_err());
    }
}
