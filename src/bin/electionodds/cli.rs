// src/bin/electionodds/cli.rs
use clap::{Parser, ValueEnum};
use electionodds_utils::config::{
    DEFAULT_FRACTION_COUNTED, DEFAULT_PRIOR_MU, DEFAULT_PRIOR_SIGMA, DEFAULT_TOTAL_VOTES,
};

#[derive(Parser, Debug)]
#[command(
    name = "electionodds",
    version,
    about = "Probability that a candidate wins given a partial count"
)]
pub struct Cli {
    #[arg(
        value_name = "FRACTION_IN_FAVOR",
        help = "Share of counted votes in favor of the candidate. Can be repeated"
    )]
    pub fractions_in_favor: Vec<f64>,

    #[arg(long, default_value_t = DEFAULT_PRIOR_MU, help = "Mean of the prior vote share")]
    pub prior_mu: f64,

    #[arg(
        long,
        default_value_t = DEFAULT_PRIOR_SIGMA,
        help = "Standard deviation of the prior vote share"
    )]
    pub prior_sigma: f64,

    #[arg(long, default_value_t = DEFAULT_TOTAL_VOTES, help = "Expected total number of votes")]
    pub total_votes: f64,

    #[arg(
        long,
        default_value_t = DEFAULT_FRACTION_COUNTED,
        help = "Fraction of the total votes counted so far"
    )]
    pub fraction_counted: f64,

    #[arg(long, help = "Start of a uniform grid of fractions in favor")]
    pub grid_start: Option<f64>,

    #[arg(long, help = "End of a uniform grid of fractions in favor")]
    pub grid_end: Option<f64>,

    #[arg(long, default_value = "200", help = "Number of points in the grid")]
    pub grid_points: usize,

    #[arg(
        value_enum,
        long,
        default_value = "normal",
        value_name = "VERBOSITY",
        help = "Verbosity level"
    )]
    pub verbosity: LogLevel,
}

#[allow(non_camel_case_types)]
#[derive(ValueEnum, Clone, Debug)]
pub enum LogLevel {
    verbose,
    normal,
    silent,
}
