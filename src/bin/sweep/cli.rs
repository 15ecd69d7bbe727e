// src/bin/sweep/cli.rs
use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "sweep",
    version,
    about = "Winning probability curves while varying one input at a time"
)]
pub struct Cli {
    #[arg(
        long,
        short,
        default_value = "electionodds_sweep",
        value_name = "OUT",
        help = "Output directory. Must not exist"
    )]
    pub out: String,

    #[arg(
        long,
        short,
        value_name = "CONFIG",
        help = "JSON file overriding the default sweep parameters"
    )]
    pub config: Option<String>,

    #[arg(
        long,
        short,
        value_name = "AXIS",
        help = "Axis to sweep (mu, sigma, total_votes, fraction_counted). Can be repeated, defaults to all"
    )]
    pub axis: Vec<String>,

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
