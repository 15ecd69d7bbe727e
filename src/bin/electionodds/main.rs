use anyhow::{bail, Result};
use clap::Parser;
use csv::WriterBuilder;
use electionodds_utils::posterior::winning_probabilities;
use electionodds_utils::prior::alpha_beta;
use electionodds_utils::sweep::linspace;
use env_logger::Env;
use log::info;
use std::io;

mod cli;

fn main() -> Result<()> {
    let args = cli::Cli::parse();
    // Set up logging level
    match args.verbosity {
        cli::LogLevel::silent => {
            env_logger::Builder::from_env(Env::default().default_filter_or("off")).init();
        }
        cli::LogLevel::normal => {
            env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
        }
        cli::LogLevel::verbose => {
            env_logger::Builder::from_env(Env::default().default_filter_or("debug")).init();
        }
    }

    let fractions_in_favor = scenarios(&args)?;
    let prior = alpha_beta(args.prior_mu, args.prior_sigma)?;
    info!(
        "Prior mu = {}, sigma = {}: α = {:.4}, β = {:.4}",
        args.prior_mu, args.prior_sigma, prior.alpha, prior.beta
    );
    info!(
        "{} of {} votes counted",
        args.total_votes * args.fraction_counted,
        args.total_votes
    );

    let probabilities = winning_probabilities(
        args.prior_mu,
        args.prior_sigma,
        args.total_votes,
        args.fraction_counted,
        &fractions_in_favor,
    )?;

    let mut writer = WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .from_writer(io::stdout());
    writer.write_record(["fraction_in_favor", "winning_probability"])?;
    for (fraction_in_favor, p) in fractions_in_favor.iter().zip(probabilities.iter()) {
        writer.write_record([fraction_in_favor.to_string(), p.to_string()])?;
    }
    writer.flush()?;
    info!("Estimated {} scenarios", fractions_in_favor.len());
    Ok(())
}

/// Explicit fractions and a grid can be combined; explicit values come first.
fn scenarios(args: &cli::Cli) -> Result<Vec<f64>> {
    let mut fractions = args.fractions_in_favor.clone();
    match (args.grid_start, args.grid_end) {
        (Some(start), Some(end)) => fractions.extend(linspace(start, end, args.grid_points)),
        (None, None) => {}
        _ => bail!("--grid-start and --grid-end must be given together"),
    }
    if fractions.is_empty() {
        bail!("No fractions in favor given. Pass values or --grid-start and --grid-end");
    }
    Ok(fractions)
}
