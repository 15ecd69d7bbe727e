use anyhow::{bail, Result};
use clap::Parser;
use electionodds_utils::config::SweepConfig;
use electionodds_utils::sweep::{run_sweeps, SweepAxis};
use env_logger::Env;
use log::info;
use std::path::Path;
use std::time::Instant;
use strum::IntoEnumIterator;

mod cli;
mod io;

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

    let config = match &args.config {
        Some(path) => SweepConfig::from_json_file(Path::new(path))?,
        None => SweepConfig::default(),
    };
    let axes = if args.axis.is_empty() {
        SweepAxis::iter().collect::<Vec<SweepAxis>>()
    } else {
        args.axis
            .iter()
            .map(|axis| axis.parse::<SweepAxis>())
            .collect::<Result<Vec<SweepAxis>>>()?
    };

    // Create output directory
    let out_path = Path::new(&args.out);
    if out_path.exists() {
        bail!("Output directory already exists: {}", args.out);
    }
    std::fs::create_dir(out_path)
        .map_err(|e| anyhow::anyhow!("Could not create output directory: {} ({})", args.out, e))?;
    info!("Created output directory");

    sweep(&config, &axes, out_path)?;
    info!("Finished sweeps");
    Ok(())
}

fn sweep(config: &SweepConfig, axes: &[SweepAxis], outdir: &Path) -> Result<()> {
    let timer = Instant::now();
    let charts = run_sweeps(config, axes);
    info!("Computed {} charts in {:?}", charts.len(), timer.elapsed());

    for path in io::write_chart_tables(outdir, &charts)? {
        info!("Wrote {}", path.display());
    }
    let manifest = outdir.join("charts.json");
    io::write_charts_json(&manifest, &charts)?;
    info!("Wrote {}", manifest.display());
    Ok(())
}
