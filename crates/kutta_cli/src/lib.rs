//! Command-line driver for `kutta_core`: single solves, CSV output, and parallel parameter sweeps.

pub mod cli;
pub mod config;
pub mod output;
pub mod sweep;

use std::io::Write;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use log::{debug, info, LevelFilter};

use cli::{Cli, Command};
use output::{write_csv_file, write_table};
use sweep::{parse_values, run_sweep, write_sweep};

/// Parses a `--verbosity` value such as `warn` or `debug`.
pub fn log_level(raw: &str) -> Result<LevelFilter> {
    LevelFilter::from_str(raw).map_err(|e| anyhow!("Invalid verbosity '{raw}': {e}"))
}

pub fn run(cli: Cli, out: &mut impl Write) -> Result<()> {
    match cli.command {
        Command::Solve { run, output } => {
            let config = run.resolve()?;
            debug!("Resolved configuration: {config:?}");
            let trajectory = config.solve().context("Solve failed")?;
            if let Some((t, y)) = trajectory.last() {
                info!(
                    "Solved ODE: {} points computed, y({t}) = {}",
                    trajectory.len(),
                    y[0]
                );
            }
            match output {
                Some(path) => {
                    write_csv_file(&trajectory, &path)?;
                    writeln!(out, "Results saved to {}", path.display())?;
                }
                None => write_table(&trajectory, out)?,
            }
        }
        Command::Sweep {
            param,
            values,
            output_dir,
            run,
        } => {
            let base = run.resolve()?;
            debug!("Resolved base configuration: {base:?}");
            let values = parse_values(&values)?;
            let results = run_sweep(&base, param, &values)?;
            let paths = write_sweep(&results, param, &output_dir)?;
            writeln!(
                out,
                "Saved {} results to {}",
                paths.len(),
                output_dir.display()
            )?;
        }
    }
    Ok(())
}
