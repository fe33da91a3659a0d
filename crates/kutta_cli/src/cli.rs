use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::{read_toml, ConfigError, RunConfig};
use crate::sweep::SweepParam;

#[derive(Parser, Debug)]
#[command(name = "kutta", author, version, about = "Fixed-step RK4 solver for dy/dt = -k*y", long_about = None)]
pub struct Cli {
    /// log level filter: off, error, warn, info, debug or trace
    #[arg(short, long, global = true, default_value = "warn")]
    pub verbosity: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Solve the decay problem once
    Solve {
        #[command(flatten)]
        run: RunArgs,

        /// save results to a CSV file instead of printing them
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Run a parameter sweep over a chosen parameter
    Sweep {
        #[arg(long, value_enum)]
        param: SweepParam,

        /// comma-separated values, e.g. '0.5,1.0,2.0'
        #[arg(long, allow_hyphen_values = true)]
        values: String,

        #[arg(short = 'o', long)]
        output_dir: PathBuf,

        #[command(flatten)]
        run: RunArgs,
    },
}

/// Run parameters. Flags override values loaded from `--config`.
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// path to a toml file with run parameters
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// initial time
    #[arg(long, allow_hyphen_values = true)]
    pub t0: Option<f64>,

    /// final time
    #[arg(long, allow_hyphen_values = true)]
    pub tf: Option<f64>,

    /// initial condition
    #[arg(long, allow_hyphen_values = true)]
    pub y0: Option<f64>,

    /// number of steps
    #[arg(long, allow_hyphen_values = true)]
    pub steps: Option<i64>,

    /// decay rate k
    #[arg(long, allow_hyphen_values = true)]
    pub rate: Option<f64>,
}

impl RunArgs {
    pub fn resolve(&self) -> Result<RunConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => read_toml(path)?,
            None => RunConfig::default(),
        };
        if let Some(t0) = self.t0 {
            config.t0 = t0;
        }
        if let Some(tf) = self.tf {
            config.tf = tf;
        }
        if let Some(y0) = self.y0 {
            config.y0 = y0;
        }
        if let Some(steps) = self.steps {
            config.steps = steps;
        }
        if let Some(rate) = self.rate {
            config.rate = rate;
        }
        Ok(config)
    }
}
