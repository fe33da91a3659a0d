use std::path::Path;

use kutta_core::{solve, step_count, ExponentialDecay, SolverError, Trajectory};
use nalgebra::DVector;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not read config file {path}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not parse config file {path}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// Parameters of one solve of `dy/dt = -rate * y`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    pub t0: f64,
    pub tf: f64,
    pub y0: f64,
    pub steps: i64,
    pub rate: f64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            t0: 0.0,
            tf: 10.0,
            y0: 1.0,
            steps: 100,
            rate: ExponentialDecay::DEFAULT_RATE,
        }
    }
}

impl RunConfig {
    pub fn model(&self) -> ExponentialDecay {
        ExponentialDecay::new(self.rate)
    }

    pub fn solve(&self) -> Result<Trajectory, SolverError> {
        let n_steps = step_count(self.steps)?;
        solve(
            &self.model(),
            self.t0,
            self.tf,
            DVector::from_element(1, self.y0),
            n_steps,
        )
    }
}

pub fn read_toml(path: &Path) -> Result<RunConfig, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    parse_toml(&contents, path)
}

fn parse_toml(contents: &str, path: &Path) -> Result<RunConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    })
}
