use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use clap::ValueEnum;
use kutta_core::Trajectory;
use log::info;
use rayon::prelude::*;

use crate::config::RunConfig;
use crate::output::write_csv_file;

/// The run parameter varied across a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SweepParam {
    T0,
    Tf,
    Y0,
    Steps,
    Rate,
}

impl SweepParam {
    pub fn name(self) -> &'static str {
        match self {
            SweepParam::T0 => "t0",
            SweepParam::Tf => "tf",
            SweepParam::Y0 => "y0",
            SweepParam::Steps => "steps",
            SweepParam::Rate => "rate",
        }
    }

    /// Copy of `base` with this parameter replaced by `value`.
    pub fn apply(self, base: &RunConfig, value: f64) -> Result<RunConfig> {
        let mut config = *base;
        match self {
            SweepParam::T0 => config.t0 = value,
            SweepParam::Tf => config.tf = value,
            SweepParam::Y0 => config.y0 = value,
            SweepParam::Rate => config.rate = value,
            SweepParam::Steps => {
                if value.fract() != 0.0 || !value.is_finite() {
                    bail!("Step counts must be whole numbers, got {value}.");
                }
                config.steps = value as i64;
            }
        }
        Ok(config)
    }

    pub fn file_name(self, value: f64) -> String {
        format!("{}_{:.3}.csv", self.name(), value)
    }
}

impl fmt::Display for SweepParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone)]
pub struct SweepResult {
    pub value: f64,
    pub trajectory: Trajectory,
}

/// Parses a comma-separated list such as `"0.5, 1.0,2.0"`.
pub fn parse_values(raw: &str) -> Result<Vec<f64>> {
    raw.split(',')
        .map(|entry| {
            let entry = entry.trim();
            entry
                .parse::<f64>()
                .map_err(|_| anyhow!("Invalid sweep value '{entry}'."))
        })
        .collect()
}

/// Fails if two values would be written to the same `{param}_{value:.3}.csv` file.
pub fn check_file_names(param: SweepParam, values: &[f64]) -> Result<()> {
    let mut seen: HashMap<String, f64> = HashMap::with_capacity(values.len());
    for &value in values {
        let name = param.file_name(value);
        if let Some(previous) = seen.insert(name.clone(), value) {
            bail!(
                "Sweep values {previous} and {value} both map to output file {name}; \
                 use values that differ at three decimals."
            );
        }
    }
    Ok(())
}

/// Runs one independent solve per value. Results keep the order of `values`.
pub fn run_sweep(base: &RunConfig, param: SweepParam, values: &[f64]) -> Result<Vec<SweepResult>> {
    check_file_names(param, values)?;
    values
        .par_iter()
        .map(|&value| -> Result<SweepResult> {
            let config = param.apply(base, value)?;
            info!("Running with {param}={value}");
            let trajectory = config
                .solve()
                .with_context(|| format!("Solve failed for {param}={value}"))?;
            Ok(SweepResult { value, trajectory })
        })
        .collect()
}

/// Writes each result to `dir/{param}_{value:.3}.csv`, creating `dir` if needed.
pub fn write_sweep(results: &[SweepResult], param: SweepParam, dir: &Path) -> Result<Vec<PathBuf>> {
    let values: Vec<f64> = results.iter().map(|result| result.value).collect();
    check_file_names(param, &values)?;
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
    results
        .iter()
        .map(|result| -> Result<PathBuf> {
            let path = dir.join(param.file_name(result.value));
            write_csv_file(&result.trajectory, &path)?;
            Ok(path)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{check_file_names, parse_values, run_sweep, write_sweep, SweepParam, SweepResult};
    use crate::config::RunConfig;

    fn assert_err_contains<T: std::fmt::Debug>(result: anyhow::Result<T>, needle: &str) {
        let err = result.expect_err("expected error");
        let message = format!("{err:#}");
        assert!(
            message.contains(needle),
            "expected error to contain \"{needle}\", got \"{message}\""
        );
    }

    #[test]
    fn parse_values_trims_entries() {
        let values = parse_values(" 0.5, 1.0 ,2 ,-3e-1").expect("values should parse");
        assert_eq!(values, vec![0.5, 1.0, 2.0, -0.3]);
    }

    #[test]
    fn parse_values_names_bad_entry() {
        assert_err_contains(parse_values("1.0,abc,2.0"), "'abc'");
        assert_err_contains(parse_values("1.0,,2.0"), "Invalid sweep value");
    }

    #[test]
    fn apply_replaces_only_the_swept_parameter() {
        let base = RunConfig::default();
        let config = SweepParam::Tf.apply(&base, 4.0).expect("apply should succeed");
        assert_eq!(
            config,
            RunConfig {
                tf: 4.0,
                ..base
            }
        );
        let config = SweepParam::Steps.apply(&base, 20.0).expect("apply should succeed");
        assert_eq!(config.steps, 20);
        assert_err_contains(SweepParam::Steps.apply(&base, 2.5), "whole numbers");
    }

    #[test]
    fn file_names_use_three_decimals() {
        assert_eq!(SweepParam::Y0.file_name(0.5), "y0_0.500.csv");
        assert_eq!(SweepParam::Tf.file_name(10.0), "tf_10.000.csv");
    }

    #[test]
    fn sweep_results_follow_input_order() {
        let base = RunConfig::default();
        let values = [2.0, 0.5, 1.0, 4.0];
        let results = run_sweep(&base, SweepParam::Y0, &values).expect("sweep should run");
        assert_eq!(results.len(), values.len());
        for (result, &y0) in results.iter().zip(values.iter()) {
            assert_eq!(result.value, y0);
            let (_, first) = result.trajectory.first().expect("trajectory has samples");
            assert_eq!(first[0], y0);
            let (_, last) = result.trajectory.last().expect("trajectory has samples");
            assert!((last[0] - y0 * (-5.0f64).exp()).abs() < 1e-4 * y0);
        }
    }

    #[test]
    fn sweep_propagates_solver_failures() {
        let base = RunConfig::default();
        assert_err_contains(
            run_sweep(&base, SweepParam::Steps, &[10.0, 0.0]),
            "steps=0",
        );
    }

    #[test]
    fn write_sweep_creates_one_file_per_value() {
        let dir = std::env::temp_dir().join(format!("kutta-sweep-{}", std::process::id()));
        let base = RunConfig::default();
        let results = run_sweep(&base, SweepParam::Rate, &[0.25, 0.5]).expect("sweep should run");
        let paths = write_sweep(&results, SweepParam::Rate, &dir).expect("files should write");
        assert_eq!(paths.len(), 2);
        assert!(dir.join("rate_0.250.csv").exists());
        assert!(dir.join("rate_0.500.csv").exists());
        let contents = std::fs::read_to_string(&paths[0]).expect("file should read");
        assert_eq!(contents.lines().count(), 102);
        std::fs::remove_dir_all(&dir).expect("cleanup should succeed");
    }

    #[test]
    fn values_sharing_a_file_name_are_rejected_before_solving() {
        assert_err_contains(
            check_file_names(SweepParam::Y0, &[0.5001, 0.5004]),
            "0.5001 and 0.5004",
        );
        assert!(check_file_names(SweepParam::Y0, &[0.5, 0.501]).is_ok());
        assert_err_contains(
            run_sweep(&RunConfig::default(), SweepParam::Y0, &[1.0, 0.5001, 0.5004]),
            "y0_0.500.csv",
        );
    }

    #[test]
    fn write_sweep_refuses_to_overwrite_results() {
        let dir = std::env::temp_dir().join(format!("kutta-sweep-clash-{}", std::process::id()));
        let trajectory = RunConfig::default().solve().expect("should solve");
        let results = vec![
            SweepResult {
                value: 0.2501,
                trajectory: trajectory.clone(),
            },
            SweepResult {
                value: 0.2504,
                trajectory,
            },
        ];
        assert_err_contains(write_sweep(&results, SweepParam::Rate, &dir), "rate_0.250.csv");
        assert!(!dir.exists());
    }
}
