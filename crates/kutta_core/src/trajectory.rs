use nalgebra::DVector;
use serde::Serialize;

use crate::error::SolverError;
use crate::solvers::Rk4;
use crate::traits::{DerivativeFunction, Steppable};

/// Uniformly sampled solution of one solve: `n_steps + 1` pairs `(t_i, y_i)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trajectory {
    times: Vec<f64>,
    states: Vec<DVector<f64>>,
    step_size: f64,
    dimension: usize,
}

impl Trajectory {
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Always false for a trajectory returned by `solve`; the seed sample is always present.
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn states(&self) -> &[DVector<f64>] {
        &self.states
    }

    pub fn step_size(&self) -> f64 {
        self.step_size
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn sample(&self, index: usize) -> Option<(f64, &DVector<f64>)> {
        Some((*self.times.get(index)?, self.states.get(index)?))
    }

    pub fn first(&self) -> Option<(f64, &DVector<f64>)> {
        self.sample(0)
    }

    pub fn last(&self) -> Option<(f64, &DVector<f64>)> {
        self.sample(self.len().checked_sub(1)?)
    }

    pub fn iter(&self) -> impl Iterator<Item = (f64, &DVector<f64>)> + '_ {
        self.times.iter().copied().zip(self.states.iter())
    }

    /// The series of state variable `index` across all samples.
    pub fn component(&self, index: usize) -> Option<Vec<f64>> {
        if index >= self.dimension {
            return None;
        }
        Some(self.states.iter().map(|y| y[index]).collect())
    }

    pub fn into_parts(self) -> (Vec<f64>, Vec<DVector<f64>>) {
        (self.times, self.states)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolveOptions {
    /// Fail with `NonFiniteResult` as soon as a step produces NaN or infinity.
    pub check_finite: bool,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self { check_finite: true }
    }
}

/// Converts a signed step count into the engine's `u32`, rejecting zero, negative,
/// and out-of-range values.
pub fn step_count(raw: i64) -> Result<u32, SolverError> {
    match u32::try_from(raw) {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(SolverError::InvalidStepCount(raw)),
    }
}

/// Integrates `system` from `(t0, y0)` to `tf` in `n_steps` uniform RK4 steps.
pub fn solve(
    system: &impl DerivativeFunction,
    t0: f64,
    tf: f64,
    y0: DVector<f64>,
    n_steps: u32,
) -> Result<Trajectory, SolverError> {
    solve_with(system, t0, tf, y0, n_steps, SolveOptions::default())
}

pub fn solve_with(
    system: &impl DerivativeFunction,
    t0: f64,
    tf: f64,
    y0: DVector<f64>,
    n_steps: u32,
    options: SolveOptions,
) -> Result<Trajectory, SolverError> {
    integrate(&Rk4, system, t0, tf, y0, n_steps, options)
}

fn integrate(
    stepper: &impl Steppable,
    system: &impl DerivativeFunction,
    t0: f64,
    tf: f64,
    y0: DVector<f64>,
    n_steps: u32,
    options: SolveOptions,
) -> Result<Trajectory, SolverError> {
    if n_steps == 0 {
        return Err(SolverError::InvalidStepCount(0));
    }
    if y0.is_empty() {
        return Err(SolverError::EmptyState);
    }

    let h = (tf - t0) / f64::from(n_steps);
    if !h.is_finite() {
        return Err(SolverError::NonFiniteInterval { t0, tf });
    }

    let dimension = y0.len();
    let samples = n_steps as usize + 1;
    let mut times = Vec::with_capacity(samples);
    let mut states = Vec::with_capacity(samples);
    times.push(t0);
    states.push(y0);

    for step in 1..samples {
        let t_prev = times[step - 1];
        let next = stepper.step(system, t_prev, &states[step - 1], h)?;
        let t_next = t_prev + h;

        if options.check_finite && next.iter().any(|v| !v.is_finite()) {
            return Err(SolverError::NonFiniteResult { step, time: t_next });
        }

        times.push(t_next);
        states.push(next);
    }

    Ok(Trajectory {
        times,
        states,
        step_size: h,
        dimension,
    })
}
