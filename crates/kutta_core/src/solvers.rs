use nalgebra::DVector;

use crate::error::SolverError;
use crate::traits::{DerivativeFunction, Steppable};

/// Classic Runge-Kutta 4th Order Solver
#[derive(Debug, Clone, Copy, Default)]
pub struct Rk4;

impl Steppable for Rk4 {
    fn step(
        &self,
        system: &impl DerivativeFunction,
        t: f64,
        y: &DVector<f64>,
        h: f64,
    ) -> Result<DVector<f64>, SolverError> {
        rk4_step(system, t, y, h)
    }

    fn order(&self) -> usize {
        4
    }

    fn stages(&self) -> usize {
        4
    }
}

/// Advances `y` from `t` by one RK4 step of size `h` and returns the new state.
///
/// Every stage is checked against the dimension of `y` before it is used.
pub fn rk4_step(
    system: &impl DerivativeFunction,
    t: f64,
    y: &DVector<f64>,
    h: f64,
) -> Result<DVector<f64>, SolverError> {
    let dim = y.len();
    let half_h = h * 0.5;

    // k1 = f(t, y)
    let k1 = checked(dim, system.evaluate(t, y))?;

    // k2 = f(t + h/2, y + h*k1/2)
    let k2 = checked(dim, system.evaluate(t + half_h, &(y + &k1 * half_h)))?;

    // k3 = f(t + h/2, y + h*k2/2)
    let k3 = checked(dim, system.evaluate(t + half_h, &(y + &k2 * half_h)))?;

    // k4 = f(t + h, y + h*k3)
    let k4 = checked(dim, system.evaluate(t + h, &(y + &k3 * h)))?;

    // y_next = y + h/6 * (k1 + 2k2 + 2k3 + k4)
    Ok(y + (k1 + k2 * 2.0 + k3 * 2.0 + k4) * (h / 6.0))
}

fn checked(expected: usize, k: DVector<f64>) -> Result<DVector<f64>, SolverError> {
    if k.len() != expected {
        return Err(SolverError::DimensionMismatch {
            expected,
            found: k.len(),
        });
    }
    Ok(k)
}
