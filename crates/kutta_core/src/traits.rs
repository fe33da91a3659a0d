use nalgebra::DVector;

use crate::error::SolverError;

/// The right-hand side `f(t, y)` of a first-order system `dy/dt = f(t, y)`.
///
/// Implementations must be deterministic and return a vector with the same
/// dimension as `y`. Any `Fn(f64, &DVector<f64>) -> DVector<f64>` closure
/// qualifies.
pub trait DerivativeFunction {
    fn evaluate(&self, t: f64, y: &DVector<f64>) -> DVector<f64>;
}

impl<F> DerivativeFunction for F
where
    F: Fn(f64, &DVector<f64>) -> DVector<f64>,
{
    fn evaluate(&self, t: f64, y: &DVector<f64>) -> DVector<f64> {
        self(t, y)
    }
}

/// A trait for fixed-step methods that advance a state by one step.
pub trait Steppable {
    /// Returns the state after one step of size `h` from `(t, y)`.
    /// The input state is left untouched.
    fn step(
        &self,
        system: &impl DerivativeFunction,
        t: f64,
        y: &DVector<f64>,
        h: f64,
    ) -> Result<DVector<f64>, SolverError>;

    /// Global order of accuracy.
    fn order(&self) -> usize;

    /// Derivative evaluations per step.
    fn stages(&self) -> usize;
}
