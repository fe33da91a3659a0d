pub mod error;
pub mod models;
pub mod solvers;
pub mod trajectory;
/// The `kutta_core` crate provides the fixed-step integration engine behind the Kutta CLI.
/// Every solve is a pure computation over its inputs: no global state, no I/O, no logging.
///
/// Key components:
/// - **Traits**: `DerivativeFunction` (the ODE right-hand side), `Steppable` (single-step methods).
/// - **Solvers**: the classic RK4 stepper and the free function `rk4_step`.
/// - **Trajectory**: `solve`/`solve_with`, which drive a stepper across `[t0, tf]` in uniform steps.
/// - **Models**: reference derivative functions used to validate the engine.
pub mod traits;

pub use error::SolverError;
pub use models::ExponentialDecay;
pub use solvers::{rk4_step, Rk4};
pub use trajectory::{solve, solve_with, step_count, SolveOptions, Trajectory};
pub use traits::{DerivativeFunction, Steppable};
