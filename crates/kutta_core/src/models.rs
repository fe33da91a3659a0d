use nalgebra::DVector;
use serde::{Deserialize, Serialize};

use crate::traits::DerivativeFunction;

/// Exponential decay `dy/dt = -k * y`, applied element-wise.
///
/// Each instance owns its rate, so models with different rates can be used side by side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExponentialDecay {
    pub rate: f64,
}

impl ExponentialDecay {
    pub const DEFAULT_RATE: f64 = 0.5;

    pub fn new(rate: f64) -> Self {
        Self { rate }
    }

    /// Closed-form solution `y0 * exp(-k * (t - t0))`.
    pub fn exact(&self, t0: f64, y0: f64, t: f64) -> f64 {
        y0 * (-self.rate * (t - t0)).exp()
    }
}

impl Default for ExponentialDecay {
    fn default() -> Self {
        Self::new(Self::DEFAULT_RATE)
    }
}

impl DerivativeFunction for ExponentialDecay {
    fn evaluate(&self, _t: f64, y: &DVector<f64>) -> DVector<f64> {
        y * -self.rate
    }
}

#[cfg(test)]
mod tests {
    use super::ExponentialDecay;
    use crate::traits::DerivativeFunction;
    use nalgebra::DVector;

    #[test]
    fn decay_derivative_scales_each_component() {
        let model = ExponentialDecay::new(2.0);
        let dy = model.evaluate(0.0, &DVector::from_vec(vec![1.0, -3.0]));
        assert_eq!(dy, DVector::from_vec(vec![-2.0, 6.0]));
    }

    #[test]
    fn models_with_different_rates_are_independent() {
        let slow = ExponentialDecay::new(0.1);
        let fast = ExponentialDecay::new(5.0);
        let y = DVector::from_element(1, 1.0);
        assert!((slow.evaluate(0.0, &y)[0] + 0.1).abs() < 1e-15);
        assert!((fast.evaluate(0.0, &y)[0] + 5.0).abs() < 1e-15);
        assert_eq!(ExponentialDecay::default().rate, 0.5);
    }

    #[test]
    fn exact_solution_honours_initial_time() {
        let model = ExponentialDecay::default();
        assert!((model.exact(2.0, 3.0, 2.0) - 3.0).abs() < 1e-15);
        assert!((model.exact(0.0, 1.0, 10.0) - (-5.0f64).exp()).abs() < 1e-15);
    }

    #[test]
    fn decay_model_loads_from_serialized_form() {
        let model: ExponentialDecay =
            serde_json::from_str(r#"{"rate":0.25}"#).expect("model should deserialize");
        assert_eq!(model, ExponentialDecay::new(0.25));
        let text = serde_json::to_string(&model).expect("model should serialize");
        assert_eq!(text, r#"{"rate":0.25}"#);
    }
}
