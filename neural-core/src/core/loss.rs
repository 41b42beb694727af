//! # Loss Functions
//!
//! Scalar loss between a single prediction and its target.
//!
//! | Type | Forward | Backward |
//! |------|---------|----------|
//! | [`SquaredErrorLoss`] | `½ (ŷ - y)²` | `ŷ - y` |

/// Scalar-valued loss
pub trait Loss {
    /// Error of `prediction` against `target`
    fn forward(&self, prediction: f64, target: f64) -> f64;

    /// ∂error/∂prediction
    fn backward(&self, prediction: f64, target: f64) -> f64;
}

/// Squared error with a ½ factor so the gradient is the plain residual
#[derive(Debug, Clone, Copy, Default)]
pub struct SquaredErrorLoss;

impl Loss for SquaredErrorLoss {
    fn forward(&self, prediction: f64, target: f64) -> f64 {
        let diff = prediction - target;
        0.5 * diff * diff
    }

    fn backward(&self, prediction: f64, target: f64) -> f64 {
        prediction - target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_squared_error() {
        let loss = SquaredErrorLoss;
        assert_eq!(loss.forward(3.0, 1.0), 2.0);
        assert_eq!(loss.forward(1.0, 1.0), 0.0);
        assert_eq!(loss.backward(3.0, 1.0), 2.0);
        assert_eq!(loss.backward(-1.0, 1.0), -2.0);
    }

    #[test]
    fn test_gradient_matches_finite_difference() {
        let loss = SquaredErrorLoss;
        let (p, t, h) = (0.7, -0.3, 1e-6);
        let numeric = (loss.forward(p + h, t) - loss.forward(p - h, t)) / (2.0 * h);
        assert!((numeric - loss.backward(p, t)).abs() < 1e-6);
    }
}
