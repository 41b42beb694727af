//! # ReLU Layer
//!
//! Rectified Linear Unit: `max(0, x)` element-wise.

use super::Layer;
use crate::core::tensor::Tensor;
use crate::error::{NeuralError, Result};

#[derive(Debug, Clone, Copy, Default)]
pub struct ReluLayer;

impl ReluLayer {
    pub fn new() -> Self {
        Self
    }
}

impl Layer for ReluLayer {
    fn forward(&self, input: &Tensor) -> Result<Tensor> {
        let data = input.data().iter().map(|&x| x.max(0.0)).collect();
        Tensor::new(input.shape().to_vec(), data)
    }

    /// Passes the gradient through where the original input was positive.
    fn backward(&mut self, orig_input: &Tensor, grad_output: &Tensor) -> Result<Tensor> {
        if orig_input.shape() != grad_output.shape() {
            return Err(NeuralError::DimensionMismatch {
                op: "relu_backward",
                lhs: orig_input.shape().to_vec(),
                rhs: grad_output.shape().to_vec(),
            });
        }

        let data = orig_input
            .data()
            .iter()
            .zip(grad_output.data())
            .map(|(&x, &g)| if x > 0.0 { g } else { 0.0 })
            .collect();
        Tensor::new(orig_input.shape().to_vec(), data)
    }

    fn name(&self) -> &'static str {
        "relu"
    }
}
