//! # Linear Layer
//!
//! Affine transform `y = x W`, with the bias folded into `W` as an extra row
//! and matched by a constant `1.0` column appended to the input.
//!
//! ## Training life cycle
//!
//! ```text
//!   Idle ──backward──▶ Accumulating ──backward──▶ Accumulating
//!    ▲                                   │
//!    └──────────── update_weights ───────┘
//! ```
//!
//! `forward` is legal in either state and never changes the layer.

use std::borrow::Cow;

use super::Layer;
use crate::core::math::{add_col, add_row, multiply, remove_col, transpose};
use crate::core::optim::{mean, sgd_step};
use crate::core::tensor::Tensor;
use crate::error::{NeuralError, Result};

/// Value of the synthetic bias input, and the initial bias weight
const BIAS_INPUT: f64 = 1.0;

/// Whether a layer holds gradients not yet applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerState {
    Idle,
    Accumulating,
}

/// Dense layer trained by averaged gradient descent
#[derive(Debug, Clone)]
pub struct LinearLayer {
    /// `[in_features (+1 with bias), out_features]`, always mutable
    weights: Tensor,
    has_bias: bool,
    /// Gradients recorded since the last update, each shaped like `weights`
    weight_grads: Vec<Tensor>,
}

impl LinearLayer {
    /// Build a layer from `[in_features, out_features]` weights
    ///
    /// The layer keeps its own copy. With `has_bias`, a row of `1.0` is
    /// appended; it is learned like any other weight from then on.
    pub fn new(weights: &Tensor, has_bias: bool) -> Result<Self> {
        require_matrix(weights, "linear_layer")?;

        let weights = if has_bias {
            add_row(weights, BIAS_INPUT)?.to_mutable()
        } else {
            weights.to_mutable()
        };

        Ok(Self {
            weights,
            has_bias,
            weight_grads: Vec::new(),
        })
    }

    /// Current weights, including the bias row when present
    pub fn weights(&self) -> &Tensor {
        &self.weights
    }

    pub fn has_bias(&self) -> bool {
        self.has_bias
    }

    pub fn in_features(&self) -> usize {
        self.weights.shape()[0] - usize::from(self.has_bias)
    }

    pub fn out_features(&self) -> usize {
        self.weights.shape()[1]
    }

    /// Number of gradients recorded since the last update
    pub fn pending_gradients(&self) -> usize {
        self.weight_grads.len()
    }

    pub fn state(&self) -> LayerState {
        if self.weight_grads.is_empty() {
            LayerState::Idle
        } else {
            LayerState::Accumulating
        }
    }

    /// Element-wise mean of the recorded weight gradients
    pub fn calc_avg_weight_grad(&self) -> Result<Tensor> {
        mean(&self.weight_grads)
    }

    /// `input` with the bias column appended when this layer has a bias
    fn with_bias_column<'a>(&self, input: &'a Tensor) -> Result<Cow<'a, Tensor>> {
        if self.has_bias {
            Ok(Cow::Owned(add_col(input, BIAS_INPUT)?))
        } else {
            Ok(Cow::Borrowed(input))
        }
    }

    /// `grad` with the bias column's gradient dropped when this layer has a bias
    fn without_bias_column(&self, grad: Tensor) -> Result<Tensor> {
        if self.has_bias {
            remove_col(&grad)
        } else {
            Ok(grad)
        }
    }
}

/// Inputs and weights are `[rows, cols]` matrices
fn require_matrix(t: &Tensor, op: &'static str) -> Result<()> {
    if t.rank() != 2 {
        tracing::error!(op, shape = ?t.shape(), "linear layer requires a rank-2 tensor");
        return Err(NeuralError::UnsupportedRank { op, rank: t.rank() });
    }
    Ok(())
}

impl Layer for LinearLayer {
    fn forward(&self, input: &Tensor) -> Result<Tensor> {
        require_matrix(input, "linear_forward")?;
        let input = self.with_bias_column(input)?;
        multiply(&input, &self.weights)
    }

    fn backward(&mut self, orig_input: &Tensor, grad_output: &Tensor) -> Result<Tensor> {
        require_matrix(orig_input, "linear_backward")?;
        let input = self.with_bias_column(orig_input)?;

        let weight_grad = multiply(&transpose(&input)?, grad_output)?;
        // The weights are the local Jacobian of output w.r.t. input.
        let input_grad = multiply(grad_output, &transpose(&self.weights)?)?;
        let input_grad = self.without_bias_column(input_grad)?;

        self.weight_grads.push(weight_grad);
        Ok(input_grad)
    }

    /// Fails with [`NeuralError::EmptyAccumulator`] when nothing was recorded,
    /// leaving the weights untouched.
    fn update_weights(&mut self, learning_rate: f64) -> Result<()> {
        let avg = self.calc_avg_weight_grad()?;
        sgd_step(&mut self.weights, &avg, learning_rate)?;

        tracing::debug!(
            gradients = self.weight_grads.len(),
            learning_rate,
            shape = ?self.weights.shape(),
            "linear layer weights updated"
        );
        self.weight_grads.clear();
        Ok(())
    }

    fn name(&self) -> &'static str {
        "linear"
    }
}
