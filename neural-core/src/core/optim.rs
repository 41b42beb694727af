//! # Optimization
//!
//! Gradient-descent helpers used by trainable layers.

use super::tensor::Tensor;
use crate::error::{NeuralError, Result};

/// SGD step in place: θ = θ - lr * ∇θ
///
/// `params` must be mutable and share the shape of `gradients`.
pub fn sgd_step(params: &mut Tensor, gradients: &Tensor, learning_rate: f64) -> Result<()> {
    if params.shape() != gradients.shape() {
        return Err(NeuralError::DimensionMismatch {
            op: "sgd_step",
            lhs: params.shape().to_vec(),
            rhs: gradients.shape().to_vec(),
        });
    }

    for (p, g) in params.data_mut()?.iter_mut().zip(gradients.data()) {
        *p -= learning_rate * g;
    }

    Ok(())
}

/// Element-wise mean of same-shaped tensors
///
/// Sums in slice order, then divides by the count. Shapes after the first are
/// not re-validated beyond their element count.
pub fn mean(tensors: &[Tensor]) -> Result<Tensor> {
    let first = tensors.first().ok_or(NeuralError::EmptyAccumulator)?;
    let mut sum = Tensor::zeros(first.shape().to_vec());

    {
        let acc = sum.data_mut()?;
        for t in tensors {
            if t.len() != acc.len() {
                return Err(NeuralError::DimensionMismatch {
                    op: "mean",
                    lhs: first.shape().to_vec(),
                    rhs: t.shape().to_vec(),
                });
            }
            for (a, v) in acc.iter_mut().zip(t.data()) {
                *a += v;
            }
        }

        let count = tensors.len() as f64;
        for a in acc.iter_mut() {
            *a /= count;
        }
    }

    Ok(sum.freeze())
}
