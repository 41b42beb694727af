//! # Neural Network Layers
//!
//! The [`Layer`] capability and its implementations.
//!
//! | Layer | Parameters | Notes |
//! |-------|------------|-------|
//! | [`LinearLayer`] | weight matrix | optional bias via an augmented input column |
//! | [`ReluLayer`] | none | element-wise `max(x, 0)` |
//! | [`Sequential`] | those of its children | ordered composition |

mod linear;
mod relu;
mod sequential;

pub use linear::{LayerState, LinearLayer};
pub use relu::ReluLayer;
pub use sequential::Sequential;

use crate::core::tensor::Tensor;
use crate::error::Result;

/// Forward/backward component of a network
pub trait Layer: std::fmt::Debug {
    /// Output for `input`; never changes the layer
    fn forward(&self, input: &Tensor) -> Result<Tensor>;

    /// Gradient of the loss with respect to `orig_input`
    ///
    /// `orig_input` is the tensor originally given to [`Layer::forward`] and
    /// `grad_output` is ∂loss/∂output. The result has the shape of
    /// `orig_input`. Trainable layers record their parameter gradient here.
    fn backward(&mut self, orig_input: &Tensor, grad_output: &Tensor) -> Result<Tensor>;

    /// Apply pending parameter gradients. Layers without parameters do nothing.
    fn update_weights(&mut self, _learning_rate: f64) -> Result<()> {
        Ok(())
    }

    /// Short name used in logs
    fn name(&self) -> &'static str;
}
