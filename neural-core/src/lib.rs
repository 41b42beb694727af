//! # neural-core - Dense Layers with Manual Backpropagation
//!
//! A small neural network toolkit without an autograd graph: every layer
//! implements its own forward and backward pass, and gradients flow through a
//! hand-written training loop.
//!
//! ## Modules
//!
//! - **core**: 2-D tensors, tensor math, loss functions, gradient descent
//! - **layers**: the `Layer` capability, linear and ReLU layers, sequential models
//! - **train**: TOML training configuration and the epoch loop
//!
//! ## Example
//!
//! ```
//! use neural_core::prelude::*;
//!
//! let weights = Tensor::from_rows(&[[2.0]]).unwrap();
//! let mut layer = LinearLayer::new(&weights, false).unwrap();
//!
//! let input = Tensor::from_rows(&[[3.0]]).unwrap();
//! assert_eq!(layer.forward(&input).unwrap().data(), &[6.0]);
//!
//! let grad = layer.backward(&input, &Tensor::from_rows(&[[1.0]]).unwrap()).unwrap();
//! assert_eq!(grad.data(), &[2.0]);
//! layer.update_weights(0.1).unwrap();
//! ```

pub mod error;
pub use error::{NeuralError, Result};

pub mod core;
pub use crate::core::{Access, Loss, SquaredErrorLoss, Tensor};

pub mod layers;
pub use layers::{Layer, LayerState, LinearLayer, ReluLayer, Sequential};

pub mod train;
pub use train::{Sample, Trainer, TrainingConfig, TrainingReport};

/// Prelude module with common re-exports
pub mod prelude {
    pub use crate::error::{NeuralError, Result};
    pub use crate::core::prelude::*;
    pub use crate::layers::{Layer, LayerState, LinearLayer, ReluLayer, Sequential};
    pub use crate::train::{
        LayerConfig, Sample, SampleConfig, Trainer, TrainingConfig, TrainingReport,
    };
}
