//! # Core Primitives
//!
//! - Tensor container
//! - Tensor math (multiply, transpose, bias row/column editing)
//! - Loss functions
//! - Optimization

pub mod tensor;
pub mod math;
pub mod loss;
pub mod optim;

pub use tensor::{Access, Tensor};
pub use loss::{Loss, SquaredErrorLoss};

/// Prelude module for core exports
pub mod prelude {
    pub use crate::core::tensor::{Access, Tensor};
    pub use crate::core::math;
    pub use crate::core::loss::{Loss, SquaredErrorLoss};
}
