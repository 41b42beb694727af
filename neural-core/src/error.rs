//! Error types for neural-core

use thiserror::Error;

/// Result type for neural-core operations
pub type Result<T> = std::result::Result<T, NeuralError>;

/// neural-core error types
///
/// Every variant is fatal at the point of detection: the failing operation
/// produces no partial result.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NeuralError {
    #[error("Shape mismatch: shape {shape:?} holds {expected} values, got {actual}")]
    ShapeMismatch {
        shape: Vec<usize>,
        expected: usize,
        actual: usize,
    },

    #[error("Index out of bounds: {index:?} for shape {shape:?}")]
    IndexOutOfBounds { index: Vec<usize>, shape: Vec<usize> },

    #[error("Cannot write to a read-only tensor")]
    ImmutableTensor,

    #[error("Dimension mismatch in {op}: {lhs:?} x {rhs:?}")]
    DimensionMismatch {
        op: &'static str,
        lhs: Vec<usize>,
        rhs: Vec<usize>,
    },

    #[error("Unsupported rank in {op}: expected 2, got {rank}")]
    UnsupportedRank { op: &'static str, rank: usize },

    #[error("Unsupported shape in {op}: {shape:?}")]
    UnsupportedShape { op: &'static str, shape: Vec<usize> },

    #[error("No accumulated gradients to average")]
    EmptyAccumulator,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<toml::de::Error> for NeuralError {
    fn from(err: toml::de::Error) -> Self {
        NeuralError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for NeuralError {
    fn from(err: toml::ser::Error) -> Self {
        NeuralError::Config(err.to_string())
    }
}
