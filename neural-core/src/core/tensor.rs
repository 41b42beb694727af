//! # Tensor
//!
//! Dense tensor with an explicit shape and a flat row-major value buffer.
//!
//! ## Access
//!
//! | Flavor | Created by | Writable |
//! |--------|------------|----------|
//! | read-only | [`Tensor::new`], [`Tensor::from_rows`], [`Tensor::freeze`] | no |
//! | mutable | [`Tensor::zeros`], [`Tensor::to_mutable`] | yes |
//!
//! Writes through a read-only tensor fail with [`NeuralError::ImmutableTensor`].
//! A mutable tensor is only ever produced as a fresh copy, so whoever holds it
//! owns it exclusively.

use std::fmt;

use crate::error::{NeuralError, Result};

/// Whether a tensor accepts in-place writes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    ReadOnly,
    Mutable,
}

/// Dense tensor of `f64` values
///
/// Invariant: `data.len() == shape.iter().product()`.
#[derive(Debug, Clone)]
pub struct Tensor {
    shape: Vec<usize>,
    data: Vec<f64>,
    access: Access,
}

impl Tensor {
    /// Create a read-only tensor from a shape and row-major data
    pub fn new(shape: Vec<usize>, data: Vec<f64>) -> Result<Self> {
        let expected: usize = shape.iter().product();
        if data.len() != expected {
            tracing::error!(
                ?shape,
                expected,
                actual = data.len(),
                "tensor data does not fit shape"
            );
            return Err(NeuralError::ShapeMismatch {
                shape,
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            shape,
            data,
            access: Access::ReadOnly,
        })
    }

    /// Create a read-only matrix from a slice of rows
    ///
    /// All rows must have the same length.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let cols = rows.first().map_or(0, |r| r.as_ref().len());
        let data: Vec<f64> = rows.iter().flat_map(|r| r.as_ref().iter().copied()).collect();

        if rows.iter().any(|r| r.as_ref().len() != cols) {
            tracing::error!(rows = rows.len(), cols, "rows have different lengths");
            return Err(NeuralError::ShapeMismatch {
                shape: vec![rows.len(), cols],
                expected: rows.len() * cols,
                actual: data.len(),
            });
        }

        Self::new(vec![rows.len(), cols], data)
    }

    /// Create a mutable tensor filled with `0.0`
    pub fn zeros(shape: Vec<usize>) -> Self {
        let len = shape.iter().product();
        Self {
            shape,
            data: vec![0.0; len],
            access: Access::Mutable,
        }
    }

    /// Independent mutable copy with the same shape and values
    pub fn to_mutable(&self) -> Self {
        Self {
            shape: self.shape.clone(),
            data: self.data.clone(),
            access: Access::Mutable,
        }
    }

    /// Give up write access
    pub fn freeze(mut self) -> Self {
        self.access = Access::ReadOnly;
        self
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Values in row-major order
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Mutable view of the values; fails on a read-only tensor
    pub fn data_mut(&mut self) -> Result<&mut [f64]> {
        match self.access {
            Access::Mutable => Ok(&mut self.data),
            Access::ReadOnly => Err(read_only_write()),
        }
    }

    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn access(&self) -> Access {
        self.access
    }

    pub fn is_mutable(&self) -> bool {
        self.access == Access::Mutable
    }

    /// Read the element at `indices`
    pub fn at(&self, indices: &[usize]) -> Result<f64> {
        let offset = self.offset(indices)?;
        Ok(self.data[offset])
    }

    /// Write the element at `indices`
    pub fn set_at(&mut self, indices: &[usize], value: f64) -> Result<()> {
        if self.access == Access::ReadOnly {
            return Err(read_only_write());
        }
        let offset = self.offset(indices)?;
        self.data[offset] = value;
        Ok(())
    }

    /// Row-major offset of `indices`
    fn offset(&self, indices: &[usize]) -> Result<usize> {
        let in_bounds = indices.len() == self.shape.len()
            && indices.iter().zip(&self.shape).all(|(&i, &dim)| i < dim);

        if !in_bounds {
            tracing::error!(index = ?indices, shape = ?self.shape, "index out of bounds");
            return Err(NeuralError::IndexOutOfBounds {
                index: indices.to_vec(),
                shape: self.shape.clone(),
            });
        }

        Ok(indices
            .iter()
            .zip(&self.shape)
            .fold(0, |acc, (&i, &dim)| acc * dim + i))
    }
}

fn read_only_write() -> NeuralError {
    tracing::error!("write to a read-only tensor");
    NeuralError::ImmutableTensor
}

/// Equal when shape and values match; access flavor is ignored.
impl PartialEq for Tensor {
    fn eq(&self, other: &Self) -> bool {
        self.shape == other.shape && self.data == other.data
    }
}

impl fmt::Display for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rank() != 2 {
            return write!(f, "Tensor{:?}{:?}", self.shape, self.data);
        }

        let cols = self.shape[1];
        write!(f, "[")?;
        for r in 0..self.shape[0] {
            if r > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:?}", &self.data[r * cols..(r + 1) * cols])?;
        }
        write!(f, "]")
    }
}
