//! # Tensor Math
//!
//! Matrix operations for manual backpropagation.
//!
//! ## Functions
//!
//! | Function | Result shape |
//! |----------|--------------|
//! | `multiply` | `[lhs.rows, rhs.cols]` |
//! | `transpose` | `[cols, rows]` |
//! | `add_col` | `[rows, cols + 1]` |
//! | `remove_col` | `[rows, cols - 1]` |
//! | `add_row` | `[rows + 1, cols]` |
//! | `remove_row` | `[rows - 1, cols]` |
//!
//! ## Implementation Notes
//!
//! Every function is pure: inputs are borrowed and a new read-only tensor is
//! returned. Only rank-2 tensors are supported. The column/row editing
//! functions exist so a bias can be expressed as an extra input column fixed
//! at `1.0` paired with an extra weight row.

use super::tensor::Tensor;
use crate::error::{NeuralError, Result};

/// `(rows, cols)` of a matrix operand
fn matrix_dims(t: &Tensor, op: &'static str) -> Result<(usize, usize)> {
    match *t.shape() {
        [rows, cols] => Ok((rows, cols)),
        _ => {
            tracing::error!(op, shape = ?t.shape(), "operation requires a rank-2 tensor");
            Err(NeuralError::UnsupportedRank { op, rank: t.rank() })
        }
    }
}

/// `(rows, cols)` of a tensor about to have a row or column edited
fn editable_dims(t: &Tensor, op: &'static str) -> Result<(usize, usize)> {
    match *t.shape() {
        [rows, cols] => Ok((rows, cols)),
        _ => Err(unsupported_shape(t, op)),
    }
}

fn unsupported_shape(t: &Tensor, op: &'static str) -> NeuralError {
    tracing::error!(op, shape = ?t.shape(), "unsupported shape");
    NeuralError::UnsupportedShape {
        op,
        shape: t.shape().to_vec(),
    }
}

/// Matrix product: C = A × B
///
/// `C[i,j] = Σ_k A[i,k] * B[k,j]`, summed with `k` ascending.
pub fn multiply(lhs: &Tensor, rhs: &Tensor) -> Result<Tensor> {
    let (m, n) = matrix_dims(lhs, "multiply")?;
    let (inner, p) = matrix_dims(rhs, "multiply")?;

    if n != inner {
        tracing::error!(
            lhs = ?lhs.shape(),
            rhs = ?rhs.shape(),
            "inner dimensions of matrices must match"
        );
        return Err(NeuralError::DimensionMismatch {
            op: "multiply",
            lhs: lhs.shape().to_vec(),
            rhs: rhs.shape().to_vec(),
        });
    }

    let a = lhs.data();
    let b = rhs.data();
    let mut out = vec![0.0; m * p];

    for i in 0..m {
        for j in 0..p {
            let mut sum = 0.0;
            for k in 0..n {
                sum += a[i * n + k] * b[k * p + j];
            }
            out[i * p + j] = sum;
        }
    }

    Tensor::new(vec![m, p], out)
}

/// Transpose: A^T
pub fn transpose(mat: &Tensor) -> Result<Tensor> {
    let (rows, cols) = matrix_dims(mat, "transpose")?;
    let src = mat.data();
    let mut out = vec![0.0; rows * cols];

    for i in 0..rows {
        for j in 0..cols {
            out[j * rows + i] = src[i * cols + j];
        }
    }

    Tensor::new(vec![cols, rows], out)
}

/// Append a column holding `value` to the right edge of every row
pub fn add_col(tensor: &Tensor, value: f64) -> Result<Tensor> {
    let (rows, cols) = editable_dims(tensor, "add_col")?;
    let src = tensor.data();
    let mut out = Vec::with_capacity(rows * (cols + 1));

    for r in 0..rows {
        out.extend_from_slice(&src[r * cols..(r + 1) * cols]);
        out.push(value);
    }

    Tensor::new(vec![rows, cols + 1], out)
}

/// Drop the last column of every row
pub fn remove_col(tensor: &Tensor) -> Result<Tensor> {
    let (rows, cols) = editable_dims(tensor, "remove_col")?;
    if cols == 0 {
        return Err(unsupported_shape(tensor, "remove_col"));
    }

    let src = tensor.data();
    let mut out = Vec::with_capacity(rows * (cols - 1));

    for r in 0..rows {
        out.extend_from_slice(&src[r * cols..(r + 1) * cols - 1]);
    }

    Tensor::new(vec![rows, cols - 1], out)
}

/// Append a row of `value` to the bottom
pub fn add_row(tensor: &Tensor, value: f64) -> Result<Tensor> {
    let (rows, cols) = editable_dims(tensor, "add_row")?;
    let mut out = Vec::with_capacity((rows + 1) * cols);
    out.extend_from_slice(tensor.data());
    out.resize((rows + 1) * cols, value);

    Tensor::new(vec![rows + 1, cols], out)
}

/// Drop the bottom row
pub fn remove_row(tensor: &Tensor) -> Result<Tensor> {
    let (rows, cols) = editable_dims(tensor, "remove_row")?;
    if rows == 0 {
        return Err(unsupported_shape(tensor, "remove_row"));
    }

    Tensor::new(vec![rows - 1, cols], tensor.data()[..(rows - 1) * cols].to_vec())
}
