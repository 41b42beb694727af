//! Shared fixtures for the neural-core benchmarks

use neural_core::Tensor;

/// Deterministic `[rows, cols]` matrix with values in `[-1, 1)`
pub fn filled(rows: usize, cols: usize, seed: u64) -> Tensor {
    let mut state = seed;
    let data = (0..rows * cols)
        .map(|_| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            ((state >> 33) as f64 / (1u64 << 31) as f64) * 2.0 - 1.0
        })
        .collect();

    Tensor::new(vec![rows, cols], data).expect("rows * cols values")
}
