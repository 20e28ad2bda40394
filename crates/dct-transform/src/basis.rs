//! Orthonormal DCT-II basis matrix
//!
//! Row `i` of the N×N matrix **C** holds the i-th cosine basis vector:
//!
//! - row 0: `1/√N` in every column
//! - row i > 0, column j: `√(2/N) · cos((2j + 1)·i·π / 2N)`
//!
//! The rows are orthonormal, so `C · Cᵗ = I` and the transpose is the inverse.

use std::f64::consts::PI;

use dct_core::{DctError, DctResult};
use tracing::debug;

use crate::Block;

/// DCT basis matrix of a fixed size, with its transpose kept alongside
#[derive(Debug, Clone, PartialEq)]
pub struct BasisMatrix {
    matrix: Block,
    transpose: Block,
}

impl BasisMatrix {
    /// Build the N-point basis. `n` must be at least 1.
    pub fn new(n: usize) -> DctResult<Self> {
        if n == 0 {
            return Err(DctError::InvalidSize {
                size: n,
                min: 1,
                max: usize::MAX,
            });
        }

        let nf = n as f64;
        let dc = (1.0 / nf).sqrt();
        let ac = (2.0 / nf).sqrt();

        let matrix = Block::from_fn(n, |i, j| {
            if i == 0 {
                dc
            } else {
                ac * (((2 * j + 1) * i) as f64 * PI / (2.0 * nf)).cos()
            }
        });
        let transpose = matrix.transpose();

        debug!(n, "built DCT basis matrix");

        Ok(Self { matrix, transpose })
    }

    /// Transform size N
    pub fn size(&self) -> usize {
        self.matrix.size()
    }

    /// Entry of basis vector `i` at sample position `j`
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.matrix.get(i, j)
    }

    /// Basis vector `i`
    pub fn row(&self, i: usize) -> &[f64] {
        self.matrix.row(i)
    }

    /// The matrix **C**
    pub fn as_block(&self) -> &Block {
        &self.matrix
    }

    /// The matrix **Cᵗ**
    pub fn transpose(&self) -> &Block {
        &self.transpose
    }
}
