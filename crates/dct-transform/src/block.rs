//! Square N×N blocks of real values
//!
//! Used for basis matrices, pixel blocks and coefficient blocks alike.
//! Storage is row-major: `data[row * n + col]`.

use dct_core::{DctError, DctResult};

/// N×N matrix of `f64`
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    n: usize,
    data: Vec<f64>,
}

impl Block {
    /// All-zero block
    pub fn zeros(n: usize) -> Self {
        Self {
            n,
            data: vec![0.0; n * n],
        }
    }

    /// Wrap a row-major buffer of `n * n` values
    pub fn from_vec(n: usize, data: Vec<f64>) -> DctResult<Self> {
        if data.len() != n * n {
            return Err(DctError::BufferSize {
                expected: n * n,
                actual: data.len(),
            });
        }
        Ok(Self { n, data })
    }

    /// Build a block by evaluating `f(row, col)` for every cell
    pub fn from_fn<F>(n: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> f64,
    {
        let mut data = Vec::with_capacity(n * n);
        for row in 0..n {
            for col in 0..n {
                data.push(f(row, col));
            }
        }
        Self { n, data }
    }

    /// Side length
    pub fn size(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.n + col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[row * self.n + col] = value;
    }

    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row * self.n..(row + 1) * self.n]
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }

    pub fn transpose(&self) -> Block {
        Block::from_fn(self.n, |row, col| self.get(col, row))
    }

    /// Matrix product `self · rhs`
    pub fn mul(&self, rhs: &Block) -> DctResult<Block> {
        if self.n != rhs.n {
            return Err(DctError::DimensionMismatch {
                expected: self.n,
                actual: rhs.n,
            });
        }
        Ok(self.mul_same(rhs))
    }

    /// Matrix product for operands already known to share a size
    pub(crate) fn mul_same(&self, rhs: &Block) -> Block {
        debug_assert_eq!(self.n, rhs.n);
        let n = self.n;
        let mut out = vec![0.0; n * n];

        // i-k-j order keeps both inner accesses sequential
        for i in 0..n {
            for k in 0..n {
                let a = self.data[i * n + k];
                if a == 0.0 {
                    continue;
                }
                let rhs_row = &rhs.data[k * n..(k + 1) * n];
                let out_row = &mut out[i * n..(i + 1) * n];
                for (o, &b) in out_row.iter_mut().zip(rhs_row) {
                    *o += a * b;
                }
            }
        }

        Block { n, data: out }
    }

    /// Smallest and largest value, or `None` for an empty block
    pub fn min_max(&self) -> Option<(f64, f64)> {
        let first = *self.data.first()?;
        Some(
            self.data
                .iter()
                .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v))),
        )
    }

    /// Largest absolute difference against another block of the same size
    pub fn max_abs_diff(&self, other: &Block) -> DctResult<f64> {
        if self.n != other.n {
            return Err(DctError::DimensionMismatch {
                expected: self.n,
                actual: other.n,
            });
        }
        Ok(self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max))
    }
}
