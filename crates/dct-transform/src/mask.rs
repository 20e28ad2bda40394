//! Coefficient mask: which DCT coefficients survive reconstruction
//!
//! Entry `(row, col)` addresses coefficient `[row][col]` of a coefficient
//! block, i.e. vertical frequency `row` and horizontal frequency `col`. A
//! toggle grid laid out row-major uses the same indices, so the basis
//! preview at `(row, col)` is exactly the pattern removed by clearing that
//! entry.

use dct_core::{DctError, DctResult};

use crate::Block;

/// N×N grid of retained (`true`) / discarded (`false`) coefficients
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CoefficientMask {
    n: usize,
    keep: Vec<bool>,
}

impl CoefficientMask {
    /// Mask that keeps every coefficient
    pub fn all(n: usize) -> Self {
        Self {
            n,
            keep: vec![true; n * n],
        }
    }

    /// Mask that discards every coefficient
    pub fn none(n: usize) -> Self {
        Self {
            n,
            keep: vec![false; n * n],
        }
    }

    /// Keep coefficients whose frequency indices satisfy `row + col < cutoff`
    pub fn low_pass(n: usize, cutoff: usize) -> Self {
        Self::from_fn(n, |row, col| row + col < cutoff)
    }

    /// Build a mask by evaluating `f(row, col)` for every coefficient
    pub fn from_fn<F>(n: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> bool,
    {
        let mut keep = Vec::with_capacity(n * n);
        for row in 0..n {
            for col in 0..n {
                keep.push(f(row, col));
            }
        }
        Self { n, keep }
    }

    /// Side length
    pub fn size(&self) -> usize {
        self.n
    }

    pub fn get(&self, row: usize, col: usize) -> DctResult<bool> {
        let idx = self.index(row, col)?;
        Ok(self.keep[idx])
    }

    pub fn set(&mut self, row: usize, col: usize, keep: bool) -> DctResult<()> {
        let idx = self.index(row, col)?;
        self.keep[idx] = keep;
        Ok(())
    }

    /// Flip one entry, returning its new state
    pub fn toggle(&mut self, row: usize, col: usize) -> DctResult<bool> {
        let idx = self.index(row, col)?;
        self.keep[idx] = !self.keep[idx];
        Ok(self.keep[idx])
    }

    pub fn set_all(&mut self, keep: bool) {
        self.keep.fill(keep);
    }

    /// Change the size. Previous entries are discarded and every coefficient
    /// of the new size is retained.
    pub fn resize(&mut self, n: usize) {
        *self = Self::all(n);
    }

    /// Number of retained coefficients
    pub fn retained_count(&self) -> usize {
        self.keep.iter().filter(|&&k| k).count()
    }

    pub fn is_all(&self) -> bool {
        self.keep.iter().all(|&k| k)
    }

    /// Zero every coefficient of `coefficients` whose entry is `false`
    pub fn apply(&self, coefficients: &mut Block) -> DctResult<()> {
        if coefficients.size() != self.n {
            return Err(DctError::DimensionMismatch {
                expected: self.n,
                actual: coefficients.size(),
            });
        }

        for (value, &keep) in coefficients.data_mut().iter_mut().zip(&self.keep) {
            if !keep {
                *value = 0.0;
            }
        }
        Ok(())
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> DctResult<usize> {
        if row >= self.n || col >= self.n {
            return Err(DctError::IndexOutOfRange {
                row,
                col,
                size: self.n,
            });
        }
        Ok(row * self.n + col)
    }
}
