//! Forward and inverse 2D DCT of a single block
//!
//! With basis **C**, a pixel block **P** maps to coefficients `C · P · Cᵗ` and
//! coefficients **D** map back to pixels with `Cᵗ · D · C`. Coefficient
//! `[u][v]` holds vertical frequency `u` and horizontal frequency `v`.

use dct_core::{DctError, DctResult};

use crate::{BasisMatrix, Block, CoefficientMask};

/// Stateless block transform bound to one basis
#[derive(Debug, Clone, Copy)]
pub struct BlockTransformer<'a> {
    basis: &'a BasisMatrix,
}

impl<'a> BlockTransformer<'a> {
    pub fn new(basis: &'a BasisMatrix) -> Self {
        Self { basis }
    }

    pub fn size(&self) -> usize {
        self.basis.size()
    }

    /// Pixel block to coefficient block
    pub fn forward(&self, pixels: &Block) -> DctResult<Block> {
        self.check(pixels)?;
        Ok(self
            .basis
            .as_block()
            .mul_same(pixels)
            .mul_same(self.basis.transpose()))
    }

    /// Coefficient block to pixel block
    pub fn inverse(&self, coefficients: &Block) -> DctResult<Block> {
        self.check(coefficients)?;
        Ok(self
            .basis
            .transpose()
            .mul_same(coefficients)
            .mul_same(self.basis.as_block()))
    }

    /// Forward transform, drop masked coefficients, inverse transform
    pub fn filter(&self, pixels: &Block, mask: &CoefficientMask) -> DctResult<Block> {
        let mut coefficients = self.forward(pixels)?;
        mask.apply(&mut coefficients)?;
        self.inverse(&coefficients)
    }

    fn check(&self, block: &Block) -> DctResult<()> {
        if block.size() != self.basis.size() {
            return Err(DctError::DimensionMismatch {
                expected: self.basis.size(),
                actual: block.size(),
            });
        }
        Ok(())
    }
}
