//! Masked block-DCT reconstruction of a whole image
//!
//! Each tile is scaled to the [0, 256) working range, transformed, stripped
//! of the coefficients the mask discards, inverse transformed and written
//! back at its offset. Tiles are independent and run in parallel.

use dct_core::{DctError, DctResult, GreyImage};
use rayon::prelude::*;
use tracing::debug;

use crate::{
    extract_tile, insert_tile, tile_grid, BasisMatrix, Block, BlockTransformer, CoefficientMask,
    Tile, TileOrigin,
};

/// Rebuilds images from their masked block-DCT coefficients
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImageReconstructor {
    origin: TileOrigin,
}

impl ImageReconstructor {
    pub fn new(origin: TileOrigin) -> Self {
        Self { origin }
    }

    pub fn origin(&self) -> TileOrigin {
        self.origin
    }

    /// Reconstruct `image` keeping only the coefficients `mask` retains
    ///
    /// The transform size is the basis size; `mask` must match it.
    pub fn reconstruct(
        &self,
        image: &GreyImage,
        basis: &BasisMatrix,
        mask: &CoefficientMask,
    ) -> DctResult<GreyImage> {
        let n = basis.size();
        if mask.size() != n {
            return Err(DctError::DimensionMismatch {
                expected: n,
                actual: mask.size(),
            });
        }

        let dct = BlockTransformer::new(basis);
        let tiles = tile_grid(image.dimensions(), n, self.origin);

        debug!(
            n,
            width = image.width(),
            height = image.height(),
            tiles = tiles.len(),
            retained = mask.retained_count(),
            "reconstructing image"
        );

        let blocks: Vec<(Tile, Block)> = tiles
            .into_par_iter()
            .map(|tile| {
                let pixels = extract_tile(image, &tile);
                dct.filter(&pixels, mask).map(|block| (tile, block))
            })
            .collect::<DctResult<_>>()?;

        let mut output = GreyImage::new(image.dimensions())?;
        for (tile, block) in &blocks {
            insert_tile(block, &mut output, tile);
        }

        Ok(output)
    }
}

/// Reconstruct with tiles anchored at the top-left corner
pub fn reconstruct(
    image: &GreyImage,
    basis: &BasisMatrix,
    mask: &CoefficientMask,
) -> DctResult<GreyImage> {
    ImageReconstructor::default().reconstruct(image, basis, mask)
}
