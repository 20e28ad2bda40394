//! Basis image ("DCT component") previews
//!
//! The preview for coefficient `(row, col)` is the inverse transform of a
//! block holding a single impulse at that coefficient, stretched to [0, 1].

use dct_core::{DctError, DctResult, Dimensions, GreyImage};
use rayon::prelude::*;
use tracing::debug;

use crate::{BasisMatrix, Block, BlockTransformer};

/// Impulse amplitude per unit of N; keeps the raw pattern in pixel range
const IMPULSE_SCALE: f64 = 256.0;

/// Range below which a pattern counts as flat, relative to its magnitude
const FLAT_TOLERANCE: f64 = 1e-12;

/// Spatial pattern of coefficient `(row, col)`, normalized to [0, 1]
///
/// A flat pattern (the DC component) has no range to stretch and renders as
/// uniform black.
pub fn render_component(basis: &BasisMatrix, row: usize, col: usize) -> DctResult<GreyImage> {
    let n = basis.size();
    if row >= n || col >= n {
        return Err(DctError::IndexOutOfRange { row, col, size: n });
    }

    let mut impulse = Block::zeros(n);
    impulse.set(row, col, IMPULSE_SCALE * n as f64);
    let pattern = BlockTransformer::new(basis).inverse(&impulse)?;

    let dims = Dimensions::new(n as u32, n as u32);
    GreyImage::from_vec(dims, normalize(&pattern))
}

/// All N² previews in row-major coefficient order
pub fn render_all(basis: &BasisMatrix) -> DctResult<Vec<GreyImage>> {
    let n = basis.size();
    debug!(n, count = n * n, "rendering basis previews");

    (0..n * n)
        .into_par_iter()
        .map(|i| render_component(basis, i / n, i % n))
        .collect()
}

/// Lay previews out on an N×N grid, each pixel enlarged to `scale`×`scale`,
/// with `gap` white pixels between neighbours
pub fn atlas(previews: &[GreyImage], scale: u32, gap: u32) -> DctResult<GreyImage> {
    let n = (previews.len() as f64).sqrt().round() as usize;
    if n == 0 || n * n != previews.len() {
        return Err(DctError::InvalidParameter(format!(
            "{} previews do not form a square grid",
            previews.len()
        )));
    }
    if scale == 0 {
        return Err(DctError::InvalidParameter("atlas scale must be non-zero".into()));
    }
    if let Some(bad) = previews.iter().find(|p| p.width() as usize != n || p.height() as usize != n) {
        return Err(DctError::DimensionMismatch {
            expected: n,
            actual: bad.width() as usize,
        });
    }

    let cell = n as u32 * scale;
    let side = n as u32 * cell + (n as u32 - 1) * gap;
    let mut out = GreyImage::filled(Dimensions::new(side, side), 1.0)?;

    for (i, preview) in previews.iter().enumerate() {
        let ox = (i % n) as u32 * (cell + gap);
        let oy = (i / n) as u32 * (cell + gap);
        for y in 0..cell {
            for x in 0..cell {
                if let Some(v) = preview.get(x / scale, y / scale) {
                    out.set(ox + x, oy + y, v);
                }
            }
        }
    }

    Ok(out)
}

fn normalize(pattern: &Block) -> Vec<f64> {
    let Some((min, max)) = pattern.min_max() else {
        return Vec::new();
    };
    let range = max - min;
    let magnitude = min.abs().max(max.abs());

    if range <= FLAT_TOLERANCE * magnitude || range == 0.0 {
        return vec![0.0; pattern.data().len()];
    }

    pattern.data().iter().map(|&v| (v - min) / range).collect()
}
