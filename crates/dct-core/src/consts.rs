//! Constants used throughout the DCT engine

/// Smallest supported transform size
pub const MIN_BLOCK_SIZE: usize = 1;

/// Largest transform size accepted for interactive use
pub const MAX_BLOCK_SIZE: usize = 32;

/// Transform size used before the caller picks one
pub const DEFAULT_BLOCK_SIZE: usize = 4;

/// Working range of pixel blocks: normalized samples are multiplied by this
/// before the forward transform and divided by it after the inverse.
pub const PIXEL_SCALE: f64 = 256.0;

/// Luma weights applied to (R, G, B) when converting to greyscale
pub const LUMA_WEIGHTS: [f64; 3] = [0.299, 0.587, 0.114];
