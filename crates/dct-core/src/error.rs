//! Error types for DCT engine operations

use thiserror::Error;

/// Result type for DCT engine operations
pub type DctResult<T> = Result<T, DctError>;

/// Errors that can occur while building, transforming or reconstructing
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DctError {
    #[error("Invalid block size {size}: supported range is {min}..={max}")]
    InvalidSize { size: usize, min: usize, max: usize },

    #[error("Dimension mismatch: expected {expected}x{expected}, got {actual}x{actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Buffer size mismatch: expected {expected} samples, got {actual}")]
    BufferSize { expected: usize, actual: usize },

    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Coefficient ({row}, {col}) out of range for a {size}x{size} grid")]
    IndexOutOfRange { row: usize, col: usize, size: usize },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}
