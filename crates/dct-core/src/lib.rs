//! Core types and utilities for the block DCT engine
//!
//! This crate provides the fundamental data structures shared by the transform
//! crates and their callers: greyscale image buffers, dimensions, sample
//! conversion, luma weighting and error types.

pub mod consts;
pub mod error;
pub mod image;
pub mod luma;
pub mod types;

pub use error::{DctError, DctResult};
pub use image::*;
pub use luma::*;
pub use types::*;
