//! Block DCT transform engine
//!
//! This crate implements the orthonormal N×N DCT basis, the forward and
//! inverse block transforms, coefficient masking, tiled whole-image
//! reconstruction and basis image rendering.

pub mod basis;
pub mod block;
pub mod components;
pub mod mask;
pub mod reconstruct;
pub mod tiles;
pub mod transform;

pub use basis::*;
pub use block::*;
pub use components::*;
pub use mask::*;
pub use reconstruct::*;
pub use tiles::*;
pub use transform::*;
