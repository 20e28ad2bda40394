//! # dctview - block DCT frequency filtering
//!
//! Splits a greyscale image into N×N blocks, moves each block into DCT
//! coefficient space, zeroes the coefficients a mask discards and transforms
//! back, giving a live lossy reconstruction. Also renders the N² basis images
//! so each coefficient's spatial pattern can be shown next to its toggle.
//!
//! ## Quick Start
//!
//! ```
//! use dctview::{DctEngine, Dimensions, EngineOptions, GreyImage};
//!
//! let image = GreyImage::from_fn(Dimensions::new(64, 48), |x, y| {
//!     ((x ^ y) % 16) as f64 / 15.0
//! })
//! .unwrap();
//!
//! let mut engine = DctEngine::new(EngineOptions::default().default_size(8)).unwrap();
//! engine.set_image(image).unwrap();
//!
//! // Keep only the lowest frequencies, re-rendering once
//! engine
//!     .update_mask(|mask| {
//!         for row in 0..8 {
//!             for col in 0..8 {
//!                 mask.set(row, col, row + col < 3)?;
//!             }
//!         }
//!         Ok(())
//!     })
//!     .unwrap();
//!
//! let preview = engine.output().unwrap();
//! assert_eq!(preview.width(), 64);
//! assert_eq!(engine.previews().len(), 64);
//! ```
//!
//! ## Triggers
//!
//! - [`DctEngine::set_size`]: new basis (cached by size), mask reset to
//!   all-retained, previews regenerated, image re-rendered
//! - [`DctEngine::toggle`], [`DctEngine::update_mask`]: image re-rendered
//! - [`DctEngine::set_image`]: image re-rendered, basis untouched
//!
//! For large images, [`RenderWorker`] runs passes off the calling thread and
//! only hands back the result of the newest request.

pub mod engine;
pub mod worker;

pub use engine::{DctEngine, EngineOptions};
pub use worker::{RenderOutcome, RenderRequest, RenderWorker};

// Re-export core types
pub use dct_core::{consts, luma_image, rgb_to_luma, DctError, DctResult, Dimensions, GreyImage, Sample};

// Re-export transform types
pub use dct_transform::{
    atlas, reconstruct, render_all, render_component, BasisMatrix, Block, BlockTransformer,
    CoefficientMask, ImageReconstructor, TileOrigin,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
