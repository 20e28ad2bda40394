//! Interactive DCT filtering session

use std::collections::HashMap;
use std::sync::Arc;

use dct_core::consts;
use dct_core::{DctError, DctResult, GreyImage};
use dct_transform::{render_all, BasisMatrix, CoefficientMask, ImageReconstructor, TileOrigin};
use tracing::debug;

use crate::RenderRequest;

/// Engine options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptions {
    /// Smallest accepted transform size
    pub min_size: usize,
    /// Largest accepted transform size
    pub max_size: usize,
    /// Transform size the engine starts with
    pub default_size: usize,
    /// Corner the tile grid is anchored to
    pub tile_origin: TileOrigin,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            min_size: consts::MIN_BLOCK_SIZE,
            max_size: consts::MAX_BLOCK_SIZE,
            default_size: consts::DEFAULT_BLOCK_SIZE,
            tile_origin: TileOrigin::TopLeft,
        }
    }
}

impl EngineOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min_size(mut self, min_size: usize) -> Self {
        self.min_size = min_size.max(consts::MIN_BLOCK_SIZE);
        self.max_size = self.max_size.max(self.min_size);
        self.default_size = self.default_size.clamp(self.min_size, self.max_size);
        self
    }

    pub fn max_size(mut self, max_size: usize) -> Self {
        self.max_size = max_size.max(self.min_size);
        self.default_size = self.default_size.clamp(self.min_size, self.max_size);
        self
    }

    pub fn default_size(mut self, size: usize) -> Self {
        self.default_size = size.clamp(self.min_size, self.max_size);
        self
    }

    pub fn tile_origin(mut self, origin: TileOrigin) -> Self {
        self.tile_origin = origin;
        self
    }

    /// Check `n` against the configured range
    pub fn validate_size(&self, n: usize) -> DctResult<()> {
        if n < self.min_size || n > self.max_size {
            return Err(DctError::InvalidSize {
                size: n,
                min: self.min_size,
                max: self.max_size,
            });
        }
        Ok(())
    }
}

/// Stateful front end over the transform crate
///
/// Owns the current transform size, the coefficient mask, a basis cache keyed
/// by size, the source image, the latest reconstruction and the basis
/// previews for the current size. Every trigger leaves the outputs consistent
/// with the inputs before returning.
pub struct DctEngine {
    options: EngineOptions,
    reconstructor: ImageReconstructor,
    bases: HashMap<usize, Arc<BasisMatrix>>,
    basis: Arc<BasisMatrix>,
    mask: CoefficientMask,
    image: Option<Arc<GreyImage>>,
    output: Option<GreyImage>,
    previews: Vec<GreyImage>,
    render_count: u64,
}

impl DctEngine {
    pub fn new(options: EngineOptions) -> DctResult<Self> {
        options.validate_size(options.default_size)?;

        let n = options.default_size;
        let basis = Arc::new(BasisMatrix::new(n)?);
        let previews = render_all(&basis)?;
        let mut bases = HashMap::new();
        bases.insert(n, Arc::clone(&basis));

        Ok(Self {
            options,
            reconstructor: ImageReconstructor::new(options.tile_origin),
            bases,
            basis,
            mask: CoefficientMask::all(n),
            image: None,
            output: None,
            previews,
            render_count: 0,
        })
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Current transform size
    pub fn size(&self) -> usize {
        self.basis.size()
    }

    pub fn basis(&self) -> Arc<BasisMatrix> {
        Arc::clone(&self.basis)
    }

    pub fn mask(&self) -> &CoefficientMask {
        &self.mask
    }

    pub fn image(&self) -> Option<&GreyImage> {
        self.image.as_deref()
    }

    /// Latest reconstruction, if a source image has been set
    pub fn output(&self) -> Option<&GreyImage> {
        self.output.as_ref()
    }

    /// Basis previews for the current size, row-major by coefficient
    pub fn previews(&self) -> &[GreyImage] {
        &self.previews
    }

    /// Preview for coefficient `(row, col)`
    pub fn preview(&self, row: usize, col: usize) -> Option<&GreyImage> {
        let n = self.size();
        if row < n && col < n {
            self.previews.get(row * n + col)
        } else {
            None
        }
    }

    /// Number of reconstruction passes run so far
    pub fn render_count(&self) -> u64 {
        self.render_count
    }

    /// Sizes with a cached basis matrix
    pub fn cached_sizes(&self) -> Vec<usize> {
        let mut sizes: Vec<usize> = self.bases.keys().copied().collect();
        sizes.sort_unstable();
        sizes
    }

    /// Size changed: switch basis, reset the mask to all-retained, regenerate
    /// previews and re-render
    ///
    /// The size is validated before any matrix work; on error nothing changes.
    pub fn set_size(&mut self, n: usize) -> DctResult<()> {
        self.options.validate_size(n)?;

        let basis = self.basis_for(n)?;
        let previews = render_all(&basis)?;

        self.basis = basis;
        self.previews = previews;
        self.mask.resize(n);
        self.render()
    }

    /// Source image changed: re-render with the current basis and mask
    pub fn set_image(&mut self, image: GreyImage) -> DctResult<()> {
        self.image = Some(Arc::new(image));
        self.render()
    }

    /// Drop the source image and its reconstruction
    pub fn clear_image(&mut self) {
        self.image = None;
        self.output = None;
    }

    /// Mask entry toggled: flip `(row, col)` and re-render
    pub fn toggle(&mut self, row: usize, col: usize) -> DctResult<bool> {
        let mut keep = false;
        self.update_mask(|mask| {
            keep = mask.toggle(row, col)?;
            Ok(())
        })?;
        Ok(keep)
    }

    /// Set one mask entry and re-render
    pub fn set_coefficient(&mut self, row: usize, col: usize, keep: bool) -> DctResult<()> {
        self.update_mask(|mask| mask.set(row, col, keep))
    }

    /// Set every mask entry and re-render once
    pub fn set_all(&mut self, keep: bool) -> DctResult<()> {
        self.update_mask(|mask| {
            mask.set_all(keep);
            Ok(())
        })
    }

    /// Replace the mask wholesale; it must match the current size
    pub fn set_mask(&mut self, mask: CoefficientMask) -> DctResult<()> {
        if mask.size() != self.size() {
            return Err(DctError::DimensionMismatch {
                expected: self.size(),
                actual: mask.size(),
            });
        }
        self.mask = mask;
        self.render()
    }

    /// Apply any number of mask edits, then re-render once
    ///
    /// Edits run against a copy; if `edit` fails the mask is left untouched
    /// and no render happens.
    pub fn update_mask<F>(&mut self, edit: F) -> DctResult<()>
    where
        F: FnOnce(&mut CoefficientMask) -> DctResult<()>,
    {
        let mut mask = self.mask.clone();
        edit(&mut mask)?;
        if mask.size() != self.size() {
            return Err(DctError::DimensionMismatch {
                expected: self.size(),
                actual: mask.size(),
            });
        }
        self.mask = mask;
        self.render()
    }

    /// Snapshot of the current inputs for a background render
    pub fn request(&self) -> Option<RenderRequest> {
        let image = self.image.as_ref()?;
        Some(RenderRequest {
            image: Arc::clone(image),
            basis: Arc::clone(&self.basis),
            mask: self.mask.clone(),
            origin: self.options.tile_origin,
        })
    }

    fn basis_for(&mut self, n: usize) -> DctResult<Arc<BasisMatrix>> {
        if let Some(basis) = self.bases.get(&n) {
            debug!(n, "basis cache hit");
            return Ok(Arc::clone(basis));
        }

        let basis = Arc::new(BasisMatrix::new(n)?);
        self.bases.insert(n, Arc::clone(&basis));
        Ok(basis)
    }

    fn render(&mut self) -> DctResult<()> {
        let Some(image) = self.image.as_ref() else {
            self.output = None;
            return Ok(());
        };

        let output = self.reconstructor.reconstruct(image, &self.basis, &self.mask)?;
        self.output = Some(output);
        self.render_count += 1;
        debug!(
            n = self.size(),
            pass = self.render_count,
            "reconstruction updated"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dct_core::Dimensions;

    fn checker(width: u32, height: u32) -> GreyImage {
        GreyImage::from_fn(Dimensions::new(width, height), |x, y| {
            if (x + y) % 2 == 0 {
                0.9
            } else {
                0.1
            }
        })
        .unwrap()
    }

    #[test]
    fn test_options_clamp() {
        let options = EngineOptions::new().max_size(8).default_size(20);
        assert_eq!(options.default_size, 8);

        let options = EngineOptions::new().min_size(0);
        assert_eq!(options.min_size, 1);

        let options = EngineOptions::new().max_size(2).min_size(5);
        assert_eq!((options.min_size, options.max_size), (5, 5));
        assert_eq!(options.default_size, 5);
    }

    #[test]
    fn test_starts_at_default_size() {
        let engine = DctEngine::new(EngineOptions::default()).unwrap();
        assert_eq!(engine.size(), consts::DEFAULT_BLOCK_SIZE);
        assert!(engine.mask().is_all());
        assert_eq!(engine.previews().len(), 16);
        assert!(engine.output().is_none());
    }

    #[test]
    fn test_invalid_size_changes_nothing() {
        let mut engine = DctEngine::new(EngineOptions::default()).unwrap();
        engine.set_coefficient(1, 1, false).unwrap();

        let err = engine.set_size(33).unwrap_err();
        assert_eq!(err, DctError::InvalidSize { size: 33, min: 1, max: 32 });
        assert!(engine.set_size(0).is_err());

        assert_eq!(engine.size(), 4);
        assert!(!engine.mask().get(1, 1).unwrap());
    }

    #[test]
    fn test_size_change_resets_mask_and_previews() {
        let mut engine = DctEngine::new(EngineOptions::default()).unwrap();
        engine.set_all(false).unwrap();

        engine.set_size(8).unwrap();
        assert_eq!(engine.mask().size(), 8);
        assert!(engine.mask().is_all());
        assert_eq!(engine.previews().len(), 64);
        assert!(engine.preview(7, 7).is_some());
        assert!(engine.preview(8, 0).is_none());
    }

    #[test]
    fn test_basis_is_memoized() {
        let mut engine = DctEngine::new(EngineOptions::default()).unwrap();
        let first = engine.basis();
        engine.set_size(8).unwrap();
        engine.set_size(4).unwrap();

        assert!(Arc::ptr_eq(&first, &engine.basis()));
        assert_eq!(engine.cached_sizes(), vec![4, 8]);
    }

    #[test]
    fn test_batched_edit_renders_once() {
        let mut engine = DctEngine::new(EngineOptions::default()).unwrap();
        engine.set_image(checker(8, 8)).unwrap();
        let before = engine.render_count();

        engine
            .update_mask(|mask| {
                for row in 0..4 {
                    for col in 0..4 {
                        mask.set(row, col, row + col < 2)?;
                    }
                }
                Ok(())
            })
            .unwrap();

        assert_eq!(engine.render_count(), before + 1);
        assert_eq!(engine.mask().retained_count(), 3);
    }

    #[test]
    fn test_failed_batch_leaves_mask_untouched() {
        let mut engine = DctEngine::new(EngineOptions::default()).unwrap();
        engine.set_image(checker(4, 4)).unwrap();
        let before = engine.render_count();

        let result = engine.update_mask(|mask| {
            mask.set(0, 1, false)?;
            mask.set(9, 9, false)
        });

        assert!(result.is_err());
        assert!(engine.mask().is_all());
        assert_eq!(engine.render_count(), before);
    }

    #[test]
    fn test_toggle_rerenders() {
        let mut engine = DctEngine::new(EngineOptions::default()).unwrap();
        let image = checker(8, 8);
        engine.set_image(image.clone()).unwrap();
        assert!(image.max_abs_diff(engine.output().unwrap()).unwrap() < 1e-9);

        assert!(!engine.toggle(3, 3).unwrap());
        assert!(image.max_abs_diff(engine.output().unwrap()).unwrap() > 0.01);

        assert!(engine.toggle(3, 3).unwrap());
        assert!(image.max_abs_diff(engine.output().unwrap()).unwrap() < 1e-9);
    }

    #[test]
    fn test_set_mask_checks_size() {
        let mut engine = DctEngine::new(EngineOptions::default()).unwrap();
        assert!(engine.set_mask(CoefficientMask::all(5)).is_err());
        assert!(engine.set_mask(CoefficientMask::none(4)).is_ok());
        assert_eq!(engine.mask().retained_count(), 0);
    }

    #[test]
    fn test_request_requires_image() {
        let mut engine = DctEngine::new(EngineOptions::default()).unwrap();
        assert!(engine.request().is_none());
        engine.set_image(checker(4, 4)).unwrap();
        let request = engine.request().unwrap();
        assert_eq!(request.mask, *engine.mask());
        engine.clear_image();
        assert!(engine.output().is_none());
    }
}
