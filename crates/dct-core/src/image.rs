//! Greyscale image buffer

use crate::{DctError, DctResult, Dimensions, Sample};

/// Single-channel intensity image
///
/// Samples are stored row-major, top row first, normalized so that `0.0` is
/// black and `1.0` is white. Reconstructed images may carry values slightly
/// outside that range; [`GreyImage::to_samples`] clamps on conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct GreyImage {
    dimensions: Dimensions,
    data: Vec<f64>,
}

impl GreyImage {
    /// Create a black image
    pub fn new(dimensions: Dimensions) -> DctResult<Self> {
        Self::filled(dimensions, 0.0)
    }

    /// Create an image with every sample set to `value`
    pub fn filled(dimensions: Dimensions, value: f64) -> DctResult<Self> {
        if dimensions.is_empty() {
            return Err(DctError::InvalidDimensions {
                width: dimensions.width,
                height: dimensions.height,
            });
        }

        Ok(Self {
            dimensions,
            data: vec![value; dimensions.pixel_count()],
        })
    }

    /// Wrap an existing buffer of normalized intensities
    pub fn from_vec(dimensions: Dimensions, data: Vec<f64>) -> DctResult<Self> {
        if dimensions.is_empty() {
            return Err(DctError::InvalidDimensions {
                width: dimensions.width,
                height: dimensions.height,
            });
        }
        if data.len() != dimensions.pixel_count() {
            return Err(DctError::BufferSize {
                expected: dimensions.pixel_count(),
                actual: data.len(),
            });
        }

        Ok(Self { dimensions, data })
    }

    /// Convert typed samples (u8, u16, f32, f64) to a normalized image
    pub fn from_samples<T: Sample>(dimensions: Dimensions, samples: &[T]) -> DctResult<Self> {
        let data = samples.iter().map(|s| s.to_intensity()).collect();
        Self::from_vec(dimensions, data)
    }

    /// Build an image by evaluating `f(x, y)` for every pixel
    pub fn from_fn<F>(dimensions: Dimensions, mut f: F) -> DctResult<Self>
    where
        F: FnMut(u32, u32) -> f64,
    {
        let mut data = Vec::with_capacity(dimensions.pixel_count());
        for y in 0..dimensions.height {
            for x in 0..dimensions.width {
                data.push(f(x, y));
            }
        }
        Self::from_vec(dimensions, data)
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn width(&self) -> u32 {
        self.dimensions.width
    }

    pub fn height(&self) -> u32 {
        self.dimensions.height
    }

    pub fn pixel_count(&self) -> usize {
        self.dimensions.pixel_count()
    }

    /// Sample at column `x`, row `y` (top-down)
    pub fn get(&self, x: u32, y: u32) -> Option<f64> {
        if x < self.width() && y < self.height() {
            Some(self.data[self.index(x, y)])
        } else {
            None
        }
    }

    /// Overwrite the sample at column `x`, row `y`; out-of-bounds writes are ignored
    pub fn set(&mut self, x: u32, y: u32, value: f64) {
        if x < self.width() && y < self.height() {
            let idx = self.index(x, y);
            self.data[idx] = value;
        }
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }

    /// Convert to typed samples, clamping to the representable range
    pub fn to_samples<T: Sample>(&self) -> Vec<T> {
        self.data
            .iter()
            .map(|&v| T::from_intensity(v.clamp(0.0, 1.0)))
            .collect()
    }

    /// Convert to 8-bit samples for display or encoding
    pub fn to_luma8(&self) -> Vec<u8> {
        self.to_samples()
    }

    /// Largest absolute per-sample difference against another image
    pub fn max_abs_diff(&self, other: &GreyImage) -> DctResult<f64> {
        if self.dimensions != other.dimensions {
            return Err(DctError::BufferSize {
                expected: self.pixel_count(),
                actual: other.pixel_count(),
            });
        }

        Ok(self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max))
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width() as usize + x as usize
    }
}
