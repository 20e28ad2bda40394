//! Core types for the DCT engine

use num_traits::NumCast;

/// Image dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn pixel_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Whether both sides are whole multiples of `n`
    pub fn is_aligned_to(&self, n: usize) -> bool {
        n > 0 && self.width as usize % n == 0 && self.height as usize % n == 0
    }
}

/// Image sample type
///
/// Converts stored samples to the normalized `[0, 1]` intensity range the
/// engine works in, and back.
pub trait Sample: Copy + NumCast + PartialOrd {
    fn to_intensity(self) -> f64;
    fn from_intensity(value: f64) -> Self;
}

impl Sample for u8 {
    fn to_intensity(self) -> f64 {
        self as f64 / 255.0
    }

    fn from_intensity(value: f64) -> Self {
        (value * 255.0).round().clamp(0.0, 255.0) as u8
    }
}

impl Sample for u16 {
    fn to_intensity(self) -> f64 {
        self as f64 / 65535.0
    }

    fn from_intensity(value: f64) -> Self {
        (value * 65535.0).round().clamp(0.0, 65535.0) as u16
    }
}

impl Sample for f32 {
    fn to_intensity(self) -> f64 {
        self as f64
    }

    fn from_intensity(value: f64) -> Self {
        value as f32
    }
}

impl Sample for f64 {
    fn to_intensity(self) -> f64 {
        self
    }

    fn from_intensity(value: f64) -> Self {
        value
    }
}
