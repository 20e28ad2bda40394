//! RGB to greyscale conversion

use crate::consts::LUMA_WEIGHTS;
use crate::{DctError, DctResult, Dimensions, GreyImage, Sample};

/// Luma of one normalized RGB triple
#[inline]
pub fn rgb_to_luma(r: f64, g: f64, b: f64) -> f64 {
    LUMA_WEIGHTS[0] * r + LUMA_WEIGHTS[1] * g + LUMA_WEIGHTS[2] * b
}

/// Convert an interleaved RGB or RGBA buffer to a greyscale image
///
/// `channels` must be 3 or 4; alpha is ignored.
pub fn luma_image<T: Sample>(
    dimensions: Dimensions,
    interleaved: &[T],
    channels: usize,
) -> DctResult<GreyImage> {
    if channels != 3 && channels != 4 {
        return Err(DctError::InvalidParameter(format!(
            "{} channels cannot be converted to luma",
            channels
        )));
    }

    let expected = dimensions.pixel_count() * channels;
    if interleaved.len() != expected {
        return Err(DctError::BufferSize {
            expected,
            actual: interleaved.len(),
        });
    }

    let data = interleaved
        .chunks_exact(channels)
        .map(|px| {
            rgb_to_luma(
                px[0].to_intensity(),
                px[1].to_intensity(),
                px[2].to_intensity(),
            )
        })
        .collect();

    GreyImage::from_vec(dimensions, data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_weights_sum_to_one() {
        assert_relative_eq!(rgb_to_luma(1.0, 1.0, 1.0), 1.0, epsilon = 1e-12);
        assert_eq!(rgb_to_luma(0.0, 0.0, 0.0), 0.0);
    }

    #[test]
    fn test_primary_weights() {
        assert_relative_eq!(rgb_to_luma(1.0, 0.0, 0.0), 0.299);
        assert_relative_eq!(rgb_to_luma(0.0, 1.0, 0.0), 0.587);
        assert_relative_eq!(rgb_to_luma(0.0, 0.0, 1.0), 0.114);
    }

    #[test]
    fn test_rgba_ignores_alpha() {
        let rgba = [255u8, 0, 0, 0, 0, 255, 0, 255];
        let image = luma_image(Dimensions::new(2, 1), &rgba, 4).unwrap();
        assert_relative_eq!(image.data()[0], 0.299, epsilon = 1e-12);
        assert_relative_eq!(image.data()[1], 0.587, epsilon = 1e-12);
    }

    #[test]
    fn test_rejects_bad_channel_count() {
        let err = luma_image(Dimensions::new(1, 1), &[0u8, 0], 2).unwrap_err();
        assert!(matches!(err, DctError::InvalidParameter(_)));
    }

    #[test]
    fn test_rejects_short_buffer() {
        let err = luma_image(Dimensions::new(2, 2), &[0u8; 9], 3).unwrap_err();
        assert_eq!(err, DctError::BufferSize { expected: 12, actual: 9 });
    }
}
