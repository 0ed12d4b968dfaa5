//! Test utilities for imageops-nd
//!
//! This module provides common fixtures and comparisons for testing
//! neighborhood and interpolation operations.
//! It is only compiled when running tests.

use image::{Luma, Rgb};
use imageproc::definitions::Image;

use crate::imageops_nd::image::NdImage;
use crate::imageops_nd::pixel::PixelValue;

/// Creates a 2x2 grayscale test image with known values.
///
/// - (0,0): [200]
/// - (1,0): [150]
/// - (0,1): [100]
/// - (1,1): [50]
pub fn create_test_luma_image() -> Image<Luma<u8>> {
    let mut image: Image<Luma<u8>> = Image::new(2, 2);
    image.put_pixel(0, 0, Luma([200]));
    image.put_pixel(1, 0, Luma([150]));
    image.put_pixel(0, 1, Luma([100]));
    image.put_pixel(1, 1, Luma([50]));
    image
}

/// Creates an RGB checkerboard alternating two colors.
pub fn create_checkerboard_rgb_image(width: u32, height: u32) -> Image<Rgb<u8>> {
    Image::from_fn(width, height, |x, y| {
        if (x + y) % 2 == 0 {
            Rgb([200, 150, 100])
        } else {
            Rgb([100, 150, 200])
        }
    })
}

/// Creates an image whose value is `Σ_d slopes[d] * index[d]`.
pub fn create_ramp_image<const N: usize>(size: [usize; N], slopes: [f64; N]) -> NdImage<f64, N> {
    NdImage::from_fn(size, |index| {
        index
            .iter()
            .zip(slopes.iter())
            .map(|(&i, &s)| i as f64 * s)
            .sum()
    })
}

/// Creates a binary image with foreground (`value`) at the given indices.
pub fn create_binary_image<const N: usize>(
    size: [usize; N],
    foreground: &[[isize; N]],
    value: u8,
) -> NdImage<u8, N> {
    let mut image = NdImage::from_pixel(size, 0u8);
    for index in foreground {
        image.put_pixel(index, value);
    }
    image
}

/// Compares two real-valued pixels component by component.
pub fn pixels_approx_equal<P>(expected: P, actual: P, tolerance: f64) -> bool
where
    P: PixelValue<Component = f64>,
{
    (0..P::COMPONENTS).all(|c| (expected.component(c) - actual.component(c)).abs() <= tolerance)
}

/// Compares two real-valued images pixel by pixel.
///
/// Extents must match exactly; values within `tolerance`.
pub fn images_approx_equal<P, const N: usize>(
    expected: &NdImage<P, N>,
    actual: &NdImage<P, N>,
    tolerance: f64,
) -> bool
where
    P: PixelValue<Component = f64>,
{
    use crate::imageops_nd::image::ImageAccess;

    expected.size() == actual.size()
        && expected
            .pixels()
            .iter()
            .zip(actual.pixels())
            .all(|(&e, &a)| pixels_approx_equal(e, a, tolerance))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imageops_nd::image::ImageAccess;

    #[test]
    fn create_ramp_image_follows_slopes() {
        let ramp = create_ramp_image([3, 2], [1.0, 10.0]);
        assert_eq!(ramp.pixels(), &[0.0, 1.0, 2.0, 10.0, 11.0, 12.0]);
    }

    #[test]
    fn create_binary_image_sets_foreground() {
        let image = create_binary_image([3, 3], &[[1, 1], [2, 0]], 255);
        assert_eq!(image.value_at(&[1, 1]), 255);
        assert_eq!(image.value_at(&[2, 0]), 255);
        assert_eq!(image.pixels().iter().filter(|&&v| v == 0).count(), 7);
    }

    #[test]
    fn pixels_approx_equal_with_tolerant_comparison_returns_true() {
        assert!(pixels_approx_equal([1.0, 2.0], [1.05, 1.98], 0.1));
        assert!(!pixels_approx_equal([1.0, 2.0], [1.5, 2.0], 0.1));
    }

    #[test]
    fn images_approx_equal_checks_extent() {
        let a = create_ramp_image([2, 2], [1.0, 1.0]);
        let b = create_ramp_image([4, 1], [1.0, 1.0]);
        assert!(images_approx_equal(&a, &a.clone(), 0.0));
        assert!(!images_approx_equal(&a, &b, 1.0));
    }

    #[test]
    fn create_checkerboard_rgb_image_alternates() {
        let image = create_checkerboard_rgb_image(4, 4);
        assert_eq!(image.get_pixel(0, 0), &Rgb([200, 150, 100]));
        assert_eq!(image.get_pixel(1, 0), &Rgb([100, 150, 200]));
        assert_eq!(image.get_pixel(1, 1), &Rgb([200, 150, 100]));
    }
}
