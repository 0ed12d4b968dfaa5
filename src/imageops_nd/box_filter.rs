use crate::error::FilterError;
use crate::imageops_nd::boundary::BoundaryCondition;
use crate::imageops_nd::image::NdImage;
use crate::imageops_nd::operator::{KernelFamily, KernelOperator};
use crate::imageops_nd::operator_filter::NeighborhoodOperatorFilter;
use crate::imageops_nd::pixel::{PixelValue, RealPixel};

/// Mean filter over an N-dimensional neighborhood.
///
/// The filter is the inner product of each window with a uniform `Box`
/// kernel, so every output pixel is the mean of `Π (2r + 1)` inputs.
/// Windows that cross the image edge read through the boundary condition.
pub trait BoxFilter<const N: usize> {
    /// Filtered image type
    type Output;

    /// Error returned when the filter cannot run
    type Error;

    /// Applies a box filter with a per-axis radius.
    ///
    /// # Errors
    ///
    /// * `FilterError::EmptyImage` - if an `NdImage` has no pixels
    fn box_filter(&self, radius: [usize; N]) -> Result<Self::Output, Self::Error>;

    /// Applies a box filter with the same radius on every axis.
    fn box_filter_uniform(&self, radius: usize) -> Result<Self::Output, Self::Error> {
        self.box_filter([radius; N])
    }
}

impl<P: PixelValue, const N: usize> BoxFilter<N> for NdImage<P, N> {
    type Output = NdImage<RealPixel<P>, N>;
    type Error = FilterError;

    fn box_filter(&self, radius: [usize; N]) -> Result<Self::Output, FilterError> {
        let operator = KernelOperator::<f64, N>::uniform(KernelFamily::Box, radius)?;
        NeighborhoodOperatorFilter::<P, f64, f64, N>::new(operator)
            .with_boundary(BoundaryCondition::ZeroFluxNeumann)
            .apply(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imageops_nd::image::ImageAccess;
    use crate::test_utils::{create_ramp_image, images_approx_equal};

    #[test]
    fn constant_image_is_unchanged() {
        let img = NdImage::from_pixel([5, 4, 3], 42u8);
        let result = img.box_filter_uniform(1).unwrap();
        assert!(result.pixels().iter().all(|&v| (v - 42.0).abs() < 1e-9));
    }

    #[test]
    fn impulse_spreads_evenly() {
        let mut img = NdImage::from_pixel([5, 5], 0.0f32);
        img.put_pixel(&[2, 2], 9.0);
        let result = img.box_filter([1, 1]).unwrap();
        assert!((result.value_at(&[1, 1]) - 1.0).abs() < 1e-9);
        assert!((result.value_at(&[3, 3]) - 1.0).abs() < 1e-9);
        assert_eq!(result.value_at(&[0, 0]), 0.0);
    }

    #[test]
    fn vector_pixels_are_filtered_per_channel() {
        let img = NdImage::from_fn([3], |[x]| [x as u8 * 3, 30]);
        let result = img.box_filter([1]).unwrap();
        let [r, g] = result.value_at(&[1]);
        assert!((r - 3.0).abs() < 1e-9);
        assert!((g - 30.0).abs() < 1e-9);
    }

    #[test]
    fn ramp_is_preserved_away_from_edges() {
        let ramp = create_ramp_image([8, 6], [0.5, -2.0]);
        let result = ramp.box_filter([1, 2]).unwrap();
        for y in 2..4isize {
            for x in 1..7isize {
                assert!((result.value_at(&[x, y]) - ramp.value_at(&[x, y])).abs() < 1e-9);
            }
        }
        assert!(!images_approx_equal(&ramp, &result, 1e-9));
    }

    fn smooth_twice<F: BoxFilter<2, Output = F>>(image: &F) -> Result<F, F::Error> {
        image.box_filter([1, 1])?.box_filter([1, 1])
    }

    #[test]
    fn error_type_flows_through_generic_callers() {
        let img = NdImage::from_pixel([4, 4], 2.0f64);
        let result = smooth_twice(&img).unwrap();
        assert!(result.pixels().iter().all(|&v| (v - 2.0).abs() < 1e-9));

        let empty = NdImage::from_pixel([0, 4], 2.0f64);
        let error: FilterError = smooth_twice(&empty).unwrap_err();
        assert!(matches!(error, FilterError::EmptyImage { .. }));
    }

    #[test]
    fn empty_image_returns_error() {
        let img = NdImage::from_pixel([0, 3], 0u8);
        assert!(matches!(
            img.box_filter([1, 1]),
            Err(FilterError::EmptyImage { .. })
        ));
    }
}
