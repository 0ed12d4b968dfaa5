//! Generalized (threshold-gated) dilation.
//!
//! For every output pixel the window is multiplied element-wise with the
//! structuring element. The largest product replaces the center value only
//! when it is strictly greater than the threshold. With binary images and a
//! 0/1 kernel this is binary dilation; other inputs degrade to grayscale
//! dilation.

use num_traits::Bounded;
use tracing::debug;

use crate::error::FilterError;
use crate::imageops_nd::boundary::BoundaryCondition;
use crate::imageops_nd::image::{ImageAccess, NdImage};
use crate::imageops_nd::neighborhood::Neighborhood;
use crate::imageops_nd::operator::KernelOperator;
use crate::imageops_nd::pixel::Scalar;
use crate::utils::{map_indices, validate_non_empty};

/// Dilation response of one window.
///
/// Returns the maximum of `window[i] * kernel[i]` if it is strictly greater
/// than `threshold`, otherwise `center_value`. Integer products are exact
/// (see [`Widened`](crate::Widened)) and the result saturates into `P`.
///
/// # Panics
///
/// If `window` and `kernel` differ in length.
pub fn dilation_evaluate<P, K>(window: &[P], kernel: &[K], center_value: P, threshold: P) -> P
where
    P: Scalar + Bounded,
    K: Scalar,
{
    assert_eq!(
        window.len(),
        kernel.len(),
        "window and structuring element must have the same shape"
    );

    let max_product = window
        .iter()
        .zip(kernel)
        .map(|(&w, &k)| w.widen().saturating_mul(k.widen()))
        .reduce(|max, product| if product.exceeds(max) { product } else { max });

    match max_product {
        Some(product) if product.exceeds(threshold.widen()) => product.saturate(),
        _ => center_value,
    }
}

/// Whole-image dilation with a structuring element and a threshold.
#[derive(Debug, Clone)]
pub struct BinaryDilationFilter<P, K, const N: usize> {
    kernel: KernelOperator<K, N>,
    threshold: P,
    boundary: BoundaryCondition<P>,
}

impl<P, K, const N: usize> BinaryDilationFilter<P, K, N>
where
    P: Scalar + Bounded,
    K: Scalar,
{
    /// Create a filter; outside reads use the zero-flux Neumann condition.
    pub const fn new(kernel: KernelOperator<K, N>, threshold: P) -> Self {
        Self {
            kernel,
            threshold,
            boundary: BoundaryCondition::ZeroFluxNeumann,
        }
    }

    /// Replace the boundary condition.
    #[must_use]
    pub fn with_boundary(mut self, boundary: BoundaryCondition<P>) -> Self {
        self.boundary = boundary;
        self
    }

    #[inline]
    pub const fn kernel(&self) -> &KernelOperator<K, N> {
        &self.kernel
    }

    #[inline]
    pub const fn threshold(&self) -> P {
        self.threshold
    }

    /// Dilation response at `center`.
    ///
    /// # Errors
    ///
    /// * `FilterError::Neighborhood` - if the window cannot be extracted
    pub fn evaluate_at<I>(&self, image: &I, center: &[isize; N]) -> Result<P, FilterError>
    where
        I: ImageAccess<N, Pixel = P> + ?Sized,
    {
        let window = Neighborhood::extract(image, center, self.kernel.radius(), &self.boundary)?;
        Ok(dilation_evaluate(
            window.values(),
            self.kernel.coefficients(),
            window.center_value(),
            self.threshold,
        ))
    }

    /// Dilate every pixel of `image`.
    ///
    /// # Errors
    ///
    /// * `FilterError::EmptyImage` - if the image has no pixels
    pub fn apply<I>(&self, image: &I) -> Result<NdImage<P, N>, FilterError>
    where
        I: ImageAccess<N, Pixel = P> + Sync + ?Sized,
    {
        let size = image.size();
        validate_non_empty(&size)?;
        debug!(
            ?size,
            radius = ?self.kernel.radius(),
            threshold = ?self.threshold,
            "applying dilation"
        );

        let data = map_indices(&size, |index| self.evaluate_at(image, &index))?;
        Ok(NdImage::from_parts(size, data, image.origin(), image.spacing()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imageops_nd::operator::KernelFamily;
    use crate::test_utils::create_binary_image;

    #[test]
    fn threshold_gate_is_strict() {
        let window = [0i32, 5, 0];
        let kernel = [1i32, 1, 1];
        assert_eq!(dilation_evaluate(&window, &kernel, 0, 4), 5);
        assert_eq!(dilation_evaluate(&window, &kernel, 0, 5), 0);
    }

    #[test]
    fn zero_kernel_keeps_the_center() {
        let window = [9u8, 200, 3];
        assert_eq!(dilation_evaluate(&window, &[0u8, 0, 0], 3, 0), 3);
    }

    #[test]
    fn products_saturate_into_the_pixel_type() {
        assert_eq!(dilation_evaluate(&[200u8, 10], &[2u8, 1], 10, 0), 255);
    }

    #[test]
    fn sixty_four_bit_products_are_exact() {
        let big = (1i64 << 53) + 1;
        assert_eq!(dilation_evaluate(&[big], &[1i64], 0, 0), big);
        assert_eq!(dilation_evaluate(&[big], &[1i64], 7, big - 1), big);
        assert_eq!(dilation_evaluate(&[big], &[1i64], 7, big), 7);
        assert_eq!(dilation_evaluate(&[u64::MAX, 3], &[2u64, 1], 0, 0), u64::MAX);
    }

    #[test]
    fn constant_window_scales_by_the_max_coefficient() {
        let window = [4.0f32; 5];
        let kernel = [0.5f32, 1.0, 2.0, 1.0, 0.5];
        assert_eq!(dilation_evaluate(&window, &kernel, 4.0, 7.0), 8.0);
        assert_eq!(dilation_evaluate(&window, &kernel, 4.0, 8.0), 4.0);
    }

    #[test]
    #[should_panic]
    fn shape_mismatch_panics() {
        let _ = dilation_evaluate(&[1u8, 2], &[1u8], 1, 0);
    }

    #[test]
    fn binary_dilation_grows_a_point() {
        let img = create_binary_image([5, 5], &[[2, 2]], 255);
        let kernel = KernelOperator::<u8, 2>::uniform(KernelFamily::Flat, [1, 1]).unwrap();
        let result = BinaryDilationFilter::new(kernel, 0u8).apply(&img).unwrap();

        for y in 0..5isize {
            for x in 0..5isize {
                let expected = if (1..=3).contains(&x) && (1..=3).contains(&y) {
                    255
                } else {
                    0
                };
                assert_eq!(result.value_at(&[x, y]), expected, "at ({x}, {y})");
            }
        }
    }

    #[test]
    fn cross_element_only_covers_its_arms() {
        let img = create_binary_image([5, 5], &[[2, 2]], 1);
        let cross = KernelOperator::<u8, 2>::from_coefficients(
            [1, 1],
            vec![0, 1, 0, 1, 1, 1, 0, 1, 0],
        )
        .unwrap();
        let result = BinaryDilationFilter::new(cross, 0u8).apply(&img).unwrap();
        assert_eq!(result.value_at(&[2, 1]), 1);
        assert_eq!(result.value_at(&[1, 2]), 1);
        assert_eq!(result.value_at(&[1, 1]), 0);
    }

    #[test]
    fn constant_boundary_feeds_edge_pixels() {
        let img = NdImage::from_pixel([3], 0i16);
        let kernel = KernelOperator::<i16, 1>::uniform(KernelFamily::Flat, [1]).unwrap();
        let result = BinaryDilationFilter::new(kernel, 0i16)
            .with_boundary(BoundaryCondition::Constant(7))
            .apply(&img)
            .unwrap();
        assert_eq!(result.pixels(), &[7, 0, 7]);
    }

    #[test]
    fn empty_image_is_rejected() {
        let img = NdImage::from_pixel([0, 4], 0u8);
        let kernel = KernelOperator::<u8, 2>::uniform(KernelFamily::Flat, [1, 1]).unwrap();
        let result = BinaryDilationFilter::new(kernel, 0u8).apply(&img);
        assert!(matches!(result, Err(FilterError::EmptyImage { .. })));
    }
}
