use std::marker::PhantomData;

use num_traits::AsPrimitive;
use tracing::debug;

use crate::error::FilterError;
use crate::imageops_nd::boundary::BoundaryCondition;
use crate::imageops_nd::image::{ImageAccess, Index, NdImage};
use crate::imageops_nd::inner_product::neighborhood_inner_product;
use crate::imageops_nd::neighborhood::Neighborhood;
use crate::imageops_nd::operator::{KernelFamily, KernelOperator};
use crate::imageops_nd::pixel::{PixelValue, Scalar};
use crate::utils::{map_indices, validate_non_empty};

/// Applies a kernel operator at every pixel by inner product.
///
/// This covers convolution-style filtering and derivative estimation. The
/// output component type `O` is chosen independently of the pixel and
/// coefficient types; vector pixels produce vector outputs.
#[derive(Debug, Clone)]
pub struct NeighborhoodOperatorFilter<P, K, O, const N: usize> {
    operator: KernelOperator<K, N>,
    boundary: BoundaryCondition<P>,
    output: PhantomData<O>,
}

impl<P, K, O, const N: usize> NeighborhoodOperatorFilter<P, K, O, N>
where
    P: PixelValue,
    P::Component: AsPrimitive<O>,
    K: Scalar + AsPrimitive<O>,
    O: Scalar,
{
    /// Create a filter; outside reads use the zero-flux Neumann condition.
    pub const fn new(operator: KernelOperator<K, N>) -> Self {
        Self {
            operator,
            boundary: BoundaryCondition::ZeroFluxNeumann,
            output: PhantomData,
        }
    }

    /// Replace the boundary condition.
    #[must_use]
    pub fn with_boundary(mut self, boundary: BoundaryCondition<P>) -> Self {
        self.boundary = boundary;
        self
    }

    #[inline]
    pub const fn operator(&self) -> &KernelOperator<K, N> {
        &self.operator
    }

    /// Operator response at `center`.
    ///
    /// # Errors
    ///
    /// * `FilterError::Neighborhood` - if the window cannot be extracted
    pub fn evaluate_at<I>(&self, image: &I, center: &Index<N>) -> Result<P::Retyped<O>, FilterError>
    where
        I: ImageAccess<N, Pixel = P> + ?Sized,
    {
        let window = Neighborhood::extract(image, center, self.operator.radius(), &self.boundary)?;
        Ok(neighborhood_inner_product(&window, &self.operator)?)
    }

    /// Filter every pixel of `image`.
    ///
    /// # Errors
    ///
    /// * `FilterError::EmptyImage` - if the image has no pixels
    pub fn apply<I>(&self, image: &I) -> Result<NdImage<P::Retyped<O>, N>, FilterError>
    where
        I: ImageAccess<N, Pixel = P> + Sync + ?Sized,
    {
        let size = image.size();
        validate_non_empty(&size)?;
        debug!(
            ?size,
            radius = ?self.operator.radius(),
            direction = ?self.operator.direction(),
            "applying neighborhood operator"
        );

        let data = map_indices(&size, |index| self.evaluate_at(image, &index))?;
        Ok(NdImage::from_parts(size, data, image.origin(), image.spacing()))
    }
}

/// Derivative estimate along `direction` with the given difference family.
///
/// # Errors
///
/// * `FilterError::Kernel` - if `direction` is not an axis of the image
/// * `FilterError::EmptyImage` - if the image has no pixels
pub fn directional_derivative<I, P, const N: usize>(
    image: &I,
    family: KernelFamily,
    direction: usize,
) -> Result<NdImage<P::Retyped<f64>, N>, FilterError>
where
    I: ImageAccess<N, Pixel = P> + Sync + ?Sized,
    P: PixelValue,
{
    let operator = KernelOperator::<f64, N>::create_directional(family, direction)?;
    NeighborhoodOperatorFilter::<P, f64, f64, N>::new(operator).apply(image)
}
