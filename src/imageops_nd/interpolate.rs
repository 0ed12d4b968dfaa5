//! Sampling an image at continuous positions.
//!
//! An interpolator borrows an image and supplies one strategy, [`sample`],
//! that maps a continuous index to a real-valued pixel. The checked entry
//! points built on top of it reject positions outside `[0, size - 1]`.
//! Corner reads always go through a [`BoundaryCondition`], so even the
//! unchecked strategy never reads outside the buffer.
//!
//! [`sample`]: InterpolateImageFunction::sample

use std::fmt;
use std::str::FromStr;

use num_traits::AsPrimitive;
use tracing::trace;

use crate::error::InterpolationError;
use crate::imageops_nd::boundary::BoundaryCondition;
use crate::imageops_nd::image::{ContinuousIndex, ImageAccess, Index, Point};
use crate::imageops_nd::pixel::{to_real, PixelValue, RealPixel};

/// Real-valued pixel produced by interpolating an image of type `I`.
pub type InterpolatedPixel<I, const N: usize> = RealPixel<<I as ImageAccess<N>>::Pixel>;

/// Evaluates an image at non-grid positions.
pub trait InterpolateImageFunction<const N: usize> {
    /// Image being sampled
    type Image: ImageAccess<N>;

    fn image(&self) -> &Self::Image;

    /// Interpolated value at `index` without a bounds check.
    ///
    /// Positions outside the buffer are answered through the boundary
    /// condition of the interpolator. Coordinates beyond the `isize` range
    /// saturate to its ends before the boundary maps them. Non-finite
    /// coordinates never panic but give an unspecified value.
    fn sample(&self, index: &ContinuousIndex<N>) -> InterpolatedPixel<Self::Image, N>;

    /// Returns true if `index` lies within `[0, size - 1]` on every axis.
    #[inline]
    fn is_inside_buffer(&self, index: &ContinuousIndex<N>) -> bool {
        self.image().in_bounds_continuous(index)
    }

    /// Interpolated value at a continuous index.
    ///
    /// # Errors
    ///
    /// * `InterpolationError::OutsideBuffer` - if `index` is outside the image buffer
    fn evaluate_at_continuous_index(
        &self,
        index: &ContinuousIndex<N>,
    ) -> Result<InterpolatedPixel<Self::Image, N>, InterpolationError> {
        if !self.is_inside_buffer(index) {
            return Err(InterpolationError::OutsideBuffer {
                index: index.to_vec(),
                size: self.image().size().to_vec(),
            });
        }
        Ok(self.sample(index))
    }

    /// Interpolated value at a physical point.
    ///
    /// # Errors
    ///
    /// * `InterpolationError::OutsideBuffer` - if the point maps outside the image buffer
    fn evaluate(&self, point: &Point<N>) -> Result<InterpolatedPixel<Self::Image, N>, InterpolationError> {
        let index = self.image().point_to_continuous_index(point);
        self.evaluate_at_continuous_index(&index)
    }

    /// Pixel at a grid index, widened to real components.
    ///
    /// # Errors
    ///
    /// * `InterpolationError::IndexOutOfBounds` - if `index` is outside the image
    fn evaluate_at_index(&self, index: &Index<N>) -> Result<InterpolatedPixel<Self::Image, N>, InterpolationError> {
        let image = self.image();
        image
            .get(index)
            .map(|pixel| to_real(&pixel))
            .ok_or_else(|| InterpolationError::IndexOutOfBounds {
                index: index.to_vec(),
                size: image.size().to_vec(),
            })
    }
}

fn validate_image<I, const N: usize>(image: &I) -> Result<(), InterpolationError>
where
    I: ImageAccess<N>,
{
    if image.is_empty() {
        Err(InterpolationError::EmptyImage {
            size: image.size().to_vec(),
        })
    } else {
        Ok(())
    }
}

fn zero_pixel<P: PixelValue>() -> RealPixel<P> {
    <RealPixel<P> as PixelValue>::from_fn(|_| 0.0)
}

/// Nearest-neighbor interpolation; each coordinate rounds half up.
#[derive(Debug)]
pub struct NearestNeighborInterpolator<'a, I, const N: usize>
where
    I: ImageAccess<N>,
{
    image: &'a I,
    boundary: BoundaryCondition<I::Pixel>,
}

impl<'a, I, const N: usize> NearestNeighborInterpolator<'a, I, N>
where
    I: ImageAccess<N>,
{
    /// # Errors
    ///
    /// * `InterpolationError::EmptyImage` - if the image has no pixels
    pub fn new(image: &'a I) -> Result<Self, InterpolationError> {
        validate_image(image)?;
        Ok(Self {
            image,
            boundary: BoundaryCondition::ZeroFluxNeumann,
        })
    }

    /// Replace the boundary condition used for unchecked samples.
    #[must_use]
    pub fn with_boundary(mut self, boundary: BoundaryCondition<I::Pixel>) -> Self {
        self.boundary = boundary;
        self
    }
}

impl<I, const N: usize> InterpolateImageFunction<N> for NearestNeighborInterpolator<'_, I, N>
where
    I: ImageAccess<N>,
{
    type Image = I;

    #[inline]
    fn image(&self) -> &I {
        self.image
    }

    fn sample(&self, index: &ContinuousIndex<N>) -> InterpolatedPixel<I, N> {
        let nearest: Index<N> = std::array::from_fn(|d| (index[d] + 0.5).floor() as isize);
        self.boundary
            .resolve(self.image, &nearest)
            .map_or_else(zero_pixel::<I::Pixel>, |pixel| to_real(&pixel))
    }
}

/// Multilinear interpolation over the `2^N` grid points around a position.
///
/// Vector pixels are interpolated one component at a time. Corners with a
/// zero weight are never read, so integer positions on the upper edge do
/// not touch the boundary condition.
#[derive(Debug)]
pub struct LinearInterpolator<'a, I, const N: usize>
where
    I: ImageAccess<N>,
{
    image: &'a I,
    boundary: BoundaryCondition<I::Pixel>,
}

impl<'a, I, const N: usize> LinearInterpolator<'a, I, N>
where
    I: ImageAccess<N>,
{
    /// # Errors
    ///
    /// * `InterpolationError::EmptyImage` - if the image has no pixels
    pub fn new(image: &'a I) -> Result<Self, InterpolationError> {
        validate_image(image)?;
        Ok(Self {
            image,
            boundary: BoundaryCondition::ZeroFluxNeumann,
        })
    }

    /// Replace the boundary condition used for unchecked samples.
    #[must_use]
    pub fn with_boundary(mut self, boundary: BoundaryCondition<I::Pixel>) -> Self {
        self.boundary = boundary;
        self
    }
}

impl<I, const N: usize> InterpolateImageFunction<N> for LinearInterpolator<'_, I, N>
where
    I: ImageAccess<N>,
{
    type Image = I;

    #[inline]
    fn image(&self) -> &I {
        self.image
    }

    fn sample(&self, index: &ContinuousIndex<N>) -> InterpolatedPixel<I, N> {
        let mut base = [0isize; N];
        let mut frac = [0.0f64; N];
        for d in 0..N {
            let floor = index[d].floor();
            base[d] = floor as isize;
            frac[d] = index[d] - floor;
        }

        let mut acc = vec![0.0f64; <I::Pixel as PixelValue>::COMPONENTS];
        for corner in 0..1usize << N {
            let mut weight = 1.0;
            let mut neighbor = base;
            for d in 0..N {
                if (corner >> d) & 1 == 1 {
                    neighbor[d] = neighbor[d].saturating_add(1);
                    weight *= frac[d];
                } else {
                    weight *= 1.0 - frac[d];
                }
            }
            if weight == 0.0 {
                continue;
            }

            if let Some(pixel) = self.boundary.resolve(self.image, &neighbor) {
                for (c, slot) in acc.iter_mut().enumerate() {
                    let value: f64 = pixel.component(c).as_();
                    *slot += weight * value;
                }
            }
        }

        <InterpolatedPixel<I, N> as PixelValue>::from_fn(|c| acc[c])
    }
}

/// Interpolation families selectable at run time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InterpolationMethod {
    NearestNeighbor,
    #[default]
    Linear,
}

impl InterpolationMethod {
    /// Canonical name accepted by [`FromStr`].
    pub const fn name(self) -> &'static str {
        match self {
            Self::NearestNeighbor => "nearest",
            Self::Linear => "linear",
        }
    }
}

impl fmt::Display for InterpolationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for InterpolationMethod {
    type Err = InterpolationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nearest" | "nearest_neighbor" | "nearest-neighbor" => Ok(Self::NearestNeighbor),
            "linear" | "bilinear" | "trilinear" => Ok(Self::Linear),
            _ => Err(InterpolationError::UnknownMethod(s.to_owned())),
        }
    }
}

/// An interpolator chosen by [`InterpolationMethod`].
#[derive(Debug)]
pub enum Interpolator<'a, I, const N: usize>
where
    I: ImageAccess<N>,
{
    NearestNeighbor(NearestNeighborInterpolator<'a, I, N>),
    Linear(LinearInterpolator<'a, I, N>),
}

impl<'a, I, const N: usize> Interpolator<'a, I, N>
where
    I: ImageAccess<N>,
{
    /// # Errors
    ///
    /// * `InterpolationError::EmptyImage` - if the image has no pixels
    pub fn new(method: InterpolationMethod, image: &'a I) -> Result<Self, InterpolationError> {
        trace!(%method, size = ?image.size(), "creating interpolator");
        Ok(match method {
            InterpolationMethod::NearestNeighbor => {
                Self::NearestNeighbor(NearestNeighborInterpolator::new(image)?)
            }
            InterpolationMethod::Linear => Self::Linear(LinearInterpolator::new(image)?),
        })
    }

    pub const fn method(&self) -> InterpolationMethod {
        match self {
            Self::NearestNeighbor(_) => InterpolationMethod::NearestNeighbor,
            Self::Linear(_) => InterpolationMethod::Linear,
        }
    }

    /// Replace the boundary condition used for unchecked samples.
    #[must_use]
    pub fn with_boundary(self, boundary: BoundaryCondition<I::Pixel>) -> Self {
        match self {
            Self::NearestNeighbor(inner) => Self::NearestNeighbor(inner.with_boundary(boundary)),
            Self::Linear(inner) => Self::Linear(inner.with_boundary(boundary)),
        }
    }
}

impl<I, const N: usize> InterpolateImageFunction<N> for Interpolator<'_, I, N>
where
    I: ImageAccess<N>,
{
    type Image = I;

    fn image(&self) -> &I {
        match self {
            Self::NearestNeighbor(inner) => inner.image(),
            Self::Linear(inner) => inner.image(),
        }
    }

    fn sample(&self, index: &ContinuousIndex<N>) -> InterpolatedPixel<I, N> {
        match self {
            Self::NearestNeighbor(inner) => inner.sample(index),
            Self::Linear(inner) => inner.sample(index),
        }
    }
}
