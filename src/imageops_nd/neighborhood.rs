//! Neighborhood windows around a center index.

use itertools::Itertools;

use crate::error::NeighborhoodError;
use crate::imageops_nd::boundary::BoundaryCondition;
use crate::imageops_nd::image::{ImageAccess, Index};
use crate::imageops_nd::pixel::PixelValue;

/// Strided selection of window elements: `start, start + stride, ...` (`count` elements).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NeighborhoodSlice {
    pub start: usize,
    pub count: usize,
    pub stride: usize,
}

impl NeighborhoodSlice {
    pub const fn new(start: usize, count: usize, stride: usize) -> Self {
        Self {
            start,
            count,
            stride,
        }
    }

    /// Slice covering `len` consecutive elements.
    pub const fn full(len: usize) -> Self {
        Self::new(0, len, 1)
    }

    /// Offset of the last selected element, or `None` for an empty slice.
    #[inline]
    pub const fn last(&self) -> Option<usize> {
        if self.count == 0 {
            None
        } else {
            Some(self.start + (self.count - 1) * self.stride)
        }
    }

    /// Selected offsets in order.
    #[inline]
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.count).map(move |k| self.start + k * self.stride)
    }
}

/// Number of elements in a window of the given radius.
#[inline]
pub fn window_len<const N: usize>(radius: &[usize; N]) -> usize {
    radius.iter().map(|r| 2 * r + 1).product()
}

/// Stride of `axis` in a window of the given radius (axis 0 fastest).
#[inline]
pub fn window_stride<const N: usize>(radius: &[usize; N], axis: usize) -> usize {
    radius[..axis].iter().map(|r| 2 * r + 1).product()
}

/// Slice through the window center along `axis`.
#[inline]
pub fn axis_slice<const N: usize>(radius: &[usize; N], axis: usize) -> NeighborhoodSlice {
    let stride = window_stride(radius, axis);
    let center = window_len(radius) / 2;
    NeighborhoodSlice::new(center - radius[axis] * stride, 2 * radius[axis] + 1, stride)
}

/// Offsets relative to the center for every window element, in window order.
pub fn window_offsets<const N: usize>(radius: &[usize; N]) -> impl Iterator<Item = Index<N>> + '_ {
    (0..window_len(radius)).map(move |mut linear| {
        let mut offset = [0isize; N];
        for (slot, &r) in offset.iter_mut().zip(radius.iter()) {
            let extent = 2 * r + 1;
            *slot = (linear % extent) as isize - r as isize;
            linear /= extent;
        }
        offset
    })
}

/// Pixel values in a `(2r + 1)^N` block around a center index.
#[derive(Debug, Clone, PartialEq)]
pub struct Neighborhood<P, const N: usize> {
    radius: [usize; N],
    values: Vec<P>,
}

impl<P: PixelValue, const N: usize> Neighborhood<P, N> {
    /// Wrap existing window values.
    ///
    /// # Errors
    ///
    /// * `NeighborhoodError::SizeMismatch` - if `values` does not match the radius
    pub fn new(radius: [usize; N], values: Vec<P>) -> Result<Self, NeighborhoodError> {
        let expected = window_len(&radius);
        if values.len() != expected {
            return Err(NeighborhoodError::SizeMismatch {
                radius: radius.to_vec(),
                expected,
                actual: values.len(),
            });
        }
        Ok(Self { radius, values })
    }

    /// Gather the window around `center`, resolving outside reads through `boundary`.
    ///
    /// # Errors
    ///
    /// * `NeighborhoodError::EmptyImage` - if the image is empty and `boundary` is not constant
    pub fn extract<I>(
        image: &I,
        center: &Index<N>,
        radius: [usize; N],
        boundary: &BoundaryCondition<P>,
    ) -> Result<Self, NeighborhoodError>
    where
        I: ImageAccess<N, Pixel = P> + ?Sized,
    {
        let size = image.size();
        let interior = center
            .iter()
            .zip(radius.iter())
            .zip(size.iter())
            .all(|((&c, &r), &len)| c - r as isize >= 0 && c + (r as isize) < len as isize);

        let values = if interior {
            window_offsets(&radius)
                .map(|offset| image.value_at(&add_offset(center, &offset)))
                .collect()
        } else {
            window_offsets(&radius)
                .map(|offset| boundary.resolve(image, &add_offset(center, &offset)))
                .collect::<Option<Vec<_>>>()
                .ok_or_else(|| NeighborhoodError::EmptyImage {
                    size: size.to_vec(),
                })?
        };

        Ok(Self { radius, values })
    }

    #[inline]
    pub const fn radius(&self) -> [usize; N] {
        self.radius
    }

    /// Extent along every axis (`2r + 1`).
    #[inline]
    pub fn size(&self) -> [usize; N] {
        self.radius.map(|r| 2 * r + 1)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline]
    pub fn values(&self) -> &[P] {
        &self.values
    }

    #[inline]
    pub fn center_value(&self) -> P {
        self.values[self.values.len() / 2]
    }

    /// See [`window_stride`].
    #[inline]
    pub fn stride(&self, axis: usize) -> usize {
        window_stride(&self.radius, axis)
    }

    /// See [`axis_slice`].
    #[inline]
    pub fn axis_slice(&self, axis: usize) -> NeighborhoodSlice {
        axis_slice(&self.radius, axis)
    }

    /// Values of component `c` in window order.
    pub fn component_values(&self, c: usize) -> Vec<P::Component> {
        self.values.iter().map(|p| p.component(c)).collect()
    }

    /// All components, pixel-major: `[p0.c0, p0.c1, ..., p1.c0, ...]`.
    ///
    /// Component `c` is the slice `(c, len, COMPONENTS)` of this buffer.
    pub fn interleaved_components(&self) -> Vec<P::Component> {
        self.values
            .iter()
            .flat_map(|p| (0..P::COMPONENTS).map(move |c| p.component(c)))
            .collect_vec()
    }

    /// Slice selecting component `c` from [`interleaved_components`](Self::interleaved_components).
    #[inline]
    pub fn component_slice(&self, c: usize) -> NeighborhoodSlice {
        NeighborhoodSlice::new(c, self.values.len(), P::COMPONENTS)
    }
}

#[inline]
fn add_offset<const N: usize>(center: &Index<N>, offset: &Index<N>) -> Index<N> {
    std::array::from_fn(|d| center[d] + offset[d])
}
