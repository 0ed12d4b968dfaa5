//! N-dimensional image container and the read interface shared by
//! windows, filters and interpolators.

use image::{ImageBuffer, Luma, Rgb, Rgba};
use imageproc::definitions::Image;

use crate::error::ImageError;
use crate::imageops_nd::pixel::{PixelValue, Scalar};

/// Integer grid coordinate. Axis 0 varies fastest in memory.
pub type Index<const N: usize> = [isize; N];

/// Real-valued grid coordinate.
pub type ContinuousIndex<const N: usize> = [f64; N];

/// Physical position.
pub type Point<const N: usize> = [f64; N];

/// Read access to an N-dimensional grid of pixels.
pub trait ImageAccess<const N: usize> {
    /// Pixel type stored at each grid position
    type Pixel: PixelValue;

    /// Extent along every axis.
    fn size(&self) -> [usize; N];

    /// Pixel at `index`.
    ///
    /// # Panics
    ///
    /// If `index` is outside the image. Check with [`in_bounds`](Self::in_bounds)
    /// or go through a [`BoundaryCondition`](crate::BoundaryCondition).
    fn value_at(&self, index: &Index<N>) -> Self::Pixel;

    /// Returns true if `index` addresses a pixel of the image.
    #[inline]
    fn in_bounds(&self, index: &Index<N>) -> bool {
        index
            .iter()
            .zip(self.size())
            .all(|(&i, len)| i >= 0 && (i as usize) < len)
    }

    /// Returns true if `index` lies within `[0, size - 1]` on every axis.
    #[inline]
    fn in_bounds_continuous(&self, index: &ContinuousIndex<N>) -> bool {
        index
            .iter()
            .zip(self.size())
            .all(|(&i, len)| len > 0 && i >= 0.0 && i <= (len - 1) as f64)
    }

    /// Physical position of index zero.
    #[inline]
    fn origin(&self) -> [f64; N] {
        [0.0; N]
    }

    /// Physical distance between neighboring pixels along every axis.
    #[inline]
    fn spacing(&self) -> [f64; N] {
        [1.0; N]
    }

    /// Maps a physical point to a continuous index.
    #[inline]
    fn point_to_continuous_index(&self, point: &Point<N>) -> ContinuousIndex<N> {
        let origin = self.origin();
        let spacing = self.spacing();
        std::array::from_fn(|d| (point[d] - origin[d]) / spacing[d])
    }

    /// Pixel at `index`, or `None` outside the image.
    #[inline]
    fn get(&self, index: &Index<N>) -> Option<Self::Pixel> {
        self.in_bounds(index).then(|| self.value_at(index))
    }

    /// Returns true if some axis has zero extent.
    #[inline]
    fn is_empty(&self) -> bool {
        self.size().iter().any(|&len| len == 0)
    }
}

/// Owned N-dimensional image with physical geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct NdImage<P, const N: usize> {
    size: [usize; N],
    data: Vec<P>,
    origin: [f64; N],
    spacing: [f64; N],
}

impl<P: PixelValue, const N: usize> NdImage<P, N> {
    /// Create an image filled with `pixel`.
    pub fn from_pixel(size: [usize; N], pixel: P) -> Self {
        Self {
            size,
            data: vec![pixel; size.iter().product()],
            origin: [0.0; N],
            spacing: [1.0; N],
        }
    }

    /// Create an image whose pixel at each index is `f(index)`.
    pub fn from_fn<F>(size: [usize; N], mut f: F) -> Self
    where
        F: FnMut(Index<N>) -> P,
    {
        let len = size.iter().product();
        let data = (0..len).map(|linear| f(unravel_index(linear, &size))).collect();
        Self {
            size,
            data,
            origin: [0.0; N],
            spacing: [1.0; N],
        }
    }

    /// Create an image from a buffer laid out with axis 0 fastest.
    ///
    /// # Errors
    ///
    /// * `ImageError::BufferLengthMismatch` - if `data.len()` differs from the extent product
    pub fn from_vec(size: [usize; N], data: Vec<P>) -> Result<Self, ImageError> {
        let expected: usize = size.iter().product();
        if data.len() != expected {
            return Err(ImageError::BufferLengthMismatch {
                size: size.to_vec(),
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            size,
            data,
            origin: [0.0; N],
            spacing: [1.0; N],
        })
    }

    /// Replace the physical geometry.
    ///
    /// # Errors
    ///
    /// * `ImageError::InvalidOrigin` - if an origin component is not finite
    /// * `ImageError::InvalidSpacing` - if a spacing component is not finite and positive
    pub fn with_geometry(mut self, origin: [f64; N], spacing: [f64; N]) -> Result<Self, ImageError> {
        for (axis, &o) in origin.iter().enumerate() {
            if !o.is_finite() {
                return Err(ImageError::InvalidOrigin { axis, origin: o });
            }
        }
        for (axis, &s) in spacing.iter().enumerate() {
            if !s.is_finite() || s <= 0.0 {
                return Err(ImageError::InvalidSpacing { axis, spacing: s });
            }
        }
        self.origin = origin;
        self.spacing = spacing;
        Ok(self)
    }

    /// Number of pixels.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Pixels in memory order.
    #[inline]
    pub fn pixels(&self) -> &[P] {
        &self.data
    }

    #[inline]
    pub fn into_vec(self) -> Vec<P> {
        self.data
    }

    /// Pixel at `index`, or `None` outside the image.
    #[inline]
    pub fn get_pixel(&self, index: &Index<N>) -> Option<&P> {
        self.linear_index(index).map(|i| &self.data[i])
    }

    /// Overwrite the pixel at `index`. Returns false outside the image.
    #[inline]
    pub fn put_pixel(&mut self, index: &Index<N>, pixel: P) -> bool {
        match self.linear_index(index) {
            Some(i) => {
                self.data[i] = pixel;
                true
            }
            None => false,
        }
    }

    /// Apply `f` to every pixel, keeping extent and geometry.
    pub fn map<Q, F>(&self, f: F) -> NdImage<Q, N>
    where
        Q: PixelValue,
        F: FnMut(&P) -> Q,
    {
        NdImage {
            size: self.size,
            data: self.data.iter().map(f).collect(),
            origin: self.origin,
            spacing: self.spacing,
        }
    }

    /// Linear buffer offset of `index`, or `None` outside the image.
    #[inline]
    pub fn linear_index(&self, index: &Index<N>) -> Option<usize> {
        let mut offset = 0usize;
        let mut stride = 1usize;
        for (&i, &len) in index.iter().zip(self.size.iter()) {
            if i < 0 || i as usize >= len {
                return None;
            }
            offset += i as usize * stride;
            stride *= len;
        }
        Some(offset)
    }

    pub(crate) fn from_parts(size: [usize; N], data: Vec<P>, origin: [f64; N], spacing: [f64; N]) -> Self {
        Self {
            size,
            data,
            origin,
            spacing,
        }
    }
}

impl<P: PixelValue, const N: usize> ImageAccess<N> for NdImage<P, N> {
    type Pixel = P;

    #[inline]
    fn size(&self) -> [usize; N] {
        self.size
    }

    #[inline]
    fn value_at(&self, index: &Index<N>) -> P {
        match self.linear_index(index) {
            Some(i) => self.data[i],
            None => panic!("index {index:?} is outside an image of extent {:?}", self.size),
        }
    }

    #[inline]
    fn origin(&self) -> [f64; N] {
        self.origin
    }

    #[inline]
    fn spacing(&self) -> [f64; N] {
        self.spacing
    }
}

/// Converts a linear buffer offset into an index (axis 0 fastest).
#[inline]
pub fn unravel_index<const N: usize>(mut linear: usize, size: &[usize; N]) -> Index<N> {
    let mut index = [0isize; N];
    for (slot, &len) in index.iter_mut().zip(size.iter()) {
        if len == 0 {
            break;
        }
        *slot = (linear % len) as isize;
        linear /= len;
    }
    index
}

impl<T: Scalar> NdImage<T, 2> {
    /// Copy a grayscale `image` buffer; index order is `[x, y]`.
    pub fn from_luma(image: &Image<Luma<T>>) -> Self {
        let (width, height) = image.dimensions();
        Self::from_fn([width as usize, height as usize], |[x, y]| {
            image.get_pixel(x as u32, y as u32).0[0]
        })
    }

    /// Copy into a grayscale `image` buffer.
    pub fn to_luma_image(&self) -> Image<Luma<T>> {
        let [width, height] = self.size;
        ImageBuffer::from_fn(width as u32, height as u32, |x, y| {
            Luma([self.value_at(&[x as isize, y as isize])])
        })
    }
}

impl<T: Scalar> ImageAccess<2> for ImageBuffer<Luma<T>, Vec<T>> {
    type Pixel = T;

    #[inline]
    fn size(&self) -> [usize; 2] {
        [self.width() as usize, self.height() as usize]
    }

    #[inline]
    fn value_at(&self, index: &Index<2>) -> T {
        self.get_pixel(index[0] as u32, index[1] as u32).0[0]
    }
}

/// Implements ImageAccess<2> for a multi-channel `image` pixel type.
///
/// `Rgb` and `Rgba` only implement `Pixel` for component types the `image`
/// crate can enlarge, so these are listed per component type.
macro_rules! impl_image_access_for_buffer {
    ($pixel:ident, $channels:literal: $($type:ty),* $(,)?) => {
        $(
            impl ImageAccess<2> for ImageBuffer<$pixel<$type>, Vec<$type>> {
                type Pixel = [$type; $channels];

                #[inline]
                fn size(&self) -> [usize; 2] {
                    [self.width() as usize, self.height() as usize]
                }

                #[inline]
                fn value_at(&self, index: &Index<2>) -> [$type; $channels] {
                    self.get_pixel(index[0] as u32, index[1] as u32).0
                }
            }
        )*
    };
}

impl_image_access_for_buffer!(Rgb, 3: u8, u16, u32, u64, usize, i8, i16, i32, i64, isize, f32, f64);
impl_image_access_for_buffer!(Rgba, 4: u8, u16, u32, u64, usize, i8, i16, i32, i64, isize, f32, f64);
