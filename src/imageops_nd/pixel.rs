//! Scalar and vector pixel abstractions.
//!
//! Every pixel is a fixed number of numeric components. Scalars are
//! single-component pixels, `[T; C]` arrays are `C`-component vectors.

use std::fmt::Debug;

use image::Primitive;
use num_traits::{AsPrimitive, Bounded, NumCast};

/// Numeric component type usable in windows, kernels and accumulators.
///
/// Implemented for the primitive integer and floating point types.
pub trait Scalar: Primitive + AsPrimitive<f64> + Debug + Send + Sync + 'static {
    /// Lossless widening used for exact products and comparisons.
    fn widen(self) -> Widened;
}

/// A scalar widened so that integer arithmetic stays exact.
///
/// Integers of every width fit in `i128`; floats stay `f64`. Mixing the
/// two falls back to `f64`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Widened {
    Integer(i128),
    Real(f64),
}

impl Widened {
    #[inline]
    pub fn to_f64(self) -> f64 {
        match self {
            Self::Integer(v) => v as f64,
            Self::Real(v) => v,
        }
    }

    /// Product, saturating on integer overflow.
    #[inline]
    pub fn saturating_mul(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Self::Integer(a), Self::Integer(b)) => Self::Integer(a.saturating_mul(b)),
            (a, b) => Self::Real(a.to_f64() * b.to_f64()),
        }
    }

    /// Strict `>`; NaN never exceeds anything.
    #[inline]
    pub fn exceeds(self, rhs: Self) -> bool {
        match (self, rhs) {
            (Self::Integer(a), Self::Integer(b)) => a > b,
            (a, b) => a.to_f64() > b.to_f64(),
        }
    }

    /// Converts into `T`, clamping at the bounds of `T`.
    pub fn saturate<T: Scalar + Bounded>(self) -> T {
        let cast = match self {
            Self::Integer(v) => <T as NumCast>::from(v),
            Self::Real(v) => <T as NumCast>::from(v),
        };
        cast.unwrap_or_else(|| {
            let negative = match self {
                Self::Integer(v) => v < 0,
                Self::Real(v) => v.is_sign_negative(),
            };
            if negative {
                T::min_value()
            } else {
                T::max_value()
            }
        })
    }
}

/// Macro to implement Scalar for the primitive numeric types.
macro_rules! impl_scalar {
    (integer: $($type:ty),* $(,)?) => {
        $(impl Scalar for $type {
            #[inline]
            fn widen(self) -> Widened {
                Widened::Integer(self as i128)
            }
        })*
    };
    (float: $($type:ty),* $(,)?) => {
        $(impl Scalar for $type {
            #[inline]
            fn widen(self) -> Widened {
                Widened::Real(self as f64)
            }
        })*
    };
}

impl_scalar!(integer: u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);
impl_scalar!(float: f32, f64);

/// A pixel value made of `COMPONENTS` scalar components.
pub trait PixelValue: Copy + Debug + Send + Sync + 'static {
    /// Component type
    type Component: Scalar;

    /// The same pixel shape with a different component type
    type Retyped<O: Scalar>: PixelValue<Component = O>;

    /// Number of components
    const COMPONENTS: usize;

    /// Component `c`.
    ///
    /// # Panics
    ///
    /// If `c >= COMPONENTS`.
    fn component(&self, c: usize) -> Self::Component;

    /// Builds a pixel from a per-component generator.
    fn from_fn<F>(f: F) -> Self
    where
        F: FnMut(usize) -> Self::Component;

    /// Applies `f` to every component.
    #[inline]
    fn map_components<O, F>(&self, mut f: F) -> Self::Retyped<O>
    where
        O: Scalar,
        F: FnMut(Self::Component) -> O,
    {
        <Self::Retyped<O> as PixelValue>::from_fn(|c| f(self.component(c)))
    }
}

impl<T: Scalar> PixelValue for T {
    type Component = T;
    type Retyped<O: Scalar> = O;

    const COMPONENTS: usize = 1;

    #[inline]
    fn component(&self, c: usize) -> T {
        assert_eq!(c, 0, "scalar pixels have a single component");
        *self
    }

    #[inline]
    fn from_fn<F>(mut f: F) -> Self
    where
        F: FnMut(usize) -> T,
    {
        f(0)
    }
}

impl<T: Scalar, const C: usize> PixelValue for [T; C] {
    type Component = T;
    type Retyped<O: Scalar> = [O; C];

    const COMPONENTS: usize = C;

    #[inline]
    fn component(&self, c: usize) -> T {
        self[c]
    }

    #[inline]
    fn from_fn<F>(f: F) -> Self
    where
        F: FnMut(usize) -> T,
    {
        std::array::from_fn(f)
    }
}

/// Real-valued counterpart of a pixel type, used as interpolation output.
pub type RealPixel<P> = <P as PixelValue>::Retyped<f64>;

/// Casts every component of `pixel` to `f64`.
#[inline]
pub fn to_real<P: PixelValue>(pixel: &P) -> RealPixel<P> {
    pixel.map_components::<f64, _>(|v| v.as_())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widened_integer_products_are_exact() {
        let big = (1i64 << 53) + 1;
        let product = big.widen().saturating_mul(1i64.widen());
        assert_eq!(product, Widened::Integer(<i128 as From<_>>::from(big)));
        assert!(product.exceeds((big - 1).widen()));
        assert_eq!(product.saturate::<i64>(), big);
    }

    #[test]
    fn widened_values_saturate_into_narrow_types() {
        assert_eq!(Widened::Integer(300).saturate::<u8>(), 255);
        assert_eq!(Widened::Integer(-7).saturate::<u16>(), 0);
        assert_eq!(Widened::Real(1e20).saturate::<i32>(), i32::MAX);
        assert_eq!(u64::MAX.widen().saturating_mul(u64::MAX.widen()).saturate::<u64>(), u64::MAX);
    }

    #[test]
    fn mixed_widened_values_compare_as_reals() {
        let product = 3u8.widen().saturating_mul(0.5f64.widen());
        assert_eq!(product, Widened::Real(1.5));
        assert!(product.exceeds(1u8.widen()));
        assert!(!Widened::Real(f64::NAN).exceeds(0u8.widen()));
    }

    #[test]
    fn scalar_pixel_has_one_component() {
        assert_eq!(<u8 as PixelValue>::COMPONENTS, 1);
        assert_eq!(7u8.component(0), 7);
        let built: i16 = PixelValue::from_fn(|_| -3);
        assert_eq!(built, -3);
    }

    #[test]
    fn vector_pixel_components_follow_array_order() {
        let p = [10u16, 20, 30];
        assert_eq!(<[u16; 3] as PixelValue>::COMPONENTS, 3);
        assert_eq!(p.component(2), 30);
        let doubled: [u32; 3] = p.map_components(|v| <u32 as From<_>>::from(v) * 2);
        assert_eq!(doubled, [20, 40, 60]);
    }

    #[test]
    fn to_real_widens_every_component() {
        assert_eq!(to_real(&200u8), 200.0);
        assert_eq!(to_real(&[1i8, -2]), [1.0, -2.0]);
    }

    #[test]
    #[should_panic]
    fn scalar_component_out_of_range_panics() {
        let _ = 1.0f32.component(1);
    }
}
