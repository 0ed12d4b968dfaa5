//! Inner product between neighborhood windows and kernel operators.
//!
//! The output scalar type is chosen by the caller independently of the
//! window and kernel types. Both operands are cast into it before the
//! multiplication, so a wide output avoids precision loss on narrow inputs.

use num_traits::AsPrimitive;

use crate::error::InnerProductError;
use crate::imageops_nd::neighborhood::{Neighborhood, NeighborhoodSlice};
use crate::imageops_nd::operator::KernelOperator;
use crate::imageops_nd::pixel::{PixelValue, Scalar};

/// `Σ window[i] * kernel[i]` accumulated in `O`.
///
/// # Errors
///
/// * `InnerProductError::LengthMismatch` - if the operands differ in length
///
/// # Examples
///
/// ```
/// use imageops_nd::inner_product;
///
/// let value: i32 = inner_product(&[1u8, 2, 3], &[1i8, 0, -1]).unwrap();
/// assert_eq!(value, -2);
/// ```
pub fn inner_product<O, W, K>(window: &[W], kernel: &[K]) -> Result<O, InnerProductError>
where
    O: Scalar,
    W: AsPrimitive<O>,
    K: AsPrimitive<O>,
{
    if window.len() != kernel.len() {
        return Err(InnerProductError::LengthMismatch {
            window: window.len(),
            kernel: kernel.len(),
        });
    }
    Ok(window
        .iter()
        .zip(kernel)
        .fold(O::zero(), |acc, (&w, &k)| {
            let w: O = w.as_();
            let k: O = k.as_();
            acc + w * k
        }))
}

/// Inner product of the window elements selected by `slice` with `kernel`.
///
/// The kernel is consumed sequentially and must hold exactly `slice.count`
/// coefficients.
///
/// # Errors
///
/// * `InnerProductError::LengthMismatch` - if `kernel.len() != slice.count`
/// * `InnerProductError::ZeroStride` - if the slice repeats one element
/// * `InnerProductError::SliceOutOfRange` - if the slice reaches past the window
pub fn inner_product_slice<O, W, K>(
    slice: &NeighborhoodSlice,
    window: &[W],
    kernel: &[K],
) -> Result<O, InnerProductError>
where
    O: Scalar,
    W: AsPrimitive<O>,
    K: AsPrimitive<O>,
{
    if kernel.len() != slice.count {
        return Err(InnerProductError::LengthMismatch {
            window: slice.count,
            kernel: kernel.len(),
        });
    }
    if slice.count > 1 && slice.stride == 0 {
        return Err(InnerProductError::ZeroStride);
    }
    if let Some(last) = slice.last() {
        if last >= window.len() {
            return Err(InnerProductError::SliceOutOfRange {
                start: slice.start,
                count: slice.count,
                stride: slice.stride,
                window: window.len(),
            });
        }
    }
    Ok(slice
        .indices()
        .zip(kernel)
        .fold(O::zero(), |acc, (i, &k)| {
            let w: O = window[i].as_();
            let k: O = k.as_();
            acc + w * k
        }))
}

/// Inner product of a whole neighborhood with an operator of the same shape.
///
/// Vector pixels are combined one component at a time, giving a vector
/// result with the same component count.
///
/// # Errors
///
/// * `InnerProductError::LengthMismatch` - if the window and the operator differ in shape
pub fn neighborhood_inner_product<O, P, K, const N: usize>(
    window: &Neighborhood<P, N>,
    operator: &KernelOperator<K, N>,
) -> Result<P::Retyped<O>, InnerProductError>
where
    O: Scalar,
    P: PixelValue,
    P::Component: AsPrimitive<O>,
    K: Scalar + AsPrimitive<O>,
{
    if window.radius() != operator.radius() {
        return Err(InnerProductError::LengthMismatch {
            window: window.len(),
            kernel: operator.len(),
        });
    }
    if P::COMPONENTS == 1 {
        let values = window.component_values(0);
        let value = inner_product(&values, operator.coefficients())?;
        return Ok(<P::Retyped<O> as PixelValue>::from_fn(|_| value));
    }

    let interleaved = window.interleaved_components();
    let mut out = Vec::with_capacity(P::COMPONENTS);
    for c in 0..P::COMPONENTS {
        out.push(inner_product_slice(
            &window.component_slice(c),
            &interleaved,
            operator.coefficients(),
        )?);
    }
    Ok(<P::Retyped<O> as PixelValue>::from_fn(|c| out[c]))
}

/// Directional inner product along `axis` through the window center.
///
/// Pairs the window slice along `axis` with `coefficients` (for example
/// the axis coefficients of a minimal directional operator), so a single
/// 1-D operator serves windows of any radius.
///
/// # Errors
///
/// * `InnerProductError::LengthMismatch` - if the coefficient count differs from the slice length
pub fn axis_inner_product<O, P, K, const N: usize>(
    window: &Neighborhood<P, N>,
    axis: usize,
    coefficients: &[K],
) -> Result<P::Retyped<O>, InnerProductError>
where
    O: Scalar,
    P: PixelValue,
    P::Component: AsPrimitive<O>,
    K: Scalar + AsPrimitive<O>,
{
    let slice = window.axis_slice(axis);
    let mut out = Vec::with_capacity(P::COMPONENTS);
    for c in 0..P::COMPONENTS {
        let values = window.component_values(c);
        out.push(inner_product_slice(&slice, &values, coefficients)?);
    }
    Ok(<P::Retyped<O> as PixelValue>::from_fn(|c| out[c]))
}
