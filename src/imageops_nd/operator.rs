//! Kernel operators: coefficient buffers shaped like a neighborhood window.
//!
//! An operator is built in two steps. A family generates a 1-D coefficient
//! vector, then the vector is arranged into the N-dimensional buffer, either
//! along one axis through the center (directional families) or over the
//! whole window (uniform families).

use num_traits::NumCast;
use tracing::{trace, warn};

use crate::error::KernelError;
use crate::imageops_nd::neighborhood::{axis_slice, window_len, NeighborhoodSlice};
use crate::imageops_nd::pixel::Scalar;

/// Coefficient generation algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KernelFamily {
    /// `F(x) - F(x-1)` along the direction
    BackwardDifference,
    /// `F(x+1) - F(x)` along the direction
    ForwardDifference,
    /// `(F(x+1) - F(x-1)) / 2` along the direction
    CentralDifference,
    /// Every coefficient `1 / len` (mean)
    Box,
    /// Every coefficient `1` (flat structuring element)
    Flat,
}

impl KernelFamily {
    /// Returns true if the family places coefficients along one axis.
    #[inline]
    pub const fn is_directional(self) -> bool {
        matches!(
            self,
            Self::BackwardDifference | Self::ForwardDifference | Self::CentralDifference
        )
    }
}

/// Generates the coefficient vector of `family` for a window of `radius`.
///
/// Directional families return their odd-length 1-D vector, centered on
/// its middle element; uniform families return one coefficient per window
/// element.
pub fn generate_coefficients<const N: usize>(family: KernelFamily, radius: &[usize; N]) -> Vec<f64> {
    match family {
        KernelFamily::BackwardDifference => vec![-1.0, 1.0, 0.0],
        KernelFamily::ForwardDifference => vec![0.0, -1.0, 1.0],
        KernelFamily::CentralDifference => vec![-0.5, 0.0, 0.5],
        KernelFamily::Box => {
            let len = window_len(radius);
            vec![1.0 / len as f64; len]
        }
        KernelFamily::Flat => vec![1.0; window_len(radius)],
    }
}

/// Immutable coefficient buffer with the shape of a window of `radius`.
#[derive(Debug, Clone, PartialEq)]
pub struct KernelOperator<K, const N: usize> {
    radius: [usize; N],
    coefficients: Vec<K>,
    direction: Option<usize>,
}

impl<K: Scalar, const N: usize> KernelOperator<K, N> {
    /// Wrap a coefficient buffer laid out in window order.
    ///
    /// # Errors
    ///
    /// * `KernelError::CoefficientCountMismatch` - if the buffer does not match the radius
    pub fn from_coefficients(radius: [usize; N], coefficients: Vec<K>) -> Result<Self, KernelError> {
        let expected = window_len(&radius);
        if coefficients.len() != expected {
            return Err(KernelError::CoefficientCountMismatch {
                expected,
                actual: coefficients.len(),
            });
        }
        Ok(Self {
            radius,
            coefficients,
            direction: None,
        })
    }

    /// Directional operator with the given window radius.
    ///
    /// Coefficients are placed along `direction` through the center and
    /// every other element is zero.
    ///
    /// # Errors
    ///
    /// * `KernelError::InvalidDirection` - if `direction >= N`
    /// * `KernelError::RadiusTooSmall` - if `radius[direction]` cannot hold the coefficients
    pub fn directional(
        family: KernelFamily,
        direction: usize,
        radius: [usize; N],
    ) -> Result<Self, KernelError> {
        if direction >= N {
            return Err(KernelError::InvalidDirection {
                direction,
                dimension: N,
            });
        }
        let coefficients = generate_coefficients(family, &radius);
        if !family.is_directional() {
            return Self::fill_uniform(radius, &coefficients);
        }
        Self::fill_centered_directional(radius, direction, &coefficients)
    }

    /// Directional operator with the smallest radius that holds its coefficients.
    ///
    /// # Errors
    ///
    /// * `KernelError::InvalidDirection` - if `direction >= N`
    pub fn create_directional(family: KernelFamily, direction: usize) -> Result<Self, KernelError> {
        let mut radius = [0usize; N];
        if direction < N && family.is_directional() {
            radius[direction] = generate_coefficients(family, &radius).len() / 2;
        }
        Self::directional(family, direction, radius)
    }

    /// Uniform operator (`Box` or `Flat`) covering the whole window.
    ///
    /// Directional families are placed along axis 0.
    ///
    /// # Errors
    ///
    /// * `KernelError::InvalidDirection` - if a directional family is asked of a 0-dimensional operator
    /// * `KernelError::RadiusTooSmall` - if a directional family does not fit `radius[0]`
    pub fn uniform(family: KernelFamily, radius: [usize; N]) -> Result<Self, KernelError> {
        if family.is_directional() {
            return Self::directional(family, 0, radius);
        }
        Self::fill_uniform(radius, &generate_coefficients(family, &radius))
    }

    fn fill_uniform(radius: [usize; N], coefficients: &[f64]) -> Result<Self, KernelError> {
        trace!(?radius, len = coefficients.len(), "filling uniform operator");
        Self::from_coefficients(radius, cast_coefficients(coefficients))
    }

    fn fill_centered_directional(
        radius: [usize; N],
        direction: usize,
        coefficients: &[f64],
    ) -> Result<Self, KernelError> {
        let half = coefficients.len() / 2;
        if radius[direction] < half {
            return Err(KernelError::RadiusTooSmall {
                direction,
                radius: radius[direction],
                required: half,
            });
        }
        trace!(?radius, direction, ?coefficients, "filling directional operator");

        let mut buffer = vec![K::zero(); window_len(&radius)];
        let slice = axis_slice(&radius, direction);
        let skip = radius[direction] - half;
        let cast: Vec<K> = cast_coefficients(coefficients);
        for (position, value) in slice.indices().skip(skip).zip(cast) {
            buffer[position] = value;
        }

        Ok(Self {
            radius,
            coefficients: buffer,
            direction: Some(direction),
        })
    }

    #[inline]
    pub const fn radius(&self) -> [usize; N] {
        self.radius
    }

    /// Axis of a directional operator.
    #[inline]
    pub const fn direction(&self) -> Option<usize> {
        self.direction
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.coefficients.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.coefficients.is_empty()
    }

    #[inline]
    pub fn coefficients(&self) -> &[K] {
        &self.coefficients
    }

    /// Slice through the center along `axis`.
    #[inline]
    pub fn axis_slice(&self, axis: usize) -> NeighborhoodSlice {
        axis_slice(&self.radius, axis)
    }

    /// Coefficients along `axis` through the center.
    pub fn axis_coefficients(&self, axis: usize) -> Vec<K> {
        self.axis_slice(axis)
            .indices()
            .map(|i| self.coefficients[i])
            .collect()
    }

    /// Largest coefficient.
    pub fn max_coefficient(&self) -> K {
        self.coefficients
            .iter()
            .copied()
            .fold(self.coefficients[0], |a, b| if b > a { b } else { a })
    }
}

fn cast_coefficients<K: Scalar>(coefficients: &[f64]) -> Vec<K> {
    coefficients
        .iter()
        .map(|&c| {
            let value = <K as NumCast>::from(c).unwrap_or_else(K::zero);
            if c != 0.0 && value.is_zero() {
                warn!(coefficient = c, "coefficient truncated to zero by the storage type");
            }
            value
        })
        .collect()
}
