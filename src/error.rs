use thiserror::Error;

/// Error type for N-dimensional image construction
///
/// This error type represents invalid extents, buffers or geometry
/// supplied when building an [`NdImage`](crate::NdImage).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ImageError {
    /// Pixel buffer length does not match the product of the extent
    ///
    /// This error is returned by `from_vec` when the caller hands over
    /// a buffer that cannot be laid out over the requested extent.
    #[error("Pixel buffer length mismatch: extent {size:?} needs {expected} pixels, got {actual}")]
    BufferLengthMismatch {
        /// Requested extent
        size: Vec<usize>,
        /// Number of pixels the extent requires
        expected: usize,
        /// Number of pixels supplied
        actual: usize,
    },

    /// Pixel spacing must be finite and strictly positive
    #[error("Invalid spacing {spacing} on axis {axis}: spacing must be finite and positive")]
    InvalidSpacing { axis: usize, spacing: f64 },

    /// Origin must be finite
    #[error("Invalid origin {origin} on axis {axis}: origin must be finite")]
    InvalidOrigin { axis: usize, origin: f64 },
}

/// Error type for kernel operator generation
///
/// These errors are raised while arranging generated coefficients
/// into an N-dimensional operator buffer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KernelError {
    /// Direction is not a valid axis of the operator
    #[error("Direction {direction} is out of range for a {dimension}-dimensional operator")]
    InvalidDirection { direction: usize, dimension: usize },

    /// Radius along the direction cannot hold the coefficient vector
    ///
    /// A directional coefficient vector of length `k` needs at least
    /// `k / 2` elements on each side of the center.
    #[error("Radius {radius} along axis {direction} is too small, coefficients need at least {required}")]
    RadiusTooSmall {
        direction: usize,
        radius: usize,
        required: usize,
    },

    /// Coefficient buffer length does not match the operator shape
    #[error("Coefficient buffer holds {actual} values, operator shape needs {expected}")]
    CoefficientCountMismatch { expected: usize, actual: usize },
}

/// Error type for inner products between windows and kernels
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InnerProductError {
    /// Window and kernel lengths differ
    ///
    /// The inner product never truncates or pads: both operands must
    /// describe the same neighborhood shape.
    #[error("Window holds {window} values but the kernel holds {kernel}")]
    LengthMismatch { window: usize, kernel: usize },

    /// Slice selects elements past the end of the window
    #[error("Slice (start {start}, count {count}, stride {stride}) exceeds a window of {window} values")]
    SliceOutOfRange {
        start: usize,
        count: usize,
        stride: usize,
        window: usize,
    },

    /// Slice stride must be non-zero when more than one element is selected
    #[error("Slice stride must be non-zero")]
    ZeroStride,
}

/// Error type for neighborhood extraction
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NeighborhoodError {
    /// Image has a zero extent on some axis and the boundary condition
    /// cannot supply values on its own
    #[error("Cannot extract a neighborhood from an empty image of extent {size:?}")]
    EmptyImage { size: Vec<usize> },

    /// Value buffer length does not match the radius
    #[error("Neighborhood of radius {radius:?} needs {expected} values, got {actual}")]
    SizeMismatch {
        radius: Vec<usize>,
        expected: usize,
        actual: usize,
    },
}

/// Error type for interpolation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InterpolationError {
    /// Continuous index lies outside the image buffer
    ///
    /// The checked evaluation entry points return this error instead of
    /// extrapolating.
    #[error("Continuous index {index:?} lies outside an image of extent {size:?}")]
    OutsideBuffer { index: Vec<f64>, size: Vec<usize> },

    /// Integer index lies outside the image buffer
    #[error("Index {index:?} lies outside an image of extent {size:?}")]
    IndexOutOfBounds { index: Vec<isize>, size: Vec<usize> },

    /// Image has no pixels to interpolate between
    #[error("Cannot interpolate an empty image of extent {size:?}")]
    EmptyImage { size: Vec<usize> },

    /// Interpolation method name could not be parsed
    #[error("Unknown interpolation method: {0}")]
    UnknownMethod(String),
}

/// Error type for whole-image neighborhood filters
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    /// Image has no pixels
    #[error("Image is empty: extent {size:?}")]
    EmptyImage { size: Vec<usize> },

    /// Failed to build the filter kernel
    #[error(transparent)]
    Kernel(#[from] KernelError),

    /// Failed to combine a window with the kernel
    #[error(transparent)]
    InnerProduct(#[from] InnerProductError),

    /// Failed to extract a window
    #[error(transparent)]
    Neighborhood(#[from] NeighborhoodError),
}

/// Error type for padding operations
///
/// This error type represents failures that can occur during
/// image padding operations, typically related to size constraints.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaddingError {
    /// Padded extent is smaller than the image extent
    ///
    /// This error occurs when the requested padded size along an axis
    /// is less than the original size, which is not a valid operation.
    #[error("Padded size ({pad_size}) on axis {axis} must be greater than or equal to image size ({size})")]
    PaddingTooSmall {
        axis: usize,
        size: usize,
        pad_size: usize,
    },

    /// Source image has no pixels, so a non-constant boundary cannot fill the pad
    #[error("Cannot pad an empty image of extent {size:?} with a non-constant boundary")]
    EmptyImage { size: Vec<usize> },
}
