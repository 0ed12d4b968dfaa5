mod error;
mod imageops_nd;
mod utils;

#[cfg(test)]
mod test_utils;

use image::{ImageBuffer, Pixel};

pub use error::{
    FilterError, ImageError, InnerProductError, InterpolationError, KernelError,
    NeighborhoodError, PaddingError,
};
pub use imageops_nd::boundary::BoundaryCondition;
pub use imageops_nd::box_filter::BoxFilter;
pub use imageops_nd::image::{unravel_index, ContinuousIndex, ImageAccess, Index, NdImage, Point};
pub use imageops_nd::inner_product::{
    axis_inner_product, inner_product, inner_product_slice, neighborhood_inner_product,
};
pub use imageops_nd::interpolate::{
    InterpolateImageFunction, InterpolatedPixel, InterpolationMethod, Interpolator,
    LinearInterpolator, NearestNeighborInterpolator,
};
pub use imageops_nd::morphology::{dilation_evaluate, BinaryDilationFilter};
pub use imageops_nd::neighborhood::{
    axis_slice, window_len, window_offsets, window_stride, Neighborhood, NeighborhoodSlice,
};
pub use imageops_nd::operator::{generate_coefficients, KernelFamily, KernelOperator};
pub use imageops_nd::operator_filter::{directional_derivative, NeighborhoodOperatorFilter};
pub use imageops_nd::padding::{calculate_position, Padding, Position};
pub use imageops_nd::pixel::{to_real, PixelValue, RealPixel, Scalar, Widened};

pub type Image<P> = ImageBuffer<P, Vec<<P as Pixel>::Subpixel>>;
