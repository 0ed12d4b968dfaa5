use tracing::debug;

use crate::error::PaddingError;
use crate::imageops_nd::boundary::BoundaryCondition;
use crate::imageops_nd::image::{ImageAccess, NdImage};
use crate::imageops_nd::pixel::PixelValue;
use crate::utils::map_indices;

/// Placement of the image inside a larger canvas, applied on every axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Position {
    /// Image starts at index 0 of the canvas
    Start,
    /// Image is centered; odd leftovers go to the upper side
    #[default]
    Center,
    /// Image ends at the last index of the canvas
    End,
}

/// Calculates where an image of extent `size` lands in a canvas of extent `pad_size`.
///
/// # Arguments
///
/// * `size` - Extent of the original image
/// * `pad_size` - Extent of the padded canvas
/// * `position` - Placement of the image
///
/// # Returns
///
/// The canvas index of the image's first pixel
///
/// # Errors
///
/// * `PaddingError::PaddingTooSmall` - if the canvas is smaller than the image on some axis
pub fn calculate_position<const N: usize>(
    size: [usize; N],
    pad_size: [usize; N],
    position: Position,
) -> Result<[usize; N], PaddingError> {
    let mut offset = [0usize; N];
    for axis in 0..N {
        let (len, pad_len) = (size[axis], pad_size[axis]);
        if pad_len < len {
            return Err(PaddingError::PaddingTooSmall {
                axis,
                size: len,
                pad_size: pad_len,
            });
        }
        offset[axis] = match position {
            Position::Start => 0,
            Position::Center => (pad_len - len) / 2,
            Position::End => pad_len - len,
        };
    }
    Ok(offset)
}

/// Trait providing padding operations on N-dimensional images.
///
/// Padded images keep the physical position of every original pixel: the
/// origin moves back by the lower pad times the spacing.
pub trait Padding<P, const N: usize>: Sized {
    /// Grows the image by `lower` pixels before and `upper` pixels after each axis.
    ///
    /// New pixels are read through `boundary`, so constant, mirrored,
    /// periodic and edge-replicated pads all come from one call.
    ///
    /// # Errors
    ///
    /// * `PaddingError::EmptyImage` - if the image is empty and `boundary` is not constant
    fn pad(
        &self,
        lower: [usize; N],
        upper: [usize; N],
        boundary: &BoundaryCondition<P>,
    ) -> Result<Self, PaddingError>;

    /// Places the image inside a canvas of extent `pad_size` filled with `value`.
    ///
    /// # Returns
    ///
    /// The padded image and the canvas index of the original first pixel
    ///
    /// # Errors
    ///
    /// * `PaddingError::PaddingTooSmall` - if `pad_size` is smaller than the image on some axis
    fn add_padding(
        &self,
        pad_size: [usize; N],
        position: Position,
        value: P,
    ) -> Result<(Self, [usize; N]), PaddingError>;

    /// Pads every axis to the largest extent, keeping the image centered.
    fn add_padding_uniform(&self, value: P) -> Result<(Self, [usize; N]), PaddingError>;
}

impl<P: PixelValue, const N: usize> Padding<P, N> for NdImage<P, N> {
    fn pad(
        &self,
        lower: [usize; N],
        upper: [usize; N],
        boundary: &BoundaryCondition<P>,
    ) -> Result<Self, PaddingError> {
        let size = self.size();
        let padded: [usize; N] = std::array::from_fn(|d| size[d] + lower[d] + upper[d]);
        debug!(?size, ?lower, ?upper, "padding image");

        let data = map_indices(&padded, |index| {
            let source: [isize; N] = std::array::from_fn(|d| index[d] - lower[d] as isize);
            boundary
                .resolve(self, &source)
                .ok_or_else(|| PaddingError::EmptyImage {
                    size: size.to_vec(),
                })
        })?;

        let origin = self.origin();
        let spacing = self.spacing();
        let origin = std::array::from_fn(|d| origin[d] - lower[d] as f64 * spacing[d]);
        Ok(Self::from_parts(padded, data, origin, spacing))
    }

    fn add_padding(
        &self,
        pad_size: [usize; N],
        position: Position,
        value: P,
    ) -> Result<(Self, [usize; N]), PaddingError> {
        let size = self.size();
        let lower = calculate_position(size, pad_size, position)?;
        let upper = std::array::from_fn(|d| pad_size[d] - size[d] - lower[d]);
        let padded = self.pad(lower, upper, &BoundaryCondition::Constant(value))?;
        Ok((padded, lower))
    }

    fn add_padding_uniform(&self, value: P) -> Result<(Self, [usize; N]), PaddingError> {
        let size = self.size();
        let longest = size.iter().copied().max().unwrap_or(0);
        self.add_padding([longest; N], Position::Center, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_position() {
        assert_eq!(calculate_position([2, 3], [6, 3], Position::Start).unwrap(), [0, 0]);
        assert_eq!(calculate_position([2, 3], [6, 4], Position::Center).unwrap(), [2, 0]);
        assert_eq!(calculate_position([2, 3], [6, 4], Position::End).unwrap(), [4, 1]);
    }

    #[test]
    fn test_calculate_position_too_small() {
        let result = calculate_position([4, 4, 4], [4, 3, 8], Position::Center);
        assert_eq!(
            result,
            Err(PaddingError::PaddingTooSmall {
                axis: 1,
                size: 4,
                pad_size: 3
            })
        );
    }

    #[test]
    fn test_add_padding_places_image() {
        let img = NdImage::from_fn([2, 2], |[x, y]| (1 + x + 2 * y) as u8);
        let (padded, offset) = img.add_padding([4, 3], Position::End, 0).unwrap();

        assert_eq!(offset, [2, 1]);
        assert_eq!(padded.size(), [4, 3]);
        assert_eq!(padded.pixels(), &[0, 0, 0, 0, 0, 0, 1, 2, 0, 0, 3, 4]);
    }

    #[test]
    fn test_add_padding_uniform() {
        let img = NdImage::from_pixel([4, 2, 1], 9i16);
        let (padded, offset) = img.add_padding_uniform(-1).unwrap();

        assert_eq!(padded.size(), [4, 4, 4]);
        assert_eq!(offset, [0, 1, 1]);
        assert_eq!(padded.pixels().iter().filter(|&&v| v == 9).count(), 8);
    }

    #[test]
    fn test_pad_mirror_and_periodic() {
        let img = NdImage::from_vec([3], vec![1u8, 2, 3]).unwrap();

        let mirrored = img.pad([2], [2], &BoundaryCondition::Mirror).unwrap();
        assert_eq!(mirrored.pixels(), &[3, 2, 1, 2, 3, 2, 1]);

        let wrapped = img.pad([1], [1], &BoundaryCondition::Periodic).unwrap();
        assert_eq!(wrapped.pixels(), &[3, 1, 2, 3, 1]);

        let clamped = img.pad([1], [0], &BoundaryCondition::ZeroFluxNeumann).unwrap();
        assert_eq!(clamped.pixels(), &[1, 1, 2, 3]);
    }

    #[test]
    fn test_pad_preserves_physical_positions() {
        let img = NdImage::from_pixel([3, 3], 0u8)
            .with_geometry([5.0, -1.0], [0.5, 2.0])
            .unwrap();
        let padded = img.pad([2, 1], [0, 0], &BoundaryCondition::Constant(0)).unwrap();
        assert_eq!(padded.origin(), [4.0, -3.0]);
        assert_eq!(padded.spacing(), [0.5, 2.0]);
    }

    #[test]
    fn test_pad_empty_image() {
        let img = NdImage::<u8, 2>::from_pixel([0, 2], 0);
        assert!(matches!(
            img.pad([1, 0], [0, 0], &BoundaryCondition::Mirror),
            Err(PaddingError::EmptyImage { .. })
        ));

        let filled = img.pad([1, 0], [0, 0], &BoundaryCondition::Constant(4)).unwrap();
        assert_eq!(filled.pixels(), &[4, 4]);
    }
}
