//! Boundary conditions for reads outside the image extent.

use crate::imageops_nd::image::{ImageAccess, Index};

/// Policy for values requested outside the image extent.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum BoundaryCondition<P> {
    /// Every outside pixel reads as the given value
    Constant(P),
    /// Outside pixels read the nearest edge pixel (zero-flux Neumann)
    #[default]
    ZeroFluxNeumann,
    /// Reflect about the edge pixel without repeating it: `... 2 1 | 0 1 2 ... n-1 | n-2 ...`
    Mirror,
    /// Wrap around to the opposite side
    Periodic,
}

impl<P: Copy> BoundaryCondition<P> {
    /// Value for `index` in `image`, whether inside or outside the extent.
    ///
    /// Returns `None` only for an empty image under a non-constant policy.
    pub fn resolve<I, const N: usize>(&self, image: &I, index: &Index<N>) -> Option<P>
    where
        I: ImageAccess<N, Pixel = P> + ?Sized,
    {
        if image.in_bounds(index) {
            return Some(image.value_at(index));
        }
        if let Self::Constant(value) = self {
            return Some(*value);
        }

        let size = image.size();
        let mut mapped = [0isize; N];
        for axis in 0..N {
            mapped[axis] = self.map_index(index[axis], size[axis])? as isize;
        }
        Some(image.value_at(&mapped))
    }

    /// Maps a single coordinate into `[0, len)`.
    ///
    /// Returns `None` for `Constant`, which has no inside counterpart, and
    /// for `len == 0`.
    pub fn map_index(&self, i: isize, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        match self {
            Self::Constant(_) => {
                if i >= 0 && (i as usize) < len {
                    Some(i as usize)
                } else {
                    None
                }
            }
            Self::ZeroFluxNeumann => Some(i.clamp(0, len as isize - 1) as usize),
            Self::Mirror => {
                if len == 1 {
                    return Some(0);
                }
                let period = (2 * len - 2) as isize;
                let r = i.rem_euclid(period) as usize;
                if r < len {
                    Some(r)
                } else {
                    Some(2 * len - 2 - r)
                }
            }
            Self::Periodic => Some(i.rem_euclid(len as isize) as usize),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imageops_nd::image::NdImage;

    #[test]
    fn zero_flux_clamps_to_edges() {
        let bc = BoundaryCondition::<u8>::ZeroFluxNeumann;
        assert_eq!(bc.map_index(-3, 5), Some(0));
        assert_eq!(bc.map_index(4, 5), Some(4));
        assert_eq!(bc.map_index(99, 5), Some(4));
    }

    #[test]
    fn mirror_reflects_without_repeating_edge() {
        let bc = BoundaryCondition::<u8>::Mirror;
        let cases = [(-4, 4), (-3, 3), (-1, 1), (0, 0), (4, 4), (5, 3), (8, 0), (9, 1)];
        for (i, expected) in cases {
            assert_eq!(bc.map_index(i, 5), Some(expected), "i = {i}");
        }
        for i in -4..=4 {
            assert_eq!(bc.map_index(i, 1), Some(0));
        }
    }

    #[test]
    fn periodic_wraps() {
        let bc = BoundaryCondition::<u8>::Periodic;
        assert_eq!(bc.map_index(-1, 4), Some(3));
        assert_eq!(bc.map_index(4, 4), Some(0));
        assert_eq!(bc.map_index(-9, 4), Some(3));
    }

    #[test]
    fn empty_extent_has_no_mapping() {
        assert_eq!(BoundaryCondition::<u8>::Periodic.map_index(0, 0), None);
        assert_eq!(BoundaryCondition::<u8>::ZeroFluxNeumann.map_index(0, 0), None);
    }

    #[test]
    fn resolve_reads_inside_and_outside() {
        let img = NdImage::from_fn([3, 2], |[x, y]| (x + 10 * y) as i32);
        let constant = BoundaryCondition::Constant(-1);
        assert_eq!(constant.resolve(&img, &[1, 1]), Some(11));
        assert_eq!(constant.resolve(&img, &[3, 0]), Some(-1));

        let nearest = BoundaryCondition::ZeroFluxNeumann;
        assert_eq!(nearest.resolve(&img, &[-2, 5]), Some(10));

        let periodic = BoundaryCondition::Periodic;
        assert_eq!(periodic.resolve(&img, &[3, -1]), Some(10));
    }

    #[test]
    fn resolve_on_empty_image() {
        let img = NdImage::<u8, 2>::from_pixel([0, 3], 0);
        assert_eq!(BoundaryCondition::Constant(9).resolve(&img, &[0, 0]), Some(9));
        assert_eq!(BoundaryCondition::Mirror.resolve(&img, &[0, 0]), None);
    }
}
