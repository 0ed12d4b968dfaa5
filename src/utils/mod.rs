//! Internal utility functions for imageops-nd.
//!
//! This module contains common functionality used across different image operations.

use crate::error::FilterError;
use crate::imageops_nd::image::{unravel_index, Index};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Validates that an extent has no zero-length axis.
///
/// # Arguments
///
/// * `size` - The extent of the image
///
/// # Returns
///
/// `Ok(())` if every axis holds at least one pixel, otherwise an error
pub fn validate_non_empty<const N: usize>(size: &[usize; N]) -> Result<(), FilterError> {
    if size.iter().any(|&len| len == 0) {
        Err(FilterError::EmptyImage {
            size: size.to_vec(),
        })
    } else {
        Ok(())
    }
}

/// Evaluates `f` at every index of `size` and collects the results in memory order.
///
/// With the `rayon` feature the indices are processed on the rayon thread
/// pool; every call writes only its own output slot. The first error stops
/// the collection.
pub fn map_indices<T, E, F, const N: usize>(size: &[usize; N], f: F) -> Result<Vec<T>, E>
where
    T: Send,
    E: Send,
    F: Fn(Index<N>) -> Result<T, E> + Send + Sync,
{
    let len: usize = size.iter().product();

    #[cfg(feature = "rayon")]
    {
        (0..len)
            .into_par_iter()
            .map(|linear| f(unravel_index(linear, size)))
            .collect()
    }

    #[cfg(not(feature = "rayon"))]
    {
        (0..len)
            .map(|linear| f(unravel_index(linear, size)))
            .collect()
    }
}
