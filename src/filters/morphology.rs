//! Morphology on binary alpha masks.
//!
//! A mask marks every pixel with `alpha > 0` as occupied. Dilation grows the
//! occupied region by a Chebyshev radius `r`, so the structuring element is
//! the `(2r + 1) x (2r + 1)` square.
//!
//! The square is separable: a row pass followed by a column pass gives the
//! same result as scanning the full neighborhood. Each pass is a sliding
//! window OR computed from prefix counts, so the cost is `O(width * height)`
//! whatever the radius.

use ndarray::{Array2, ArrayView2, ArrayView3, ArrayViewMut1, Axis};
use rayon::prelude::*;

use super::convert::ensure_rgba;
use crate::error::Result;

/// Binary occupancy mask, `true` where the source alpha is non-zero.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlphaMask {
    bits: Array2<bool>,
}

impl AlphaMask {
    /// Derive the mask from the alpha channel of an RGBA image.
    pub fn from_rgba(image: ArrayView3<u8>) -> Result<Self> {
        ensure_rgba(&image)?;
        let bits = image.index_axis(Axis(2), 3).mapv(|a| a > 0);
        Ok(AlphaMask { bits })
    }

    /// (height, width)
    pub fn dim(&self) -> (usize, usize) {
        self.bits.dim()
    }

    pub fn contains(&self, y: usize, x: usize) -> bool {
        self.bits[[y, x]]
    }

    pub fn bits(&self) -> ArrayView2<bool> {
        self.bits.view()
    }

    pub fn is_empty(&self) -> bool {
        !self.bits.iter().any(|&b| b)
    }

    /// Grow the mask by `radius` pixels in Chebyshev distance.
    pub fn dilated(&self, radius: usize) -> AlphaMask {
        AlphaMask {
            bits: dilate_chebyshev(self.bits.view(), radius),
        }
    }
}

/// Dilate a binary mask with a square structuring element.
///
/// `out[y, x]` is true when any `mask[y', x']` with `|y - y'| <= radius` and
/// `|x - x'| <= radius` is true. Neighbors outside the image are ignored.
///
/// # Arguments
/// * `mask` - Binary mask (height, width)
/// * `radius` - Chebyshev radius in pixels; 0 returns a copy
pub fn dilate_chebyshev(mask: ArrayView2<bool>, radius: usize) -> Array2<bool> {
    let (height, width) = mask.dim();
    if radius == 0 || height == 0 || width == 0 {
        return mask.to_owned();
    }

    // Row pass
    let mut rows = mask.to_owned();
    rows.axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .for_each(|(y, line)| window_any(mask.row(y).iter().copied(), line, radius));

    // Column pass
    let mut output = rows.clone();
    output
        .axis_iter_mut(Axis(1))
        .into_par_iter()
        .enumerate()
        .for_each(|(x, line)| window_any(rows.column(x).iter().copied(), line, radius));

    output
}

/// Sliding-window OR of `src` into `dst`, window `[i - radius, i + radius]`
/// clipped to the line.
fn window_any(src: impl Iterator<Item = bool>, mut dst: ArrayViewMut1<bool>, radius: usize) {
    let len = dst.len();
    let mut prefix = Vec::with_capacity(len + 1);
    prefix.push(0u32);
    let mut count = 0u32;
    for bit in src {
        count += bit as u32;
        prefix.push(count);
    }

    for i in 0..len {
        let lo = i.saturating_sub(radius);
        let hi = i.saturating_add(radius).min(len - 1);
        dst[i] = prefix[hi + 1] > prefix[lo];
    }
}
