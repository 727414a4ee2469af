//! Grayscale conversion filter.
//!
//! Uses ITU-R BT.601 luma weights, rounded to the nearest level:
//! `g = round(0.299 R + 0.587 G + 0.114 B)`.

use ndarray::{Array3, ArrayView3, Axis, Zip};

use super::convert::ensure_rgba;
use crate::error::Result;

/// ITU-R BT.601 luma coefficients
const LUMA_R: f32 = 0.299;
const LUMA_G: f32 = 0.587;
const LUMA_B: f32 = 0.114;

/// Luma of one pixel, rounded half away from zero.
#[inline]
pub fn luma_u8(r: u8, g: u8, b: u8) -> u8 {
    let gray = LUMA_R * r as f32 + LUMA_G * g as f32 + LUMA_B * b as f32;
    gray.round().clamp(0.0, 255.0) as u8
}

/// Convert RGBA u8 image to grayscale.
///
/// Output is RGBA with R=G=B=luma, alpha preserved.
///
/// # Arguments
/// * `input` - 3D array view of shape (height, width, 4) with RGBA u8 values (0-255)
pub fn grayscale_rgba_u8(input: ArrayView3<u8>) -> Result<Array3<u8>> {
    ensure_rgba(&input)?;
    tracing::debug!(height = input.dim().0, width = input.dim().1, "grayscale");

    let mut output = input.to_owned();
    Zip::from(output.lanes_mut(Axis(2))).par_for_each(|mut px| {
        let gray = luma_u8(px[0], px[1], px[2]);
        px[0] = gray;
        px[1] = gray;
        px[2] = gray;
    });

    Ok(output)
}
