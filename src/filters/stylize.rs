//! Stylize filters: Threshold.
//!
//! Alpha is preserved unchanged.

use ndarray::{Array3, ArrayView3, Axis, Zip};

use super::convert::ensure_rgba;
use crate::error::Result;

// ============================================================================
// Threshold
// ============================================================================

/// Average level at or below which a pixel becomes black.
pub const THRESHOLD_LEVEL: u32 = 127;

/// Apply binary threshold - u8 version.
///
/// A pixel turns white (255) when the plain average `(R + G + B) / 3`
/// exceeds 127 and black (0) otherwise; an average of exactly 127 is black.
/// The comparison is done on the channel sum so there is no rounding.
///
/// # Arguments
/// * `input` - RGBA image (height, width, 4)
///
/// # Returns
/// Black-and-white image, alpha preserved
pub fn threshold_u8(input: ArrayView3<u8>) -> Result<Array3<u8>> {
    ensure_rgba(&input)?;
    tracing::debug!(height = input.dim().0, width = input.dim().1, "threshold");

    let mut output = input.to_owned();
    Zip::from(output.lanes_mut(Axis(2))).par_for_each(|mut px| {
        let sum = px[0] as u32 + px[1] as u32 + px[2] as u32;
        let v = if sum > THRESHOLD_LEVEL * 3 { 255 } else { 0 };
        px[0] = v;
        px[1] = v;
        px[2] = v;
    });

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel(r: u8, g: u8, b: u8, a: u8) -> Array3<u8> {
        let mut img = Array3::<u8>::zeros((1, 1, 4));
        img[[0, 0, 0]] = r;
        img[[0, 0, 1]] = g;
        img[[0, 0, 2]] = b;
        img[[0, 0, 3]] = a;
        img
    }

    #[test]
    fn test_threshold_boundary() {
        let out = threshold_u8(pixel(127, 127, 127, 255).view()).unwrap();
        assert_eq!(out[[0, 0, 0]], 0);

        // Average 127.33
        let out = threshold_u8(pixel(127, 127, 128, 255).view()).unwrap();
        assert_eq!(out[[0, 0, 0]], 255);
        assert_eq!(out[[0, 0, 1]], 255);
        assert_eq!(out[[0, 0, 2]], 255);
    }

    #[test]
    fn test_threshold_uses_plain_average() {
        // Pure green averages to 85 -> black even though it is bright
        let out = threshold_u8(pixel(0, 255, 0, 255).view()).unwrap();
        assert_eq!(out[[0, 0, 1]], 0);

        let out = threshold_u8(pixel(255, 255, 0, 9).view()).unwrap();
        assert_eq!(out[[0, 0, 2]], 255);
        assert_eq!(out[[0, 0, 3]], 9);
    }

    #[test]
    fn test_threshold_output_is_binary() {
        let img = Array3::from_shape_fn((16, 16, 4), |(y, x, c)| ((y * 16 + x + c * 7) % 256) as u8);
        let out = threshold_u8(img.view()).unwrap();
        for y in 0..16 {
            for x in 0..16 {
                for c in 0..3 {
                    let v = out[[y, x, c]];
                    assert!(v == 0 || v == 255);
                }
                assert_eq!(out[[y, x, 3]], img[[y, x, 3]]);
            }
        }
    }
}
