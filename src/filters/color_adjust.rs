//! Color adjustment filters: Contrast.
//!
//! Pixel-wise operations that don't require spatial context.
//! Alpha channel is always preserved unchanged.

use ndarray::{Array3, ArrayView3, Axis, Zip};

use super::convert::ensure_rgba;
use crate::error::{FilterError, Result};

// ============================================================================
// Contrast
// ============================================================================

/// Amount at which the contrast factor's denominator vanishes.
pub const CONTRAST_SINGULARITY: f32 = 259.0;

/// Largest magnitude accepted for the contrast amount; larger values clamp.
pub const CONTRAST_LIMIT: f32 = 255.0;

/// Compute the contrast factor `259 (amount + 255) / (255 (259 - amount))`.
///
/// `amount` is clamped to `[-255, 255]`: -255 flattens every channel to 128,
/// 255 pushes nearly everything to 0 or 255. 0 gives factor 1.
///
/// # Errors
/// [`FilterError::InvalidParameter`] for exactly 259 (the pole of the
/// formula) and for NaN or infinite amounts.
pub fn contrast_factor(amount: f32) -> Result<f32> {
    if !amount.is_finite() {
        return Err(FilterError::InvalidParameter(format!(
            "contrast amount must be finite, got {amount}"
        )));
    }
    if amount == CONTRAST_SINGULARITY {
        return Err(FilterError::InvalidParameter(format!(
            "contrast amount {amount} divides by zero"
        )));
    }

    let clamped = amount.clamp(-CONTRAST_LIMIT, CONTRAST_LIMIT);
    if clamped != amount {
        tracing::warn!(amount, clamped, "contrast amount out of range, clamping");
    }

    Ok(259.0 * (clamped + 255.0) / (255.0 * (259.0 - clamped)))
}

/// Adjust image contrast (u8 version).
///
/// Each RGB channel becomes `round(clamp(factor * (v - 128) + 128, 0, 255))`.
///
/// # Arguments
/// * `input` - RGBA image (height, width, 4)
/// * `amount` - Contrast adjustment in (-255, 255), 0 = no change
///
/// # Returns
/// Contrast-adjusted image, alpha preserved
pub fn contrast_u8(input: ArrayView3<u8>, amount: f32) -> Result<Array3<u8>> {
    ensure_rgba(&input)?;
    let factor = contrast_factor(amount)?;
    tracing::debug!(height = input.dim().0, width = input.dim().1, amount, factor, "contrast");

    // 256-entry lookup, the map only depends on the channel value
    let lut: Vec<u8> = (0..=255u32)
        .map(|v| (factor * (v as f32 - 128.0) + 128.0).clamp(0.0, 255.0).round() as u8)
        .collect();

    let mut output = input.to_owned();
    Zip::from(output.lanes_mut(Axis(2))).par_for_each(|mut px| {
        px[0] = lut[px[0] as usize];
        px[1] = lut[px[1] as usize];
        px[2] = lut[px[2] as usize];
    });

    Ok(output)
}
