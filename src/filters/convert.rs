//! Conversions between RGBA8 pixel buffers and normalized f32 buffers.
//!
//! Images are `(height, width, 4)` arrays. The f32 form holds every channel,
//! alpha included, in 0.0-1.0 and is only used where the extra precision
//! matters (blur, unsharp mask).

use ndarray::{Array3, ArrayView3, Axis, Zip};

use crate::error::{FilterError, Result};

/// Number of interleaved channels in every buffer handled by this crate.
pub const CHANNELS: usize = 4;

/// Build an RGBA8 image from a flat `width * height * 4` byte buffer.
///
/// Fails with [`FilterError::InvalidDimensions`] before touching the data
/// when the length does not match.
pub fn pixels_from_raw(data: Vec<u8>, width: usize, height: usize) -> Result<Array3<u8>> {
    let expected = width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(CHANNELS));
    if expected != Some(data.len()) {
        let expected = width.saturating_mul(height).saturating_mul(CHANNELS);
        return Err(FilterError::dimensions(
            format!("{width}x{height} RGBA ({expected} bytes)"),
            format!("{} bytes", data.len()),
        ));
    }

    Array3::from_shape_vec((height, width, CHANNELS), data)
        .map_err(|e| FilterError::dimensions(format!("{width}x{height} RGBA"), e.to_string()))
}

/// Flatten an image back into interleaved RGBA bytes (row-major).
pub fn pixels_into_raw(image: Array3<u8>) -> Vec<u8> {
    if image.is_standard_layout() {
        image.into_raw_vec_and_offset().0
    } else {
        image.iter().copied().collect()
    }
}

/// Check that an image has four channels.
pub fn ensure_rgba<T>(image: &ArrayView3<T>) -> Result<()> {
    let (height, width, channels) = image.dim();
    if channels != CHANNELS {
        return Err(FilterError::dimensions(
            format!("{height}x{width}x{CHANNELS}"),
            format!("{height}x{width}x{channels}"),
        ));
    }
    Ok(())
}

/// Check that two images have identical shapes.
pub fn ensure_same_shape<A, B>(a: &ArrayView3<A>, b: &ArrayView3<B>) -> Result<()> {
    if a.dim() != b.dim() {
        let (ah, aw, ac) = a.dim();
        let (bh, bw, bc) = b.dim();
        return Err(FilterError::dimensions(
            format!("{ah}x{aw}x{ac}"),
            format!("{bh}x{bw}x{bc}"),
        ));
    }
    Ok(())
}

/// Convert u8 image (0-255) to f32 (0.0-1.0), all channels.
pub fn u8_to_f32(input: ArrayView3<u8>) -> Array3<f32> {
    input.mapv(|v| v as f32 / 255.0)
}

/// Quantize one normalized channel value: clamp to 0.0-1.0, scale, round
/// half away from zero.
#[inline]
pub fn quantize(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Convert f32 image (0.0-1.0) back to u8.
///
/// RGB channels are quantized with [`quantize`]. Alpha is copied verbatim
/// from `alpha_source`, never taken from `input`, so a blurred alpha in the
/// float buffer cannot leak into the result.
///
/// Both arrays must have the same `(height, width, 4)` shape.
pub fn f32_to_u8_with_alpha(input: ArrayView3<f32>, alpha_source: ArrayView3<u8>) -> Result<Array3<u8>> {
    ensure_rgba(&input)?;
    ensure_same_shape(&input, &alpha_source)?;

    let mut output = Array3::<u8>::zeros(input.dim());
    Zip::from(output.lanes_mut(Axis(2)))
        .and(input.lanes(Axis(2)))
        .and(alpha_source.lanes(Axis(2)))
        .par_for_each(|mut out, src, alpha| {
            out[0] = quantize(src[0]);
            out[1] = quantize(src[1]);
            out[2] = quantize(src[2]);
            out[3] = alpha[3];
        });

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(height: usize, width: usize) -> Array3<u8> {
        Array3::from_shape_fn((height, width, 4), |(y, x, c)| {
            ((y * 37 + x * 11 + c * 53) % 256) as u8
        })
    }

    #[test]
    fn test_roundtrip_is_lossless() {
        // Every 8-bit value survives u8 -> f32 -> u8
        let img = Array3::from_shape_fn((16, 16, 4), |(y, x, c)| ((y * 16 + x) as u8).wrapping_add(c as u8));
        let f = u8_to_f32(img.view());
        let back = f32_to_u8_with_alpha(f.view(), img.view()).unwrap();
        assert_eq!(back, img);

        let img = gradient(7, 5);
        let back = f32_to_u8_with_alpha(u8_to_f32(img.view()).view(), img.view()).unwrap();
        assert_eq!(back, img);
    }

    #[test]
    fn test_alpha_comes_from_source() {
        let mut f = Array3::<f32>::zeros((1, 2, 4));
        f[[0, 0, 3]] = 0.5;
        f[[0, 1, 3]] = 0.5;
        let mut alpha = Array3::<u8>::zeros((1, 2, 4));
        alpha[[0, 0, 3]] = 0;
        alpha[[0, 1, 3]] = 255;

        let out = f32_to_u8_with_alpha(f.view(), alpha.view()).unwrap();
        assert_eq!(out[[0, 0, 3]], 0);
        assert_eq!(out[[0, 1, 3]], 255);
    }

    #[test]
    fn test_quantize_clamps_and_rounds() {
        assert_eq!(quantize(-0.3), 0);
        assert_eq!(quantize(1.7), 255);
        assert_eq!(quantize(f32::INFINITY), 255);
        // 0.5 * 255 = 127.5 rounds away from zero
        assert_eq!(quantize(0.5), 128);
        assert_eq!(quantize(1.0 / 255.0), 1);
    }

    #[test]
    fn test_pixels_from_raw_checks_length() {
        assert!(pixels_from_raw(vec![0; 64], 4, 4).is_ok());

        let err = pixels_from_raw(vec![0; 63], 4, 4).unwrap_err();
        assert!(matches!(err, FilterError::InvalidDimensions { .. }));

        let err = pixels_from_raw(vec![0; 12], 1, 4).unwrap_err();
        assert!(matches!(err, FilterError::InvalidDimensions { .. }));
    }

    #[test]
    fn test_pixels_from_raw_layout() {
        let data: Vec<u8> = (0..24).collect();
        let img = pixels_from_raw(data.clone(), 3, 2).unwrap();
        assert_eq!(img.dim(), (2, 3, 4));
        // Second row, first pixel, green
        assert_eq!(img[[1, 0, 1]], 13);
        assert_eq!(pixels_into_raw(img), data);
    }

    #[test]
    fn test_shape_mismatch_rejected() {
        let f = Array3::<f32>::zeros((2, 2, 4));
        let a = Array3::<u8>::zeros((2, 3, 4));
        assert!(f32_to_u8_with_alpha(f.view(), a.view()).is_err());

        let rgb = Array3::<u8>::zeros((2, 2, 3));
        assert!(ensure_rgba(&rgb.view()).is_err());
    }
}
