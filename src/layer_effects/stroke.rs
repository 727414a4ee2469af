//! Stroke/outline layer effect.
//!
//! Paints a solid ring around the non-transparent area of a mask image:
//! 1. Build a binary mask from the mask source's alpha (`alpha > 0`)
//! 2. Dilate it by the stroke size (Chebyshev distance, square corners)
//! 3. Every background pixel inside the dilated mask takes the stroke color
//!    at full opacity
//!
//! Foreground pixels are never painted over, so this is always an
//! "outside" stroke. Pixels farther than the stroke size from the mask keep
//! their base value.

use ndarray::{Array3, ArrayView3, Axis, Zip};

use crate::color::Color;
use crate::error::Result;
use crate::filters::convert::{ensure_rgba, ensure_same_shape};
use crate::filters::morphology::AlphaMask;

/// Stroke size and color.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StrokeStyle {
    /// Halo width in pixels. Fractions are floored, negatives mean no stroke.
    pub size: f32,
    pub color: Color,
}

impl StrokeStyle {
    pub fn new(size: f32, color: Color) -> Self {
        StrokeStyle { size, color }
    }

    /// Effective integer radius: `max(0, floor(size))`. Infinite sizes
    /// saturate; dilation clips the window to the image anyway.
    pub fn radius(&self) -> usize {
        if self.size.is_nan() || self.size < 1.0 {
            0
        } else {
            self.size.floor() as usize
        }
    }

    pub fn is_visible(&self) -> bool {
        self.radius() > 0
    }
}

/// Apply an outside stroke to an RGBA image.
///
/// # Arguments
/// * `base` - Image to paint on (height, width, 4)
/// * `mask_source` - Image whose alpha defines the silhouette; `None` uses `base`
/// * `style` - Stroke size and color
///
/// # Returns
/// Copy of `base` with the ring painted in. A zero stroke size returns an
/// unchanged copy.
///
/// # Errors
/// [`crate::FilterError::InvalidDimensions`] when either image is not RGBA or
/// the mask source's size differs from the base.
pub fn stroke_overlay_u8<'a>(
    base: ArrayView3<'a, u8>,
    mask_source: Option<ArrayView3<'a, u8>>,
    style: &StrokeStyle,
) -> Result<Array3<u8>> {
    ensure_rgba(&base)?;
    let mask_source = mask_source.unwrap_or(base);
    ensure_same_shape(&base, &mask_source)?;

    let radius = style.radius();
    tracing::debug!(
        height = base.dim().0,
        width = base.dim().1,
        radius,
        color = %style.color,
        "stroke overlay"
    );
    if radius == 0 {
        return Ok(base.to_owned());
    }

    let mask = AlphaMask::from_rgba(mask_source)?;
    let halo = mask.dilated(radius);
    let paint = style.color.to_rgba();

    let mut output = base.to_owned();
    Zip::from(output.lanes_mut(Axis(2)))
        .and(mask.bits())
        .and(halo.bits())
        .par_for_each(|mut px, &inside, &near| {
            if near && !inside {
                for c in 0..4 {
                    px[c] = paint[c];
                }
            }
        });

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::rgb(255, 0, 0);

    /// 4x4 transparent image with an opaque 2x2 block at rows/cols 1-2.
    fn center_block() -> Array3<u8> {
        let mut img = Array3::<u8>::zeros((4, 4, 4));
        for y in 1..=2 {
            for x in 1..=2 {
                img[[y, x, 0]] = 10;
                img[[y, x, 1]] = 20;
                img[[y, x, 2]] = 30;
                img[[y, x, 3]] = 255;
            }
        }
        img
    }

    fn px(img: &Array3<u8>, y: usize, x: usize) -> [u8; 4] {
        [img[[y, x, 0]], img[[y, x, 1]], img[[y, x, 2]], img[[y, x, 3]]]
    }

    #[test]
    fn test_zero_size_is_noop() {
        let img = center_block();
        for size in [0.0, -3.0, 0.9, f32::NAN] {
            let out = stroke_overlay_u8(img.view(), None, &StrokeStyle::new(size, RED)).unwrap();
            assert_eq!(out, img);
        }
    }

    #[test]
    fn test_ring_around_center_block() {
        let img = center_block();
        let out = stroke_overlay_u8(img.view(), None, &StrokeStyle::new(1.0, RED)).unwrap();

        for y in 0..4 {
            for x in 0..4 {
                let block = (1..=2).contains(&y) && (1..=2).contains(&x);
                if block {
                    assert_eq!(px(&out, y, x), [10, 20, 30, 255]);
                } else {
                    // Every other pixel, corners included, is at Chebyshev distance 1
                    assert_eq!(px(&out, y, x), [255, 0, 0, 255], "({y},{x})");
                }
            }
        }
    }

    #[test]
    fn test_fractional_size_floors_to_radius() {
        let mut img = Array3::<u8>::zeros((7, 7, 4));
        img[[3, 3, 3]] = 255;
        let out = stroke_overlay_u8(img.view(), None, &StrokeStyle::new(2.7, RED)).unwrap();
        assert_eq!(px(&out, 1, 1), [255, 0, 0, 255]);
        assert_eq!(px(&out, 5, 3), [255, 0, 0, 255]);
        // Distance 3 is outside a radius of 2
        assert_eq!(px(&out, 0, 0), [0, 0, 0, 0]);
        assert_eq!(px(&out, 3, 6), [0, 0, 0, 0]);
        assert_eq!(px(&out, 3, 3), [0, 0, 0, 255]);
    }

    #[test]
    fn test_unbounded_size_covers_image() {
        let img = center_block();
        for size in [f32::INFINITY, 1.0e30] {
            let out = stroke_overlay_u8(img.view(), None, &StrokeStyle::new(size, RED)).unwrap();
            assert_eq!(out, stroke_overlay_u8(img.view(), None, &StrokeStyle::new(3.0, RED)).unwrap());
            assert_eq!(px(&out, 0, 3), [255, 0, 0, 255]);
            assert_eq!(px(&out, 2, 2), [10, 20, 30, 255]);
        }
    }

    #[test]
    fn test_far_pixels_untouched() {
        let mut img = Array3::<u8>::zeros((9, 9, 4));
        img[[4, 4, 3]] = 255;
        // Background color with zero alpha must survive outside the ring
        img[[0, 0, 0]] = 99;
        let out = stroke_overlay_u8(img.view(), None, &StrokeStyle::new(2.0, Color::rgb(0, 0, 255))).unwrap();
        for y in 0..9 {
            for x in 0..9 {
                let d = (y as i32 - 4).abs().max((x as i32 - 4).abs());
                if d == 0 {
                    assert_eq!(px(&out, y, x), [0, 0, 0, 255]);
                } else if d <= 2 {
                    assert_eq!(px(&out, y, x), [0, 0, 255, 255]);
                } else {
                    assert_eq!(px(&out, y, x), px(&img, y, x));
                }
            }
        }
    }

    #[test]
    fn test_separate_mask_source() {
        let base = Array3::<u8>::from_elem((3, 3, 4), 50);
        let mut mask = Array3::<u8>::zeros((3, 3, 4));
        mask[[0, 0, 3]] = 255;
        let out = stroke_overlay_u8(base.view(), Some(mask.view()), &StrokeStyle::new(1.0, RED)).unwrap();
        // Foreground of the mask keeps the base pixel
        assert_eq!(px(&out, 0, 0), [50, 50, 50, 50]);
        assert_eq!(px(&out, 1, 1), [255, 0, 0, 255]);
        assert_eq!(px(&out, 2, 2), [50, 50, 50, 50]);
    }

    #[test]
    fn test_mask_size_mismatch_rejected() {
        let base = Array3::<u8>::zeros((3, 3, 4));
        let mask = Array3::<u8>::zeros((3, 4, 4));
        assert!(stroke_overlay_u8(base.view(), Some(mask.view()), &StrokeStyle::new(1.0, RED)).is_err());
    }

    #[test]
    fn test_radius_floors() {
        assert_eq!(StrokeStyle::new(3.9, RED).radius(), 3);
        assert_eq!(StrokeStyle::new(-1.0, RED).radius(), 0);
        assert!(!StrokeStyle::default().is_visible());
    }
}
