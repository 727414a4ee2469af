//! Filter settings with defaults and range validation.
//!
//! Numeric settings outside their range are clamped (with a warning), not
//! rejected. Only a malformed color or a contrast amount with no defined
//! result fails validation.

use crate::color::Color;
use crate::error::Result;
use crate::filters::color_adjust::contrast_factor;
use crate::filters::core::MAX_SIGMA;
use crate::filters::sharpen::UnsharpParams;
use crate::layer_effects::stroke::StrokeStyle;

pub const AMOUNT_RANGE: (f32, f32) = (0.0, 10.0);
pub const SIGMA_RANGE: (f32, f32) = (0.0, MAX_SIGMA);
pub const STROKE_SIZE_RANGE: (u32, u32) = (0, 40);

/// Every user-facing parameter of the filter chain.
#[derive(Clone, Debug, PartialEq)]
pub struct FilterSettings {
    /// Unsharp strength, 0-10.
    pub amount: f32,
    /// Unsharp blur sigma, 0-50. Front-ends sometimes label this "radius".
    pub sigma: f32,
    /// Unsharp noise gate, 0-255.
    pub threshold: u8,
    pub unsharp_iterations: u32,
    /// Contrast amount, (-255, 255), 259 is invalid.
    pub contrast_amount: f32,
    /// Stroke halo radius in pixels, 0-40.
    pub stroke_size: u32,
    /// Stroke color as a 6-digit hex string.
    pub stroke_color: String,
}

impl Default for FilterSettings {
    fn default() -> Self {
        FilterSettings {
            amount: 5.0,
            sigma: 20.0,
            threshold: 5,
            unsharp_iterations: 2,
            contrast_amount: 40.0,
            stroke_size: 0,
            stroke_color: "#000000".to_string(),
        }
    }
}

/// Settings after clamping and parsing.
#[derive(Clone, Debug, PartialEq)]
pub struct ValidatedSettings {
    pub unsharp: UnsharpParams,
    pub contrast_amount: f32,
    pub stroke: StrokeStyle,
}

impl FilterSettings {
    /// Clamp numeric ranges and parse the color.
    ///
    /// # Errors
    /// `InvalidColor` for a malformed stroke color, `InvalidParameter` for a
    /// contrast amount of 259 or a non-finite one.
    pub fn validated(&self) -> Result<ValidatedSettings> {
        let color: Color = self.stroke_color.parse()?;
        contrast_factor(self.contrast_amount)?;

        let amount = clamp_logged("amount", self.amount, AMOUNT_RANGE);
        let sigma = clamp_logged("sigma", self.sigma, SIGMA_RANGE);
        let stroke_size = clamp_logged("stroke_size", self.stroke_size, STROKE_SIZE_RANGE);

        Ok(ValidatedSettings {
            unsharp: UnsharpParams {
                amount,
                sigma,
                threshold: self.threshold,
                iterations: self.unsharp_iterations,
            },
            contrast_amount: self.contrast_amount,
            stroke: StrokeStyle::new(stroke_size as f32, color),
        })
    }
}

fn clamp_logged<T>(name: &str, value: T, (lo, hi): (T, T)) -> T
where
    T: PartialOrd + Copy + std::fmt::Display,
{
    // NaN compares false both ways and falls through to `lo`
    let clamped = if value >= lo && value <= hi {
        value
    } else if value > hi {
        hi
    } else {
        lo
    };
    if clamped != value {
        tracing::warn!(setting = name, %value, %clamped, "setting out of range, clamping");
    }
    clamped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FilterError;

    #[test]
    fn test_defaults() {
        let s = FilterSettings::default();
        let v = s.validated().unwrap();
        assert_eq!(v.unsharp, UnsharpParams::default());
        assert_eq!(v.contrast_amount, 40.0);
        assert_eq!(v.stroke, StrokeStyle::new(0.0, Color::BLACK));
    }

    #[test]
    fn test_numeric_settings_clamp() {
        let s = FilterSettings {
            amount: 25.0,
            sigma: -4.0,
            stroke_size: 99,
            ..FilterSettings::default()
        };
        let v = s.validated().unwrap();
        assert_eq!(v.unsharp.amount, 10.0);
        assert_eq!(v.unsharp.sigma, 0.0);
        assert_eq!(v.stroke.radius(), 40);

        let s = FilterSettings {
            amount: f32::NAN,
            ..FilterSettings::default()
        };
        assert_eq!(s.validated().unwrap().unsharp.amount, 0.0);
    }

    #[test]
    fn test_invalid_color_and_contrast() {
        let s = FilterSettings {
            stroke_color: "red".into(),
            ..FilterSettings::default()
        };
        assert!(matches!(s.validated(), Err(FilterError::InvalidColor(_))));

        let s = FilterSettings {
            contrast_amount: 259.0,
            ..FilterSettings::default()
        };
        assert!(matches!(s.validated(), Err(FilterError::InvalidParameter(_))));
    }
}
