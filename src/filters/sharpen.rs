//! Unsharp mask.
//!
//! Sharpens by adding back the difference between the image and a Gaussian
//! blurred copy of it: `src + amount * (src - blurred)`. Differences smaller
//! than `threshold` (in 0-255 units) are ignored so flat, noisy regions stay
//! flat.
//!
//! ## Alpha Handling
//!
//! The blur runs over all four channels, but the blurred alpha is discarded.
//! Output alpha is always the input alpha, byte for byte.

use ndarray::{Array3, ArrayView3, Axis, Zip};

use super::blur::convolve_separable;
use super::convert::{ensure_rgba, f32_to_u8_with_alpha, u8_to_f32};
use super::core::{gaussian_kernel_1d, Kernel};
use crate::error::Result;

/// Unsharp mask parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UnsharpParams {
    /// Sharpening strength (0.0-10.0).
    pub amount: f32,
    /// Gaussian sigma of the blurred copy (0.0-50.0).
    pub sigma: f32,
    /// Noise gate (0-255). Differences with `|src - blurred| * 255 < threshold`
    /// are left alone.
    pub threshold: u8,
    /// How many times the mask is applied, each pass consuming the previous
    /// pass's output. 0 leaves the image untouched.
    pub iterations: u32,
}

impl Default for UnsharpParams {
    fn default() -> Self {
        UnsharpParams {
            amount: 5.0,
            sigma: 20.0,
            threshold: 5,
            iterations: 2,
        }
    }
}

impl UnsharpParams {
    /// Single-pass parameters.
    pub fn once(amount: f32, sigma: f32, threshold: u8) -> Self {
        UnsharpParams {
            amount,
            sigma,
            threshold,
            iterations: 1,
        }
    }
}

/// Apply unsharp mask - u8 version.
///
/// # Arguments
/// * `input` - RGBA image (height, width, 4)
/// * `params` - Strength, blur sigma, noise gate and iteration count
///
/// # Returns
/// Sharpened image with the input's alpha
pub fn unsharp_mask_u8(input: ArrayView3<u8>, params: &UnsharpParams) -> Result<Array3<u8>> {
    ensure_rgba(&input)?;
    let (height, width, _) = input.dim();
    let kernel = gaussian_kernel_1d(params.sigma);
    tracing::debug!(
        height,
        width,
        amount = params.amount,
        sigma = params.sigma,
        radius = kernel.radius(),
        threshold = params.threshold,
        iterations = params.iterations,
        "unsharp mask"
    );

    let mut current = input.to_owned();
    for _ in 0..params.iterations {
        current = unsharp_pass(current.view(), &kernel, params.amount, params.threshold)?;
    }
    Ok(current)
}

/// One unsharp pass with a prebuilt kernel.
fn unsharp_pass(input: ArrayView3<u8>, kernel: &Kernel, amount: f32, threshold: u8) -> Result<Array3<u8>> {
    let src = u8_to_f32(input);
    let blurred = convolve_separable(src.view(), kernel);
    let sharpened = unsharp_combine_f32(src.view(), blurred.view(), amount, threshold as f32);
    f32_to_u8_with_alpha(sharpened.view(), input)
}

/// Combine a source image with its blurred copy - f32 version.
///
/// For each RGB channel `m = src - blurred`; `m` counts as zero when
/// `|m| * 255 < threshold`; the result is `clamp(src + amount * m, 0, 1)`.
/// Alpha is copied from `src`.
///
/// # Arguments
/// * `src` - RGBA image (height, width, 4), values 0.0-1.0
/// * `blurred` - Blurred copy of `src`, same shape
/// * `amount` - Sharpening strength
/// * `threshold` - Noise gate in 0-255 units
pub fn unsharp_combine_f32(
    src: ArrayView3<f32>,
    blurred: ArrayView3<f32>,
    amount: f32,
    threshold: f32,
) -> Array3<f32> {
    let mut output = Array3::<f32>::zeros(src.dim());

    Zip::from(output.lanes_mut(Axis(2)))
        .and(src.lanes(Axis(2)))
        .and(blurred.lanes(Axis(2)))
        .par_for_each(|mut out, s, b| {
            for c in 0..3 {
                let mut m = s[c] - b[c];
                if m.abs() * 255.0 < threshold {
                    m = 0.0;
                }
                out[c] = (s[c] + amount * m).clamp(0.0, 1.0);
            }
            out[3] = s[3];
        });

    output
}
