//! Gaussian blur via separable convolution.
//!
//! Two 1D passes, horizontal then vertical, with clamp-to-edge sampling:
//! an offset that falls outside the image reuses the nearest edge pixel.
//! All four channels are convolved, alpha included. Callers that need the
//! original alpha re-source it when converting back to u8.
//!
//! Both passes are parallelized over rows. The vertical pass reads the
//! complete horizontal result, so it only starts once that buffer is done.

use ndarray::{Array3, ArrayView3, Axis};
use rayon::prelude::*;

use super::convert::{quantize, u8_to_f32};
use super::core::{gaussian_kernel_1d, Kernel};

/// Convolve an f32 image with `kernel` along both axes.
///
/// # Arguments
/// * `input` - Image (height, width, channels), any channel count
/// * `kernel` - Normalized 1D kernel applied horizontally, then vertically
///
/// # Returns
/// Convolved image with the same dimensions
pub fn convolve_separable(input: ArrayView3<f32>, kernel: &Kernel) -> Array3<f32> {
    let (height, width, channels) = input.dim();
    if kernel.is_identity() || height == 0 || width == 0 {
        return input.to_owned();
    }

    let weights = kernel.weights();
    let half = kernel.radius() as isize;
    let max_x = width as isize - 1;
    let max_y = height as isize - 1;

    // Horizontal pass
    let mut temp = Array3::<f32>::zeros((height, width, channels));
    temp.axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .for_each(|(y, mut row)| {
            for x in 0..width {
                for c in 0..channels {
                    let mut sum = 0.0f32;
                    for (ki, &kv) in weights.iter().enumerate() {
                        let sx = (x as isize + ki as isize - half).clamp(0, max_x) as usize;
                        sum += input[[y, sx, c]] * kv;
                    }
                    row[[x, c]] = sum;
                }
            }
        });

    // Vertical pass
    let mut output = Array3::<f32>::zeros((height, width, channels));
    output
        .axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .for_each(|(y, mut row)| {
            for x in 0..width {
                for c in 0..channels {
                    let mut sum = 0.0f32;
                    for (ki, &kv) in weights.iter().enumerate() {
                        let sy = (y as isize + ki as isize - half).clamp(0, max_y) as usize;
                        sum += temp[[sy, x, c]] * kv;
                    }
                    row[[x, c]] = sum;
                }
            }
        });

    output
}

/// Apply Gaussian blur to an f32 image (values 0.0-1.0).
pub fn gaussian_blur_f32(input: ArrayView3<f32>, sigma: f32) -> Array3<f32> {
    convolve_separable(input, &gaussian_kernel_1d(sigma))
}

/// Apply Gaussian blur to an RGBA8 image.
///
/// Works in f32 for precision. Alpha is blurred along with RGB. Values are
/// rounded half away from zero and saturate at 0 and 255.
///
/// # Arguments
/// * `input` - Image (height, width, channels) as u8
/// * `sigma` - Standard deviation of the Gaussian; `<= 0` returns a copy
pub fn gaussian_blur_u8(input: ArrayView3<u8>, sigma: f32) -> Array3<u8> {
    let kernel = gaussian_kernel_1d(sigma);
    tracing::debug!(
        height = input.dim().0,
        width = input.dim().1,
        sigma,
        radius = kernel.radius(),
        "gaussian blur"
    );
    if kernel.is_identity() {
        return input.to_owned();
    }

    let blurred = convolve_separable(u8_to_f32(input).view(), &kernel);
    blurred.mapv(quantize)
}
