//! Core utilities shared by the convolution-based filters.
//!
//! Currently this is the Gaussian kernel builder used by blur and unsharp mask.

use crate::error::{FilterError, Result};

/// Largest sigma the kernel builder honors. Wider requests are capped.
pub const MAX_SIGMA: f32 = 50.0;

/// Normalized, symmetric 1D convolution kernel.
///
/// Holds `2 * radius + 1` non-negative weights summing to 1.
#[derive(Clone, Debug, PartialEq)]
pub struct Kernel {
    weights: Vec<f32>,
    radius: usize,
}

impl Kernel {
    /// The single-tap kernel `[1.0]`. Convolving with it is the identity.
    pub fn identity() -> Self {
        Kernel {
            weights: vec![1.0],
            radius: 0,
        }
    }

    /// Wrap caller-supplied weights. The length must be odd and non-zero.
    /// Weights are used as given, without renormalization.
    pub fn from_weights(weights: Vec<f32>) -> Result<Self> {
        if weights.len() % 2 == 0 {
            return Err(FilterError::InvalidParameter(format!(
                "kernel length must be odd, got {}",
                weights.len()
            )));
        }
        let radius = weights.len() / 2;
        Ok(Kernel { weights, radius })
    }

    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    /// Half-width; the kernel covers offsets `-radius..=radius`.
    pub fn radius(&self) -> usize {
        self.radius
    }

    /// True only for the single unit weight `[1.0]`.
    pub fn is_identity(&self) -> bool {
        self.weights == [1.0]
    }
}

/// Generate a 1D Gaussian kernel.
///
/// `radius = ceil(3 * sigma)` (covers 99.7% of the distribution). Weights are
/// `exp(-i² / 2σ²)` for `i` in `-radius..=radius`, normalized to sum to 1.
/// Weights are accumulated in f64 so the normalization stays tight even for
/// the widest kernels.
///
/// `sigma <= 0` (or NaN) gives the identity kernel. Sigma above
/// [`MAX_SIGMA`], infinity included, is capped so the radius stays bounded.
///
/// # Arguments
/// * `sigma` - Standard deviation of the Gaussian
pub fn gaussian_kernel_1d(sigma: f32) -> Kernel {
    if !(sigma > 0.0) {
        return Kernel::identity();
    }
    if sigma > MAX_SIGMA {
        tracing::warn!(sigma, max = MAX_SIGMA, "sigma out of range, capping");
    }

    let sigma = sigma.min(MAX_SIGMA) as f64;
    let radius = (3.0 * sigma).ceil() as usize;
    let denom = 2.0 * sigma * sigma;

    let raw: Vec<f64> = (0..=2 * radius)
        .map(|i| {
            let x = i as f64 - radius as f64;
            (-x * x / denom).exp()
        })
        .collect();

    let sum: f64 = raw.iter().sum();
    let weights = raw.iter().map(|&w| (w / sum) as f32).collect();

    Kernel { weights, radius }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kernel_sums_to_one() {
        for &sigma in &[0.1f32, 0.5, 1.0, 2.5, 7.0, 20.0, 50.0] {
            let k = gaussian_kernel_1d(sigma);
            let sum: f64 = k.weights().iter().map(|&w| w as f64).sum();
            assert!((sum - 1.0).abs() < 1e-5, "sigma {sigma}: sum {sum}");
        }
    }

    #[test]
    fn test_kernel_radius_is_three_sigma() {
        let k = gaussian_kernel_1d(1.0);
        assert_eq!(k.radius(), 3);
        assert_eq!(k.weights().len(), 7);

        let k = gaussian_kernel_1d(0.4);
        // ceil(1.2) = 2
        assert_eq!(k.radius(), 2);
        assert_eq!(k.weights().len(), 5);

        let k = gaussian_kernel_1d(20.0);
        assert_eq!(k.radius(), 60);
    }

    #[test]
    fn test_kernel_degenerate_sigma() {
        for &sigma in &[0.0f32, -1.0, f32::NAN] {
            let k = gaussian_kernel_1d(sigma);
            assert_eq!(k.weights(), &[1.0]);
            assert_eq!(k.radius(), 0);
            assert!(k.is_identity());
        }
    }

    #[test]
    fn test_from_weights_requires_odd_length() {
        assert!(Kernel::from_weights(vec![0.5, 0.5]).is_err());
        assert!(Kernel::from_weights(vec![]).is_err());
        let k = Kernel::from_weights(vec![0.25, 0.5, 0.25]).unwrap();
        assert_eq!(k.radius(), 1);
        assert!(!k.is_identity());
    }

    #[test]
    fn test_single_tap_identity_needs_unit_weight() {
        assert!(Kernel::identity().is_identity());
        assert!(Kernel::from_weights(vec![1.0]).unwrap().is_identity());
        let half = Kernel::from_weights(vec![0.5]).unwrap();
        assert_eq!(half.radius(), 0);
        assert!(!half.is_identity());
    }

    #[test]
    fn test_huge_sigma_is_capped() {
        let capped = gaussian_kernel_1d(MAX_SIGMA);
        for &sigma in &[1.0e6f32, 1.0e30, f32::MAX, f32::INFINITY] {
            assert_eq!(gaussian_kernel_1d(sigma), capped, "sigma {sigma}");
        }
        assert_eq!(capped.radius(), 150);
        assert!(gaussian_kernel_1d(f32::NEG_INFINITY).is_identity());
    }

    #[test]
    fn test_kernel_symmetric_and_peaked() {
        let k = gaussian_kernel_1d(2.0);
        let w = k.weights();
        let r = k.radius();
        for i in 0..r {
            assert!((w[i] - w[w.len() - 1 - i]).abs() < 1e-7);
            assert!(w[i] < w[i + 1]);
            assert!(w[i] >= 0.0);
        }
    }
}
