//! Filter pipeline: original image, cumulative base, rendered display.
//!
//! The pipeline owns two buffers:
//! - `original`, captured on load and never modified
//! - `base`, the result of every destructive filter applied so far
//!
//! Destructive filters replace `base` wholesale and are order-dependent.
//! The stroke overlay is applied only when rendering, from the current
//! `base`, so changing stroke settings never touches the filter history.

use std::fmt;
use std::str::FromStr;

use ndarray::{Array3, ArrayView3};

use crate::config::ValidatedSettings;
use crate::error::{FilterError, Result};
use crate::filters::color_adjust::contrast_u8;
use crate::filters::convert::{ensure_rgba, pixels_from_raw};
use crate::filters::grayscale::grayscale_rgba_u8;
use crate::filters::sharpen::{unsharp_mask_u8, UnsharpParams};
use crate::filters::stylize::threshold_u8;
use crate::layer_effects::stroke::{stroke_overlay_u8, StrokeStyle};

/// A destructive filter: consumes the current base and produces the next.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Filter {
    Unsharp(UnsharpParams),
    Grayscale,
    Threshold,
    /// Contrast amount in (-255, 255).
    Contrast(f32),
}

impl Filter {
    /// Run the filter on an image without touching any pipeline state.
    pub fn apply_to(&self, image: ArrayView3<u8>) -> Result<Array3<u8>> {
        match self {
            Filter::Unsharp(params) => unsharp_mask_u8(image, params),
            Filter::Grayscale => grayscale_rgba_u8(image),
            Filter::Threshold => threshold_u8(image),
            Filter::Contrast(amount) => contrast_u8(image, *amount),
        }
    }

    pub fn kind(&self) -> FilterKind {
        match self {
            Filter::Unsharp(_) => FilterKind::Unsharp,
            Filter::Grayscale => FilterKind::Grayscale,
            Filter::Threshold => FilterKind::Threshold,
            Filter::Contrast(_) => FilterKind::Contrast,
        }
    }
}

/// Filter names as they appear on command lines and in bindings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FilterKind {
    Unsharp,
    Grayscale,
    Threshold,
    Contrast,
}

impl FilterKind {
    /// Build the concrete filter, taking parameters from `settings`.
    pub fn with_settings(self, settings: &ValidatedSettings) -> Filter {
        match self {
            FilterKind::Unsharp => Filter::Unsharp(settings.unsharp),
            FilterKind::Grayscale => Filter::Grayscale,
            FilterKind::Threshold => Filter::Threshold,
            FilterKind::Contrast => Filter::Contrast(settings.contrast_amount),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FilterKind::Unsharp => "unsharp",
            FilterKind::Grayscale => "grayscale",
            FilterKind::Threshold => "threshold",
            FilterKind::Contrast => "contrast",
        }
    }
}

impl FromStr for FilterKind {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "unsharp" | "sharpen" => Ok(FilterKind::Unsharp),
            "grayscale" | "greyscale" => Ok(FilterKind::Grayscale),
            "threshold" => Ok(FilterKind::Threshold),
            "contrast" => Ok(FilterKind::Contrast),
            other => Err(FilterError::InvalidParameter(format!(
                "unknown filter {other:?}, expected one of unsharp, grayscale, threshold, contrast"
            ))),
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Owns the original and cumulative images of one editing session.
#[derive(Clone, Debug)]
pub struct FilterPipeline {
    original: Array3<u8>,
    base: Array3<u8>,
}

impl FilterPipeline {
    /// Start a session from an RGBA image. Original and base both start as
    /// this image.
    pub fn new(pixels: Array3<u8>) -> Result<Self> {
        ensure_rgba(&pixels.view())?;
        let (height, width, _) = pixels.dim();
        tracing::debug!(height, width, "pipeline loaded");
        Ok(FilterPipeline {
            base: pixels.clone(),
            original: pixels,
        })
    }

    /// Start a session from flat RGBA bytes.
    pub fn from_raw(data: Vec<u8>, width: usize, height: usize) -> Result<Self> {
        Self::new(pixels_from_raw(data, width, height)?)
    }

    /// Replace the session's image. Discards all filter history.
    pub fn load(&mut self, pixels: Array3<u8>) -> Result<()> {
        *self = Self::new(pixels)?;
        Ok(())
    }

    /// Apply a destructive filter: `base := filter(base)`.
    ///
    /// On error the base is left as it was.
    pub fn apply(&mut self, filter: &Filter) -> Result<()> {
        tracing::debug!(filter = %filter.kind(), "applying filter");
        self.base = filter.apply_to(self.base.view())?;
        Ok(())
    }

    /// Apply filters in order, stopping at the first failure. Filters before
    /// the failing one stay applied.
    pub fn apply_all<'a>(&mut self, filters: impl IntoIterator<Item = &'a Filter>) -> Result<()> {
        for filter in filters {
            self.apply(filter)?;
        }
        Ok(())
    }

    /// Throw away all filters: `base := original`.
    pub fn reset(&mut self) {
        tracing::debug!("pipeline reset");
        self.base = self.original.clone();
    }

    /// Produce the image to display.
    ///
    /// With a visible stroke, the halo is painted around `mask_source`'s
    /// silhouette (the original image when `None`) on a copy of the base.
    /// The base itself is never modified.
    pub fn render<'a>(
        &'a self,
        stroke: &StrokeStyle,
        mask_source: Option<ArrayView3<'a, u8>>,
    ) -> Result<Array3<u8>> {
        if !stroke.is_visible() {
            return Ok(self.base.clone());
        }
        let mask_source = mask_source.unwrap_or(self.original.view());
        stroke_overlay_u8(self.base.view(), Some(mask_source), stroke)
    }

    pub fn original(&self) -> ArrayView3<u8> {
        self.original.view()
    }

    pub fn base(&self) -> ArrayView3<u8> {
        self.base.view()
    }

    /// (width, height)
    pub fn dimensions(&self) -> (usize, usize) {
        let (height, width, _) = self.original.dim();
        (width, height)
    }
}
