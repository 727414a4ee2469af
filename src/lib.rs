//! pixelpipe
//!
//! Small RGBA image-editing core: unsharp masking, grayscale, threshold and
//! contrast as destructive filters, plus a non-destructive stroke (halo)
//! overlay drawn around an alpha silhouette. Python bindings via PyO3 and
//! WASM bindings for JavaScript are available behind features.
//!
//! ## Image Format
//! Images are `ndarray` arrays of shape (height, width, 4), RGBA:
//! - `u8`: 8-bit per channel (0-255), used by every public filter
//! - `f32`: Float per channel (0.0-1.0), used inside blur and unsharp mask
//!
//! Flat byte buffers convert with [`filters::convert::pixels_from_raw`],
//! which rejects lengths other than `width * height * 4`.
//!
//! ## Editing Model
//! [`FilterPipeline`] keeps the loaded original and the cumulative "base"
//! image. Destructive filters replace the base in order; the stroke is
//! painted only when rendering and never feeds back into the base.

pub mod color;
pub mod config;
pub mod error;
pub mod filters;
pub mod layer_effects;
pub mod pipeline;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use color::Color;
pub use config::{FilterSettings, ValidatedSettings};
pub use error::{FilterError, Result};
pub use filters::core::{gaussian_kernel_1d, Kernel};
pub use filters::sharpen::UnsharpParams;
pub use layer_effects::stroke::StrokeStyle;
pub use pipeline::{Filter, FilterKind, FilterPipeline};

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use numpy::{IntoPyArray, PyArray3, PyReadonlyArray3};
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;

    use crate::color::Color;
    use crate::error::FilterError;
    use crate::filters::blur::gaussian_blur_u8;
    use crate::filters::color_adjust::contrast_u8;
    use crate::filters::grayscale::grayscale_rgba_u8;
    use crate::filters::sharpen::{unsharp_mask_u8, UnsharpParams};
    use crate::filters::stylize::threshold_u8;
    use crate::layer_effects::stroke::{stroke_overlay_u8, StrokeStyle};
    use crate::pipeline::{Filter, FilterPipeline};

    impl From<FilterError> for PyErr {
        fn from(err: FilterError) -> Self {
            PyValueError::new_err(err.to_string())
        }
    }

    // ========================================================================
    // Filters
    // ========================================================================

    /// Convert RGBA u8 image to grayscale (BT.601 luma). Alpha preserved.
    #[pyfunction]
    pub fn grayscale<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let result = grayscale_rgba_u8(image.as_array())?;
        Ok(result.into_pyarray(py))
    }

    /// Binary threshold on the RGB average (> 127 is white).
    #[pyfunction]
    pub fn threshold<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let result = threshold_u8(image.as_array())?;
        Ok(result.into_pyarray(py))
    }

    /// Linear contrast. `amount` in (-255, 255); 259 raises ValueError.
    #[pyfunction]
    #[pyo3(signature = (image, amount=40.0))]
    pub fn contrast<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        amount: f32,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let result = contrast_u8(image.as_array(), amount)?;
        Ok(result.into_pyarray(py))
    }

    /// Unsharp mask, applied `iterations` times.
    #[pyfunction]
    #[pyo3(signature = (image, amount=5.0, sigma=20.0, threshold=5, iterations=2))]
    pub fn unsharp_mask<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        amount: f32,
        sigma: f32,
        threshold: u8,
        iterations: u32,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let params = UnsharpParams {
            amount,
            sigma,
            threshold,
            iterations,
        };
        let result = unsharp_mask_u8(image.as_array(), &params)?;
        Ok(result.into_pyarray(py))
    }

    /// Gaussian blur of all four channels.
    #[pyfunction]
    pub fn gaussian_blur<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        sigma: f32,
    ) -> Bound<'py, PyArray3<u8>> {
        gaussian_blur_u8(image.as_array(), sigma).into_pyarray(py)
    }

    /// Outside stroke around the alpha silhouette of `mask` (or `image`).
    #[pyfunction]
    #[pyo3(signature = (image, size, color="#000000", mask=None))]
    pub fn stroke_overlay<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        size: f32,
        color: &str,
        mask: Option<PyReadonlyArray3<'py, u8>>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let style = StrokeStyle::new(size, Color::from_hex(color)?);
        let mask_view = mask.as_ref().map(|m| m.as_array());
        let result = stroke_overlay_u8(image.as_array(), mask_view, &style)?;
        Ok(result.into_pyarray(py))
    }

    // ========================================================================
    // Pipeline
    // ========================================================================

    /// Editing session holding the original and the filtered base image.
    #[pyclass(name = "FilterPipeline")]
    pub struct PyFilterPipeline {
        inner: FilterPipeline,
    }

    #[pymethods]
    impl PyFilterPipeline {
        #[new]
        fn new(image: PyReadonlyArray3<'_, u8>) -> PyResult<Self> {
            let inner = FilterPipeline::new(image.as_array().to_owned())?;
            Ok(PyFilterPipeline { inner })
        }

        #[pyo3(signature = (amount=5.0, sigma=20.0, threshold=5, iterations=2))]
        fn unsharp(&mut self, amount: f32, sigma: f32, threshold: u8, iterations: u32) -> PyResult<()> {
            let params = UnsharpParams {
                amount,
                sigma,
                threshold,
                iterations,
            };
            Ok(self.inner.apply(&Filter::Unsharp(params))?)
        }

        fn grayscale(&mut self) -> PyResult<()> {
            Ok(self.inner.apply(&Filter::Grayscale)?)
        }

        fn threshold(&mut self) -> PyResult<()> {
            Ok(self.inner.apply(&Filter::Threshold)?)
        }

        #[pyo3(signature = (amount=40.0))]
        fn contrast(&mut self, amount: f32) -> PyResult<()> {
            Ok(self.inner.apply(&Filter::Contrast(amount))?)
        }

        fn reset(&mut self) {
            self.inner.reset();
        }

        #[pyo3(signature = (stroke_size=0.0, stroke_color="#000000"))]
        fn render<'py>(
            &self,
            py: Python<'py>,
            stroke_size: f32,
            stroke_color: &str,
        ) -> PyResult<Bound<'py, PyArray3<u8>>> {
            let style = StrokeStyle::new(stroke_size, Color::from_hex(stroke_color)?);
            Ok(self.inner.render(&style, None)?.into_pyarray(py))
        }

        fn base<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray3<u8>> {
            self.inner.base().to_owned().into_pyarray(py)
        }

        fn original<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray3<u8>> {
            self.inner.original().to_owned().into_pyarray(py)
        }
    }

    /// pixelpipe extension module
    #[pymodule]
    pub fn pixelpipe(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(grayscale, m)?)?;
        m.add_function(wrap_pyfunction!(threshold, m)?)?;
        m.add_function(wrap_pyfunction!(contrast, m)?)?;
        m.add_function(wrap_pyfunction!(unsharp_mask, m)?)?;
        m.add_function(wrap_pyfunction!(gaussian_blur, m)?)?;
        m.add_function(wrap_pyfunction!(stroke_overlay, m)?)?;
        m.add_class::<PyFilterPipeline>()?;
        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::pixelpipe;
