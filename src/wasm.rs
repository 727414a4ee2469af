//! WebAssembly exports.
//!
//! These functions are exposed to JavaScript via wasm-bindgen. Every
//! function takes a flat RGBA byte array (length = width * height * 4)
//! plus its dimensions and returns a new flat RGBA array of the same size.
//! Bad dimensions, colors or parameters surface as JS exceptions.

use wasm_bindgen::prelude::*;

use crate::color::Color;
use crate::error::FilterError;
use crate::filters::blur::gaussian_blur_u8;
use crate::filters::color_adjust::contrast_u8;
use crate::filters::convert::{pixels_from_raw, pixels_into_raw};
use crate::filters::grayscale::grayscale_rgba_u8;
use crate::filters::sharpen::{unsharp_mask_u8, UnsharpParams};
use crate::filters::stylize::threshold_u8;
use crate::layer_effects::stroke::{stroke_overlay_u8, StrokeStyle};
use crate::pipeline::{Filter, FilterPipeline};

fn js_err(err: FilterError) -> JsError {
    JsError::new(&err.to_string())
}

// ============================================================================
// Filters
// ============================================================================

#[wasm_bindgen]
pub fn grayscale_rgba_wasm(data: &[u8], width: usize, height: usize) -> Result<Vec<u8>, JsError> {
    let input = pixels_from_raw(data.to_vec(), width, height).map_err(js_err)?;
    let result = grayscale_rgba_u8(input.view()).map_err(js_err)?;
    Ok(pixels_into_raw(result))
}

#[wasm_bindgen]
pub fn threshold_rgba_wasm(data: &[u8], width: usize, height: usize) -> Result<Vec<u8>, JsError> {
    let input = pixels_from_raw(data.to_vec(), width, height).map_err(js_err)?;
    let result = threshold_u8(input.view()).map_err(js_err)?;
    Ok(pixels_into_raw(result))
}

#[wasm_bindgen]
pub fn contrast_rgba_wasm(data: &[u8], width: usize, height: usize, amount: f32) -> Result<Vec<u8>, JsError> {
    let input = pixels_from_raw(data.to_vec(), width, height).map_err(js_err)?;
    let result = contrast_u8(input.view(), amount).map_err(js_err)?;
    Ok(pixels_into_raw(result))
}

#[wasm_bindgen]
pub fn unsharp_mask_rgba_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    amount: f32,
    sigma: f32,
    threshold: u8,
    iterations: u32,
) -> Result<Vec<u8>, JsError> {
    let input = pixels_from_raw(data.to_vec(), width, height).map_err(js_err)?;
    let params = UnsharpParams {
        amount,
        sigma,
        threshold,
        iterations,
    };
    let result = unsharp_mask_u8(input.view(), &params).map_err(js_err)?;
    Ok(pixels_into_raw(result))
}

#[wasm_bindgen]
pub fn gaussian_blur_rgba_wasm(data: &[u8], width: usize, height: usize, sigma: f32) -> Result<Vec<u8>, JsError> {
    let input = pixels_from_raw(data.to_vec(), width, height).map_err(js_err)?;
    Ok(pixels_into_raw(gaussian_blur_u8(input.view(), sigma)))
}

/// Outside stroke around the alpha silhouette of `data`.
#[wasm_bindgen]
pub fn stroke_overlay_rgba_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    size: f32,
    color: &str,
) -> Result<Vec<u8>, JsError> {
    let input = pixels_from_raw(data.to_vec(), width, height).map_err(js_err)?;
    let style = StrokeStyle::new(size, Color::from_hex(color).map_err(js_err)?);
    let result = stroke_overlay_u8(input.view(), None, &style).map_err(js_err)?;
    Ok(pixels_into_raw(result))
}

// ============================================================================
// Pipeline
// ============================================================================

/// Editing session for JavaScript callers.
#[wasm_bindgen]
pub struct WasmFilterPipeline {
    inner: FilterPipeline,
}

#[wasm_bindgen]
impl WasmFilterPipeline {
    #[wasm_bindgen(constructor)]
    pub fn new(data: &[u8], width: usize, height: usize) -> Result<WasmFilterPipeline, JsError> {
        let inner = FilterPipeline::from_raw(data.to_vec(), width, height).map_err(js_err)?;
        Ok(WasmFilterPipeline { inner })
    }

    pub fn unsharp(&mut self, amount: f32, sigma: f32, threshold: u8, iterations: u32) -> Result<(), JsError> {
        let params = UnsharpParams {
            amount,
            sigma,
            threshold,
            iterations,
        };
        self.inner.apply(&Filter::Unsharp(params)).map_err(js_err)
    }

    pub fn grayscale(&mut self) -> Result<(), JsError> {
        self.inner.apply(&Filter::Grayscale).map_err(js_err)
    }

    pub fn threshold(&mut self) -> Result<(), JsError> {
        self.inner.apply(&Filter::Threshold).map_err(js_err)
    }

    pub fn contrast(&mut self, amount: f32) -> Result<(), JsError> {
        self.inner.apply(&Filter::Contrast(amount)).map_err(js_err)
    }

    pub fn reset(&mut self) {
        self.inner.reset();
    }

    pub fn render(&self, stroke_size: f32, stroke_color: &str) -> Result<Vec<u8>, JsError> {
        let style = StrokeStyle::new(stroke_size, Color::from_hex(stroke_color).map_err(js_err)?);
        let result = self.inner.render(&style, None).map_err(js_err)?;
        Ok(pixels_into_raw(result))
    }
}
