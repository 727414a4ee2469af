//! Filter modules for image processing.
//!
//! ## Image Format
//!
//! | Format | Shape | Type | Description |
//! |--------|-------|------|-------------|
//! | RGBA8 | (H, W, 4) | u8 | RGB + alpha, 0-255 |
//! | RGBA float | (H, W, 4) | f32 | RGB + alpha, 0.0-1.0 |
//!
//! The float form is internal to the convolution path; every public filter
//! takes and returns RGBA8.
//!
//! ## Architecture
//!
//! - **Pure** - filters read a view and return a new image
//! - **Alpha preservation** - alpha is never modified by a color filter
//! - **Parallel** - rows or pixels are processed with rayon
//!
//! ## Filter Categories
//!
//! - **Convolution**: gaussian blur, unsharp mask
//! - **Pixel-wise**: grayscale, threshold, contrast
//! - **Morphology**: binary alpha mask dilation

pub mod core;
pub mod convert;
pub mod blur;
pub mod sharpen;
pub mod grayscale;
pub mod stylize;
pub mod color_adjust;
pub mod morphology;
