// ============================================================================
// pixelpipe CLI: run a filter chain and stroke overlay on one image file
// ============================================================================
//
// Usage examples:
//   pixelpipe -i photo.png -o sharp.png --filter unsharp
//   pixelpipe -i logo.png -o out.png --filter grayscale --filter contrast --contrast 60
//   pixelpipe -i sticker.png -o outlined.png --stroke-size 6 --stroke-color "#FF8800"
//
// Filters run in the order given. The stroke is painted last, around the
// silhouette of the input image.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use pixelpipe::filters::convert::pixels_into_raw;
use pixelpipe::{FilterError, FilterKind, FilterPipeline, FilterSettings};

/// Sharpen, recolor and outline RGBA images.
#[derive(Parser, Debug)]
#[command(name = "pixelpipe", version, about)]
struct CliArgs {
    /// Input image (any format the `image` crate decodes).
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,

    /// Output image; format follows the extension.
    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,

    /// Filter to apply: unsharp, grayscale, threshold, contrast. Repeatable,
    /// applied in order.
    #[arg(short, long = "filter", value_name = "NAME")]
    filters: Vec<FilterKind>,

    /// Unsharp strength (0-10).
    #[arg(long, default_value_t = 5.0)]
    amount: f32,

    /// Unsharp blur sigma (0-50).
    #[arg(long, default_value_t = 20.0)]
    sigma: f32,

    /// Unsharp noise gate (0-255).
    #[arg(long, default_value_t = 5)]
    threshold: u8,

    /// How many times the unsharp mask is applied.
    #[arg(long, default_value_t = 2)]
    iterations: u32,

    /// Contrast amount (-255 to 255).
    #[arg(long, default_value_t = 40.0, allow_negative_numbers = true)]
    contrast: f32,

    /// Stroke halo radius in pixels (0-40, 0 disables).
    #[arg(long, default_value_t = 0)]
    stroke_size: u32,

    /// Stroke color as 6 hex digits.
    #[arg(long, default_value = "#000000")]
    stroke_color: String,

    /// Log every operator and its timing.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("{path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error(transparent)]
    Filter(#[from] FilterError),
}

impl CliArgs {
    fn settings(&self) -> FilterSettings {
        FilterSettings {
            amount: self.amount,
            sigma: self.sigma,
            threshold: self.threshold,
            unsharp_iterations: self.iterations,
            contrast_amount: self.contrast,
            stroke_size: self.stroke_size,
            stroke_color: self.stroke_color.clone(),
        }
    }
}

fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_tracing(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "pixelpipe=debug" } else { "pixelpipe=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &CliArgs) -> Result<(), CliError> {
    // Validate everything before decoding so bad flags fail fast
    let settings = args.settings().validated()?;
    let chain: Vec<_> = args.filters.iter().map(|kind| kind.with_settings(&settings)).collect();

    let decoded = image::open(&args.input)
        .map_err(|source| CliError::Image {
            path: args.input.clone(),
            source,
        })?
        .to_rgba8();
    let (width, height) = decoded.dimensions();
    tracing::info!(input = %args.input.display(), width, height, "loaded");

    let mut pipeline = FilterPipeline::from_raw(decoded.into_raw(), width as usize, height as usize)?;
    for filter in &chain {
        let start = Instant::now();
        pipeline.apply(filter)?;
        tracing::info!(filter = %filter.kind(), elapsed_ms = start.elapsed().as_millis() as u64, "filter applied");
    }

    let rendered = pipeline.render(&settings.stroke, None)?;
    let out = image::RgbaImage::from_raw(width, height, pixels_into_raw(rendered)).ok_or_else(|| {
        FilterError::InvalidDimensions {
            expected: format!("{width}x{height} RGBA"),
            actual: "rendered buffer of a different size".to_string(),
        }
    })?;
    out.save(&args.output).map_err(|source| CliError::Image {
        path: args.output.clone(),
        source,
    })?;
    tracing::info!(output = %args.output.display(), "saved");

    Ok(())
}
