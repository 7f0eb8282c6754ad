//! Pipeline orchestration.
//!
//! ```text
//! decode -> classify -> synthesize -> smooth -> blend -> grade -> encode PNG
//! ```
//!
//! Every invocation allocates its own buffers; nothing is shared between
//! runs, so a [`Colorizer`] can be cloned freely and used from many tasks.

use std::time::Instant;

use colorize_common::{ColorizeError, ColorizeResult, RgbaBuffer};
use tracing::{debug, info, warn};

use crate::blend::{blend_into, copy_alpha};
use crate::codec::{decode, encode_png, EncodedImage};
use crate::config::ColorizeConfig;
use crate::overlay::{apply_grading, GRADING_PASS};
use crate::palette::synthesize;
use crate::region::classify;
use crate::smoothing::{smooth_horizontal, Kernel};
use crate::surface::DrawingSurface;

/// A configured colorization pipeline.
#[derive(Debug, Clone, Default)]
pub struct Colorizer {
    config: ColorizeConfig,
}

impl Colorizer {
    /// Build a pipeline from a validated configuration.
    pub fn new(config: ColorizeConfig) -> ColorizeResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ColorizeConfig {
        &self.config
    }

    /// Stages 1-4: classify, synthesize, smooth and blend.
    ///
    /// The result has the original's alpha channel exactly.
    pub fn render_base(&self, original: &RgbaBuffer) -> RgbaBuffer {
        let start = Instant::now();

        let regions = classify(original);
        debug!(
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Classified regions"
        );

        let working = synthesize(original, &regions);
        debug!(
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Synthesized palette"
        );

        let kernel = Kernel::gaussian(self.config.blur_radius);
        let smoothed = smooth_horizontal(&working, &kernel);
        debug!(
            elapsed_ms = start.elapsed().as_millis() as u64,
            radius = kernel.radius(),
            "Smoothed rows"
        );

        let mut canvas = original.clone();
        blend_into(&mut canvas, &smoothed, self.config.blend_factor);
        debug!(
            elapsed_ms = start.elapsed().as_millis() as u64,
            blend_factor = self.config.blend_factor,
            "Blended with original"
        );

        canvas
    }

    /// All pixel stages, including the grading overlays when enabled.
    ///
    /// Output alpha always equals input alpha; the overlays only tint color.
    pub fn process(&self, original: &RgbaBuffer) -> ColorizeResult<RgbaBuffer> {
        let canvas = self.render_base(original);
        if !self.config.grading {
            return Ok(canvas);
        }

        let mut surface = DrawingSurface::from_buffer(&canvas)?;
        apply_grading(&mut surface, &GRADING_PASS)?;

        let mut graded = surface.to_buffer()?;
        copy_alpha(&mut graded, original);
        Ok(graded)
    }

    /// Decode, process and re-encode as PNG on the current thread.
    pub fn colorize_blocking(&self, source: &EncodedImage) -> ColorizeResult<EncodedImage> {
        let start = Instant::now();

        let original = decode(source).map_err(|e| {
            warn!(error = %e, input_bytes = source.len(), "Rejected input image");
            e
        })?;

        let (width, height) = original.dimensions();
        let processed = self.process(&original)?;
        let output = encode_png(&processed)?;

        info!(
            width,
            height,
            input_bytes = source.len(),
            output_bytes = output.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Colorization complete"
        );

        Ok(output)
    }

    /// Run [`Colorizer::colorize_blocking`] on the blocking thread pool.
    pub async fn colorize(&self, source: EncodedImage) -> ColorizeResult<EncodedImage> {
        let colorizer = self.clone();
        tokio::task::spawn_blocking(move || colorizer.colorize_blocking(&source))
            .await
            .map_err(|e| ColorizeError::TaskFailed(e.to_string()))?
    }
}

/// Colorize `source` with the default configuration.
///
/// Fails with [`ColorizeError::DecodeFailure`] if `source` is not a
/// decodable raster image.
pub async fn colorize(source: EncodedImage) -> ColorizeResult<EncodedImage> {
    Colorizer::default().colorize(source).await
}
