//! Colorize grayscale photographs from the command line.
//!
//! The binary in `main.rs` only parses arguments and installs logging; the
//! work happens in [`run`] so it can be driven from tests.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use colorizer::codec::EncodedImage;
use colorizer::session::DOWNLOAD_FILE_NAME;
use colorizer::{ColorizeConfig, ColorizeSession, Colorizer, ProcessingState};
use tracing::{info, warn, Instrument};
use uuid::Uuid;

#[derive(Parser, Debug, Clone)]
#[command(name = "colorize")]
#[command(about = "Apply heuristic colorization to a grayscale photograph")]
pub struct Args {
    /// Input image file (PNG, JPEG, ...) or a file holding a base64 data URI
    pub input: PathBuf,

    /// Where to write the colorized PNG
    #[arg(short, long, default_value = DOWNLOAD_FILE_NAME)]
    pub output: PathBuf,

    /// Print the result as a data URI on stdout instead of writing a file
    #[arg(long)]
    pub data_uri: bool,

    /// JSON pipeline configuration
    #[arg(short, long, env = "COLORIZE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the colorized/original blend factor (0.0 - 1.0)
    #[arg(long)]
    pub blend_factor: Option<f64>,

    /// Skip the warm/cool grading overlays
    #[arg(long)]
    pub no_grading: bool,

    /// Artificial delay before processing, in milliseconds
    #[arg(long, env = "COLORIZE_SIMULATED_LATENCY_MS", default_value_t = 0)]
    pub simulated_latency_ms: u64,

    /// Log level
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Number of tokio worker threads (default: number of CPU cores)
    #[arg(long)]
    pub worker_threads: Option<usize>,
}

/// What a finished run produced.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub run_id: Uuid,
    pub state: ProcessingState,
    /// Set when the result was written to disk.
    pub output_path: Option<PathBuf>,
    /// Set when `--data-uri` was given.
    pub data_uri: Option<String>,
    pub output_bytes: usize,
}

/// Build the pipeline configuration from `--config` plus flag overrides.
pub fn load_config(args: &Args) -> Result<ColorizeConfig> {
    let mut config = match &args.config {
        Some(path) => ColorizeConfig::from_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => ColorizeConfig::default(),
    };

    if let Some(factor) = args.blend_factor {
        config.blend_factor = factor;
    }
    if args.no_grading {
        config.grading = false;
    }

    config.validate().context("invalid pipeline configuration")?;
    Ok(config)
}

/// Read `path` as raw image bytes, or as a data URI when the file starts
/// with `data:`.
pub async fn read_input(path: &Path) -> Result<EncodedImage> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("reading {}", path.display()))?;

    if bytes.starts_with(b"data:") {
        let text = String::from_utf8(bytes).context("data URI is not valid UTF-8")?;
        return EncodedImage::from_data_uri(&text).context("parsing data URI");
    }

    Ok(EncodedImage::from_bytes(bytes))
}

/// Colorize one image as described by `args`.
pub async fn run(args: &Args) -> Result<RunReport> {
    let run_id = Uuid::new_v4();
    let span = tracing::info_span!("colorize", %run_id);
    run_inner(args, run_id).instrument(span).await
}

async fn run_inner(args: &Args, run_id: Uuid) -> Result<RunReport> {
    let config = load_config(args)?;
    info!(
        input = %args.input.display(),
        blend_factor = config.blend_factor,
        blur_radius = config.blur_radius,
        grading = config.grading,
        "Starting colorization"
    );

    let input = read_input(&args.input).await?;
    let mut session = ColorizeSession::new(Colorizer::new(config)?)
        .with_simulated_latency(Duration::from_millis(args.simulated_latency_ms));

    let output = match session.submit(input).await {
        Ok(output) => output.clone(),
        Err(e) => {
            warn!(error = %e, "Run failed");
            let message = session.error().unwrap_or_else(|| e.user_message());
            return Err(anyhow::Error::new(e).context(message.to_string()));
        }
    };

    let mut report = RunReport {
        run_id,
        state: session.state(),
        output_path: None,
        data_uri: None,
        output_bytes: output.len(),
    };

    if args.data_uri {
        report.data_uri = Some(output.to_data_uri());
    } else {
        tokio::fs::write(&args.output, output.as_bytes())
            .await
            .with_context(|| format!("writing {}", args.output.display()))?;
        info!(path = %args.output.display(), bytes = output.len(), "Wrote colorized image");
        report.output_path = Some(args.output.clone());
    }

    Ok(report)
}
