//! Tests for the CLI driver.

use std::path::Path;

use clap::Parser;
use colorize_cli::{load_config, read_input, run, Args};
use colorizer::codec::EncodedImage;
use colorizer::ProcessingState;
use tempfile::TempDir;
use test_utils::{decode_fixture, png_fixture, portrait_scene, NOT_AN_IMAGE};

fn args_for(input: &Path, extra: &[&str]) -> Args {
    let mut argv = vec!["colorize".to_string(), input.display().to_string()];
    argv.extend(extra.iter().map(|s| s.to_string()));
    Args::try_parse_from(argv).unwrap()
}

fn write_input(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("portrait.png");
    std::fs::write(&path, png_fixture(&portrait_scene(24, 18))).unwrap();
    path
}

// ============================================================================
// Argument parsing and configuration
// ============================================================================

#[test]
fn test_default_output_name() {
    let args = Args::try_parse_from(["colorize", "in.png"]).unwrap();
    assert_eq!(args.output, Path::new("colorized-image.png"));
    assert!(!args.data_uri);
    assert_eq!(args.log_level, "info");
}

#[test]
fn test_flag_overrides() {
    let args = Args::try_parse_from(["colorize", "in.png", "--blend-factor", "0.5", "--no-grading"]).unwrap();
    let config = load_config(&args).unwrap();
    assert_eq!(config.blend_factor, 0.5);
    assert!(!config.grading);
    assert_eq!(config.blur_radius, 1);
}

#[test]
fn test_config_file_with_override() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("colorize.json");
    std::fs::write(&config_path, r#"{"blur_radius": 3, "blend_factor": 0.6}"#).unwrap();

    let args = Args::try_parse_from([
        "colorize",
        "in.png",
        "--config",
        config_path.to_str().unwrap(),
        "--blend-factor",
        "0.9",
    ])
    .unwrap();

    let config = load_config(&args).unwrap();
    assert_eq!(config.blur_radius, 3);
    assert_eq!(config.blend_factor, 0.9);
}

#[test]
fn test_invalid_override_rejected() {
    let args = Args::try_parse_from(["colorize", "in.png", "--blend-factor", "2.0"]).unwrap();
    assert!(load_config(&args).is_err());
}

#[test]
fn test_missing_config_file_rejected() {
    let args = Args::try_parse_from(["colorize", "in.png", "--config", "/nonexistent/colorize.json"]).unwrap();
    assert!(load_config(&args).is_err());
}

// ============================================================================
// Input handling
// ============================================================================

#[tokio::test]
async fn test_read_data_uri_input() {
    let dir = TempDir::new().unwrap();
    let png = png_fixture(&portrait_scene(4, 4));
    let path = dir.path().join("input.txt");
    std::fs::write(&path, EncodedImage::from_bytes(png.clone()).to_data_uri()).unwrap();

    let image = read_input(&path).await.unwrap();
    assert_eq!(image.as_bytes(), png.as_slice());
}

#[tokio::test]
async fn test_read_missing_input() {
    assert!(read_input(Path::new("/nonexistent/input.png")).await.is_err());
}

// ============================================================================
// Full runs
// ============================================================================

#[tokio::test]
async fn test_run_writes_png() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir);
    let output = dir.path().join("out.png");

    let args = args_for(&input, &["--output", output.to_str().unwrap()]);
    let report = run(&args).await.unwrap();

    assert_eq!(report.state, ProcessingState::Completed);
    assert_eq!(report.output_path.as_deref(), Some(output.as_path()));
    assert!(report.data_uri.is_none());

    let written = std::fs::read(&output).unwrap();
    assert_eq!(written.len(), report.output_bytes);
    assert_eq!(decode_fixture(&written).dimensions(), (24, 18));
}

#[tokio::test]
async fn test_run_data_uri_mode() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir);
    let output = dir.path().join("unused.png");

    let args = args_for(&input, &["--data-uri", "--output", output.to_str().unwrap()]);
    let report = run(&args).await.unwrap();

    let uri = report.data_uri.unwrap();
    assert!(uri.starts_with("data:image/png;base64,"));
    assert!(!output.exists());
}

#[tokio::test]
async fn test_run_rejects_non_image() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("notes.txt");
    std::fs::write(&input, NOT_AN_IMAGE).unwrap();
    let output = dir.path().join("out.png");

    let args = args_for(&input, &["--output", output.to_str().unwrap()]);
    let err = run(&args).await.unwrap_err();

    assert_eq!(err.to_string(), "Failed to colorize image. Please try again.");
    assert!(!output.exists());
}
