//! Heuristic colorization of grayscale photographs.
//!
//! The pipeline runs five ordered stages:
//! - Region classification (luminance + position heuristics)
//! - Palette synthesis (per-region affine color formulas)
//! - Horizontal Gaussian smoothing
//! - Blend with the original image
//! - Radial gradient grading overlays
//!
//! Use [`colorize`] for the async entry point or [`Colorizer`] to control
//! configuration and run individual stages.

pub mod blend;
pub mod codec;
pub mod config;
pub mod overlay;
pub mod palette;
pub mod pipeline;
pub mod png;
pub mod region;
pub mod session;
pub mod smoothing;
pub mod surface;

pub use codec::EncodedImage;
pub use colorize_common::{ColorizeError, ColorizeResult, ProcessingState, RgbaBuffer};
pub use config::ColorizeConfig;
pub use pipeline::{colorize, Colorizer};
pub use region::{Region, RegionMap};
pub use session::ColorizeSession;
