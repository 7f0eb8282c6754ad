//! Pipeline configuration.

use colorize_common::{ColorizeError, ColorizeResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::blend::DEFAULT_BLEND_FACTOR;
use crate::smoothing::DEFAULT_BLUR_RADIUS;

/// Largest accepted smoothing radius.
pub const MAX_BLUR_RADIUS: usize = 16;

/// Tunables for a colorization run, loaded from JSON.
///
/// Every field has a default, so `{}` is a valid configuration and yields the
/// standard 85/15 blend with a radius-1 horizontal blur and grading enabled.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ColorizeConfig {
    /// Weight of the smoothed, colorized buffer against the original (0..=1).
    pub blend_factor: f64,
    /// Radius of the horizontal Gaussian smoothing kernel.
    pub blur_radius: usize,
    /// Paint the warm/cool radial grading overlays.
    pub grading: bool,
}

impl Default for ColorizeConfig {
    fn default() -> Self {
        Self {
            blend_factor: DEFAULT_BLEND_FACTOR,
            blur_radius: DEFAULT_BLUR_RADIUS,
            grading: true,
        }
    }
}

impl ColorizeConfig {
    /// Load configuration from a JSON string and validate it.
    pub fn from_json(json_str: &str) -> ColorizeResult<Self> {
        let config: Self = serde_json::from_str(json_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON file and validate it.
    pub fn from_file(path: impl AsRef<Path>) -> ColorizeResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ColorizeError::InvalidConfig {
            param: "path".to_string(),
            message: format!("{}: {}", path.display(), e),
        })?;
        Self::from_json(&content)
    }

    pub fn validate(&self) -> ColorizeResult<()> {
        if !self.blend_factor.is_finite() || !(0.0..=1.0).contains(&self.blend_factor) {
            return Err(ColorizeError::InvalidConfig {
                param: "blend_factor".to_string(),
                message: format!("must be within [0, 1], got {}", self.blend_factor),
            });
        }
        if self.blur_radius > MAX_BLUR_RADIUS {
            return Err(ColorizeError::InvalidConfig {
                param: "blur_radius".to_string(),
                message: format!("must be at most {}, got {}", MAX_BLUR_RADIUS, self.blur_radius),
            });
        }
        Ok(())
    }
}
