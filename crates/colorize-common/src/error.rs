//! Error types for the colorizer pipeline.

use thiserror::Error;

/// Result type alias using ColorizeError.
pub type ColorizeResult<T> = Result<T, ColorizeError>;

/// Message shown to the user whenever a colorization run fails.
pub const USER_FACING_FAILURE: &str = "Failed to colorize image. Please try again.";

/// Primary error type for colorization runs.
#[derive(Debug, Error)]
pub enum ColorizeError {
    // === Input Errors ===
    #[error("Failed to decode image: {0}")]
    DecodeFailure(String),

    #[error("Invalid pixel buffer: expected {expected} bytes, got {actual}")]
    InvalidBuffer { expected: usize, actual: usize },

    #[error("Invalid configuration for '{param}': {message}")]
    InvalidConfig { param: String, message: String },

    // === Processing Errors ===
    #[error("Rendering failed: {0}")]
    RenderFailure(String),

    #[error("Failed to encode image: {0}")]
    EncodeFailure(String),

    #[error("Processing task failed: {0}")]
    TaskFailed(String),
}

impl ColorizeError {
    /// Whether the input itself was unusable, as opposed to a failure inside
    /// the pipeline.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            ColorizeError::DecodeFailure(_) | ColorizeError::InvalidBuffer { .. }
        )
    }

    /// Text suitable for surfacing to an end user.
    pub fn user_message(&self) -> &'static str {
        USER_FACING_FAILURE
    }

    /// Short machine-readable code for logs.
    pub fn code(&self) -> &'static str {
        match self {
            ColorizeError::DecodeFailure(_) => "decode_failure",
            ColorizeError::InvalidBuffer { .. } => "invalid_buffer",
            ColorizeError::InvalidConfig { .. } => "invalid_config",
            ColorizeError::RenderFailure(_) => "render_failure",
            ColorizeError::EncodeFailure(_) => "encode_failure",
            ColorizeError::TaskFailed(_) => "task_failed",
        }
    }
}

impl From<serde_json::Error> for ColorizeError {
    fn from(err: serde_json::Error) -> Self {
        ColorizeError::InvalidConfig {
            param: "json".to_string(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_failure_is_input_error() {
        let err = ColorizeError::DecodeFailure("bad header".to_string());
        assert!(err.is_input_error());
        assert_eq!(err.code(), "decode_failure");
        assert_eq!(err.to_string(), "Failed to decode image: bad header");
    }

    #[test]
    fn test_internal_errors_are_not_input_errors() {
        assert!(!ColorizeError::RenderFailure("x".into()).is_input_error());
        assert!(!ColorizeError::TaskFailed("x".into()).is_input_error());
    }

    #[test]
    fn test_user_message_is_stable() {
        let err = ColorizeError::EncodeFailure("deflate".into());
        assert_eq!(err.user_message(), USER_FACING_FAILURE);
    }

    #[test]
    fn test_json_error_maps_to_invalid_config() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: ColorizeError = json_err.into();
        assert!(matches!(err, ColorizeError::InvalidConfig { ref param, .. } if param == "json"));
    }
}
