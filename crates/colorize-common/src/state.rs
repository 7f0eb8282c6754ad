//! Caller-visible lifecycle of a colorization run.

use serde::{Deserialize, Serialize};
use std::fmt;

/// `idle -> processing -> {completed | error}`, with completed/error runs
/// able to start over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessingState {
    #[default]
    Idle,
    Processing,
    Completed,
    Error,
}

impl ProcessingState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessingState::Idle => "idle",
            ProcessingState::Processing => "processing",
            ProcessingState::Completed => "completed",
            ProcessingState::Error => "error",
        }
    }

    /// A run that has finished, successfully or not.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ProcessingState::Completed | ProcessingState::Error)
    }

    /// Whether moving from `self` to `next` is a legal transition.
    ///
    /// There is no cancellation, so an in-flight run cannot go back to idle.
    pub fn can_transition_to(&self, next: ProcessingState) -> bool {
        use ProcessingState::*;
        matches!(
            (self, next),
            (Idle, Processing)
                | (Processing, Completed)
                | (Processing, Error)
                | (Completed, Processing)
                | (Completed, Idle)
                | (Error, Processing)
                | (Error, Idle)
        )
    }
}

impl fmt::Display for ProcessingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_idle() {
        assert_eq!(ProcessingState::default(), ProcessingState::Idle);
    }

    #[test]
    fn test_serializes_lowercase() {
        let json = serde_json::to_string(&ProcessingState::Completed).unwrap();
        assert_eq!(json, "\"completed\"");
        let parsed: ProcessingState = serde_json::from_str("\"processing\"").unwrap();
        assert_eq!(parsed, ProcessingState::Processing);
    }
}
