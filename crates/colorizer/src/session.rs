//! Caller-facing lifecycle around the pipeline.
//!
//! A session tracks what an upload UI needs to show: the current
//! [`ProcessingState`], the original image for side-by-side display, the
//! colorized result and a user-facing error message.
//!
//! `submit` holds the session mutably for the whole run, so observers that
//! need to render the `processing` state follow it through
//! [`ColorizeSession::subscribe`] instead of polling [`ColorizeSession::state`].

use std::time::Duration;

use colorize_common::{ColorizeResult, ProcessingState};
use tokio::sync::watch;
use tracing::{debug, error, warn};

use crate::codec::EncodedImage;
use crate::pipeline::Colorizer;

/// Suggested file name when saving the colorized result.
pub const DOWNLOAD_FILE_NAME: &str = "colorized-image.png";

#[derive(Debug)]
pub struct ColorizeSession {
    colorizer: Colorizer,
    simulated_latency: Duration,
    state: watch::Sender<ProcessingState>,
    original: Option<EncodedImage>,
    colorized: Option<EncodedImage>,
    error: Option<String>,
}

impl Default for ColorizeSession {
    fn default() -> Self {
        Self::new(Colorizer::default())
    }
}

impl ColorizeSession {
    pub fn new(colorizer: Colorizer) -> Self {
        let (state, _) = watch::channel(ProcessingState::Idle);
        Self {
            colorizer,
            simulated_latency: Duration::ZERO,
            state,
            original: None,
            colorized: None,
            error: None,
        }
    }

    /// Artificial delay before processing starts, for demos that want the
    /// progress view to be visible.
    pub fn with_simulated_latency(mut self, latency: Duration) -> Self {
        self.simulated_latency = latency;
        self
    }

    pub fn state(&self) -> ProcessingState {
        *self.state.borrow()
    }

    /// Receiver that sees every state change, including while a `submit`
    /// is in flight.
    pub fn subscribe(&self) -> watch::Receiver<ProcessingState> {
        self.state.subscribe()
    }

    pub fn original(&self) -> Option<&EncodedImage> {
        self.original.as_ref()
    }

    pub fn colorized(&self) -> Option<&EncodedImage> {
        self.colorized.as_ref()
    }

    /// User-facing message for the last failed run.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn transition(&mut self, next: ProcessingState) {
        let current = self.state();
        debug_assert!(
            current.can_transition_to(next),
            "illegal transition {} -> {}",
            current,
            next
        );
        debug!(from = %current, to = %next, "Session state change");
        self.state.send_replace(next);
    }

    /// Start a run on `image` and wait for it to finish.
    ///
    /// Any previous result or error is discarded first. A session left in
    /// `processing` by a dropped `submit` is reset before the new run. On
    /// failure the session moves to `error` and the pipeline error is
    /// returned.
    pub async fn submit(&mut self, image: EncodedImage) -> ColorizeResult<&EncodedImage> {
        if self.state() == ProcessingState::Processing {
            warn!("Previous run was abandoned before finishing");
            self.reset();
        }

        self.colorized = None;
        self.error = None;
        self.original = Some(image.clone());
        self.transition(ProcessingState::Processing);

        if !self.simulated_latency.is_zero() {
            tokio::time::sleep(self.simulated_latency).await;
        }

        match self.colorizer.colorize(image).await {
            Ok(output) => {
                self.transition(ProcessingState::Completed);
                Ok(&*self.colorized.insert(output))
            }
            Err(e) => {
                error!(error = %e, code = e.code(), "Colorization failed");
                self.error = Some(e.user_message().to_string());
                self.transition(ProcessingState::Error);
                Err(e)
            }
        }
    }

    /// Forget the current images and return to `idle`.
    ///
    /// Always allowed, so a caller that dropped an in-flight `submit` can
    /// still recover the session.
    pub fn reset(&mut self) {
        self.original = None;
        self.colorized = None;
        self.error = None;
        let previous = self.state.send_replace(ProcessingState::Idle);
        if previous != ProcessingState::Idle {
            debug!(from = %previous, "Session reset");
        }
    }

    /// File name and bytes to save, once a run has completed.
    pub fn download(&self) -> Option<(&'static str, &EncodedImage)> {
        match self.state() {
            ProcessingState::Completed => self.colorized.as_ref().map(|image| (DOWNLOAD_FILE_NAME, image)),
            _ => None,
        }
    }
}
