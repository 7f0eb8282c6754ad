//! Common types shared by the colorizer pipeline and its callers.

pub mod buffer;
pub mod error;
pub mod state;

pub use buffer::RgbaBuffer;
pub use error::{ColorizeError, ColorizeResult};
pub use state::ProcessingState;
