//! Render loop: worker thread, UI thread and render sinks.
//!
//! ```text
//! capture ──► LatestFrameSlot ──► worker (detect, map) ──► UI thread (compose) ──► RenderSink
//! ```

mod driver;
mod error;
mod sink;
mod state;
mod ui;

pub use driver::{LoopOptions, RenderLoop};
pub use error::LoopError;
pub use sink::{JsonSink, LogSink, RecordingSink, RenderSink};
pub use state::{LoopState, LoopStats};
pub use ui::{UiCommand, UiHandle, UiThread};
