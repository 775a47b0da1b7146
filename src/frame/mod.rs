//! Frame ingest: capture hand-off and orientation correction.
//!
//! - Frame sources via [`FrameSource`] (camera collaborator boundary)
//! - Orientation correction via [`FrameIngest`]
//! - Late-frame dropping via [`LatestFrameSlot`]
//! - Background capture via [`CaptureSession`]

mod capture;
mod error;
mod ingest;
mod slot;
mod source;
mod types;

pub use capture::CaptureSession;
pub use error::{CaptureError, IngestError};
pub use ingest::{mirror_horizontal, transpose, FrameIngest};
pub use slot::LatestFrameSlot;
pub use source::{FrameSource, SyntheticCamera};
pub use types::{CameraSettings, Frame, Orientation, PixelFormat, RawFrame, Resolution};
