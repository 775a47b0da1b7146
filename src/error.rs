//! Crate-level error type.

use crate::config::ConfigError;
use crate::detect::DetectionError;
use crate::frame::{CaptureError, IngestError};
use crate::render_loop::LoopError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Capture(#[from] CaptureError),

    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Detection(#[from] DetectionError),

    #[error(transparent)]
    Loop(#[from] LoopError),

    #[error("Failed to install Ctrl+C handler: {0}")]
    Signal(#[from] ctrlc::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
