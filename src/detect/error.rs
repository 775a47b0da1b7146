//! Detection error types.

use std::path::PathBuf;

/// Failure inside a detector. Never fatal to the render loop.
#[derive(Debug, thiserror::Error)]
pub enum DetectionError {
    #[error("Frame {0} is empty")]
    EmptyFrame(u64),

    #[error("Detector failed on frame {sequence}: {message}")]
    Backend { sequence: u64, message: String },

    #[error("Failed to read detection script '{path}': {source}")]
    ScriptIo {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid detection script: {0}")]
    ScriptParse(#[from] serde_json::Error),

    #[error("Detection script has no frames")]
    EmptyScript,
}
