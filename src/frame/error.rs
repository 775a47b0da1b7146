//! Error types for frame ingest and capture.

/// A raw frame that cannot be turned into a detection-ready frame.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum IngestError {
    #[error("Frame has no pixels ({width}x{height}, {len} bytes)")]
    Empty { width: u32, height: u32, len: usize },

    #[error("Frame buffer is {actual} bytes, expected {expected}")]
    BufferSizeMismatch { expected: usize, actual: usize },
}

/// Errors that stop the capture side of the pipeline from starting.
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    /// Resolution or frame rate the source cannot honour
    #[error("Capture configuration rejected: {0}")]
    ConfigurationRejected(String),

    #[error("No frame source available")]
    NoSource,

    #[error("Capture thread is already running")]
    AlreadyRunning,

    #[error("Failed to start capture stream: {0}")]
    StreamFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ingest_error_display() {
        let err = IngestError::BufferSizeMismatch {
            expected: 12,
            actual: 6,
        };
        assert_eq!(format!("{}", err), "Frame buffer is 6 bytes, expected 12");
    }

    #[test]
    fn test_capture_error_display() {
        assert_eq!(
            format!("{}", CaptureError::AlreadyRunning),
            "Capture thread is already running"
        );
        assert!(format!("{}", CaptureError::ConfigurationRejected("fps is 0".into()))
            .contains("fps is 0"));
    }
}
