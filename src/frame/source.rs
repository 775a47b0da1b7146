//! Frame sources: the boundary to the camera collaborator.

use std::time::Instant;

use super::error::CaptureError;
use super::types::{CameraSettings, PixelFormat, RawFrame, Resolution};

/// Anything that can deliver a stream of decoded frames.
///
/// `open` is called once on the capture thread before the first
/// `next_frame`; it reports the resolution the source will actually deliver.
pub trait FrameSource: Send {
    fn open(&mut self, settings: &CameraSettings) -> Result<Resolution, CaptureError>;

    /// Next frame, or `None` when the stream has ended.
    fn next_frame(&mut self) -> Option<RawFrame>;

    fn name(&self) -> &str {
        "frame source"
    }
}

/// Generates a moving gradient at the configured resolution.
///
/// Stands in for a device camera in the CLI and in tests.
#[derive(Debug, Default)]
pub struct SyntheticCamera {
    resolution: Resolution,
    format: PixelFormat,
    limit: Option<u64>,
    produced: u64,
}

impl SyntheticCamera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop after `frames` frames.
    pub fn with_limit(frames: u64) -> Self {
        Self {
            limit: Some(frames),
            ..Self::default()
        }
    }

    pub fn produced(&self) -> u64 {
        self.produced
    }
}

impl FrameSource for SyntheticCamera {
    fn open(&mut self, settings: &CameraSettings) -> Result<Resolution, CaptureError> {
        if settings.resolution.is_empty() {
            return Err(CaptureError::ConfigurationRejected(format!(
                "resolution {} has no pixels",
                settings.resolution
            )));
        }
        self.resolution = settings.resolution;
        self.format = settings.format;
        Ok(self.resolution)
    }

    fn next_frame(&mut self) -> Option<RawFrame> {
        if self.limit.is_some_and(|limit| self.produced >= limit) {
            return None;
        }
        let Resolution { width, height } = self.resolution;
        let bpp = self.format.bytes_per_pixel();
        let shift = self.produced as usize;

        let mut data = Vec::with_capacity(width as usize * height as usize * bpp);
        for y in 0..height as usize {
            for x in 0..width as usize {
                let v = ((x + y + shift) % 256) as u8;
                data.extend(std::iter::repeat(v).take(bpp));
            }
        }
        self.produced += 1;

        Some(RawFrame {
            data,
            width,
            height,
            format: self.format,
            timestamp: Instant::now(),
        })
    }

    fn name(&self) -> &str {
        "synthetic camera"
    }
}
