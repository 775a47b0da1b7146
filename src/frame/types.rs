//! Frame types and data structures.

use std::fmt;
use std::time::Instant;

use serde::{Deserialize, Serialize};

/// Frame resolution in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    /// Low resolution (320x240)
    pub const LOW: Resolution = Resolution {
        width: 320,
        height: 240,
    };

    /// Medium resolution (640x480) - balanced, recommended
    pub const MEDIUM: Resolution = Resolution {
        width: 640,
        height: 480,
    };

    /// High resolution (1280x720)
    pub const HIGH: Resolution = Resolution {
        width: 1280,
        height: 720,
    };

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Self::MEDIUM
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Pixel layout of a decoded frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PixelFormat {
    /// 3 bytes per pixel
    #[default]
    Rgb8,
    /// 4 bytes per pixel
    Rgba8,
    /// 1 byte per pixel (luma plane only)
    Gray8,
}

impl PixelFormat {
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Rgb8 => 3,
            PixelFormat::Rgba8 => 4,
            PixelFormat::Gray8 => 1,
        }
    }
}

/// Orientation tag carried by a frame.
///
/// `Up` is the sensor-native orientation. The mirrored variants describe the
/// correction applied for a front-facing camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    #[default]
    Up,
    /// Flipped left-right.
    UpMirrored,
    /// Rotated a quarter turn and mirrored, i.e. transposed.
    LeftMirrored,
}

/// A frame as delivered by the capture collaborator, before orientation
/// correction.
#[derive(Debug, Clone)]
pub struct RawFrame {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
    pub timestamp: Instant,
}

/// An orientation-corrected frame ready for detection.
///
/// Frames are moved through the pipeline by value and dropped once the
/// detection for them has returned.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Raw pixel data in `format`
    pub data: Vec<u8>,
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    pub format: PixelFormat,
    pub orientation: Orientation,
    /// Timestamp when frame was captured
    pub timestamp: Instant,
    /// Monotonic capture sequence number, starting at 0
    pub sequence: u64,
}

impl Frame {
    pub fn bytes_per_pixel(&self) -> usize {
        self.format.bytes_per_pixel()
    }

    pub fn resolution(&self) -> Resolution {
        Resolution {
            width: self.width,
            height: self.height,
        }
    }

    /// True when the buffer cannot hold any pixel.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.data.is_empty()
    }
}

/// Settings for frame capture.
#[derive(Debug, Clone)]
pub struct CameraSettings {
    /// Capture resolution
    pub resolution: Resolution,
    /// Target FPS (actual may vary)
    pub fps: u32,
    pub format: PixelFormat,
    /// Front-facing sources get `correction` applied on ingest
    pub front_facing: bool,
    pub correction: Orientation,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            resolution: Resolution::default(),
            fps: 30,
            format: PixelFormat::Rgb8,
            front_facing: true,
            correction: Orientation::LeftMirrored,
        }
    }
}
