//! Orientation correction for incoming frames.

use super::error::IngestError;
use super::types::{Frame, Orientation, RawFrame};

/// Turns raw capture buffers into detection-ready frames.
///
/// Holds no pixel data between calls; the only state is the sequence
/// counter stamped on each accepted frame.
#[derive(Debug, Clone)]
pub struct FrameIngest {
    front_facing: bool,
    correction: Orientation,
    next_sequence: u64,
}

impl FrameIngest {
    pub fn new(front_facing: bool, correction: Orientation) -> Self {
        Self {
            front_facing,
            correction,
            next_sequence: 0,
        }
    }

    /// Validate `raw` and apply the front-camera correction.
    ///
    /// Back-facing sources pass through with `Orientation::Up`.
    pub fn ingest(&mut self, raw: RawFrame) -> Result<Frame, IngestError> {
        let bpp = raw.format.bytes_per_pixel();
        if raw.width == 0 || raw.height == 0 || raw.data.is_empty() {
            return Err(IngestError::Empty {
                width: raw.width,
                height: raw.height,
                len: raw.data.len(),
            });
        }
        let expected = raw.width as usize * raw.height as usize * bpp;
        if raw.data.len() != expected {
            return Err(IngestError::BufferSizeMismatch {
                expected,
                actual: raw.data.len(),
            });
        }

        let mut frame = Frame {
            data: raw.data,
            width: raw.width,
            height: raw.height,
            format: raw.format,
            orientation: Orientation::Up,
            timestamp: raw.timestamp,
            sequence: self.next_sequence,
        };
        self.next_sequence += 1;

        if self.front_facing {
            match self.correction {
                Orientation::Up => {}
                Orientation::UpMirrored => mirror_horizontal(&mut frame),
                Orientation::LeftMirrored => transpose(&mut frame),
            }
            frame.orientation = self.correction;
        }

        Ok(frame)
    }
}

/// Mirror a frame horizontally (flip left-right).
pub fn mirror_horizontal(frame: &mut Frame) {
    let width = frame.width as usize;
    let height = frame.height as usize;
    let bpp = frame.bytes_per_pixel();

    for y in 0..height {
        let row_start = y * width * bpp;
        let row = &mut frame.data[row_start..row_start + width * bpp];

        for x in 0..width / 2 {
            let left = x * bpp;
            let right = (width - 1 - x) * bpp;
            for i in 0..bpp {
                row.swap(left + i, right + i);
            }
        }
    }
}

/// Swap rows and columns. Equivalent to a quarter turn followed by a mirror.
pub fn transpose(frame: &mut Frame) {
    let width = frame.width as usize;
    let height = frame.height as usize;
    let bpp = frame.bytes_per_pixel();

    let mut out = vec![0u8; frame.data.len()];
    for y in 0..height {
        for x in 0..width {
            let src = (y * width + x) * bpp;
            let dst = (x * height + y) * bpp;
            out[dst..dst + bpp].copy_from_slice(&frame.data[src..src + bpp]);
        }
    }

    frame.data = out;
    frame.width = height as u32;
    frame.height = width as u32;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::PixelFormat;
    use std::time::Instant;

    fn raw(data: Vec<u8>, width: u32, height: u32) -> RawFrame {
        RawFrame {
            data,
            width,
            height,
            format: PixelFormat::Rgb8,
            timestamp: Instant::now(),
        }
    }

    #[test]
    fn test_mirror_horizontal_3x2() {
        let mut ingest = FrameIngest::new(true, Orientation::UpMirrored);
        let frame = ingest
            .ingest(raw(
                vec![
                    1, 1, 1, 2, 2, 2, 3, 3, 3, // Row 0: A, B, C
                    4, 4, 4, 5, 5, 5, 6, 6, 6, // Row 1: D, E, F
                ],
                3,
                2,
            ))
            .unwrap();
        assert_eq!(
            frame.data,
            vec![
                3, 3, 3, 2, 2, 2, 1, 1, 1, // Row 0: C, B, A
                6, 6, 6, 5, 5, 5, 4, 4, 4, // Row 1: F, E, D
            ]
        );
        assert_eq!(frame.orientation, Orientation::UpMirrored);
    }

    #[test]
    fn test_transpose_3x2() {
        let mut ingest = FrameIngest::new(true, Orientation::LeftMirrored);
        let frame = ingest
            .ingest(RawFrame {
                data: vec![1, 2, 3, 4, 5, 6],
                width: 3,
                height: 2,
                format: PixelFormat::Gray8,
                timestamp: Instant::now(),
            })
            .unwrap();
        // [1 2 3]      [1 4]
        // [4 5 6]  ->  [2 5]
        //              [3 6]
        assert_eq!(frame.width, 2);
        assert_eq!(frame.height, 3);
        assert_eq!(frame.data, vec![1, 4, 2, 5, 3, 6]);
        assert_eq!(frame.orientation, Orientation::LeftMirrored);
    }

    #[test]
    fn test_back_camera_passes_through() {
        let mut ingest = FrameIngest::new(false, Orientation::LeftMirrored);
        let frame = ingest.ingest(raw(vec![1, 2, 3, 4, 5, 6], 2, 1)).unwrap();
        assert_eq!(frame.data, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(frame.orientation, Orientation::Up);
    }

    #[test]
    fn test_sequence_increments() {
        let mut ingest = FrameIngest::new(false, Orientation::Up);
        let a = ingest.ingest(raw(vec![0; 3], 1, 1)).unwrap();
        let b = ingest.ingest(raw(vec![0; 3], 1, 1)).unwrap();
        assert_eq!(a.sequence, 0);
        assert_eq!(b.sequence, 1);
    }

    #[test]
    fn test_rejects_empty_frame() {
        let mut ingest = FrameIngest::new(true, Orientation::UpMirrored);
        let err = ingest.ingest(raw(vec![], 0, 0)).unwrap_err();
        assert!(matches!(err, IngestError::Empty { .. }));
    }

    #[test]
    fn test_rejects_short_buffer() {
        let mut ingest = FrameIngest::new(true, Orientation::UpMirrored);
        let err = ingest.ingest(raw(vec![0; 6], 2, 2)).unwrap_err();
        assert_eq!(
            err,
            IngestError::BufferSizeMismatch {
                expected: 12,
                actual: 6
            }
        );
    }

    #[test]
    fn test_rejected_frame_does_not_consume_sequence() {
        let mut ingest = FrameIngest::new(false, Orientation::Up);
        let _ = ingest.ingest(raw(vec![0; 2], 1, 1));
        let ok = ingest.ingest(raw(vec![0; 3], 1, 1)).unwrap();
        assert_eq!(ok.sequence, 0);
    }
}
