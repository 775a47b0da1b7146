//! Replay detector driven by a JSON script.
//!
//! Script format:
//!
//! ```json
//! {
//!   "frames": [
//!     [ { "bounding_box": {"x": 0.2, "y": 0.2, "width": 0.5, "height": 0.5},
//!         "landmarks": { "leftEye": [{"x": 0.3, "y": 0.6}] } } ],
//!     []
//!   ],
//!   "failures": [4]
//! }
//! ```
//!
//! Entry `n % frames.len()` answers the frame with sequence `n`. Sequences
//! listed in `failures` make the detector report an error instead.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::DetectionError;
use super::source::LandmarkSource;
use super::types::FaceObservation;
use crate::frame::Frame;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DetectionScript {
    pub frames: Vec<Vec<FaceObservation>>,
    #[serde(default)]
    pub failures: Vec<u64>,
}

#[derive(Debug, Clone)]
pub struct ScriptedLandmarkSource {
    script: DetectionScript,
}

impl ScriptedLandmarkSource {
    /// # Errors
    /// * `DetectionError::EmptyScript` - the script has no frames
    pub fn new(script: DetectionScript) -> Result<Self, DetectionError> {
        if script.frames.is_empty() {
            return Err(DetectionError::EmptyScript);
        }
        Ok(Self { script })
    }

    pub fn from_json_str(json: &str) -> Result<Self, DetectionError> {
        Self::new(serde_json::from_str(json)?)
    }

    /// Read and parse a script file.
    ///
    /// # Errors
    /// * `DetectionError::ScriptIo` - the file cannot be read
    /// * `DetectionError::ScriptParse` - the file is not a valid script
    /// * `DetectionError::EmptyScript` - the script has no frames
    pub fn from_path(path: &Path) -> Result<Self, DetectionError> {
        let content = std::fs::read_to_string(path).map_err(|e| DetectionError::ScriptIo {
            path: path.to_path_buf(),
            source: e,
        })?;
        let source = Self::from_json_str(&content)?;
        log::info!(
            "Loaded detection script '{}' ({} frames)",
            path.display(),
            source.script.frames.len()
        );
        Ok(source)
    }

    fn entry(&self, frame: &Frame) -> Result<&[FaceObservation], DetectionError> {
        if self.script.failures.contains(&frame.sequence) {
            return Err(DetectionError::Backend {
                sequence: frame.sequence,
                message: "scripted failure".to_string(),
            });
        }
        let index = (frame.sequence % self.script.frames.len() as u64) as usize;
        Ok(&self.script.frames[index])
    }
}

impl LandmarkSource for ScriptedLandmarkSource {
    fn detect_faces(&mut self, frame: &Frame) -> Result<Vec<FaceObservation>, DetectionError> {
        Ok(self
            .entry(frame)?
            .iter()
            .map(FaceObservation::without_landmarks)
            .collect())
    }

    fn detect_landmarks(
        &mut self,
        frame: &Frame,
        faces: &[FaceObservation],
    ) -> Result<Vec<FaceObservation>, DetectionError> {
        Ok(self
            .entry(frame)?
            .iter()
            .take(faces.len())
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::{detect, LandmarkGroup};
    use crate::frame::{Orientation, PixelFormat};
    use std::time::Instant;

    const SCRIPT: &str = r#"{
        "frames": [
            [{"bounding_box": {"x": 0.0, "y": 0.0, "width": 1.0, "height": 1.0},
              "landmarks": {"nose": [{"x": 0.5, "y": 0.5}]}}],
            []
        ],
        "failures": [2]
    }"#;

    fn frame(sequence: u64) -> Frame {
        Frame {
            data: vec![0; 3],
            width: 1,
            height: 1,
            format: PixelFormat::Rgb8,
            orientation: Orientation::Up,
            timestamp: Instant::now(),
            sequence,
        }
    }

    #[test]
    fn test_face_stage_strips_landmarks() {
        let mut source = ScriptedLandmarkSource::from_json_str(SCRIPT).unwrap();
        let faces = source.detect_faces(&frame(0)).unwrap();
        assert_eq!(faces.len(), 1);
        assert!(faces[0].landmarks.is_empty());
    }

    #[test]
    fn test_script_cycles_by_sequence() {
        let mut source = ScriptedLandmarkSource::from_json_str(SCRIPT).unwrap();
        assert_eq!(detect(&mut source, &frame(0))[0].group(LandmarkGroup::Nose).len(), 1);
        assert!(detect(&mut source, &frame(1)).is_empty());
        assert!(detect(&mut source, &frame(3)).is_empty());
    }

    #[test]
    fn test_scripted_failure() {
        let mut source = ScriptedLandmarkSource::from_json_str(SCRIPT).unwrap();
        assert!(matches!(
            source.detect_faces(&frame(2)),
            Err(DetectionError::Backend { sequence: 2, .. })
        ));
    }

    #[test]
    fn test_empty_script_rejected() {
        assert!(matches!(
            ScriptedLandmarkSource::from_json_str(r#"{"frames": []}"#),
            Err(DetectionError::EmptyScript)
        ));
    }

    #[test]
    fn test_missing_script_file() {
        let err = ScriptedLandmarkSource::from_path(Path::new("/nonexistent/faces.json"))
            .unwrap_err();
        assert!(format!("{}", err).contains("/nonexistent/faces.json"));
    }
}
