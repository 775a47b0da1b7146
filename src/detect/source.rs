//! The detector boundary.

use super::error::DetectionError;
use super::types::FaceObservation;
use crate::frame::Frame;

/// External face/landmark detector.
///
/// Both stages are blocking. Callers issue one detection per frame and
/// wait for it; an instance is never asked to work on two frames at once.
pub trait LandmarkSource: Send {
    /// Face rectangles only.
    fn detect_faces(&mut self, frame: &Frame) -> Result<Vec<FaceObservation>, DetectionError>;

    /// Landmarks for faces found by `detect_faces` on the same frame.
    fn detect_landmarks(
        &mut self,
        frame: &Frame,
        faces: &[FaceObservation],
    ) -> Result<Vec<FaceObservation>, DetectionError>;
}

/// Run both stages on `frame`.
///
/// An empty frame is reported as an error here so the caller can count it;
/// the landmark stage is skipped when no face was found.
pub fn try_detect(
    source: &mut dyn LandmarkSource,
    frame: &Frame,
) -> Result<Vec<FaceObservation>, DetectionError> {
    if frame.is_empty() {
        return Err(DetectionError::EmptyFrame(frame.sequence));
    }
    let faces = source.detect_faces(frame)?;
    if faces.is_empty() {
        return Ok(faces);
    }
    source.detect_landmarks(frame, &faces)
}

/// Run both stages, degrading any failure to "no faces this frame".
pub fn detect(source: &mut dyn LandmarkSource, frame: &Frame) -> Vec<FaceObservation> {
    try_detect(source, frame).unwrap_or_else(|e| {
        log::warn!("Detection skipped: {}", e);
        Vec::new()
    })
}
