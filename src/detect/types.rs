//! Face observation types.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect};

/// Named facial feature outlined by an ordered run of points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LandmarkGroup {
    LeftEye,
    RightEye,
    Nose,
    InnerLips,
    LeftEyebrow,
    RightEyebrow,
    NoseCrest,
    OuterLips,
    FaceContour,
}

impl LandmarkGroup {
    pub const ALL: [LandmarkGroup; 9] = [
        LandmarkGroup::LeftEye,
        LandmarkGroup::RightEye,
        LandmarkGroup::Nose,
        LandmarkGroup::InnerLips,
        LandmarkGroup::LeftEyebrow,
        LandmarkGroup::RightEyebrow,
        LandmarkGroup::NoseCrest,
        LandmarkGroup::OuterLips,
        LandmarkGroup::FaceContour,
    ];

    pub fn name(self) -> &'static str {
        match self {
            LandmarkGroup::LeftEye => "leftEye",
            LandmarkGroup::RightEye => "rightEye",
            LandmarkGroup::Nose => "nose",
            LandmarkGroup::InnerLips => "innerLips",
            LandmarkGroup::LeftEyebrow => "leftEyebrow",
            LandmarkGroup::RightEyebrow => "rightEyebrow",
            LandmarkGroup::NoseCrest => "noseCrest",
            LandmarkGroup::OuterLips => "outerLips",
            LandmarkGroup::FaceContour => "faceContour",
        }
    }

    /// Parse a group name, accepting camelCase or snake_case.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        let key: String = s.chars().filter(|c| *c != '_' && *c != '-').collect();
        Self::ALL
            .into_iter()
            .find(|g| g.name().eq_ignore_ascii_case(&key))
    }
}

impl fmt::Display for LandmarkGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One detected face.
///
/// `bounding_box` is normalized to the image; landmark points are
/// normalized to the bounding box.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FaceObservation {
    pub bounding_box: Rect,
    #[serde(default)]
    pub landmarks: BTreeMap<LandmarkGroup, Vec<Point>>,
}

impl FaceObservation {
    pub fn new(bounding_box: Rect) -> Self {
        Self {
            bounding_box,
            landmarks: BTreeMap::new(),
        }
    }

    pub fn with_group(mut self, group: LandmarkGroup, points: Vec<Point>) -> Self {
        self.landmarks.insert(group, points);
        self
    }

    /// Points for `group`; empty when the detector did not report it.
    pub fn group(&self, group: LandmarkGroup) -> &[Point] {
        self.landmarks.get(&group).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The same face without landmarks, as a face-rectangle stage reports it.
    pub fn without_landmarks(&self) -> Self {
        Self::new(self.bounding_box)
    }
}
