//! Geometry mapping from normalized detector space into viewport pixels.
//!
//! Detector output is normalized twice: face boxes are fractions of the
//! image, landmark points are fractions of their face box. Mapping is a
//! plain affine scale; nothing is clamped to the viewport, so regions near
//! the frame edge may extend past it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::detect::{FaceObservation, LandmarkGroup};

/// Padding added on every side of a landmark group's bounds.
pub const DEFAULT_INSET: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle with its origin at `(x, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    /// Grow by `inset` on each side.
    pub fn outset(&self, inset: f64) -> Rect {
        Rect {
            x: self.x - inset,
            y: self.y - inset,
            width: self.width + 2.0 * inset,
            height: self.height + 2.0 * inset,
        }
    }

    /// Inclusive on every edge.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.max_x() && p.y >= self.y && p.y <= self.max_y()
    }

    /// Corners in drawing order, starting at the origin.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.x, self.y),
            Point::new(self.max_x(), self.y),
            Point::new(self.max_x(), self.max_y()),
            Point::new(self.x, self.max_y()),
        ]
    }
}

/// Pixel-space bounds of one landmark group, already padded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MappedRegion {
    pub rect: Rect,
}

/// Maps detector geometry into a viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryMapper {
    pub viewport: Size,
    pub inset: f64,
}

impl GeometryMapper {
    pub fn new(viewport: Size) -> Self {
        Self {
            viewport,
            inset: DEFAULT_INSET,
        }
    }

    pub fn with_inset(viewport: Size, inset: f64) -> Self {
        Self { viewport, inset }
    }

    pub fn scale_bounding_box(&self, normalized: Rect) -> Rect {
        scale_bounding_box(normalized, self.viewport)
    }

    pub fn map_landmark_group(&self, points: &[Point], pixel_box: Rect) -> Option<MappedRegion> {
        map_landmark_group_with_inset(points, pixel_box, self.inset)
    }
}

/// Scale a normalized box linearly by the viewport size.
pub fn scale_bounding_box(normalized: Rect, viewport: Size) -> Rect {
    Rect {
        x: normalized.x * viewport.width,
        y: normalized.y * viewport.height,
        width: normalized.width * viewport.width,
        height: normalized.height * viewport.height,
    }
}

/// Map box-relative normalized points into pixel space.
pub fn map_points(points: &[Point], pixel_box: Rect) -> Vec<Point> {
    points
        .iter()
        .map(|p| Point {
            x: p.x * pixel_box.width + pixel_box.x,
            y: p.y * pixel_box.height + pixel_box.y,
        })
        .collect()
}

/// Padded pixel bounds of a landmark group using [`DEFAULT_INSET`].
///
/// Returns `None` for a group with no points.
pub fn map_landmark_group(points: &[Point], pixel_box: Rect) -> Option<MappedRegion> {
    map_landmark_group_with_inset(points, pixel_box, DEFAULT_INSET)
}

/// One face mapped into viewport pixels.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MappedFace {
    pub face_box: Rect,
    /// Padded bounds of every non-empty group
    pub regions: BTreeMap<LandmarkGroup, MappedRegion>,
    /// Mapped points of every non-empty group
    pub outlines: BTreeMap<LandmarkGroup, Vec<Point>>,
}

impl MappedFace {
    pub fn region(&self, group: LandmarkGroup) -> Option<&MappedRegion> {
        self.regions.get(&group)
    }
}

impl GeometryMapper {
    /// Map the face box and every landmark group of `face`.
    pub fn map_face(&self, face: &FaceObservation) -> MappedFace {
        let face_box = self.scale_bounding_box(face.bounding_box);
        let mut mapped = MappedFace {
            face_box,
            ..MappedFace::default()
        };
        for (group, points) in &face.landmarks {
            if let Some(region) = self.map_landmark_group(points, face_box) {
                mapped.regions.insert(*group, region);
                mapped.outlines.insert(*group, map_points(points, face_box));
            }
        }
        mapped
    }
}

pub fn map_landmark_group_with_inset(
    points: &[Point],
    pixel_box: Rect,
    inset: f64,
) -> Option<MappedRegion> {
    let mapped = map_points(points, pixel_box);
    let (first, rest) = mapped.split_first()?;

    // Seeded from the first point so no sentinel biases the bounds
    let (mut min_x, mut max_x, mut min_y, mut max_y) = (first.x, first.x, first.y, first.y);
    for p in rest {
        min_x = min_x.min(p.x);
        max_x = max_x.max(p.x);
        min_y = min_y.min(p.y);
        max_y = max_y.max(p.y);
    }

    let bounds = Rect::new(min_x, min_y, max_x - min_x, max_y - min_y);
    Some(MappedRegion {
        rect: bounds.outset(inset),
    })
}
