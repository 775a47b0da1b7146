//! Transient debug drawing: face boxes and landmark outlines.

use serde::{Deserialize, Serialize};

use crate::detect::LandmarkGroup;
use crate::geometry::{Point, Rect};

pub const DEFAULT_LINE_WIDTH: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    Red,
    Purple,
    Cyan,
    Yellow,
    Magenta,
    Brown,
    White,
}

impl Color {
    /// Outline color used for a landmark group's polygon.
    pub fn for_group(group: LandmarkGroup) -> Color {
        match group {
            LandmarkGroup::InnerLips => Color::Purple,
            LandmarkGroup::LeftEyebrow => Color::Cyan,
            LandmarkGroup::RightEyebrow => Color::Yellow,
            LandmarkGroup::NoseCrest => Color::Magenta,
            LandmarkGroup::OuterLips => Color::Brown,
            _ => Color::White,
        }
    }

    pub fn rgb(self) -> [u8; 3] {
        match self {
            Color::Red => [255, 0, 0],
            Color::Purple => [128, 0, 128],
            Color::Cyan => [0, 255, 255],
            Color::Yellow => [255, 255, 0],
            Color::Magenta => [255, 0, 255],
            Color::Brown => [153, 102, 51],
            Color::White => [255, 255, 255],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    BoxOutline {
        rect: Rect,
        color: Color,
        line_width: f64,
    },
    /// Closed path: the last point repeats the first.
    Polygon {
        path: Vec<Point>,
        color: Color,
        line_width: f64,
    },
}

/// Shapes for exactly one processed frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DebugLayer {
    /// Frame the shapes were drawn for
    pub sequence: Option<u64>,
    shapes: Vec<Shape>,
}

impl DebugLayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.shapes.clear();
        self.sequence = None;
    }

    pub fn draw_box_outline(&mut self, rect: Rect) {
        self.shapes.push(Shape::BoxOutline {
            rect,
            color: Color::Red,
            line_width: DEFAULT_LINE_WIDTH,
        });
    }

    /// Outline `points` and close the path back to the first one.
    /// Nothing is drawn for an empty point list.
    pub fn draw_polygon(&mut self, points: &[Point], color: Color) {
        let Some(first) = points.first() else {
            return;
        };
        let mut path = points.to_vec();
        path.push(*first);
        self.shapes.push(Shape::Polygon {
            path,
            color,
            line_width: DEFAULT_LINE_WIDTH,
        });
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polygon_closes_path() {
        let mut layer = DebugLayer::new();
        let points = [Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(1.0, 1.0)];
        layer.draw_polygon(&points, Color::Cyan);
        match &layer.shapes()[0] {
            Shape::Polygon { path, color, .. } => {
                assert_eq!(path.len(), 4);
                assert_eq!(path.first(), path.last());
                assert_eq!(*color, Color::Cyan);
            }
            other => panic!("Expected polygon, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_polygon_ignored() {
        let mut layer = DebugLayer::new();
        layer.draw_polygon(&[], Color::Red);
        assert!(layer.is_empty());
    }

    #[test]
    fn test_clear_removes_everything() {
        let mut layer = DebugLayer::new();
        layer.sequence = Some(4);
        layer.draw_box_outline(Rect::new(0.0, 0.0, 1.0, 1.0));
        layer.clear();
        assert!(layer.is_empty());
        assert_eq!(layer.sequence, None);
    }

    #[test]
    fn test_group_colors() {
        assert_eq!(Color::for_group(LandmarkGroup::OuterLips), Color::Brown);
        assert_eq!(Color::for_group(LandmarkGroup::NoseCrest), Color::Magenta);
        assert_eq!(Color::Red.rgb(), [255, 0, 0]);
    }
}
