//! Unit tests for landmark-to-pixel mapping.

use landmark_overlay::detect::{FaceObservation, LandmarkGroup};
use landmark_overlay::geometry::{
    map_landmark_group, map_landmark_group_with_inset, map_points, scale_bounding_box,
    GeometryMapper, Point, Rect, Size, DEFAULT_INSET,
};

fn grid(steps: usize) -> Vec<Point> {
    let mut points = Vec::new();
    for i in 0..=steps {
        for j in 0..=steps {
            points.push(Point::new(
                i as f64 / steps as f64,
                j as f64 / steps as f64,
            ));
        }
    }
    points
}

#[test]
fn test_single_point_centered_region() {
    let pixel_box = Rect::new(0.0, 0.0, 100.0, 100.0);
    let region = map_landmark_group(&[Point::new(0.5, 0.5)], pixel_box).unwrap();
    assert_eq!(region.rect, Rect::new(40.0, 40.0, 20.0, 20.0));
}

#[test]
fn test_empty_group_has_no_region() {
    let pixel_box = Rect::new(0.0, 0.0, 100.0, 100.0);
    assert!(map_landmark_group(&[], pixel_box).is_none());
}

#[test]
fn test_region_contains_every_mapped_point() {
    let boxes = [
        Rect::new(0.0, 0.0, 100.0, 100.0),
        Rect::new(35.5, 12.0, 80.0, 140.0),
        Rect::new(-20.0, 300.0, 10.0, 5.0),
    ];
    let points = grid(6);

    for pixel_box in boxes {
        for window in points.windows(3) {
            let region = map_landmark_group(window, pixel_box).unwrap();
            assert!(region.rect.width >= 2.0 * DEFAULT_INSET);
            assert!(region.rect.height >= 2.0 * DEFAULT_INSET);
            for p in map_points(window, pixel_box) {
                assert!(
                    region.rect.contains(p),
                    "{:?} not inside {:?}",
                    p,
                    region.rect
                );
            }
        }
    }
}

#[test]
fn test_region_spans_exact_bounds_plus_inset() {
    let pixel_box = Rect::new(10.0, 20.0, 200.0, 100.0);
    let points = [
        Point::new(0.25, 0.5),
        Point::new(0.75, 0.1),
        Point::new(0.5, 0.9),
    ];
    let region = map_landmark_group_with_inset(&points, pixel_box, 5.0).unwrap();
    // x: 60..160, y: 30..110
    assert_eq!(region.rect, Rect::new(55.0, 25.0, 110.0, 90.0));
}

#[test]
fn test_bounds_not_anchored_at_origin() {
    let pixel_box = Rect::new(500.0, 500.0, 100.0, 100.0);
    let region = map_landmark_group(&[Point::new(0.9, 0.9), Point::new(1.0, 1.0)], pixel_box)
        .unwrap();
    assert_eq!(region.rect, Rect::new(580.0, 580.0, 30.0, 30.0));
}

#[test]
fn test_out_of_box_points_not_clamped() {
    let pixel_box = Rect::new(0.0, 0.0, 100.0, 100.0);
    let region = map_landmark_group(&[Point::new(-0.5, 1.5)], pixel_box).unwrap();
    assert_eq!(region.rect, Rect::new(-60.0, 140.0, 20.0, 20.0));
}

#[test]
fn test_scale_bounding_box_uses_both_axes() {
    let scaled = scale_bounding_box(Rect::new(0.1, 0.2, 0.5, 0.25), Size::new(480.0, 640.0));
    assert_eq!(scaled, Rect::new(48.0, 128.0, 240.0, 160.0));
}

#[test]
fn test_map_face_keeps_only_present_groups() {
    let face = FaceObservation::new(Rect::new(0.0, 0.0, 1.0, 1.0))
        .with_group(LandmarkGroup::LeftEye, vec![Point::new(0.5, 0.5)])
        .with_group(LandmarkGroup::Nose, vec![]);
    let mapped = GeometryMapper::new(Size::new(200.0, 200.0)).map_face(&face);

    assert_eq!(mapped.face_box, Rect::new(0.0, 0.0, 200.0, 200.0));
    assert_eq!(
        mapped.region(LandmarkGroup::LeftEye).unwrap().rect,
        Rect::new(90.0, 90.0, 20.0, 20.0)
    );
    assert!(mapped.region(LandmarkGroup::Nose).is_none());
    assert!(mapped.region(LandmarkGroup::RightEye).is_none());
}
