//! OverlayCompositor - owns the sprites and the debug layer.

use std::collections::BTreeMap;
use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use super::debug_layer::{Color, DebugLayer, Shape};
use super::sprite::{Feature, OverlaySprite, SpriteStyle};
use crate::detect::LandmarkGroup;
use crate::geometry::{MappedFace, MappedRegion, Point, Rect, Size};

/// Rotation applied to every placed sprite. The detector's coordinate
/// system is flipped on both axes relative to the preview.
pub const SPRITE_ROTATION: f64 = PI;

/// Groups outlined in the debug layer when extra landmarks are enabled.
pub const EXTRA_LANDMARK_GROUPS: [LandmarkGroup; 5] = [
    LandmarkGroup::InnerLips,
    LandmarkGroup::LeftEyebrow,
    LandmarkGroup::RightEyebrow,
    LandmarkGroup::NoseCrest,
    LandmarkGroup::OuterLips,
];

#[derive(Debug, Clone, PartialEq)]
pub struct CompositorOptions {
    /// Hide a sprite whose landmark group is missing instead of leaving it
    /// at its previous position
    pub hide_missing_sprites: bool,
    pub debug_drawing: bool,
    pub extra_landmarks: bool,
    pub styles: BTreeMap<Feature, SpriteStyle>,
}

impl Default for CompositorOptions {
    fn default() -> Self {
        Self {
            hide_missing_sprites: false,
            debug_drawing: true,
            extra_landmarks: false,
            styles: Feature::STACK_ORDER
                .into_iter()
                .map(|f| (f, SpriteStyle::default_for(f)))
                .collect(),
        }
    }
}

/// Result of detection and mapping for one frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FrameUpdate {
    pub sequence: u64,
    /// Viewport the faces were mapped into
    pub viewport: Size,
    pub faces: Vec<MappedFace>,
}

/// Layer-level transform applied by the renderer to the sprite and debug
/// layers as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayerTransform {
    pub scale_x: f64,
    pub scale_y: f64,
}

impl LayerTransform {
    /// Flip on both axes.
    pub const FLIPPED: LayerTransform = LayerTransform {
        scale_x: -1.0,
        scale_y: -1.0,
    };
}

/// Everything a renderer needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub sequence: Option<u64>,
    pub viewport: Size,
    pub layer_transform: LayerTransform,
    /// Bottom to top
    pub sprites: Vec<OverlaySprite>,
    pub shapes: Vec<Shape>,
}

/// Owns the four feature sprites and the debug layer.
///
/// Sprites are created once and only ever mutated through placement;
/// the debug layer is rebuilt on every commit.
#[derive(Debug, Clone)]
pub struct OverlayCompositor {
    sprites: Vec<OverlaySprite>,
    debug: DebugLayer,
    options: CompositorOptions,
    viewport: Size,
}

impl OverlayCompositor {
    /// Create the four sprites, unplaced, in their initial stacking order.
    ///
    /// # Arguments
    /// * `viewport` - Size the debug layer and sprites are drawn in
    /// * `options` - Debug drawing, missing-sprite handling and sprite styles
    pub fn new(viewport: Size, options: CompositorOptions) -> Self {
        let sprites: Vec<OverlaySprite> = Feature::STACK_ORDER
            .into_iter()
            .enumerate()
            .map(|(z, feature)| {
                let style = options
                    .styles
                    .get(&feature)
                    .cloned()
                    .unwrap_or_else(|| SpriteStyle::default_for(feature));
                OverlaySprite::new(feature, style, z as u32)
            })
            .collect();
        Self {
            sprites,
            debug: DebugLayer::new(),
            options,
            viewport,
        }
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Size) {
        log::debug!("Viewport set to {}x{}", viewport.width, viewport.height);
        self.viewport = viewport;
    }

    pub fn options(&self) -> &CompositorOptions {
        &self.options
    }

    pub fn sprite(&self, feature: Feature) -> Option<&OverlaySprite> {
        self.sprites.iter().find(|s| s.feature == feature)
    }

    fn sprite_mut(&mut self, feature: Feature) -> Option<&mut OverlaySprite> {
        self.sprites.iter_mut().find(|s| s.feature == feature)
    }

    pub fn sprites(&self) -> &[OverlaySprite] {
        &self.sprites
    }

    pub fn debug_layer(&self) -> &DebugLayer {
        &self.debug
    }

    /// Move `feature`'s sprite onto `region`, rotate it half a turn and
    /// raise it above its siblings.
    pub fn place_sprite(&mut self, feature: Feature, region: &MappedRegion) {
        let Some(sprite) = self.sprite_mut(feature) else {
            return;
        };
        sprite.transform.frame = Some(region.rect);
        sprite.transform.rotation = SPRITE_ROTATION;
        sprite.visible = true;
        self.bring_to_front(feature);
    }

    /// Raise `feature` to the top. Z indices stay a permutation of
    /// `0..sprites.len()`.
    fn bring_to_front(&mut self, feature: Feature) {
        let Some(current) = self.sprite(feature).map(|s| s.z_index) else {
            return;
        };
        let top = self.sprites.len().saturating_sub(1) as u32;
        for sprite in &mut self.sprites {
            if sprite.feature == feature {
                sprite.z_index = top;
            } else if sprite.z_index > current {
                sprite.z_index -= 1;
            }
        }
    }

    pub fn clear_debug_layer(&mut self) {
        self.debug.clear();
    }

    pub fn draw_box_outline(&mut self, rect: Rect) {
        self.debug.draw_box_outline(rect);
    }

    pub fn draw_polygon(&mut self, points: &[Point], color: Color) {
        self.debug.draw_polygon(points, color);
    }

    /// Position the four sprites from `face`. Returns how many were placed.
    ///
    /// A sprite whose group is missing keeps its previous transform unless
    /// `hide_missing_sprites` is set.
    pub fn apply_face(&mut self, face: &MappedFace) -> usize {
        let mut placed = 0;
        for feature in Feature::PLACEMENT_ORDER {
            match face.region(feature.landmark_group()) {
                Some(region) => {
                    let region = *region;
                    if self.options.debug_drawing {
                        self.draw_box_outline(region.rect);
                    }
                    self.place_sprite(feature, &region);
                    placed += 1;
                }
                None => {
                    log::debug!("No {} landmarks, {} sprite not moved", feature.landmark_group(), feature);
                    if self.options.hide_missing_sprites {
                        if let Some(sprite) = self.sprite_mut(feature) {
                            sprite.visible = false;
                        }
                    }
                }
            }
        }
        placed
    }

    /// Replace the previous frame's result with `update`.
    ///
    /// The debug layer is rebuilt from scratch. Sprites follow the first
    /// face; every face gets a box outline. The compositor takes on the
    /// viewport the update was mapped into, so a scene never pairs one
    /// viewport with regions computed for another.
    ///
    /// # Arguments
    /// * `update` - Faces of one frame, already mapped into pixel space
    pub fn commit(&mut self, update: &FrameUpdate) {
        // Previous frame's shapes go first
        self.clear_debug_layer();
        self.debug.sequence = Some(update.sequence);
        if self.viewport != update.viewport {
            self.set_viewport(update.viewport);
        }

        for (i, face) in update.faces.iter().enumerate() {
            if self.options.debug_drawing {
                self.draw_box_outline(face.face_box);
            }
            if i == 0 {
                self.apply_face(face);
            }
            if self.options.debug_drawing && self.options.extra_landmarks {
                for group in EXTRA_LANDMARK_GROUPS {
                    if let Some(points) = face.outlines.get(&group) {
                        self.draw_polygon(points, Color::for_group(group));
                    }
                }
            }
        }
    }

    pub fn scene(&self) -> Scene {
        let mut sprites = self.sprites.clone();
        sprites.sort_by_key(|s| s.z_index);
        Scene {
            sequence: self.debug.sequence,
            viewport: self.viewport,
            layer_transform: LayerTransform::FLIPPED,
            sprites,
            shapes: self.debug.shapes().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::FaceObservation;
    use crate::geometry::GeometryMapper;

    fn compositor() -> OverlayCompositor {
        OverlayCompositor::new(Size::new(200.0, 200.0), CompositorOptions::default())
    }

    fn face_with(groups: &[(LandmarkGroup, Vec<Point>)]) -> MappedFace {
        let mut face = FaceObservation::new(Rect::new(0.0, 0.0, 1.0, 1.0));
        for (group, points) in groups {
            face = face.with_group(*group, points.clone());
        }
        GeometryMapper::new(Size::new(200.0, 200.0)).map_face(&face)
    }

    #[test]
    fn test_initial_stack_order() {
        let c = compositor();
        let scene = c.scene();
        let order: Vec<Feature> = scene.sprites.iter().map(|s| s.feature).collect();
        assert_eq!(order, Feature::STACK_ORDER.to_vec());
    }

    #[test]
    fn test_place_sprite_rotates_and_raises() {
        let mut c = compositor();
        let region = MappedRegion {
            rect: Rect::new(1.0, 2.0, 3.0, 4.0),
        };
        c.place_sprite(Feature::Tongue, &region);
        let tongue = c.sprite(Feature::Tongue).unwrap();
        assert_eq!(tongue.transform.frame, Some(region.rect));
        assert_eq!(tongue.transform.rotation, PI);
        let top = c.scene().sprites.last().unwrap().feature;
        assert_eq!(top, Feature::Tongue);
    }

    #[test]
    fn test_apply_face_places_all_four() {
        let mut c = compositor();
        let p = vec![Point::new(0.5, 0.5)];
        let face = face_with(&[
            (LandmarkGroup::LeftEye, p.clone()),
            (LandmarkGroup::RightEye, p.clone()),
            (LandmarkGroup::Nose, p.clone()),
            (LandmarkGroup::InnerLips, p),
        ]);
        assert_eq!(c.apply_face(&face), 4);
        assert!(c.sprites().iter().all(|s| s.is_shown()));
    }

    #[test]
    fn test_full_face_leaves_tongue_on_top() {
        let mut c = compositor();
        let p = vec![Point::new(0.5, 0.5)];
        c.apply_face(&face_with(&[
            (LandmarkGroup::LeftEye, p.clone()),
            (LandmarkGroup::RightEye, p.clone()),
            (LandmarkGroup::Nose, p.clone()),
            (LandmarkGroup::InnerLips, p),
        ]));
        let order: Vec<Feature> = c.scene().sprites.iter().map(|s| s.feature).collect();
        assert_eq!(
            order,
            vec![Feature::LeftEye, Feature::RightEye, Feature::Nose, Feature::Tongue]
        );
    }

    #[test]
    fn test_z_indices_stay_compact() {
        let mut c = compositor();
        let region = MappedRegion {
            rect: Rect::new(0.0, 0.0, 1.0, 1.0),
        };
        for i in 0..1000 {
            c.place_sprite(Feature::PLACEMENT_ORDER[i % 4], &region);
        }
        let mut z: Vec<u32> = c.sprites().iter().map(|s| s.z_index).collect();
        z.sort_unstable();
        assert_eq!(z, vec![0, 1, 2, 3]);
        // 999 % 4 == 3
        assert_eq!(c.scene().sprites.last().unwrap().feature, Feature::Tongue);
    }

    #[test]
    fn test_commit_adopts_update_viewport() {
        let mut c = compositor();
        c.commit(&FrameUpdate {
            sequence: 0,
            viewport: Size::new(400.0, 300.0),
            faces: vec![],
        });
        assert_eq!(c.viewport(), Size::new(400.0, 300.0));
        assert_eq!(c.scene().viewport, Size::new(400.0, 300.0));
    }

    #[test]
    fn test_missing_group_keeps_stale_transform() {
        let mut c = compositor();
        c.commit(&FrameUpdate {
            sequence: 0,
            viewport: Size::new(200.0, 200.0),
            faces: vec![face_with(&[(LandmarkGroup::Nose, vec![Point::new(0.5, 0.5)])])],
        });
        let before = c.sprite(Feature::Nose).unwrap().transform;

        c.commit(&FrameUpdate {
            sequence: 1,
            viewport: Size::new(200.0, 200.0),
            faces: vec![face_with(&[(LandmarkGroup::LeftEye, vec![Point::new(0.1, 0.1)])])],
        });
        let nose = c.sprite(Feature::Nose).unwrap();
        assert_eq!(nose.transform, before);
        assert!(nose.visible);
    }

    #[test]
    fn test_missing_group_hidden_when_enabled() {
        let options = CompositorOptions {
            hide_missing_sprites: true,
            ..CompositorOptions::default()
        };
        let mut c = OverlayCompositor::new(Size::new(200.0, 200.0), options);
        c.commit(&FrameUpdate {
            sequence: 0,
            viewport: Size::new(200.0, 200.0),
            faces: vec![face_with(&[(LandmarkGroup::Nose, vec![Point::new(0.5, 0.5)])])],
        });
        c.commit(&FrameUpdate {
            sequence: 1,
            viewport: Size::new(200.0, 200.0),
            faces: vec![face_with(&[])],
        });
        assert!(!c.sprite(Feature::Nose).unwrap().visible);
    }

    #[test]
    fn test_commit_rebuilds_debug_layer() {
        let mut c = compositor();
        let p = vec![Point::new(0.5, 0.5)];
        c.commit(&FrameUpdate {
            sequence: 0,
            viewport: Size::new(200.0, 200.0),
            faces: vec![
                face_with(&[(LandmarkGroup::LeftEye, p.clone())]),
                face_with(&[(LandmarkGroup::LeftEye, p)]),
            ],
        });
        // two face boxes + one eye region from the first face
        assert_eq!(c.debug_layer().len(), 3);

        c.commit(&FrameUpdate {
            sequence: 1,
            viewport: Size::new(200.0, 200.0),
            faces: vec![],
        });
        assert!(c.debug_layer().is_empty());
        assert_eq!(c.debug_layer().sequence, Some(1));
    }

    #[test]
    fn test_extra_landmarks_drawn_as_polygons() {
        let options = CompositorOptions {
            extra_landmarks: true,
            ..CompositorOptions::default()
        };
        let mut c = OverlayCompositor::new(Size::new(200.0, 200.0), options);
        c.commit(&FrameUpdate {
            sequence: 0,
            viewport: Size::new(200.0, 200.0),
            faces: vec![face_with(&[(
                LandmarkGroup::LeftEyebrow,
                vec![Point::new(0.1, 0.1), Point::new(0.2, 0.1)],
            )])],
        });
        let polygons: Vec<&Shape> = c
            .debug_layer()
            .shapes()
            .iter()
            .filter(|s| matches!(s, Shape::Polygon { color: Color::Cyan, .. }))
            .collect();
        assert_eq!(polygons.len(), 1);
    }

    #[test]
    fn test_debug_drawing_disabled() {
        let options = CompositorOptions {
            debug_drawing: false,
            ..CompositorOptions::default()
        };
        let mut c = OverlayCompositor::new(Size::new(200.0, 200.0), options);
        c.commit(&FrameUpdate {
            sequence: 0,
            viewport: Size::new(200.0, 200.0),
            faces: vec![face_with(&[(LandmarkGroup::Nose, vec![Point::new(0.5, 0.5)])])],
        });
        assert!(c.debug_layer().is_empty());
        assert!(c.sprite(Feature::Nose).unwrap().is_shown());
    }
}
