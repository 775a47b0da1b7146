//! Overlay sprites: the persistent "dog filter" pieces.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::detect::LandmarkGroup;
use crate::geometry::Rect;

/// Which facial feature a sprite decorates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    LeftEye,
    RightEye,
    Nose,
    Tongue,
}

impl Feature {
    /// Initial stacking order, bottom first.
    pub const STACK_ORDER: [Feature; 4] = [
        Feature::Tongue,
        Feature::Nose,
        Feature::LeftEye,
        Feature::RightEye,
    ];

    /// Order sprites are placed (and raised) for a face, so after a full
    /// face the tongue is on top and the eyes at the bottom.
    pub const PLACEMENT_ORDER: [Feature; 4] = [
        Feature::LeftEye,
        Feature::RightEye,
        Feature::Nose,
        Feature::Tongue,
    ];

    /// Landmark group the sprite is positioned from.
    pub fn landmark_group(self) -> LandmarkGroup {
        match self {
            Feature::LeftEye => LandmarkGroup::LeftEye,
            Feature::RightEye => LandmarkGroup::RightEye,
            Feature::Nose => LandmarkGroup::Nose,
            Feature::Tongue => LandmarkGroup::InnerLips,
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Feature::LeftEye => write!(f, "left_eye"),
            Feature::RightEye => write!(f, "right_eye"),
            Feature::Nose => write!(f, "nose"),
            Feature::Tongue => write!(f, "tongue"),
        }
    }
}

/// How the asset is fitted into the sprite frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentMode {
    #[default]
    AspectFill,
    AspectFit,
}

/// Asset and look of one sprite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpriteStyle {
    pub asset: String,
    #[serde(default = "default_alpha")]
    pub alpha: f32,
    #[serde(default)]
    pub content_mode: ContentMode,
}

fn default_alpha() -> f32 {
    1.0
}

impl SpriteStyle {
    pub fn default_for(feature: Feature) -> Self {
        match feature {
            Feature::LeftEye => Self {
                asset: "coeur".to_string(),
                alpha: 0.5,
                content_mode: ContentMode::AspectFill,
            },
            Feature::RightEye => Self {
                asset: "coeur".to_string(),
                alpha: 1.0,
                content_mode: ContentMode::AspectFill,
            },
            Feature::Nose => Self {
                asset: "noseDog".to_string(),
                alpha: 1.0,
                content_mode: ContentMode::AspectFit,
            },
            Feature::Tongue => Self {
                asset: "tongueDog".to_string(),
                alpha: 1.0,
                content_mode: ContentMode::AspectFill,
            },
        }
    }
}

/// Position, rotation (radians) and uniform scale of a sprite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// `None` until the sprite has been placed once
    pub frame: Option<Rect>,
    pub rotation: f64,
    pub scale: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            frame: None,
            rotation: 0.0,
            scale: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlaySprite {
    pub feature: Feature,
    pub style: SpriteStyle,
    pub transform: Transform,
    pub visible: bool,
    /// Higher draws on top
    pub z_index: u32,
}

impl OverlaySprite {
    pub fn new(feature: Feature, style: SpriteStyle, z_index: u32) -> Self {
        Self {
            feature,
            style,
            transform: Transform::default(),
            visible: true,
            z_index,
        }
    }

    /// Placed at least once and not hidden.
    pub fn is_shown(&self) -> bool {
        self.visible && self.transform.frame.is_some() && self.style.alpha > 0.0
    }
}
