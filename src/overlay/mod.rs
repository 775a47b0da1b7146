//! Overlay sprites, debug drawing and their compositor.

mod compositor;
mod debug_layer;
mod sprite;

pub use compositor::{
    CompositorOptions, FrameUpdate, LayerTransform, OverlayCompositor, Scene,
    EXTRA_LANDMARK_GROUPS, SPRITE_ROTATION,
};
pub use debug_layer::{Color, DebugLayer, Shape, DEFAULT_LINE_WIDTH};
pub use sprite::{ContentMode, Feature, OverlaySprite, SpriteStyle, Transform};
