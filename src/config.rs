//! Configuration file handling for landmark-overlay.
//!
//! Loads configuration from `<config dir>/landmark-overlay/config.toml` or a custom path.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::frame::{CameraSettings, Orientation, PixelFormat, Resolution};
use crate::geometry::{Size, DEFAULT_INSET};
use crate::overlay::{CompositorOptions, Feature, SpriteStyle};
use crate::render_loop::LoopOptions;

/// Configuration file structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub viewport: ViewportConfig,
    #[serde(default)]
    pub overlay: OverlayConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    pub front_facing: bool,
    /// Correction applied to front-facing frames
    pub orientation: Orientation,
    pub pixel_format: PixelFormat,
}

impl Default for CameraConfig {
    fn default() -> Self {
        let settings = CameraSettings::default();
        Self {
            width: settings.resolution.width,
            height: settings.resolution.height,
            fps: settings.fps,
            front_facing: settings.front_facing,
            orientation: settings.correction,
            pixel_format: settings.format,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub width: f64,
    pub height: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 480.0,
            height: 640.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    pub inset: f64,
    pub hide_missing_sprites: bool,
    pub debug_drawing: bool,
    pub extra_landmarks: bool,
    /// Per-sprite overrides, keyed by feature name
    pub sprites: BTreeMap<Feature, SpriteStyle>,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            inset: DEFAULT_INSET,
            hide_missing_sprites: false,
            debug_drawing: true,
            extra_landmarks: false,
            sprites: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Log,
    Json,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub max_frames: Option<u64>,
    pub output: OutputFormat,
}

impl Config {
    /// Load configuration from a file path.
    /// Returns default config if the file doesn't exist.
    /// Returns an error if the file exists but cannot be parsed.
    ///
    /// # Arguments
    /// * `path` - Config file, or `None` for [`default_path`]
    ///
    /// # Errors
    /// * `ConfigError::IoError` - the file exists but cannot be read
    /// * `ConfigError::ParseError` - the file is not valid TOML for `Config`
    /// * `ConfigError::InvalidValue` - see [`Config::validate`]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.map(PathBuf::from).unwrap_or_else(default_path);

        if path.exists() {
            let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::IoError {
                path: path.clone(),
                source: e,
            })?;
            let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.clone(),
                source: e,
            })?;
            config.validate(&path)?;
            log::debug!("Loaded config from '{}'", path.display());
            Ok(config)
        } else {
            log::debug!("No config at '{}', using defaults", path.display());
            Ok(Config::default())
        }
    }

    /// Check values serde cannot rule out on its own.
    ///
    /// # Errors
    /// * `ConfigError::InvalidValue` - negative `overlay.inset`, or a
    ///   `[viewport]` side that is not greater than 0
    pub fn validate(&self, path: &Path) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::InvalidValue {
            path: path.to_path_buf(),
            message,
        };
        // NaN fails both comparisons below as well
        if !(self.overlay.inset >= 0.0) {
            return Err(invalid(format!(
                "overlay.inset must not be negative (got {})",
                self.overlay.inset
            )));
        }
        if !(self.viewport.width > 0.0 && self.viewport.height > 0.0) {
            return Err(invalid(format!(
                "viewport width and height must be greater than 0 (got {}x{})",
                self.viewport.width, self.viewport.height
            )));
        }
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::SerializeError)
    }

    pub fn camera_settings(&self) -> CameraSettings {
        CameraSettings {
            resolution: Resolution {
                width: self.camera.width,
                height: self.camera.height,
            },
            fps: self.camera.fps,
            format: self.camera.pixel_format,
            front_facing: self.camera.front_facing,
            correction: self.camera.orientation,
        }
    }

    pub fn viewport(&self) -> Size {
        Size::new(self.viewport.width, self.viewport.height)
    }

    /// Compositor options with the configured sprite overrides laid over
    /// the built-in styles.
    ///
    /// Features without a `[overlay.sprites.<feature>]` table keep their
    /// default asset, alpha and content mode.
    pub fn compositor_options(&self) -> CompositorOptions {
        // Start from the built-in styles so partial overrides stay complete
        let mut options = CompositorOptions {
            hide_missing_sprites: self.overlay.hide_missing_sprites,
            debug_drawing: self.overlay.debug_drawing,
            extra_landmarks: self.overlay.extra_landmarks,
            ..CompositorOptions::default()
        };
        for (feature, style) in &self.overlay.sprites {
            options.styles.insert(*feature, style.clone());
        }
        options
    }

    pub fn loop_options(&self) -> LoopOptions {
        LoopOptions {
            inset: self.overlay.inset,
            max_frames: self.render.max_frames,
        }
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{}': {source}", .path.display())]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{}': {source}", .path.display())]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Invalid value in config file '{}': {message}", .path.display())]
    InvalidValue { path: PathBuf, message: String },
    #[error("Failed to serialize config: {0}")]
    SerializeError(toml::ser::Error),
}

/// Get the default config file path.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("landmark-overlay").join("config.toml"))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config/landmark-overlay/config.toml")
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = Config::load(Some(Path::new("/nonexistent/landmark-overlay.toml"))).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_sections_use_defaults() {
        let config: Config = toml::from_str("[overlay]\nhide_missing_sprites = true\n").unwrap();
        assert!(config.overlay.hide_missing_sprites);
        assert_eq!(config.overlay.inset, 10.0);
        assert_eq!(config.camera.fps, 30);
        assert_eq!(config.camera.orientation, Orientation::LeftMirrored);
    }

    #[test]
    fn test_sprite_overrides() {
        let config: Config = toml::from_str(
            "[overlay.sprites.nose]\nasset = \"pigNose\"\nalpha = 0.8\n",
        )
        .unwrap();
        let options = config.compositor_options();
        assert_eq!(options.styles[&Feature::Nose].asset, "pigNose");
        assert_eq!(options.styles[&Feature::Tongue].asset, "tongueDog");
    }

    #[test]
    fn test_camera_settings_from_config() {
        let config: Config =
            toml::from_str("[camera]\nwidth = 320\nheight = 240\npixel_format = \"gray8\"\n")
                .unwrap();
        let settings = config.camera_settings();
        assert_eq!(settings.resolution, Resolution::LOW);
        assert_eq!(settings.format, PixelFormat::Gray8);
    }

    #[test]
    fn test_validate_rejects_negative_inset() {
        let config: Config = toml::from_str("[overlay]\ninset = -20.0\n").unwrap();
        let err = config.validate(Path::new("c.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
        assert!(err.to_string().contains("overlay.inset"));
    }

    #[test]
    fn test_validate_rejects_empty_viewport() {
        let config: Config = toml::from_str("[viewport]\nwidth = 0.0\n").unwrap();
        assert!(config.validate(Path::new("c.toml")).is_err());
        assert!(Config::default().validate(Path::new("c.toml")).is_ok());
    }

    #[test]
    fn test_default_path_file_name() {
        assert!(default_path().ends_with("landmark-overlay/config.toml"));
    }

    #[test]
    fn test_to_toml_round_trips_defaults() {
        let text = Config::default().to_toml().unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed, Config::default());
    }
}
