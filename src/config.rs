use std::fs;
use std::path::Path;

use display_json::DebugAsJsonPretty;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, RenderError};
use crate::vec3::{Color, Point3};

/// Startup constants for a render.
///
/// Every field has a default, so a RON file only needs to name what it
/// overrides:
///
/// ```text
/// (
///     camera: (image_width: 640),
///     surface: Headless,
/// )
/// ```
#[derive(Clone, PartialEq, Serialize, Deserialize, DebugAsJsonPretty)]
#[serde(default)]
pub struct Config {
    pub camera: CameraConfig,
    pub gradient: GradientConfig,
    pub surface: SurfaceKind,
    pub progress: bool,
    pub title: String,
    /// `env_logger` filter; `RUST_LOG` applies when unset.
    pub log_filter: Option<String>,
}

#[derive(Copy, Clone, PartialEq, Serialize, Deserialize, DebugAsJsonPretty)]
#[serde(default)]
pub struct CameraConfig {
    pub aspect_ratio: f64,
    pub image_width: u32,
    pub focal_length: f64,
    pub viewport_height: f64,
    pub camera_center: Point3,
}

#[derive(Copy, Clone, PartialEq, Serialize, Deserialize, DebugAsJsonPretty)]
#[serde(default)]
pub struct GradientConfig {
    pub top: Color,
    pub bottom: Color,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SurfaceKind {
    Window,
    Headless,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            camera: CameraConfig::default(),
            gradient: GradientConfig::default(),
            surface: SurfaceKind::Window,
            progress: true,
            title: String::from("skyview"),
            log_filter: None,
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        CameraConfig {
            aspect_ratio: 16.0 / 9.0,
            image_width: 400,
            focal_length: 1.0,
            viewport_height: 2.0,
            camera_center: Point3::ZERO,
        }
    }
}

impl Default for GradientConfig {
    fn default() -> Self {
        GradientConfig {
            top: Color::new(0.0, 0.9, 1.0),
            bottom: Color::new(0.8, 0.9, 1.0),
        }
    }
}

impl Config {
    pub fn from_ron_str(input: &str) -> Result<Config, ConfigError> {
        let config: Config = ron::from_str(input)?;
        config.validate()?;

        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let input = fs::read_to_string(path)?;
        Config::from_ron_str(&input)
    }

    pub fn validate(&self) -> Result<(), RenderError> {
        self.camera.validate()
    }
}

impl CameraConfig {
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.image_width == 0 {
            return Err(RenderError::InvalidDimension(String::from(
                "image_width must be at least 1",
            )));
        }

        for (name, value) in [
            ("aspect_ratio", self.aspect_ratio),
            ("focal_length", self.focal_length),
            ("viewport_height", self.viewport_height),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(RenderError::InvalidDimension(format!(
                    "{name} must be finite and positive, got {value}"
                )));
            }
        }

        self.image_height().map(|_| ())
    }

    /// `max(1, round(image_width / aspect_ratio))`, rejected when it does not
    /// fit in a `u32`.
    pub fn image_height(&self) -> Result<u32, RenderError> {
        let height = (self.image_width as f64 / self.aspect_ratio).round();
        if !height.is_finite() || height > u32::MAX as f64 {
            return Err(RenderError::InvalidDimension(format!(
                "image height {height} derived from aspect_ratio {} is too large",
                self.aspect_ratio
            )));
        }

        Ok((height as u32).max(1))
    }
}
