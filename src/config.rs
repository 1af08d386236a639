//! Application configuration.
//!
//! Built in code with the builder methods, or read from a TOML file:
//!
//! ```toml
//! title = "My Portfolio"
//! width = 1600
//! height = 900
//! start_scene = "chess"
//! max_frame_dt = 0.25
//! font_path = "/usr/share/fonts/TTF/DejaVuSans.ttf"
//! resume_pdf = "assets/resume.pdf"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;
use crate::scene::SceneKey;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Scene shown at startup.
    pub start_scene: SceneKey,
    /// Upper bound for the per-frame time step, in seconds. Unbounded if unset.
    pub max_frame_dt: Option<f32>,
    /// Font for overlay text. Common system locations are tried if unset.
    pub font_path: Option<PathBuf>,
    /// Resume document advertised by the resume browser.
    pub resume_pdf: Option<PathBuf>,
    pub vsync: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Folio".to_string(),
            width: 1280,
            height: 720,
            start_scene: SceneKey::Intro,
            max_frame_dt: None,
            font_path: None,
            resume_pdf: None,
            vsync: true,
        }
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn start_scene(mut self, key: SceneKey) -> Self {
        self.start_scene = key;
        self
    }

    pub fn max_frame_dt(mut self, seconds: f32) -> Self {
        self.max_frame_dt = Some(seconds);
        self
    }

    pub fn font_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.font_path = Some(path.into());
        self
    }

    pub fn resume_pdf(mut self, path: impl Into<PathBuf>) -> Self {
        self.resume_pdf = Some(path.into());
        self
    }

    pub fn vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;
        self
    }

    /// Parse and validate a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&text)?;
        log::debug!("loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidValue {
                field: "width/height",
                reason: format!("window size {}x{} has no area", self.width, self.height),
            });
        }
        if let Some(dt) = self.max_frame_dt {
            if !dt.is_finite() || dt <= 0.0 {
                return Err(ConfigError::InvalidValue {
                    field: "max_frame_dt",
                    reason: format!("{dt} is not a positive number of seconds"),
                });
            }
        }
        Ok(())
    }
}
