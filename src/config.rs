//! Demo configuration
//!
//! Defaults reproduce the fixed demo setup. In the browser an override can be
//! stored as JSON in LocalStorage; natively it is read from a JSON file.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::renderer::Color;
use crate::sim::{Rect, Viewport};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Settings shared by both demos
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    // === Window ===
    pub view_width: u32,
    pub view_height: u32,
    /// Clear colour (RGBA)
    pub background: Color,
    /// Host scheduler cadence
    pub fps: u32,

    // === Pong ===
    pub paddle_speed: i32,
    pub ball_velocity: [i32; 2],
    pub paddle_image: String,
    pub ball_image: String,
    pub font_path: String,
    pub font_size: f32,
    pub text_color: Color,

    // === Image viewer ===
    pub viewer_image: String,
    pub viewer_dest: Rect,
}

impl Default for DemoConfig {
    fn default() -> Self {
        let [x, y, w, h] = VIEWER_DEST;
        Self {
            view_width: VIEW_WIDTH,
            view_height: VIEW_HEIGHT,
            background: crate::renderer::WHITE,
            fps: FPS,

            paddle_speed: PADDLE_SPEED,
            ball_velocity: BALL_START_VELOCITY,
            paddle_image: PADDLE_IMAGE.to_string(),
            ball_image: BALL_IMAGE.to_string(),
            font_path: FONT_PATH.to_string(),
            font_size: FONT_SIZE,
            text_color: crate::renderer::BLACK,

            viewer_image: PADDLE_IMAGE.to_string(),
            viewer_dest: Rect::new(x, y, w, h),
        }
    }
}

impl DemoConfig {
    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "blit_pong_config";

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.view_width as i32, self.view_height as i32)
    }

    /// Reject values the demos cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.view_width == 0 || self.view_height == 0 {
            return Err(ConfigError::Invalid(format!(
                "viewport must be non-empty, got {}x{}",
                self.view_width, self.view_height
            )));
        }
        if self.view_width > i32::MAX as u32 || self.view_height > i32::MAX as u32 {
            return Err(ConfigError::Invalid("viewport too large".to_string()));
        }
        if self.fps == 0 {
            return Err(ConfigError::Invalid("fps must be at least 1".to_string()));
        }
        if self.paddle_speed <= 0 {
            return Err(ConfigError::Invalid(format!(
                "paddle_speed must be positive, got {}",
                self.paddle_speed
            )));
        }
        if !(self.font_size.is_finite() && self.font_size > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "font_size must be positive, got {}",
                self.font_size
            )));
        }
        Ok(())
    }

    /// Parse and validate a JSON document. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON config file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load config from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(config) => {
                        log::info!("Loaded config from LocalStorage");
                        return config;
                    }
                    Err(e) => log::warn!("Ignoring stored config: {}", e),
                }
            }
        }

        log::info!("Using default config");
        Self::default()
    }
}
