//! Asset loading
//!
//! Images and the font are read once at startup: from disk natively, over
//! HTTP in the browser. Every failed load logs a diagnostic naming the path.
//!
//! The Pong loop cannot run without its two images, so those failures abort
//! startup. A missing font only disables the status text.

use fontdue::{Font, FontSettings};
use glam::IVec2;
use image::RgbaImage;
use thiserror::Error;

use crate::config::DemoConfig;
use crate::renderer::{FontRasterizer, Rasterize};

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to fetch {path}: {reason}")]
    Fetch { path: String, reason: String },
    #[error("failed to decode image {path}: {source}")]
    Image {
        path: String,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to parse font {path}: {reason}")]
    Font { path: String, reason: String },
}

impl AssetError {
    /// Path of the asset that failed
    pub fn path(&self) -> &str {
        match self {
            AssetError::Io { path, .. }
            | AssetError::Fetch { path, .. }
            | AssetError::Image { path, .. }
            | AssetError::Font { path, .. } => path,
        }
    }
}

/// A decoded RGBA image
#[derive(Debug, Clone)]
pub struct Sprite {
    pub path: String,
    pub image: RgbaImage,
}

impl Sprite {
    /// Decode PNG bytes
    pub fn decode(path: &str, bytes: &[u8]) -> Result<Self, AssetError> {
        let image = image::load_from_memory(bytes)
            .map_err(|source| AssetError::Image {
                path: path.to_string(),
                source,
            })?
            .to_rgba8();
        Ok(Self {
            path: path.to_string(),
            image,
        })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn size(&self) -> IVec2 {
        IVec2::new(self.image.width() as i32, self.image.height() as i32)
    }
}

/// Parse TrueType/OpenType bytes
pub fn decode_font(path: &str, bytes: &[u8]) -> Result<Font, AssetError> {
    Font::from_bytes(bytes, FontSettings::default()).map_err(|e| AssetError::Font {
        path: path.to_string(),
        reason: e.to_string(),
    })
}

fn report<T>(result: Result<T, AssetError>) -> Result<T, AssetError> {
    if let Err(e) = &result {
        log::error!("Asset load failed: {}", e);
    }
    result
}

#[cfg(not(target_arch = "wasm32"))]
pub fn read_asset(path: &str) -> Result<Vec<u8>, AssetError> {
    std::fs::read(path).map_err(|source| AssetError::Io {
        path: path.to_string(),
        source,
    })
}

#[cfg(target_arch = "wasm32")]
pub async fn fetch_asset(path: &str) -> Result<Vec<u8>, AssetError> {
    crate::platform::web::fetch_bytes(path)
        .await
        .map_err(|reason| AssetError::Fetch {
            path: path.to_string(),
            reason,
        })
}

/// Read and decode an image file
#[cfg(not(target_arch = "wasm32"))]
pub fn load_sprite(path: &str) -> Result<Sprite, AssetError> {
    report(read_asset(path).and_then(|bytes| Sprite::decode(path, &bytes)))
}

/// Read and parse a font file
#[cfg(not(target_arch = "wasm32"))]
pub fn load_font(path: &str) -> Result<Font, AssetError> {
    report(read_asset(path).and_then(|bytes| decode_font(path, &bytes)))
}

/// Fetch and decode an image
#[cfg(target_arch = "wasm32")]
pub async fn fetch_sprite(path: &str) -> Result<Sprite, AssetError> {
    report(
        fetch_asset(path)
            .await
            .and_then(|bytes| Sprite::decode(path, &bytes)),
    )
}

/// Fetch and parse a font
#[cfg(target_arch = "wasm32")]
pub async fn fetch_font(path: &str) -> Result<Font, AssetError> {
    report(
        fetch_asset(path)
            .await
            .and_then(|bytes| decode_font(path, &bytes)),
    )
}

/// Everything the Pong loop loads at startup
pub struct PongAssets {
    pub paddle: Sprite,
    pub ball: Sprite,
    /// Status text rasterizer; `None` when the font could not be loaded
    pub text: Option<Box<dyn Rasterize>>,
}

impl PongAssets {
    /// Apply the load policy to individual load results
    pub fn assemble(
        config: &DemoConfig,
        paddle: Result<Sprite, AssetError>,
        ball: Result<Sprite, AssetError>,
        font: Result<Font, AssetError>,
    ) -> Result<Self, AssetError> {
        let paddle = paddle?;
        let ball = ball?;
        let text = match font {
            Ok(font) => Some(Box::new(FontRasterizer::new(
                font,
                config.font_size,
                config.text_color,
            )) as Box<dyn Rasterize>),
            Err(e) => {
                log::warn!("Status text disabled ({})", e);
                None
            }
        };

        log::info!(
            "Loaded paddle {}x{}, ball {}x{}",
            paddle.image.width(),
            paddle.image.height(),
            ball.image.width(),
            ball.image.height()
        );

        Ok(Self { paddle, ball, text })
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(config: &DemoConfig) -> Result<Self, AssetError> {
        Self::assemble(
            config,
            load_sprite(&config.paddle_image),
            load_sprite(&config.ball_image),
            load_font(&config.font_path),
        )
    }

    #[cfg(target_arch = "wasm32")]
    pub async fn fetch(config: &DemoConfig) -> Result<Self, AssetError> {
        let paddle = fetch_sprite(&config.paddle_image).await;
        let ball = fetch_sprite(&config.ball_image).await;
        let font = fetch_font(&config.font_path).await;
        Self::assemble(config, paddle, ball, font)
    }
}
