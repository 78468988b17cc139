//! Blit Pong - two small browser demos on WebGPU
//!
//! Core modules:
//! - `sim`: Frame state, input accumulation, collision and integration
//! - `renderer`: The 2D canvas boundary with WebGPU and software backends
//! - `assets`: Image/font decoding and asset errors
//! - `config`: Demo configuration
//! - `app`: Pong frame driver and frame pacing
//! - `viewer`: The single-shot image viewer
//! - `platform`: Browser/native platform glue

pub mod app;
pub mod assets;
pub mod config;
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod viewer;

pub use app::{FramePacer, PongApp};
pub use config::DemoConfig;

/// Demo configuration constants
pub mod consts {
    /// Logical viewport size
    pub const VIEW_WIDTH: u32 = 1024;
    pub const VIEW_HEIGHT: u32 = 600;

    /// Target frame rate of the host scheduler
    pub const FPS: u32 = 60;

    /// Horizontal paddle speed while an arrow key is held (pixels/frame)
    pub const PADDLE_SPEED: i32 = 5;
    /// Initial ball velocity (pixels/frame)
    pub const BALL_START_VELOCITY: [i32; 2] = [5, 5];

    /// Status text size in pixels
    pub const FONT_SIZE: f32 = 30.0;

    pub const PADDLE_IMAGE: &str = "assets/images/paddle.png";
    pub const BALL_IMAGE: &str = "assets/images/ball.png";
    pub const FONT_PATH: &str = "assets/fonts/FreeSans.ttf";

    /// Where the image viewer blits its picture: x, y, w, h
    pub const VIEWER_DEST: [i32; 4] = [0, 0, 320, 80];

    /// Id of the canvas element both demos render into
    pub const CANVAS_ID: &str = "canvas";
}
