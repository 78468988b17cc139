//! 2D canvas rendering
//!
//! `Canvas` is the small blit API both demos draw through: clear, copy a
//! texture into a rectangle, present. `GpuCanvas` implements it on WebGPU for
//! the browser, `SoftwareCanvas` on a CPU framebuffer for native runs and
//! tests.

pub mod gpu;
pub mod software;
pub mod status;
pub mod vertex;

pub use gpu::{GpuCanvas, GpuTexture};
pub use software::SoftwareCanvas;
pub use status::{FontRasterizer, Rasterize, StatusLabel};

use image::RgbaImage;

use crate::sim::Rect;

/// 8-bit RGBA colour
pub type Color = [u8; 4];

pub const WHITE: Color = [255, 255, 255, 255];
pub const BLACK: Color = [0, 0, 0, 255];

/// Minimal 2D drawing surface
pub trait Canvas {
    /// Image uploaded for drawing; released when dropped
    type Texture;
    type Error: std::fmt::Display;

    fn create_texture(&mut self, image: &RgbaImage) -> Result<Self::Texture, Self::Error>;

    /// Colour used by the next `clear`
    fn set_draw_color(&mut self, color: Color);

    /// Fill the back buffer with the draw colour, discarding queued copies
    fn clear(&mut self);

    /// Draw `texture` stretched to `dest`
    fn copy(&mut self, texture: &Self::Texture, dest: Rect);

    /// Show the back buffer
    fn present(&mut self) -> Result<(), Self::Error>;
}
