//! CPU framebuffer canvas
//!
//! Used by the native runners and the tests. Copies are nearest-neighbour
//! scaled, clipped to the viewport and alpha blended (source over).

use std::convert::Infallible;

use image::{Rgba, RgbaImage};

use super::{Canvas, Color, WHITE};
use crate::sim::Rect;

pub struct SoftwareCanvas {
    back: RgbaImage,
    front: RgbaImage,
    draw_color: Color,
    presented: u64,
}

impl SoftwareCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            back: RgbaImage::new(width, height),
            front: RgbaImage::new(width, height),
            draw_color: WHITE,
            presented: 0,
        }
    }

    pub fn size(&self) -> (u32, u32) {
        self.back.dimensions()
    }

    /// Last presented frame
    pub fn frame(&self) -> &RgbaImage {
        &self.front
    }

    /// Number of `present` calls so far
    pub fn presented(&self) -> u64 {
        self.presented
    }

    /// Write the last presented frame as a PNG
    pub fn save_png(&self, path: &std::path::Path) -> image::ImageResult<()> {
        self.front.save_with_format(path, image::ImageFormat::Png)
    }
}

/// Blend `src` over `dst` with straight alpha
#[inline]
fn blend(dst: Rgba<u8>, src: Rgba<u8>) -> Rgba<u8> {
    let a = src[3] as u32;
    if a == 255 {
        return src;
    }
    if a == 0 {
        return dst;
    }
    let inv = 255 - a;
    let mix = |s: u8, d: u8| ((s as u32 * a + d as u32 * inv + 127) / 255) as u8;
    let out_a = a + (dst[3] as u32 * inv + 127) / 255;
    Rgba([
        mix(src[0], dst[0]),
        mix(src[1], dst[1]),
        mix(src[2], dst[2]),
        out_a.min(255) as u8,
    ])
}

impl Canvas for SoftwareCanvas {
    type Texture = RgbaImage;
    type Error = Infallible;

    fn create_texture(&mut self, image: &RgbaImage) -> Result<RgbaImage, Infallible> {
        Ok(image.clone())
    }

    fn set_draw_color(&mut self, color: Color) {
        self.draw_color = color;
    }

    fn clear(&mut self) {
        let color = Rgba(self.draw_color);
        for pixel in self.back.pixels_mut() {
            *pixel = color;
        }
    }

    fn copy(&mut self, texture: &RgbaImage, dest: Rect) {
        let (tw, th) = texture.dimensions();
        if dest.is_empty() || tw == 0 || th == 0 {
            return;
        }

        let (bw, bh) = self.back.dimensions();
        let x0 = dest.x.max(0);
        let y0 = dest.y.max(0);
        let x1 = dest.right().min(bw as i32);
        let y1 = dest.bottom().min(bh as i32);

        for y in y0..y1 {
            let v = ((y - dest.y) as i64 * th as i64 / dest.h as i64) as u32;
            for x in x0..x1 {
                let u = ((x - dest.x) as i64 * tw as i64 / dest.w as i64) as u32;
                let src = *texture.get_pixel(u, v);
                let dst = self.back.get_pixel_mut(x as u32, y as u32);
                *dst = blend(*dst, src);
            }
        }
    }

    fn present(&mut self) -> Result<(), Infallible> {
        self.front.clone_from(&self.back);
        self.presented += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::BLACK;

    fn solid(w: u32, h: u32, color: Color) -> RgbaImage {
        RgbaImage::from_pixel(w, h, Rgba(color))
    }

    #[test]
    fn test_clear_uses_draw_color() {
        let mut canvas = SoftwareCanvas::new(4, 3);
        canvas.set_draw_color(WHITE);
        canvas.clear();
        canvas.present().unwrap();
        assert!(canvas.frame().pixels().all(|p| p.0 == WHITE));
        assert_eq!(canvas.presented(), 1);
    }

    #[test]
    fn test_nothing_visible_until_present() {
        let mut canvas = SoftwareCanvas::new(4, 4);
        canvas.clear();
        let tex = canvas.create_texture(&solid(2, 2, BLACK)).unwrap();
        canvas.copy(&tex, Rect::new(0, 0, 2, 2));
        assert_eq!(canvas.frame().get_pixel(0, 0).0, [0, 0, 0, 0]);

        canvas.present().unwrap();
        assert_eq!(canvas.frame().get_pixel(0, 0).0, BLACK);
    }

    #[test]
    fn test_copy_is_clipped() {
        let mut canvas = SoftwareCanvas::new(8, 8);
        canvas.clear();
        let tex = canvas.create_texture(&solid(4, 4, BLACK)).unwrap();
        canvas.copy(&tex, Rect::new(-2, 6, 4, 4));
        canvas.present().unwrap();

        let frame = canvas.frame();
        assert_eq!(frame.get_pixel(0, 6).0, BLACK);
        assert_eq!(frame.get_pixel(1, 7).0, BLACK);
        assert_eq!(frame.get_pixel(2, 6).0, WHITE);
        assert_eq!(frame.get_pixel(0, 5).0, WHITE);
    }

    #[test]
    fn test_copy_fully_offscreen_is_noop() {
        let mut canvas = SoftwareCanvas::new(8, 8);
        canvas.clear();
        let tex = canvas.create_texture(&solid(4, 4, BLACK)).unwrap();
        canvas.copy(&tex, Rect::new(100, -50, 4, 4));
        canvas.copy(&tex, Rect::new(-10, -10, 4, 4));
        canvas.present().unwrap();
        assert!(canvas.frame().pixels().all(|p| p.0 == WHITE));
    }

    #[test]
    fn test_copy_scales_nearest() {
        let mut canvas = SoftwareCanvas::new(4, 2);
        canvas.clear();
        let mut tex = solid(2, 1, BLACK);
        tex.put_pixel(1, 0, Rgba([255, 0, 0, 255]));
        let tex = canvas.create_texture(&tex).unwrap();
        canvas.copy(&tex, Rect::new(0, 0, 4, 2));
        canvas.present().unwrap();

        let frame = canvas.frame();
        assert_eq!(frame.get_pixel(0, 1).0, BLACK);
        assert_eq!(frame.get_pixel(1, 0).0, BLACK);
        assert_eq!(frame.get_pixel(2, 0).0, [255, 0, 0, 255]);
        assert_eq!(frame.get_pixel(3, 1).0, [255, 0, 0, 255]);
    }

    #[test]
    fn test_alpha_blending() {
        assert_eq!(blend(Rgba(WHITE), Rgba([0, 0, 0, 0])).0, WHITE);
        assert_eq!(blend(Rgba(WHITE), Rgba(BLACK)).0, BLACK);
        let half = blend(Rgba(WHITE), Rgba([0, 0, 0, 128])).0;
        assert_eq!(half, [127, 127, 127, 255]);
    }

    #[test]
    fn test_save_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");
        let mut canvas = SoftwareCanvas::new(3, 2);
        canvas.clear();
        canvas.present().unwrap();
        canvas.save_png(&path).unwrap();

        let loaded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(loaded.dimensions(), (3, 2));
        assert_eq!(loaded.get_pixel(2, 1).0, WHITE);
    }
}
