//! Status text label
//!
//! Text is rasterized with fontdue into an RGBA image and uploaded as a
//! texture. The texture is rebuilt only when the text changes.

use fontdue::Font;
use fontdue::layout::{CoordinateSystem, Layout, LayoutSettings, TextStyle};
use image::{Rgba, RgbaImage};

use super::{Canvas, Color};
use crate::sim::Rect;

/// Right edge of the inked glyphs, given each glyph's `(x, width)`.
/// Glyphs with no coverage (spaces) do not count.
fn ink_width(glyphs: impl IntoIterator<Item = (f32, usize)>) -> f32 {
    glyphs
        .into_iter()
        .filter(|&(_, width)| width > 0)
        .map(|(x, width)| (x + width as f32).ceil())
        .fold(0.0f32, f32::max)
}

/// Rasterize a single line of text. Returns `None` when no glyph leaves ink,
/// which includes empty and whitespace-only text.
pub fn rasterize_text(font: &Font, text: &str, px: f32, color: Color) -> Option<RgbaImage> {
    let mut layout: Layout<()> = Layout::new(CoordinateSystem::PositiveYDown);
    layout.reset(&LayoutSettings::default());
    layout.append(&[font], &TextStyle::new(text, px, 0));

    let glyphs = layout.glyphs();
    let width = ink_width(glyphs.iter().map(|g| (g.x, g.width)));
    if width <= 0.0 {
        return None;
    }
    let height = layout.height().ceil().max(1.0);

    let clear = Rgba([color[0], color[1], color[2], 0]);
    let mut image = RgbaImage::from_pixel(width as u32, height as u32, clear);
    for glyph in glyphs {
        if !glyph.char_data.rasterize() || glyph.width == 0 || glyph.height == 0 {
            continue;
        }
        let (metrics, coverage) = font.rasterize_config(glyph.key);
        let gx = glyph.x.round() as i64;
        let gy = glyph.y.round() as i64;

        for row in 0..metrics.height {
            for col in 0..metrics.width {
                let alpha = coverage[row * metrics.width + col];
                if alpha == 0 {
                    continue;
                }
                let x = gx + col as i64;
                let y = gy + row as i64;
                if x < 0 || y < 0 || x >= image.width() as i64 || y >= image.height() as i64 {
                    continue;
                }
                let pixel = image.get_pixel_mut(x as u32, y as u32);
                let a = ((alpha as u32 * color[3] as u32) / 255) as u8;
                // Overlapping glyph edges keep the stronger coverage
                pixel[3] = pixel[3].max(a);
            }
        }
    }

    Some(image)
}

/// Turns a string into a coloured, transparent-background image
pub trait Rasterize {
    fn rasterize(&self, text: &str) -> Option<RgbaImage>;
}

/// fontdue-backed rasterizer at a fixed size and colour
pub struct FontRasterizer {
    font: Font,
    px: f32,
    color: Color,
}

impl FontRasterizer {
    pub fn new(font: Font, px: f32, color: Color) -> Self {
        Self { font, px, color }
    }
}

impl Rasterize for FontRasterizer {
    fn rasterize(&self, text: &str) -> Option<RgbaImage> {
        rasterize_text(&self.font, text, self.px, self.color)
    }
}

/// A line of text drawn at a fixed origin
pub struct StatusLabel<T> {
    raster: Box<dyn Rasterize>,
    origin: (i32, i32),
    text: String,
    texture: Option<(T, Rect)>,
    rasterized: u64,
}

impl<T> StatusLabel<T> {
    pub fn new(raster: Box<dyn Rasterize>) -> Self {
        Self {
            raster,
            origin: (0, 0),
            text: String::new(),
            texture: None,
            rasterized: 0,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Destination of the current texture, if any
    pub fn dest(&self) -> Option<Rect> {
        self.texture.as_ref().map(|(_, dest)| *dest)
    }

    /// How many times the text has been rasterized
    pub fn rasterized(&self) -> u64 {
        self.rasterized
    }

    /// Replace the label text. Returns whether a new texture was built.
    pub fn set_text<C>(&mut self, canvas: &mut C, text: &str) -> Result<bool, C::Error>
    where
        C: Canvas<Texture = T>,
    {
        if text == self.text {
            return Ok(false);
        }

        self.text.clear();
        self.text.push_str(text);
        self.rasterized += 1;

        // The old texture is dropped here, before the new one is created
        self.texture = None;
        if let Some(image) = self.raster.rasterize(text) {
            let (w, h) = image.dimensions();
            let dest = Rect::new(self.origin.0, self.origin.1, w as i32, h as i32);
            self.texture = Some((canvas.create_texture(&image)?, dest));
        }
        Ok(true)
    }

    pub fn draw<C>(&self, canvas: &mut C)
    where
        C: Canvas<Texture = T>,
    {
        if let Some((texture, dest)) = &self.texture {
            canvas.copy(texture, *dest);
        }
    }
}
