//! Single-image viewer
//!
//! Clears to the background colour, blits one image into a fixed rectangle
//! and presents exactly once.

use crate::assets::Sprite;
use crate::renderer::{Canvas, Color};
use crate::sim::Rect;

/// Draw `sprite` stretched to `dest` and present the frame.
///
/// The texture is released after the present. Returns the source image
/// width.
pub fn show_image<C: Canvas>(
    canvas: &mut C,
    sprite: &Sprite,
    dest: Rect,
    background: Color,
) -> Result<u32, C::Error> {
    canvas.set_draw_color(background);
    canvas.clear();

    let texture = canvas.create_texture(&sprite.image)?;
    canvas.copy(&texture, dest);
    canvas.present()?;
    // Released only once the frame that samples it has been submitted
    drop(texture);

    log::info!("Showing {} at {:?}", sprite.path, dest);
    Ok(sprite.width())
}
