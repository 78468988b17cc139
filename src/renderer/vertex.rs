//! Vertex types for textured quads

use bytemuck::{Pod, Zeroable};

use crate::sim::Rect;

/// 2D vertex with clip-space position and texture coordinate
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub uv: [f32; 2],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, u: f32, v: f32) -> Self {
        Self {
            position: [x, y],
            uv: [u, v],
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }
}

/// Convert viewport pixels (origin top-left, y down) to NDC
#[inline]
pub fn pixel_to_ndc(x: f32, y: f32, viewport: (u32, u32)) -> (f32, f32) {
    let (w, h) = viewport;
    (x / w as f32 * 2.0 - 1.0, 1.0 - y / h as f32 * 2.0)
}

/// Two triangles covering `dest`, sampling the whole texture
pub fn quad(dest: Rect, viewport: (u32, u32)) -> [Vertex; 6] {
    let (x0, y0) = pixel_to_ndc(dest.x as f32, dest.y as f32, viewport);
    let (x1, y1) = pixel_to_ndc(dest.right() as f32, dest.bottom() as f32, viewport);

    let top_left = Vertex::new(x0, y0, 0.0, 0.0);
    let top_right = Vertex::new(x1, y0, 1.0, 0.0);
    let bottom_left = Vertex::new(x0, y1, 0.0, 1.0);
    let bottom_right = Vertex::new(x1, y1, 1.0, 1.0);

    [
        top_left,
        bottom_left,
        top_right,
        top_right,
        bottom_left,
        bottom_right,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_to_ndc_corners() {
        let vp = (1024, 600);
        assert_eq!(pixel_to_ndc(0.0, 0.0, vp), (-1.0, 1.0));
        assert_eq!(pixel_to_ndc(1024.0, 600.0, vp), (1.0, -1.0));
        assert_eq!(pixel_to_ndc(512.0, 300.0, vp), (0.0, 0.0));
    }

    #[test]
    fn test_quad_covers_rect() {
        let q = quad(Rect::new(0, 0, 512, 300), (1024, 600));
        assert_eq!(q[0], Vertex::new(-1.0, 1.0, 0.0, 0.0));
        assert_eq!(q[5], Vertex::new(0.0, 0.0, 1.0, 1.0));
        // Both triangles share the top-right/bottom-left diagonal
        assert_eq!(q[1], q[4]);
        assert_eq!(q[2], q[3]);
    }
}
