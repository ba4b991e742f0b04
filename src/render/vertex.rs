//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }
}

/// Raw bytes of a vertex list, ready for upload to a vertex buffer
pub fn as_bytes(vertices: &[Vertex]) -> &[u8] {
    bytemuck::cast_slice(vertices)
}

/// Colors for scene elements
pub mod colors {
    /// Sand, drawn translucent every frame so old frames fade out
    pub const BACKGROUND: [f32; 4] = [228.0 / 255.0, 193.0 / 255.0, 92.0 / 255.0, 0.2];
    /// Volleyball trail gray (200, 200, 200)
    pub const TRAIL: [f32; 3] = [200.0 / 255.0, 200.0 / 255.0, 200.0 / 255.0];
    /// #333 outlines and seams
    pub const SEAM: [f32; 4] = [0.2, 0.2, 0.2, 1.0];
    pub const BALL: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
}

/// Opaque RGBA from an RGB triple
#[inline]
pub fn opaque(rgb: [f32; 3]) -> [f32; 4] {
    [rgb[0], rgb[1], rgb[2], 1.0]
}

/// RGBA from an RGB triple and alpha
#[inline]
pub fn with_alpha(rgb: [f32; 3], alpha: f32) -> [f32; 4] {
    [rgb[0], rgb[1], rgb[2], alpha]
}
