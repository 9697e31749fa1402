//! Scanline-based triangle rasterization.
//!
//! This module implements triangle rasterization using the classic scanline
//! algorithm with flat-top/flat-bottom triangle decomposition. Kept as a
//! fallback and benchmark comparison to the edge-function rasterizer.
//!
//! # Triangle Decomposition
//!
//! Any triangle can be decomposed into at most two simpler triangles:
//!
//! ```text
//!        v0                   v0
//!        /\                   /\
//!       /  \                 /  \
//!      /    \       =>      /----\<- split at v1.y
//!     /      \             v1   split
//!    /________\             \    /
//!   v1        v2             \  /
//!                             \/
//!                             v2
//! ```
//!
//! # Inverse Slope Method
//!
//! For each scanline, the X position along the left and right edges is
//! tracked via `inv_slope = dx / dy`, so `x = x_start + inv_slope * (y - y_start)`.
//!
//! This rasterizer does not implement the top-left rule; shared edges
//! between adjacent triangles may be double-covered or gapped by up to one
//! pixel. That tradeoff is acceptable for a fallback path.

use super::{Fill, Rasterizer, ScreenVertex, Triangle};
use crate::colors::Color;
use crate::math::vec2::Vec2;
use crate::render::framebuffer::FrameBuffer;
use crate::texture::Texture;

#[inline]
fn edge_function(a: Vec2, b: Vec2, p: Vec2) -> f32 {
    (p.x - a.x) * (b.y - a.y) - (p.y - a.y) * (b.x - a.x)
}

#[inline]
fn triangle_area(a: Vec2, b: Vec2, c: Vec2) -> f32 {
    edge_function(a, b, c)
}

/// Compute barycentric coordinates for point p in triangle (v0, v1, v2).
#[inline]
fn barycentric(v0: Vec2, v1: Vec2, v2: Vec2, p: Vec2, inv_area: f32) -> [f32; 3] {
    let w0 = edge_function(v1, v2, p);
    let w1 = edge_function(v2, v0, p);
    let w2 = edge_function(v0, v1, p);
    [w0 * inv_area, w1 * inv_area, w2 * inv_area]
}

/// Scanline-based triangle rasterizer.
pub struct ScanlineRasterizer;

impl ScanlineRasterizer {
    pub fn new() -> Self {
        Self
    }

    /// Sorts three vertices by Y coordinate (ascending: top to bottom in screen space).
    fn sort_vertices(v0: &mut ScreenVertex, v1: &mut ScreenVertex, v2: &mut ScreenVertex) {
        if v1.y < v0.y {
            std::mem::swap(v0, v1);
        }
        if v2.y < v1.y {
            std::mem::swap(v1, v2);
        }
        if v1.y < v0.y {
            std::mem::swap(v0, v1);
        }
    }

    fn rasterize(
        v0: ScreenVertex,
        v1: ScreenVertex,
        v2: ScreenVertex,
        buffer: &mut FrameBuffer,
        fill: Fill,
        texture: Option<&Texture>,
    ) {
        let v0_2d = Vec2::new(v0.x, v0.y);
        let v1_2d = Vec2::new(v1.x, v1.y);
        let v2_2d = Vec2::new(v2.x, v2.y);

        let area = triangle_area(v0_2d, v1_2d, v2_2d);
        if area.abs() < f32::EPSILON {
            return;
        }
        let inv_area = 1.0 / area;

        let mut sv0 = v0;
        let mut sv1 = v1;
        let mut sv2 = v2;
        Self::sort_vertices(&mut sv0, &mut sv1, &mut sv2);

        if (sv1.y - sv2.y).abs() < f32::EPSILON {
            Self::fill_flat_bottom(sv0, sv1, sv2, v0_2d, v1_2d, v2_2d, v0, v1, v2, inv_area, buffer, fill, texture);
        } else if (sv0.y - sv1.y).abs() < f32::EPSILON {
            Self::fill_flat_top(sv0, sv1, sv2, v0_2d, v1_2d, v2_2d, v0, v1, v2, inv_area, buffer, fill, texture);
        } else {
            let t = (sv1.y - sv0.y) / (sv2.y - sv0.y);
            let split_x = sv0.x + (sv2.x - sv0.x) * t;
            let split_z = sv0.z + (sv2.z - sv0.z) * t;
            let split = ScreenVertex::new(split_x, sv1.y, split_z, 1.0, sv0.uv, sv0.color);

            Self::fill_flat_bottom(sv0, split, sv1, v0_2d, v1_2d, v2_2d, v0, v1, v2, inv_area, buffer, fill, texture);
            Self::fill_flat_top(sv1, split, sv2, v0_2d, v1_2d, v2_2d, v0, v1, v2, inv_area, buffer, fill, texture);
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn shade_and_set(
        x: i32,
        y: i32,
        v0: ScreenVertex,
        v1: ScreenVertex,
        v2: ScreenVertex,
        v0_2d: Vec2,
        v1_2d: Vec2,
        v2_2d: Vec2,
        inv_area: f32,
        buffer: &mut FrameBuffer,
        fill: Fill,
        texture: Option<&Texture>,
    ) {
        let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
        let lambda = barycentric(v0_2d, v1_2d, v2_2d, p, inv_area);

        let z = lambda[0] * v0.z + lambda[1] * v1.z + lambda[2] * v2.z;

        let inv_w = lambda[0] * v0.inv_w + lambda[1] * v1.inv_w + lambda[2] * v2.inv_w;
        let w = 1.0 / inv_w;

        let u = (lambda[0] * v0.uv.u * v0.inv_w
            + lambda[1] * v1.uv.u * v1.inv_w
            + lambda[2] * v2.uv.u * v2.inv_w)
            * w;
        let v = (lambda[0] * v0.uv.v * v0.inv_w
            + lambda[1] * v1.uv.v * v1.inv_w
            + lambda[2] * v2.uv.v * v2.inv_w)
            * w;

        let color = match (fill, texture) {
            (Fill::Textured, Some(tex)) => {
                let texel = Color::from_argb(tex.sample(u, v));
                let r = (lambda[0] * v0.color.r() as f32 * v0.inv_w
                    + lambda[1] * v1.color.r() as f32 * v1.inv_w
                    + lambda[2] * v2.color.r() as f32 * v2.inv_w)
                    * w
                    / 255.0;
                let g = (lambda[0] * v0.color.g() as f32 * v0.inv_w
                    + lambda[1] * v1.color.g() as f32 * v1.inv_w
                    + lambda[2] * v2.color.g() as f32 * v2.inv_w)
                    * w
                    / 255.0;
                let b = (lambda[0] * v0.color.b() as f32 * v0.inv_w
                    + lambda[1] * v1.color.b() as f32 * v1.inv_w
                    + lambda[2] * v2.color.b() as f32 * v2.inv_w)
                    * w
                    / 255.0;
                Color::argb(
                    255,
                    (texel.r() as f32 * r).round().clamp(0.0, 255.0) as u8,
                    (texel.g() as f32 * g).round().clamp(0.0, 255.0) as u8,
                    (texel.b() as f32 * b).round().clamp(0.0, 255.0) as u8,
                )
            }
            _ => {
                let r = (lambda[0] * v0.color.r() as f32 * v0.inv_w
                    + lambda[1] * v1.color.r() as f32 * v1.inv_w
                    + lambda[2] * v2.color.r() as f32 * v2.inv_w)
                    * w;
                let g = (lambda[0] * v0.color.g() as f32 * v0.inv_w
                    + lambda[1] * v1.color.g() as f32 * v1.inv_w
                    + lambda[2] * v2.color.g() as f32 * v2.inv_w)
                    * w;
                let b = (lambda[0] * v0.color.b() as f32 * v0.inv_w
                    + lambda[1] * v1.color.b() as f32 * v1.inv_w
                    + lambda[2] * v2.color.b() as f32 * v2.inv_w)
                    * w;
                Color::argb(255, r.round() as u8, g.round() as u8, b.round() as u8)
            }
        };

        // Unconditional clamp rather than skip-if-beyond-epsilon: simpler,
        // and interpolated z only ever strays from [0,1] by float slop.
        buffer.set_pixel_with_depth(x, y, z.clamp(0.0, 1.0), color.to_argb());
    }

    #[allow(clippy::too_many_arguments)]
    fn fill_flat_bottom(
        sv0: ScreenVertex,
        sv1: ScreenVertex,
        sv2: ScreenVertex,
        v0_2d: Vec2,
        v1_2d: Vec2,
        v2_2d: Vec2,
        v0: ScreenVertex,
        v1: ScreenVertex,
        v2: ScreenVertex,
        inv_area: f32,
        buffer: &mut FrameBuffer,
        fill: Fill,
        texture: Option<&Texture>,
    ) {
        let height = sv1.y - sv0.y;
        if height.abs() < f32::EPSILON {
            return;
        }

        let inv_slope_1 = (sv1.x - sv0.x) / height;
        let inv_slope_2 = (sv2.x - sv0.x) / height;

        let y_start = sv0.y.ceil() as i32;
        let y_end = sv1.y.floor() as i32;

        for y in y_start..=y_end {
            let dy = y as f32 - sv0.y;
            let x1 = sv0.x + inv_slope_1 * dy;
            let x2 = sv0.x + inv_slope_2 * dy;

            let (x_left, x_right) = if x1 < x2 { (x1, x2) } else { (x2, x1) };
            let x_start = x_left.ceil() as i32;
            let x_end = x_right.floor() as i32;

            for x in x_start..=x_end {
                Self::shade_and_set(
                    x, y, v0, v1, v2, v0_2d, v1_2d, v2_2d, inv_area, buffer, fill, texture,
                );
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn fill_flat_top(
        sv0: ScreenVertex,
        sv1: ScreenVertex,
        sv2: ScreenVertex,
        v0_2d: Vec2,
        v1_2d: Vec2,
        v2_2d: Vec2,
        v0: ScreenVertex,
        v1: ScreenVertex,
        v2: ScreenVertex,
        inv_area: f32,
        buffer: &mut FrameBuffer,
        fill: Fill,
        texture: Option<&Texture>,
    ) {
        let height = sv2.y - sv0.y;
        if height.abs() < f32::EPSILON {
            return;
        }

        let inv_slope_1 = (sv2.x - sv0.x) / height;
        let inv_slope_2 = (sv2.x - sv1.x) / height;

        let y_start = sv0.y.ceil() as i32;
        let y_end = sv2.y.floor() as i32;

        for y in y_start..=y_end {
            let dy = y as f32 - sv0.y;
            let x1 = sv0.x + inv_slope_1 * dy;
            let x2 = sv1.x + inv_slope_2 * dy;

            let (x_left, x_right) = if x1 < x2 { (x1, x2) } else { (x2, x1) };
            let x_start = x_left.ceil() as i32;
            let x_end = x_right.floor() as i32;

            for x in x_start..=x_end {
                Self::shade_and_set(
                    x, y, v0, v1, v2, v0_2d, v1_2d, v2_2d, inv_area, buffer, fill, texture,
                );
            }
        }
    }
}

impl Default for ScanlineRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Rasterizer for ScanlineRasterizer {
    fn fill_triangle(&self, triangle: &Triangle, buffer: &mut FrameBuffer, texture: Option<&Texture>) {
        let [v0, v1, v2] = triangle.vertices;
        Self::rasterize(v0, v1, v2, buffer, triangle.fill, texture);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::TexCoord;
    use crate::render::framebuffer::DEPTH_CLEAR;

    fn vert(x: f32, y: f32, z: f32) -> ScreenVertex {
        ScreenVertex::new(x, y, z, 1.0, TexCoord::ZERO, Color::rgb(10, 20, 30))
    }

    #[test]
    fn fills_simple_triangle() {
        let mut color = vec![0u32; 100 * 100];
        let mut depth = vec![DEPTH_CLEAR; 100 * 100];
        let mut fb = FrameBuffer::new(&mut color, &mut depth, 100, 100);

        let tri = Triangle::new(
            [vert(10.0, 10.0, 0.5), vert(90.0, 10.0, 0.5), vert(50.0, 90.0, 0.5)],
            Fill::Solid,
        );

        ScanlineRasterizer::new().fill_triangle(&tri, &mut fb, None);
        assert_eq!(fb.get_pixel(50, 30), Some(Color::rgb(10, 20, 30).to_argb()));
    }
}
