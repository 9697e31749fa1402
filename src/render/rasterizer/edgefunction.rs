//! Edge function-based triangle rasterization.
//!
//! This module implements triangle rasterization using the edge function
//! algorithm, which is the foundation of modern GPU rasterization. The
//! algorithm tests each pixel against three edge equations to determine
//! triangle coverage, applying the top-left fill rule so shared edges
//! between adjacent triangles are rasterized exactly once.
//!
//! # Edge Function
//!
//! For an edge from point A to point B, the edge function at point P is:
//!
//! ```text
//! E(P) = (P.x - A.x) * (B.y - A.y) - (P.y - A.y) * (B.x - A.x)
//! ```
//!
//! This is the 2D cross product `(B - A) × (P - A)`.
//!
//! # Barycentric Coordinates
//!
//! The edge function values are proportional to barycentric coordinates:
//!
//! ```text
//! lambda_i = E_i(P) / (E_0 + E_1 + E_2)
//! ```
//!
//! # Perspective-Correct Interpolation
//!
//! UV and color are premultiplied by `inv_w` (`1/w`) at the vertices, summed
//! with the plain barycentric weights, then divided by the interpolated
//! `inv_w` to undo the premultiplication. Depth (`z`) is already a
//! post-divide NDC value affine in screen space, so it is interpolated with
//! the plain barycentric weights directly — correcting it again with `inv_w`
//! would double-correct.
//!
//! # References
//!
//! - Juan Pineda, "A Parallel Algorithm for Polygon Rasterization" (1988)
//! - Scratchapixel: <https://www.scratchapixel.com/lessons/3d-basic-rendering/rasterization-practical-implementation>

use super::{Fill, Rasterizer, ScreenVertex, Triangle};
use crate::colors::Color;
use crate::render::framebuffer::FrameBuffer;
use crate::texture::Texture;

/// Triangle rasterizer using the edge function algorithm.
pub struct EdgeFunctionRasterizer;

impl EdgeFunctionRasterizer {
    pub fn new() -> Self {
        EdgeFunctionRasterizer {}
    }

    #[inline]
    fn edge_function(ax: f32, ay: f32, bx: f32, by: f32, px: f32, py: f32) -> f32 {
        (px - ax) * (by - ay) - (py - ay) * (bx - ax)
    }

    /// Top-left fill rule: a pixel exactly on a shared edge is only kept by
    /// the triangle for which that edge is a top edge (horizontal, going
    /// right, i.e. `dy == 0 && dx > 0`) or a left edge (going downward, i.e.
    /// `dy < 0`). Non-top-left edges require strictly positive coverage.
    #[inline]
    fn top_left_bias(dx: f32, dy: f32) -> f32 {
        let is_top_left = (dy == 0.0 && dx > 0.0) || dy < 0.0;
        if is_top_left {
            0.0
        } else {
            -f32::EPSILON
        }
    }
}

impl Default for EdgeFunctionRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Rasterizer for EdgeFunctionRasterizer {
    fn fill_triangle(&self, triangle: &Triangle, buffer: &mut FrameBuffer, texture: Option<&Texture>) {
        let [v0, v1, v2]: [ScreenVertex; 3] = triangle.vertices;

        let min_x = v0.x.min(v1.x).min(v2.x).floor() as i32;
        let max_x = v0.x.max(v1.x).max(v2.x).ceil() as i32;
        let min_y = v0.y.min(v1.y).min(v2.y).floor() as i32;
        let max_y = v0.y.max(v1.y).max(v2.y).ceil() as i32;

        let min_x = min_x.max(0);
        let max_x = max_x.min(buffer.width() as i32 - 1);
        let min_y = min_y.max(0);
        let max_y = max_y.min(buffer.height() as i32 - 1);

        let area = Self::edge_function(v0.x, v0.y, v1.x, v1.y, v2.x, v2.y);
        if area.abs() < f32::EPSILON {
            return;
        }
        let inv_area = 1.0 / area;

        // Edge biases, computed once per triangle so the top-left rule
        // doesn't depend on pixel position.
        let bias0 = Self::top_left_bias(v2.x - v1.x, v2.y - v1.y);
        let bias1 = Self::top_left_bias(v0.x - v2.x, v0.y - v2.y);
        let bias2 = Self::top_left_bias(v1.x - v0.x, v1.y - v0.y);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;

                let mut w0 = Self::edge_function(v1.x, v1.y, v2.x, v2.y, px, py);
                let mut w1 = Self::edge_function(v2.x, v2.y, v0.x, v0.y, px, py);
                let mut w2 = Self::edge_function(v0.x, v0.y, v1.x, v1.y, px, py);

                // Normalize bias sign to the triangle's winding before
                // applying, so both CW and CCW triangles use the same test.
                let sign = area.signum();
                w0 += bias0 * sign;
                w1 += bias1 * sign;
                w2 += bias2 * sign;

                let inside = if area > 0.0 {
                    w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0
                } else {
                    w0 <= 0.0 && w1 <= 0.0 && w2 <= 0.0
                };

                if !inside {
                    continue;
                }

                let lambda = [w0 * inv_area, w1 * inv_area, w2 * inv_area];

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

                let color = match (triangle.fill, texture) {
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
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::TexCoord;

    fn vert(x: f32, y: f32, z: f32) -> ScreenVertex {
        ScreenVertex::new(x, y, z, 1.0, TexCoord::ZERO, Color::rgb(255, 255, 255))
    }

    #[test]
    fn fills_simple_triangle() {
        let mut color = vec![0u32; 100 * 100];
        let mut depth = vec![crate::render::framebuffer::DEPTH_CLEAR; 100 * 100];
        let mut fb = FrameBuffer::new(&mut color, &mut depth, 100, 100);

        let tri = Triangle::new(
            [vert(10.0, 10.0, 0.5), vert(90.0, 10.0, 0.5), vert(50.0, 90.0, 0.5)],
            Fill::Solid,
        );

        EdgeFunctionRasterizer::new().fill_triangle(&tri, &mut fb, None);

        assert_eq!(fb.get_pixel(50, 50), Some(0xFFFFFFFF));
        assert_eq!(fb.get_pixel(0, 0), Some(0));
    }

    #[test]
    fn degenerate_triangle_draws_nothing() {
        let mut color = vec![0u32; 16];
        let mut depth = vec![crate::render::framebuffer::DEPTH_CLEAR; 16];
        let mut fb = FrameBuffer::new(&mut color, &mut depth, 4, 4);

        let tri = Triangle::new(
            [vert(1.0, 1.0, 0.5), vert(2.0, 2.0, 0.5), vert(3.0, 3.0, 0.5)],
            Fill::Solid,
        );

        EdgeFunctionRasterizer::new().fill_triangle(&tri, &mut fb, None);
        assert!(color.iter().all(|&c| c == 0));
    }
}
