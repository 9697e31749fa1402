//! Low-level rendering primitives.
//!
//! Provides the [`Renderer`] struct which owns the color buffer and implements
//! basic drawing operations like lines, rectangles, and wireframes.

use super::framebuffer::{FrameBuffer, DEPTH_CLEAR};
use super::rasterizer::Triangle;
use crate::colors;

pub struct Renderer {
    color_buffer: Vec<u32>,
    depth_buffer: Vec<f32>,
    width: u32,
    height: u32,
}

impl Renderer {
    pub fn new(width: u32, height: u32) -> Self {
        let size = (width * height) as usize;
        Self {
            color_buffer: vec![colors::BACKGROUND.to_argb(); size],
            depth_buffer: vec![DEPTH_CLEAR; size],
            width,
            height,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        let size = (width * height) as usize;
        self.color_buffer = vec![colors::BACKGROUND.to_argb(); size];
        self.depth_buffer = vec![DEPTH_CLEAR; size];
        self.width = width;
        self.height = height;
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn clear(&mut self, color: u32) {
        self.color_buffer.fill(color);
    }

    #[inline]
    pub fn clear_depth(&mut self) {
        self.depth_buffer.fill(DEPTH_CLEAR);
    }

    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            let index = (y as u32 * self.width + x as u32) as usize;
            self.color_buffer[index] = color;
        }
    }

    /// Set a pixel at (x, y) with depth testing (strictly-less-wins, see
    /// [`FrameBuffer`]). Silently ignores out-of-bounds coordinates.
    #[inline]
    pub fn set_pixel_with_depth(&mut self, x: i32, y: i32, depth: f32, color: u32) {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            let idx = (y as u32 * self.width + x as u32) as usize;
            if depth < self.depth_buffer[idx] {
                self.depth_buffer[idx] = depth;
                self.color_buffer[idx] = color;
            }
        }
    }

    pub fn draw_grid(&mut self, spacing: i32, color: u32) {
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                if x % spacing == 0 || y % spacing == 0 {
                    self.set_pixel(x, y, color);
                }
            }
        }
    }

    #[inline]
    pub fn draw_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: u32) {
        for dy in 0..height {
            for dx in 0..width {
                self.set_pixel(x + dx, y + dy, color);
            }
        }
    }

    pub fn draw_triangle_wireframe(&mut self, triangle: &Triangle, color: u32) {
        let [p0, p1, p2] = triangle.points();

        self.draw_line_bresenham(p0.0 as i32, p0.1 as i32, p0.2, p1.0 as i32, p1.1 as i32, p1.2, color);
        self.draw_line_bresenham(p1.0 as i32, p1.1 as i32, p1.2, p2.0 as i32, p2.1 as i32, p2.2, color);
        self.draw_line_bresenham(p2.0 as i32, p2.1 as i32, p2.2, p0.0 as i32, p0.1 as i32, p0.2, color);
    }

    /// Draws a line between two points using Bresenham's line algorithm with depth testing.
    ///
    /// Bresenham's algorithm efficiently determines which pixels to illuminate
    /// by using only integer arithmetic. It works by tracking an "error" term
    /// that represents the distance between the ideal line and the current pixel.
    ///
    /// Depth is linearly interpolated along the line (NDC `z` is affine in
    /// screen space) and biased slightly toward the camera so wireframes
    /// render in front of coincident filled triangles.
    #[inline]
    pub fn draw_line_bresenham(
        &mut self,
        x0: i32,
        y0: i32,
        z0: f32,
        x1: i32,
        y1: i32,
        z1: f32,
        color: u32,
    ) {
        let dx = (x1 - x0).abs();
        let dy = (y1 - y0).abs();

        // Depth bias so wireframes render slightly in front of filled
        // triangles. Smaller z wins, so we subtract.
        const WIREFRAME_DEPTH_BIAS: f32 = 0.0001;

        let steps = dx.max(dy);
        if steps == 0 {
            let depth = (z0 - WIREFRAME_DEPTH_BIAS).max(0.0);
            self.set_pixel_with_depth(x0, y0, depth, color);
            return;
        }

        let x_incr_direction = if x0 < x1 { 1 } else { -1 };
        let y_incr_direction = if y0 < y1 { 1 } else { -1 };

        let mut err = dx - dy;

        let mut x = x0;
        let mut y = y0;
        let mut step = 0;

        loop {
            let t = step as f32 / steps as f32;
            let depth = (z0 + t * (z1 - z0) - WIREFRAME_DEPTH_BIAS).max(0.0);

            self.set_pixel_with_depth(x, y, depth, color);

            if x == x1 && y == y1 {
                break;
            }

            step += 1;

            let e2 = 2 * err;

            if e2 > -dy {
                err -= dy;
                x += x_incr_direction;
            }

            if e2 < dx {
                err += dx;
                y += y_incr_direction;
            }
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        unsafe {
            std::slice::from_raw_parts(
                self.color_buffer.as_ptr() as *const u8,
                self.color_buffer.len() * 4,
            )
        }
    }

    /// Get a mutable FrameBuffer view into the color and depth buffers.
    pub fn as_framebuffer(&mut self) -> FrameBuffer<'_> {
        FrameBuffer::new(
            &mut self.color_buffer,
            &mut self.depth_buffer,
            self.width,
            self.height,
        )
    }
}
