//! View-space frustum clipping.
//!
//! Clipping happens in view space, before projection, against planes derived
//! from the camera's actual field of view and near/far distances — not a
//! post-projection homogeneous cube. This keeps every plane test a plain dot
//! product against a real `z` distance, with no fake-z-from-w substitution.

use crate::colors::Color;
use crate::mesh::TexCoord;
use crate::prelude::Vec3;

/// Upper bound on vertices a clipped polygon can carry. A triangle clipped
/// against 6 planes can gain at most one vertex per plane, so 3 + 6 = 9 is
/// the true worst case; 10 leaves one vertex of headroom.
pub(crate) const MAX_VERTICES_PER_POLYGON: usize = 10;

type Point = Vec3;
type Normal = Vec3;

pub type Plane = (Point, Normal);

/// A vertex with all attributes needed for clipping interpolation.
/// This is an intermediate representation used during the clipping process.
#[derive(Clone, Copy)]
pub(crate) struct ClipVertex {
    pub position: Vec3,
    pub texcoord: TexCoord,
    pub color: Color,
}

impl ClipVertex {
    pub fn new(position: Vec3, texcoord: TexCoord, color: Color) -> Self {
        Self {
            position,
            texcoord,
            color,
        }
    }

    /// Linearly interpolate between two vertices.
    /// Used when a polygon edge crosses a clipping plane.
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            position: self.position + (other.position - self.position) * t,
            texcoord: self.texcoord.lerp(other.texcoord, t),
            color: self.color.lerp(other.color, t),
        }
    }

    /// Returns the signed distance from this vertex to a plane.
    /// Positive = inside (same side as normal), Negative = outside.
    fn signed_distance(&self, plane: Plane) -> f32 {
        let (plane_point, plane_normal) = plane;
        (self.position - plane_point).dot(plane_normal)
    }
}

/// A polygon represented as a list of vertices.
/// Used as an intermediate representation during clipping.
/// After clipping against all frustum planes, this is triangulated back
/// into triangles for rasterization.
pub(crate) struct ClipPolygon {
    pub vertices: Vec<ClipVertex>,
}

impl ClipPolygon {
    /// Create a polygon from a triangle (3 vertices).
    pub fn from_triangle(v0: ClipVertex, v1: ClipVertex, v2: ClipVertex) -> Self {
        Self {
            vertices: vec![v0, v1, v2],
        }
    }

    /// Returns true if the polygon has been completely clipped away.
    pub fn is_empty(&self) -> bool {
        self.vertices.len() < 3
    }

    /// Clip this polygon against a single plane using the Sutherland-Hodgman algorithm.
    /// Returns a new polygon with the clipped vertices.
    pub fn clip_against_plane(&self, plane: Plane) -> Self {
        if self.vertices.is_empty() {
            return Self { vertices: vec![] };
        }

        let mut output = Vec::new();

        for i in 0..self.vertices.len() {
            let current = &self.vertices[i];
            let next = &self.vertices[(i + 1) % self.vertices.len()];

            let d1 = current.signed_distance(plane);
            let d2 = next.signed_distance(plane);

            let current_inside = d1 >= 0.0;
            let next_inside = d2 >= 0.0;

            if current_inside {
                // Current vertex is inside, add it
                output.push(*current);

                if !next_inside {
                    // Going from inside to outside, add intersection
                    let t = d1 / (d1 - d2);
                    output.push(current.lerp(next, t));
                }
            } else if next_inside {
                // Going from outside to inside, add intersection
                let t = d1 / (d1 - d2);
                output.push(current.lerp(next, t));
            }
            // If both outside, add nothing
        }

        debug_assert!(output.len() <= MAX_VERTICES_PER_POLYGON);
        Self { vertices: output }
    }

    /// Triangulate this convex polygon using fan triangulation.
    /// Returns an iterator of (v0, v1, v2) triangles.
    /// Assumes the polygon is convex (which is guaranteed after clipping).
    pub fn triangulate(&self) -> impl Iterator<Item = (&ClipVertex, &ClipVertex, &ClipVertex)> {
        (1..self.vertices.len().saturating_sub(1))
            .map(move |i| (&self.vertices[0], &self.vertices[i], &self.vertices[i + 1]))
    }
}

pub enum ClippingPlane {
    Left(Plane),
    Right(Plane),
    Top(Plane),
    Bottom(Plane),
    Near(Plane),
    Far(Plane),
}

impl ClippingPlane {
    /// Extract the plane (point, normal) from this clipping plane.
    pub fn plane(&self) -> Plane {
        match self {
            ClippingPlane::Left(p)
            | ClippingPlane::Right(p)
            | ClippingPlane::Top(p)
            | ClippingPlane::Bottom(p)
            | ClippingPlane::Near(p)
            | ClippingPlane::Far(p) => *p,
        }
    }

    fn new_frustum_left(fov: f32) -> Self {
        let half_fov = fov / 2.0;
        let normal = Vec3::new(half_fov.cos(), 0.0, half_fov.sin());
        ClippingPlane::Left((Vec3::new(0.0, 0.0, 0.0), normal))
    }

    fn new_frustum_right(fov: f32) -> Self {
        let half_fov = fov / 2.0;
        let normal = Vec3::new(-half_fov.cos(), 0.0, half_fov.sin());
        ClippingPlane::Right((Vec3::new(0.0, 0.0, 0.0), normal))
    }

    fn new_frustum_top(fov: f32) -> Self {
        let half_fov = fov / 2.0;
        let normal = Vec3::new(0.0, -half_fov.cos(), half_fov.sin());
        ClippingPlane::Top((Vec3::new(0.0, 0.0, 0.0), normal))
    }

    fn new_frustum_bottom(fov: f32) -> Self {
        let half_fov = fov / 2.0;
        let normal = Vec3::new(0.0, half_fov.cos(), half_fov.sin());
        ClippingPlane::Bottom((Vec3::new(0.0, 0.0, 0.0), normal))
    }

    fn new_frustum_near(znear: f32) -> Self {
        let point = Vec3::new(0.0, 0.0, znear);
        let normal = Vec3::new(0.0, 0.0, 1.0);
        ClippingPlane::Near((point, normal))
    }

    fn new_frustum_far(zfar: f32) -> Self {
        let point = Vec3::new(0.0, 0.0, zfar);
        let normal = Vec3::new(0.0, 0.0, -1.0);
        ClippingPlane::Far((point, normal))
    }
}

/// The view frustum: the 6 half-space planes geometry must lie inside of to
/// be visible, derived from the camera's actual FOV and near/far distances
/// (not a hard-coded angle).
pub struct Frustum {
    pub planes: [ClippingPlane; 6],
}

impl Frustum {
    pub fn new(fov: f32, aspect: f32, znear: f32, zfar: f32) -> Self {
        // Horizontal FOV derived from vertical FOV and aspect ratio:
        // tan(fov_x / 2) = aspect * tan(fov_y / 2)
        let fov_x = 2.0 * (aspect * (fov / 2.0).tan()).atan();

        Self {
            planes: [
                ClippingPlane::new_frustum_left(fov_x),
                ClippingPlane::new_frustum_right(fov_x),
                ClippingPlane::new_frustum_top(fov),
                ClippingPlane::new_frustum_bottom(fov),
                ClippingPlane::new_frustum_near(znear),
                ClippingPlane::new_frustum_far(zfar),
            ],
        }
    }

    /// Clip a polygon against all frustum planes.
    /// Returns the clipped polygon, which may be empty if fully outside.
    pub(crate) fn clip_polygon(&self, polygon: ClipPolygon) -> ClipPolygon {
        let mut result = polygon;

        for clipping_plane in &self.planes {
            if result.is_empty() {
                break;
            }
            result = result.clip_against_plane(clipping_plane.plane());
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn vertex_at(z: f32) -> ClipVertex {
        ClipVertex::new(Vec3::new(0.0, 0.0, z), TexCoord::ZERO, Color::from_argb(0xFFFFFFFF))
    }

    #[test]
    fn triangle_fully_inside_survives_unclipped() {
        let frustum = Frustum::new(60f32.to_radians(), 1.0, 0.1, 100.0);
        let polygon = ClipPolygon::from_triangle(
            ClipVertex::new(Vec3::new(-0.1, -0.1, 5.0), TexCoord::ZERO, Color::from_argb(0)),
            ClipVertex::new(Vec3::new(0.1, -0.1, 5.0), TexCoord::ZERO, Color::from_argb(0)),
            ClipVertex::new(Vec3::new(0.0, 0.1, 5.0), TexCoord::ZERO, Color::from_argb(0)),
        );
        let clipped = frustum.clip_polygon(polygon);
        assert_eq!(clipped.vertices.len(), 3);
    }

    #[test]
    fn triangle_fully_behind_near_plane_is_empty() {
        let frustum = Frustum::new(60f32.to_radians(), 1.0, 1.0, 100.0);
        let polygon = ClipPolygon::from_triangle(vertex_at(-5.0), vertex_at(-3.0), vertex_at(-1.0));
        let clipped = frustum.clip_polygon(polygon);
        assert!(clipped.is_empty());
    }

    #[test]
    fn triangle_straddling_near_plane_gains_a_vertex() {
        let frustum = Frustum::new(60f32.to_radians(), 1.0, 1.0, 100.0);
        let polygon = ClipPolygon::from_triangle(
            ClipVertex::new(Vec3::new(-1.0, 0.0, 0.5), TexCoord::ZERO, Color::from_argb(0)),
            ClipVertex::new(Vec3::new(1.0, 0.0, 0.5), TexCoord::ZERO, Color::from_argb(0)),
            ClipVertex::new(Vec3::new(0.0, 1.0, 2.0), TexCoord::ZERO, Color::from_argb(0)),
        );
        let clipped = frustum.clip_polygon(polygon);
        assert_eq!(clipped.vertices.len(), 4);
        for v in &clipped.vertices {
            assert!(v.position.z >= 1.0 - 1e-4);
        }
    }

    #[test]
    fn horizontal_fov_widens_with_aspect_ratio() {
        let narrow = Frustum::new(60f32.to_radians(), 1.0, 0.1, 100.0);
        let wide = Frustum::new(60f32.to_radians(), 2.0, 0.1, 100.0);

        let left_normal_x = |f: &Frustum| match &f.planes[0] {
            ClippingPlane::Left((_, n)) => n.x,
            _ => unreachable!(),
        };

        // A wider aspect ratio widens the horizontal FOV, so the left plane's
        // normal tilts further from the +X axis (smaller x component).
        assert!(left_normal_x(&wide) < left_normal_x(&narrow));
        let _ = assert_relative_eq;
    }
}
