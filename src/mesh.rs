//! 3D mesh representation and loading.
//!
//! Provides the [`Mesh`] struct for storing vertices and faces, along with
//! OBJ file loading support via the `tobj` crate.

use crate::colors::{self, Color};
use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;

pub(crate) const N_CUBE_VERTICES: usize = 8;
pub(crate) const N_CUBE_FACES: usize = 12;

/// Texture coordinate, always clamped to `[0, 1]` at construction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TexCoord {
    pub u: f32,
    pub v: f32,
}

impl TexCoord {
    pub const ZERO: Self = Self { u: 0.0, v: 0.0 };

    pub fn new(u: f32, v: f32) -> Self {
        Self {
            u: u.clamp(0.0, 1.0),
            v: v.clamp(0.0, 1.0),
        }
    }

    #[inline]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self {
            u: self.u + (other.u - self.u) * t,
            v: self.v + (other.v - self.v) * t,
        }
    }
}

impl From<Vec2> for TexCoord {
    fn from(v: Vec2) -> Self {
        Self::new(v.x, v.y)
    }
}

/// A triangle face: three 1-based vertex indices, one texture coordinate per
/// corner, and a base ARGB color applied before lighting.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Face {
    pub a: u32,
    pub b: u32,
    pub c: u32,
    pub uvs: [TexCoord; 3],
    pub color: Color,
}

impl Face {
    pub const fn new(a: u32, b: u32, c: u32, uvs: [TexCoord; 3], color: Color) -> Self {
        Self {
            a,
            b,
            c,
            uvs,
            color,
        }
    }

    pub const fn flat(a: u32, b: u32, c: u32) -> Self {
        Self::new(
            a,
            b,
            c,
            [TexCoord::ZERO, TexCoord::ZERO, TexCoord::ZERO],
            colors::FILL,
        )
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to load OBJ: {0}")]
    Tobj(#[from] tobj::LoadError),
    #[error("OBJ file contains no models")]
    NoModels,
    #[error("mesh has no vertices")]
    NoVertices,
    #[error("face indices not divisible by 3")]
    InvalidFaces,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Mesh {
    vertices: Vec<Vec3>,
    faces: Vec<Face>,
    rotation: Vec3,
    scale: Vec3,
    translation: Vec3,
}

impl Mesh {
    pub(crate) fn new(
        vertices: Vec<Vec3>,
        faces: Vec<Face>,
        rotation: Vec3,
        scale: Vec3,
        translation: Vec3,
    ) -> Self {
        Self {
            vertices,
            faces,
            rotation,
            scale,
            translation,
        }
    }

    /// Load a mesh from a Wavefront OBJ file.
    ///
    /// Normal indices (`f a/ta/na ...`) are read by `tobj` as part of the
    /// combined vertex but dropped here: this renderer computes flat
    /// per-face shading from the face's own geometric normal, so per-vertex
    /// normals have no consumer.
    pub(crate) fn from_obj(file_path: &str) -> Result<Self, LoadError> {
        let (models, _materials) = tobj::load_obj(file_path, &tobj::GPU_LOAD_OPTIONS)?;

        let model = models.into_iter().next().ok_or(LoadError::NoModels)?;
        let mesh = model.mesh;

        if mesh.positions.is_empty() {
            return Err(LoadError::NoVertices);
        }

        if mesh.indices.len() % 3 != 0 {
            return Err(LoadError::InvalidFaces);
        }

        let vertices: Vec<Vec3> = mesh
            .positions
            .chunks_exact(3)
            .map(|c| Vec3::new(c[0], c[1], c[2]))
            .collect();

        // GPU_LOAD_OPTIONS merges attributes behind a single index, so
        // texcoords[i] lines up with positions[i] for the same vertex index.
        let texcoords: Vec<TexCoord> = if mesh.texcoords.is_empty() {
            vec![TexCoord::ZERO; vertices.len()]
        } else {
            mesh.texcoords
                .chunks_exact(2)
                .map(|c| TexCoord::new(c[0], c[1]))
                .collect()
        };

        let faces: Vec<Face> = mesh
            .indices
            .chunks_exact(3)
            .map(|c| {
                let (i, j, k) = (c[0] as usize, c[1] as usize, c[2] as usize);
                Face::new(
                    c[0] + 1,
                    c[1] + 1,
                    c[2] + 1,
                    [texcoords[i], texcoords[j], texcoords[k]],
                    colors::FILL,
                )
            })
            .collect();

        Ok(Self::new(vertices, faces, Vec3::ZERO, Vec3::ONE, Vec3::ZERO))
    }

    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    pub fn rotation_mut(&mut self) -> &mut Vec3 {
        &mut self.rotation
    }

    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    pub fn scale_mut(&mut self) -> &mut Vec3 {
        &mut self.scale
    }

    pub fn translation(&self) -> Vec3 {
        self.translation
    }

    pub fn translation_mut(&mut self) -> &mut Vec3 {
        &mut self.translation
    }

    pub(crate) fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub(crate) fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// The built-in unit cube, used as the default mesh when no OBJ file is loaded.
    pub fn cube() -> Self {
        Self::new(
            CUBE_VERTICES.to_vec(),
            CUBE_FACES.to_vec(),
            Vec3::ZERO,
            Vec3::ONE,
            Vec3::ZERO,
        )
    }
}

pub(crate) const CUBE_VERTICES: [Vec3; N_CUBE_VERTICES] = [
    Vec3::new(-1.0, -1.0, -1.0),
    Vec3::new(-1.0, 1.0, -1.0),
    Vec3::new(1.0, 1.0, -1.0),
    Vec3::new(1.0, -1.0, -1.0),
    Vec3::new(1.0, 1.0, 1.0),
    Vec3::new(1.0, -1.0, 1.0),
    Vec3::new(-1.0, 1.0, 1.0),
    Vec3::new(-1.0, -1.0, 1.0),
];

pub(crate) const CUBE_FACES: [Face; N_CUBE_FACES] = [
    Face::flat(1, 2, 3),
    Face::flat(1, 3, 4),
    Face::flat(4, 3, 5),
    Face::flat(4, 5, 6),
    Face::flat(6, 5, 7),
    Face::flat(6, 7, 8),
    Face::flat(8, 7, 2),
    Face::flat(8, 2, 1),
    Face::flat(2, 7, 5),
    Face::flat(2, 5, 3),
    Face::flat(6, 8, 1),
    Face::flat(6, 1, 4),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn texcoord_clamps_out_of_range() {
        let tc = TexCoord::new(1.5, -0.3);
        assert_eq!(tc.u, 1.0);
        assert_eq!(tc.v, 0.0);
    }

    #[test]
    fn cube_has_expected_counts() {
        assert_eq!(CUBE_VERTICES.len(), N_CUBE_VERTICES);
        assert_eq!(CUBE_FACES.len(), N_CUBE_FACES);
    }
}
