//! Lighting types for the renderer.

use crate::prelude::Vec3;

/// A directional light that illuminates the scene uniformly from a direction.
///
/// Directional lights are ideal for simulating distant light sources like the sun,
/// where all rays are effectively parallel.
pub struct DirectionalLight {
    /// The normalized direction the light is pointing (not where it comes from).
    pub direction: Vec3,
}

impl DirectionalLight {
    /// Create a new directional light pointing in the given direction.
    /// The direction will be normalized automatically.
    pub fn new(direction: Vec3) -> Self {
        DirectionalLight {
            direction: direction.normalize(),
        }
    }

    /// Flat shading intensity for a face with the given (normalized) normal.
    ///
    /// `intensity = 0.5 * dot(-direction, normal) + 0.5`: a face facing
    /// directly into the light is fully lit, one facing directly away sits
    /// at half brightness rather than black.
    pub fn intensity(&self, normal: Vec3) -> f32 {
        0.5 * (-self.direction).dot(normal.normalize()) + 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_illumination() {
        let light = DirectionalLight::new(Vec3::new(0.0, 0.0, -1.0));
        let normal = Vec3::new(0.0, 0.0, 1.0);
        assert!((light.intensity(normal) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_grazing_illumination() {
        let light = DirectionalLight::new(Vec3::new(0.0, 0.0, -1.0));
        let normal = Vec3::new(1.0, 0.0, 0.0);
        assert!((light.intensity(normal) - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_facing_away() {
        let light = DirectionalLight::new(Vec3::new(0.0, 0.0, -1.0));
        let normal = Vec3::new(0.0, 0.0, -1.0);
        assert!(light.intensity(normal) < 0.001);
    }
}
