//! Projection parameters.
//!
//! The [`Projection`] struct is the single source of truth for all
//! projection parameters (FOV, aspect ratio, near/far planes). It generates
//! either the perspective or orthographic projection matrix depending on
//! [`ProjectionMode`], and the view-space frustum planes used for clipping
//! (which stay FOV-derived regardless of which projection matrix is active).

use crate::clipping::Frustum;
use crate::math::mat4::Mat4;

/// Which projection matrix `Projection::matrix` produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectionMode {
    #[default]
    Perspective,
    Orthographic,
}

/// Projection parameters shared between the perspective and orthographic
/// paths, plus the toggle selecting which one is active.
#[derive(Debug, Clone, Copy)]
pub struct Projection {
    /// Vertical field of view in radians (also used to size the
    /// orthographic view volume, so switching modes doesn't change the
    /// apparent framing).
    fov_y: f32,
    /// Aspect ratio (width / height).
    aspect_ratio: f32,
    /// Near clipping plane distance.
    z_near: f32,
    /// Far clipping plane distance.
    z_far: f32,
    mode: ProjectionMode,
}

impl Projection {
    pub fn new(fov_y: f32, aspect_ratio: f32, z_near: f32, z_far: f32) -> Self {
        Self {
            fov_y,
            aspect_ratio,
            z_near,
            z_far,
            mode: ProjectionMode::default(),
        }
    }

    pub fn from_degrees(fov_y_degrees: f32, aspect_ratio: f32, z_near: f32, z_far: f32) -> Self {
        Self::new(fov_y_degrees.to_radians(), aspect_ratio, z_near, z_far)
    }

    pub fn fov_y(&self) -> f32 {
        self.fov_y
    }

    /// Horizontal field of view in radians, derived from the vertical FOV
    /// and aspect ratio.
    pub fn fov_x(&self) -> f32 {
        2.0 * (self.aspect_ratio * (self.fov_y / 2.0).tan()).atan()
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    pub fn z_near(&self) -> f32 {
        self.z_near
    }

    pub fn z_far(&self) -> f32 {
        self.z_far
    }

    pub fn mode(&self) -> ProjectionMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: ProjectionMode) {
        self.mode = mode;
    }

    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.aspect_ratio = aspect_ratio;
    }

    /// Generates the active projection matrix (perspective or orthographic,
    /// both left-handed, both mapping `z` into `[0, 1]`).
    pub fn matrix(&self) -> Mat4 {
        match self.mode {
            ProjectionMode::Perspective => {
                Mat4::perspective_lh(self.fov_y, self.aspect_ratio, self.z_near, self.z_far)
            }
            ProjectionMode::Orthographic => {
                // Size the ortho volume so it roughly matches the perspective
                // framing at the near plane, for a less jarring toggle.
                let half_height = self.z_near * (self.fov_y / 2.0).tan();
                Mat4::orthographic_lh(half_height, self.aspect_ratio, self.z_near, self.z_far)
            }
        }
    }

    /// Builds the view-space frustum planes for clipping. These stay
    /// FOV-derived even in orthographic mode, since the spec does not call
    /// for a distinct orthographic clip volume.
    pub fn frustum(&self) -> Frustum {
        Frustum::new(self.fov_y, self.aspect_ratio, self.z_near, self.z_far)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_4;

    #[test]
    fn fov_x_matches_aspect_ratio() {
        let proj = Projection::new(FRAC_PI_4, 1.0, 0.1, 100.0);
        assert_relative_eq!(proj.fov_x(), proj.fov_y(), epsilon = 1e-6);
    }

    #[test]
    fn fov_x_wider_with_higher_aspect() {
        let proj = Projection::new(FRAC_PI_4, 16.0 / 9.0, 0.1, 100.0);
        assert!(proj.fov_x() > proj.fov_y());
    }

    #[test]
    fn from_degrees_converts_correctly() {
        let proj = Projection::from_degrees(45.0, 1.0, 0.1, 100.0);
        assert_relative_eq!(proj.fov_y(), FRAC_PI_4, epsilon = 1e-6);
    }

    #[test]
    fn mode_toggle_changes_matrix_but_not_frustum() {
        let mut proj = Projection::new(FRAC_PI_4, 1.0, 0.1, 100.0);
        let persp = proj.matrix();
        proj.set_mode(ProjectionMode::Orthographic);
        let ortho = proj.matrix();
        assert_ne!(persp.get(3, 2), ortho.get(3, 2));
        // Frustum construction doesn't depend on `mode` at all.
        let _ = proj.frustum();
    }
}
