//! Orbit camera.
//!
//! # Coordinate System
//!
//! Uses a **left-handed** coordinate system:
//! - X: positive right
//! - Y: positive up
//! - Z: positive forward (into screen)
//!
//! # Orientation
//!
//! The camera always looks at `target` (the mesh position). Dragging the
//! mouse changes `yaw`/`pitch`, which are converted to a rotation matrix;
//! the camera's `position` is then recomputed each time as a point on a
//! sphere of radius `distance` around `target`. This is simpler than storing
//! direction vectors directly and reuses the same yaw/pitch rotation-matrix
//! machinery a fly-camera would.
//!
//! - **Yaw**: rotation around Y-axis (horizontal orbit, positive = orbit right)
//! - **Pitch**: rotation around X-axis (vertical orbit, positive = orbit down)

use crate::math::mat4::Mat4;
use crate::math::vec3::Vec3;

#[derive(Debug, Clone)]
pub struct Camera {
    position: Vec3,
    yaw: f32,
    pitch: f32,

    target: Vec3,
    distance: f32,

    pitch_min: f32,
    pitch_max: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::ZERO, 5.0)
    }
}

impl Camera {
    /// Creates an orbit camera looking at `target` from `distance` units away.
    pub fn new(target: Vec3, distance: f32) -> Self {
        let mut camera = Self {
            position: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            target,
            distance,
            pitch_min: -89.0_f32.to_radians(),
            pitch_max: 89.0_f32.to_radians(),
        };
        camera.sync_position();
        camera
    }

    /// Builds the rotation matrix from yaw and pitch.
    fn rotation_matrix(&self) -> Mat4 {
        Mat4::rotation_y(-self.yaw) * Mat4::rotation_x(self.pitch)
    }

    /// Recomputes `position` as `target - forward * distance` from the
    /// current yaw/pitch. Must be called after any mutation of yaw, pitch,
    /// target, or distance.
    fn sync_position(&mut self) {
        self.position = self.target - self.forward() * self.distance;
    }

    /// Orbits the camera by yaw/pitch deltas (radians), as from a mouse drag.
    pub fn orbit(&mut self, yaw_delta: f32, pitch_delta: f32) {
        self.yaw = (self.yaw + yaw_delta).rem_euclid(std::f32::consts::TAU);
        self.pitch = (self.pitch + pitch_delta).clamp(self.pitch_min, self.pitch_max);
        self.sync_position();
    }

    /// Moves the orbit target (e.g. when the mesh is translated by WASD).
    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
        self.sync_position();
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Sets the orbit distance, clamped to stay strictly positive.
    pub fn set_distance(&mut self, distance: f32) {
        self.distance = distance.max(0.1);
        self.sync_position();
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Scales the orbit distance multiplicatively (mouse wheel).
    pub fn zoom(&mut self, factor: f32) {
        self.set_distance(self.distance * factor);
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// The camera's forward direction (normalized); the +Z axis of the
    /// rotation matrix.
    pub fn forward(&self) -> Vec3 {
        let rot = self.rotation_matrix();
        Vec3::new(rot.get(0, 2), rot.get(1, 2), rot.get(2, 2)).normalize()
    }

    /// The camera's right direction (normalized); the +X axis of the
    /// rotation matrix.
    pub fn right(&self) -> Vec3 {
        let rot = self.rotation_matrix();
        Vec3::new(rot.get(0, 0), rot.get(1, 0), rot.get(2, 0)).normalize()
    }

    /// The camera's up direction (normalized); the -Y axis of the rotation
    /// matrix (Y-down system).
    pub fn up(&self) -> Vec3 {
        let rot = self.rotation_matrix();
        Vec3::new(-rot.get(0, 1), -rot.get(1, 1), -rot.get(2, 1)).normalize()
    }

    /// Computes the view matrix for the rendering pipeline.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_lh(self.position, self.target, Vec3::UP)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn camera_starts_behind_target_on_z() {
        let camera = Camera::new(Vec3::ZERO, 5.0);
        assert_relative_eq!(camera.position().z, -5.0, epsilon = 1e-4);
    }

    #[test]
    fn orbit_yaw_moves_position_around_target() {
        let mut camera = Camera::new(Vec3::ZERO, 5.0);
        camera.orbit(std::f32::consts::FRAC_PI_2, 0.0);
        assert_relative_eq!(camera.position().x, -5.0, epsilon = 1e-3);
        assert_relative_eq!(camera.position().z, 0.0, epsilon = 1e-3);
    }

    #[test]
    fn pitch_is_clamped() {
        let mut camera = Camera::new(Vec3::ZERO, 5.0);
        camera.orbit(0.0, std::f32::consts::PI);
        assert!(camera.pitch() < std::f32::consts::FRAC_PI_2);
    }

    #[test]
    fn zoom_scales_distance_and_keeps_looking_at_target() {
        let mut camera = Camera::new(Vec3::ZERO, 5.0);
        camera.zoom(2.0);
        assert_relative_eq!(camera.distance(), 10.0, epsilon = 1e-4);
        let view = camera.view_matrix();
        let target_in_view = view * camera.target();
        assert_relative_eq!(target_in_view.z, 10.0, epsilon = 1e-3);
    }

    #[test]
    fn view_matrix_places_target_in_front() {
        let camera = Camera::new(Vec3::new(1.0, 0.0, 0.0), 5.0);
        let view = camera.view_matrix();
        let target_in_view = view * camera.target();
        assert_relative_eq!(target_in_view.x, 0.0, epsilon = 1e-3);
        assert_relative_eq!(target_in_view.y, 0.0, epsilon = 1e-3);
        assert_relative_eq!(target_in_view.z, 5.0, epsilon = 1e-3);
    }
}
