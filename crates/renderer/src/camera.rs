//! Perspective camera driven by an external position and look target.

use bytemuck::{Pod, Zeroable};
use engine_core::Transform;
use glam::{Mat4, Vec3};

/// Perspective camera with configurable FOV and clipping planes.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Camera transform (position and rotation).
    pub transform: Transform,
    /// Field of view in degrees.
    pub fov_degrees: f32,
    /// Near clipping plane.
    pub near: f32,
    /// Far clipping plane.
    pub far: f32,
    /// Aspect ratio (width / height).
    pub aspect: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            transform: Transform::default(),
            fov_degrees: 75.0,
            near: 0.1,
            far: 15000.0,
            aspect: 16.0 / 9.0,
        }
    }
}

impl Camera {
    /// Create a new camera at the given position.
    pub fn new(position: Vec3) -> Self {
        Self {
            transform: Transform::from_position(position),
            ..Default::default()
        }
    }

    /// Update aspect ratio (call on window resize).
    pub fn set_aspect(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }

    /// Move the camera.
    pub fn set_position(&mut self, position: Vec3) {
        self.transform.position = position;
    }

    /// Turn the camera toward a world point, keeping +Y up.
    pub fn look_at(&mut self, target: Vec3) {
        self.transform.look_at(target, Vec3::Y);
    }

    /// Get the view matrix.
    pub fn view_matrix(&self) -> Mat4 {
        let eye = self.transform.position;
        let target = eye + self.transform.forward();
        Mat4::look_at_rh(eye, target, self.transform.up())
    }

    /// Get the projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    /// Get the combined view-projection matrix.
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Get camera position.
    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    /// Get camera forward direction.
    pub fn forward(&self) -> Vec3 {
        self.transform.forward()
    }
}

/// Camera uniform data for GPU (must match flat.wgsl `Camera`).
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub position: [f32; 4], // w unused, padding
    /// Direction toward the sun, xyz normalized; w unused.
    pub sun_direction: [f32; 4],
}

impl CameraUniform {
    pub fn new() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            position: [0.0; 4],
            sun_direction: [0.5, 1.0, 0.3, 0.0],
        }
    }

    pub fn update(&mut self, camera: &Camera, sun_direction: Vec3) {
        self.view_proj = camera.view_projection_matrix().to_cols_array_2d();
        let pos = camera.position();
        self.position = [pos.x, pos.y, pos.z, 1.0];
        let sun = sun_direction.normalize_or_zero();
        self.sun_direction = [sun.x, sun.y, sun.z, 0.0];
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn look_at_puts_target_on_view_axis() {
        let mut camera = Camera::new(Vec3::new(0.0, 208.0, 30.0));
        let target = Vec3::new(0.0, 200.0, -20.0);
        camera.look_at(target);
        let in_view = camera.view_matrix().transform_point3(target);
        assert!(in_view.x.abs() < 1e-3);
        assert!(in_view.y.abs() < 1e-3);
        assert!(in_view.z < 0.0);
    }

    #[test]
    fn aspect_guards_zero_height() {
        let mut camera = Camera::default();
        camera.set_aspect(800, 0);
        assert_eq!(camera.aspect, 800.0);
    }

    #[test]
    fn uniform_normalizes_sun() {
        let mut u = CameraUniform::new();
        u.update(&Camera::default(), Vec3::new(0.0, 2.0, 0.0));
        assert_eq!(u.sun_direction, [0.0, 1.0, 0.0, 0.0]);
        assert_eq!(std::mem::size_of::<CameraUniform>() % 16, 0);
    }
}
