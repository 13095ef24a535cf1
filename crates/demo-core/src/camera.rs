//! Perspective camera shared by the renderer and the orbit controls.
//!
//! Platform-agnostic: the frontends only feed it aspect changes and let the
//! controls move `position`/`target`.

use crate::constants::{CAMERA_FAR, CAMERA_FOV_DEGREES, CAMERA_NEAR};
use glam::{Mat4, Vec3};

/// Right-handed perspective camera looking from `position` at `target`.
#[derive(Clone, Debug)]
pub struct PerspectiveCamera {
    pub fov_y_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    projection: Mat4,
}

impl PerspectiveCamera {
    pub fn new(fov_y_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut camera = Self {
            fov_y_degrees,
            aspect,
            near,
            far,
            position: Vec3::ZERO,
            target: Vec3::ZERO,
            up: Vec3::Y,
            projection: Mat4::IDENTITY,
        };
        camera.update_projection();
        camera
    }

    /// Camera with the demos' shared lens (75° fov, 0.1..100), placed at
    /// `position` and looking at the origin.
    pub fn with_defaults(aspect: f32, position: Vec3) -> Self {
        let mut camera = Self::new(CAMERA_FOV_DEGREES, aspect, CAMERA_NEAR, CAMERA_FAR);
        camera.position = position;
        camera
    }

    /// Set the aspect ratio and recompute the projection immediately.
    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
        self.update_projection();
    }

    pub fn update_projection(&mut self) {
        self.projection =
            Mat4::perspective_rh(self.fov_y_degrees.to_radians(), self.aspect, self.near, self.far);
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view_matrix()
    }

    pub fn fov_y_radians(&self) -> f32 {
        self.fov_y_degrees.to_radians()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn target_projects_to_screen_center() {
        let cam = PerspectiveCamera::with_defaults(4.0 / 3.0, Vec3::new(3.0, 3.0, 3.0));
        let clip = cam.view_projection() * Vec3::ZERO.extend(1.0);
        assert_relative_eq!(clip.x / clip.w, 0.0, epsilon = 1e-5);
        assert_relative_eq!(clip.y / clip.w, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn degenerate_aspect_is_ignored() {
        let mut cam = PerspectiveCamera::with_defaults(2.0, Vec3::Z);
        cam.set_aspect(f32::NAN);
        assert_eq!(cam.aspect, 2.0);
        cam.set_aspect(0.0);
        assert_eq!(cam.aspect, 2.0);
    }
}
