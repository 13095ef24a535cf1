//! Damped orbit controls.
//!
//! Input accumulates into pending spherical/pan deltas; [`OrbitControls::update`]
//! applies `damping_factor` of what is pending each frame and keeps the rest
//! (scaled by `1 - damping_factor`), so motion eases out after release.
//! Spherical coordinates are Y-up: `theta` is the azimuth measured from +Z
//! towards +X, `phi` the polar angle from +Y.

use crate::camera::PerspectiveCamera;
use crate::constants::{
    ORBIT_DAMPING_FACTOR, ORBIT_MAX_DISTANCE, ORBIT_MIN_DISTANCE, ORBIT_PAN_SPEED,
    ORBIT_POLAR_EPSILON, ORBIT_ROTATE_SPEED, ORBIT_ZOOM_SPEED,
};
use glam::Vec3;
use std::f32::consts::{PI, TAU};

const CHANGE_EPSILON: f32 = 1e-6;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Spherical {
    pub radius: f32,
    pub phi: f32,
    pub theta: f32,
}

impl Spherical {
    pub fn from_vec3(v: Vec3) -> Self {
        let radius = v.length();
        if radius == 0.0 {
            return Self::default();
        }
        Self {
            radius,
            theta: v.x.atan2(v.z),
            phi: (v.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    pub fn to_vec3(self) -> Vec3 {
        let sin_phi_radius = self.phi.sin() * self.radius;
        Vec3::new(
            sin_phi_radius * self.theta.sin(),
            self.phi.cos() * self.radius,
            sin_phi_radius * self.theta.cos(),
        )
    }

    /// Keep `phi` strictly inside (0, π).
    pub fn make_safe(&mut self) {
        self.phi = self
            .phi
            .clamp(ORBIT_POLAR_EPSILON, PI - ORBIT_POLAR_EPSILON);
    }
}

#[derive(Clone, Debug)]
pub struct OrbitControls {
    pub target: Vec3,
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    spherical_delta: Spherical,
    pan_offset: Vec3,
    scale: f32,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            enable_damping: true,
            damping_factor: ORBIT_DAMPING_FACTOR,
            rotate_speed: ORBIT_ROTATE_SPEED,
            zoom_speed: ORBIT_ZOOM_SPEED,
            pan_speed: ORBIT_PAN_SPEED,
            min_distance: ORBIT_MIN_DISTANCE,
            max_distance: ORBIT_MAX_DISTANCE,
            spherical_delta: Spherical::default(),
            pan_offset: Vec3::ZERO,
            scale: 1.0,
        }
    }
}

impl OrbitControls {
    /// Damped controls orbiting the camera's current target.
    pub fn new(camera: &PerspectiveCamera) -> Self {
        Self {
            target: camera.target,
            ..Self::default()
        }
    }

    pub fn rotate_left(&mut self, angle: f32) {
        self.spherical_delta.theta -= angle;
    }

    pub fn rotate_up(&mut self, angle: f32) {
        self.spherical_delta.phi -= angle;
    }

    /// Drag of `(dx, dy)` pixels over a surface `height` pixels tall. A full
    /// height drag turns the camera by one revolution.
    pub fn rotate_by_pixels(&mut self, dx: f32, dy: f32, height: f32) {
        let h = height.max(1.0);
        self.rotate_left(TAU * dx * self.rotate_speed / h);
        self.rotate_up(TAU * dy * self.rotate_speed / h);
    }

    /// Screen-space pan: moves the target so the point under the cursor
    /// tracks the drag at the target's depth.
    pub fn pan(&mut self, dx: f32, dy: f32, height: f32, camera: &PerspectiveCamera) {
        let h = height.max(1.0);
        let offset = camera.position - self.target;
        let target_distance = offset.length() * (camera.fov_y_radians() * 0.5).tan();

        let forward = (self.target - camera.position).normalize_or_zero();
        let right = forward.cross(camera.up).normalize_or_zero();
        let up = right.cross(forward);

        let left = 2.0 * dx * self.pan_speed * target_distance / h;
        let upward = 2.0 * dy * self.pan_speed * target_distance / h;
        self.pan_offset += right * -left + up * upward;
    }

    pub fn dolly_in(&mut self, dolly_scale: f32) {
        self.scale *= dolly_scale;
    }

    pub fn dolly_out(&mut self, dolly_scale: f32) {
        self.scale /= dolly_scale;
    }

    pub fn zoom_scale(&self) -> f32 {
        0.95_f32.powf(self.zoom_speed)
    }

    /// Mouse wheel: scrolling up (negative delta) moves closer.
    pub fn zoom_by_wheel(&mut self, delta_y: f32) {
        let s = self.zoom_scale();
        if delta_y < 0.0 {
            self.dolly_in(s);
        } else if delta_y > 0.0 {
            self.dolly_out(s);
        }
    }

    /// True while there is still pending motion to ease out.
    pub fn is_settling(&self) -> bool {
        self.spherical_delta.theta.abs() > CHANGE_EPSILON
            || self.spherical_delta.phi.abs() > CHANGE_EPSILON
            || self.pan_offset.length_squared() > CHANGE_EPSILON * CHANGE_EPSILON
    }

    /// Advance one frame and move `camera`. Returns whether the camera moved.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) -> bool {
        let before = camera.position;
        let before_target = self.target;

        let offset = camera.position - self.target;
        let mut spherical = Spherical::from_vec3(offset);

        let factor = if self.enable_damping {
            self.damping_factor
        } else {
            1.0
        };

        spherical.theta += self.spherical_delta.theta * factor;
        spherical.phi += self.spherical_delta.phi * factor;
        spherical.make_safe();
        spherical.radius = (spherical.radius * self.scale).clamp(self.min_distance, self.max_distance);

        self.target += self.pan_offset * factor;

        camera.position = self.target + spherical.to_vec3();
        camera.target = self.target;

        if self.enable_damping {
            let keep = 1.0 - self.damping_factor;
            self.spherical_delta.theta *= keep;
            self.spherical_delta.phi *= keep;
            self.pan_offset *= keep;
        } else {
            self.spherical_delta = Spherical::default();
            self.pan_offset = Vec3::ZERO;
        }
        self.scale = 1.0;

        camera.position.distance_squared(before) > CHANGE_EPSILON
            || self.target.distance_squared(before_target) > CHANGE_EPSILON
    }
}
