// Host-side tests for damped orbit controls.

use approx::assert_relative_eq;
use demo_core::*;
use glam::Vec3;

fn camera_at(position: Vec3) -> PerspectiveCamera {
    PerspectiveCamera::with_defaults(1.0, position)
}

fn azimuth(camera: &PerspectiveCamera) -> f32 {
    Spherical::from_vec3(camera.position - camera.target).theta
}

#[test]
fn idle_update_keeps_the_initial_pose() {
    for start in [Vec3::new(3.0, 3.0, 3.0), Vec3::new(1.0, 1.0, 2.0), Vec3::ONE] {
        let mut camera = camera_at(start);
        let mut controls = OrbitControls::new(&camera);
        for _ in 0..10 {
            assert!(!controls.update(&mut camera));
        }
        assert_relative_eq!(camera.position.x, start.x, epsilon = 1e-5);
        assert_relative_eq!(camera.position.y, start.y, epsilon = 1e-5);
        assert_relative_eq!(camera.position.z, start.z, epsilon = 1e-5);
    }
}

#[test]
fn damping_applies_a_fraction_per_frame() {
    let mut camera = camera_at(Vec3::new(0.0, 0.0, 2.0));
    let mut controls = OrbitControls::new(&camera);
    controls.rotate_left(1.0);

    assert!(controls.update(&mut camera));
    assert_relative_eq!(azimuth(&camera), -ORBIT_DAMPING_FACTOR, epsilon = 1e-5);

    assert!(controls.update(&mut camera));
    let expected = -(ORBIT_DAMPING_FACTOR + ORBIT_DAMPING_FACTOR * (1.0 - ORBIT_DAMPING_FACTOR));
    assert_relative_eq!(azimuth(&camera), expected, epsilon = 1e-5);
}

#[test]
fn released_input_eases_out_to_the_full_delta() {
    let mut camera = camera_at(Vec3::new(0.0, 0.0, 2.0));
    let mut controls = OrbitControls::new(&camera);
    controls.rotate_left(1.0);

    let mut previous_step = f32::MAX;
    let mut previous = 0.0;
    for _ in 0..300 {
        controls.update(&mut camera);
        let now = azimuth(&camera);
        let step = (now - previous).abs();
        assert!(step <= previous_step + 1e-6, "motion must decay");
        previous_step = step;
        previous = now;
    }
    assert_relative_eq!(previous, -1.0, epsilon = 1e-3);
    assert!(!controls.is_settling());
}

#[test]
fn orbiting_keeps_distance_to_target() {
    let mut camera = camera_at(Vec3::new(3.0, 3.0, 3.0));
    let distance = camera.position.length();
    let mut controls = OrbitControls::new(&camera);
    controls.rotate_by_pixels(120.0, -45.0, 600.0);
    for _ in 0..60 {
        controls.update(&mut camera);
        assert_relative_eq!(camera.position.length(), distance, epsilon = 1e-4);
    }
}

#[test]
fn polar_angle_never_reaches_the_poles() {
    let mut camera = camera_at(Vec3::new(0.0, 0.0, 2.0));
    let mut controls = OrbitControls::new(&camera);
    controls.enable_damping = false;
    controls.rotate_up(10.0);
    controls.update(&mut camera);
    assert!(camera.position.is_finite());
    // still a hair off the +Y axis, so look-at stays well defined
    assert!(camera.position.z > 0.0);
    assert!(camera.position.y > 1.99);
}

#[test]
fn wheel_dolly_scales_distance_once() {
    let mut camera = camera_at(Vec3::new(0.0, 0.0, 2.0));
    let mut controls = OrbitControls::new(&camera);
    controls.zoom_by_wheel(-100.0);
    controls.update(&mut camera);
    assert_relative_eq!(camera.position.length(), 2.0 * 0.95, epsilon = 1e-5);

    controls.zoom_by_wheel(100.0);
    controls.update(&mut camera);
    assert_relative_eq!(camera.position.length(), 2.0, epsilon = 1e-5);

    controls.zoom_by_wheel(0.0);
    assert!(!controls.update(&mut camera));
}

#[test]
fn distance_limits_clamp_dolly() {
    let mut camera = camera_at(Vec3::new(0.0, 0.0, 2.0));
    let mut controls = OrbitControls::new(&camera);
    controls.min_distance = 1.9;
    for _ in 0..10 {
        controls.zoom_by_wheel(-1.0);
    }
    controls.update(&mut camera);
    assert_relative_eq!(camera.position.length(), 1.9, epsilon = 1e-5);
}

#[test]
fn pan_moves_target_and_camera_together() {
    let mut camera = camera_at(Vec3::new(0.0, 0.0, 2.0));
    let mut controls = OrbitControls::new(&camera);
    controls.enable_damping = false;
    controls.pan(100.0, 0.0, 500.0, &camera);
    controls.update(&mut camera);

    // dragging right pulls the scene right, so the target moves left
    assert!(controls.target.x < 0.0);
    assert_relative_eq!(controls.target.y, 0.0, epsilon = 1e-6);
    assert_relative_eq!(camera.position.x, controls.target.x, epsilon = 1e-5);
    assert_relative_eq!((camera.position - controls.target).length(), 2.0, epsilon = 1e-5);
}

#[test]
fn spherical_round_trips_direction() {
    let v = Vec3::new(1.0, 2.0, -3.0);
    let back = Spherical::from_vec3(v).to_vec3();
    assert_relative_eq!(back.x, v.x, epsilon = 1e-5);
    assert_relative_eq!(back.y, v.y, epsilon = 1e-5);
    assert_relative_eq!(back.z, v.z, epsilon = 1e-5);
}
