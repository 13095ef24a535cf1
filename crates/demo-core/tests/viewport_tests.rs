// Host-side tests for viewport sizing and the resize protocol.

use approx::assert_relative_eq;
use demo_core::*;
use glam::Vec3;

#[derive(Default)]
struct RecordingTarget {
    calls: Vec<String>,
    size: (u32, u32),
    pixel_ratio: f64,
}

impl RenderTarget for RecordingTarget {
    fn set_size(&mut self, width: u32, height: u32) {
        self.calls.push(format!("size {width}x{height}"));
        self.size = (width, height);
    }

    fn set_pixel_ratio(&mut self, pixel_ratio: f64) {
        self.calls.push(format!("ratio {pixel_ratio}"));
        self.pixel_ratio = pixel_ratio;
    }
}

#[test]
fn pixel_ratio_is_capped_at_two() {
    assert_eq!(Viewport::new(10, 10, 1.0).pixel_ratio(), 1.0);
    assert_eq!(Viewport::new(10, 10, 1.5).pixel_ratio(), 1.5);
    assert_eq!(Viewport::new(10, 10, 3.0).pixel_ratio(), 2.0);
    assert_eq!(Viewport::new(10, 10, 0.0).pixel_ratio(), 1.0);
    assert_eq!(Viewport::new(10, 10, f64::NAN).pixel_ratio(), 1.0);
}

#[test]
fn physical_size_scales_by_capped_ratio() {
    assert_eq!(Viewport::new(800, 600, 3.0).physical_size(), (1600, 1200));
    assert_eq!(Viewport::new(0, 0, 1.0).physical_size(), (1, 1));
}

#[test]
fn oversized_surfaces_shrink_to_the_texture_limit() {
    // 4200x2400 CSS at ratio 2 wants 8400x4800
    let vp = Viewport::new(4200, 2400, 2.0);
    assert_eq!(vp.physical_size(), (8400, 4800));
    assert_eq!(vp.physical_size_within(8192), (8192, 4681));

    assert_eq!(fit_within((2400, 9000), 8192), (2185, 8192));
    assert_eq!(fit_within((1600, 1200), 8192), (1600, 1200));
    assert_eq!(fit_within((8192, 8192), 8192), (8192, 8192));
    assert_eq!(fit_within((100_000, 1), 8192), (8192, 1));
}

#[test]
fn zero_height_does_not_divide_by_zero() {
    let vp = Viewport::new(640, 0, 1.0);
    assert_eq!(vp.aspect(), 640.0);
}

#[test]
fn resize_updates_record_camera_and_target_together() {
    let mut viewport = Viewport::new(800, 600, 1.0);
    let mut camera = PerspectiveCamera::with_defaults(viewport.aspect(), Vec3::new(3.0, 3.0, 3.0));
    let mut target = RecordingTarget::default();

    apply_resize(&mut viewport, &mut camera, &mut target, 400, 300, 1.0);

    assert_eq!(viewport, Viewport::new(400, 300, 1.0));
    assert_relative_eq!(camera.aspect, 4.0 / 3.0, epsilon = 1e-6);
    assert_eq!(target.size, (400, 300));
    assert_eq!(target.calls, vec!["ratio 1", "size 400x300"]);
}

/// Rebuilds on every setter, unless resized in one step.
#[derive(Default)]
struct RebuildingTarget {
    size: (u32, u32),
    pixel_ratio: f64,
    rebuilds: Vec<(u32, u32, f64)>,
}

impl RenderTarget for RebuildingTarget {
    fn set_size(&mut self, width: u32, height: u32) {
        self.size = (width, height);
        self.rebuilds.push((width, height, self.pixel_ratio));
    }

    fn set_pixel_ratio(&mut self, pixel_ratio: f64) {
        self.pixel_ratio = pixel_ratio;
        self.rebuilds.push((self.size.0, self.size.1, pixel_ratio));
    }

    fn resize(&mut self, width: u32, height: u32, pixel_ratio: f64) {
        self.size = (width, height);
        self.pixel_ratio = pixel_ratio;
        self.rebuilds.push((width, height, pixel_ratio));
    }
}

#[test]
fn size_and_ratio_change_rebuilds_once() {
    let mut viewport = Viewport::new(800, 600, 1.0);
    let mut camera = PerspectiveCamera::with_defaults(viewport.aspect(), Vec3::ONE);
    let mut target = RebuildingTarget {
        size: (800, 600),
        pixel_ratio: 1.0,
        ..Default::default()
    };

    apply_resize(&mut viewport, &mut camera, &mut target, 1024, 768, 2.0);

    assert_eq!(target.rebuilds, vec![(1024, 768, 2.0)]);
}

#[test]
fn resize_sequence_keeps_invariants_after_every_step() {
    let mut viewport = Viewport::default();
    let mut camera = PerspectiveCamera::with_defaults(1.0, Vec3::ONE);
    let mut target = RecordingTarget::default();

    let steps = [
        (1920, 1080, 1.0),
        (375, 812, 3.0),
        (1024, 768, 2.0),
        (300, 300, 1.25),
        (2560, 1440, 2.5),
    ];
    for (w, h, dpr) in steps {
        apply_resize(&mut viewport, &mut camera, &mut target, w, h, dpr);
        assert_relative_eq!(camera.aspect, w as f32 / h as f32, epsilon = 1e-6);
        assert_eq!(target.pixel_ratio, dpr.min(2.0));
        assert_eq!(target.size, (w, h));
    }
}

#[test]
fn projection_follows_aspect() {
    let mut camera = PerspectiveCamera::with_defaults(1.0, Vec3::Z * 2.0);
    let before = camera.projection_matrix();
    camera.set_aspect(2.0);
    let after = camera.projection_matrix();
    assert_relative_eq!(after.x_axis.x * 2.0, before.x_axis.x, epsilon = 1e-6);
    assert_eq!(after.y_axis.y, before.y_axis.y);
}
