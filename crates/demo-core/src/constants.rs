// Shared tuning constants used by the renderer and both frontends.

// Viewport
pub const PIXEL_RATIO_CAP: f64 = 2.0; // upper bound on devicePixelRatio when sizing output

// Camera
pub const CAMERA_FOV_DEGREES: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 100.0;

// Orbit controls
pub const ORBIT_DAMPING_FACTOR: f32 = 0.05; // share of the pending delta applied per frame
pub const ORBIT_ROTATE_SPEED: f32 = 1.0;
pub const ORBIT_ZOOM_SPEED: f32 = 1.0;
pub const ORBIT_PAN_SPEED: f32 = 1.0;
pub const ORBIT_MIN_DISTANCE: f32 = 0.0;
pub const ORBIT_MAX_DISTANCE: f32 = f32::INFINITY;
pub const ORBIT_POLAR_EPSILON: f32 = 1e-6; // keeps the camera off the poles

// Debug panel
pub const PANEL_WIDTH_PX: u32 = 340;

// Showcase animation (radians per second)
pub const SHOWCASE_SPIN_X: f32 = -0.15;
pub const SHOWCASE_SPIN_Y: f32 = 0.1;

// Frame clear color (linear)
pub const CLEAR_COLOR: [f64; 4] = [0.0, 0.0, 0.0, 1.0];
