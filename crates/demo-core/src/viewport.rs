//! Viewport size record and the resize protocol.

use crate::camera::PerspectiveCamera;
use crate::constants::PIXEL_RATIO_CAP;

/// CSS-pixel size of the output surface plus the platform's pixel density.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub device_pixel_ratio: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1,
            height: 1,
            device_pixel_ratio: 1.0,
        }
    }
}

impl Viewport {
    pub fn new(width: u32, height: u32, device_pixel_ratio: f64) -> Self {
        Self {
            width,
            height,
            device_pixel_ratio,
        }
    }

    /// Width over height; a zero height counts as one pixel.
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    /// Render pixel density: `min(devicePixelRatio, 2)`. Non-positive or
    /// non-finite ratios fall back to 1.
    pub fn pixel_ratio(&self) -> f64 {
        capped_pixel_ratio(self.device_pixel_ratio)
    }

    /// Backing-store size in physical pixels, never zero.
    pub fn physical_size(&self) -> (u32, u32) {
        let pr = self.pixel_ratio();
        (
            ((self.width as f64 * pr).round() as u32).max(1),
            ((self.height as f64 * pr).round() as u32).max(1),
        )
    }

    /// [`physical_size`](Self::physical_size) scaled down, aspect kept, so
    /// neither side exceeds `max_dimension`.
    pub fn physical_size_within(&self, max_dimension: u32) -> (u32, u32) {
        fit_within(self.physical_size(), max_dimension)
    }
}

/// Shrink `(width, height)` uniformly until the longer side is at most
/// `max_dimension`. Sizes already inside the limit are returned unchanged.
pub fn fit_within((width, height): (u32, u32), max_dimension: u32) -> (u32, u32) {
    let max_dimension = max_dimension.max(1);
    let longest = width.max(height);
    if longest <= max_dimension {
        return (width, height);
    }
    let scale = max_dimension as f64 / longest as f64;
    let fit = |v: u32| ((v as f64 * scale).round() as u32).clamp(1, max_dimension);
    (fit(width), fit(height))
}

#[inline]
pub fn capped_pixel_ratio(dpr: f64) -> f64 {
    if dpr.is_finite() && dpr > 0.0 {
        dpr.min(PIXEL_RATIO_CAP)
    } else {
        1.0
    }
}

/// Something whose output resolution follows the viewport.
pub trait RenderTarget {
    /// Output size in CSS pixels.
    fn set_size(&mut self, width: u32, height: u32);
    fn set_pixel_ratio(&mut self, pixel_ratio: f64);

    /// Size and ratio in one step. Targets that rebuild GPU resources on
    /// every change override this to rebuild once.
    fn resize(&mut self, width: u32, height: u32, pixel_ratio: f64) {
        self.set_pixel_ratio(pixel_ratio);
        self.set_size(width, height);
    }
}

/// Apply a window resize: update the record, the camera aspect and the
/// render target, all before returning.
pub fn apply_resize<T: RenderTarget + ?Sized>(
    viewport: &mut Viewport,
    camera: &mut PerspectiveCamera,
    target: &mut T,
    width: u32,
    height: u32,
    device_pixel_ratio: f64,
) {
    viewport.width = width;
    viewport.height = height;
    viewport.device_pixel_ratio = device_pixel_ratio;

    camera.set_aspect(viewport.aspect());

    target.resize(width, height, viewport.pixel_ratio());
}
