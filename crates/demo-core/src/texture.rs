//! Texture descriptors: where an image comes from and how it is sampled.

use crate::material::MapSlot;
use glam::{Mat3, Vec2};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorSpace {
    Srgb,
    Linear,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Filter {
    Nearest,
    Linear,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Wrap {
    ClampToEdge,
    Repeat,
    MirroredRepeat,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextureDesc {
    pub path: &'static str,
    pub slot: MapSlot,
    pub color_space: ColorSpace,
    pub min_filter: Filter,
    pub mag_filter: Filter,
    pub generate_mipmaps: bool,
    pub wrap_s: Wrap,
    pub wrap_t: Wrap,
    pub repeat: Vec2,
    pub offset: Vec2,
    /// Radians, around `center`.
    pub rotation: f32,
    pub center: Vec2,
}

impl TextureDesc {
    /// Trilinear, mipmapped, clamped, identity UV transform. Color space
    /// follows the slot.
    pub fn new(path: &'static str, slot: MapSlot) -> Self {
        Self {
            path,
            slot,
            color_space: slot.color_space(),
            min_filter: Filter::Linear,
            mag_filter: Filter::Linear,
            generate_mipmaps: true,
            wrap_s: Wrap::ClampToEdge,
            wrap_t: Wrap::ClampToEdge,
            repeat: Vec2::ONE,
            offset: Vec2::ZERO,
            rotation: 0.0,
            center: Vec2::ZERO,
        }
    }

    /// Nearest filtering both ways and no mip chain, for pixel art.
    pub fn pixelated(mut self) -> Self {
        self.min_filter = Filter::Nearest;
        self.mag_filter = Filter::Nearest;
        self.generate_mipmaps = false;
        self
    }

    pub fn with_repeat(mut self, x: f32, y: f32) -> Self {
        self.repeat = Vec2::new(x, y);
        self.wrap_s = Wrap::Repeat;
        self.wrap_t = Wrap::Repeat;
        self
    }

    pub fn with_offset(mut self, x: f32, y: f32) -> Self {
        self.offset = Vec2::new(x, y);
        self
    }

    pub fn with_rotation(mut self, radians: f32, center: Vec2) -> Self {
        self.rotation = radians;
        self.center = center;
        self
    }

    /// Affine UV transform: scale by `repeat` and rotate about `center`,
    /// then shift by `offset`.
    pub fn uv_transform(&self) -> Mat3 {
        let (s, c) = self.rotation.sin_cos();
        let (sx, sy) = (self.repeat.x, self.repeat.y);
        let (cx, cy) = (self.center.x, self.center.y);
        let (ox, oy) = (self.offset.x, self.offset.y);
        Mat3::from_cols_array(&[
            sx * c,
            -sy * s,
            0.0,
            sx * s,
            sy * c,
            0.0,
            -sx * (c * cx + s * cy) + cx + ox,
            -sy * (-s * cx + c * cy) + cy + oy,
            1.0,
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn default_transform_is_identity() {
        let desc = TextureDesc::new("a.png", MapSlot::Color);
        assert_eq!(desc.uv_transform(), Mat3::IDENTITY);
    }

    #[test]
    fn repeat_and_offset_map_uv() {
        let desc = TextureDesc::new("a.png", MapSlot::Color)
            .with_repeat(2.0, 3.0)
            .with_offset(0.5, 0.5);
        let uv = desc.uv_transform().transform_point2(Vec2::new(0.5, 0.5));
        assert_relative_eq!(uv.x, 1.5, epsilon = 1e-6);
        assert_relative_eq!(uv.y, 2.0, epsilon = 1e-6);
    }

    #[test]
    fn rotation_keeps_center_fixed() {
        let center = Vec2::new(0.5, 0.5);
        let desc = TextureDesc::new("a.png", MapSlot::Color)
            .with_rotation(std::f32::consts::FRAC_PI_4, center);
        let uv = desc.uv_transform().transform_point2(center);
        assert_relative_eq!(uv.x, 0.5, epsilon = 1e-6);
        assert_relative_eq!(uv.y, 0.5, epsilon = 1e-6);
    }

    #[test]
    fn pixelated_disables_mipmaps() {
        let desc = TextureDesc::new("minecraft.png", MapSlot::Color).pixelated();
        assert_eq!(desc.mag_filter, Filter::Nearest);
        assert_eq!(desc.min_filter, Filter::Nearest);
        assert!(!desc.generate_mipmaps);
    }
}
