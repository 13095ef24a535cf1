//! Material descriptions consumed by the renderer.

use crate::color::Color;
use crate::texture::ColorSpace;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Blending {
    #[default]
    Normal,
    /// `src * alpha + dst`.
    Additive,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Side {
    #[default]
    Front,
    Back,
    Double,
}

/// Screen-facing square sprites, one per point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointsMaterial {
    /// World-scaled size in pixels at unit view depth.
    pub size: f32,
    pub size_attenuation: bool,
    pub depth_write: bool,
    pub blending: Blending,
    pub vertex_colors: bool,
}

impl PointsMaterial {
    /// The galaxy look: attenuated, additive, no depth writes, per-point colors.
    pub fn glowing(size: f32) -> Self {
        Self {
            size,
            size_attenuation: true,
            depth_write: false,
            blending: Blending::Additive,
            vertex_colors: true,
        }
    }
}

/// Texture inputs a mesh material can sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MapSlot {
    Color,
    Alpha,
    AmbientOcclusion,
    Height,
    Metalness,
    Normal,
    Roughness,
    Matcap,
    Gradient,
}

impl MapSlot {
    pub const ALL: [MapSlot; 9] = [
        MapSlot::Color,
        MapSlot::Alpha,
        MapSlot::AmbientOcclusion,
        MapSlot::Height,
        MapSlot::Metalness,
        MapSlot::Normal,
        MapSlot::Roughness,
        MapSlot::Matcap,
        MapSlot::Gradient,
    ];

    /// Color-like maps hold sRGB-encoded texels; data maps are linear.
    pub fn color_space(self) -> ColorSpace {
        match self {
            MapSlot::Color | MapSlot::Matcap | MapSlot::Gradient => ColorSpace::Srgb,
            _ => ColorSpace::Linear,
        }
    }

    /// Neutral texel used until the real image arrives: it leaves the
    /// material's scalar factors unchanged.
    pub fn fallback_texel(self) -> [u8; 4] {
        match self {
            MapSlot::Normal => [128, 128, 255, 255],
            MapSlot::Height => [0, 0, 0, 255],
            _ => [255, 255, 255, 255],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            MapSlot::Color => "color",
            MapSlot::Alpha => "alpha",
            MapSlot::AmbientOcclusion => "ambientOcclusion",
            MapSlot::Height => "height",
            MapSlot::Metalness => "metalness",
            MapSlot::Normal => "normal",
            MapSlot::Roughness => "roughness",
            MapSlot::Matcap => "matcap",
            MapSlot::Gradient => "gradient",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Shading {
    /// Color (times map) only.
    #[default]
    Unlit,
    /// Metal/rough image-based lighting from the environment map.
    Physical,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MeshMaterial {
    pub shading: Shading,
    pub color: Color,
    pub opacity: f32,
    pub metalness: f32,
    pub roughness: f32,
    pub ao_map_intensity: f32,
    pub normal_scale: [f32; 2],
    pub transparent: bool,
    pub wireframe: bool,
    pub side: Side,
    /// Slots a texture is bound to. Unlisted slots are ignored by the shader.
    pub maps: Vec<MapSlot>,
}

impl MeshMaterial {
    pub fn basic() -> Self {
        Self {
            shading: Shading::Unlit,
            color: Color::WHITE,
            opacity: 1.0,
            metalness: 0.0,
            roughness: 1.0,
            ao_map_intensity: 1.0,
            normal_scale: [1.0, 1.0],
            transparent: false,
            wireframe: false,
            side: Side::Front,
            maps: Vec::new(),
        }
    }

    pub fn physical() -> Self {
        Self {
            shading: Shading::Physical,
            ..Self::basic()
        }
    }

    /// Fully metallic, fully rough physical material carrying the door texture
    /// set, with half-strength normals and alpha blending.
    pub fn door_physical() -> Self {
        Self {
            metalness: 1.0,
            roughness: 1.0,
            normal_scale: [0.5, 0.5],
            transparent: true,
            maps: vec![
                MapSlot::Color,
                MapSlot::AmbientOcclusion,
                MapSlot::Roughness,
                MapSlot::Metalness,
                MapSlot::Normal,
                MapSlot::Alpha,
            ],
            ..Self::physical()
        }
    }

    pub fn with_map(mut self, slot: MapSlot) -> Self {
        if !self.maps.contains(&slot) {
            self.maps.push(slot);
        }
        self
    }

    pub fn has_map(&self, slot: MapSlot) -> bool {
        self.maps.contains(&slot)
    }

    pub fn needs_blending(&self) -> bool {
        self.transparent || self.opacity < 1.0
    }
}
