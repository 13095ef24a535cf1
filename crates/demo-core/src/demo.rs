//! Demo catalogue: which scenes exist, where their cameras start, what they
//! load and which knobs they expose.

use crate::constants::{SHOWCASE_SPIN_X, SHOWCASE_SPIN_Y};
use crate::error::DemoError;
use crate::material::MapSlot;
use crate::params::{ParamSet, Trigger};
use crate::texture::TextureDesc;
use glam::Vec3;
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DemoKind {
    #[default]
    Galaxy,
    Materials,
    Textures,
}

impl DemoKind {
    pub const ALL: [DemoKind; 3] = [DemoKind::Galaxy, DemoKind::Materials, DemoKind::Textures];

    pub fn name(self) -> &'static str {
        match self {
            DemoKind::Galaxy => "galaxy",
            DemoKind::Materials => "materials",
            DemoKind::Textures => "textures",
        }
    }

    pub fn camera_position(self) -> Vec3 {
        match self {
            DemoKind::Galaxy => Vec3::new(3.0, 3.0, 3.0),
            DemoKind::Materials => Vec3::new(1.0, 1.0, 2.0),
            DemoKind::Textures => Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl fmt::Display for DemoKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DemoKind {
    type Err = DemoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        DemoKind::ALL
            .into_iter()
            .find(|k| k.name() == wanted)
            .ok_or_else(|| DemoError::UnknownDemo(s.to_string()))
    }
}

/// Something a demo wants fetched before it looks complete.
#[derive(Clone, Debug, PartialEq)]
pub enum AssetRequest {
    Texture(TextureDesc),
    /// Equirectangular Radiance HDR, used as background and lighting.
    Environment(&'static str),
}

impl AssetRequest {
    pub fn path(&self) -> &'static str {
        match self {
            AssetRequest::Texture(desc) => desc.path,
            AssetRequest::Environment(path) => path,
        }
    }
}

pub const DOOR_COLOR_PATH: &str = "textures/door/color.jpg";
pub const DOOR_ALPHA_PATH: &str = "textures/door/alpha.jpg";
pub const DOOR_AMBIENT_OCCLUSION_PATH: &str = "textures/door/ambientOcclusion.jpg";
pub const DOOR_HEIGHT_PATH: &str = "textures/door/height.jpg";
pub const DOOR_METALNESS_PATH: &str = "textures/door/metalness.jpg";
pub const DOOR_NORMAL_PATH: &str = "textures/door/normal.jpg";
pub const DOOR_ROUGHNESS_PATH: &str = "textures/door/roughness.jpg";
pub const MATCAP_PATH: &str = "textures/matcaps/3.png";
pub const GRADIENT_PATH: &str = "textures/gradients/3.jpg";
pub const MINECRAFT_PATH: &str = "textures/minecraft.png";
pub const ENVIRONMENT_MAP_PATH: &str = "textures/environmentMap/2k.hdr";

// Data maps, uploaded linear (see `MapSlot::color_space`). Marking them sRGB
// would gamma-decode roughness, metalness and normals before shading.
fn door_maps() -> Vec<TextureDesc> {
    vec![
        TextureDesc::new(DOOR_ALPHA_PATH, MapSlot::Alpha),
        TextureDesc::new(DOOR_AMBIENT_OCCLUSION_PATH, MapSlot::AmbientOcclusion),
        TextureDesc::new(DOOR_HEIGHT_PATH, MapSlot::Height),
        TextureDesc::new(DOOR_METALNESS_PATH, MapSlot::Metalness),
        TextureDesc::new(DOOR_NORMAL_PATH, MapSlot::Normal),
        TextureDesc::new(DOOR_ROUGHNESS_PATH, MapSlot::Roughness),
    ]
}

/// Pixelated block texture on the color slot plus the door data maps.
pub fn texture_showcase_set() -> Vec<TextureDesc> {
    let mut set = vec![TextureDesc::new(MINECRAFT_PATH, MapSlot::Color).pixelated()];
    set.extend(door_maps());
    set
}

/// Full door set, matcap and gradient.
pub fn material_showcase_set() -> Vec<TextureDesc> {
    let mut set = vec![TextureDesc::new(DOOR_COLOR_PATH, MapSlot::Color)];
    set.extend(door_maps());
    set.push(TextureDesc::new(MATCAP_PATH, MapSlot::Matcap));
    set.push(TextureDesc::new(GRADIENT_PATH, MapSlot::Gradient));
    set
}

pub const PARAM_METALNESS: &str = "metalness";
pub const PARAM_ROUGHNESS: &str = "roughness";
pub const PARAM_WIREFRAME: &str = "wireframe";

/// Live material controls: values apply while dragging.
pub fn material_param_set(metalness: f32, roughness: f32, wireframe: bool) -> ParamSet {
    let mut set = ParamSet::new();
    set.range(PARAM_METALNESS, metalness as f64, 0.0, 1.0, 0.0001, Trigger::Change)
        .range(PARAM_ROUGHNESS, roughness as f64, 0.0, 1.0, 0.0001, Trigger::Change)
        .toggle(PARAM_WIREFRAME, wireframe, Trigger::Change);
    set
}

/// Euler rotation of the showcase meshes after `elapsed` seconds.
pub fn showcase_rotation(elapsed: f32) -> Vec3 {
    Vec3::new(SHOWCASE_SPIN_X * elapsed, SHOWCASE_SPIN_Y * elapsed, 0.0)
}
