//! The three scenes. Each owns its render nodes, its panel parameters and the
//! list of assets it wants fetched.

mod galaxy;
mod materials;
mod textures;

use galaxy::GalaxyDemo;
use materials::MaterialsDemo;
use textures::TexturesDemo;

use crate::pipelines::Pipelines;
use crate::scene::RenderScene;
use demo_core::{AppConfig, AssetRequest, DemoKind, FrameTime, ImageData, ParamSet, ParamValue, TextureDesc};

/// Borrowed GPU handles handed to demos for uploads.
pub(crate) struct RenderContext<'r> {
    pub(crate) device: &'r wgpu::Device,
    pub(crate) queue: &'r wgpu::Queue,
    pub(crate) pipelines: &'r Pipelines,
}

pub(crate) trait Demo {
    fn kind(&self) -> DemoKind;

    fn params(&self) -> &ParamSet;

    /// Validate, store and apply one panel value. Returns the value actually
    /// stored after snapping and clamping.
    fn set_param(
        &mut self,
        ctx: &RenderContext<'_>,
        name: &str,
        value: ParamValue,
    ) -> Result<ParamValue, demo_core::DemoError>;

    fn asset_requests(&self) -> Vec<AssetRequest> {
        Vec::new()
    }

    /// Returns false when no material of this demo samples the slot.
    fn install_texture(
        &mut self,
        _ctx: &RenderContext<'_>,
        _desc: &TextureDesc,
        _image: &ImageData,
    ) -> bool {
        false
    }

    fn animate(&mut self, _ctx: &RenderContext<'_>, _time: &FrameTime) {}

    fn scene(&self) -> &RenderScene;

    /// Draw the environment behind the scene once it has loaded.
    fn shows_environment(&self) -> bool {
        false
    }
}

pub(crate) fn build(kind: DemoKind, ctx: &RenderContext<'_>, config: &AppConfig) -> Box<dyn Demo> {
    match kind {
        DemoKind::Galaxy => Box::new(GalaxyDemo::new(ctx, config.seed)),
        DemoKind::Materials => Box::new(MaterialsDemo::new(ctx)),
        DemoKind::Textures => Box::new(TexturesDemo::new(ctx)),
    }
}
