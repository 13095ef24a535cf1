use super::{Demo, RenderContext};
use crate::mesh::{GpuMaterial, GpuMesh};
use crate::scene::{RenderObject, RenderScene};
use demo_core::{
    texture_showcase_set, AssetRequest, DemoError, DemoKind, ImageData, MapSlot, MeshData, MeshMaterial,
    ParamSet, ParamValue, TextureDesc, Transform,
};

/// A unit cube wearing the pixelated block texture.
pub struct TexturesDemo {
    controls: ParamSet,
    scene: RenderScene,
    material: usize,
}

impl TexturesDemo {
    pub(crate) fn new(ctx: &RenderContext<'_>) -> Self {
        let mut scene = RenderScene::new();
        let unlit = MeshMaterial::basic().with_map(MapSlot::Color);
        let material = scene.add_material(GpuMaterial::new(ctx.device, ctx.queue, ctx.pipelines, unlit));
        let cube = GpuMesh::new(
            ctx.device,
            ctx.pipelines,
            &MeshData::box_geometry(1.0, 1.0, 1.0),
            material,
            Transform::default(),
        );
        scene.nodes.add(RenderObject::Mesh(cube));
        Self {
            controls: ParamSet::new(),
            scene,
            material,
        }
    }
}

impl Demo for TexturesDemo {
    fn kind(&self) -> DemoKind {
        DemoKind::Textures
    }

    fn params(&self) -> &ParamSet {
        &self.controls
    }

    fn set_param(
        &mut self,
        _ctx: &RenderContext<'_>,
        name: &str,
        value: ParamValue,
    ) -> Result<ParamValue, DemoError> {
        self.controls.set(name, value)
    }

    fn asset_requests(&self) -> Vec<AssetRequest> {
        texture_showcase_set()
            .into_iter()
            .map(AssetRequest::Texture)
            .collect()
    }

    fn install_texture(&mut self, ctx: &RenderContext<'_>, desc: &TextureDesc, image: &ImageData) -> bool {
        match self.scene.material_mut(self.material) {
            Some(material) => material.install(ctx.device, ctx.queue, ctx.pipelines, desc, image),
            None => false,
        }
    }

    fn scene(&self) -> &RenderScene {
        &self.scene
    }
}
