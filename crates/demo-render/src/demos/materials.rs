use super::{Demo, RenderContext};
use crate::mesh::{GpuMaterial, GpuMesh};
use crate::scene::{RenderObject, RenderScene};
use demo_core::{
    material_param_set, material_showcase_set, showcase_rotation, AssetRequest, DemoError, DemoKind,
    FrameTime, ImageData, MeshData, MeshMaterial, ParamSet, ParamValue, TextureDesc, Transform,
    ENVIRONMENT_MAP_PATH, PARAM_METALNESS, PARAM_ROUGHNESS, PARAM_WIREFRAME,
};
use glam::Vec3;

/// Sphere, plane and torus sharing one physical door material, lit by the
/// HDR environment and spinning slowly.
pub struct MaterialsDemo {
    controls: ParamSet,
    scene: RenderScene,
    material: usize,
}

impl MaterialsDemo {
    pub(crate) fn new(ctx: &RenderContext<'_>) -> Self {
        let door = MeshMaterial::door_physical();
        let controls = material_param_set(door.metalness, door.roughness, door.wireframe);

        let mut scene = RenderScene::new();
        let material = scene.add_material(GpuMaterial::new(ctx.device, ctx.queue, ctx.pipelines, door));
        let shapes = [
            (MeshData::sphere(0.5, 16, 16), Vec3::new(-1.5, 0.0, 0.0)),
            (MeshData::plane(1.0, 1.0, 100, 100), Vec3::ZERO),
            (MeshData::torus(0.3, 0.2, 16, 32), Vec3::new(1.5, 0.0, 0.0)),
        ];
        for (data, position) in shapes {
            let mesh = GpuMesh::new(ctx.device, ctx.pipelines, &data, material, Transform::at(position));
            scene.nodes.add(RenderObject::Mesh(mesh));
        }

        Self {
            controls,
            scene,
            material,
        }
    }
}

impl Demo for MaterialsDemo {
    fn kind(&self) -> DemoKind {
        DemoKind::Materials
    }

    fn params(&self) -> &ParamSet {
        &self.controls
    }

    fn set_param(
        &mut self,
        ctx: &RenderContext<'_>,
        name: &str,
        value: ParamValue,
    ) -> Result<ParamValue, DemoError> {
        let stored = self.controls.set(name, value)?;
        if let Some(material) = self.scene.material_mut(self.material) {
            material.update(ctx.queue, |m| match (name, stored) {
                (PARAM_METALNESS, ParamValue::Number(v)) => m.metalness = v as f32,
                (PARAM_ROUGHNESS, ParamValue::Number(v)) => m.roughness = v as f32,
                (PARAM_WIREFRAME, ParamValue::Toggle(on)) => m.wireframe = on,
                _ => {}
            });
        }
        Ok(stored)
    }

    fn asset_requests(&self) -> Vec<AssetRequest> {
        let mut requests: Vec<_> = material_showcase_set()
            .into_iter()
            .map(AssetRequest::Texture)
            .collect();
        requests.push(AssetRequest::Environment(ENVIRONMENT_MAP_PATH));
        requests
    }

    fn install_texture(&mut self, ctx: &RenderContext<'_>, desc: &TextureDesc, image: &ImageData) -> bool {
        match self.scene.material_mut(self.material) {
            Some(material) => material.install(ctx.device, ctx.queue, ctx.pipelines, desc, image),
            None => false,
        }
    }

    fn animate(&mut self, ctx: &RenderContext<'_>, time: &FrameTime) {
        let rotation = showcase_rotation(time.elapsed);
        for mesh in self.scene.meshes_mut() {
            let transform = Transform {
                rotation,
                ..*mesh.transform()
            };
            mesh.set_transform(ctx.queue, transform);
        }
    }

    fn scene(&self) -> &RenderScene {
        &self.scene
    }

    fn shows_environment(&self) -> bool {
        true
    }
}
