use crate::mesh::{GpuMaterial, GpuMesh};
use crate::pipelines::Pipelines;
use crate::points::GpuPoints;
use demo_core::Scene;
use glam::Vec3;

pub enum RenderObject {
    Points(GpuPoints),
    Mesh(GpuMesh),
}

/// Drawable nodes plus the materials their meshes index into.
#[derive(Default)]
pub struct RenderScene {
    pub(crate) nodes: Scene<RenderObject>,
    materials: Vec<GpuMaterial>,
}

impl RenderScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add_material(&mut self, material: GpuMaterial) -> usize {
        self.materials.push(material);
        self.materials.len() - 1
    }

    pub fn material(&self, index: usize) -> Option<&GpuMaterial> {
        self.materials.get(index)
    }

    pub(crate) fn material_mut(&mut self, index: usize) -> Option<&mut GpuMaterial> {
        self.materials.get_mut(index)
    }

    pub fn nodes(&self) -> &Scene<RenderObject> {
        &self.nodes
    }

    pub(crate) fn meshes_mut(&mut self) -> impl Iterator<Item = &mut GpuMesh> {
        self.nodes.iter_mut().filter_map(|node| match node {
            RenderObject::Mesh(mesh) => Some(mesh),
            RenderObject::Points(_) => None,
        })
    }

    /// Opaque objects in insertion order, then blended meshes far to near.
    pub(crate) fn draw(&self, pass: &mut wgpu::RenderPass<'_>, pipelines: &Pipelines, eye: Vec3) {
        let mut blended: Vec<(f32, &GpuMesh, &GpuMaterial)> = Vec::new();
        for (_, node) in self.nodes.iter() {
            match node {
                RenderObject::Points(points) => points.draw(pass, pipelines),
                RenderObject::Mesh(mesh) => {
                    let Some(material) = self.materials.get(mesh.material) else {
                        continue;
                    };
                    if material.material().needs_blending() {
                        let distance = mesh.transform().position.distance_squared(eye);
                        blended.push((distance, mesh, material));
                    } else {
                        mesh.draw(pass, pipelines, material);
                    }
                }
            }
        }
        blended.sort_by(|a, b| b.0.total_cmp(&a.0));
        for (_, mesh, material) in blended {
            mesh.draw(pass, pipelines, material);
        }
    }
}
