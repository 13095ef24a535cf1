use crate::helpers;
use crate::pipelines::Pipelines;
use crate::textures::{self, GpuTexture};
use crate::uniforms::{MaterialUniforms, ObjectUniforms};
use demo_core::{ImageData, MapSlot, MeshData, MeshMaterial, TextureDesc, Transform};
use glam::Mat3;
use wgpu::util::DeviceExt;

/// Map slots the mesh shader samples, in binding order (bindings 1..=6).
pub(crate) const SHADER_SLOTS: [MapSlot; 6] = [
    MapSlot::Color,
    MapSlot::Alpha,
    MapSlot::AmbientOcclusion,
    MapSlot::Roughness,
    MapSlot::Metalness,
    MapSlot::Normal,
];

pub struct GpuGeometry {
    positions: wgpu::Buffer,
    normals: wgpu::Buffer,
    uvs: wgpu::Buffer,
    triangles: wgpu::Buffer,
    lines: wgpu::Buffer,
    triangle_index_count: u32,
    line_index_count: u32,
}

impl GpuGeometry {
    pub(crate) fn new(device: &wgpu::Device, data: &MeshData) -> Self {
        let vertex = |label: &str, contents: &[u8]| {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents,
                usage: wgpu::BufferUsages::VERTEX,
            })
        };
        let index = |label: &str, contents: &[u32]| {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: bytemuck::cast_slice(contents),
                usage: wgpu::BufferUsages::INDEX,
            })
        };
        let wireframe = data.wireframe_indices();
        Self {
            positions: vertex("mesh_positions", bytemuck::cast_slice(&data.positions)),
            normals: vertex("mesh_normals", bytemuck::cast_slice(&data.normals)),
            uvs: vertex("mesh_uvs", bytemuck::cast_slice(&data.uvs)),
            triangles: index("mesh_triangles", &data.indices),
            lines: index("mesh_lines", &wireframe),
            triangle_index_count: data.indices.len() as u32,
            line_index_count: wireframe.len() as u32,
        }
    }
}

impl Drop for GpuGeometry {
    fn drop(&mut self) {
        self.positions.destroy();
        self.normals.destroy();
        self.uvs.destroy();
        self.triangles.destroy();
        self.lines.destroy();
    }
}

/// A mesh material plus its textures, shared by every mesh that uses it.
pub struct GpuMaterial {
    material: MeshMaterial,
    uniforms: wgpu::Buffer,
    fallbacks: Vec<GpuTexture>,
    maps: Vec<Option<GpuTexture>>,
    // the color map's descriptor drives sampling and the UV transform
    color_desc: Option<TextureDesc>,
    sampler: wgpu::Sampler,
    bind_group: wgpu::BindGroup,
}

impl GpuMaterial {
    pub(crate) fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        pipelines: &Pipelines,
        material: MeshMaterial,
    ) -> Self {
        let uniforms = helpers::uniform_buffer(
            device,
            "material_uniforms",
            &MaterialUniforms::new(&material, Mat3::IDENTITY),
        );
        let fallbacks: Vec<_> = SHADER_SLOTS
            .iter()
            .map(|&slot| textures::fallback(device, queue, slot))
            .collect();
        let sampler = textures::sampler_for(device, &TextureDesc::new("", MapSlot::Color));
        let maps: Vec<Option<GpuTexture>> = SHADER_SLOTS.iter().map(|_| None).collect();
        let bind_group = build_bind_group(device, pipelines, &uniforms, &fallbacks, &maps, &sampler);
        Self {
            material,
            uniforms,
            fallbacks,
            maps,
            color_desc: None,
            sampler,
            bind_group,
        }
    }

    pub fn material(&self) -> &MeshMaterial {
        &self.material
    }

    /// Edit the material and push the new values to the GPU.
    pub(crate) fn update(&mut self, queue: &wgpu::Queue, edit: impl FnOnce(&mut MeshMaterial)) {
        edit(&mut self.material);
        self.write_uniforms(queue);
    }

    fn write_uniforms(&self, queue: &wgpu::Queue) {
        let uv = self
            .color_desc
            .as_ref()
            .map(TextureDesc::uv_transform)
            .unwrap_or(Mat3::IDENTITY);
        let u = MaterialUniforms::new(&self.material, uv);
        queue.write_buffer(&self.uniforms, 0, bytemuck::bytes_of(&u));
    }

    /// Bind a loaded image. Returns `false` when the material does not sample
    /// that slot; the image is then dropped.
    pub(crate) fn install(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        pipelines: &Pipelines,
        desc: &TextureDesc,
        image: &ImageData,
    ) -> bool {
        let Some(index) = SHADER_SLOTS.iter().position(|&s| s == desc.slot) else {
            return false;
        };
        if !self.material.has_map(desc.slot) {
            return false;
        }
        self.maps[index] = Some(textures::upload_image(device, queue, desc, image));
        if desc.slot == MapSlot::Color {
            self.sampler = textures::sampler_for(device, desc);
            self.color_desc = Some(desc.clone());
            self.write_uniforms(queue);
        }
        self.bind_group = build_bind_group(
            device,
            pipelines,
            &self.uniforms,
            &self.fallbacks,
            &self.maps,
            &self.sampler,
        );
        true
    }
}

impl Drop for GpuMaterial {
    fn drop(&mut self) {
        self.uniforms.destroy();
    }
}

fn build_bind_group(
    device: &wgpu::Device,
    pipelines: &Pipelines,
    uniforms: &wgpu::Buffer,
    fallbacks: &[GpuTexture],
    maps: &[Option<GpuTexture>],
    sampler: &wgpu::Sampler,
) -> wgpu::BindGroup {
    let mut entries = vec![wgpu::BindGroupEntry {
        binding: 0,
        resource: uniforms.as_entire_binding(),
    }];
    for (i, (map, fallback)) in maps.iter().zip(fallbacks).enumerate() {
        let texture = map.as_ref().unwrap_or(fallback);
        entries.push(wgpu::BindGroupEntry {
            binding: i as u32 + 1,
            resource: wgpu::BindingResource::TextureView(&texture.view),
        });
    }
    entries.push(wgpu::BindGroupEntry {
        binding: SHADER_SLOTS.len() as u32 + 1,
        resource: wgpu::BindingResource::Sampler(sampler),
    });
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("material_bg"),
        layout: &pipelines.material_bgl,
        entries: &entries,
    })
}

/// Geometry placed in the world with a material index into the owning scene.
pub struct GpuMesh {
    geometry: GpuGeometry,
    pub(crate) material: usize,
    transform: Transform,
    uniforms: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl GpuMesh {
    pub(crate) fn new(
        device: &wgpu::Device,
        pipelines: &Pipelines,
        data: &MeshData,
        material: usize,
        transform: Transform,
    ) -> Self {
        let uniforms =
            helpers::uniform_buffer(device, "object_uniforms", &ObjectUniforms::from(&transform));
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("object_bg"),
            layout: &pipelines.object_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniforms.as_entire_binding(),
            }],
        });
        Self {
            geometry: GpuGeometry::new(device, data),
            material,
            transform,
            uniforms,
            bind_group,
        }
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub(crate) fn set_transform(&mut self, queue: &wgpu::Queue, transform: Transform) {
        self.transform = transform;
        queue.write_buffer(
            &self.uniforms,
            0,
            bytemuck::bytes_of(&ObjectUniforms::from(&transform)),
        );
    }

    /// Expects group 0 (frame) to be bound already.
    pub(crate) fn draw(
        &self,
        pass: &mut wgpu::RenderPass<'_>,
        pipelines: &Pipelines,
        material: &GpuMaterial,
    ) {
        let wireframe = material.material.wireframe;
        let (buffer, count) = if wireframe {
            (&self.geometry.lines, self.geometry.line_index_count)
        } else {
            (&self.geometry.triangles, self.geometry.triangle_index_count)
        };
        if count == 0 {
            return;
        }
        let Some(pipeline) = pipelines.mesh(&material.material) else {
            return;
        };
        pass.set_pipeline(pipeline);
        pass.set_bind_group(1, &material.bind_group, &[]);
        pass.set_bind_group(2, &self.bind_group, &[]);
        pass.set_vertex_buffer(0, self.geometry.positions.slice(..));
        pass.set_vertex_buffer(1, self.geometry.normals.slice(..));
        pass.set_vertex_buffer(2, self.geometry.uvs.slice(..));
        pass.set_index_buffer(buffer.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..count, 0, 0..1);
    }
}

impl Drop for GpuMesh {
    fn drop(&mut self) {
        self.uniforms.destroy();
    }
}
