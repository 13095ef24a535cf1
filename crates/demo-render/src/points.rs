use crate::helpers;
use crate::pipelines::Pipelines;
use crate::uniforms::PointsUniforms;
use demo_core::{PointCloud, PointsMaterial};
use wgpu::util::DeviceExt;

// Two triangles covering a unit square centred on the point.
const QUAD_CORNERS: [f32; 12] = [
    -0.5, -0.5, 0.5, -0.5, 0.5, 0.5, -0.5, -0.5, 0.5, 0.5, -0.5, 0.5,
];

/// A point cloud uploaded once; regenerating means building a new one.
pub struct GpuPoints {
    quad_vb: wgpu::Buffer,
    positions: wgpu::Buffer,
    colors: wgpu::Buffer,
    uniforms: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    material: PointsMaterial,
    count: u32,
}

impl GpuPoints {
    pub(crate) fn new(
        device: &wgpu::Device,
        pipelines: &Pipelines,
        cloud: &PointCloud,
        material: PointsMaterial,
    ) -> Self {
        let quad_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quad_vb"),
            contents: bytemuck::cast_slice(&QUAD_CORNERS),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let positions = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("point_positions"),
            contents: bytemuck::cast_slice(&cloud.positions),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let colors = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("point_colors"),
            contents: bytemuck::cast_slice(&cloud.colors),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let uniforms = helpers::uniform_buffer(device, "points_uniforms", &PointsUniforms::from(&material));
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("points_bg"),
            layout: &pipelines.points_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniforms.as_entire_binding(),
            }],
        });
        Self {
            quad_vb,
            positions,
            colors,
            uniforms,
            bind_group,
            material,
            count: cloud.len() as u32,
        }
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn material(&self) -> &PointsMaterial {
        &self.material
    }

    /// Expects group 0 (frame) to be bound already.
    pub(crate) fn draw(&self, pass: &mut wgpu::RenderPass<'_>, pipelines: &Pipelines) {
        if self.count == 0 {
            return;
        }
        let Some(pipeline) = pipelines.points(&self.material) else {
            return;
        };
        pass.set_pipeline(pipeline);
        pass.set_bind_group(1, &self.bind_group, &[]);
        pass.set_vertex_buffer(0, self.quad_vb.slice(..));
        pass.set_vertex_buffer(1, self.positions.slice(..));
        pass.set_vertex_buffer(2, self.colors.slice(..));
        pass.draw(0..6, 0..self.count);
    }
}

impl Drop for GpuPoints {
    fn drop(&mut self) {
        self.quad_vb.destroy();
        self.positions.destroy();
        self.colors.destroy();
        self.uniforms.destroy();
    }
}
