//! Bind group layouts and every render pipeline the demos draw with.
//!
//! Group 0 is shared: frame uniforms plus the environment texture and sampler.
//! Points add group 1 (point uniforms); meshes add group 1 (material) and
//! group 2 (object transform).

use crate::helpers;
use demo_core::{Blending, MeshMaterial, PointsMaterial, Side, BACKGROUND_WGSL, MESH_WGSL, POINTS_WGSL};

const QUAD_STRIDE: u64 = 2 * 4;
const VEC3_STRIDE: u64 = 3 * 4;

pub(crate) struct Pipelines {
    pub(crate) frame_bgl: wgpu::BindGroupLayout,
    pub(crate) points_bgl: wgpu::BindGroupLayout,
    pub(crate) material_bgl: wgpu::BindGroupLayout,
    pub(crate) object_bgl: wgpu::BindGroupLayout,
    pub(crate) background: wgpu::RenderPipeline,
    points: Vec<(PointsKey, wgpu::RenderPipeline)>,
    meshes: Vec<(MeshKey, wgpu::RenderPipeline)>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct PointsKey {
    blending: Blending,
    depth_write: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct MeshKey {
    lines: bool,
    blend: bool,
    side: Side,
}

impl PointsKey {
    fn of(material: &PointsMaterial) -> Self {
        Self {
            blending: material.blending,
            depth_write: material.depth_write,
        }
    }
}

impl MeshKey {
    fn of(material: &MeshMaterial) -> Self {
        Self {
            lines: material.wireframe,
            blend: material.needs_blending(),
            // culling is meaningless for line lists
            side: if material.wireframe {
                Side::Double
            } else {
                material.side
            },
        }
    }
}

impl Pipelines {
    pub(crate) fn new(device: &wgpu::Device, format: wgpu::TextureFormat) -> Self {
        let frame_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("frame_bgl"),
            entries: &[
                helpers::uniform_entry(0, wgpu::ShaderStages::VERTEX_FRAGMENT),
                helpers::texture_entry(1),
                helpers::sampler_entry(2),
            ],
        });
        let points_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("points_bgl"),
            entries: &[helpers::uniform_entry(0, wgpu::ShaderStages::VERTEX)],
        });
        let material_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("material_bgl"),
            entries: &[
                helpers::uniform_entry(0, wgpu::ShaderStages::VERTEX_FRAGMENT),
                helpers::texture_entry(1),
                helpers::texture_entry(2),
                helpers::texture_entry(3),
                helpers::texture_entry(4),
                helpers::texture_entry(5),
                helpers::texture_entry(6),
                helpers::sampler_entry(7),
            ],
        });
        let object_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("object_bgl"),
            entries: &[helpers::uniform_entry(0, wgpu::ShaderStages::VERTEX)],
        });

        let background_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("background_shader"),
            source: wgpu::ShaderSource::Wgsl(BACKGROUND_WGSL.into()),
        });
        let background_pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("background_pl"),
            bind_group_layouts: &[&frame_bgl],
            push_constant_ranges: &[],
        });
        let background = helpers::make_fullscreen_pipeline(
            device,
            &background_pl,
            &background_shader,
            "fs_background",
            format,
        );

        let points_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("points_shader"),
            source: wgpu::ShaderSource::Wgsl(POINTS_WGSL.into()),
        });
        let points_pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("points_pl"),
            bind_group_layouts: &[&frame_bgl, &points_bgl],
            push_constant_ranges: &[],
        });
        let mut points = Vec::new();
        for blending in [Blending::Normal, Blending::Additive] {
            for depth_write in [false, true] {
                let key = PointsKey {
                    blending,
                    depth_write,
                };
                let pipeline = make_points_pipeline(device, &points_pl, &points_shader, format, key);
                points.push((key, pipeline));
            }
        }

        let mesh_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("mesh_shader"),
            source: wgpu::ShaderSource::Wgsl(MESH_WGSL.into()),
        });
        let mesh_pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("mesh_pl"),
            bind_group_layouts: &[&frame_bgl, &material_bgl, &object_bgl],
            push_constant_ranges: &[],
        });
        let mut meshes = Vec::new();
        for blend in [false, true] {
            for side in [Side::Front, Side::Back, Side::Double] {
                let key = MeshKey {
                    lines: false,
                    blend,
                    side,
                };
                meshes.push((key, make_mesh_pipeline(device, &mesh_pl, &mesh_shader, format, key)));
            }
            let key = MeshKey {
                lines: true,
                blend,
                side: Side::Double,
            };
            meshes.push((key, make_mesh_pipeline(device, &mesh_pl, &mesh_shader, format, key)));
        }

        Self {
            frame_bgl,
            points_bgl,
            material_bgl,
            object_bgl,
            background,
            points,
            meshes,
        }
    }

    pub(crate) fn points(&self, material: &PointsMaterial) -> Option<&wgpu::RenderPipeline> {
        let key = PointsKey::of(material);
        self.points.iter().find(|(k, _)| *k == key).map(|(_, p)| p)
    }

    pub(crate) fn mesh(&self, material: &MeshMaterial) -> Option<&wgpu::RenderPipeline> {
        let key = MeshKey::of(material);
        self.meshes.iter().find(|(k, _)| *k == key).map(|(_, p)| p)
    }
}

fn make_points_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    format: wgpu::TextureFormat,
    key: PointsKey,
) -> wgpu::RenderPipeline {
    let blend = match key.blending {
        Blending::Normal => wgpu::BlendState::ALPHA_BLENDING,
        Blending::Additive => {
            let add = wgpu::BlendComponent {
                src_factor: wgpu::BlendFactor::SrcAlpha,
                dst_factor: wgpu::BlendFactor::One,
                operation: wgpu::BlendOperation::Add,
            };
            wgpu::BlendState {
                color: add,
                alpha: add,
            }
        }
    };
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("points_pipeline"),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &[
                wgpu::VertexBufferLayout {
                    array_stride: QUAD_STRIDE,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &[wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x2,
                        offset: 0,
                        shader_location: 0,
                    }],
                },
                wgpu::VertexBufferLayout {
                    array_stride: VEC3_STRIDE,
                    step_mode: wgpu::VertexStepMode::Instance,
                    attributes: &[wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x3,
                        offset: 0,
                        shader_location: 1,
                    }],
                },
                wgpu::VertexBufferLayout {
                    array_stride: VEC3_STRIDE,
                    step_mode: wgpu::VertexStepMode::Instance,
                    attributes: &[wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x3,
                        offset: 0,
                        shader_location: 2,
                    }],
                },
            ],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: Some(helpers::depth_state(key.depth_write)),
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(blend),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    })
}

fn make_mesh_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    format: wgpu::TextureFormat,
    key: MeshKey,
) -> wgpu::RenderPipeline {
    let topology = if key.lines {
        wgpu::PrimitiveTopology::LineList
    } else {
        wgpu::PrimitiveTopology::TriangleList
    };
    let cull_mode = match key.side {
        Side::Front => Some(wgpu::Face::Back),
        Side::Back => Some(wgpu::Face::Front),
        Side::Double => None,
    };
    let float_attr = |format, location| wgpu::VertexAttribute {
        format,
        offset: 0,
        shader_location: location,
    };
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(if key.lines { "mesh_lines_pipeline" } else { "mesh_pipeline" }),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &[
                wgpu::VertexBufferLayout {
                    array_stride: VEC3_STRIDE,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &[float_attr(wgpu::VertexFormat::Float32x3, 0)],
                },
                wgpu::VertexBufferLayout {
                    array_stride: VEC3_STRIDE,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &[float_attr(wgpu::VertexFormat::Float32x3, 1)],
                },
                wgpu::VertexBufferLayout {
                    array_stride: QUAD_STRIDE,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &[float_attr(wgpu::VertexFormat::Float32x2, 2)],
                },
            ],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState {
            topology,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode,
            ..Default::default()
        },
        depth_stencil: Some(helpers::depth_state(true)),
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: key.blend.then_some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    })
}
