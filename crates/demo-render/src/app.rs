//! `DemoApp`: one running demo bound to a surface.
//!
//! The app is the lifecycle hook set of an [`Experience`](demo_core::Experience):
//! `resize` updates the viewport, camera and surface together, and `update`
//! drives one [`FrameLoop`] step (animate, ease controls, render).

use crate::demos::{self, Demo, RenderContext};
use crate::gpu::GpuState;
use crate::helpers;
use crate::pipelines::Pipelines;
use crate::textures::EnvironmentMap;
use crate::uniforms::FrameUniforms;
use demo_core::{
    apply_resize, AppConfig, AssetRequest, DemoError, DemoKind, FrameLoop, FrameStages, FrameTime,
    HdrImage, ImageData, LifecycleHooks, OrbitControls, ParamSet, ParamValue, PerspectiveCamera,
    TextureDesc, Viewport, CLEAR_COLOR,
};

pub struct DemoApp<'a> {
    frame_loop: FrameLoop,
    viewport: Viewport,
    stages: Stages<'a>,
}

/// Everything a frame touches, split out so the loop can borrow it mutably.
struct Stages<'a> {
    gpu: GpuState<'a>,
    pipelines: Pipelines,
    camera: PerspectiveCamera,
    controls: OrbitControls,
    frame_uniforms: wgpu::Buffer,
    frame_bg: wgpu::BindGroup,
    environment: EnvironmentMap,
    demo: Box<dyn Demo>,
    time: FrameTime,
    surface_lost: bool,
}

impl<'a> DemoApp<'a> {
    pub async fn new(
        target: impl Into<wgpu::SurfaceTarget<'a>>,
        viewport: Viewport,
        config: &AppConfig,
    ) -> anyhow::Result<Self> {
        let gpu = GpuState::new(target, viewport).await?;
        let pipelines = Pipelines::new(&gpu.device, gpu.format());
        let environment = EnvironmentMap::placeholder(&gpu.device, &gpu.queue);

        let camera = PerspectiveCamera::with_defaults(viewport.aspect(), config.demo.camera_position());
        let controls = OrbitControls::new(&camera);

        let frame_uniforms = helpers::uniform_buffer(
            &gpu.device,
            "frame_uniforms",
            &FrameUniforms::new(
                &camera,
                gpu.physical_size(),
                gpu.pixel_ratio(),
                0.0,
                environment.info,
            ),
        );
        let frame_bg = build_frame_bind_group(&gpu.device, &pipelines, &frame_uniforms, &environment);

        let demo = {
            let ctx = RenderContext {
                device: &gpu.device,
                queue: &gpu.queue,
                pipelines: &pipelines,
            };
            demos::build(config.demo, &ctx, config)
        };
        log::info!("[app] {} demo ready", demo.kind());

        let mut app = Self {
            frame_loop: FrameLoop::new(),
            viewport,
            stages: Stages {
                gpu,
                pipelines,
                camera,
                controls,
                frame_uniforms,
                frame_bg,
                environment,
                demo,
                time: FrameTime::default(),
                surface_lost: false,
            },
        };
        for (name, text) in &config.overrides {
            if let Err(e) = app.set_param_text(name, text) {
                log::warn!("[params] ignoring {}={}: {}", name, text, e);
            }
        }
        Ok(app)
    }

    /// Begin rendering on the next `update`.
    pub fn start(&mut self) -> bool {
        self.frame_loop.start()
    }

    pub fn kind(&self) -> DemoKind {
        self.stages.demo.kind()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.stages.camera
    }

    pub fn controls_mut(&mut self) -> &mut OrbitControls {
        &mut self.stages.controls
    }

    pub fn frame_loop(&self) -> &FrameLoop {
        &self.frame_loop
    }

    /// Set after the device ran out of memory; the owner should stop.
    pub fn is_surface_lost(&self) -> bool {
        self.stages.surface_lost
    }

    pub fn params(&self) -> &ParamSet {
        self.stages.demo.params()
    }

    pub fn set_param(&mut self, name: &str, value: ParamValue) -> Result<ParamValue, DemoError> {
        let s = &mut self.stages;
        let ctx = RenderContext {
            device: &s.gpu.device,
            queue: &s.gpu.queue,
            pipelines: &s.pipelines,
        };
        let stored = s.demo.set_param(&ctx, name, value)?;
        log::debug!("[params] {} = {:?}", name, stored);
        Ok(stored)
    }

    /// Parse `text` according to the control's kind, then [`set_param`](Self::set_param).
    pub fn set_param_text(&mut self, name: &str, text: &str) -> Result<ParamValue, DemoError> {
        let control = self
            .params()
            .control(name)
            .ok_or_else(|| DemoError::UnknownParam(name.to_string()))?;
        let value = control.parse(text)?;
        self.set_param(name, value)
    }

    pub fn asset_requests(&self) -> Vec<AssetRequest> {
        self.stages.demo.asset_requests()
    }

    /// Decode and bind a fetched texture.
    pub fn install_texture(&mut self, desc: &TextureDesc, bytes: &[u8]) -> anyhow::Result<()> {
        let image = ImageData::from_bytes(bytes)?;
        let s = &mut self.stages;
        let ctx = RenderContext {
            device: &s.gpu.device,
            queue: &s.gpu.queue,
            pipelines: &s.pipelines,
        };
        if s.demo.install_texture(&ctx, desc, &image) {
            log::info!("[assets] {} ({}x{})", desc.path, image.width, image.height);
        } else {
            log::debug!("[assets] {} loaded, no material samples {}", desc.path, desc.slot.name());
        }
        Ok(())
    }

    /// Decode an equirectangular HDR and use it as background and lighting.
    pub fn install_environment(&mut self, path: &str, bytes: &[u8]) -> anyhow::Result<()> {
        let hdr = HdrImage::from_bytes(bytes)?;
        let s = &mut self.stages;
        s.environment = EnvironmentMap::from_hdr(&s.gpu.device, &s.gpu.queue, &hdr);
        s.frame_bg = build_frame_bind_group(&s.gpu.device, &s.pipelines, &s.frame_uniforms, &s.environment);
        log::info!(
            "[assets] {} ({}x{}, {} mips)",
            path,
            hdr.width,
            hdr.height,
            s.environment.info.mip_count
        );
        Ok(())
    }

    /// Install whatever a request resolved to.
    pub fn install_asset(&mut self, request: &AssetRequest, bytes: &[u8]) -> anyhow::Result<()> {
        match request {
            AssetRequest::Texture(desc) => self.install_texture(desc, bytes),
            AssetRequest::Environment(path) => self.install_environment(path, bytes),
        }
    }

    /// Pointer drag in CSS pixels.
    pub fn orbit(&mut self, dx: f32, dy: f32) {
        let h = self.viewport.height as f32;
        self.stages.controls.rotate_by_pixels(dx, dy, h);
    }

    pub fn pan(&mut self, dx: f32, dy: f32) {
        let h = self.viewport.height as f32;
        let s = &mut self.stages;
        s.controls.pan(dx, dy, h, &s.camera);
    }

    pub fn zoom(&mut self, wheel_delta_y: f32) {
        self.stages.controls.zoom_by_wheel(wheel_delta_y);
    }
}

impl LifecycleHooks for DemoApp<'_> {
    fn resize(&mut self, viewport: &Viewport) {
        let s = &mut self.stages;
        apply_resize(
            &mut self.viewport,
            &mut s.camera,
            &mut s.gpu,
            viewport.width,
            viewport.height,
            viewport.device_pixel_ratio,
        );
        log::info!(
            "[resize] {}x{} (pixel ratio {})",
            viewport.width,
            viewport.height,
            self.viewport.pixel_ratio()
        );
    }

    fn update(&mut self, time: &FrameTime) {
        self.frame_loop.step(&mut self.stages, *time);
    }
}

impl FrameStages for Stages<'_> {
    type Error = wgpu::SurfaceError;

    fn animate(&mut self, time: &FrameTime) {
        self.time = *time;
        let ctx = RenderContext {
            device: &self.gpu.device,
            queue: &self.gpu.queue,
            pipelines: &self.pipelines,
        };
        self.demo.animate(&ctx, time);
    }

    fn update_controls(&mut self) {
        self.controls.update(&mut self.camera);
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let frame = match self.gpu.current_texture() {
            Ok(frame) => frame,
            Err(e) => {
                match e {
                    wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => self.gpu.reconfigure(),
                    wgpu::SurfaceError::OutOfMemory => self.surface_lost = true,
                    _ => {}
                }
                return Err(e);
            }
        };
        let uniforms = FrameUniforms::new(
            &self.camera,
            self.gpu.physical_size(),
            self.gpu.pixel_ratio(),
            self.time.elapsed,
            self.environment.info,
        );
        self.gpu
            .queue
            .write_buffer(&self.frame_uniforms, 0, bytemuck::bytes_of(&uniforms));

        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame_encoder"),
            });
        {
            let [r, g, b, a] = CLEAR_COLOR;
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.gpu.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            pass.set_bind_group(0, &self.frame_bg, &[]);
            if self.demo.shows_environment() && self.environment.info.mip_count > 0 {
                pass.set_pipeline(&self.pipelines.background);
                pass.draw(0..3, 0..1);
            }
            self.demo
                .scene()
                .draw(&mut pass, &self.pipelines, self.camera.position);
        }
        self.gpu.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

fn build_frame_bind_group(
    device: &wgpu::Device,
    pipelines: &Pipelines,
    uniforms: &wgpu::Buffer,
    environment: &EnvironmentMap,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("frame_bg"),
        layout: &pipelines.frame_bgl,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: uniforms.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::TextureView(environment.view()),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: wgpu::BindingResource::Sampler(&environment.sampler),
            },
        ],
    })
}
