use crate::helpers;
use demo_core::{RenderTarget, Viewport};

/// Surface, device and depth buffer. Sized in CSS pixels times the capped
/// pixel ratio; the renderer never touches the CSS size itself.
pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    pub(crate) device: wgpu::Device,
    pub(crate) queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    depth_tex: wgpu::Texture,
    pub(crate) depth_view: wgpu::TextureView,
    css_width: u32,
    css_height: u32,
    pixel_ratio: f64,
    max_dimension: u32,
}

impl<'a> GpuState<'a> {
    pub async fn new(
        target: impl Into<wgpu::SurfaceTarget<'a>>,
        viewport: Viewport,
    ) -> anyhow::Result<Self> {
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(target)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Default limits keep older WebGPU implementations happy
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let max_dimension = device.limits().max_texture_dimension_2d;
        let (width, height) = viewport.physical_size_within(max_dimension);
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("Surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        let (depth_tex, depth_view) = helpers::create_depth_texture(&device, width, height);
        log::info!("[gpu] surface {}x{} {:?}", width, height, format);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            depth_tex,
            depth_view,
            css_width: viewport.width,
            css_height: viewport.height,
            pixel_ratio: viewport.pixel_ratio(),
            max_dimension,
        })
    }

    pub fn format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    pub fn physical_size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    pub fn pixel_ratio(&self) -> f64 {
        self.pixel_ratio
    }

    /// Reconfigure after a lost or outdated surface.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    pub(crate) fn current_texture(&self) -> Result<wgpu::SurfaceTexture, wgpu::SurfaceError> {
        self.surface.get_current_texture()
    }

    fn resize_if_needed(&mut self) {
        let (width, height) = Viewport::new(self.css_width, self.css_height, self.pixel_ratio)
            .physical_size_within(self.max_dimension);
        if width == self.config.width && height == self.config.height {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.depth_tex.destroy();
        (self.depth_tex, self.depth_view) =
            helpers::create_depth_texture(&self.device, width, height);
        log::debug!("[gpu] reconfigured {}x{}", width, height);
    }
}

impl RenderTarget for GpuState<'_> {
    fn set_size(&mut self, width: u32, height: u32) {
        self.css_width = width;
        self.css_height = height;
        self.resize_if_needed();
    }

    fn set_pixel_ratio(&mut self, pixel_ratio: f64) {
        self.pixel_ratio = pixel_ratio;
        self.resize_if_needed();
    }

    fn resize(&mut self, width: u32, height: u32, pixel_ratio: f64) {
        self.css_width = width;
        self.css_height = height;
        self.pixel_ratio = pixel_ratio;
        self.resize_if_needed();
    }
}
