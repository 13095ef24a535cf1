//! GPU-side textures: uploaded maps, 1×1 fallbacks and the environment map.

use crate::helpers;
use crate::uniforms::EnvironmentInfo;
use demo_core::{ColorSpace, Filter, HdrImage, ImageData, MapSlot, TextureDesc, Wrap};

pub(crate) struct GpuTexture {
    texture: wgpu::Texture,
    pub(crate) view: wgpu::TextureView,
}

impl Drop for GpuTexture {
    fn drop(&mut self) {
        self.texture.destroy();
    }
}

fn rgba_format(color_space: ColorSpace) -> wgpu::TextureFormat {
    match color_space {
        ColorSpace::Srgb => wgpu::TextureFormat::Rgba8UnormSrgb,
        ColorSpace::Linear => wgpu::TextureFormat::Rgba8Unorm,
    }
}

fn write_level(
    queue: &wgpu::Queue,
    texture: &wgpu::Texture,
    mip_level: u32,
    data: &[u8],
    bytes_per_texel: u32,
    width: u32,
    height: u32,
) {
    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture,
            mip_level,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        data,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(bytes_per_texel * width),
            rows_per_image: Some(height),
        },
        wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
    );
}

/// Upload an RGBA8 image, with a CPU-built mip chain unless the descriptor
/// opts out.
pub(crate) fn upload_image(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    desc: &TextureDesc,
    image: &ImageData,
) -> GpuTexture {
    let srgb = desc.color_space == ColorSpace::Srgb;
    let levels = if desc.generate_mipmaps {
        image.mip_chain(srgb)
    } else {
        vec![image.clone()]
    };
    let (texture, view) = helpers::create_texture(
        device,
        desc.path,
        image.width,
        image.height,
        levels.len() as u32,
        rgba_format(desc.color_space),
        wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
    );
    for (level, data) in levels.iter().enumerate() {
        write_level(queue, &texture, level as u32, &data.data, 4, data.width, data.height);
    }
    GpuTexture { texture, view }
}

/// Neutral 1×1 stand-in shown until a map finishes loading.
pub(crate) fn fallback(device: &wgpu::Device, queue: &wgpu::Queue, slot: MapSlot) -> GpuTexture {
    let image = ImageData::solid_color(slot.fallback_texel());
    let (texture, view) = helpers::create_texture(
        device,
        slot.name(),
        1,
        1,
        1,
        rgba_format(slot.color_space()),
        wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
    );
    write_level(queue, &texture, 0, &image.data, 4, 1, 1);
    GpuTexture { texture, view }
}

fn filter_mode(filter: Filter) -> wgpu::FilterMode {
    match filter {
        Filter::Nearest => wgpu::FilterMode::Nearest,
        Filter::Linear => wgpu::FilterMode::Linear,
    }
}

fn address_mode(wrap: Wrap) -> wgpu::AddressMode {
    match wrap {
        Wrap::ClampToEdge => wgpu::AddressMode::ClampToEdge,
        Wrap::Repeat => wgpu::AddressMode::Repeat,
        Wrap::MirroredRepeat => wgpu::AddressMode::MirrorRepeat,
    }
}

pub(crate) fn sampler_for(device: &wgpu::Device, desc: &TextureDesc) -> wgpu::Sampler {
    device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("map_sampler"),
        address_mode_u: address_mode(desc.wrap_s),
        address_mode_v: address_mode(desc.wrap_t),
        address_mode_w: wgpu::AddressMode::ClampToEdge,
        mag_filter: filter_mode(desc.mag_filter),
        min_filter: filter_mode(desc.min_filter),
        mipmap_filter: if desc.generate_mipmaps {
            wgpu::FilterMode::Linear
        } else {
            wgpu::FilterMode::Nearest
        },
        ..Default::default()
    })
}

/// Equirectangular radiance in `Rgb9e5Ufloat`, one mip per roughness step.
pub(crate) struct EnvironmentMap {
    texture: GpuTexture,
    pub(crate) sampler: wgpu::Sampler,
    pub(crate) info: EnvironmentInfo,
}

impl EnvironmentMap {
    /// Black 1×1 placeholder; `mip_count` 0 tells the shaders there is no
    /// lighting yet.
    pub(crate) fn placeholder(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        let hdr = HdrImage {
            data: vec![0.0; 3],
            width: 1,
            height: 1,
        };
        let mut env = Self::from_hdr(device, queue, &hdr);
        env.info = EnvironmentInfo::default();
        env
    }

    pub(crate) fn from_hdr(device: &wgpu::Device, queue: &wgpu::Queue, hdr: &HdrImage) -> Self {
        let levels = hdr.mip_chain();
        let (texture, view) = helpers::create_texture(
            device,
            "environment_map",
            hdr.width,
            hdr.height,
            levels.len() as u32,
            wgpu::TextureFormat::Rgb9e5Ufloat,
            wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        );
        for (level, image) in levels.iter().enumerate() {
            let packed = image.to_rgb9e5();
            write_level(
                queue,
                &texture,
                level as u32,
                bytemuck::cast_slice(&packed),
                4,
                image.width,
                image.height,
            );
        }
        // longitude wraps, latitude clamps at the poles
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("env_sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        Self {
            texture: GpuTexture { texture, view },
            sampler,
            info: EnvironmentInfo {
                average: hdr.average(),
                mip_count: levels.len() as u32,
            },
        }
    }

    pub(crate) fn view(&self) -> &wgpu::TextureView {
        &self.texture.view
    }
}
