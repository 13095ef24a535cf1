//! Decoded image buffers ready for upload.

use crate::color::{linear_to_srgb, srgb_to_linear};
use crate::error::Result;

/// Tightly packed RGBA8 pixels, rows top to bottom.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageData {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl ImageData {
    /// Decode PNG or JPEG bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let rgba = image::load_from_memory(bytes)?.to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(Self {
            data: rgba.into_raw(),
            width,
            height,
        })
    }

    pub fn solid_color(texel: [u8; 4]) -> Self {
        Self {
            data: texel.to_vec(),
            width: 1,
            height: 1,
        }
    }

    pub fn texel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = ((y * self.width + x) * 4) as usize;
        [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]]
    }

    /// Full mip chain down to 1×1, level 0 first. Each level is a 2×2 box
    /// filter of the previous one (edge texels repeat on odd sizes). With
    /// `srgb` set, color channels are averaged in linear space.
    pub fn mip_chain(&self, srgb: bool) -> Vec<ImageData> {
        let mut levels = vec![self.clone()];
        loop {
            let prev = &levels[levels.len() - 1];
            if prev.width == 1 && prev.height == 1 {
                break;
            }
            let next = prev.downsample(srgb);
            levels.push(next);
        }
        levels
    }

    fn downsample(&self, srgb: bool) -> ImageData {
        let width = (self.width / 2).max(1);
        let height = (self.height / 2).max(1);
        let mut data = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                let x0 = (x * 2).min(self.width - 1);
                let x1 = (x * 2 + 1).min(self.width - 1);
                let y0 = (y * 2).min(self.height - 1);
                let y1 = (y * 2 + 1).min(self.height - 1);
                let quad = [
                    self.texel(x0, y0),
                    self.texel(x1, y0),
                    self.texel(x0, y1),
                    self.texel(x1, y1),
                ];
                for c in 0..4 {
                    let encoded = srgb && c < 3;
                    let sum: f32 = quad
                        .iter()
                        .map(|t| {
                            let v = t[c] as f32 / 255.0;
                            if encoded {
                                srgb_to_linear(v)
                            } else {
                                v
                            }
                        })
                        .sum();
                    let mut avg = sum / 4.0;
                    if encoded {
                        avg = linear_to_srgb(avg);
                    }
                    data.push((avg.clamp(0.0, 1.0) * 255.0).round() as u8);
                }
            }
        }
        ImageData {
            data,
            width,
            height,
        }
    }
}

/// Linear RGB float pixels decoded from a Radiance `.hdr` file.
#[derive(Clone, Debug, PartialEq)]
pub struct HdrImage {
    pub data: Vec<f32>,
    pub width: u32,
    pub height: u32,
}

impl HdrImage {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let rgb = image::load_from_memory_with_format(bytes, image::ImageFormat::Hdr)?.to_rgb32f();
        let (width, height) = rgb.dimensions();
        Ok(Self {
            data: rgb.into_raw(),
            width,
            height,
        })
    }

    /// Mean radiance, used as the diffuse ambient term.
    pub fn average(&self) -> [f32; 3] {
        let n = (self.data.len() / 3).max(1) as f64;
        let mut sum = [0.0_f64; 3];
        for px in self.data.chunks_exact(3) {
            for c in 0..3 {
                sum[c] += px[c].max(0.0) as f64;
            }
        }
        [(sum[0] / n) as f32, (sum[1] / n) as f32, (sum[2] / n) as f32]
    }

    /// Pack into shared-exponent texels (one `u32` per pixel).
    pub fn to_rgb9e5(&self) -> Vec<u32> {
        self.data
            .chunks_exact(3)
            .map(|px| pack_rgb9e5([px[0], px[1], px[2]]))
            .collect()
    }

    /// Mip chain down to 1×1, box filtered; blurrier levels stand in for
    /// rougher reflections.
    pub fn mip_chain(&self) -> Vec<HdrImage> {
        let mut levels = vec![self.clone()];
        while let Some(prev) = levels.last() {
            if prev.width <= 1 && prev.height <= 1 {
                break;
            }
            let next = prev.downsample();
            levels.push(next);
        }
        levels
    }

    fn downsample(&self) -> HdrImage {
        let width = (self.width / 2).max(1);
        let height = (self.height / 2).max(1);
        let at = |x: u32, y: u32| (((y * self.width) + x) * 3) as usize;
        let mut data = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                let xs = [(x * 2).min(self.width - 1), (x * 2 + 1).min(self.width - 1)];
                let ys = [(y * 2).min(self.height - 1), (y * 2 + 1).min(self.height - 1)];
                for c in 0..3 {
                    let mut sum = 0.0;
                    for &sy in &ys {
                        for &sx in &xs {
                            sum += self.data[at(sx, sy) + c];
                        }
                    }
                    data.push(sum / 4.0);
                }
            }
        }
        HdrImage {
            data,
            width,
            height,
        }
    }
}

const RGB9E5_MANTISSA_BITS: i32 = 9;
const RGB9E5_EXP_BIAS: i32 = 15;
const RGB9E5_MAX_EXP: i32 = 31;
const RGB9E5_MANTISSA_VALUES: f32 = 512.0;

fn rgb9e5_max() -> f32 {
    (RGB9E5_MANTISSA_VALUES - 1.0) / RGB9E5_MANTISSA_VALUES
        * 2f32.powi(RGB9E5_MAX_EXP - RGB9E5_EXP_BIAS)
}

/// Encode linear RGB into the shared-exponent `RGB9E5` layout
/// (9-bit mantissas at bits 0, 9 and 18, exponent at bit 27).
pub fn pack_rgb9e5(rgb: [f32; 3]) -> u32 {
    let max = rgb9e5_max();
    let clamp = |v: f32| if v.is_nan() { 0.0 } else { v.clamp(0.0, max) };
    let (r, g, b) = (clamp(rgb[0]), clamp(rgb[1]), clamp(rgb[2]));
    let max_c = r.max(g).max(b);

    let floor_log2 = if max_c > 0.0 {
        max_c.log2().floor() as i32
    } else {
        -RGB9E5_EXP_BIAS - 1
    };
    let mut exp = floor_log2.max(-RGB9E5_EXP_BIAS - 1) + 1 + RGB9E5_EXP_BIAS;
    let mut scale = 2f32.powi(exp - RGB9E5_EXP_BIAS - RGB9E5_MANTISSA_BITS);
    if (max_c / scale + 0.5).floor() >= RGB9E5_MANTISSA_VALUES {
        exp += 1;
        scale *= 2.0;
    }

    let m = |v: f32| ((v / scale + 0.5).floor() as u32).min(511);
    m(r) | (m(g) << 9) | (m(b) << 18) | ((exp as u32) << 27)
}

pub fn unpack_rgb9e5(bits: u32) -> [f32; 3] {
    let exp = (bits >> 27) as i32;
    let scale = 2f32.powi(exp - RGB9E5_EXP_BIAS - RGB9E5_MANTISSA_BITS);
    [
        (bits & 0x1ff) as f32 * scale,
        ((bits >> 9) & 0x1ff) as f32 * scale,
        ((bits >> 18) & 0x1ff) as f32 * scale,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn rgb9e5_keeps_relative_precision() {
        for rgb in [[1.0, 0.5, 0.25], [12.5, 3.0, 0.0], [0.01, 0.02, 0.03]] {
            let back = unpack_rgb9e5(pack_rgb9e5(rgb));
            let max = rgb.iter().cloned().fold(0.0_f32, f32::max);
            for c in 0..3 {
                assert!((back[c] - rgb[c]).abs() <= max / 256.0, "{rgb:?} -> {back:?}");
            }
        }
    }

    #[test]
    fn rgb9e5_zero_and_negative_are_black() {
        assert_eq!(unpack_rgb9e5(pack_rgb9e5([0.0, -1.0, f32::NAN])), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn mip_chain_ends_at_one_texel() {
        let img = ImageData {
            data: vec![255; 5 * 3 * 4],
            width: 5,
            height: 3,
        };
        let chain = img.mip_chain(false);
        let dims: Vec<_> = chain.iter().map(|l| (l.width, l.height)).collect();
        assert_eq!(dims, vec![(5, 3), (2, 1), (1, 1)]);
        assert_eq!(chain[2].data, vec![255, 255, 255, 255]);
    }

    #[test]
    fn srgb_mips_average_in_linear_space() {
        let img = ImageData {
            data: vec![0, 0, 0, 255, 255, 255, 255, 255],
            width: 2,
            height: 1,
        };
        let level = &img.mip_chain(true)[1];
        // linear midpoint of black and white is brighter than 128 once encoded
        assert!(level.data[0] > 180);
        assert_eq!(level.data[3], 255);
        let plain = &img.mip_chain(false)[1];
        assert_relative_eq!(plain.data[0] as f32, 128.0, epsilon = 1.0);
    }

    #[test]
    fn hdr_mips_preserve_mean_radiance() {
        let img = HdrImage {
            data: vec![4.0, 0.0, 0.0, 0.0, 0.0, 2.0, 1.0, 1.0, 1.0, 3.0, 3.0, 3.0],
            width: 2,
            height: 2,
        };
        let chain = img.mip_chain();
        assert_eq!(chain.len(), 2);
        assert_eq!(chain[1].data, vec![2.0, 1.0, 1.5]);
        assert_eq!(chain[1].average(), img.average());
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        assert!(ImageData::from_bytes(b"definitely not an image").is_err());
    }
}
