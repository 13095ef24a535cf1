//! Colors in the renderer's linear working space.
//!
//! Hex inputs (panel pickers, defaults) are sRGB-encoded and converted on the
//! way in; [`Color::to_hex_string`] converts back for display.

use crate::error::{DemoError, Result};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed sRGB `0xRRGGBB` value.
    pub fn from_hex(hex: u32) -> Self {
        Self::from_srgb8(
            ((hex >> 16) & 0xff) as u8,
            ((hex >> 8) & 0xff) as u8,
            (hex & 0xff) as u8,
        )
    }

    pub fn from_srgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(
            srgb_to_linear(r as f32 / 255.0),
            srgb_to_linear(g as f32 / 255.0),
            srgb_to_linear(b as f32 / 255.0),
        )
    }

    /// Parse `#rrggbb`, `rrggbb` or the short `#rgb` form.
    pub fn parse_hex(text: &str) -> Result<Self> {
        let digits = text.trim().trim_start_matches('#');
        let expanded: String = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 => digits.to_string(),
            _ => return Err(DemoError::InvalidColor(text.to_string())),
        };
        u32::from_str_radix(&expanded, 16)
            .map(Self::from_hex)
            .map_err(|_| DemoError::InvalidColor(text.to_string()))
    }

    pub fn to_srgb8(self) -> [u8; 3] {
        let enc = |c: f32| (linear_to_srgb(c.clamp(0.0, 1.0)) * 255.0).round() as u8;
        [enc(self.r), enc(self.g), enc(self.b)]
    }

    pub fn to_hex_string(self) -> String {
        let [r, g, b] = self.to_srgb8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    pub fn lerp(self, other: Color, t: f32) -> Self {
        Self::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
        )
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

#[inline]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c < 0.04045 {
        c * 0.077_399_38
    } else {
        (c * 0.947_867_3 + 0.052_132_7).powf(2.4)
    }
}

#[inline]
pub fn linear_to_srgb(c: f32) -> f32 {
    if c < 0.003_130_8 {
        c * 12.92
    } else {
        1.055 * c.powf(0.416_666_66) - 0.055
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn parses_long_and_short_hex() {
        let long = Color::parse_hex("#ff6030").unwrap();
        assert_eq!(long, Color::from_hex(0xff6030));
        let short = Color::parse_hex("fff").unwrap();
        assert_relative_eq!(short.r, 1.0, epsilon = 1e-5);
        assert_relative_eq!(short.b, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn rejects_malformed_hex() {
        assert!(Color::parse_hex("#12345").is_err());
        assert!(Color::parse_hex("#gg0000").is_err());
    }

    #[test]
    fn hex_string_survives_linear_conversion() {
        for text in ["#ff6030", "#1b3984", "#000000", "#ffffff"] {
            assert_eq!(Color::parse_hex(text).unwrap().to_hex_string(), text);
        }
    }

    #[test]
    fn lerp_endpoints_are_exact() {
        let a = Color::from_hex(0xff6030);
        let b = Color::from_hex(0x1b3984);
        assert_eq!(a.lerp(b, 0.0), a);
        let end = a.lerp(b, 1.0);
        assert_relative_eq!(end.g, b.g, epsilon = 1e-6);
    }

    #[test]
    fn mid_grey_is_darker_in_linear_space() {
        assert!(Color::from_hex(0x808080).r < 0.5);
    }
}
