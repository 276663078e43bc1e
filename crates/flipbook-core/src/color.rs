use std::fmt;

use crate::math::mix;

/// Opaque 8-bit colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Channel-wise linear blend, `t` clamped to [0,1].
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let ch = |a: u8, b: u8| mix(a as f32, b as f32, t).round() as u8;
        Self::new(ch(self.r, other.r), ch(self.g, other.g), ch(self.b, other.b))
    }

    pub fn with_alpha(self, a: f32) -> Rgba {
        Rgba { rgb: self, a }
    }
}

/// Colour with a floating-point alpha channel, as used by canvas styles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub rgb: Rgb,
    pub a: f32,
}

impl Rgba {
    /// Same hue with a different alpha.
    pub fn with_alpha(self, a: f32) -> Self {
        Self { rgb: self.rgb, a }
    }

    /// Normalised `[r, g, b, a]` for GPU upload.
    pub fn to_array(self) -> [f32; 4] {
        [
            self.rgb.r as f32 / 255.0,
            self.rgb.g as f32 / 255.0,
            self.rgb.b as f32 / 255.0,
            self.a,
        ]
    }
}

/// CSS `rgba(r, g, b, a)` form.
impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rgba({}, {}, {}, {})",
            self.rgb.r, self.rgb.g, self.rgb.b, self.a
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_parsing() {
        assert_eq!(Rgb::from_hex("#2a6d7e"), Some(Rgb::new(0x2a, 0x6d, 0x7e)));
        assert_eq!(Rgb::from_hex("4a90a4"), Some(Rgb::new(0x4a, 0x90, 0xa4)));
        assert_eq!(Rgb::from_hex("#fff"), None);
        assert_eq!(Rgb::from_hex("#zzzzzz"), None);
        assert_eq!(Rgb::new(1, 2, 255).to_hex(), "#0102ff");
    }

    #[test]
    fn test_lerp_endpoints() {
        let a = Rgb::new(0, 100, 200);
        let b = Rgb::new(200, 100, 0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Rgb::new(100, 100, 100));
        assert_eq!(a.lerp(b, 7.0), b);
    }

    #[test]
    fn test_css_format() {
        let c = Rgb::new(255, 215, 0).with_alpha(0.5);
        assert_eq!(c.to_string(), "rgba(255, 215, 0, 0.5)");
    }
}
