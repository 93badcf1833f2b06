//! Layer colors and their renderer-facing conversions.

use peniko::Color as PenikoColor;
use serde::{Deserialize, Serialize};

/// An opaque RGB color as stored on layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn black() -> Self {
        Self::new(0, 0, 0)
    }

    pub const fn white() -> Self {
        Self::new(255, 255, 255)
    }

    /// CSS hex token (`#rrggbb`), always lowercase and zero padded.
    pub fn to_css(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Parse a `#rgb` or `#rrggbb` token. Returns `None` for anything else.
    pub fn from_css(token: &str) -> Option<Self> {
        let hex = token.trim().strip_prefix('#')?;
        if !hex.is_ascii() {
            return None;
        }
        match hex.len() {
            3 => {
                let r = u8::from_str_radix(&hex[0..1], 16).ok()? * 17;
                let g = u8::from_str_radix(&hex[1..2], 16).ok()? * 17;
                let b = u8::from_str_radix(&hex[2..3], 16).ok()? * 17;
                Some(Self::new(r, g, b))
            }
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                Some(Self::new(r, g, b))
            }
            _ => None,
        }
    }

    /// The same color at the given alpha, for renderers that blend.
    pub fn with_alpha(self, alpha: u8) -> PenikoColor {
        PenikoColor::from_rgba8(self.r, self.g, self.b, alpha)
    }
}

impl From<Color> for PenikoColor {
    fn from(color: Color) -> Self {
        PenikoColor::from_rgba8(color.r, color.g, color.b, 255)
    }
}

impl From<PenikoColor> for Color {
    fn from(color: PenikoColor) -> Self {
        let rgba = color.to_rgba8();
        Self::new(rgba.r, rgba.g, rgba.b)
    }
}

/// Palette used to tell collaborators apart.
const ACTOR_PALETTE: [Color; 5] = [
    Color::new(0xDC, 0x26, 0x26),
    Color::new(0xD9, 0x77, 0x06),
    Color::new(0x05, 0x96, 0x69),
    Color::new(0x7C, 0x3A, 0xED),
    Color::new(0xDB, 0x27, 0x77),
];

/// Stable highlight color for a connection/actor id.
pub fn actor_color(actor: u64) -> Color {
    ACTOR_PALETTE[(actor % ACTOR_PALETTE.len() as u64) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_css_pads() {
        assert_eq!(Color::new(0, 10, 255).to_css(), "#000aff");
        assert_eq!(Color::black().to_css(), "#000000");
    }

    #[test]
    fn test_from_css() {
        assert_eq!(Color::from_css("#fff"), Some(Color::white()));
        assert_eq!(Color::from_css("#10ff00"), Some(Color::new(16, 255, 0)));
        assert_eq!(Color::from_css("red"), None);
        assert_eq!(Color::from_css("#12345"), None);
    }

    #[test]
    fn test_peniko_conversion() {
        let color = Color::new(12, 34, 56);
        let peniko: PenikoColor = color.into();
        let rgba = peniko.to_rgba8();
        assert_eq!((rgba.r, rgba.g, rgba.b, rgba.a), (12, 34, 56, 255));
        assert_eq!(Color::from(peniko), color);
    }

    #[test]
    fn test_actor_color_wraps() {
        assert_eq!(actor_color(1), actor_color(1 + ACTOR_PALETTE.len() as u64));
        assert_ne!(actor_color(1), actor_color(2));
    }
}
