//! [§ 4 Representing Colors](https://www.w3.org/TR/css-color-4/#color-type)

use std::fmt;

use serde::Serialize;

use crate::error::StyleError;

/// [§ 6.1 Named Colors](https://www.w3.org/TR/css-color-4/#named-colors)
///
/// The subset of the named color table documents actually use.
const NAMED_COLORS: &[(&str, u32)] = &[
    ("black", 0x00_0000),
    ("silver", 0xC0_C0C0),
    ("gray", 0x80_8080),
    ("grey", 0x80_8080),
    ("white", 0xFF_FFFF),
    ("maroon", 0x80_0000),
    ("red", 0xFF_0000),
    ("purple", 0x80_0080),
    ("fuchsia", 0xFF_00FF),
    ("magenta", 0xFF_00FF),
    ("green", 0x00_8000),
    ("lime", 0x00_FF00),
    ("olive", 0x80_8000),
    ("yellow", 0xFF_FF00),
    ("navy", 0x00_0080),
    ("blue", 0x00_00FF),
    ("teal", 0x00_8080),
    ("aqua", 0x00_FFFF),
    ("cyan", 0x00_FFFF),
    ("orange", 0xFF_A500),
    ("pink", 0xFF_C0CB),
    ("brown", 0xA5_2A2A),
    ("gold", 0xFF_D700),
    ("darkred", 0x8B_0000),
    ("darkgray", 0xA9_A9A9),
    ("lightgray", 0xD3_D3D3),
    ("whitesmoke", 0xF5_F5F5),
];

/// An sRGB color with alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Color {
    /// Red component.
    pub r: u8,
    /// Green component.
    pub g: u8,
    /// Blue component.
    pub b: u8,
    /// Alpha component, 255 is opaque.
    pub a: u8,
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl Color {
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// Opaque color from components.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// [§ 5.2 The RGB hexadecimal notations](https://www.w3.org/TR/css-color-4/#hex-notation)
    ///
    /// Accepts 3, 4, 6 or 8 hex digits, with or without a leading `#`.
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.is_ascii() {
            return None;
        }
        // "The three-digit RGB notation (#RGB) is converted into six-digit form (#RRGGBB)
        // by replicating digits, not by adding zeros."
        let short = |i: usize| u8::from_str_radix(&hex[i..=i].repeat(2), 16).ok();
        let long = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        match hex.len() {
            3 => Some(Self::rgb(short(0)?, short(1)?, short(2)?)),
            4 => Some(Self {
                r: short(0)?,
                g: short(1)?,
                b: short(2)?,
                a: short(3)?,
            }),
            6 => Some(Self::rgb(long(0)?, long(2)?, long(4)?)),
            8 => Some(Self {
                r: long(0)?,
                g: long(2)?,
                b: long(4)?,
                a: long(6)?,
            }),
            _ => None,
        }
    }

    /// Look up a named color, case-insensitively.
    #[must_use]
    pub fn from_named(name: &str) -> Option<Self> {
        let name = name.to_ascii_lowercase();
        NAMED_COLORS
            .iter()
            .find(|(n, _)| *n == name)
            .map(|&(_, rgb)| {
                let [_, r, g, b] = rgb.to_be_bytes();
                Self::rgb(r, g, b)
            })
    }

    /// [§ 5.1 The RGB functions](https://www.w3.org/TR/css-color-4/#rgb-functions)
    ///
    /// Legacy comma syntax only: `rgb(1, 2, 3)` and `rgba(1, 2, 3, 0.5)`.
    fn from_rgb_function(value: &str) -> Option<Self> {
        let args = value
            .strip_prefix("rgba(")
            .or_else(|| value.strip_prefix("rgb("))?
            .strip_suffix(')')?;
        let parts: Vec<&str> = args.split(',').map(str::trim).collect();
        let channel = |s: &str| s.parse::<u16>().ok().map(|v| v.min(255) as u8);
        match parts.as_slice() {
            [r, g, b] => Some(Self::rgb(channel(r)?, channel(g)?, channel(b)?)),
            [r, g, b, a] => {
                let alpha = a.parse::<f64>().ok()?.clamp(0.0, 1.0);
                Some(Self {
                    r: channel(r)?,
                    g: channel(g)?,
                    b: channel(b)?,
                    a: (alpha * 255.0).round() as u8,
                })
            }
            _ => None,
        }
    }

    /// Parse a color value: a name, hex digits, or an `rgb()`/`rgba()` call.
    ///
    /// # Errors
    /// Returns [`StyleError::InvalidColor`] when none of the forms match.
    pub fn parse(value: &str) -> Result<Self, StyleError> {
        let v = value.trim().to_ascii_lowercase();
        Self::from_named(&v)
            .or_else(|| Self::from_rgb_function(&v))
            .or_else(|| Self::from_hex(&v))
            .ok_or_else(|| StyleError::InvalidColor(value.to_string()))
    }

    /// Six lowercase hex digits, no `#`, alpha dropped.
    #[must_use]
    pub fn to_hex_string(&self) -> String {
        format!("{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_hex_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_forms() {
        assert_eq!(Color::parse("red").unwrap(), Color::rgb(255, 0, 0));
        assert_eq!(Color::parse("#0f0").unwrap(), Color::rgb(0, 255, 0));
        assert_eq!(Color::parse("336699").unwrap(), Color::rgb(0x33, 0x66, 0x99));
        assert_eq!(Color::parse("rgb(1, 2, 3)").unwrap(), Color::rgb(1, 2, 3));
        assert_eq!(Color::parse("rgba(1, 2, 3, 0)").unwrap().a, 0);
    }

    #[test]
    fn test_invalid_color() {
        assert!(matches!(
            Color::parse("not-a-color"),
            Err(StyleError::InvalidColor(_))
        ));
    }

    #[test]
    fn test_hex_string() {
        assert_eq!(Color::rgb(255, 0, 16).to_hex_string(), "ff0010");
        assert_eq!(Color::rgb(255, 0, 16).to_string(), "#ff0010");
    }
}
