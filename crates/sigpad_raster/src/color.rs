//! Color types and utilities

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// RGBA color with 8-bit straight-alpha components
///
/// Serialized as a hex string (`"#145394"` or `"#14539480"`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const TRANSPARENT: Color = Color::new(0, 0, 0, 0);
    /// Default signature ink
    pub const INK_BLUE: Color = Color::rgb(20, 83, 148);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create from hex value (0xRRGGBB or 0xRRGGBBAA)
    pub fn from_hex(hex: u32) -> Self {
        if hex > 0xFFFFFF {
            Self::new(
                ((hex >> 24) & 0xFF) as u8,
                ((hex >> 16) & 0xFF) as u8,
                ((hex >> 8) & 0xFF) as u8,
                (hex & 0xFF) as u8,
            )
        } else {
            Self::rgb(
                ((hex >> 16) & 0xFF) as u8,
                ((hex >> 8) & 0xFF) as u8,
                (hex & 0xFF) as u8,
            )
        }
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA` (leading `#` optional)
    pub fn parse(s: &str) -> Result<Self, ParseColorError> {
        let digits = s.trim().trim_start_matches('#');
        if !matches!(digits.len(), 6 | 8) {
            return Err(ParseColorError(s.to_string()));
        }
        let value = u32::from_str_radix(digits, 16).map_err(|_| ParseColorError(s.to_string()))?;
        if digits.len() == 8 {
            Ok(Self::new(
                (value >> 24) as u8,
                (value >> 16) as u8,
                (value >> 8) as u8,
                value as u8,
            ))
        } else {
            Ok(Self::from_hex(value))
        }
    }

    /// Set alpha and return new color
    pub fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    pub fn is_opaque(&self) -> bool {
        self.a == 255
    }

    /// Convert to u8 array [r, g, b, a]
    pub fn to_rgba8(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub(crate) fn to_skia(self) -> tiny_skia::Color {
        tiny_skia::Color::from_rgba8(self.r, self.g, self.b, self.a)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_opaque() {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Color {
    type Error = ParseColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

/// Error returned for malformed hex color strings
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid color '{0}', expected #RRGGBB or #RRGGBBAA")]
pub struct ParseColorError(String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!(Color::parse("#145394").unwrap(), Color::INK_BLUE);
        assert_eq!(Color::parse("ffffff").unwrap(), Color::WHITE);
        assert_eq!(
            Color::parse("#14539480").unwrap(),
            Color::INK_BLUE.with_alpha(0x80)
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Color::parse("#12345").is_err());
        assert!(Color::parse("#gg0000").is_err());
        assert!(Color::parse("").is_err());
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        let translucent = Color::new(1, 2, 3, 4);
        assert_eq!(Color::INK_BLUE.to_string(), "#145394");
        assert_eq!(translucent.to_string(), "#01020304");
        assert_eq!(Color::parse(&translucent.to_string()).unwrap(), translucent);
    }

    #[test]
    fn test_from_hex() {
        assert_eq!(Color::from_hex(0x145394), Color::INK_BLUE);
        assert_eq!(Color::from_hex(0xFF000080), Color::new(255, 0, 0, 0x80));
    }
}
