//! Render configuration

use crate::color::Color;
use crate::{RenderError, Result};
use serde::{Deserialize, Serialize};

/// Width and height of a canvas or output image, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Largest size with this aspect ratio that fits inside `target`.
    ///
    /// The scale factor is `min(target.width / width, target.height / height)`
    /// and the scaled dimensions are truncated, never below one pixel.
    pub fn fit_within(&self, target: CanvasSize) -> CanvasSize {
        let scale_w = target.width as f32 / self.width as f32;
        let scale_h = target.height as f32 / self.height as f32;
        let scale = scale_w.min(scale_h);

        CanvasSize {
            width: ((self.width as f32 * scale) as u32).max(1),
            height: ((self.height as f32 * scale) as u32).max(1),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl std::fmt::Display for CanvasSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Renderer configuration
///
/// Every field has a default, so partial TOML/JSON tables deserialize cleanly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Canvas fill color
    pub background: Color,
    /// Stroke and text color
    pub pen_color: Color,
    /// Canvas width in pixels
    pub canvas_width: u32,
    /// Canvas height in pixels
    pub canvas_height: u32,
    /// Stroke width in pixels (0 draws a hairline)
    pub pen_width: f32,
    /// Text size in pixels per em
    pub font_size: f32,
    /// Installed font family used when no font file is given
    pub font_name: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            background: Color::WHITE,
            pen_color: Color::INK_BLUE,
            canvas_width: 198,
            canvas_height: 45,
            pen_width: 2.0,
            font_size: 24.0,
            font_name: "Journal".to_string(),
        }
    }
}

impl RenderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set background color
    pub fn background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    /// Set pen color
    pub fn pen_color(mut self, color: Color) -> Self {
        self.pen_color = color;
        self
    }

    /// Set canvas dimensions
    pub fn canvas(mut self, width: u32, height: u32) -> Self {
        self.canvas_width = width;
        self.canvas_height = height;
        self
    }

    /// Set pen width
    pub fn pen_width(mut self, width: f32) -> Self {
        self.pen_width = width;
        self
    }

    /// Set font size
    pub fn font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    /// Set installed font family name
    pub fn font_name(mut self, name: impl Into<String>) -> Self {
        self.font_name = name.into();
        self
    }

    pub fn canvas_size(&self) -> CanvasSize {
        CanvasSize::new(self.canvas_width, self.canvas_height)
    }

    /// Check dimension and size invariants
    pub fn validate(&self) -> Result<()> {
        if self.canvas_size().is_empty() {
            return Err(RenderError::InvalidConfig(format!(
                "canvas must be at least 1x1, got {}",
                self.canvas_size()
            )));
        }
        if !self.pen_width.is_finite() || self.pen_width < 0.0 {
            return Err(RenderError::InvalidConfig(format!(
                "pen width must be a non-negative number, got {}",
                self.pen_width
            )));
        }
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(RenderError::InvalidConfig(format!(
                "font size must be positive, got {}",
                self.font_size
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = RenderConfig::default();
        assert_eq!(config.background, Color::WHITE);
        assert_eq!(config.pen_color, Color::rgb(20, 83, 148));
        assert_eq!(config.canvas_size(), CanvasSize::new(198, 45));
        assert_eq!(config.pen_width, 2.0);
        assert_eq!(config.font_size, 24.0);
        assert_eq!(config.font_name, "Journal");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(RenderConfig::new().canvas(0, 45).validate().is_err());
        assert!(RenderConfig::new().pen_width(-1.0).validate().is_err());
        assert!(RenderConfig::new().font_size(0.0).validate().is_err());
        assert!(RenderConfig::new().pen_width(0.0).validate().is_ok());
    }

    #[test]
    fn test_fit_within_uniform_downscale() {
        let size = CanvasSize::new(198, 46);
        assert_eq!(size.fit_within(CanvasSize::new(99, 23)), CanvasSize::new(99, 23));
    }

    #[test]
    fn test_fit_within_uses_smaller_ratio() {
        // width ratio 2.0, height ratio 1.0 -> scale 1.0
        let size = CanvasSize::new(200, 50);
        assert_eq!(size.fit_within(CanvasSize::new(400, 50)), CanvasSize::new(200, 50));
        // width ratio 0.5, height ratio 4.0 -> scale 0.5
        assert_eq!(size.fit_within(CanvasSize::new(100, 200)), CanvasSize::new(100, 25));
    }

    #[test]
    fn test_fit_within_never_collapses() {
        let size = CanvasSize::new(200, 10);
        assert_eq!(size.fit_within(CanvasSize::new(20, 20)), CanvasSize::new(20, 1));
    }

    #[test]
    fn test_partial_config_deserializes_with_defaults() {
        let config: RenderConfig =
            serde_json::from_str(r##"{"pen_color":"#000000","canvas_width":300}"##).unwrap();
        assert_eq!(config.pen_color, Color::BLACK);
        assert_eq!(config.canvas_width, 300);
        assert_eq!(config.canvas_height, 45);
        assert_eq!(config.font_name, "Journal");
    }
}
