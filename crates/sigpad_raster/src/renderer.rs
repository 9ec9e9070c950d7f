//! Signature renderer
//!
//! [`SignatureRenderer`] holds a [`RenderConfig`] and produces one fresh image
//! per call. Nothing is cached between calls: each render allocates its own
//! canvas, and the text path resolves and owns its own font data.

use crate::canvas::{resize_to_fit, Canvas, CoverageMask};
use crate::config::{CanvasSize, RenderConfig};
use crate::font::{FontResolver, ResolvedFont};
use crate::rasterizer::GlyphRasterizer;
use crate::segment::{parse_segments, LineSegment};
use crate::{FontError, RenderError, Result};
use image::RgbaImage;
use std::path::Path;

/// Renders stroke lists and typed names to bitmaps
#[derive(Debug, Clone, Default)]
pub struct SignatureRenderer {
    pub config: RenderConfig,
}

impl SignatureRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Canvas of the configured size, filled with the background color
    pub fn blank_canvas(&self) -> Result<Canvas> {
        self.config.validate()?;
        Canvas::blank(self.config.canvas_size(), self.config.background)
    }

    /// Draw `segments` in order, then fit the result into `target`.
    ///
    /// When `target` equals the configured canvas size the canvas is returned
    /// as drawn; otherwise it is scaled (bicubic, aspect ratio preserved) to
    /// the largest size that fits.
    pub fn render_segments(&self, segments: &[LineSegment], target: CanvasSize) -> Result<RgbaImage> {
        if target.is_empty() {
            return Err(RenderError::InvalidConfig(format!(
                "target size must be at least 1x1, got {}",
                target
            )));
        }

        let mut canvas = self.blank_canvas()?;

        if !segments.is_empty() {
            tracing::debug!(
                "Drawing {} segments on {} canvas",
                segments.len(),
                canvas.size()
            );
            canvas.stroke_segments(segments, self.config.pen_color, self.config.pen_width);
        }

        let image = canvas.into_image();
        if target == self.config.canvas_size() {
            return Ok(image);
        }
        Ok(resize_to_fit(image, target))
    }

    /// Parse the pad's JSON stroke list and render it (see [`Self::render_segments`])
    pub fn render_json(&self, json: &str, target: CanvasSize) -> Result<RgbaImage> {
        let segments = parse_segments(json)?;
        self.render_segments(&segments, target)
    }

    /// Draw a typed name at the canvas origin.
    ///
    /// Blank text yields the blank canvas without touching any font. With
    /// `font_path` the font is loaded from that file; otherwise the configured
    /// `font_name` must be installed. The result is never resized.
    pub fn render_text(&self, text: &str, font_path: Option<&Path>) -> Result<RgbaImage> {
        let mut canvas = self.blank_canvas()?;

        if text.trim().is_empty() {
            return Ok(canvas.into_image());
        }

        let font = self.resolve_font(font_path)?;
        tracing::debug!("Drawing {} chars with {}", text.chars().count(), font.origin());

        let mut mask = CoverageMask::new(canvas.size());
        GlyphRasterizer::new().draw_text(&font, text, self.config.font_size, &mut mask)?;

        if mask.is_empty() {
            tracing::warn!("Text produced no visible glyphs with {}", font.origin());
        } else {
            canvas.fill_mask(mask, self.config.pen_color)?;
        }

        Ok(canvas.into_image())
    }

    /// Resolve the font used by [`Self::render_text`]
    pub fn resolve_font(&self, font_path: Option<&Path>) -> std::result::Result<ResolvedFont, FontError> {
        FontResolver::system().resolve(&self.config.font_name, font_path)
    }

    /// Installed font families, sorted and deduplicated
    pub fn list_font_families() -> Vec<String> {
        FontResolver::system().list_families()
    }

    /// Check whether a font family is installed
    pub fn has_font(name: &str) -> bool {
        FontResolver::system().has_font(name)
    }
}
