//! Glyph rasterization using swash
//!
//! Converts glyph outlines to 8-bit coverage bitmaps and lays a line of text
//! out onto a [`CoverageMask`], left to right from the canvas origin.

use crate::canvas::CoverageMask;
use crate::font::ResolvedFont;
use crate::FontError;
use swash::scale::{Render, ScaleContext, Source, StrikeWith};
use swash::zeno::Format;
use swash::FontRef;

/// Rasterized glyph bitmap with metrics
#[derive(Debug, Clone)]
pub struct RasterizedGlyph {
    /// Coverage bitmap, one byte per pixel
    pub bitmap: Vec<u8>,
    /// Bitmap width in pixels
    pub width: u32,
    /// Bitmap height in pixels
    pub height: u32,
    /// Horizontal bearing (offset from origin to left edge)
    pub bearing_x: i32,
    /// Vertical bearing (offset from baseline to top edge)
    pub bearing_y: i32,
    /// Horizontal advance to next glyph position
    pub advance: f32,
}

/// Glyph rasterizer using swash
pub struct GlyphRasterizer {
    /// Swash scale context (caches scaling state)
    scale_context: ScaleContext,
}

impl GlyphRasterizer {
    /// Create a new glyph rasterizer
    pub fn new() -> Self {
        Self {
            scale_context: ScaleContext::new(),
        }
    }

    /// Draw `text` into `mask` with the top of the first line at y = 0.
    ///
    /// `\n` starts a new line one line-height further down. Other control
    /// characters are skipped; characters missing from the font draw the
    /// font's `.notdef` glyph.
    pub fn draw_text(
        &mut self,
        font: &ResolvedFont,
        text: &str,
        font_size: f32,
        mask: &mut CoverageMask,
    ) -> Result<(), FontError> {
        let swash_font = swash_font(font)?;

        let metrics = swash_font.metrics(&[]);
        if metrics.units_per_em == 0 {
            return Err(FontError::InvalidFont {
                path: font.error_path(),
                reason: "font reports zero units per em".to_string(),
            });
        }
        let scale = font_size / metrics.units_per_em as f32;
        let ascent = metrics.ascent * scale;
        let line_height = (metrics.ascent + metrics.descent.abs() + metrics.leading) * scale;

        let charmap = swash_font.charmap();
        let mut baseline = ascent;

        for line in text.split('\n') {
            let mut pen_x = 0.0f32;

            for ch in line.chars() {
                if ch.is_control() {
                    continue;
                }

                let glyph_id = charmap.map(ch);
                if glyph_id == 0 {
                    tracing::trace!("No glyph for {:?} in {}", ch, font.origin());
                }

                let glyph = self.rasterize_glyph(swash_font, glyph_id, font_size);
                if !glyph.bitmap.is_empty() {
                    let left = pen_x.round() as i32 + glyph.bearing_x;
                    let top = baseline.round() as i32 - glyph.bearing_y;
                    mask.blend_alpha(left, top, glyph.width, glyph.height, &glyph.bitmap);
                }
                pen_x += glyph.advance;
            }

            baseline += line_height;
        }

        Ok(())
    }

    fn rasterize_glyph(
        &mut self,
        swash_font: FontRef<'_>,
        glyph_id: u16,
        font_size: f32,
    ) -> RasterizedGlyph {
        // Create a scaler for this font at the requested size
        let mut scaler = self
            .scale_context
            .builder(swash_font)
            .size(font_size)
            .build();

        // Get advance width from font metrics (scale from font units to pixels)
        let metrics = swash_font.metrics(&[]);
        let glyph_metrics = swash_font.glyph_metrics(&[]);
        let scale = font_size / metrics.units_per_em.max(1) as f32;
        let advance = glyph_metrics.advance_width(glyph_id) * scale;

        let mut render = Render::new(&[Source::Outline, Source::Bitmap(StrikeWith::BestFit)]);
        render.format(Format::Alpha);

        match render.render(&mut scaler, glyph_id) {
            Some(img) => {
                let width = img.placement.width;
                let height = img.placement.height;

                // Bitmap strikes may come back as RGBA; keep only coverage
                let pixels = (width * height) as usize;
                let bitmap = if img.data.len() == pixels * 4 {
                    img.data.chunks_exact(4).map(|px| px[3]).collect()
                } else {
                    img.data
                };

                RasterizedGlyph {
                    bitmap,
                    width,
                    height,
                    bearing_x: img.placement.left,
                    bearing_y: img.placement.top,
                    advance,
                }
            }
            // Empty glyph (like space) - no bitmap but has advance
            None => RasterizedGlyph {
                bitmap: Vec::new(),
                width: 0,
                height: 0,
                bearing_x: 0,
                bearing_y: 0,
                advance,
            },
        }
    }
}

impl Default for GlyphRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

fn swash_font(font: &ResolvedFont) -> Result<FontRef<'_>, FontError> {
    FontRef::from_index(font.data(), font.face_index() as usize).ok_or_else(|| {
        FontError::InvalidFont {
            path: font.error_path(),
            reason: "not a supported font face".to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CanvasSize;
    use std::path::PathBuf;

    fn bogus_font() -> ResolvedFont {
        ResolvedFont::Loaded {
            path: PathBuf::from("bogus.ttf"),
            data: b"not a font".to_vec(),
            face_index: 0,
        }
    }

    /// An installed outline font with a Latin 'A', if the machine has one
    fn latin_font() -> Option<ResolvedFont> {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        let ids: Vec<_> = db.faces().map(|face| face.id).collect();
        ids.into_iter().find_map(|id| {
            db.with_face_data(id, |data, index| {
                let face = ttf_parser::Face::parse(data, index).ok()?;
                face.glyph_index('A')
                    .and_then(|gid| face.glyph_bounding_box(gid))?;
                Some(ResolvedFont::Loaded {
                    path: PathBuf::from("system"),
                    data: data.to_vec(),
                    face_index: index,
                })
            })
            .flatten()
        })
    }

    /// Lowest row holding any coverage
    fn last_inked_row(mask: &CoverageMask) -> Option<u32> {
        let size = mask.size();
        (0..size.height)
            .rev()
            .find(|&y| (0..size.width).any(|x| mask.get(x, y).unwrap_or(0) > 0))
    }

    #[test]
    fn test_newline_draws_second_line_below_first() {
        let Some(font) = latin_font() else {
            eprintln!("no system fonts installed, skipping");
            return;
        };
        let size = CanvasSize::new(40, 80);
        let mut rasterizer = GlyphRasterizer::new();

        let mut one_line = CoverageMask::new(size);
        rasterizer.draw_text(&font, "A", 16.0, &mut one_line).unwrap();
        let mut two_lines = CoverageMask::new(size);
        rasterizer
            .draw_text(&font, "A\nA", 16.0, &mut two_lines)
            .unwrap();

        let first_bottom = last_inked_row(&one_line).expect("first line has ink");
        let second_bottom = last_inked_row(&two_lines).expect("second line has ink");
        assert!(second_bottom > first_bottom);

        // The first line is drawn identically in both
        for y in 0..=first_bottom {
            for x in 0..size.width {
                assert!(two_lines.get(x, y) >= one_line.get(x, y));
            }
        }
    }

    #[test]
    fn test_unparseable_font_is_invalid() {
        let mut rasterizer = GlyphRasterizer::new();
        let mut mask = CoverageMask::new(CanvasSize::new(10, 10));

        let err = rasterizer
            .draw_text(&bogus_font(), "A", 12.0, &mut mask)
            .unwrap_err();
        assert!(matches!(err, FontError::InvalidFont { .. }));
        assert!(mask.is_empty());
    }
}
