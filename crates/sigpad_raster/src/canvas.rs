//! Drawing surface for a single render call
//!
//! A [`Canvas`] wraps a tiny-skia pixmap (premultiplied RGBA). Strokes are
//! rasterized directly; text arrives as a [`CoverageMask`] and is filled with
//! the pen color in one pass. The finished canvas converts to a straight-alpha
//! [`RgbaImage`].

use crate::color::Color;
use crate::config::CanvasSize;
use crate::segment::LineSegment;
use crate::{RenderError, Result};
use image::imageops::{self, FilterType};
use image::RgbaImage;
use tiny_skia::{
    IntSize, LineCap, LineJoin, Mask, Paint, PathBuilder, Pixmap, Rect, Stroke, Transform,
};

/// In-memory pixel buffer owned by one render call
#[derive(Clone)]
pub struct Canvas {
    pixmap: Pixmap,
}

impl Canvas {
    /// Allocate a canvas, clear it to transparent, then fill with `background`
    pub fn blank(size: CanvasSize, background: Color) -> Result<Self> {
        let mut pixmap = Pixmap::new(size.width, size.height).ok_or_else(|| {
            RenderError::InvalidConfig(format!("cannot allocate a {} canvas", size))
        })?;
        pixmap.fill(tiny_skia::Color::TRANSPARENT);
        pixmap.fill(background.to_skia());
        Ok(Self { pixmap })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn size(&self) -> CanvasSize {
        CanvasSize::new(self.width(), self.height())
    }

    /// Straight-alpha RGBA at (x, y), `None` outside the canvas
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        // Pixmap::pixel only bounds-checks the flat index
        if x >= self.width() || y >= self.height() {
            return None;
        }
        self.pixmap.pixel(x, y).map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
    }

    /// Draw segments in order with an anti-aliased pen
    pub fn stroke_segments(&mut self, segments: &[LineSegment], pen: Color, width: f32) {
        let mut paint = Paint::default();
        paint.set_color_rgba8(pen.r, pen.g, pen.b, pen.a);
        paint.anti_alias = true;

        let stroke = Stroke {
            width,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Stroke::default()
        };

        for segment in segments {
            let (sx, sy) = segment.start();
            let (ex, ey) = segment.end();

            let mut builder = PathBuilder::new();
            builder.move_to(sx, sy);
            builder.line_to(ex, ey);

            let Some(path) = builder.finish() else {
                tracing::trace!("Skipping degenerate segment {:?}", segment);
                continue;
            };

            self.pixmap
                .stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        }
    }

    /// Fill `color` through a coverage mask the size of this canvas
    pub fn fill_mask(&mut self, mask: CoverageMask, color: Color) -> Result<()> {
        if mask.size() != self.size() {
            return Err(RenderError::InvalidConfig(format!(
                "coverage mask {} does not match canvas {}",
                mask.size(),
                self.size()
            )));
        }

        let size = IntSize::from_wh(mask.width, mask.height)
            .ok_or_else(|| RenderError::InvalidConfig("empty coverage mask".to_string()))?;
        let mask = Mask::from_vec(mask.data, size)
            .ok_or_else(|| RenderError::InvalidConfig("malformed coverage mask".to_string()))?;
        let rect = Rect::from_xywh(0.0, 0.0, self.width() as f32, self.height() as f32)
            .ok_or_else(|| RenderError::InvalidConfig("empty canvas".to_string()))?;

        let mut paint = Paint::default();
        paint.set_color_rgba8(color.r, color.g, color.b, color.a);
        paint.anti_alias = true;

        self.pixmap
            .fill_rect(rect, &paint, Transform::identity(), Some(&mask));
        Ok(())
    }

    /// Copy out as a straight-alpha RGBA image
    pub fn to_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width(), self.height(), |x, y| {
            image::Rgba(self.pixel(x, y).unwrap_or([0; 4]))
        })
    }

    pub fn into_image(self) -> RgbaImage {
        self.to_image()
    }
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

/// 8-bit coverage accumulated from glyph bitmaps
///
/// Overlapping glyph pixels keep the larger coverage, so touching glyphs do not
/// darken where they meet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverageMask {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl CoverageMask {
    pub fn new(size: CanvasSize) -> Self {
        Self {
            width: size.width,
            height: size.height,
            data: vec![0; size.width as usize * size.height as usize],
        }
    }

    pub fn size(&self) -> CanvasSize {
        CanvasSize::new(self.width, self.height)
    }

    pub fn get(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get((y * self.width + x) as usize).copied()
    }

    /// Blend an alpha bitmap with its top-left corner at (left, top).
    /// Pixels falling outside the mask are clipped.
    pub fn blend_alpha(&mut self, left: i32, top: i32, width: u32, height: u32, alpha: &[u8]) {
        for row in 0..height {
            let y = top + row as i32;
            if y < 0 || y >= self.height as i32 {
                continue;
            }
            for col in 0..width {
                let x = left + col as i32;
                if x < 0 || x >= self.width as i32 {
                    continue;
                }
                let Some(&value) = alpha.get((row * width + col) as usize) else {
                    continue;
                };
                let idx = y as usize * self.width as usize + x as usize;
                self.data[idx] = self.data[idx].max(value);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.iter().all(|&v| v == 0)
    }
}

/// Scale `image` to the largest size with the same aspect ratio that fits in
/// `target`, using bicubic (Catmull-Rom) interpolation.
///
/// Returns the image untouched when no scaling is needed.
pub fn resize_to_fit(image: RgbaImage, target: CanvasSize) -> RgbaImage {
    let source = CanvasSize::new(image.width(), image.height());
    let fitted = source.fit_within(target);

    if fitted == source {
        return image;
    }

    tracing::debug!(
        "Resizing signature {} -> {} (target {})",
        source,
        fitted,
        target
    );
    imageops::resize(&image, fitted.width, fitted.height, FilterType::CatmullRom)
}
