//! Signature rasterization for sigpad
//!
//! This crate turns a captured signature into a bitmap:
//! - Stroke lists (`[{"lx":..,"ly":..,"mx":..,"my":..}, ...]`) drawn with
//!   anti-aliased lines, optionally scaled to a target size (bicubic)
//! - Typed names drawn with a system font or a font file
//!
//! # Example
//!
//! ```ignore
//! use sigpad_raster::{CanvasSize, RenderConfig, SignatureRenderer};
//!
//! let renderer = SignatureRenderer::new(RenderConfig::default());
//! let image = renderer.render_json(r#"[{"lx":10,"ly":20,"mx":40,"my":25}]"#, CanvasSize::new(99, 22))?;
//! sigpad_raster::save_png(&image, "signature.png")?;
//! ```

pub mod canvas;
pub mod color;
pub mod config;
pub mod font;
pub mod output;
pub mod rasterizer;
pub mod renderer;
pub mod segment;

pub use canvas::{resize_to_fit, Canvas, CoverageMask};
pub use color::Color;
pub use config::{CanvasSize, RenderConfig};
pub use font::{FontResolver, ResolvedFont};
pub use image::RgbaImage;
pub use output::{encode_png, save_png};
pub use rasterizer::{GlyphRasterizer, RasterizedGlyph};
pub use renderer::SignatureRenderer;
pub use segment::{parse_segments, LineSegment};

use std::path::PathBuf;
use thiserror::Error;

/// Font resolution errors
#[derive(Error, Debug)]
pub enum FontError {
    #[error("Font '{name}' is not installed")]
    NotInstalled { name: String },

    #[error("Font file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("Invalid font file {}: {reason}", path.display())]
    InvalidFont { path: PathBuf, reason: String },
}

/// Rendering errors
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid signature data: {0}")]
    InvalidInput(#[from] serde_json::Error),

    #[error("Font resolution failed: {0}")]
    Font(#[from] FontError),

    #[error("Invalid render configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to encode image: {0}")]
    Encode(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, RenderError>;
