//! PNG output helpers

use crate::Result;
use image::{ImageFormat, RgbaImage};
use std::io::Cursor;
use std::path::Path;

/// Encode an image as PNG bytes
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// Write an image to `path` as PNG, regardless of the file extension
pub fn save_png(image: &RgbaImage, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    image.save_with_format(path, ImageFormat::Png)?;
    tracing::debug!(
        "Wrote {}x{} PNG to {}",
        image.width(),
        image.height(),
        path.display()
    );
    Ok(())
}
