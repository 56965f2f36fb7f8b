// ABOUTME: Sample image source for mirror diagnostics
// ABOUTME: Generates a small PNG in memory or loads a user-supplied image file

use anyhow::{Context, Result, anyhow};
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;
use std::path::Path;

use crate::constants::sample;

/// Renders a small gradient PNG so diagnostics work without any files.
pub fn generated_sample() -> Result<Vec<u8>> {
    let image = RgbaImage::from_fn(sample::WIDTH, sample::HEIGHT, |x, y| {
        let r = (x * 255 / sample::WIDTH.max(1)) as u8;
        let g = (y * 255 / sample::HEIGHT.max(1)) as u8;
        Rgba([r, g, 0xC0, 0xFF])
    });

    let mut buffer = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(image)
        .write_to(&mut buffer, ImageFormat::Png)
        .context("Failed to encode sample image")?;

    Ok(buffer.into_inner())
}

/// Reads an image file, rejecting files that are not a recognized image format.
pub fn load_image(path: &Path) -> Result<Vec<u8>> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read image file: {}", path.display()))?;

    if bytes.is_empty() {
        return Err(anyhow!("Image file is empty: {}", path.display()));
    }

    image::guess_format(&bytes)
        .with_context(|| format!("Not a recognized image format: {}", path.display()))?;

    Ok(bytes)
}
