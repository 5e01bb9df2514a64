//! 8-bit RGB output buffer and PNG encoding.

use crate::RenderError;
use log::info;
use std::path::Path;

/// Bytes per pixel in the output buffer (RGB8).
pub const CHANNELS: usize = 3;

/// Rendered image: row-major RGB8, top row first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl ImageBuffer {
    /// Allocate a black image.
    ///
    /// Fails instead of aborting when the buffer cannot be allocated.
    pub fn try_new(width: u32, height: u32) -> Result<Self, RenderError> {
        let bytes = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(CHANNELS))
            .ok_or(RenderError::BufferAllocation { bytes: usize::MAX })?;
        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(bytes)
            .map_err(|_| RenderError::BufferAllocation { bytes })?;
        pixels.resize(bytes, 0);

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Number of bytes in one row.
    pub fn row_stride(&self) -> usize {
        self.width as usize * CHANNELS
    }

    /// Get the pixel at (x, y), with y = 0 the top row.
    pub fn get(&self, x: u32, y: u32) -> [u8; 3] {
        let offset = y as usize * self.row_stride() + x as usize * CHANNELS;
        [
            self.pixels[offset],
            self.pixels[offset + 1],
            self.pixels[offset + 2],
        ]
    }

    /// Encode the buffer as a PNG file.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), RenderError> {
        let path = path.as_ref();
        image::save_buffer_with_format(
            path,
            &self.pixels,
            self.width,
            self.height,
            image::ColorType::Rgb8,
            image::ImageFormat::Png,
        )?;
        info!("Saved {}x{} image to {}", self.width, self.height, path.display());
        Ok(())
    }
}
