//! Errors reported by the renderer.

use thiserror::Error;

/// Reasons a render cannot start, or its output cannot be written.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Pixel coordinates are normalized by `width - 1` and `height - 1`.
    #[error("Image must be at least 2x2 pixels, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Samples per pixel must be at least 1")]
    InvalidSamples,

    #[error("Worker thread count must be at least 1")]
    InvalidThreadCount,

    #[error("Failed to allocate {bytes} byte output buffer")]
    BufferAllocation { bytes: usize },

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Failed to encode image: {0}")]
    Encode(#[from] image::ImageError),
}
