//! Row-band partitioning for multi-threaded rendering.
//!
//! The image rows are split into contiguous, non-overlapping bands, one per
//! worker. Each band owns a disjoint slice of the output buffer, so workers
//! write pixels without any synchronization.

use crate::output::CHANNELS;
use crate::renderer::{color_to_rgb, render_pixel, RenderConfig};
use crate::{Camera, Hittable};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::ops::Range;

/// A half-open range of image rows `[start, end)`, counted from the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowBand {
    /// First row of the band
    pub start: u32,
    /// One past the last row of the band
    pub end: u32,
    /// Index of this band in top-to-bottom order
    pub index: usize,
}

impl RowBand {
    pub fn new(start: u32, end: u32, index: usize) -> Self {
        Self { start, end, index }
    }

    pub fn row_count(&self) -> u32 {
        self.end - self.start
    }

    pub fn rows(&self) -> Range<u32> {
        self.start..self.end
    }
}

/// Split `height` rows into at most `workers` contiguous bands.
///
/// The bands cover `[0, height)` exactly once. When `height` does not divide
/// evenly, the first `height % workers` bands get one extra row. No band is
/// ever empty, so fewer bands than workers are returned for tiny images.
pub fn partition_rows(height: u32, workers: usize) -> Vec<RowBand> {
    if height == 0 {
        return Vec::new();
    }

    let workers = u32::try_from(workers.max(1)).unwrap_or(u32::MAX).min(height);
    let base = height / workers;
    let extra = height % workers;

    let mut bands = Vec::with_capacity(workers as usize);
    let mut start = 0;
    for i in 0..workers {
        let len = base + u32::from(i < extra);
        bands.push(RowBand::new(start, start + len, i as usize));
        start += len;
    }

    bands
}

/// Generator for one image row.
///
/// Seeding per row keeps a seeded render identical for any thread count.
pub fn row_rng(seed: u64, row: u32) -> StdRng {
    StdRng::seed_from_u64(seed ^ u64::from(row).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

/// Render every row of `band` into `pixels`.
///
/// `pixels` is the band's own slice of the output buffer and must hold
/// exactly `band.row_count()` rows. `on_row_done` runs after each row.
pub fn render_band(
    band: &RowBand,
    pixels: &mut [u8],
    camera: &Camera,
    world: &dyn Hittable,
    config: &RenderConfig,
    seed: u64,
    mut on_row_done: impl FnMut(),
) {
    let row_bytes = config.image_width as usize * CHANNELS;
    debug_assert_eq!(pixels.len(), band.row_count() as usize * row_bytes);

    for (row, row_pixels) in band.rows().zip(pixels.chunks_exact_mut(row_bytes)) {
        let mut rng = row_rng(seed, row);
        // Buffer rows run top to bottom, image-plane rows bottom to top
        let j = config.image_height - 1 - row;

        for (i, pixel) in row_pixels.chunks_exact_mut(CHANNELS).enumerate() {
            let color = render_pixel(camera, world, i as u32, j, config, &mut rng);
            pixel.copy_from_slice(&color_to_rgb(color));
        }

        on_row_done();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_exact_cover(height: u32, workers: usize) {
        let bands = partition_rows(height, workers);
        let mut covered = vec![0u32; height as usize];

        let mut expected_start = 0;
        for (i, band) in bands.iter().enumerate() {
            assert_eq!(band.index, i);
            assert_eq!(band.start, expected_start, "gap or overlap before band {i}");
            assert!(band.row_count() > 0);
            for row in band.rows() {
                covered[row as usize] += 1;
            }
            expected_start = band.end;
        }

        assert_eq!(expected_start, height);
        assert!(covered.iter().all(|&n| n == 1), "H={height} N={workers}");
    }

    #[test]
    fn test_partition_covers_rows_exactly_once() {
        for height in [1, 2, 3, 7, 64, 100, 225, 1080] {
            for workers in 1..=17 {
                assert_exact_cover(height, workers);
            }
        }
    }

    #[test]
    fn test_partition_uneven_split() {
        let bands = partition_rows(10, 4);
        let sizes: Vec<u32> = bands.iter().map(|b| b.row_count()).collect();

        assert_eq!(sizes, vec![3, 3, 2, 2]);
        assert_eq!(bands[0].rows(), 0..3);
        assert_eq!(bands[3].rows(), 8..10);
    }

    #[test]
    fn test_partition_more_workers_than_rows() {
        let bands = partition_rows(3, 8);

        assert_eq!(bands.len(), 3);
        assert!(bands.iter().all(|b| b.row_count() == 1));
    }

    #[test]
    fn test_partition_edge_cases() {
        assert!(partition_rows(0, 4).is_empty());
        // Zero workers still yields one band
        assert_eq!(partition_rows(5, 0), vec![RowBand::new(0, 5, 0)]);
    }

    #[test]
    fn test_row_rng_is_per_row() {
        use rand::Rng;

        let a: u64 = row_rng(42, 3).gen();
        let b: u64 = row_rng(42, 3).gen();
        let c: u64 = row_rng(42, 4).gen();

        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
