//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Recursive ray tracing with a bounce budget
//! - Anti-aliasing via multi-sampling
//! - Gamma correction
//! - Multi-threaded rendering over row bands

use crate::band::{partition_rows, render_band};
use crate::output::{ImageBuffer, CHANNELS};
use crate::progress::ProgressReporter;
use crate::sampling::gen_f32;
use crate::{Camera, Color, HitRecord, Hittable, RenderError};
use candela_math::{Interval, Ray};
use log::{debug, info};
use rand::RngCore;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

/// Smallest accepted hit distance; keeps scattered rays from re-hitting
/// the surface they start on.
pub const T_MIN: f32 = 0.001;

/// Worker count used when the hardware parallelism cannot be detected.
pub const FALLBACK_THREADS: usize = 2;

/// Render configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub image_width: u32,
    pub image_height: u32,
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// Worker threads; `None` uses the available hardware parallelism
    pub threads: Option<usize>,
    /// Seed for reproducible renders; `None` seeds from OS entropy
    pub seed: Option<u64>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            image_width: 400,
            image_height: 225,
            samples_per_pixel: 100,
            max_depth: 50,
            threads: None,
            seed: None,
        }
    }
}

impl RenderConfig {
    /// Check the preconditions of [`render`].
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.image_width < 2 || self.image_height < 2 {
            return Err(RenderError::InvalidDimensions {
                width: self.image_width,
                height: self.image_height,
            });
        }
        if self.samples_per_pixel == 0 {
            return Err(RenderError::InvalidSamples);
        }
        if self.threads == Some(0) {
            return Err(RenderError::InvalidThreadCount);
        }
        Ok(())
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.image_width as f32 / self.image_height as f32
    }

    /// Number of worker threads a render will use.
    pub fn thread_count(&self) -> usize {
        self.threads.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(NonZeroUsize::get)
                .unwrap_or(FALLBACK_THREADS)
        })
    }
}

/// Compute the color seen by a ray.
///
/// Traces the ray through the scene, bouncing off surfaces until it escapes
/// to the sky, is absorbed, or `depth` bounces have been spent.
pub fn ray_color(ray: &Ray, world: &dyn Hittable, depth: u32, rng: &mut dyn RngCore) -> Color {
    // Out of bounces: no more light is gathered
    if depth == 0 {
        return Color::ZERO;
    }

    let mut rec = HitRecord::default();

    if !world.hit(ray, Interval::new(T_MIN, f32::INFINITY), &mut rec) {
        return sky_gradient(ray);
    }

    match rec.material.scatter(ray, &rec, rng) {
        Some((attenuation, scattered)) => {
            attenuation * ray_color(&scattered, world, depth - 1, rng)
        }
        None => Color::ZERO,
    }
}

/// Background: white at the horizon blending to sky blue overhead.
pub fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    white * (1.0 - a) + blue * a
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert an averaged linear color to 8-bit RGB.
///
/// Gamma is applied before clamping, then each channel is rounded to the
/// nearest of 256 levels.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    let unit = Interval::new(0.0, 1.0);
    let quantize = |c: f32| (255.0 * unit.clamp(linear_to_gamma(c))).round() as u8;
    [quantize(color.x), quantize(color.y), quantize(color.z)]
}

/// Render a single pixel with multi-sampling and return the averaged color.
///
/// `(i, j)` counts columns from the left and rows from the bottom.
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    i: u32,
    j: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let max_x = (config.image_width - 1) as f32;
    let max_y = (config.image_height - 1) as f32;
    let mut pixel_color = Color::ZERO;

    for _ in 0..config.samples_per_pixel {
        let s = (i as f32 + gen_f32(rng)) / max_x;
        let t = (j as f32 + gen_f32(rng)) / max_y;
        let ray = camera.get_ray(s, t, rng);
        pixel_color += ray_color(&ray, world, config.max_depth, rng);
    }

    pixel_color / config.samples_per_pixel as f32
}

/// Render the entire scene to an 8-bit image.
///
/// Rows are split into one contiguous band per worker thread. The workers
/// share the camera and scene read-only and write into disjoint slices of the
/// output buffer; the call returns once every band is finished.
pub fn render(
    camera: &Camera,
    world: &dyn Hittable,
    config: &RenderConfig,
    progress: &dyn ProgressReporter,
) -> Result<ImageBuffer, RenderError> {
    config.validate()?;

    let mut image = ImageBuffer::try_new(config.image_width, config.image_height)?;
    let bands = partition_rows(config.image_height, config.thread_count());
    let seed = config.seed.unwrap_or_else(rand::random);
    let total_rows = config.image_height as usize;
    let row_bytes = config.image_width as usize * CHANNELS;

    info!(
        "Rendering {}x{} @ {} spp, max depth {}, {} threads",
        config.image_width,
        config.image_height,
        config.samples_per_pixel,
        config.max_depth,
        bands.len()
    );
    debug!("Render seed: {}", seed);

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(bands.len())
        .thread_name(|i| format!("candela-band-{i}"))
        .build()?;

    let rows_done = AtomicUsize::new(0);
    let start = Instant::now();

    pool.scope(|scope| {
        let mut rest: &mut [u8] = &mut image.pixels;
        for band in &bands {
            let band_bytes = band.row_count() as usize * row_bytes;
            let (pixels, tail) = std::mem::take(&mut rest).split_at_mut(band_bytes);
            rest = tail;
            let rows_done = &rows_done;

            scope.spawn(move |_| {
                debug!("Band {} started: rows {}..{}", band.index, band.start, band.end);
                render_band(band, pixels, camera, world, config, seed, || {
                    let done = rows_done.fetch_add(1, Ordering::Relaxed) + 1;
                    progress.row_completed(done, total_rows);
                });
                debug!("Band {} finished", band.index);
            });
        }
    });

    progress.finished();
    info!("Rendered in {:.2?}", start.elapsed());

    Ok(image)
}
