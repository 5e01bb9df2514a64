//! Candela renderer - CPU path tracing.
//!
//! A Monte Carlo path tracer for scenes made of spheres with diffuse, metal
//! and glass materials. Rendering is split across worker threads by row
//! bands and produces an 8-bit RGB image that can be saved as PNG.

mod band;
mod camera;
mod error;
mod hittable;
mod material;
mod output;
mod progress;
mod renderer;
mod sampling;
mod sphere;

pub use band::{partition_rows, render_band, row_rng, RowBand};
pub use camera::{Camera, CameraSettings};
pub use error::RenderError;
pub use hittable::{HitRecord, Hittable, HittableList};
pub use material::{reflect, refract, Color, Dielectric, Lambertian, Material, Metal};
pub use output::{ImageBuffer, CHANNELS};
pub use progress::{NoProgress, ProgressReporter, StderrProgress};
pub use renderer::{
    color_to_rgb, linear_to_gamma, ray_color, render, render_pixel, sky_gradient, RenderConfig,
    FALLBACK_THREADS, T_MIN,
};
pub use sampling::{gen_f32, random_in_unit_disk, random_in_unit_sphere, random_unit_vector};
pub use sphere::Sphere;

/// Re-export Vec3 and common math types from candela_math
pub use candela_math::{Interval, Ray, Vec3};
