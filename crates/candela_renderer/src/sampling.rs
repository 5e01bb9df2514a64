//! Random sampling helpers.
//!
//! Every helper draws from the generator it is handed, so each worker thread
//! can own an independent generator.

use candela_math::Vec3;
use rand::{Rng, RngCore};

/// Uniform `f32` in `[0, 1)`.
#[inline]
pub fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    rng.gen::<f32>()
}

/// Uniform `f32` in `[min, max)`.
#[inline]
pub fn gen_f32_range(rng: &mut dyn RngCore, min: f32, max: f32) -> f32 {
    min + (max - min) * gen_f32(rng)
}

/// Random point strictly inside the unit sphere (rejection sampling).
pub fn random_in_unit_sphere(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = Vec3::new(
            gen_f32_range(rng, -1.0, 1.0),
            gen_f32_range(rng, -1.0, 1.0),
            gen_f32_range(rng, -1.0, 1.0),
        );
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Random unit vector, uniformly distributed on the sphere.
pub fn random_unit_vector(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = random_in_unit_sphere(rng);
        let len_sq = p.length_squared();
        // Tiny vectors lose precision when normalized
        if len_sq > 1e-6 {
            return p / len_sq.sqrt();
        }
    }
}

/// Random point inside the unit disk in the xy plane.
pub fn random_in_unit_disk(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = Vec3::new(
            gen_f32_range(rng, -1.0, 1.0),
            gen_f32_range(rng, -1.0, 1.0),
            0.0,
        );
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}
