//! Built-in scenes.

use crate::cli::SceneKind;
use candela_renderer::{
    CameraSettings, Color, Dielectric, HittableList, Lambertian, Material, Metal, Sphere, Vec3,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

/// A world plus the camera placement that frames it.
pub struct Scene {
    pub world: HittableList,
    pub camera: CameraSettings,
}

/// Build one of the built-in scenes.
///
/// `seed` drives the random placement in [`SceneKind::Cover`].
pub fn build(kind: SceneKind, seed: Option<u64>) -> Scene {
    match kind {
        SceneKind::TwoSpheres => two_spheres(),
        SceneKind::Materials => materials(),
        SceneKind::Cover => {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            cover(&mut rng)
        }
    }
}

fn shared(material: impl Into<Material>) -> Arc<Material> {
    Arc::new(material.into())
}

/// Small sphere on a huge ground sphere, seen through the default camera.
pub fn two_spheres() -> Scene {
    let diffuse = shared(Lambertian::new(Color::splat(0.5)));

    let mut world = HittableList::new();
    world.add(Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, diffuse.clone()));
    world.add(Sphere::new(Vec3::new(0.0, -100.5, -1.0), 100.0, diffuse));

    Scene {
        world,
        camera: CameraSettings::new(),
    }
}

/// Diffuse, hollow glass and metal spheres with a shallow depth of field.
pub fn materials() -> Scene {
    let ground = shared(Lambertian::new(Color::new(0.8, 0.8, 0.0)));
    let center = shared(Lambertian::new(Color::new(0.1, 0.2, 0.5)));
    let glass = shared(Dielectric::new(1.5));
    let metal = shared(Metal::new(Color::new(0.8, 0.6, 0.2), 0.0));

    let mut world = HittableList::new();
    world.add(Sphere::new(Vec3::new(0.0, -100.5, -1.0), 100.0, ground));
    world.add(Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, center));
    // Negative radius makes the inner surface of a hollow bubble
    world.add(Sphere::new(Vec3::new(-1.0, 0.0, -1.0), 0.5, glass.clone()));
    world.add(Sphere::new(Vec3::new(-1.0, 0.0, -1.0), -0.45, glass));
    world.add(Sphere::new(Vec3::new(1.0, 0.0, -1.0), 0.5, metal));

    let look_from = Vec3::new(3.0, 3.0, 2.0);
    let look_at = Vec3::new(0.0, 0.0, -1.0);
    let camera = CameraSettings::new()
        .with_position(look_from, look_at, Vec3::Y)
        .with_lens(20.0, 2.0, (look_from - look_at).length());

    Scene { world, camera }
}

/// Ground plane of small random spheres around three large feature spheres.
pub fn cover(rng: &mut StdRng) -> Scene {
    let mut world = HittableList::new();

    world.add(Sphere::new(
        Vec3::new(0.0, -1000.0, 0.0),
        1000.0,
        shared(Lambertian::new(Color::splat(0.5))),
    ));

    let glass = shared(Dielectric::new(1.5));

    for a in -11..11 {
        for b in -11..11 {
            let choose_mat: f32 = rng.gen();
            let center = Vec3::new(
                a as f32 + 0.9 * rng.gen::<f32>(),
                0.2,
                b as f32 + 0.9 * rng.gen::<f32>(),
            );

            // Keep clear of the large metal sphere
            if (center - Vec3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            let material = if choose_mat < 0.8 {
                let albedo = random_color(rng, 0.0, 1.0) * random_color(rng, 0.0, 1.0);
                shared(Lambertian::new(albedo))
            } else if choose_mat < 0.95 {
                let albedo = random_color(rng, 0.5, 1.0);
                let fuzz = rng.gen_range(0.0..0.5);
                shared(Metal::new(albedo, fuzz))
            } else {
                glass.clone()
            };
            world.add(Sphere::new(center, 0.2, material));
        }
    }

    world.add(Sphere::new(Vec3::new(0.0, 1.0, 0.0), 1.0, glass));
    world.add(Sphere::new(
        Vec3::new(-4.0, 1.0, 0.0),
        1.0,
        shared(Lambertian::new(Color::new(0.4, 0.2, 0.1))),
    ));
    world.add(Sphere::new(
        Vec3::new(4.0, 1.0, 0.0),
        1.0,
        shared(Metal::new(Color::new(0.7, 0.6, 0.5), 0.0)),
    ));

    let camera = CameraSettings::new()
        .with_position(Vec3::new(13.0, 2.0, 3.0), Vec3::ZERO, Vec3::Y)
        .with_lens(20.0, 0.1, 10.0);

    Scene { world, camera }
}

fn random_color(rng: &mut StdRng, min: f32, max: f32) -> Color {
    Color::new(
        rng.gen_range(min..max),
        rng.gen_range(min..max),
        rng.gen_range(min..max),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use candela_renderer::{HitRecord, Hittable, Interval, Ray};

    #[test]
    fn test_two_spheres_layout() {
        let scene = two_spheres();
        assert_eq!(scene.world.len(), 2);

        // Straight ahead hits the small sphere's front at z = -0.5
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let mut rec = HitRecord::default();
        assert!(scene.world.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec));
        assert!((rec.t - 0.5).abs() < 1e-5);

        // Looking down lands on the ground sphere, one unit off its axis:
        // (y + 100.5)^2 + 1 = 100^2
        let down = Ray::new(Vec3::ZERO, Vec3::NEG_Y);
        let mut rec = HitRecord::default();
        assert!(scene.world.hit(&down, Interval::new(0.001, f32::INFINITY), &mut rec));
        let ground_y = 9999.0_f32.sqrt() - 100.5;
        assert!((rec.p.y - ground_y).abs() < 1e-4, "y = {}", rec.p.y);
        assert!(rec.p.y < -0.5);
        assert!((rec.normal.length() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_materials_scene() {
        let scene = materials();
        assert_eq!(scene.world.len(), 5);
        assert_eq!(scene.camera.look_at(), Vec3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_cover_is_seeded() {
        let a = build(SceneKind::Cover, Some(3));
        let b = build(SceneKind::Cover, Some(3));

        assert_eq!(a.world.len(), b.world.len());
        // Ground plus three feature spheres plus at least some of the grid
        assert!(a.world.len() > 4);
        assert!(a.world.len() <= 4 + 22 * 22);
    }
}
