//! Sphere primitive for ray tracing.

use crate::hittable::{HitRecord, Hittable};
use crate::Material;
use candela_math::{Interval, Ray, Vec3};
use std::sync::Arc;

/// A sphere primitive.
///
/// A negative radius keeps the same surface but flips the outward normal,
/// which is how hollow glass shells are modelled.
#[derive(Debug, Clone)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
    material: Arc<Material>,
}

impl Sphere {
    pub fn new(center: Vec3, radius: f32, material: Arc<Material>) -> Self {
        Self {
            center,
            radius,
            material,
        }
    }
}

impl Hittable for Sphere {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        let oc = self.center - ray.origin();
        let a = ray.direction().length_squared();
        let h = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return false;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = (h - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (h + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return false;
            }
        }

        rec.t = root;
        rec.p = ray.at(rec.t);
        let outward_normal = (rec.p - self.center) / self.radius;
        rec.set_face_normal(ray, outward_normal);
        rec.material = self.material.as_ref();

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Dielectric, Lambertian};

    const T_RANGE: Interval = Interval {
        min: 0.001,
        max: f32::INFINITY,
    };

    fn unit_sphere() -> Sphere {
        Sphere::new(
            Vec3::ZERO,
            1.0,
            Arc::new(Lambertian::new(Vec3::splat(0.5)).into()),
        )
    }

    #[test]
    fn test_sphere_hit_from_outside() {
        let sphere = unit_sphere();
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
        let mut rec = HitRecord::default();

        assert!(sphere.hit(&ray, T_RANGE, &mut rec));
        assert!((rec.t - 4.0).abs() < 1e-5);
        assert!((rec.p - Vec3::Z).length() < 1e-5);
        assert!(rec.front_face);
        assert!((rec.normal - Vec3::Z).length() < 1e-5);
    }

    #[test]
    fn test_sphere_hit_unnormalized_direction() {
        let sphere = unit_sphere();
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -2.0));
        let mut rec = HitRecord::default();

        assert!(sphere.hit(&ray, T_RANGE, &mut rec));
        assert!((rec.t - 2.0).abs() < 1e-5);
        assert!((rec.p - Vec3::Z).length() < 1e-5);
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = unit_sphere();
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::Y);
        let mut rec = HitRecord::default();

        assert!(!sphere.hit(&ray, T_RANGE, &mut rec));
    }

    #[test]
    fn test_tangent_ray_hits_once() {
        let sphere = unit_sphere();
        // Grazes the top of the sphere at (0, 1, 0)
        let ray = Ray::new(Vec3::new(0.0, 1.0, 5.0), Vec3::NEG_Z);
        let mut rec = HitRecord::default();

        assert!(sphere.hit(&ray, T_RANGE, &mut rec));
        assert!((rec.t - 5.0).abs() < 1e-4);
        assert!((rec.p - Vec3::Y).length() < 1e-4);

        // Nothing left past the single contact point
        let mut after = HitRecord::default();
        assert!(!sphere.hit(&ray, Interval::new(rec.t + 1e-3, f32::INFINITY), &mut after));
    }

    #[test]
    fn test_sphere_behind_interval_misses() {
        let sphere = unit_sphere();
        // Both roots (t = -6 and t = -4) lie before t_min
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::Z);
        let mut rec = HitRecord::default();

        assert!(!sphere.hit(&ray, T_RANGE, &mut rec));
        assert_eq!(rec.t, 0.0);
    }

    #[test]
    fn test_roots_outside_upper_bound_miss() {
        let sphere = unit_sphere();
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
        let mut rec = HitRecord::default();

        assert!(!sphere.hit(&ray, Interval::new(0.001, 3.5), &mut rec));
    }

    #[test]
    fn test_hit_from_inside_takes_far_root() {
        let sphere = unit_sphere();
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        let mut rec = HitRecord::default();

        assert!(sphere.hit(&ray, T_RANGE, &mut rec));
        assert!((rec.t - 1.0).abs() < 1e-5);
        assert!(!rec.front_face);
        assert!((rec.normal - Vec3::NEG_X).length() < 1e-5);
    }

    #[test]
    fn test_normal_always_opposes_ray() {
        let glass = Arc::new(Material::from(Dielectric::new(1.5)));
        let spheres = [
            Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, glass.clone()),
            Sphere::new(Vec3::new(0.0, 0.0, -1.0), -0.45, glass),
        ];
        let origins = [
            Vec3::new(0.0, 0.0, 2.0),
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::new(0.3, -0.2, 1.0),
        ];

        for sphere in &spheres {
            for origin in origins {
                for k in 0..64 {
                    let angle = k as f32 * 0.1;
                    let target = Vec3::new(0.3 * angle.cos(), 0.3 * angle.sin(), -1.0);
                    let ray = Ray::new(origin, target - origin);
                    let mut rec = HitRecord::default();
                    if sphere.hit(&ray, T_RANGE, &mut rec) {
                        assert!(rec.normal.dot(ray.direction()) <= 0.0);
                        assert!((rec.normal.length() - 1.0).abs() < 1e-4);
                    }
                }
            }
        }
    }
}
