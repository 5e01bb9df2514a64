//! Hittable trait and HitRecord for ray-object intersection.

use crate::material::{Material, PLACEHOLDER_MATERIAL};
use candela_math::{Interval, Ray, Vec3};

/// Record of a ray-object intersection.
#[derive(Debug, Clone)]
pub struct HitRecord<'a> {
    /// Point of intersection
    pub p: Vec3,
    /// Unit surface normal, always pointing against the incoming ray
    pub normal: Vec3,
    /// Material of the shape that was hit
    pub material: &'a Material,
    /// Ray parameter where the intersection occurs
    pub t: f32,
    /// Whether the ray hit the outside of the surface
    pub front_face: bool,
}

impl Default for HitRecord<'_> {
    fn default() -> Self {
        Self {
            p: Vec3::ZERO,
            normal: Vec3::ZERO,
            material: &PLACEHOLDER_MATERIAL,
            t: 0.0,
            front_face: false,
        }
    }
}

impl HitRecord<'_> {
    /// Set the face normal based on ray direction and outward normal.
    ///
    /// `outward_normal` must be unit length.
    pub fn set_face_normal(&mut self, ray: &Ray, outward_normal: Vec3) {
        // If the ray and normal point the same way, we're inside
        self.front_face = ray.direction().dot(outward_normal) < 0.0;

        self.normal = if self.front_face {
            outward_normal
        } else {
            -outward_normal
        };
    }
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Test if a ray hits this object strictly inside `ray_t`.
    ///
    /// Returns true if hit, and fills in the hit record. The record is left
    /// untouched on a miss.
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool;
}

/// The scene: an ordered list of hittable objects.
#[derive(Default)]
pub struct HittableList {
    objects: Vec<Box<dyn Hittable>>,
}

impl HittableList {
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
        }
    }

    /// Add an object to the list.
    pub fn add(&mut self, object: impl Hittable + 'static) {
        self.objects.push(Box::new(object));
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Hittable for HittableList {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        let mut hit_anything = false;
        let mut closest_so_far = ray_t.max;

        for object in &self.objects {
            if object.hit(ray, ray_t.with_max(closest_so_far), rec) {
                hit_anything = true;
                closest_so_far = rec.t;
            }
        }

        hit_anything
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Lambertian, Sphere};
    use std::sync::Arc;

    fn diffuse(r: f32) -> Arc<Material> {
        Arc::new(Lambertian::new(Vec3::new(r, 0.5, 0.5)).into())
    }

    #[test]
    fn test_empty_list_misses() {
        let world = HittableList::new();
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let mut rec = HitRecord::default();

        assert!(world.is_empty());
        assert!(!world.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec));
    }

    #[test]
    fn test_closest_hit_regardless_of_order() {
        let near = diffuse(0.1);
        let far = diffuse(0.9);

        // Far sphere inserted first: the scan must still report the near one
        let mut world = HittableList::new();
        world.add(Sphere::new(Vec3::new(0.0, 0.0, -10.0), 1.0, far.clone()));
        world.add(Sphere::new(Vec3::new(0.0, 0.0, -3.0), 1.0, near.clone()));

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let mut rec = HitRecord::default();
        assert!(world.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec));
        assert!((rec.t - 2.0).abs() < 1e-5);
        assert!(std::ptr::eq(rec.material, near.as_ref()));

        let mut reversed = HittableList::new();
        reversed.add(Sphere::new(Vec3::new(0.0, 0.0, -3.0), 1.0, near.clone()));
        reversed.add(Sphere::new(Vec3::new(0.0, 0.0, -10.0), 1.0, far));

        let mut rec = HitRecord::default();
        assert!(reversed.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec));
        assert!((rec.t - 2.0).abs() < 1e-5);
        assert!(std::ptr::eq(rec.material, near.as_ref()));
    }

    #[test]
    fn test_set_face_normal_opposes_ray() {
        let mut rec = HitRecord::default();
        let outward = Vec3::Z;

        let entering = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
        rec.set_face_normal(&entering, outward);
        assert!(rec.front_face);
        assert_eq!(rec.normal, Vec3::Z);

        let leaving = Ray::new(Vec3::ZERO, Vec3::Z);
        rec.set_face_normal(&leaving, outward);
        assert!(!rec.front_face);
        assert_eq!(rec.normal, Vec3::NEG_Z);
    }
}
