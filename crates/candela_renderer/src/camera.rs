//! Thin-lens camera for ray generation.

use crate::sampling::random_in_unit_disk;
use candela_math::{Ray, Vec3};
use rand::RngCore;

/// Camera placement and lens settings, turned into a [`Camera`] by [`build`].
///
/// [`build`]: CameraSettings::build
#[derive(Debug, Clone, PartialEq)]
pub struct CameraSettings {
    look_from: Vec3,
    look_at: Vec3,
    vup: Vec3,

    vfov: f32,         // Vertical field of view in degrees
    aspect_ratio: f32, // Image width / height
    aperture: f32,     // Lens diameter, 0 for a pinhole
    focus_dist: f32,   // Distance from camera to plane of perfect focus
}

impl CameraSettings {
    /// Pinhole camera at the origin looking down -Z with a 90 degree field of view.
    pub fn new() -> Self {
        Self {
            look_from: Vec3::ZERO,
            look_at: Vec3::NEG_Z,
            vup: Vec3::Y,
            vfov: 90.0,
            aspect_ratio: 16.0 / 9.0,
            aperture: 0.0,
            focus_dist: 1.0,
        }
    }

    /// Set camera position.
    pub fn with_position(mut self, look_from: Vec3, look_at: Vec3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self
    }

    /// Set lens settings.
    pub fn with_lens(mut self, vfov: f32, aperture: f32, focus_dist: f32) -> Self {
        self.vfov = vfov;
        self.aperture = aperture;
        self.focus_dist = focus_dist;
        self
    }

    pub fn with_aspect_ratio(mut self, aspect_ratio: f32) -> Self {
        self.aspect_ratio = aspect_ratio;
        self
    }

    pub fn look_at(&self) -> Vec3 {
        self.look_at
    }

    /// Compute the camera frame and the image plane at the focus distance.
    pub fn build(&self) -> Camera {
        let theta = self.vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h;
        let viewport_width = self.aspect_ratio * viewport_height;

        // Camera basis vectors
        let w = (self.look_from - self.look_at).normalize();
        let u = self.vup.cross(w).normalize();
        let v = w.cross(u);

        let origin = self.look_from;
        let horizontal = self.focus_dist * viewport_width * u;
        let vertical = self.focus_dist * viewport_height * v;
        let lower_left_corner = origin - horizontal / 2.0 - vertical / 2.0 - self.focus_dist * w;

        Camera {
            origin,
            lower_left_corner,
            horizontal,
            vertical,
            u,
            v,
            w,
            lens_radius: self.aperture / 2.0,
        }
    }
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self::new()
    }
}

/// Camera for generating rays into the scene.
///
/// Immutable once built; `get_ray` only reads it, so one camera can be shared
/// by every worker thread.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    origin: Vec3,
    lower_left_corner: Vec3,
    horizontal: Vec3,
    vertical: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    lens_radius: f32,
}

impl Camera {
    /// Generate a ray through image-plane coordinates `(s, t)`.
    ///
    /// `(0, 0)` is the lower-left corner and `(1, 1)` the upper-right; values
    /// slightly outside that range are fine. The direction is not normalized.
    pub fn get_ray(&self, s: f32, t: f32, rng: &mut dyn RngCore) -> Ray {
        let offset = if self.lens_radius > 0.0 {
            let rd = self.lens_radius * random_in_unit_disk(rng);
            self.u * rd.x + self.v * rd.y
        } else {
            Vec3::ZERO
        };

        let origin = self.origin + offset;
        let direction = self.lower_left_corner + s * self.horizontal + t * self.vertical - origin;

        Ray::new(origin, direction)
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    pub fn lens_radius(&self) -> f32 {
        self.lens_radius
    }

    /// Unit vector pointing from the scene back towards the eye.
    pub fn backward(&self) -> Vec3 {
        self.w
    }
}

impl Default for Camera {
    fn default() -> Self {
        CameraSettings::new().build()
    }
}
