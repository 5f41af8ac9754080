use rand::Rng;

use crate::error::RenderError;
use crate::ray::Ray;
use crate::vec3::{Point3, Vec3};

/// Configuration for the thin-lens camera model with depth-of-field and a
/// shutter interval for motion blur.
pub struct CameraConfig {
    pub look_from: Point3,
    pub look_at: Point3,
    pub vup: Vec3,
    pub vfov_degrees: f64,
    pub aspect_ratio: f64,
    pub aperture: f64,
    pub focus_dist: f64,
    pub time0: f64,
    pub time1: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            look_from: Point3::new(0.0, 1.0, 3.0),
            look_at: Point3::zero(),
            vup: Vec3::unit_y(),
            vfov_degrees: 40.0,
            aspect_ratio: 16.0 / 9.0,
            aperture: 0.0,
            focus_dist: 3.0,
            time0: 0.0,
            time1: 0.0,
        }
    }
}

/// A thin-lens camera: it constructs an orthonormal basis (u, v, w) from
/// the look-at parameters, then generates primary rays by mapping pixel
/// coordinates to points on the virtual film plane.
///
/// Depth of field is simulated by jittering the ray origin across a disk
/// of radius `aperture/2` centered at the camera position, while keeping
/// the focal point fixed. Ray time is drawn uniformly from the shutter
/// interval to support motion blur on `MovingSphere` surfaces.
pub struct Camera {
    origin: Point3,
    lower_left: Point3,
    horizontal: Vec3,
    vertical: Vec3,
    u: Vec3,
    v: Vec3,
    lens_radius: f64,
    time0: f64,
    time1: f64,
}

impl Camera {
    /// Constructs the camera from configuration, validating the parameters
    /// that would otherwise produce NaNs or an inverted image plane.
    ///
    /// The orthonormal basis is:
    ///   w = normalize(look_from - look_at)   (points backward, away from scene)
    ///   u = normalize(vup × w)               (points right)
    ///   v = w × u                             (points up, orthogonal to both)
    pub fn new(config: &CameraConfig) -> Result<Self, RenderError> {
        if !(config.vfov_degrees > 0.0 && config.vfov_degrees < 180.0) {
            return Err(RenderError::configuration(format!(
                "vfov_degrees must be in (0, 180), got {}",
                config.vfov_degrees
            )));
        }
        if !(config.aspect_ratio > 0.0) {
            return Err(RenderError::configuration(format!(
                "aspect_ratio must be positive, got {}",
                config.aspect_ratio
            )));
        }
        if !(config.focus_dist > 0.0) {
            return Err(RenderError::configuration(format!(
                "focus_dist must be positive, got {}",
                config.focus_dist
            )));
        }
        if config.aperture < 0.0 {
            return Err(RenderError::configuration(format!(
                "aperture must be non-negative, got {}",
                config.aperture
            )));
        }
        if config.time0 > config.time1 {
            return Err(RenderError::configuration(format!(
                "time0 ({}) must not exceed time1 ({})",
                config.time0, config.time1
            )));
        }

        let theta = config.vfov_degrees.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h;
        let viewport_width = config.aspect_ratio * viewport_height;

        let w = (config.look_from - config.look_at).normalized();
        let u = config.vup.cross(w).normalized();
        let v = w.cross(u);

        let horizontal = u * viewport_width * config.focus_dist;
        let vertical = v * viewport_height * config.focus_dist;
        let lower_left = config.look_from - horizontal / 2.0 - vertical / 2.0 - w * config.focus_dist;

        Ok(Camera {
            origin: config.look_from,
            lower_left,
            horizontal,
            vertical,
            u,
            v,
            lens_radius: config.aperture / 2.0,
            time0: config.time0,
            time1: config.time1,
        })
    }

    /// Generates a primary ray for the given `(s, t)` coordinates in
    /// `[0,1]²`. When `lens_radius > 0`, the origin is perturbed for
    /// depth-of-field; the ray's time is sampled uniformly from the
    /// shutter interval.
    pub fn get_ray(&self, s: f64, t: f64, rng: &mut dyn rand::RngCore) -> Ray {
        let rd = Vec3::random_in_unit_disk(rng) * self.lens_radius;
        let offset = self.u * rd.x + self.v * rd.y;
        let time = if self.time0 < self.time1 {
            rng.gen_range(self.time0..self.time1)
        } else {
            self.time0
        };
        Ray::new(
            self.origin + offset,
            self.lower_left + self.horizontal * s + self.vertical * t - self.origin - offset,
            time,
        )
    }
}
