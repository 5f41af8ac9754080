use std::sync::Arc;

use crate::aabb::Aabb;
use crate::hittable::{HitRecord, Hittable};
use crate::material::Material;
use crate::ray::Ray;
use crate::vec3::{Point3, Vec3};

/// Padding applied to the planar axis so a flat rectangle still has a
/// non-degenerate AABB (the slab test divides by zero-width spans
/// otherwise).
const PLANE_EPSILON: f64 = 1e-4;

/// A rectangle lying in the plane `z = k`, spanning `[x0, x1] × [y0, y1]`.
pub struct RectangleXy {
    pub x0: f64,
    pub x1: f64,
    pub y0: f64,
    pub y1: f64,
    pub k: f64,
    pub material: Arc<dyn Material>,
}

impl RectangleXy {
    pub fn new(x0: f64, x1: f64, y0: f64, y1: f64, k: f64, material: Arc<dyn Material>) -> Self {
        Self { x0, x1, y0, y1, k, material }
    }
}

impl Hittable for RectangleXy {
    fn hit(&self, ray: &Ray, t_min: f64, t_max: f64) -> Option<HitRecord<'_>> {
        if ray.direction.z == 0.0 {
            return None;
        }
        let t = (self.k - ray.origin.z) / ray.direction.z;
        if t <= t_min || t >= t_max {
            return None;
        }
        let x = ray.origin.x + ray.direction.x * t;
        let y = ray.origin.y + ray.direction.y * t;
        if x < self.x0 || x > self.x1 || y < self.y0 || y > self.y1 {
            return None;
        }

        let point = ray.at(t);
        let outward_normal = Vec3::unit_z();
        let mut rec = HitRecord { point, normal: outward_normal, t, front_face: true, material: self.material.as_ref() };
        rec.set_face_normal(ray, outward_normal);
        Some(rec)
    }

    fn bounding_box(&self, _t0: f64, _t1: f64) -> Option<Aabb> {
        Some(Aabb::new(
            Point3::new(self.x0, self.y0, self.k - PLANE_EPSILON),
            Point3::new(self.x1, self.y1, self.k + PLANE_EPSILON),
        ))
    }
}

/// A rectangle lying in the plane `x = k`, spanning `[y0, y1] × [z0, z1]`.
pub struct RectangleYz {
    pub y0: f64,
    pub y1: f64,
    pub z0: f64,
    pub z1: f64,
    pub k: f64,
    pub material: Arc<dyn Material>,
}

impl RectangleYz {
    pub fn new(y0: f64, y1: f64, z0: f64, z1: f64, k: f64, material: Arc<dyn Material>) -> Self {
        Self { y0, y1, z0, z1, k, material }
    }
}

impl Hittable for RectangleYz {
    fn hit(&self, ray: &Ray, t_min: f64, t_max: f64) -> Option<HitRecord<'_>> {
        if ray.direction.x == 0.0 {
            return None;
        }
        let t = (self.k - ray.origin.x) / ray.direction.x;
        if t <= t_min || t >= t_max {
            return None;
        }
        let y = ray.origin.y + ray.direction.y * t;
        let z = ray.origin.z + ray.direction.z * t;
        if y < self.y0 || y > self.y1 || z < self.z0 || z > self.z1 {
            return None;
        }

        let point = ray.at(t);
        let outward_normal = Vec3::unit_x();
        let mut rec = HitRecord { point, normal: outward_normal, t, front_face: true, material: self.material.as_ref() };
        rec.set_face_normal(ray, outward_normal);
        Some(rec)
    }

    fn bounding_box(&self, _t0: f64, _t1: f64) -> Option<Aabb> {
        Some(Aabb::new(
            Point3::new(self.k - PLANE_EPSILON, self.y0, self.z0),
            Point3::new(self.k + PLANE_EPSILON, self.y1, self.z1),
        ))
    }
}

/// A rectangle lying in the plane `y = k`, spanning `[z0, z1] × [x0, x1]`.
pub struct RectangleZx {
    pub z0: f64,
    pub z1: f64,
    pub x0: f64,
    pub x1: f64,
    pub k: f64,
    pub material: Arc<dyn Material>,
}

impl RectangleZx {
    pub fn new(z0: f64, z1: f64, x0: f64, x1: f64, k: f64, material: Arc<dyn Material>) -> Self {
        Self { z0, z1, x0, x1, k, material }
    }
}

impl Hittable for RectangleZx {
    fn hit(&self, ray: &Ray, t_min: f64, t_max: f64) -> Option<HitRecord<'_>> {
        if ray.direction.y == 0.0 {
            return None;
        }
        let t = (self.k - ray.origin.y) / ray.direction.y;
        if t <= t_min || t >= t_max {
            return None;
        }
        let z = ray.origin.z + ray.direction.z * t;
        let x = ray.origin.x + ray.direction.x * t;
        if z < self.z0 || z > self.z1 || x < self.x0 || x > self.x1 {
            return None;
        }

        let point = ray.at(t);
        let outward_normal = Vec3::unit_y();
        let mut rec = HitRecord { point, normal: outward_normal, t, front_face: true, material: self.material.as_ref() };
        rec.set_face_normal(ray, outward_normal);
        Some(rec)
    }

    fn bounding_box(&self, _t0: f64, _t1: f64) -> Option<Aabb> {
        Some(Aabb::new(
            Point3::new(self.x0, self.k - PLANE_EPSILON, self.z0),
            Point3::new(self.x1, self.k + PLANE_EPSILON, self.z1),
        ))
    }
}
