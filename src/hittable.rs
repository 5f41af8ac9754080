use std::sync::Arc;

use crate::aabb::Aabb;
use crate::material::Material;
use crate::ray::Ray;
use crate::vec3::{Point3, Vec3};

/// Information returned by a successful intersection.
///
/// `normal` is always oriented against the incoming ray: if `front_face` is
/// true, `normal` equals the geometric outward normal and
/// `dot(ray.direction, normal) < 0`; otherwise it has been negated. This
/// removes sign checks from material code.
pub struct HitRecord<'a> {
    pub point: Point3,
    pub normal: Vec3,
    pub t: f64,
    pub front_face: bool,
    pub material: &'a dyn Material,
}

impl<'a> HitRecord<'a> {
    /// Orients `outward_normal` against `ray` and records whether the ray
    /// struck the geometric outside.
    pub fn set_face_normal(&mut self, ray: &Ray, outward_normal: Vec3) {
        self.front_face = ray.direction.dot(outward_normal) < 0.0;
        self.normal = if self.front_face {
            outward_normal
        } else {
            -outward_normal
        };
    }
}

/// The contract every surface primitive and the BVH itself satisfy.
pub trait Hittable: Send + Sync {
    /// Returns a hit with `t ∈ (t_min, t_max)`, or `None`.
    fn hit(&self, ray: &Ray, t_min: f64, t_max: f64) -> Option<HitRecord<'_>>;

    /// Returns an AABB enclosing the surface over `[t0, t1]`. `None` only
    /// for ill-defined cases — every concrete primitive in this crate
    /// returns `Some`.
    fn bounding_box(&self, t0: f64, t1: f64) -> Option<Aabb>;
}

impl Hittable for Arc<dyn Hittable> {
    fn hit(&self, ray: &Ray, t_min: f64, t_max: f64) -> Option<HitRecord<'_>> {
        self.as_ref().hit(ray, t_min, t_max)
    }

    fn bounding_box(&self, t0: f64, t1: f64) -> Option<Aabb> {
        self.as_ref().bounding_box(t0, t1)
    }
}

/// A closest-hit scan across a list of surfaces — used by `Cuboid` to
/// delegate to its six constituent rectangles and by tests cross-checking
/// BVH traversal against exhaustive search.
pub fn hit_list(objects: &[Arc<dyn Hittable>], ray: &Ray, t_min: f64, t_max: f64) -> Option<HitRecord<'_>> {
    let mut closest = t_max;
    let mut result = None;
    for object in objects {
        if let Some(hit) = object.hit(ray, t_min, closest) {
            closest = hit.t;
            result = Some(hit);
        }
    }
    result
}
