use std::sync::Arc;

use crate::aabb::Aabb;
use crate::hittable::{HitRecord, Hittable};
use crate::material::Material;
use crate::ray::Ray;
use crate::vec3::{Point3, Vec3};

/// A static sphere: center, radius, and the material covering its surface.
pub struct Sphere {
    pub center: Point3,
    pub radius: f64,
    pub material: Arc<dyn Material>,
}

impl Sphere {
    pub fn new(center: Point3, radius: f64, material: Arc<dyn Material>) -> Self {
        Self { center, radius, material }
    }
}

/// Solves `a·t² + 2·half_b·t + c = 0` for the sphere equation and returns
/// the smaller in-range root, trying the larger root if the smaller one
/// falls outside `(t_min, t_max)`.
fn sphere_hit_t(oc: Vec3, direction: Vec3, radius: f64, t_min: f64, t_max: f64) -> Option<f64> {
    let a = direction.length_squared();
    let half_b = oc.dot(direction);
    let c = oc.length_squared() - radius * radius;
    let discriminant = half_b * half_b - a * c;
    if discriminant < 0.0 {
        return None;
    }
    let sqrtd = discriminant.sqrt();

    let mut root = (-half_b - sqrtd) / a;
    if root <= t_min || root >= t_max {
        root = (-half_b + sqrtd) / a;
        if root <= t_min || root >= t_max {
            return None;
        }
    }
    Some(root)
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray, t_min: f64, t_max: f64) -> Option<HitRecord<'_>> {
        let oc = ray.origin - self.center;
        let t = sphere_hit_t(oc, ray.direction, self.radius, t_min, t_max)?;

        let point = ray.at(t);
        let outward_normal = (point - self.center) / self.radius;
        let mut rec = HitRecord {
            point,
            normal: outward_normal,
            t,
            front_face: true,
            material: self.material.as_ref(),
        };
        rec.set_face_normal(ray, outward_normal);
        Some(rec)
    }

    fn bounding_box(&self, _t0: f64, _t1: f64) -> Option<Aabb> {
        let r = Vec3::new(self.radius.abs(), self.radius.abs(), self.radius.abs());
        Some(Aabb::new(self.center - r, self.center + r))
    }
}

/// A sphere whose center moves linearly between `center0` (at `time0`) and
/// `center1` (at `time1`); `hit` evaluates the center at `ray.time`.
pub struct MovingSphere {
    pub center0: Point3,
    pub center1: Point3,
    pub time0: f64,
    pub time1: f64,
    pub radius: f64,
    pub material: Arc<dyn Material>,
}

impl MovingSphere {
    pub fn new(
        center0: Point3,
        center1: Point3,
        time0: f64,
        time1: f64,
        radius: f64,
        material: Arc<dyn Material>,
    ) -> Self {
        Self { center0, center1, time0, time1, radius, material }
    }

    pub fn center(&self, time: f64) -> Point3 {
        let t = (time - self.time0) / (self.time1 - self.time0);
        self.center0 + (self.center1 - self.center0) * t
    }
}

impl Hittable for MovingSphere {
    fn hit(&self, ray: &Ray, t_min: f64, t_max: f64) -> Option<HitRecord<'_>> {
        let center = self.center(ray.time);
        let oc = ray.origin - center;
        let t = sphere_hit_t(oc, ray.direction, self.radius, t_min, t_max)?;

        let point = ray.at(t);
        let outward_normal = (point - center) / self.radius;
        let mut rec = HitRecord {
            point,
            normal: outward_normal,
            t,
            front_face: true,
            material: self.material.as_ref(),
        };
        rec.set_face_normal(ray, outward_normal);
        Some(rec)
    }

    fn bounding_box(&self, t0: f64, t1: f64) -> Option<Aabb> {
        let r = Vec3::new(self.radius.abs(), self.radius.abs(), self.radius.abs());
        let box0 = Aabb::new(self.center(t0) - r, self.center(t0) + r);
        let box1 = Aabb::new(self.center(t1) - r, self.center(t1) + r);
        Some(Aabb::surrounding(&box0, &box1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Lambertian;
    use crate::vec3::Color;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    fn lambertian(color: Color) -> Arc<dyn Material> {
        Arc::new(Lambertian::new(color))
    }

    // Property 1 & 2, scenario A: ground sphere hit at the expected t/normal.
    #[test]
    fn ground_sphere_hit_matches_expected_t_and_normal() {
        let sphere = Sphere::new(Point3::new(0.0, -100.5, -1.0), 100.0, lambertian(Color::new(0.8, 0.8, 0.0)));
        let ray = Ray::new(Point3::zero(), Vec3::new(0.0, -0.5, -1.0), 0.0);
        let hit = sphere.hit(&ray, 0.001, f64::INFINITY).expect("must hit ground sphere");
        assert!((hit.t - 0.5).abs() < 1e-6);
        assert!((hit.normal - Vec3::new(0.0, 1.0, 0.0)).length() < 1e-6);
    }

    // Property 1 & 2 as a randomized check across many spheres and rays.
    #[test]
    fn sphere_hit_satisfies_distance_and_normal_invariants() {
        let mut rng = SmallRng::seed_from_u64(99);
        for _ in 0..2000 {
            let center = Point3::new(
                rng.gen_range(-5.0..5.0),
                rng.gen_range(-5.0..5.0),
                rng.gen_range(-5.0..5.0),
            );
            let radius: f64 = rng.gen_range(0.1..3.0);
            let sphere = Sphere::new(center, radius, lambertian(Color::ones()));

            let origin = Point3::new(
                rng.gen_range(-10.0..10.0),
                rng.gen_range(-10.0..10.0),
                rng.gen_range(-10.0..10.0),
            );
            let direction = Vec3::new(
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
            );
            if direction.length_squared() < 1e-9 {
                continue;
            }
            let ray = Ray::new(origin, direction, 0.0);
            let t_min = 0.001;
            let t_max = f64::INFINITY;
            if let Some(hit) = sphere.hit(&ray, t_min, t_max) {
                let dist_to_center = (ray.at(hit.t) - center).length();
                assert!((dist_to_center - radius).abs() < 1e-6);
                assert!(hit.t > t_min && hit.t < t_max);
                assert!(ray.direction.dot(hit.normal) <= 1e-9);
                assert!((hit.normal.length() - 1.0).abs() < 1e-6);
            }
        }
    }

    // Scenario C: moving sphere bounding box is the union over the shutter interval.
    #[test]
    fn moving_sphere_bounding_box_is_the_union_over_time() {
        let sphere = MovingSphere::new(
            Point3::zero(),
            Point3::new(1.0, 0.0, 0.0),
            0.0,
            1.0,
            1.0,
            lambertian(Color::ones()),
        );
        let bbox = sphere.bounding_box(0.0, 1.0).unwrap();
        assert_eq!(bbox.min, Point3::new(-1.0, -1.0, -1.0));
        assert_eq!(bbox.max, Point3::new(2.0, 1.0, 1.0));
    }

    #[test]
    fn moving_sphere_center_interpolates_linearly() {
        let sphere = MovingSphere::new(
            Point3::zero(),
            Point3::new(2.0, 0.0, 0.0),
            0.0,
            2.0,
            1.0,
            lambertian(Color::ones()),
        );
        assert_eq!(sphere.center(1.0), Point3::new(1.0, 0.0, 0.0));
    }
}
