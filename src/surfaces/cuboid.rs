use std::sync::Arc;

use super::rect::{RectangleXy, RectangleYz, RectangleZx};
use crate::aabb::Aabb;
use crate::hittable::{hit_list, HitRecord, Hittable};
use crate::material::Material;
use crate::ray::Ray;
use crate::vec3::Point3;

/// A rectangular cuboid, internally six axis-aligned rectangles. Named
/// `Cuboid` rather than `Box` to avoid shadowing `std::boxed::Box` — see
/// DESIGN.md.
pub struct Cuboid {
    pub minimum: Point3,
    pub maximum: Point3,
    sides: Vec<Arc<dyn Hittable>>,
}

impl Cuboid {
    pub fn new(corner0: Point3, corner1: Point3, material: Arc<dyn Material>) -> Self {
        let minimum = Point3::new(corner0.x.min(corner1.x), corner0.y.min(corner1.y), corner0.z.min(corner1.z));
        let maximum = Point3::new(corner0.x.max(corner1.x), corner0.y.max(corner1.y), corner0.z.max(corner1.z));

        let sides: Vec<Arc<dyn Hittable>> = vec![
            Arc::new(RectangleXy::new(minimum.x, maximum.x, minimum.y, maximum.y, maximum.z, material.clone())),
            Arc::new(RectangleXy::new(minimum.x, maximum.x, minimum.y, maximum.y, minimum.z, material.clone())),
            Arc::new(RectangleYz::new(minimum.y, maximum.y, minimum.z, maximum.z, maximum.x, material.clone())),
            Arc::new(RectangleYz::new(minimum.y, maximum.y, minimum.z, maximum.z, minimum.x, material.clone())),
            Arc::new(RectangleZx::new(minimum.z, maximum.z, minimum.x, maximum.x, maximum.y, material.clone())),
            Arc::new(RectangleZx::new(minimum.z, maximum.z, minimum.x, maximum.x, minimum.y, material)),
        ];

        Self { minimum, maximum, sides }
    }
}

impl Hittable for Cuboid {
    fn hit(&self, ray: &Ray, t_min: f64, t_max: f64) -> Option<HitRecord<'_>> {
        hit_list(&self.sides, ray, t_min, t_max)
    }

    fn bounding_box(&self, _t0: f64, _t1: f64) -> Option<Aabb> {
        Some(Aabb::new(self.minimum, self.maximum))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Lambertian;
    use crate::vec3::{Color, Vec3};

    #[test]
    fn cuboid_hit_from_outside_returns_the_nearest_face() {
        let cuboid = Cuboid::new(
            Point3::new(-1.0, -1.0, -1.0),
            Point3::new(1.0, 1.0, 1.0),
            Arc::new(Lambertian::new(Color::ones())),
        );
        let ray = Ray::new(Point3::new(0.0, 0.0, -5.0), Vec3::unit_z(), 0.0);
        let hit = cuboid.hit(&ray, 0.001, f64::INFINITY).expect("must hit near face");
        assert!((hit.t - 4.0).abs() < 1e-9);

        let bbox = cuboid.bounding_box(0.0, 1.0).unwrap();
        assert_eq!(bbox.min, Point3::new(-1.0, -1.0, -1.0));
        assert_eq!(bbox.max, Point3::new(1.0, 1.0, 1.0));
    }
}
