use std::sync::Arc;

use rand::Rng;

use crate::bvh::BvhNode;
use crate::error::RenderError;
use crate::hittable::Hittable;

/// An ordered collection of surfaces, consumed once to build the BVH root
/// that the integrator traces against.
pub struct Scene {
    surfaces: Vec<Arc<dyn Hittable>>,
}

impl Scene {
    pub fn new() -> Self {
        Self { surfaces: Vec::new() }
    }

    pub fn push(&mut self, surface: Arc<dyn Hittable>) {
        self.surfaces.push(surface);
    }

    pub fn with(mut self, surface: Arc<dyn Hittable>) -> Self {
        self.push(surface);
        self
    }

    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    /// Consumes the scene, building the BVH root over the shutter interval
    /// `[t0, t1]`. Fails if any surface lacks a bounding box.
    pub fn into_bvh(self, t0: f64, t1: f64, rng: &mut impl Rng) -> Result<BvhNode, RenderError> {
        if self.surfaces.is_empty() {
            return Err(RenderError::configuration("scene has no surfaces"));
        }
        BvhNode::build(self.surfaces, t0, t1, rng)
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Lambertian;
    use crate::surfaces::Sphere;
    use crate::vec3::{Color, Point3};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn empty_scene_refuses_to_build_a_bvh() {
        let scene = Scene::new();
        let mut rng = SmallRng::seed_from_u64(0);
        assert!(matches!(scene.into_bvh(0.0, 1.0, &mut rng), Err(RenderError::Configuration { .. })));
    }

    #[test]
    fn single_sphere_scene_builds_a_leaf_bvh() {
        let material = Arc::new(Lambertian::new(Color::new(0.5, 0.5, 0.5)));
        let scene = Scene::new().with(Arc::new(Sphere::new(Point3::zero(), 1.0, material)));
        let mut rng = SmallRng::seed_from_u64(0);
        let bvh = scene.into_bvh(0.0, 1.0, &mut rng).unwrap();
        assert!(matches!(bvh, BvhNode::Leaf { .. }));
    }
}
