use std::cmp::Ordering;
use std::sync::Arc;

use rand::Rng;

use crate::aabb::Aabb;
use crate::error::RenderError;
use crate::hittable::{HitRecord, Hittable};
use crate::ray::Ray;

/// A bounding-volume hierarchy over an owned sequence of surfaces.
///
/// `Leaf` wraps a single shared surface directly rather than an interior
/// node with two identical children — a cleaner representation of the
/// spec's span-1 base case. `Interior` owns its children exclusively;
/// leaves hold `Arc<dyn Hittable>` so the same surface can be referenced
/// from both the hierarchy and the caller's original scene vector.
pub enum BvhNode {
    Leaf {
        surface: Arc<dyn Hittable>,
        bbox: Aabb,
    },
    Interior {
        left: Box<BvhNode>,
        right: Box<BvhNode>,
        bbox: Aabb,
    },
}

impl BvhNode {
    /// Builds a BVH over `surfaces`, valid across the shutter interval
    /// `[t0, t1]`. Fails with `RenderError::Geometry` naming the offending
    /// surface's original index if any surface has no bounding box.
    pub fn build(surfaces: Vec<Arc<dyn Hittable>>, t0: f64, t1: f64, rng: &mut impl Rng) -> Result<BvhNode, RenderError> {
        let indexed: Vec<(usize, Arc<dyn Hittable>)> = surfaces.into_iter().enumerate().collect();
        Self::build_indexed(indexed, t0, t1, rng)
    }

    fn build_indexed(
        mut surfaces: Vec<(usize, Arc<dyn Hittable>)>,
        t0: f64,
        t1: f64,
        rng: &mut impl Rng,
    ) -> Result<BvhNode, RenderError> {
        fn bbox_of(index: usize, surface: &Arc<dyn Hittable>, t0: f64, t1: f64) -> Result<Aabb, RenderError> {
            surface.bounding_box(t0, t1).ok_or(RenderError::Geometry { index })
        }

        match surfaces.len() {
            0 => panic!("BvhNode::build called with an empty surface list"),
            1 => {
                let (index, surface) = surfaces.pop().unwrap();
                let bbox = bbox_of(index, &surface, t0, t1)?;
                Ok(BvhNode::Leaf { surface, bbox })
            }
            2 => {
                let axis = rng.gen_range(0..3);
                let (i0, s0) = surfaces.remove(0);
                let (i1, s1) = surfaces.remove(0);
                let box0 = bbox_of(i0, &s0, t0, t1)?;
                let box1 = bbox_of(i1, &s1, t0, t1)?;

                let (left, left_box, right, right_box) = if box0.min[axis] <= box1.min[axis] {
                    (s0, box0, s1, box1)
                } else {
                    (s1, box1, s0, box0)
                };

                let bbox = Aabb::surrounding(&left_box, &right_box);
                Ok(BvhNode::Interior {
                    left: Box::new(BvhNode::Leaf { surface: left, bbox: left_box }),
                    right: Box::new(BvhNode::Leaf { surface: right, bbox: right_box }),
                    bbox,
                })
            }
            _ => {
                let axis = rng.gen_range(0..3);
                let mut boxes = Vec::with_capacity(surfaces.len());
                for (index, surface) in &surfaces {
                    boxes.push(bbox_of(*index, surface, t0, t1)?);
                }

                let mut order: Vec<usize> = (0..surfaces.len()).collect();
                order.sort_by(|&a, &b| {
                    boxes[a].min[axis]
                        .partial_cmp(&boxes[b].min[axis])
                        .unwrap_or(Ordering::Equal)
                });

                let mid = order.len() / 2;
                let (left_order, right_order) = order.split_at(mid);

                // Reorder `surfaces` according to `order`, consuming it in place.
                let mut sorted: Vec<Option<(usize, Arc<dyn Hittable>)>> =
                    surfaces.into_iter().map(Some).collect();
                let take = |idx: usize, sorted: &mut Vec<Option<(usize, Arc<dyn Hittable>)>>| sorted[idx].take().unwrap();

                let left_surfaces: Vec<_> = left_order.iter().map(|&i| take(i, &mut sorted)).collect();
                let right_surfaces: Vec<_> = right_order.iter().map(|&i| take(i, &mut sorted)).collect();

                let left = Box::new(Self::build_indexed(left_surfaces, t0, t1, rng)?);
                let right = Box::new(Self::build_indexed(right_surfaces, t0, t1, rng)?);
                let bbox = Aabb::surrounding(left.bbox(), right.bbox());
                Ok(BvhNode::Interior { left, right, bbox })
            }
        }
    }

    pub fn bbox(&self) -> &Aabb {
        match self {
            BvhNode::Leaf { bbox, .. } => bbox,
            BvhNode::Interior { bbox, .. } => bbox,
        }
    }
}

impl Hittable for BvhNode {
    fn hit(&self, ray: &Ray, t_min: f64, t_max: f64) -> Option<HitRecord<'_>> {
        if !self.bbox().hit(ray, t_min, t_max) {
            return None;
        }
        match self {
            BvhNode::Leaf { surface, .. } => surface.hit(ray, t_min, t_max),
            BvhNode::Interior { left, right, .. } => {
                let hit_left = left.hit(ray, t_min, t_max);
                let tighter_max = hit_left.as_ref().map_or(t_max, |h| h.t);
                let hit_right = right.hit(ray, t_min, tighter_max);
                hit_right.or(hit_left)
            }
        }
    }

    fn bounding_box(&self, _t0: f64, _t1: f64) -> Option<Aabb> {
        Some(*self.bbox())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hittable::hit_list;
    use crate::material::Lambertian;
    use crate::vec3::{Color, Point3, Vec3};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use crate::surfaces::Sphere;

    fn random_sphere_scene(seed: u64, count: usize) -> Vec<Arc<dyn Hittable>> {
        let mut rng = SmallRng::seed_from_u64(seed);
        (0..count)
            .map(|_| {
                let center = Point3::new(
                    rng.gen_range(-10.0..10.0),
                    rng.gen_range(-10.0..10.0),
                    rng.gen_range(-10.0..10.0),
                );
                let radius = rng.gen_range(0.2..1.5);
                Arc::new(Sphere::new(center, radius, Arc::new(Lambertian::new(Color::ones())))) as Arc<dyn Hittable>
            })
            .collect()
    }

    // Property 3: every node's AABB contains its children's AABBs.
    fn assert_bbox_invariant(node: &BvhNode) {
        if let BvhNode::Interior { left, right, bbox } = node {
            assert!(bbox.contains(left.bbox()));
            assert!(bbox.contains(right.bbox()));
            assert_bbox_invariant(left);
            assert_bbox_invariant(right);
        }
    }

    #[test]
    fn bvh_bbox_contains_all_descendant_bboxes() {
        let surfaces = random_sphere_scene(11, 64);
        let mut rng = SmallRng::seed_from_u64(5);
        let bvh = BvhNode::build(surfaces, 0.0, 1.0, &mut rng).unwrap();
        assert_bbox_invariant(&bvh);
    }

    // Scenario D / property 4: BVH traversal agrees with exhaustive scan.
    #[test]
    fn bvh_traversal_matches_linear_scan() {
        let surfaces = random_sphere_scene(23, 50);
        let mut build_rng = SmallRng::seed_from_u64(77);
        let bvh = BvhNode::build(surfaces.clone(), 0.0, 1.0, &mut build_rng).unwrap();

        let mut rng = SmallRng::seed_from_u64(123);
        for _ in 0..4000 {
            let origin = Point3::new(
                rng.gen_range(-15.0..15.0),
                rng.gen_range(-15.0..15.0),
                rng.gen_range(-15.0..15.0),
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

            let bvh_hit = bvh.hit(&ray, 0.001, f64::INFINITY);
            let linear_hit = hit_list(&surfaces, &ray, 0.001, f64::INFINITY);

            match (bvh_hit, linear_hit) {
                (None, None) => {}
                (Some(a), Some(b)) => assert!((a.t - b.t).abs() < 1e-9, "bvh t={} linear t={}", a.t, b.t),
                (a, b) => panic!("disagreement: bvh={:?} linear={:?}", a.map(|h| h.t), b.map(|h| h.t)),
            }
        }
    }

    #[test]
    fn single_surface_builds_a_leaf() {
        let surfaces = random_sphere_scene(3, 1);
        let mut rng = SmallRng::seed_from_u64(1);
        let bvh = BvhNode::build(surfaces, 0.0, 1.0, &mut rng).unwrap();
        assert!(matches!(bvh, BvhNode::Leaf { .. }));
    }

    #[test]
    fn missing_bounding_box_surfaces_fail_the_build() {
        struct Unbounded;
        impl Hittable for Unbounded {
            fn hit(&self, _ray: &Ray, _t_min: f64, _t_max: f64) -> Option<HitRecord<'_>> {
                None
            }
            fn bounding_box(&self, _t0: f64, _t1: f64) -> Option<Aabb> {
                None
            }
        }

        let surfaces: Vec<Arc<dyn Hittable>> = vec![Arc::new(Unbounded)];
        let mut rng = SmallRng::seed_from_u64(1);
        let err = BvhNode::build(surfaces, 0.0, 1.0, &mut rng).unwrap_err();
        assert!(matches!(err, RenderError::Geometry { index: 0 }));
    }
}
