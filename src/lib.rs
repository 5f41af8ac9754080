//! A Monte Carlo path tracer core: BVH-accelerated ray/surface intersection,
//! physically based materials, and a parallel recursive radiance estimator.
//!
//! The library exposes the rendering primitives (vectors, rays, surfaces,
//! materials, the BVH, the camera, and the integrator); `src/main.rs` is a
//! thin illustrative demo binary built on top of this crate, not part of
//! its contract.

pub mod aabb;
pub mod bvh;
pub mod camera;
pub mod error;
pub mod hittable;
pub mod integrator;
pub mod material;
pub mod presets;
pub mod ray;
pub mod scene;
pub mod sink;
pub mod surfaces;
pub mod vec3;

pub use bvh::BvhNode;
pub use camera::{Camera, CameraConfig};
pub use error::RenderError;
pub use hittable::{HitRecord, Hittable};
pub use integrator::{Background, Framebuffer, PathTracer, RenderConfig, RenderProgress};
pub use material::Material;
pub use ray::Ray;
pub use scene::Scene;
pub use sink::{PixelSink, PpmWriter};
pub use vec3::{Color, Point3, Vec3};
