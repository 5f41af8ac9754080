//! Concrete surface primitives: spheres (static and moving), axis-aligned
//! rectangles, and the cuboid composed from six of them.

mod cuboid;
mod rect;
mod sphere;

pub use cuboid::Cuboid;
pub use rect::{RectangleXy, RectangleYz, RectangleZx};
pub use sphere::{MovingSphere, Sphere};
