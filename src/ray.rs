use crate::vec3::{Point3, Vec3};

/// A parametric ray R(t) = origin + t · direction, the fundamental geometric
/// primitive for all intersection queries in the path tracer.
///
/// `time` places the ray within the camera's shutter interval, letting
/// moving surfaces evaluate their position at the moment this particular
/// ray was cast.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Point3,
    pub direction: Vec3,
    pub time: f64,
}

impl Ray {
    #[inline(always)]
    pub const fn new(origin: Point3, direction: Vec3, time: f64) -> Self {
        Self { origin, direction, time }
    }

    /// Evaluates the ray at parameter t. Positive t gives points ahead of
    /// the origin.
    #[inline(always)]
    pub fn at(self, t: f64) -> Point3 {
        self.origin + self.direction * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn at_evaluates_parametric_point() {
        let r = Ray::new(Point3::zero(), Vec3::new(1.0, 2.0, 3.0), 0.0);
        assert_eq!(r.at(2.0), Point3::new(2.0, 4.0, 6.0));
    }
}
