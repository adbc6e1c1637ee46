use crate::{Mat4, Vec3};

/// A ray in 3D space with an origin and a non-zero direction.
///
/// The direction is not required to be unit length: rays carried into a
/// geometry's local frame keep the scale of the inverse transform so that the
/// parameter `t` means the same thing in both frames.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray.
    ///
    /// The direction must never be the zero vector.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        debug_assert!(direction != Vec3::ZERO, "ray direction must be non-zero");
        Self { origin, direction }
    }

    /// Create a ray, returning `None` when the direction is zero or not finite.
    pub fn try_new(origin: Vec3, direction: Vec3) -> Option<Self> {
        if direction == Vec3::ZERO || !direction.is_finite() {
            return None;
        }
        Some(Self { origin, direction })
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Carry the ray into another frame.
    ///
    /// `points` maps the origin (with translation), `vectors` maps the
    /// direction (linear part only).
    pub fn transformed(&self, points: &Mat4, vectors: &Mat4) -> Ray {
        Ray {
            origin: points.transform_point3(self.origin),
            direction: vectors.transform_vector3(self.direction),
        }
    }
}
