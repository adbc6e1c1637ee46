//! World transforms and the matrices derived from them for ray tracing.
//!
//! A geometry's world transform is applied Scale -> Rotate -> Translate. The
//! tracer needs four views of it: the forward matrix for hit positions, the
//! inverse for ray origins, the inverse without translation for ray directions,
//! and the normal matrix for surface normals.

use glam::{Mat3, Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::Ray;

/// Transform components that can be composed into a matrix.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// World position
    pub position: Vec3,

    /// World orientation
    pub orientation: Quat,

    /// World scale
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Create a new transform with only translation.
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Builder-style scale override.
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Builder-style orientation override.
    pub fn with_orientation(mut self, orientation: Quat) -> Self {
        self.orientation = orientation;
        self
    }

    /// Convert to a 4x4 transformation matrix.
    ///
    /// Order: Scale -> Rotate -> Translate (SRT)
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.orientation, self.position)
    }

    /// The linear part only (no translation).
    pub fn to_linear_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.orientation, Vec3::ZERO)
    }
}

/// Matrices derived from a [`Transform`], computed once before tracing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformCache {
    /// Local -> world
    pub world: Mat4,
    /// World -> local, for points
    pub inverse: Mat4,
    /// World -> local without translation, for directions
    pub inverse_linear: Mat4,
    /// Transpose of the inverse upper 3x3, for normals
    pub normal_matrix: Mat3,
}

impl TransformCache {
    /// Build the cache, or `None` if the transform can't be inverted
    /// (zero scale on some axis, non-finite components).
    pub fn new(transform: &Transform) -> Option<Self> {
        let world = transform.to_matrix();
        let linear = transform.to_linear_matrix();

        if !world.is_finite() || linear.determinant().abs() <= f32::EPSILON * f32::EPSILON {
            return None;
        }

        let inverse = world.inverse();
        let inverse_linear = linear.inverse();
        if !inverse.is_finite() || !inverse_linear.is_finite() {
            return None;
        }

        let normal_matrix = Mat3::from_mat4(inverse_linear).transpose();

        Some(Self {
            world,
            inverse,
            inverse_linear,
            normal_matrix,
        })
    }

    /// Carry a world-space ray into the local frame. `t` is preserved.
    pub fn ray_to_local(&self, ray: &Ray) -> Ray {
        ray.transformed(&self.inverse, &self.inverse_linear)
    }

    /// Carry a local-space point back to world space.
    pub fn point_to_world(&self, point: Vec3) -> Vec3 {
        self.world.transform_point3(point)
    }

    /// Carry a local-space normal back to world space, unit length.
    pub fn normal_to_world(&self, normal: Vec3) -> Vec3 {
        (self.normal_matrix * normal).normalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_identity_cache() {
        let cache = TransformCache::new(&Transform::default()).unwrap();

        assert_eq!(cache.world, Mat4::IDENTITY);
        assert_eq!(cache.inverse, Mat4::IDENTITY);
        assert_eq!(cache.normal_matrix, Mat3::IDENTITY);
    }

    #[test]
    fn test_translation_does_not_affect_directions() {
        let transform = Transform::from_position(Vec3::new(10.0, 20.0, 30.0));
        let cache = TransformCache::new(&transform).unwrap();

        let ray = Ray::new(Vec3::new(10.0, 20.0, 35.0), Vec3::new(0.0, 0.0, -1.0));
        let local = cache.ray_to_local(&ray);

        assert!((local.origin - Vec3::new(0.0, 0.0, 5.0)).length() < 1e-5);
        assert!((local.direction - ray.direction).length() < 1e-6);
    }

    #[test]
    fn test_point_round_trip() {
        let transform = Transform::from_position(Vec3::new(1.0, -2.0, 3.0))
            .with_orientation(Quat::from_rotation_y(PI / 4.0))
            .with_scale(Vec3::new(2.0, 3.0, 0.5));
        let cache = TransformCache::new(&transform).unwrap();

        let point = Vec3::new(5.0, 3.0, 2.0);
        let local = cache.inverse.transform_point3(point);
        let back = cache.point_to_world(local);

        assert!((back - point).length() < 1e-4);
    }

    #[test]
    fn test_normal_matrix_non_uniform_scale() {
        // Unit sphere squashed on y: at local (1,1,0)/sqrt2 the world normal
        // must stay perpendicular to the world-space tangent.
        let transform = Transform::default().with_scale(Vec3::new(1.0, 0.25, 1.0));
        let cache = TransformCache::new(&transform).unwrap();

        let local_normal = Vec3::new(1.0, 1.0, 0.0).normalize();
        let local_tangent = Vec3::new(-1.0, 1.0, 0.0);
        let world_normal = cache.normal_to_world(local_normal);
        let world_tangent = cache.world.transform_vector3(local_tangent);

        assert!((world_normal.length() - 1.0).abs() < 1e-5);
        assert!(world_normal.dot(world_tangent).abs() < 1e-5);
    }

    #[test]
    fn test_degenerate_scale_rejected() {
        let transform = Transform::default().with_scale(Vec3::new(1.0, 0.0, 1.0));
        assert!(TransformCache::new(&transform).is_none());
    }
}
