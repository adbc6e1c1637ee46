//! Hittable trait, HitRecord, and the scene-wide ray queries.

use lumen_core::{Color, Geometry, Scene, Shape};
use lumen_math::{Interval, Ray, Vec3};

/// Surface description at an intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRecord {
    /// Point of intersection
    pub position: Vec3,
    /// Unit surface normal. Not flipped towards the ray.
    pub normal: Vec3,
    /// Texture color at the hit
    pub surface_color: Color,
    pub ambient: Color,
    pub diffuse: Color,
    pub specular: Color,
    /// `0.0` for opaque surfaces, otherwise the dielectric's index
    pub refractive_index: f32,
}

impl HitRecord {
    pub fn is_opaque(&self) -> bool {
        self.refractive_index == 0.0
    }
}

/// Trait for objects that can be hit by rays.
pub trait Hittable {
    /// Test if a ray hits this object with `t` in `ray_t`.
    ///
    /// Shapes answer in their own local frame; a [`Geometry`] takes a world
    /// ray and answers in world space.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<(f32, HitRecord)>;
}

impl Hittable for Shape {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<(f32, HitRecord)> {
        match self {
            Shape::Sphere(sphere) => sphere.hit(ray, ray_t),
            Shape::Triangle(triangle) => triangle.hit(ray, ray_t),
            Shape::Model(model) => model.hit(ray, ray_t),
        }
    }
}

impl Hittable for Geometry {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<(f32, HitRecord)> {
        // Unprepared geometry is invisible
        let cache = self.transform_cache()?;

        if matches!(self.shape, Shape::Model(_)) && !self.bounds().hit(ray, ray_t) {
            return None;
        }

        let local_ray = cache.ray_to_local(ray);
        let (t, mut rec) = self.shape.hit(&local_ray, ray_t)?;

        rec.position = cache.point_to_world(rec.position);
        rec.normal = cache.normal_to_world(rec.normal);
        Some((t, rec))
    }
}

/// Find the closest hit over every geometry in the scene.
///
/// Ties keep the geometry that was added first.
pub fn closest_hit(scene: &Scene, ray: &Ray, ray_t: Interval) -> Option<(f32, HitRecord)> {
    let mut closest: Option<(f32, HitRecord)> = None;

    for geometry in scene.geometries() {
        let range = match closest {
            Some((t, _)) => ray_t.with_max(t),
            None => ray_t,
        };
        if let Some((t, rec)) = geometry.hit(ray, range) {
            if closest.map_or(true, |(best, _)| t < best) {
                closest = Some((t, rec));
            }
        }
    }

    closest
}

/// True if anything in the scene lies on the ray within `ray_t`.
pub fn occluded(scene: &Scene, ray: &Ray, ray_t: Interval) -> bool {
    scene
        .geometries()
        .iter()
        .any(|geometry| geometry.hit(ray, ray_t).is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_core::{Material, Sphere};
    use lumen_math::Transform;
    use std::sync::Arc;

    fn sphere_at(z: f32, color: Color) -> Geometry {
        Geometry::new(
            Sphere::new(1.0, Arc::new(Material::diffuse(color))).into(),
            Transform::from_position(Vec3::new(0.0, 0.0, z)),
        )
    }

    #[test]
    fn test_closest_of_two() {
        let mut scene = Scene::new();
        scene.add_geometry(sphere_at(-10.0, Color::X));
        scene.add_geometry(sphere_at(-5.0, Color::Y));
        scene.prepare().unwrap();

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let (t, rec) = closest_hit(&scene, &ray, Interval::new(0.0, 100.0)).unwrap();
        assert!((t - 4.0).abs() < 1e-4);
        assert_eq!(rec.ambient, Color::Y);
        assert!((rec.position - Vec3::new(0.0, 0.0, -4.0)).length() < 1e-4);
    }

    #[test]
    fn test_range_limits_hits() {
        let mut scene = Scene::new();
        scene.add_geometry(sphere_at(-10.0, Color::X));
        scene.prepare().unwrap();

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert!(closest_hit(&scene, &ray, Interval::new(0.0, 8.0)).is_none());
        assert!(!occluded(&scene, &ray, Interval::new(0.0, 8.0)));
        assert!(occluded(&scene, &ray, Interval::new(0.0, 9.5)));
    }

    #[test]
    fn test_unprepared_geometry_is_invisible() {
        let mut scene = Scene::new();
        scene.add_geometry(sphere_at(-5.0, Color::X));

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert!(closest_hit(&scene, &ray, Interval::new(0.0, 100.0)).is_none());
    }

    #[test]
    fn test_scaled_sphere_normal_is_unit() {
        let mut scene = Scene::new();
        let mut geometry = sphere_at(-5.0, Color::ONE);
        geometry.transform.scale = Vec3::new(2.0, 0.5, 1.0);
        scene.add_geometry(geometry);
        scene.prepare().unwrap();

        let ray = Ray::new(Vec3::new(0.3, 0.2, 0.0), Vec3::NEG_Z);
        let (_, rec) = closest_hit(&scene, &ray, Interval::new(0.0, 100.0)).unwrap();
        assert!((rec.normal.length() - 1.0).abs() < 1e-5);
        assert!(rec.normal.z > 0.0);
    }
}
