//! Ray-triangle intersection using Cramer's rule.
//!
//! Solves `o + t*d = p0 + beta*(p1 - p0) + gamma*(p2 - p0)` for
//! `(beta, gamma, t)`. The same solver serves standalone triangles and every
//! triangle of a mesh.

use crate::hittable::{HitRecord, Hittable};
use lumen_core::{Color, Triangle};
use lumen_math::{Interval, Ray, Vec3};

/// Systems with a determinant this small are treated as parallel.
const DETERMINANT_EPSILON: f32 = 1e-20;

/// Solution of the ray-triangle system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Barycentric {
    pub t: f32,
    pub beta: f32,
    pub gamma: f32,
}

impl Barycentric {
    /// Weights of vertices 0, 1 and 2.
    pub fn weights(&self) -> [f32; 3] {
        [1.0 - self.beta - self.gamma, self.beta, self.gamma]
    }

    /// Blend three per-vertex values with these weights.
    pub fn interpolate<T>(&self, values: [T; 3]) -> T
    where
        T: std::ops::Mul<f32, Output = T> + std::ops::Add<Output = T>,
    {
        let [a, b, c] = values;
        let [wa, wb, wc] = self.weights();
        a * wa + b * wb + c * wc
    }
}

/// Intersect a ray with the triangle `(p0, p1, p2)`.
///
/// Returns `None` for parallel rays, hits outside `ray_t`, and points outside
/// the triangle.
pub fn intersect_triangle(p0: Vec3, p1: Vec3, p2: Vec3, ray: &Ray, ray_t: Interval) -> Option<Barycentric> {
    let edge1 = p0 - p1;
    let edge2 = p0 - p2;
    let to_vertex = p0 - ray.origin;
    let dir = ray.direction;

    let dir_cross = edge2.cross(dir);
    let m = edge1.dot(dir_cross);
    if m.abs() < DETERMINANT_EPSILON {
        return None;
    }

    let q = edge1.cross(to_vertex);

    let t = -edge2.dot(q) / m;
    if !ray_t.contains(t) {
        return None;
    }

    let gamma = dir.dot(q) / m;
    if !(0.0..=1.0).contains(&gamma) {
        return None;
    }

    let beta = to_vertex.dot(dir_cross) / m;
    if beta < 0.0 || beta > 1.0 - gamma {
        return None;
    }

    Some(Barycentric { t, beta, gamma })
}

impl Hittable for Triangle {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<(f32, HitRecord)> {
        let [v0, v1, v2] = &self.vertices;
        let bary = intersect_triangle(v0.position, v1.position, v2.position, ray, ray_t)?;

        let tex_coord = bary.interpolate(self.vertices.each_ref().map(|v| v.tex_coord));
        let materials = self.vertices.each_ref().map(|v| &v.material);

        // Each corner's texture is sampled at the shared coordinate, then blended
        let surface_color: Color = bary.interpolate(materials.map(|m| m.sample(tex_coord.x, tex_coord.y)));

        Some((
            bary.t,
            HitRecord {
                position: bary.interpolate(self.vertices.each_ref().map(|v| v.position)),
                normal: bary.interpolate(self.vertices.each_ref().map(|v| v.normal)),
                surface_color,
                ambient: bary.interpolate(materials.map(|m| m.ambient)),
                diffuse: bary.interpolate(materials.map(|m| m.diffuse)),
                specular: bary.interpolate(materials.map(|m| m.specular)),
                refractive_index: bary.interpolate(materials.map(|m| m.refractive_index)),
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_core::{Material, TriangleVertex};
    use lumen_math::Vec2;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::sync::Arc;

    fn random_point(rng: &mut StdRng) -> Vec3 {
        Vec3::new(
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
        )
    }

    #[test]
    fn test_triangle_hit() {
        let ray = Ray::new(Vec3::new(0.25, 0.25, 1.0), Vec3::NEG_Z);
        let bary = intersect_triangle(Vec3::ZERO, Vec3::X, Vec3::Y, &ray, Interval::new(0.0, 10.0)).unwrap();
        assert!((bary.t - 1.0).abs() < 1e-6);
        assert!((bary.beta - 0.25).abs() < 1e-6);
        assert!((bary.gamma - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_triangle_miss_outside() {
        let ray = Ray::new(Vec3::new(0.8, 0.8, 1.0), Vec3::NEG_Z);
        assert!(intersect_triangle(Vec3::ZERO, Vec3::X, Vec3::Y, &ray, Interval::new(0.0, 10.0)).is_none());
    }

    #[test]
    fn test_triangle_parallel_ray() {
        let ray = Ray::new(Vec3::new(0.25, 0.25, 1.0), Vec3::X);
        assert!(intersect_triangle(Vec3::ZERO, Vec3::X, Vec3::Y, &ray, Interval::new(0.0, 10.0)).is_none());
    }

    #[test]
    fn test_triangle_out_of_range() {
        let ray = Ray::new(Vec3::new(0.25, 0.25, 1.0), Vec3::NEG_Z);
        assert!(intersect_triangle(Vec3::ZERO, Vec3::X, Vec3::Y, &ray, Interval::new(2.0, 10.0)).is_none());
    }

    #[test]
    fn test_barycentric_round_trip() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut checked = 0;

        while checked < 500 {
            let p0 = random_point(&mut rng);
            let p1 = random_point(&mut rng);
            let p2 = random_point(&mut rng);
            let normal = (p1 - p0).cross(p2 - p0);
            if normal.length() < 0.1 {
                continue;
            }

            let beta: f32 = rng.gen_range(0.0..1.0);
            let gamma: f32 = rng.gen_range(0.0..(1.0 - beta));
            let point = p0 * (1.0 - beta - gamma) + p1 * beta + p2 * gamma;

            // Come in roughly along the normal so the ray isn't grazing
            let origin = point + normal.normalize() * 2.0 + random_point(&mut rng) * 0.5;
            let ray = Ray::new(origin, point - origin);

            let bary = intersect_triangle(p0, p1, p2, &ray, Interval::new(0.0, 10.0))
                .expect("ray through an interior point must hit");
            assert!((bary.beta - beta).abs() < 1e-3, "beta {} vs {}", bary.beta, beta);
            assert!((bary.gamma - gamma).abs() < 1e-3, "gamma {} vs {}", bary.gamma, gamma);
            assert!((bary.t - 1.0).abs() < 1e-3);
            checked += 1;
        }
    }

    #[test]
    fn test_interpolated_attributes() {
        let red = Arc::new(Material::diffuse(Color::X));
        let blue = Arc::new(Material::diffuse(Color::Z));
        let triangle = Triangle::new([
            TriangleVertex::new(Vec3::ZERO, Vec3::Z, Vec2::ZERO, red.clone()),
            TriangleVertex::new(Vec3::X, Vec3::Z, Vec2::X, blue),
            TriangleVertex::new(Vec3::Y, Vec3::Z, Vec2::Y, red),
        ]);

        let ray = Ray::new(Vec3::new(0.5, 0.0, 1.0), Vec3::NEG_Z);
        let (t, rec) = triangle.hit(&ray, Interval::new(0.0, 10.0)).unwrap();

        assert!((t - 1.0).abs() < 1e-6);
        assert!((rec.position - Vec3::new(0.5, 0.0, 0.0)).length() < 1e-6);
        assert!((rec.diffuse - Color::new(0.5, 0.0, 0.5)).length() < 1e-6);
        assert_eq!(rec.surface_color, Color::ONE);
        assert_eq!(rec.refractive_index, 0.0);
    }
}
