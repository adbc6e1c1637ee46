//! Ray-sphere intersection.

use crate::hittable::{HitRecord, Hittable};
use lumen_core::Sphere;
use lumen_math::{Interval, Ray, Vec3};
use std::f32::consts::PI;

/// Texture coordinates of a point on a sphere of radius `radius` centered
/// at the origin.
///
/// `u` runs once around the Y axis starting at +Z. `v` covers `[0, 0.5]`
/// from the south pole to the north pole.
fn sphere_uv(p: Vec3, radius: f32) -> (f32, f32) {
    let mut u = p.x.atan2(p.z);
    if u < 0.0 {
        u += 2.0 * PI;
    }
    let v = PI - (p.y / radius).clamp(-1.0, 1.0).acos();
    (u / (2.0 * PI), v / (2.0 * PI))
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<(f32, HitRecord)> {
        let e = ray.origin;
        let d = ray.direction;

        let a = d.dot(d);
        let b = 2.0 * d.dot(e);
        let c = e.dot(e) - self.radius * self.radius;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();
        let t = [(-b - sqrtd) / (2.0 * a), (-b + sqrtd) / (2.0 * a)]
            .into_iter()
            .filter(|&t| t >= ray_t.min)
            .reduce(f32::min)?;
        if t > ray_t.max {
            return None;
        }

        let position = ray.at(t);
        let (u, v) = sphere_uv(position, self.radius);
        let material = &self.material;

        Some((
            t,
            HitRecord {
                position,
                normal: position,
                surface_color: material.sample(u, v),
                ambient: material.ambient,
                diffuse: material.diffuse,
                specular: material.specular,
                refractive_index: material.refractive_index,
            },
        ))
    }
}
