//! Ray-mesh intersection.
//!
//! Every triangle is tested with the same solver as standalone triangles. The
//! world-space bounding box check happens one level up, in
//! `Hittable for Geometry`, before the ray is carried into the mesh's frame.

use crate::hittable::{HitRecord, Hittable};
use crate::triangle::{intersect_triangle, Barycentric};
use lumen_core::Model;
use lumen_math::{Interval, Ray};

impl Hittable for Model {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<(f32, HitRecord)> {
        let mesh = &self.mesh;
        let mut closest: Option<(usize, Barycentric)> = None;

        for index in 0..mesh.triangle_count() {
            let range = match closest {
                Some((_, bary)) => ray_t.with_max(bary.t),
                None => ray_t,
            };
            let [v0, v1, v2] = mesh.triangle_vertices(index);
            if let Some(bary) = intersect_triangle(v0.position, v1.position, v2.position, ray, range) {
                if closest.map_or(true, |(_, best)| bary.t < best.t) {
                    closest = Some((index, bary));
                }
            }
        }

        let (index, bary) = closest?;
        let vertices = mesh.triangle_vertices(index);
        let tex_coord = bary.interpolate(vertices.map(|v| v.tex_coord));
        let material = &self.material;

        Some((
            bary.t,
            HitRecord {
                position: bary.interpolate(vertices.map(|v| v.position)),
                normal: bary.interpolate(vertices.map(|v| v.normal)),
                surface_color: material.sample(tex_coord.x, tex_coord.y),
                ambient: material.ambient,
                diffuse: material.diffuse,
                specular: material.specular,
                refractive_index: material.refractive_index,
            },
        ))
    }
}
