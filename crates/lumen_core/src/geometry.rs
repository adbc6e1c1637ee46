//! Placed geometry: a shape plus the transform that puts it in the world.
//!
//! The set of shapes is closed. Each `Geometry` caches its transform matrices
//! (and, for models, a world-space bounding box) in [`Geometry::prepare`], so
//! intersection code only ever reads it.

use std::sync::Arc;

use lumen_math::{BoundingBox, Transform, TransformCache, Vec2, Vec3};

use crate::material::Material;
use crate::mesh::Mesh;

/// A sphere centered at the local origin.
#[derive(Clone, Debug)]
pub struct Sphere {
    pub radius: f32,
    pub material: Arc<Material>,
}

impl Sphere {
    pub fn new(radius: f32, material: Arc<Material>) -> Self {
        Self { radius, material }
    }
}

/// One corner of a standalone triangle.
///
/// Every corner carries its own material; hits blend the three.
#[derive(Clone, Debug)]
pub struct TriangleVertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub tex_coord: Vec2,
    pub material: Arc<Material>,
}

impl TriangleVertex {
    pub fn new(position: Vec3, normal: Vec3, tex_coord: Vec2, material: Arc<Material>) -> Self {
        Self {
            position,
            normal,
            tex_coord,
            material,
        }
    }
}

/// A single triangle with per-vertex attributes.
#[derive(Clone, Debug)]
pub struct Triangle {
    pub vertices: [TriangleVertex; 3],
}

impl Triangle {
    pub fn new(vertices: [TriangleVertex; 3]) -> Self {
        Self { vertices }
    }

    /// Build a flat triangle where all corners share one material and the
    /// face normal (counter-clockwise winding).
    pub fn flat(positions: [Vec3; 3], tex_coords: [Vec2; 3], material: Arc<Material>) -> Self {
        let [p0, p1, p2] = positions;
        let normal = (p1 - p0).cross(p2 - p0).try_normalize().unwrap_or(Vec3::Y);
        let vertices = [0, 1, 2].map(|i| {
            TriangleVertex::new(positions[i], normal, tex_coords[i], material.clone())
        });
        Self { vertices }
    }
}

/// A shared mesh drawn with one material.
#[derive(Clone, Debug)]
pub struct Model {
    pub mesh: Arc<Mesh>,
    pub material: Arc<Material>,
}

impl Model {
    pub fn new(mesh: Arc<Mesh>, material: Arc<Material>) -> Self {
        Self { mesh, material }
    }
}

/// The closed set of intersectable shapes.
#[derive(Clone, Debug)]
pub enum Shape {
    Sphere(Sphere),
    Triangle(Triangle),
    Model(Model),
}

impl From<Sphere> for Shape {
    fn from(sphere: Sphere) -> Self {
        Shape::Sphere(sphere)
    }
}

impl From<Triangle> for Shape {
    fn from(triangle: Triangle) -> Self {
        Shape::Triangle(triangle)
    }
}

impl From<Model> for Shape {
    fn from(model: Model) -> Self {
        Shape::Model(model)
    }
}

/// A shape placed in the world.
#[derive(Clone, Debug)]
pub struct Geometry {
    pub transform: Transform,
    pub shape: Shape,

    cache: Option<TransformCache>,
    bounds: BoundingBox,
}

impl Geometry {
    /// Create an unprepared geometry.
    pub fn new(shape: Shape, transform: Transform) -> Self {
        Self {
            transform,
            shape,
            cache: None,
            bounds: BoundingBox::EMPTY,
        }
    }

    /// Compute the transform cache and, for models, the world-space bounds.
    ///
    /// Returns `false` when the transform can't be inverted; the geometry is
    /// then left unprepared.
    pub fn prepare(&mut self) -> bool {
        self.cache = None;
        self.bounds = BoundingBox::EMPTY;

        let Some(cache) = TransformCache::new(&self.transform) else {
            return false;
        };

        if let Shape::Model(model) = &self.shape {
            self.bounds = BoundingBox::from_points(
                model
                    .mesh
                    .vertices()
                    .iter()
                    .map(|v| cache.point_to_world(v.position)),
            );
            log::debug!(
                "Built bounds for {} vertices: {:?} .. {:?}",
                model.mesh.vertex_count(),
                self.bounds.min,
                self.bounds.max
            );
        }

        self.cache = Some(cache);
        true
    }

    /// Transform matrices, or `None` before [`Geometry::prepare`] succeeded.
    pub fn transform_cache(&self) -> Option<&TransformCache> {
        self.cache.as_ref()
    }

    /// World-space bounds. Only models have them; for other shapes and for
    /// unprepared models this is [`BoundingBox::EMPTY`].
    pub fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    /// Number of triangles this geometry contributes.
    pub fn triangle_count(&self) -> usize {
        match &self.shape {
            Shape::Sphere(_) => 0,
            Shape::Triangle(_) => 1,
            Shape::Model(model) => model.mesh.triangle_count(),
        }
    }
}
