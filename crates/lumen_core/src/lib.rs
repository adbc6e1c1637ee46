//! Lumen Core - Scene data for the Whitted ray tracer.
//!
//! This crate provides the read-only inputs of a trace session:
//!
//! - **Surface description**: `Material`, `Texture`
//! - **Geometry**: `Geometry` with `Sphere`, `Triangle` and mesh-backed `Model` shapes
//! - **Scene container**: `Scene` with point lights, ambient light, background
//!   color and the refractive index of the surrounding medium
//!
//! Scenes are assembled by an external loader. Before tracing, `Scene::prepare`
//! computes every geometry's transform matrices and mesh bounding boxes so that
//! intersection queries never mutate the scene.
//!
//! # Example
//!
//! ```ignore
//! use lumen_core::{Geometry, Material, Scene, Sphere};
//!
//! let mut scene = Scene::new();
//! let red = scene.add_material(Material::diffuse(Color::new(1.0, 0.0, 0.0)));
//! scene.add_geometry(Geometry::new(Sphere::new(1.0, red).into(), Transform::default()));
//! scene.prepare()?;
//! ```

pub mod geometry;
pub mod light;
pub mod material;
pub mod mesh;
pub mod scene;
pub mod texture;

// Re-export commonly used types
pub use geometry::{Geometry, Model, Shape, Sphere, Triangle, TriangleVertex};
pub use light::{Attenuation, PointLight};
pub use material::{Color, Material};
pub use mesh::{Mesh, MeshError, MeshTriangle, MeshVertex};
pub use scene::{Scene, SceneError};
pub use texture::{Texture, TextureError};
