//! Scene container for the ray tracer.
//!
//! A scene owns everything a trace reads: geometries, materials, meshes,
//! point lights and a few global terms. It is filled in by a loader, prepared
//! once, then only read while a trace is in progress.

use std::sync::Arc;

use lumen_math::Camera;
use thiserror::Error;

use crate::geometry::Geometry;
use crate::light::PointLight;
use crate::material::{Color, Material};
use crate::mesh::{Mesh, MeshError};

/// Errors raised while building or preparing a scene.
#[derive(Error, Debug, PartialEq)]
pub enum SceneError {
    #[error("Geometry {index} has a singular transform (zero scale or non-finite values)")]
    DegenerateTransform { index: usize },

    #[error("Geometry {index} has not been prepared")]
    Unprepared { index: usize },

    #[error("Invalid mesh: {0}")]
    Mesh(#[from] MeshError),
}

/// A complete scene ready for tracing.
#[derive(Clone, Debug)]
pub struct Scene {
    geometries: Vec<Geometry>,
    materials: Vec<Arc<Material>>,
    meshes: Vec<Arc<Mesh>>,
    lights: Vec<PointLight>,

    /// Light reaching every surface regardless of occlusion
    pub ambient_light: Color,

    /// Color of rays that escape the scene
    pub background_color: Color,

    /// Index of refraction of the medium the camera sits in
    pub refractive_index: f32,

    /// Camera the scene was authored with
    pub camera: Camera,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            geometries: Vec::new(),
            materials: Vec::new(),
            meshes: Vec::new(),
            lights: Vec::new(),
            ambient_light: Color::ZERO,
            background_color: Color::ZERO,
            refractive_index: 1.0,
            camera: Camera::default(),
        }
    }
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a geometry and return its index.
    pub fn add_geometry(&mut self, geometry: Geometry) -> usize {
        let index = self.geometries.len();
        self.geometries.push(geometry);
        index
    }

    /// Add a material and return a shared handle to it.
    pub fn add_material(&mut self, material: Material) -> Arc<Material> {
        let material = Arc::new(material);
        self.materials.push(material.clone());
        material
    }

    /// Add a mesh and return a shared handle to it.
    pub fn add_mesh(&mut self, mesh: Mesh) -> Arc<Mesh> {
        let mesh = Arc::new(mesh);
        self.meshes.push(mesh.clone());
        mesh
    }

    /// Add a point light and return its index.
    pub fn add_light(&mut self, light: PointLight) -> usize {
        let index = self.lights.len();
        self.lights.push(light);
        index
    }

    pub fn geometries(&self) -> &[Geometry] {
        &self.geometries
    }

    pub fn materials(&self) -> &[Arc<Material>] {
        &self.materials
    }

    pub fn meshes(&self) -> &[Arc<Mesh>] {
        &self.meshes
    }

    pub fn lights(&self) -> &[PointLight] {
        &self.lights
    }

    pub fn num_geometries(&self) -> usize {
        self.geometries.len()
    }

    pub fn num_materials(&self) -> usize {
        self.materials.len()
    }

    pub fn num_meshes(&self) -> usize {
        self.meshes.len()
    }

    pub fn num_lights(&self) -> usize {
        self.lights.len()
    }

    /// Get total triangle count across all geometries.
    pub fn total_triangle_count(&self) -> usize {
        self.geometries.iter().map(Geometry::triangle_count).sum()
    }

    /// Remove everything and restore the default globals.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Build every geometry's transform cache and bounds.
    ///
    /// Stops at the first geometry whose transform can't be inverted.
    pub fn prepare(&mut self) -> Result<(), SceneError> {
        for (index, geometry) in self.geometries.iter_mut().enumerate() {
            if !geometry.prepare() {
                return Err(SceneError::DegenerateTransform { index });
            }
        }

        log::debug!(
            "Prepared scene: {} geometries, {} triangles, {} lights",
            self.geometries.len(),
            self.total_triangle_count(),
            self.lights.len()
        );
        Ok(())
    }

    /// Check that every geometry has been through [`Scene::prepare`].
    ///
    /// Geometry added after the last `prepare` is reported by index.
    pub fn check_prepared(&self) -> Result<(), SceneError> {
        match self.geometries.iter().position(|g| g.transform_cache().is_none()) {
            Some(index) => Err(SceneError::Unprepared { index }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Model, Sphere};
    use lumen_math::{Transform, Vec3};

    #[test]
    fn test_scene_defaults() {
        let scene = Scene::new();
        assert_eq!(scene.num_geometries(), 0);
        assert_eq!(scene.num_lights(), 0);
        assert_eq!(scene.refractive_index, 1.0);
        assert_eq!(scene.background_color, Color::ZERO);
    }

    #[test]
    fn test_scene_counts() {
        let mut scene = Scene::new();
        let material = scene.add_material(Material::diffuse(Color::new(0.8, 0.2, 0.2)));
        let mesh = scene.add_mesh(
            Mesh::from_positions(vec![Vec3::ZERO, Vec3::X, Vec3::Y], vec![0, 1, 2]).unwrap(),
        );

        scene.add_geometry(Geometry::new(
            Sphere::new(1.0, material.clone()).into(),
            Transform::default(),
        ));
        let index = scene.add_geometry(Geometry::new(
            Model::new(mesh, material).into(),
            Transform::from_position(Vec3::new(0.0, 0.0, -3.0)),
        ));
        scene.add_light(PointLight::default());

        assert_eq!(index, 1);
        assert_eq!(scene.num_geometries(), 2);
        assert_eq!(scene.num_materials(), 1);
        assert_eq!(scene.num_meshes(), 1);
        assert_eq!(scene.num_lights(), 1);
        assert_eq!(scene.total_triangle_count(), 1);

        assert_eq!(scene.check_prepared(), Err(SceneError::Unprepared { index: 0 }));
        scene.prepare().unwrap();
        assert!(scene.geometries().iter().all(|g| g.transform_cache().is_some()));
        assert_eq!(scene.check_prepared(), Ok(()));

        // Late additions need another prepare
        let material = scene.materials()[0].clone();
        let late = scene.add_geometry(Geometry::new(
            Sphere::new(2.0, material).into(),
            Transform::default(),
        ));
        assert_eq!(scene.check_prepared(), Err(SceneError::Unprepared { index: late }));
    }

    #[test]
    fn test_prepare_reports_degenerate_geometry() {
        let mut scene = Scene::new();
        let material = scene.add_material(Material::default());
        scene.add_geometry(Geometry::new(
            Sphere::new(1.0, material.clone()).into(),
            Transform::default(),
        ));
        scene.add_geometry(Geometry::new(
            Sphere::new(1.0, material).into(),
            Transform::default().with_scale(Vec3::ZERO),
        ));

        assert_eq!(
            scene.prepare(),
            Err(SceneError::DegenerateTransform { index: 1 })
        );
    }

    #[test]
    fn test_reset() {
        let mut scene = Scene::new();
        scene.add_light(PointLight::default());
        scene.ambient_light = Color::splat(0.1);
        scene.refractive_index = 1.33;

        scene.reset();
        assert_eq!(scene.num_lights(), 0);
        assert_eq!(scene.ambient_light, Color::ZERO);
        assert_eq!(scene.refractive_index, 1.0);
    }

    #[test]
    fn test_mesh_error_converts() {
        let err: SceneError = Mesh::from_positions(vec![Vec3::ZERO], vec![0, 0, 1])
            .unwrap_err()
            .into();
        assert!(matches!(err, SceneError::Mesh(MeshError::IndexOutOfRange { .. })));
    }
}
