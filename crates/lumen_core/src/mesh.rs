//! Indexed triangle meshes.
//!
//! A mesh is shared geometry in its own local space. `Model` geometries place
//! a mesh in the world with a transform and a single material.

use lumen_math::{Vec2, Vec3};
use thiserror::Error;

/// Errors raised when a mesh's index data doesn't fit its vertex data.
#[derive(Error, Debug, PartialEq)]
pub enum MeshError {
    #[error("Triangle {triangle} references vertex {index}, but the mesh has {vertex_count} vertices")]
    IndexOutOfRange {
        triangle: usize,
        index: u32,
        vertex_count: usize,
    },

    #[error("Index count {0} is not a multiple of 3")]
    RaggedIndices(usize),
}

/// One mesh vertex.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct MeshVertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub tex_coord: Vec2,
}

impl MeshVertex {
    pub fn new(position: Vec3, normal: Vec3, tex_coord: Vec2) -> Self {
        Self {
            position,
            normal,
            tex_coord,
        }
    }
}

/// Three vertex indices, counter-clockwise when seen from the front.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MeshTriangle {
    pub vertices: [u32; 3],
}

/// A mesh consisting of vertices and indexed triangles.
#[derive(Clone, Debug, PartialEq)]
pub struct Mesh {
    vertices: Vec<MeshVertex>,
    triangles: Vec<MeshTriangle>,
}

impl Mesh {
    /// Create a mesh, checking that every index refers to an existing vertex.
    pub fn new(vertices: Vec<MeshVertex>, triangles: Vec<MeshTriangle>) -> Result<Self, MeshError> {
        for (triangle, tri) in triangles.iter().enumerate() {
            if let Some(&index) = tri.vertices.iter().find(|&&i| i as usize >= vertices.len()) {
                return Err(MeshError::IndexOutOfRange {
                    triangle,
                    index,
                    vertex_count: vertices.len(),
                });
            }
        }
        Ok(Self {
            vertices,
            triangles,
        })
    }

    /// Create a mesh from bare positions and a flat index list.
    ///
    /// Normals are computed with [`Mesh::compute_normals`]; texture
    /// coordinates are zero.
    pub fn from_positions(positions: Vec<Vec3>, indices: Vec<u32>) -> Result<Self, MeshError> {
        if indices.len() % 3 != 0 {
            return Err(MeshError::RaggedIndices(indices.len()));
        }

        let vertices = positions
            .into_iter()
            .map(|position| MeshVertex::new(position, Vec3::ZERO, Vec2::ZERO))
            .collect();
        let triangles = indices
            .chunks_exact(3)
            .map(|c| MeshTriangle {
                vertices: [c[0], c[1], c[2]],
            })
            .collect();

        let mut mesh = Self::new(vertices, triangles)?;
        mesh.compute_normals();
        Ok(mesh)
    }

    /// Compute smooth vertex normals by averaging face normals.
    ///
    /// Face normals are area weighted (unnormalized cross products). A vertex
    /// not used by any non-degenerate face gets +Y.
    pub fn compute_normals(&mut self) {
        let mut normals = vec![Vec3::ZERO; self.vertices.len()];

        for tri in &self.triangles {
            let [i0, i1, i2] = tri.vertices.map(|i| i as usize);

            let p0 = self.vertices[i0].position;
            let p1 = self.vertices[i1].position;
            let p2 = self.vertices[i2].position;

            let face_normal = (p1 - p0).cross(p2 - p0);

            normals[i0] += face_normal;
            normals[i1] += face_normal;
            normals[i2] += face_normal;
        }

        for (vertex, normal) in self.vertices.iter_mut().zip(normals) {
            vertex.normal = normal.try_normalize().unwrap_or(Vec3::Y);
        }
    }

    pub fn vertices(&self) -> &[MeshVertex] {
        &self.vertices
    }

    pub fn triangles(&self) -> &[MeshTriangle] {
        &self.triangles
    }

    /// Get the number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Get the number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// The three vertices of triangle `index`.
    pub fn triangle_vertices(&self, index: usize) -> [&MeshVertex; 3] {
        self.triangles[index].vertices.map(|i| &self.vertices[i as usize])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> Mesh {
        Mesh::from_positions(
            vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
                Vec3::new(1.0, 1.0, 0.0),
            ],
            // Two triangles: [0,1,2] and [1,3,2]
            vec![0, 1, 2, 1, 3, 2],
        )
        .unwrap()
    }

    #[test]
    fn test_mesh_creation() {
        let mesh = quad();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 2);
    }

    #[test]
    fn test_compute_normals_ccw() {
        let mesh = quad();
        // CCW triangles in the XY plane face +Z
        for vertex in mesh.vertices() {
            assert!((vertex.normal - Vec3::Z).length() < 1e-6);
        }
    }

    #[test]
    fn test_triangle_vertices() {
        let mesh = quad();
        let [a, b, c] = mesh.triangle_vertices(1);
        assert_eq!(a.position, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(b.position, Vec3::new(1.0, 1.0, 0.0));
        assert_eq!(c.position, Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_index_out_of_range() {
        let err = Mesh::from_positions(vec![Vec3::ZERO, Vec3::X, Vec3::Y], vec![0, 1, 3]).unwrap_err();
        assert_eq!(
            err,
            MeshError::IndexOutOfRange {
                triangle: 0,
                index: 3,
                vertex_count: 3
            }
        );
    }

    #[test]
    fn test_ragged_indices() {
        let err = Mesh::from_positions(vec![Vec3::ZERO, Vec3::X], vec![0, 1]).unwrap_err();
        assert_eq!(err, MeshError::RaggedIndices(2));
    }

    #[test]
    fn test_unused_vertex_defaults_up() {
        let mesh = Mesh::from_positions(
            vec![Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::new(5.0, 5.0, 5.0)],
            vec![0, 1, 2],
        )
        .unwrap();
        assert_eq!(mesh.vertices()[3].normal, Vec3::Y);
    }
}
