//! Triangle soup with smooth vertex normals for display.
//!
//! Polygons are fan-triangulated from their first corner. Each triangle's
//! unnormalized normal is added to its three corners, so larger triangles
//! weigh more, and the sums are normalized per vertex at the end.

use nalgebra::{Point3, Vector3};

use super::index::VertexId;
use super::polygon::PolyMesh;

/// A triangulated copy of a [`PolyMesh`] with averaged vertex normals.
#[derive(Debug, Clone)]
pub struct TriMesh {
    positions: Vec<Point3<f64>>,
    normals: Vec<Vector3<f64>>,
    triangles: Vec<[usize; 3]>,
}

impl TriMesh {
    /// Triangulate a polygon mesh.
    pub fn from_poly(mesh: &PolyMesh) -> Self {
        let positions = mesh.positions().to_vec();
        let mut normals: Vec<Vector3<f64>> = vec![Vector3::zeros(); positions.len()];
        let mut triangles = Vec::with_capacity(mesh.num_corners().saturating_sub(2 * mesh.num_faces()));

        for face in mesh.faces() {
            let p0 = face[0].index();
            for pair in face[1..].windows(2) {
                let (p1, p2) = (pair[0].index(), pair[1].index());
                let n = (positions[p1] - positions[p0]).cross(&(positions[p2] - positions[p0]));
                normals[p0] += n;
                normals[p1] += n;
                normals[p2] += n;
                triangles.push([p0, p1, p2]);
            }
        }

        for n in &mut normals {
            // Vertices touched only by degenerate triangles keep a zero normal
            *n = n.try_normalize(1e-300).unwrap_or_else(Vector3::zeros);
        }

        Self {
            positions,
            normals,
            triangles,
        }
    }

    /// Vertex positions (same ids as the source mesh).
    pub fn positions(&self) -> &[Point3<f64>] {
        &self.positions
    }

    /// Unit vertex normals, zero for unreferenced vertices.
    pub fn normals(&self) -> &[Vector3<f64>] {
        &self.normals
    }

    /// Triangle corner indices.
    pub fn triangles(&self) -> &[[usize; 3]] {
        &self.triangles
    }

    /// Get the number of triangles.
    pub fn num_triangles(&self) -> usize {
        self.triangles.len()
    }

    /// Convert back into a polygon mesh whose faces are all triangles.
    pub fn to_poly(&self) -> PolyMesh {
        let mut mesh =
            PolyMesh::with_capacity(self.positions.len(), self.triangles.len(), self.triangles.len() * 3);
        for &p in &self.positions {
            mesh.push_vertex(p);
        }
        for t in &self.triangles {
            mesh.push_face(&[VertexId::new(t[0]), VertexId::new(t[1]), VertexId::new(t[2])]);
        }
        mesh
    }
}
