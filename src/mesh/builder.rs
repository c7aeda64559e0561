//! Mesh construction utilities.
//!
//! This module provides functions for building polygon meshes from
//! face-vertex lists as commonly found in mesh file formats.

use nalgebra::Point3;

use super::index::VertexId;
use super::polygon::{check_face, PolyMesh};
use crate::error::{MeshError, Result};

/// Build a polygon mesh from vertices and faces of any order.
///
/// # Arguments
/// * `vertices` - List of vertex positions
/// * `faces` - List of faces, each a boundary walk of vertex indices
///
/// # Returns
/// A polygon mesh, or an error if the input is invalid. Nothing is built
/// unless every face passes validation.
///
/// # Example
/// ```
/// use doosabin::mesh::build_from_polygons;
/// use nalgebra::Point3;
///
/// let vertices = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(1.0, 1.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
///     Point3::new(0.5, 2.0, 0.0),
/// ];
/// let faces = vec![vec![0, 1, 2, 3], vec![3, 2, 4]];
///
/// let mesh = build_from_polygons(&vertices, &faces).unwrap();
/// assert_eq!(mesh.num_vertices(), 5);
/// assert_eq!(mesh.num_faces(), 2);
/// ```
pub fn build_from_polygons<F: AsRef<[usize]>>(
    vertices: &[Point3<f64>],
    faces: &[F],
) -> Result<PolyMesh> {
    if faces.is_empty() {
        return Err(MeshError::EmptyMesh);
    }

    let mut num_corners = 0;
    for (fi, face) in faces.iter().enumerate() {
        let face = face.as_ref();
        check_face(fi, face, vertices.len())?;
        num_corners += face.len();
    }

    let mut mesh = PolyMesh::with_capacity(vertices.len(), faces.len(), num_corners);
    for &pos in vertices {
        mesh.push_vertex(pos);
    }

    let mut ids: Vec<VertexId> = Vec::new();
    for face in faces {
        ids.clear();
        ids.extend(face.as_ref().iter().map(|&v| VertexId::new(v)));
        mesh.push_face(&ids);
    }

    Ok(mesh)
}

/// Build a polygon mesh from triangles.
pub fn build_from_triangles(vertices: &[Point3<f64>], faces: &[[usize; 3]]) -> Result<PolyMesh> {
    build_from_polygons(vertices, faces)
}

/// Build a polygon mesh from quads.
pub fn build_from_quads(vertices: &[Point3<f64>], faces: &[[usize; 4]]) -> Result<PolyMesh> {
    build_from_polygons(vertices, faces)
}

/// Convert a polygon mesh back to a face-vertex representation.
///
/// Returns (vertices, faces) tuple.
pub fn to_face_vertex(mesh: &PolyMesh) -> (Vec<Point3<f64>>, Vec<Vec<usize>>) {
    let vertices = mesh.positions().to_vec();
    let faces = mesh
        .faces()
        .map(|f| f.iter().map(|v| v.index()).collect())
        .collect();
    (vertices, faces)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::FaceId;

    fn two_triangles() -> (Vec<Point3<f64>>, Vec<[usize; 3]>) {
        // Two triangles sharing an edge
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.5, 1.0, 0.0),
            Point3::new(0.5, -1.0, 0.0),
        ];
        let faces = vec![[0, 1, 2], [1, 0, 3]];
        (vertices, faces)
    }

    #[test]
    fn test_two_triangles() {
        let (vertices, faces) = two_triangles();
        let mesh = build_from_triangles(&vertices, &faces).unwrap();

        assert_eq!(mesh.num_vertices(), 4);
        assert_eq!(mesh.num_faces(), 2);
        assert!(mesh.is_triangle_mesh());
        assert_eq!(
            mesh.face(FaceId::new(1)),
            &[VertexId::new(1), VertexId::new(0), VertexId::new(3)]
        );
    }

    #[test]
    fn test_mixed_polygons() {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.5, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let faces = vec![vec![0, 1, 2, 3, 4]];
        let mesh = build_from_polygons(&vertices, &faces).unwrap();
        assert_eq!(mesh.face_order(FaceId::new(0)), 5);
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_empty_faces() {
        let vertices = vec![Point3::new(0.0, 0.0, 0.0)];
        let faces: Vec<[usize; 3]> = vec![];
        let result = build_from_triangles(&vertices, &faces);
        assert!(matches!(result, Err(MeshError::EmptyMesh)));
    }

    #[test]
    fn test_invalid_index() {
        let (vertices, _) = two_triangles();
        let faces = vec![[0, 1, 5]];
        let result = build_from_triangles(&vertices, &faces);
        assert!(matches!(
            result,
            Err(MeshError::InvalidVertexIndex { face: 0, vertex: 5 })
        ));
    }

    #[test]
    fn test_degenerate_face() {
        let (vertices, _) = two_triangles();
        let faces = vec![[0, 1, 2, 2]];
        let result = build_from_quads(&vertices, &faces);
        assert!(matches!(result, Err(MeshError::DegenerateFace { face: 0 })));
    }

    #[test]
    fn test_face_too_small() {
        let (vertices, _) = two_triangles();
        let faces = vec![vec![0, 1, 2], vec![2, 3]];
        let result = build_from_polygons(&vertices, &faces);
        assert!(matches!(
            result,
            Err(MeshError::FaceTooSmall { face: 1, order: 2 })
        ));
    }

    #[test]
    fn test_to_face_vertex() {
        let (vertices, faces) = two_triangles();
        let mesh = build_from_triangles(&vertices, &faces).unwrap();
        let (v2, f2) = to_face_vertex(&mesh);

        assert_eq!(v2, vertices);
        assert_eq!(f2, vec![vec![0, 1, 2], vec![1, 0, 3]]);
    }
}
