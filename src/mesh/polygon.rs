//! Flat polygon mesh container.
//!
//! A [`PolyMesh`] stores vertex positions in one array and all faces in a
//! second, shared array of vertex ids. Face `f` occupies the half-open range
//! `face_starts[f]..face_starts[f + 1]` of that array, in boundary-walk order.
//!
//! This is the layout subdivision works on: faces of any order sit side by
//! side without per-face allocation, and a face id is simply its position in
//! the start table.

use std::ops::Range;

use nalgebra::{Point3, Vector3};

use super::index::{FaceId, VertexId};
use crate::error::{MeshError, Result};

/// A polygon mesh with faces of arbitrary order.
///
/// Invariants: every id stored in a face is `< num_vertices()`, and every
/// face has at least three corners.
#[derive(Debug, Clone)]
pub struct PolyMesh {
    /// Vertex positions, indexed by [`VertexId`].
    pub(crate) vertices: Vec<Point3<f64>>,

    /// Start offset of each face in `corners`, plus one trailing end offset.
    pub(crate) face_starts: Vec<usize>,

    /// Vertex ids of all faces, concatenated.
    pub(crate) corners: Vec<VertexId>,

    /// Sum of all vertex coordinates, kept for O(1) centroid queries.
    coord_sum: Vector3<f64>,
}

impl Default for PolyMesh {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for PolyMesh {
    fn eq(&self, other: &Self) -> bool {
        self.vertices == other.vertices
            && self.face_starts == other.face_starts
            && self.corners == other.corners
    }
}

impl PolyMesh {
    /// Create a new empty mesh.
    pub fn new() -> Self {
        Self::with_capacity(0, 0, 0)
    }

    /// Create a mesh with pre-allocated capacity.
    pub fn with_capacity(num_vertices: usize, num_faces: usize, num_corners: usize) -> Self {
        let mut face_starts = Vec::with_capacity(num_faces + 1);
        face_starts.push(0);
        Self {
            vertices: Vec::with_capacity(num_vertices),
            face_starts,
            corners: Vec::with_capacity(num_corners),
            coord_sum: Vector3::zeros(),
        }
    }

    // ==================== Construction ====================

    /// Append a vertex and return its id.
    pub fn push_vertex(&mut self, position: Point3<f64>) -> VertexId {
        let id = VertexId::new(self.vertices.len());
        self.vertices.push(position);
        self.coord_sum += position.coords;
        id
    }

    /// Append a face without validating it.
    ///
    /// Callers inside the crate guarantee the invariants; they are checked in
    /// debug builds only.
    pub(crate) fn push_face(&mut self, vertices: &[VertexId]) -> FaceId {
        debug_assert!(vertices.len() >= 3, "face with {} corners", vertices.len());
        debug_assert!(vertices.iter().all(|v| v.index() < self.vertices.len()));

        let id = FaceId::new(self.num_faces());
        self.corners.extend_from_slice(vertices);
        self.face_starts.push(self.corners.len());
        id
    }

    /// Append a face given as raw vertex indices, validating it first.
    pub fn try_push_face(&mut self, vertices: &[usize]) -> Result<FaceId> {
        let face = self.num_faces();
        check_face(face, vertices, self.vertices.len())?;
        let ids: Vec<VertexId> = vertices.iter().map(|&v| VertexId::new(v)).collect();
        Ok(self.push_face(&ids))
    }

    // ==================== Accessors ====================

    /// Get the number of vertices.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of faces.
    #[inline]
    pub fn num_faces(&self) -> usize {
        self.face_starts.len() - 1
    }

    /// Get the total number of face corners (sum of all face orders).
    #[inline]
    pub fn num_corners(&self) -> usize {
        self.corners.len()
    }

    /// Get the position of a vertex.
    #[inline]
    pub fn position(&self, v: VertexId) -> &Point3<f64> {
        &self.vertices[v.index()]
    }

    /// Get all vertex positions.
    #[inline]
    pub fn positions(&self) -> &[Point3<f64>] {
        &self.vertices
    }

    /// Range of a face inside the shared corner array.
    #[inline]
    pub fn face_range(&self, f: FaceId) -> Range<usize> {
        self.face_starts[f.index()]..self.face_starts[f.index() + 1]
    }

    /// Get the vertices of a face in boundary-walk order.
    #[inline]
    pub fn face(&self, f: FaceId) -> &[VertexId] {
        &self.corners[self.face_range(f)]
    }

    /// Get the number of corners of a face.
    #[inline]
    pub fn face_order(&self, f: FaceId) -> usize {
        self.face_starts[f.index() + 1] - self.face_starts[f.index()]
    }

    /// Get the positions of a face's corners.
    pub fn face_positions(&self, f: FaceId) -> impl Iterator<Item = &Point3<f64>> + '_ {
        self.face(f).iter().map(move |&v| self.position(v))
    }

    /// Iterate over all vertex IDs.
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> {
        (0..self.num_vertices()).map(VertexId::new)
    }

    /// Iterate over all face IDs.
    pub fn face_ids(&self) -> impl Iterator<Item = FaceId> {
        (0..self.num_faces()).map(FaceId::new)
    }

    /// Iterate over all faces as vertex slices.
    pub fn faces(&self) -> impl Iterator<Item = &[VertexId]> + '_ {
        self.face_starts
            .windows(2)
            .map(move |w| &self.corners[w[0]..w[1]])
    }

    // ==================== Geometry ====================

    /// Average of all vertex positions, or `None` for an empty mesh.
    pub fn centroid(&self) -> Option<Point3<f64>> {
        if self.vertices.is_empty() {
            return None;
        }
        Some(Point3::from(self.coord_sum / self.vertices.len() as f64))
    }

    /// Axis-aligned bounding box as `(min, max)`, or `None` for an empty mesh.
    pub fn bounding_box(&self) -> Option<(Point3<f64>, Point3<f64>)> {
        let first = self.vertices.first()?;
        let mut min = *first;
        let mut max = *first;
        for p in &self.vertices[1..] {
            min = min.inf(p);
            max = max.sup(p);
        }
        Some((min, max))
    }

    /// Unnormalized face normal by Newell's method.
    ///
    /// The length equals twice the area for planar polygons.
    pub fn face_normal(&self, f: FaceId) -> Vector3<f64> {
        let face = self.face(f);
        let mut n = Vector3::zeros();
        for (k, &v) in face.iter().enumerate() {
            let a = self.position(v);
            let b = self.position(face[(k + 1) % face.len()]);
            n.x += (a.y - b.y) * (a.z + b.z);
            n.y += (a.z - b.z) * (a.x + b.x);
            n.z += (a.x - b.x) * (a.y + b.y);
        }
        n
    }

    /// Area of a planar face.
    pub fn face_area(&self, f: FaceId) -> f64 {
        self.face_normal(f).norm() * 0.5
    }

    // ==================== Queries ====================

    /// Largest face order in the mesh (0 for a mesh without faces).
    pub fn max_face_order(&self) -> usize {
        self.face_starts
            .windows(2)
            .map(|w| w[1] - w[0])
            .max()
            .unwrap_or(0)
    }

    /// Check if every face is a triangle.
    pub fn is_triangle_mesh(&self) -> bool {
        self.num_faces() > 0 && self.faces().all(|f| f.len() == 3)
    }

    /// Check if every face is a quad.
    pub fn is_quad_mesh(&self) -> bool {
        self.num_faces() > 0 && self.faces().all(|f| f.len() == 4)
    }

    /// Re-check the container invariants.
    pub fn validate(&self) -> Result<()> {
        for (fi, face) in self.faces().enumerate() {
            let raw: Vec<usize> = face.iter().map(|v| v.index()).collect();
            check_face(fi, &raw, self.vertices.len())?;
        }
        Ok(())
    }
}

/// Validate one face given as raw indices.
pub(crate) fn check_face(face: usize, vertices: &[usize], num_vertices: usize) -> Result<()> {
    if vertices.len() < 3 {
        return Err(MeshError::FaceTooSmall {
            face,
            order: vertices.len(),
        });
    }
    for (k, &vi) in vertices.iter().enumerate() {
        if vi >= num_vertices {
            return Err(MeshError::InvalidVertexIndex { face, vertex: vi });
        }
        if vi == vertices[(k + 1) % vertices.len()] {
            return Err(MeshError::DegenerateFace { face });
        }
    }
    Ok(())
}
