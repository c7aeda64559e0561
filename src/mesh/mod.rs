//! Core mesh data structures.
//!
//! This module provides the polygon mesh representation subdivision works on,
//! plus a triangle view for consumers that only handle triangles.
//!
//! # Overview
//!
//! The primary type is [`PolyMesh`], a face-vertex mesh whose faces may have
//! any number of corners. Faces are stored back to back in one array with a
//! start table, so a mesh of mixed triangles, quads and larger polygons needs
//! no per-face allocation.
//!
//! # Index Types
//!
//! Mesh elements are identified by type-safe index wrappers:
//! - [`VertexId`] - Identifies a vertex
//! - [`FaceId`] - Identifies a face
//!
//! # Construction
//!
//! Meshes are typically constructed from file I/O or from face-vertex lists:
//!
//! ```
//! use doosabin::mesh::{build_from_polygons, PolyMesh};
//! use nalgebra::Point3;
//!
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(1.0, 1.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//!     Point3::new(0.5, 2.0, 0.0),
//! ];
//! let faces = vec![vec![0, 1, 2, 3], vec![3, 2, 4]];
//!
//! let mesh: PolyMesh = build_from_polygons(&vertices, &faces).unwrap();
//! assert_eq!(mesh.num_corners(), 7);
//! ```

mod builder;
mod index;
mod polygon;
mod triangulate;

pub use builder::{build_from_polygons, build_from_quads, build_from_triangles, to_face_vertex};
pub use index::{FaceId, VertexId};
pub use polygon::PolyMesh;
pub use triangulate::TriMesh;
