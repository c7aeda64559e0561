//! # doosabin
//!
//! Doo-Sabin subdivision for polygon meshes.
//!
//! Each pass replaces every face by a smaller copy of itself, every interior
//! vertex by a face joining the copies around it, and every interior edge by
//! a quad. Repeated passes converge to a smooth surface. Faces of any order
//! are supported, and open meshes keep their boundary.
//!
//! ## Features
//!
//! - **Flat polygon mesh**: mixed triangles, quads and n-gons in one array
//! - **Topology checks**: non-manifold vertices and inconsistent winding are
//!   reported as errors rather than producing broken output
//! - **Parallel shrinking**: face averaging runs on rayon with results
//!   identical to the sequential path
//! - **PLY I/O**: polygons are read and written without triangulation
//!
//! ## Quick Start
//!
//! ```no_run
//! use doosabin::prelude::*;
//!
//! let mesh = doosabin::io::load("model.ply").unwrap();
//! let smooth = doo_sabin_subdivide(&mesh, &SubdivideOptions::new(3)).unwrap();
//!
//! println!("Vertices: {}", smooth.num_vertices());
//! println!("Faces: {}", smooth.num_faces());
//!
//! doosabin::io::save(&smooth, "smooth.ply").unwrap();
//! ```
//!
//! ## Building Meshes Programmatically
//!
//! ```
//! use doosabin::prelude::*;
//! use nalgebra::Point3;
//!
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.5, 1.0, 0.0),
//!     Point3::new(0.5, 0.5, 1.0),
//! ];
//!
//! let faces = vec![
//!     [0, 2, 1],  // bottom
//!     [0, 1, 3],  // front
//!     [1, 2, 3],  // right
//!     [2, 0, 3],  // left
//! ];
//!
//! let mesh = build_from_triangles(&vertices, &faces).unwrap();
//! let level1 = doo_sabin_subdivide(&mesh, &SubdivideOptions::new(1)).unwrap();
//!
//! // One new vertex per corner; one face per face, vertex and edge
//! assert_eq!(level1.num_vertices(), 12);
//! assert_eq!(level1.num_faces(), 4 + 4 + 6);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod error;
pub mod io;
pub mod mesh;

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types and functions:
///
/// ```
/// use doosabin::prelude::*;
/// ```
pub mod prelude {
    pub use crate::algo::subdivide::{doo_sabin_subdivide, DooSabin, SubdivideOptions};
    pub use crate::algo::Progress;
    pub use crate::error::{MeshError, Result};
    pub use crate::mesh::{
        build_from_polygons, build_from_quads, build_from_triangles, to_face_vertex, FaceId,
        PolyMesh, TriMesh, VertexId,
    };
}

// Re-export nalgebra types for convenience
pub use nalgebra;

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use nalgebra::Point3;

    #[test]
    fn test_tetrahedron() {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.5, 1.0, 0.0),
            Point3::new(0.5, 0.5, 1.0),
        ];

        let faces = vec![
            [0, 2, 1], // bottom
            [0, 1, 3], // front
            [1, 2, 3], // right
            [2, 0, 3], // left
        ];

        let mesh = build_from_triangles(&vertices, &faces).unwrap();

        assert_eq!(mesh.num_vertices(), 4);
        assert_eq!(mesh.num_faces(), 4);
        assert_eq!(mesh.num_corners(), 12);
        assert!(mesh.validate().is_ok());

        let out = doo_sabin_subdivide(&mesh, &SubdivideOptions::new(1)).unwrap();
        let tri = TriMesh::from_poly(&out);
        // 4 triangles + 4 triangles + 6 quads split in two
        assert_eq!(tri.num_triangles(), 20);
    }
}
