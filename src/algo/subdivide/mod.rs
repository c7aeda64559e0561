//! Doo-Sabin subdivision for polygon meshes.
//!
//! Doo-Sabin subdivision (Doo & Sabin, 1978) is an approximating scheme that
//! works on faces of any order. One pass builds a new mesh from:
//!
//! 1. One shrunken face per original face: each corner moves toward the
//!    face interior by a fixed weighted average of the face's corners
//! 2. One cap per interior vertex, joining the shrunken corners around it
//!    in the order the faces surround it
//! 3. One quad per interior edge, joining the four shrunken corners the two
//!    adjacent faces left at its endpoints
//!
//! After one pass every vertex has exactly four incident edges, and repeated
//! passes converge to a C¹ surface generalizing biquadratic B-splines.
//!
//! Open meshes are handled: a vertex on the boundary gets no cap, and an edge
//! with only one incident face gets no quad.
//!
//! # Example
//!
//! ```no_run
//! use doosabin::algo::subdivide::{doo_sabin_subdivide, SubdivideOptions};
//!
//! let mesh = doosabin::io::load("input.ply").unwrap();
//!
//! let options = SubdivideOptions::new(2); // 2 levels
//! let smooth = doo_sabin_subdivide(&mesh, &options).unwrap();
//!
//! doosabin::io::save(&smooth, "output.ply").unwrap();
//! ```
//!
//! # References
//!
//! - Doo, D. & Sabin, M. (1978). "Behaviour of recursive division surfaces
//!   near extraordinary points." Computer-Aided Design, 10(6), 356-360.

mod adjacency;
mod fan;
mod shrink;
mod stitch;
mod weights;

use std::borrow::Cow;

pub use adjacency::{classify, Adjacency, VertexClass};
pub use weights::{WeightTable, DEFAULT_MAX_FACE_ORDER};

use crate::algo::Progress;
use crate::error::Result;
use crate::mesh::PolyMesh;

/// Options for Doo-Sabin subdivision.
#[derive(Debug, Clone)]
pub struct SubdivideOptions {
    /// Number of subdivision levels.
    pub iterations: usize,

    /// Whether to use parallel execution (default: true).
    pub parallel: bool,

    /// Largest face order the weight table covers (default: 100).
    pub max_face_order: usize,
}

impl Default for SubdivideOptions {
    fn default() -> Self {
        Self::new(1)
    }
}

impl SubdivideOptions {
    /// Create options with the specified number of iterations.
    pub fn new(iterations: usize) -> Self {
        Self {
            iterations,
            parallel: true,
            max_face_order: DEFAULT_MAX_FACE_ORDER,
        }
    }

    /// Set whether to use parallel execution.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Create options for single-threaded execution.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Set the largest supported face order.
    pub fn with_max_face_order(mut self, max_face_order: usize) -> Self {
        self.max_face_order = max_face_order;
        self
    }
}

/// What one subdivision pass produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubdivisionStats {
    /// Faces shrunk from original faces.
    pub shrunk_faces: usize,
    /// Faces capping original regular vertices.
    pub vertex_faces: usize,
    /// Quads stitched across original edges.
    pub edge_faces: usize,
    /// Original vertices on an open fan.
    pub boundary_vertices: usize,
    /// Original vertices used by no face.
    pub orphan_vertices: usize,
}

impl SubdivisionStats {
    /// Total number of faces in the output.
    pub fn total_faces(&self) -> usize {
        self.shrunk_faces + self.vertex_faces + self.edge_faces
    }
}

/// A configured Doo-Sabin subdivider.
///
/// Holds the weight table, so building one up front keeps table
/// construction out of the per-pass cost. A `DooSabin` only reads shared
/// state and can be used from several threads at once.
#[derive(Debug, Clone)]
pub struct DooSabin {
    weights: Cow<'static, WeightTable>,
    parallel: bool,
}

impl DooSabin {
    /// Create a subdivider for the given options.
    ///
    /// The default face order ceiling uses the process-wide table; other
    /// ceilings build a private one.
    pub fn new(options: &SubdivideOptions) -> Result<Self> {
        let weights = if options.max_face_order == DEFAULT_MAX_FACE_ORDER {
            Cow::Borrowed(WeightTable::shared())
        } else {
            Cow::Owned(WeightTable::new(options.max_face_order)?)
        };
        Ok(Self {
            weights,
            parallel: options.parallel,
        })
    }

    /// Create a subdivider around an existing weight table.
    pub fn with_weights(weights: WeightTable, parallel: bool) -> Self {
        Self {
            weights: Cow::Owned(weights),
            parallel,
        }
    }

    /// The weight table in use.
    pub fn weights(&self) -> &WeightTable {
        &self.weights
    }

    /// Subdivide once, returning a new mesh.
    ///
    /// The input is never modified; on error no output is produced.
    pub fn subdivide_once(&self, mesh: &PolyMesh) -> Result<PolyMesh> {
        self.subdivide_once_with_stats(mesh).map(|(out, _)| out)
    }

    /// Subdivide once and report what was generated.
    pub fn subdivide_once_with_stats(&self, mesh: &PolyMesh) -> Result<(PolyMesh, SubdivisionStats)> {
        if mesh.num_faces() == 0 {
            // Every vertex is an orphan, so nothing survives
            log::debug!("no faces, {} orphan vertices dropped", mesh.num_vertices());
            let stats = SubdivisionStats {
                orphan_vertices: mesh.num_vertices(),
                ..SubdivisionStats::default()
            };
            return Ok((PolyMesh::new(), stats));
        }
        self.weights.check_order(mesh.max_face_order())?;

        let adjacency = Adjacency::build(mesh)?;

        let num_corners = mesh.num_corners();
        let mut out = PolyMesh::with_capacity(
            num_corners,
            mesh.num_faces() + mesh.num_vertices() + adjacency.num_edges(),
            num_corners * 3,
        );

        let mut fans = shrink::shrink_faces(mesh, &self.weights, self.parallel, &mut out)?;

        let mut vertex_faces = 0;
        let mut cap = Vec::new();
        for v in mesh.vertex_ids() {
            let class = adjacency.class(v);
            if class == VertexClass::Orphan {
                continue;
            }

            let points = &mut fans[v.index()];
            fan::order_fan(mesh, v, class, points)?;

            if class == VertexClass::Regular {
                cap.clear();
                cap.extend(points.iter().map(|p| p.vertex));
                out.push_face(&cap);
                vertex_faces += 1;
            }
        }

        let edge_faces = stitch::stitch_edges(adjacency.edges(), &fans, &mut out);

        let stats = SubdivisionStats {
            shrunk_faces: mesh.num_faces(),
            vertex_faces,
            edge_faces,
            boundary_vertices: adjacency.count(VertexClass::Boundary),
            orphan_vertices: adjacency.count(VertexClass::Orphan),
        };
        log::info!(
            "Doo-Sabin: {} -> {} vertices, {} -> {} faces ({} shrunk, {} vertex, {} edge)",
            mesh.num_vertices(),
            out.num_vertices(),
            mesh.num_faces(),
            out.num_faces(),
            stats.shrunk_faces,
            stats.vertex_faces,
            stats.edge_faces
        );

        Ok((out, stats))
    }

    /// Apply `levels` passes, each on the previous output.
    pub fn subdivide(&self, mesh: &PolyMesh, levels: usize, progress: &Progress) -> Result<PolyMesh> {
        let mut current = mesh.clone();
        for level in 0..levels {
            progress.report(level, levels, "Doo-Sabin subdivision");
            current = self.subdivide_once(&current)?;
        }
        progress.report(levels, levels, "Doo-Sabin subdivision");
        Ok(current)
    }
}

/// Performs Doo-Sabin subdivision on a polygon mesh.
///
/// # Arguments
///
/// * `mesh` - The mesh to subdivide (left untouched)
/// * `options` - Subdivision parameters
///
/// # Returns
///
/// The subdivided mesh. With zero iterations this is a copy of the input.
/// Topology errors abort the whole call; no partially built mesh is
/// returned.
///
/// # Example
///
/// ```
/// use doosabin::algo::subdivide::{doo_sabin_subdivide, SubdivideOptions};
/// use doosabin::mesh::build_from_triangles;
/// use nalgebra::Point3;
///
/// let vertices = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.5, 1.0, 0.0),
///     Point3::new(0.5, 0.5, 1.0),
/// ];
/// let faces = vec![[0, 2, 1], [0, 1, 3], [1, 2, 3], [2, 0, 3]];
/// let mesh = build_from_triangles(&vertices, &faces).unwrap();
///
/// let result = doo_sabin_subdivide(&mesh, &SubdivideOptions::new(1)).unwrap();
/// assert_eq!(result.num_vertices(), 12);
/// assert_eq!(result.num_faces(), 14);
/// ```
pub fn doo_sabin_subdivide(mesh: &PolyMesh, options: &SubdivideOptions) -> Result<PolyMesh> {
    doo_sabin_subdivide_with_progress(mesh, options, &Progress::none())
}

/// Doo-Sabin subdivision with progress reporting.
pub fn doo_sabin_subdivide_with_progress(
    mesh: &PolyMesh,
    options: &SubdivideOptions,
    progress: &Progress,
) -> Result<PolyMesh> {
    if options.iterations == 0 {
        return Ok(mesh.clone());
    }
    DooSabin::new(options)?.subdivide(mesh, options.iterations, progress)
}
