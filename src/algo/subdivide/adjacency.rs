//! Vertex adjacency derived from the face table.
//!
//! Every face contributes its boundary edges (including the closing edge from
//! the last corner back to the first) as mutual neighbor relations, and
//! registers itself as incident to each of its corners. Comparing the two
//! counts per vertex tells whether the faces around it can close into a fan.

use crate::error::{MeshError, Result};
use crate::mesh::{FaceId, PolyMesh, VertexId};

/// Local topology of a vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexClass {
    /// Faces form one closed fan (`edges == faces >= 3`).
    Regular,
    /// Faces form one open fan (`edges == faces + 1`).
    Boundary,
    /// Referenced by no face.
    Orphan,
}

/// Classify a vertex from its distinct neighbor and incident face counts.
pub fn classify(vertex: usize, edges: usize, faces: usize) -> Result<VertexClass> {
    if faces == 0 {
        return Ok(VertexClass::Orphan);
    }
    if edges == faces {
        if faces < 3 {
            return Err(MeshError::NonManifoldVertex { vertex, faces });
        }
        return Ok(VertexClass::Regular);
    }
    if edges == faces + 1 {
        return Ok(VertexClass::Boundary);
    }
    Err(MeshError::UnresolvableDefect {
        vertex,
        edges,
        faces,
    })
}

/// Per-vertex neighbors, incident faces and classification of a mesh.
#[derive(Debug, Clone)]
pub struct Adjacency {
    neighbors: Vec<Vec<VertexId>>,
    faces: Vec<Vec<FaceId>>,
    classes: Vec<VertexClass>,
}

impl Adjacency {
    /// Derive adjacency from a mesh and classify every vertex.
    ///
    /// Fails on the first vertex whose neighborhood cannot form a fan.
    pub fn build(mesh: &PolyMesh) -> Result<Self> {
        let n = mesh.num_vertices();
        let mut neighbors: Vec<Vec<VertexId>> = vec![Vec::new(); n];
        let mut faces: Vec<Vec<FaceId>> = vec![Vec::new(); n];

        for f in mesh.face_ids() {
            let face = mesh.face(f);
            for (k, &v) in face.iter().enumerate() {
                let w = face[(k + 1) % face.len()];
                neighbors[v.index()].push(w);
                neighbors[w.index()].push(v);
                faces[v.index()].push(f);
            }
        }

        for list in &mut neighbors {
            list.sort_unstable();
            list.dedup();
        }
        for list in &mut faces {
            list.sort_unstable();
            list.dedup();
        }

        let mut classes = Vec::with_capacity(n);
        for v in 0..n {
            let class = classify(v, neighbors[v].len(), faces[v].len())?;
            match class {
                VertexClass::Boundary => log::debug!(
                    "vertex {}: {} edges, {} faces, open fan",
                    v,
                    neighbors[v].len(),
                    faces[v].len()
                ),
                VertexClass::Orphan => log::debug!("vertex {}: orphan", v),
                VertexClass::Regular => {}
            }
            classes.push(class);
        }

        Ok(Self {
            neighbors,
            faces,
            classes,
        })
    }

    /// Distinct edge neighbors of a vertex, ascending.
    #[inline]
    pub fn neighbors(&self, v: VertexId) -> &[VertexId] {
        &self.neighbors[v.index()]
    }

    /// Distinct faces incident to a vertex, ascending.
    #[inline]
    pub fn incident_faces(&self, v: VertexId) -> &[FaceId] {
        &self.faces[v.index()]
    }

    /// Classification of a vertex.
    #[inline]
    pub fn class(&self, v: VertexId) -> VertexClass {
        self.classes[v.index()]
    }

    /// Classification of every vertex.
    pub fn classes(&self) -> &[VertexClass] {
        &self.classes
    }

    /// Number of vertices of the given class.
    pub fn count(&self, class: VertexClass) -> usize {
        self.classes.iter().filter(|&&c| c == class).count()
    }

    /// Every undirected edge once, as `(a, b)` with `a < b`, in ascending order.
    pub fn edges(&self) -> impl Iterator<Item = (VertexId, VertexId)> + '_ {
        self.neighbors.iter().enumerate().flat_map(|(a, list)| {
            let a = VertexId::new(a);
            list.iter().filter(move |&&b| a < b).map(move |&b| (a, b))
        })
    }

    /// Number of undirected edges.
    pub fn num_edges(&self) -> usize {
        self.neighbors.iter().map(Vec::len).sum::<usize>() / 2
    }
}
