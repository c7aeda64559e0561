//! Face shrinking.
//!
//! Each original face becomes a smaller face of the same order whose corners
//! are weighted averages of the original corners. The new face keeps the
//! original corner order, so winding is preserved.

use nalgebra::{Point3, Vector3};
use rayon::prelude::*;

use super::weights::WeightTable;
use crate::error::Result;
use crate::mesh::{FaceId, PolyMesh, VertexId};

/// A shrunken corner: the new vertex and the original face it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct NewPoint {
    pub vertex: VertexId,
    pub face: FaceId,
}

/// Shrunken corner positions of one face, in corner order.
fn shrink_face(mesh: &PolyMesh, f: FaceId, weights: &WeightTable) -> Result<Vec<Point3<f64>>> {
    let corners: Vec<Point3<f64>> = mesh.face_positions(f).copied().collect();
    let n = corners.len();

    (0..n)
        .map(|i| {
            let sum: Vector3<f64> = weights
                .row(n, i)?
                .zip(&corners)
                .map(|(w, p)| p.coords * w)
                .sum();
            Ok(Point3::from(sum))
        })
        .collect()
}

/// Shrink every face of `mesh` into `out`.
///
/// New vertices are numbered in face order, corner by corner, continuing
/// from `out`'s current vertex count. Returns, for each original vertex, the
/// new points created at its corners, in face order.
pub(crate) fn shrink_faces(
    mesh: &PolyMesh,
    weights: &WeightTable,
    parallel: bool,
    out: &mut PolyMesh,
) -> Result<Vec<Vec<NewPoint>>> {
    let shrunk: Vec<Vec<Point3<f64>>> = if parallel {
        (0..mesh.num_faces())
            .into_par_iter()
            .map(|f| shrink_face(mesh, FaceId::new(f), weights))
            .collect::<Result<_>>()?
    } else {
        mesh.face_ids()
            .map(|f| shrink_face(mesh, f, weights))
            .collect::<Result<_>>()?
    };

    let mut fans: Vec<Vec<NewPoint>> = vec![Vec::new(); mesh.num_vertices()];
    let mut new_face: Vec<VertexId> = Vec::new();

    for (f, points) in mesh.face_ids().zip(shrunk) {
        new_face.clear();
        for (&corner, p) in mesh.face(f).iter().zip(points) {
            let vertex = out.push_vertex(p);
            new_face.push(vertex);
            fans[corner.index()].push(NewPoint { vertex, face: f });
        }
        out.push_face(&new_face);
    }

    Ok(fans)
}
