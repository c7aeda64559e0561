//! Edge stitching.
//!
//! Each original edge `(a, b)` shared by two faces `F` and `G` becomes a quad
//! joining the four new points those faces left at `a` and `b`. Walking
//! around `a` the two faces appear as consecutive entries `F, G` of its
//! ordered fan; walking around `b` they appear as `G, F`, because the two
//! endpoints see the edge from opposite sides. Reversing `b`'s fan lines the
//! pair up so both fans can be searched for the same consecutive faces.

use super::shrink::NewPoint;
use crate::mesh::{PolyMesh, VertexId};

/// Closed copy of a fan: the first entry repeated at the end.
fn closed(fan: &[NewPoint]) -> Vec<NewPoint> {
    let mut cycle = Vec::with_capacity(fan.len() + 1);
    cycle.extend_from_slice(fan);
    cycle.extend(fan.first().copied());
    cycle
}

/// The quad for one edge, or `None` if no face pair is shared.
///
/// Corners are `(a after, a before, b before, b after)` so the quad keeps
/// the winding of the faces around it.
pub(crate) fn edge_quad(fan_a: &[NewPoint], fan_b: &[NewPoint]) -> Option<[VertexId; 4]> {
    // A single-face fan has no consecutive pair to share
    if fan_a.len() < 2 || fan_b.len() < 2 {
        return None;
    }

    let cycle_a = closed(fan_a);
    let mut cycle_b = closed(fan_b);
    cycle_b.reverse();

    for pa in cycle_a.windows(2) {
        for pb in cycle_b.windows(2) {
            if pa[0].face == pb[0].face && pa[1].face == pb[1].face {
                return Some([pa[1].vertex, pa[0].vertex, pb[0].vertex, pb[1].vertex]);
            }
        }
    }

    None
}

/// Emit one quad per stitchable edge into `out`; returns how many were added.
///
/// `edges` must list every undirected edge once. Edges whose endpoints share
/// no consecutive face pair (open edges) are skipped.
pub(crate) fn stitch_edges(
    edges: impl Iterator<Item = (VertexId, VertexId)>,
    fans: &[Vec<NewPoint>],
    out: &mut PolyMesh,
) -> usize {
    let mut added = 0;
    for (a, b) in edges {
        if let Some(quad) = edge_quad(&fans[a.index()], &fans[b.index()]) {
            out.push_face(&quad);
            added += 1;
        } else {
            log::trace!("edge ({}, {}) left open", a, b);
        }
    }
    added
}
