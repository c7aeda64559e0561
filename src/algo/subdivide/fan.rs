//! Vertex fan reconstruction.
//!
//! The shrinker leaves, for each original vertex, one new point per incident
//! face in face-id order. To cap the vertex those points have to be put in
//! the order the faces appear when walking around it on the surface. Two
//! faces are consecutive around `v` when they share an edge leaving `v`, so
//! the walk repeatedly crosses the edge from `v` to the corner preceding `v`
//! in the current face and looks for the face on the other side.
//!
//! Only the combinatorics of the face table are used; positions play no part.

use super::adjacency::VertexClass;
use super::shrink::NewPoint;
use crate::error::{MeshError, Result};
use crate::mesh::{PolyMesh, VertexId};

/// Corners before and after `v` in `face`'s boundary walk.
fn corner_neighbors(face: &[VertexId], v: VertexId) -> Option<(VertexId, VertexId)> {
    let n = face.len();
    let k = face.iter().position(|&c| c == v)?;
    Some((face[(k + n - 1) % n], face[(k + 1) % n]))
}

/// Whether `face` has an edge between `v` and `w`.
fn has_edge(face: &[VertexId], v: VertexId, w: VertexId) -> bool {
    corner_neighbors(face, v).map_or(false, |(back, forward)| back == w || forward == w)
}

fn fan_failure(mesh: &PolyMesh, v: VertexId, fan: &[NewPoint], reason: String) -> MeshError {
    log::warn!("cannot order faces around vertex {}: {}", v, reason);
    for p in fan {
        log::warn!("  face {}: {:?}", p.face, mesh.face(p.face));
    }
    MeshError::FanReconstructionFailure {
        vertex: v.index(),
        reason,
    }
}

/// Find the entry whose forward edge at `v` is not shared with another face.
///
/// On an open fan that is the face at one end; walking backward from it
/// reaches every other face.
fn find_fan_start(mesh: &PolyMesh, v: VertexId, fan: &[NewPoint]) -> Result<usize> {
    let mut start = None;

    for (j, p) in fan.iter().enumerate() {
        let (_, forward) = corner_neighbors(mesh.face(p.face), v)
            .ok_or_else(|| fan_failure(mesh, v, fan, format!("face {} does not contain it", p.face)))?;

        let shared = fan
            .iter()
            .enumerate()
            .any(|(k, q)| k != j && has_edge(mesh.face(q.face), v, forward));

        if !shared {
            if start.is_some() {
                return Err(fan_failure(
                    mesh,
                    v,
                    fan,
                    "more than one open edge starts the fan".to_string(),
                ));
            }
            start = Some(j);
        }
    }

    start.ok_or_else(|| fan_failure(mesh, v, fan, "no open edge starts the fan".to_string()))
}

/// Reorder `fan` in place into the cyclic order of faces around `v`.
///
/// For a boundary vertex the first entry is the face at the open end.
/// Regular vertices keep their first entry and the rest follow it.
pub(crate) fn order_fan(
    mesh: &PolyMesh,
    v: VertexId,
    class: VertexClass,
    fan: &mut [NewPoint],
) -> Result<()> {
    if fan.is_empty() {
        return Ok(());
    }

    if class == VertexClass::Boundary {
        let start = find_fan_start(mesh, v, fan)?;
        fan.swap(0, start);
    }

    for j in 0..fan.len() - 1 {
        let (back, _) = corner_neighbors(mesh.face(fan[j].face), v).ok_or_else(|| {
            fan_failure(mesh, v, fan, format!("face {} does not contain it", fan[j].face))
        })?;

        let next = (j + 1..fan.len())
            .find(|&k| has_edge(mesh.face(fan[k].face), v, back))
            .ok_or_else(|| {
                fan_failure(
                    mesh,
                    v,
                    fan,
                    format!("no face continues the fan across edge ({}, {})", v, back),
                )
            })?;
        fan.swap(j + 1, next);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{build_from_polygons, build_from_triangles, FaceId};
    use nalgebra::Point3;

    fn fan_of(mesh: &PolyMesh, v: usize) -> Vec<NewPoint> {
        // Stand-in new vertex ids: one per incident face, in face order
        mesh.face_ids()
            .filter(|&f| mesh.face(f).contains(&VertexId::new(v)))
            .enumerate()
            .map(|(k, face)| NewPoint {
                vertex: VertexId::new(k),
                face,
            })
            .collect()
    }

    fn fan_faces(fan: &[NewPoint]) -> Vec<usize> {
        fan.iter().map(|p| p.face.index()).collect()
    }

    /// A hexagonal fan of six triangles around vertex 0, listed out of order.
    fn create_hexagon_fan() -> PolyMesh {
        let mut vertices = vec![Point3::new(0.0, 0.0, 0.0)];
        for k in 0..6 {
            let a = k as f64 * std::f64::consts::TAU / 6.0;
            vertices.push(Point3::new(a.cos(), a.sin(), 0.0));
        }
        let ring = |k: usize| 1 + k % 6;
        let order = [0, 3, 1, 5, 2, 4];
        let faces: Vec<[usize; 3]> = order.iter().map(|&k| [0, ring(k), ring(k + 1)]).collect();
        build_from_triangles(&vertices, &faces).unwrap()
    }

    #[test]
    fn test_closed_fan_order() {
        let mesh = create_hexagon_fan();
        let mut fan = fan_of(&mesh, 0);
        order_fan(&mesh, VertexId::new(0), VertexClass::Regular, &mut fan).unwrap();

        // Each face must share the edge to its predecessor's back corner
        for j in 0..fan.len() {
            let here = mesh.face(fan[j].face);
            let there = mesh.face(fan[(j + 1) % fan.len()].face);
            let (back, _) = corner_neighbors(here, VertexId::new(0)).unwrap();
            assert!(has_edge(there, VertexId::new(0), back), "break after position {}", j);
        }
        assert_eq!(fan[0].face, FaceId::new(0));
    }

    #[test]
    fn test_open_fan_starts_at_open_end() {
        // Three quads around vertex 0 covering three quarters of the plane
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(-1.0, 1.0, 0.0),
            Point3::new(-1.0, 0.0, 0.0),
            Point3::new(-1.0, -1.0, 0.0),
            Point3::new(0.0, -1.0, 0.0),
        ];
        let face_list = vec![vec![0, 3, 4, 5], vec![0, 1, 2, 3], vec![0, 5, 6, 7]];
        let mesh = build_from_polygons(&vertices, &face_list).unwrap();

        let mut fan = fan_of(&mesh, 0);
        order_fan(&mesh, VertexId::new(0), VertexClass::Boundary, &mut fan).unwrap();

        // Face 1 owns the open forward edge (0, 1); walking backward reaches 0 then 2
        assert_eq!(fan_faces(&fan), vec![1, 0, 2]);
    }

    #[test]
    fn test_flipped_face_breaks_closed_fan() {
        // Tetrahedron with face [0, 1, 3] flipped
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.5, 1.0, 0.0),
            Point3::new(0.5, 0.5, 1.0),
        ];
        let faces = vec![[0, 2, 1], [0, 3, 1], [1, 2, 3], [2, 0, 3]];
        let mesh = build_from_triangles(&vertices, &faces).unwrap();

        let mut fan = fan_of(&mesh, 0);
        let result = order_fan(&mesh, VertexId::new(0), VertexClass::Regular, &mut fan);
        assert!(matches!(
            result,
            Err(MeshError::FanReconstructionFailure { vertex: 0, .. })
        ));
    }

    #[test]
    fn test_closed_fan_has_no_open_start() {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.5, 1.0, 0.0),
            Point3::new(0.5, 0.5, 1.0),
        ];
        let tetrahedron = vec![[0, 2, 1], [0, 1, 3], [1, 2, 3], [2, 0, 3]];
        let mesh = build_from_triangles(&vertices, &tetrahedron).unwrap();

        // Every forward edge at vertex 0 is shared, so no face can start an open fan
        let mut fan = fan_of(&mesh, 0);
        let result = order_fan(&mesh, VertexId::new(0), VertexClass::Boundary, &mut fan);
        match result {
            Err(MeshError::FanReconstructionFailure { vertex, reason }) => {
                assert_eq!(vertex, 0);
                assert!(reason.contains("no open edge"), "{}", reason);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_ambiguous_open_fan() {
        // Two triangles with opposite winding hanging off edge (0, 2)
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(-1.0, 0.0, 0.0),
        ];
        let faces = vec![[0, 1, 2], [0, 3, 2]];
        let mesh = build_from_triangles(&vertices, &faces).unwrap();

        let mut fan = fan_of(&mesh, 0);
        let result = order_fan(&mesh, VertexId::new(0), VertexClass::Boundary, &mut fan);
        assert!(matches!(
            result,
            Err(MeshError::FanReconstructionFailure { vertex: 0, .. })
        ));
    }

    #[test]
    fn test_single_face_fan() {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let mesh = build_from_triangles(&vertices, &[[0, 1, 2]]).unwrap();
        let mut fan = fan_of(&mesh, 1);
        order_fan(&mesh, VertexId::new(1), VertexClass::Boundary, &mut fan).unwrap();
        assert_eq!(fan_faces(&fan), vec![0]);
    }
}
