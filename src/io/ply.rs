//! PLY (Stanford polygon) format support.
//!
//! Faces are read and written as polygons of any order; nothing is
//! triangulated on the way in or out.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use nalgebra::Point3;
use ply_rs::parser::Parser;
use ply_rs::ply::{DefaultElement, Property};

use crate::error::{MeshError, Result};
use crate::mesh::{build_from_polygons, to_face_vertex, PolyMesh};

/// Load a mesh from a PLY file.
///
/// # Example
///
/// ```no_run
/// use doosabin::io::ply;
///
/// let mesh = ply::load("model.ply").unwrap();
/// ```
pub fn load<P: AsRef<Path>>(path: P) -> Result<PolyMesh> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    parse(&mut reader, path)
}

/// Read a PLY mesh from any buffered reader.
pub fn read<R: BufRead>(reader: &mut R) -> Result<PolyMesh> {
    parse(reader, Path::new("<reader>"))
}

fn parse<R: BufRead>(reader: &mut R, path: &Path) -> Result<PolyMesh> {
    let load_error = |message: String| MeshError::LoadError {
        path: path.to_path_buf(),
        message,
    };

    let parser = Parser::<DefaultElement>::new();
    let ply = parser
        .read_ply(reader)
        .map_err(|e| load_error(e.to_string()))?;

    // Extract vertices
    let vertex_element = ply
        .payload
        .get("vertex")
        .ok_or_else(|| load_error("PLY file has no vertex element".to_string()))?;

    let mut vertices: Vec<Point3<f64>> = Vec::with_capacity(vertex_element.len());
    for (i, vertex) in vertex_element.iter().enumerate() {
        let coord = |name: &str| {
            get_float_property(vertex, name)
                .ok_or_else(|| load_error(format!("vertex {} missing {} coordinate", i, name)))
        };
        vertices.push(Point3::new(coord("x")?, coord("y")?, coord("z")?));
    }

    // Extract faces, keeping polygons whole
    let face_element = ply
        .payload
        .get("face")
        .ok_or_else(|| load_error("PLY file has no face element".to_string()))?;

    let mut faces: Vec<Vec<usize>> = Vec::with_capacity(face_element.len());
    for (i, face) in face_element.iter().enumerate() {
        let indices = get_list_property(face, "vertex_indices")
            .or_else(|| get_list_property(face, "vertex_index"))
            .ok_or_else(|| load_error(format!("face {} missing vertex_indices property", i)))?;

        let indices = indices
            .into_iter()
            .map(usize::try_from)
            .collect::<std::result::Result<Vec<usize>, _>>()
            .map_err(|_| load_error(format!("face {} has a negative vertex index", i)))?;
        faces.push(indices);
    }

    if faces.is_empty() {
        return Err(load_error("PLY file contains no faces".to_string()));
    }

    build_from_polygons(&vertices, &faces).map_err(|e| load_error(e.to_string()))
}

fn get_float_property(element: &DefaultElement, name: &str) -> Option<f64> {
    match element.get(name)? {
        Property::Float(v) => Some(*v as f64),
        Property::Double(v) => Some(*v),
        Property::Int(v) => Some(*v as f64),
        Property::UInt(v) => Some(*v as f64),
        Property::Short(v) => Some(*v as f64),
        Property::UShort(v) => Some(*v as f64),
        Property::Char(v) => Some(*v as f64),
        Property::UChar(v) => Some(*v as f64),
        _ => None,
    }
}

fn get_list_property(element: &DefaultElement, name: &str) -> Option<Vec<i64>> {
    match element.get(name)? {
        Property::ListInt(v) => Some(v.iter().map(|&x| x as i64).collect()),
        Property::ListUInt(v) => Some(v.iter().map(|&x| x as i64).collect()),
        Property::ListShort(v) => Some(v.iter().map(|&x| x as i64).collect()),
        Property::ListUShort(v) => Some(v.iter().map(|&x| x as i64).collect()),
        Property::ListChar(v) => Some(v.iter().map(|&x| x as i64).collect()),
        Property::ListUChar(v) => Some(v.iter().map(|&x| x as i64).collect()),
        _ => None,
    }
}

/// Save a mesh to a PLY file (ASCII format).
///
/// # Example
///
/// ```no_run
/// use doosabin::io::ply;
/// use doosabin::mesh::PolyMesh;
///
/// let mesh = PolyMesh::new();
/// ply::save(&mesh, "output.ply").unwrap();
/// ```
pub fn save<P: AsRef<Path>>(mesh: &PolyMesh, path: P) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| MeshError::SaveError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let mut writer = BufWriter::new(file);
    write(mesh, &mut writer)
}

/// Write a mesh as ASCII PLY to any writer.
pub fn write<W: Write>(mesh: &PolyMesh, writer: &mut W) -> Result<()> {
    let (vertices, faces) = to_face_vertex(mesh);

    // A uchar corner count only holds faces up to 255 corners
    let count_type = if mesh.max_face_order() > u8::MAX as usize {
        "uint"
    } else {
        "uchar"
    };

    // Write header
    writeln!(writer, "ply")?;
    writeln!(writer, "format ascii 1.0")?;
    writeln!(writer, "comment Generated by doosabin")?;
    writeln!(writer, "element vertex {}", vertices.len())?;
    writeln!(writer, "property double x")?;
    writeln!(writer, "property double y")?;
    writeln!(writer, "property double z")?;
    writeln!(writer, "element face {}", faces.len())?;
    writeln!(writer, "property list {} int vertex_indices", count_type)?;
    writeln!(writer, "end_header")?;

    // Write vertices
    for v in &vertices {
        writeln!(writer, "{} {} {}", v.x, v.y, v.z)?;
    }

    // Write faces
    for f in &faces {
        write!(writer, "{}", f.len())?;
        for index in f {
            write!(writer, " {}", index)?;
        }
        writeln!(writer)?;
    }

    writer.flush()?;
    Ok(())
}
