//! JSON triangle-soup documents.
//!
//! The expected layout is an object holding a list of triangles under a single
//! key, each triangle a list of three `[x, y, z]` vertices:
//!
//! ```json
//! {"v": [[[0, 0, 0], [1, 0, 0], [0, 1, 0]], ...]}
//! ```
//!
//! Validation is eager: the first malformed triangle aborts the load, so a
//! caller never sees a partially populated mesh.

use serde_json::Value;

use crate::error::{MeshError, Result};
use crate::geometry::{Mesh, Triangle};

/// Key under which exported models store their triangles.
pub const DEFAULT_KEY: &str = "v";

/// Parse a JSON mesh document using [`DEFAULT_KEY`].
pub fn parse(text: &str) -> Result<Mesh> {
    parse_with_key(text, DEFAULT_KEY)
}

/// Parse a JSON mesh document whose triangles live under `key`.
pub fn parse_with_key(text: &str, key: &str) -> Result<Mesh> {
    let document: Value = serde_json::from_str(text)?;
    let triangles = document
        .get(key)
        .and_then(Value::as_array)
        .ok_or_else(|| MeshError::MissingKey {
            key: key.to_string(),
        })?;

    let mut mesh = Mesh::with_capacity(triangles.len());
    for (t, triangle) in triangles.iter().enumerate() {
        mesh.add_triangle(parse_triangle(t, triangle)?);
    }

    log::debug!("parsed {} triangles from key \"{}\"", mesh.len(), key);
    Ok(mesh)
}

fn parse_triangle(t: usize, value: &Value) -> Result<Triangle> {
    let vertices = value.as_array().map(Vec::as_slice).unwrap_or_default();
    if vertices.len() != 3 {
        return Err(MeshError::VertexCount {
            triangle: t,
            found: vertices.len(),
        });
    }

    let mut coords = [[0.0; 3]; 3];
    for (v, vertex) in vertices.iter().enumerate() {
        coords[v] = parse_vertex(t, v, vertex)?;
    }
    Ok(Triangle::from_coords(coords))
}

fn parse_vertex(t: usize, v: usize, value: &Value) -> Result<[f64; 3]> {
    let components = value.as_array().map(Vec::as_slice).unwrap_or_default();
    if components.len() != 3 {
        return Err(MeshError::CoordinateCount {
            triangle: t,
            vertex: v,
            found: components.len(),
        });
    }

    let mut xyz = [0.0; 3];
    for (axis, component) in components.iter().enumerate() {
        xyz[axis] = component
            .as_f64()
            .filter(|c| c.is_finite())
            .ok_or(MeshError::InvalidCoordinate {
                triangle: t,
                vertex: v,
                axis,
            })?;
    }
    Ok(xyz)
}
