/// STL file parser for binary and ASCII formats
///
/// STL stores one normal plus three vertices per facet; the stored normal is
/// dropped since shading recomputes it from the (possibly exploded) positions.
use nom::{
    bytes::complete::tag,
    character::complete::{multispace0, multispace1, not_line_ending},
    multi::many0,
    number::complete::double,
    sequence::{preceded, tuple},
    IResult,
};

use crate::error::{MeshError, Result};
use crate::geometry::{Mesh, Triangle};

const HEADER_LEN: usize = 80;
const FACET_LEN: usize = 50;

/// Parse a binary STL file
pub fn parse_binary_stl(data: &[u8]) -> Result<Mesh> {
    if data.len() < HEADER_LEN + 4 {
        return Err(MeshError::Stl("file too small to be a valid STL".to_string()));
    }

    let data = &data[HEADER_LEN..];
    let triangle_count = u32::from_le_bytes([data[0], data[1], data[2], data[3]]) as usize;
    let body = &data[4..];

    let expected = triangle_count.checked_mul(FACET_LEN).ok_or_else(|| {
        MeshError::Stl(format!("header declares too many facets ({})", triangle_count))
    })?;
    if body.len() < expected {
        return Err(MeshError::Stl(format!(
            "header declares {} facets but only {} bytes follow",
            triangle_count,
            body.len()
        )));
    }

    let mut mesh = Mesh::with_capacity(triangle_count);
    for (t, facet) in body.chunks_exact(FACET_LEN).take(triangle_count).enumerate() {
        // 12 bytes normal, 36 bytes vertices, 2 bytes attribute count
        let mut coords = [[0.0f64; 3]; 3];
        for (v, vertex) in coords.iter_mut().enumerate() {
            for (axis, c) in vertex.iter_mut().enumerate() {
                let at = 12 + v * 12 + axis * 4;
                *c = read_f32(&facet[at..at + 4]) as f64;
            }
        }
        mesh.add_triangle(checked_triangle(t, coords)?);
    }

    Ok(mesh)
}

fn read_f32(bytes: &[u8]) -> f32 {
    f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

/// Reject NaN and infinite coordinates; one of them would poison the
/// global centre and with it every explosion direction.
fn checked_triangle(t: usize, coords: [[f64; 3]; 3]) -> Result<Triangle> {
    for (v, vertex) in coords.iter().enumerate() {
        if let Some(axis) = vertex.iter().position(|c| !c.is_finite()) {
            return Err(MeshError::InvalidCoordinate {
                triangle: t,
                vertex: v,
                axis,
            });
        }
    }
    Ok(Triangle::from_coords(coords))
}

fn checked_mesh(facets: Vec<[[f64; 3]; 3]>) -> Result<Mesh> {
    let mut mesh = Mesh::with_capacity(facets.len());
    for (t, coords) in facets.into_iter().enumerate() {
        mesh.add_triangle(checked_triangle(t, coords)?);
    }
    Ok(mesh)
}

/// Parse an ASCII STL file
pub fn parse_ascii_stl(input: &str) -> Result<Mesh> {
    match parse_solid(input) {
        Ok((_, facets)) => checked_mesh(facets),
        Err(e) => Err(MeshError::Stl(format!("failed to parse ASCII STL: {:?}", e))),
    }
}

fn parse_solid(input: &str) -> IResult<&str, Vec<[[f64; 3]; 3]>> {
    let (input, _) = preceded(multispace0, tag("solid"))(input)?;
    let (input, _) = not_line_ending(input)?; // optional name
    let (input, facets) = many0(parse_facet)(input)?;
    let (input, _) = preceded(multispace0, tag("endsolid"))(input)?;

    Ok((input, facets))
}

fn parse_facet(input: &str) -> IResult<&str, [[f64; 3]; 3]> {
    let (input, _) = preceded(multispace0, tag("facet"))(input)?;
    let (input, _) = preceded(multispace1, tag("normal"))(input)?;
    let (input, _normal) = parse_vector3(input)?;
    let (input, _) = preceded(multispace0, tag("outer"))(input)?;
    let (input, _) = preceded(multispace1, tag("loop"))(input)?;
    let (input, (v0, v1, v2)) = tuple((parse_vertex, parse_vertex, parse_vertex))(input)?;
    let (input, _) = preceded(multispace0, tag("endloop"))(input)?;
    let (input, _) = preceded(multispace0, tag("endfacet"))(input)?;

    Ok((input, [v0, v1, v2]))
}

fn parse_vertex(input: &str) -> IResult<&str, [f64; 3]> {
    preceded(preceded(multispace0, tag("vertex")), parse_vector3)(input)
}

fn parse_vector3(input: &str) -> IResult<&str, [f64; 3]> {
    let (input, _) = multispace0(input)?;
    let (input, x) = double(input)?;
    let (input, _) = multispace1(input)?;
    let (input, y) = double(input)?;
    let (input, _) = multispace1(input)?;
    let (input, z) = double(input)?;
    Ok((input, [x, y, z]))
}

/// Detect and parse STL file (binary or ASCII)
pub fn parse_stl(data: &[u8]) -> Result<Mesh> {
    // Binary files may also start with "solid", so only a syntax failure
    // falls through to the binary reader
    if data.starts_with(b"solid") {
        if let Ok(text) = std::str::from_utf8(data) {
            if let Ok((_, facets)) = parse_solid(text) {
                return checked_mesh(facets);
            }
        }
    }

    parse_binary_stl(data)
}
