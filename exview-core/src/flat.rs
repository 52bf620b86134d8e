/// Flattened, render-ready mesh representation
use nalgebra::{Point3, Vector3};

use crate::geometry::{Mesh, Triangle};

/// Axis-aligned bounds of a vertex set
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl Bounds {
    /// Extent along each axis (`max - min`)
    pub fn dimensions(&self) -> Vector3<f64> {
        self.max - self.min
    }

    /// Radius of the sphere around the box centre that encloses it
    pub fn radius(&self) -> f64 {
        self.dimensions().norm() / 2.0
    }
}

/// Parallel coordinate arrays plus per-triangle index triples.
///
/// Vertices are never shared: triangle `t` always owns positions
/// `3t`, `3t + 1` and `3t + 2`. The global centre and bounds are computed once
/// on construction and the coordinates are never modified afterwards, so every
/// explosion starts from the same originals.
#[derive(Debug, Clone)]
pub struct FlatMesh {
    x: Vec<f64>,
    y: Vec<f64>,
    z: Vec<f64>,
    triangles: Vec<[usize; 3]>,
    center: Point3<f64>,
    bounds: Bounds,
}

impl FlatMesh {
    pub fn new(mesh: &Mesh) -> Self {
        let vertex_count = mesh.len() * 3;
        let mut x = Vec::with_capacity(vertex_count);
        let mut y = Vec::with_capacity(vertex_count);
        let mut z = Vec::with_capacity(vertex_count);
        let mut triangles = Vec::with_capacity(mesh.len());

        for (t, triangle) in mesh.triangles.iter().enumerate() {
            for vertex in &triangle.vertices {
                x.push(vertex.x);
                y.push(vertex.y);
                z.push(vertex.z);
            }
            let base = 3 * t;
            triangles.push([base, base + 1, base + 2]);
        }

        let center = Point3::new(mean(&x), mean(&y), mean(&z));
        let bounds = Bounds {
            min: Point3::new(min(&x), min(&y), min(&z)),
            max: Point3::new(max(&x), max(&y), max(&z)),
        };

        Self {
            x,
            y,
            z,
            triangles,
            center,
            bounds,
        }
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    pub fn z(&self) -> &[f64] {
        &self.z
    }

    pub fn triangles(&self) -> &[[usize; 3]] {
        &self.triangles
    }

    /// Mean of all vertex positions; the origin for an empty mesh
    pub fn center(&self) -> Point3<f64> {
        self.center
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn vertex_count(&self) -> usize {
        self.x.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn vertex(&self, index: usize) -> Point3<f64> {
        Point3::new(self.x[index], self.y[index], self.z[index])
    }

    /// Rebuild triangle `t` from the original coordinates
    pub fn triangle(&self, t: usize) -> Triangle {
        let [a, b, c] = self.triangles[t];
        Triangle::new(self.vertex(a), self.vertex(b), self.vertex(c))
    }
}

impl From<&Mesh> for FlatMesh {
    fn from(mesh: &Mesh) -> Self {
        Self::new(mesh)
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn min(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().copied().fold(f64::INFINITY, f64::min)
}

fn max(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_triangles() -> Mesh {
        let mut mesh = Mesh::new();
        mesh.add_triangle(Triangle::from_coords([
            [0.0, 0.0, 0.0],
            [2.0, 0.0, 0.0],
            [0.0, 2.0, 0.0],
        ]));
        mesh.add_triangle(Triangle::from_coords([
            [0.0, 0.0, 4.0],
            [2.0, 0.0, 4.0],
            [0.0, 2.0, 4.0],
        ]));
        mesh
    }

    #[test]
    fn test_flatten_layout() {
        let flat = FlatMesh::new(&two_triangles());
        assert_eq!(flat.vertex_count(), 6);
        assert_eq!(flat.triangle_count(), 2);
        assert_eq!(flat.triangles(), &[[0, 1, 2], [3, 4, 5]]);
        assert_eq!(flat.z(), &[0.0, 0.0, 0.0, 4.0, 4.0, 4.0]);
    }

    #[test]
    fn test_center_and_bounds() {
        let flat = FlatMesh::new(&two_triangles());
        let c = flat.center();
        assert!((c.x - 2.0 / 3.0).abs() < 1e-12);
        assert!((c.y - 2.0 / 3.0).abs() < 1e-12);
        assert!((c.z - 2.0).abs() < 1e-12);

        let dims = flat.bounds().dimensions();
        assert_eq!(dims, Vector3::new(2.0, 2.0, 4.0));
    }

    #[test]
    fn test_empty_mesh() {
        let flat = FlatMesh::new(&Mesh::new());
        assert_eq!(flat.vertex_count(), 0);
        assert_eq!(flat.center(), Point3::origin());
        assert_eq!(flat.bounds().radius(), 0.0);
    }

    #[test]
    fn test_triangle_round_trip() {
        let mesh = two_triangles();
        let flat = FlatMesh::from(&mesh);
        assert_eq!(flat.triangle(1), mesh.triangles[1]);
    }
}
