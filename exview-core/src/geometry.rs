/// Geometry primitives for exploded-view rendering
use nalgebra::{Point3, Vector3};

/// A triangle face defined by three vertex positions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub vertices: [Point3<f64>; 3],
}

impl Triangle {
    pub fn new(v0: Point3<f64>, v1: Point3<f64>, v2: Point3<f64>) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    /// Build a triangle from raw `[x, y, z]` triples
    pub fn from_coords(coords: [[f64; 3]; 3]) -> Self {
        let [a, b, c] = coords;
        Self::new(
            Point3::new(a[0], a[1], a[2]),
            Point3::new(b[0], b[1], b[2]),
            Point3::new(c[0], c[1], c[2]),
        )
    }

    /// Mean of the three vertices
    pub fn centroid(&self) -> Point3<f64> {
        let [v0, v1, v2] = self.vertices;
        Point3::from((v0.coords + v1.coords + v2.coords) / 3.0)
    }

    /// Unit face normal, or `None` for a degenerate (zero-area) triangle
    pub fn normal(&self) -> Option<Vector3<f64>> {
        let [v0, v1, v2] = self.vertices;

        let edge1 = v1 - v0;
        let edge2 = v2 - v0;

        edge1.cross(&edge2).try_normalize(f64::EPSILON)
    }
}

/// A 3D mesh composed of independent triangles
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(capacity),
        }
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Axis-aligned cube centred on the origin, two triangles per face.
    ///
    /// Used as the fallback model when no mesh file is given.
    pub fn cube(size: f64) -> Self {
        let h = size / 2.0;
        // Corners indexed by bit pattern: bit 0 = +x, bit 1 = +y, bit 2 = +z
        let corner = |i: usize| {
            Point3::new(
                if i & 1 != 0 { h } else { -h },
                if i & 2 != 0 { h } else { -h },
                if i & 4 != 0 { h } else { -h },
            )
        };
        // Each face listed counter-clockwise seen from outside
        const FACES: [[usize; 4]; 6] = [
            [4, 5, 7, 6], // +z
            [0, 2, 3, 1], // -z
            [2, 6, 7, 3], // +y
            [0, 1, 5, 4], // -y
            [1, 3, 7, 5], // +x
            [0, 4, 6, 2], // -x
        ];

        let mut mesh = Self::with_capacity(12);
        for [a, b, c, d] in FACES {
            mesh.add_triangle(Triangle::new(corner(a), corner(b), corner(c)));
            mesh.add_triangle(Triangle::new(corner(a), corner(c), corner(d)));
        }
        mesh
    }
}
