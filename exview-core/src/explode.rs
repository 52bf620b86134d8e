//! Exploded-view geometry transform.
//!
//! Every triangle is pushed away from the mesh's global centre along the ray
//! through its own centroid. All three vertices of a triangle receive the same
//! displacement, so triangles translate rigidly and separate from their
//! neighbours even where the source mesh shared vertices.

use nalgebra::{Point3, Vector3};

use crate::flat::FlatMesh;

/// World units of displacement per unit of explosion factor.
pub const EXPLOSION_SCALE: f64 = 50.0;

/// Coordinates produced by [`explode`], laid out like the source [`FlatMesh`].
#[derive(Debug, Clone, PartialEq)]
pub struct Coordinates {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
}

impl Coordinates {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn vertex(&self, index: usize) -> Point3<f64> {
        Point3::new(self.x[index], self.y[index], self.z[index])
    }

    /// Interleaved `[x0, y0, z0, x1, ...]` buffer
    pub fn interleaved(&self) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.len() * 3);
        for i in 0..self.len() {
            out.extend_from_slice(&[self.x[i], self.y[i], self.z[i]]);
        }
        out
    }
}

/// Displacement applied to a triangle with the given centroid.
///
/// Zero when the centroid coincides with `center` (no defined direction).
pub fn displacement(center: Point3<f64>, centroid: Point3<f64>, factor: f64) -> Vector3<f64> {
    let direction = centroid - center;
    let length = direction.norm();
    if length > 0.0 {
        direction / length * (factor * EXPLOSION_SCALE)
    } else {
        Vector3::zeros()
    }
}

/// Explode `mesh` by `factor`.
///
/// A factor of zero (or below) returns the original coordinates unchanged.
/// The input mesh is never modified.
pub fn explode(mesh: &FlatMesh, factor: f64) -> Coordinates {
    let mut out = Coordinates {
        x: mesh.x().to_vec(),
        y: mesh.y().to_vec(),
        z: mesh.z().to_vec(),
    };
    if !(factor > 0.0) {
        return out;
    }

    let center = mesh.center();
    for (t, indices) in mesh.triangles().iter().enumerate() {
        let offset = displacement(center, mesh.triangle(t).centroid(), factor);
        for &i in indices {
            out.x[i] += offset.x;
            out.y[i] += offset.y;
            out.z[i] += offset.z;
        }
    }

    log::debug!(
        "exploded {} triangles with factor {}",
        mesh.triangle_count(),
        factor
    );
    out
}
