/// ASCII rasterizer for terminal rendering
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use exview_core::{Camera, Coordinates, FlatMesh, Triangle};
use nalgebra::{Matrix4, Vector3};
use std::io::Write;

/// Character luminosity ramp for shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &['.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Height ramps, low to high, for the normal and exploded states
const BLUES: [Color; 4] = [Color::DarkBlue, Color::Blue, Color::DarkCyan, Color::Cyan];
const REDS: [Color; 4] = [Color::DarkRed, Color::Red, Color::DarkYellow, Color::Yellow];

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    glyph: char,
    color: Color,
}

const EMPTY: Cell = Cell {
    glyph: ' ',
    color: Color::Reset,
};

/// ASCII renderer that converts exploded meshes to terminal characters
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f64>,
    cells: Vec<Cell>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![f64::INFINITY; size],
            cells: vec![EMPTY; size],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self) {
        self.depth_buffer.fill(f64::INFINITY);
        self.cells.fill(EMPTY);
    }

    /// Rasterize `coords` (the exploded positions of `mesh`).
    ///
    /// Faces are shaded by their angle to the camera and coloured by the
    /// height of their centroid within the original mesh's Z range.
    pub fn render_mesh(
        &mut self,
        mesh: &FlatMesh,
        coords: &Coordinates,
        model_matrix: &Matrix4<f64>,
        camera: &Camera,
        exploded: bool,
    ) {
        let bounds = mesh.bounds();
        let (z_min, z_span) = (bounds.min.z, bounds.dimensions().z);
        let ramp = if exploded { &REDS } else { &BLUES };
        let view_dir = (camera.position - camera.target).normalize();
        let z = mesh.z();

        for &[a, b, c] in mesh.triangles() {
            let triangle = Triangle::new(coords.vertex(a), coords.vertex(b), coords.vertex(c));

            let height = if z_span > 0.0 {
                ((z[a] + z[b] + z[c]) / 3.0 - z_min) / z_span
            } else {
                0.5
            };
            let color = ramp[((height * ramp.len() as f64) as usize).min(ramp.len() - 1)];

            self.render_triangle(&triangle, model_matrix, camera, &view_dir, color);
        }
    }

    fn render_triangle(
        &mut self,
        triangle: &Triangle,
        model_matrix: &Matrix4<f64>,
        camera: &Camera,
        view_dir: &Vector3<f64>,
        color: Color,
    ) {
        let normal = match triangle.normal() {
            Some(n) => model_matrix.transform_vector(&n),
            None => return,
        };

        // Project vertices to screen space
        let mut screen = [(0.0, 0.0, 0.0); 3];
        for (slot, vertex) in screen.iter_mut().zip(&triangle.vertices) {
            match camera.project_to_screen(
                vertex,
                model_matrix,
                self.width as u32,
                self.height as u32,
            ) {
                Some(p) => *slot = p,
                None => return, // Triangle is clipped
            }
        }

        // Two-sided lighting from the camera
        let brightness = normal.dot(view_dir).abs();
        let index = (brightness * (LUMINOSITY_RAMP.len() - 1) as f64).round() as usize;
        let glyph = LUMINOSITY_RAMP[index.min(LUMINOSITY_RAMP.len() - 1)];

        self.rasterize_triangle(&screen, Cell { glyph, color });
    }

    fn rasterize_triangle(&mut self, coords: &[(f64, f64, f64); 3], cell: Cell) {
        let [v0, v1, v2] = *coords;

        // Bounding box clipped to the screen
        let min_x = (v0.0.min(v1.0).min(v2.0).floor() as i64).max(0);
        let max_x = (v0.0.max(v1.0).max(v2.0).ceil() as i64).min(self.width as i64 - 1);
        let min_y = (v0.1.min(v1.1).min(v2.1).floor() as i64).max(0);
        let max_y = (v0.1.max(v1.1).max(v2.1).ceil() as i64).min(self.height as i64 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = (x as f64 + 0.5, y as f64 + 0.5);

                let Some((w0, w1, w2)) = barycentric((v0.0, v0.1), (v1.0, v1.1), (v2.0, v2.1), p)
                else {
                    continue;
                };
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }

                let depth = w0 * v0.2 + w1 * v1.2 + w2 * v2.2;
                let idx = y as usize * self.width + x as usize;
                if depth < self.depth_buffer[idx] {
                    self.depth_buffer[idx] = depth;
                    self.cells[idx] = cell;
                }
            }
        }
    }

    /// Number of cells covered by geometry in the current frame
    pub fn covered(&self) -> usize {
        self.cells.iter().filter(|c| c.glyph != ' ').count()
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let mut current = None;
        for row in self.cells.chunks(self.width.max(1)) {
            for cell in row {
                if current != Some(cell.color) {
                    writer.queue(SetForegroundColor(cell.color))?;
                    current = Some(cell.color);
                }
                writer.queue(Print(cell.glyph))?;
            }
            writer.queue(Print("\r\n"))?;
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f64, f64),
    v1: (f64, f64),
    v2: (f64, f64),
    p: (f64, f64),
) -> Option<(f64, f64, f64)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-9 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use exview_core::{explode, Mesh, ViewPreset};

    #[test]
    fn test_barycentric_vertices() {
        let w = barycentric((0.0, 0.0), (4.0, 0.0), (0.0, 4.0), (0.0, 0.0)).unwrap();
        assert!((w.0 - 1.0).abs() < 1e-9);
        assert!(barycentric((0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (0.5, 0.5)).is_none());
    }

    #[test]
    fn test_cube_is_visible() {
        let flat = FlatMesh::new(&Mesh::cube(2.0));
        let mut camera = Camera::new(40, 20);
        camera.frame_bounds(ViewPreset::Default, &flat.bounds(), flat.center(), 0.0);

        let mut renderer = AsciiRenderer::new(40, 20);
        let coords = explode(&flat, 0.0);
        renderer.render_mesh(&flat, &coords, &Matrix4::identity(), &camera, false);
        assert!(renderer.covered() > 0);

        renderer.clear();
        assert_eq!(renderer.covered(), 0);
    }
}
