/// Camera, projection and named view presets
use nalgebra::{Matrix4, Point3, Vector3, Vector4};

use crate::flat::Bounds;

/// Projection mode for rendering
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectionMode {
    Orthographic,
    Perspective,
}

/// Named camera placements offered next to the plot.
///
/// Eye positions are in Plotly's normalised scene units (the scene box spans
/// roughly `[-1, 1]` on every axis); the look-at point is always the origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewPreset {
    #[default]
    Default,
    Top,
    Front,
    Side,
}

impl ViewPreset {
    pub const ALL: [ViewPreset; 4] = [
        ViewPreset::Default,
        ViewPreset::Top,
        ViewPreset::Front,
        ViewPreset::Side,
    ];

    pub fn eye(&self) -> Vector3<f64> {
        match self {
            ViewPreset::Default => Vector3::new(1.2, 1.2, 1.2),
            ViewPreset::Top => Vector3::new(0.0, 0.0, 2.5),
            ViewPreset::Front => Vector3::new(0.0, -2.5, 0.0),
            ViewPreset::Side => Vector3::new(2.5, 0.0, 0.0),
        }
    }

    /// Looking straight down +Z needs a horizontal up vector
    pub fn up(&self) -> Vector3<f64> {
        match self {
            ViewPreset::Top => Vector3::y(),
            _ => Vector3::z(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ViewPreset::Default => "default",
            ViewPreset::Top => "top",
            ViewPreset::Front => "front",
            ViewPreset::Side => "side",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.name().eq_ignore_ascii_case(name.trim()))
    }
}

/// Camera configuration for 3D rendering
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Point3<f64>,
    pub target: Point3<f64>,
    pub up: Vector3<f64>,
    pub fov: f64,
    pub aspect: f64,
    pub near: f64,
    pub far: f64,
    pub mode: ProjectionMode,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            position: Point3::new(0.0, -5.0, 0.0),
            target: Point3::origin(),
            up: Vector3::z(),
            fov: std::f64::consts::FRAC_PI_4, // 45 degrees
            aspect: width as f64 / height.max(1) as f64,
            near: 0.1,
            far: 100.0,
            mode: ProjectionMode::Perspective,
        }
    }

    /// Place the camera for `preset`, far enough away that a sphere of
    /// `radius` around `target` fits in the vertical field of view.
    pub fn look_from(&mut self, preset: ViewPreset, target: Point3<f64>, radius: f64) {
        let radius = radius.max(1e-3);
        let distance = radius / (self.fov / 2.0).sin();
        let direction = preset.eye().normalize();

        self.target = target;
        self.position = target + direction * distance;
        self.up = preset.up();
        self.near = (distance - radius).max(distance * 1e-3);
        self.far = distance + radius * 2.0;
    }

    /// Fit the camera to `bounds`, reserving room for `padding` of extra
    /// outward travel (e.g. the maximum explosion displacement).
    pub fn frame_bounds(&mut self, preset: ViewPreset, bounds: &Bounds, center: Point3<f64>, padding: f64) {
        let box_center = nalgebra::center(&bounds.min, &bounds.max);
        let radius = bounds.radius() + (box_center - center).norm() + padding;
        self.look_from(preset, center, radius);
    }

    /// Create the view matrix (camera transformation)
    pub fn view_matrix(&self) -> Matrix4<f64> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    /// Create the projection matrix
    pub fn projection_matrix(&self) -> Matrix4<f64> {
        match self.mode {
            ProjectionMode::Perspective => {
                Matrix4::new_perspective(self.aspect, self.fov, self.near, self.far)
            }
            ProjectionMode::Orthographic => {
                let height = (self.position - self.target).norm() * (self.fov / 2.0).tan() * 2.0;
                let width = height * self.aspect;
                Matrix4::new_orthographic(
                    -width / 2.0,
                    width / 2.0,
                    -height / 2.0,
                    height / 2.0,
                    self.near,
                    self.far,
                )
            }
        }
    }

    /// Project a 3D point to screen space: `(column, row, depth)`.
    ///
    /// Returns `None` for points behind the camera or outside the view volume.
    pub fn project_to_screen(
        &self,
        point: &Point3<f64>,
        model_matrix: &Matrix4<f64>,
        width: u32,
        height: u32,
    ) -> Option<(f64, f64, f64)> {
        let mvp = self.projection_matrix() * self.view_matrix() * model_matrix;
        let clip = mvp * Vector4::new(point.x, point.y, point.z, 1.0);

        if clip.w.abs() < 1e-9 {
            return None;
        }

        let ndc = clip.xyz() / clip.w;
        if !(-1.0..=1.0).contains(&ndc.x)
            || !(-1.0..=1.0).contains(&ndc.y)
            || !(-1.0..=1.0).contains(&ndc.z)
        {
            return None;
        }

        let screen_x = (ndc.x + 1.0) * 0.5 * width as f64;
        let screen_y = (1.0 - ndc.y) * 0.5 * height as f64;

        Some((screen_x, screen_y, ndc.z))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_creation() {
        let camera = Camera::new(800, 600);
        assert_eq!(camera.mode, ProjectionMode::Perspective);
        assert!((camera.aspect - 800.0 / 600.0).abs() < 1e-9);
    }

    #[test]
    fn test_target_projects_to_screen_center() {
        let mut camera = Camera::new(80, 40);
        camera.look_from(ViewPreset::Front, Point3::new(10.0, 20.0, 30.0), 5.0);
        let (x, y, depth) = camera
            .project_to_screen(&Point3::new(10.0, 20.0, 30.0), &Matrix4::identity(), 80, 40)
            .unwrap();
        assert!((x - 40.0).abs() < 1e-6);
        assert!((y - 20.0).abs() < 1e-6);
        assert!((-1.0..=1.0).contains(&depth));
    }

    #[test]
    fn test_point_behind_camera_is_clipped() {
        let mut camera = Camera::new(80, 40);
        camera.look_from(ViewPreset::Side, Point3::origin(), 1.0);
        let behind = camera.position + (camera.position - camera.target);
        assert!(camera
            .project_to_screen(&behind, &Matrix4::identity(), 80, 40)
            .is_none());
    }

    #[test]
    fn test_preset_names() {
        for preset in ViewPreset::ALL {
            assert_eq!(ViewPreset::from_name(preset.name()), Some(preset));
        }
        assert_eq!(ViewPreset::from_name(" TOP "), Some(ViewPreset::Top));
        assert_eq!(ViewPreset::from_name("iso"), None);
    }

    #[test]
    fn test_top_view_up_vector() {
        assert_eq!(ViewPreset::Top.up(), Vector3::y());
        assert_eq!(ViewPreset::Front.up(), Vector3::z());
    }
}
