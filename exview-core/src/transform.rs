/// Model orientation for interactive viewing
use nalgebra::{Matrix4, Point3, Vector3};

/// User-controlled turntable orientation (radians).
///
/// The model's Z axis is "up", matching the scene cameras, so yaw spins
/// around Z and pitch tilts around X.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Orientation {
    pub yaw: f64,
    pub pitch: f64,
}

impl Orientation {
    pub fn new(yaw: f64, pitch: f64) -> Self {
        Self { yaw, pitch }
    }

    /// Rotate by delta amounts; pitch is kept short of a full flip
    pub fn rotate(&mut self, d_yaw: f64, d_pitch: f64) {
        const PITCH_LIMIT: f64 = std::f64::consts::FRAC_PI_2 - 0.01;
        self.yaw = (self.yaw + d_yaw) % std::f64::consts::TAU;
        self.pitch = (self.pitch + d_pitch).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn rotation_matrix(&self) -> Matrix4<f64> {
        let yaw = Matrix4::new_rotation(Vector3::z() * self.yaw);
        let pitch = Matrix4::new_rotation(Vector3::x() * self.pitch);
        pitch * yaw
    }

    /// Model matrix rotating about `pivot` instead of the world origin
    pub fn model_matrix(&self, pivot: Point3<f64>) -> Matrix4<f64> {
        Matrix4::new_translation(&pivot.coords)
            * self.rotation_matrix()
            * Matrix4::new_translation(&-pivot.coords)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_orientation() {
        let matrix = Orientation::default().rotation_matrix();
        assert!((matrix - Matrix4::identity()).norm() < 1e-12);
    }

    #[test]
    fn test_pitch_is_clamped() {
        let mut orientation = Orientation::default();
        orientation.rotate(0.0, 10.0);
        assert!(orientation.pitch < std::f64::consts::FRAC_PI_2);
        orientation.reset();
        assert_eq!(orientation, Orientation::default());
    }

    #[test]
    fn test_pivot_is_fixed() {
        let pivot = Point3::new(3.0, -2.0, 7.0);
        let model = Orientation::new(0.7, 0.3).model_matrix(pivot);
        let moved = model.transform_point(&pivot);
        assert!((moved - pivot).norm() < 1e-9);
    }
}
