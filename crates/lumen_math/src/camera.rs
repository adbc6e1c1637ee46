use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Camera description consumed by the tracer.
///
/// The orientation is relative to a default view down -Z with +Y up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub position: Vec3,
    pub orientation: Quat,
    /// Vertical field of view in radians
    pub fov_y: f32,
    /// Width / height
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            fov_y: std::f32::consts::FRAC_PI_4,
            aspect: 1.0,
            near: 0.1,
            far: 10.0,
        }
    }
}

impl Camera {
    /// Create a camera at `position` looking towards `target`.
    ///
    /// Falls back to the default orientation if `target` coincides with
    /// `position`.
    pub fn look_at(position: Vec3, target: Vec3, up: Vec3, aspect: f32) -> Self {
        let forward = (target - position).normalize_or_zero();
        let orientation = if forward == Vec3::ZERO {
            Quat::IDENTITY
        } else {
            let right = forward.cross(up).normalize_or_zero();
            let right = if right == Vec3::ZERO {
                forward.any_orthonormal_vector()
            } else {
                right
            };
            let true_up = right.cross(forward);
            // Columns are the camera's X, Y, Z axes in world space (Z points backwards)
            Quat::from_mat3(&glam::Mat3::from_cols(right, true_up, -forward))
        };

        Self {
            position,
            orientation,
            aspect,
            ..Default::default()
        }
    }

    /// The viewing direction (unit length).
    pub fn direction(&self) -> Vec3 {
        self.orientation * Vec3::NEG_Z
    }

    /// The up vector (unit length).
    pub fn up(&self) -> Vec3 {
        self.orientation * Vec3::Y
    }

    /// Update aspect ratio (e.g., on window resize)
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    /// Move the camera by `v` expressed in camera space.
    pub fn translate(&mut self, v: Vec3) {
        self.position += self.orientation * v;
    }

    /// Rotate about the camera's X axis.
    pub fn pitch(&mut self, radians: f32) {
        self.rotate(self.orientation * Vec3::X, radians);
    }

    /// Rotate about the camera's Y axis.
    pub fn yaw(&mut self, radians: f32) {
        self.rotate(self.orientation * Vec3::Y, radians);
    }

    /// Rotate about the camera's Z axis.
    pub fn roll(&mut self, radians: f32) {
        self.rotate(self.orientation * Vec3::Z, radians);
    }

    fn rotate(&mut self, axis: Vec3, radians: f32) {
        self.orientation = (Quat::from_axis_angle(axis.normalize(), radians) * self.orientation).normalize();
    }
}
