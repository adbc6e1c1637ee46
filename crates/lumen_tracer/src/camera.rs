//! Primary ray generation.
//!
//! The image plane sits on the camera's near plane. Row 0 is the bottom of the
//! image and every ray passes through the center of its pixel.

use crate::error::TraceError;
use lumen_math::{Camera, Interval, Ray, Vec3};
use std::f32::consts::PI;

/// Per-pixel ray basis derived from a camera and an image size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraRays {
    origin: Vec3,
    /// Camera forward, scaled to the near plane
    forward_near: Vec3,
    /// Offset between vertically adjacent pixels on the near plane
    up_step: Vec3,
    /// Offset between horizontally adjacent pixels on the near plane
    right_step: Vec3,
    width: u32,
    height: u32,
    range: Interval,
}

impl CameraRays {
    /// Derive the ray basis, rejecting settings that would give NaN or
    /// zero-length rays.
    pub fn new(camera: &Camera, width: u32, height: u32) -> Result<Self, TraceError> {
        if width == 0 || height == 0 {
            return Err(TraceError::InvalidDimensions { width, height });
        }
        if !(camera.fov_y > 0.0 && camera.fov_y < PI) {
            return Err(TraceError::InvalidCamera("field of view must be in (0, pi)"));
        }
        if !(camera.aspect > 0.0 && camera.aspect.is_finite()) {
            return Err(TraceError::InvalidCamera("aspect ratio must be positive"));
        }
        if !(camera.near > 0.0 && camera.far > camera.near) {
            return Err(TraceError::InvalidCamera("clip planes must satisfy 0 < near < far"));
        }

        let forward = camera
            .direction()
            .try_normalize()
            .ok_or(TraceError::InvalidCamera("forward vector is zero"))?;
        let right = forward
            .cross(camera.up())
            .try_normalize()
            .ok_or(TraceError::InvalidCamera("forward and up vectors are parallel"))?;
        let up = right.cross(forward);

        let near_height = camera.near * (camera.fov_y / 2.0).tan();
        let near_width = near_height * camera.aspect;

        Ok(Self {
            origin: camera.position,
            forward_near: forward * camera.near,
            up_step: up * (near_height / height as f32 * 2.0),
            right_step: right * (near_width / width as f32 * 2.0),
            width,
            height,
            range: Interval::new(camera.near, camera.far),
        })
    }

    /// Ray through the center of pixel `(x, y)`, `y` counted from the bottom.
    ///
    /// The half-pixel offset puts rays at pixel centers, so the image is
    /// symmetric about the view axis. Rays aimed at pixel corners
    /// (`x - width / 2`) would sit half a pixel lower and to the left.
    pub fn ray(&self, x: u32, y: u32) -> Ray {
        let dx = x as f32 + 0.5 - self.width as f32 / 2.0;
        let dy = y as f32 + 0.5 - self.height as f32 / 2.0;
        let direction = (self.forward_near + self.up_step * dy + self.right_step * dx).normalize();
        Ray::new(self.origin, direction)
    }

    /// Legal `t` range of primary rays: the near and far clip distances.
    pub fn range(&self) -> Interval {
        self.range
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}
