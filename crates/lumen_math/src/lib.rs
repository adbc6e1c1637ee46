// Re-export glam for convenience
pub use glam::*;

// Lumen math types
mod aabb;
mod camera;
mod interval;
mod ray;
mod transform;

pub use aabb::BoundingBox;
pub use camera::Camera;
pub use interval::Interval;
pub use ray::Ray;
pub use transform::{Transform, TransformCache};
