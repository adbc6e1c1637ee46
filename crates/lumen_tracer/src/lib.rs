//! Lumen Tracer - incremental Whitted-style CPU ray tracing.
//!
//! Traces a [`lumen_core::Scene`] one pixel row at a time so that a frame loop
//! can show the image as it develops:
//!
//! ```ignore
//! scene.prepare()?;
//! let mut tracer = Raytracer::new();
//! tracer.initialize(&scene, width, height, &camera)?;
//! while !tracer.raytrace(&mut pixels, Some(Duration::from_millis(16)))? {
//!     present(&pixels);
//! }
//! ```
//!
//! Each pixel gets one primary ray. Hits spawn shadow rays towards every point
//! light, a mirror ray for specular surfaces and a refracted ray for
//! dielectrics, down to a fixed recursion depth.

mod camera;
mod config;
mod error;
mod hittable;
mod model;
mod raytracer;
mod shading;
mod sphere;
mod triangle;

pub use camera::CameraRays;
pub use config::TraceConfig;
pub use error::TraceError;
pub use hittable::{closest_hit, occluded, HitRecord, Hittable};
pub use raytracer::{color_to_rgba, Raytracer};
pub use shading::{direct_illumination, refract, schlick, trace_ray, Refraction};
pub use triangle::{intersect_triangle, Barycentric};

/// Re-export common math and scene types
pub use lumen_core::{Color, Scene};
pub use lumen_math::{Camera, Interval, Ray, Vec3};
