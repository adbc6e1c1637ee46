use lumen_core::SceneError;
use thiserror::Error;

/// Errors reported by [`crate::Raytracer`].
#[derive(Error, Debug, PartialEq)]
pub enum TraceError {
    #[error("Image size must be positive, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Invalid camera: {0}")]
    InvalidCamera(&'static str),

    #[error("Scene is not ready for tracing: {0}")]
    Scene(#[from] SceneError),

    #[error("raytrace called before initialize")]
    NotInitialized,

    #[error("Pixel buffer holds {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },
}
