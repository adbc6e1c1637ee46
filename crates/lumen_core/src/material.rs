//! Phong-style surface materials for Whitted ray tracing.

use std::sync::Arc;

use lumen_math::Vec3;

use crate::texture::Texture;

/// Color type alias (linear RGB, values typically 0-1)
pub type Color = Vec3;

/// Surface response coefficients plus an optional texture.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    /// Material name (for logging)
    pub name: String,

    /// Response to the scene's ambient light
    pub ambient: Color,

    /// Response to point lights
    pub diffuse: Color,

    /// Mirror reflectance; black disables reflection rays
    pub specular: Color,

    /// Index of refraction. `0.0` marks an opaque surface; any positive value
    /// is a transparent dielectric with that index.
    pub refractive_index: f32,

    /// Surface color texture. Untextured materials sample as white.
    pub texture: Option<Arc<Texture>>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: String::new(),
            ambient: Color::ONE,
            diffuse: Color::ONE,
            specular: Color::ZERO,
            refractive_index: 0.0,
            texture: None,
        }
    }
}

impl Material {
    /// Create an opaque material with the same ambient and diffuse response.
    pub fn diffuse(color: Color) -> Self {
        Self {
            ambient: color,
            diffuse: color,
            ..Default::default()
        }
    }

    /// Create a perfect mirror.
    pub fn mirror(specular: Color) -> Self {
        Self {
            ambient: Color::ZERO,
            diffuse: Color::ZERO,
            specular,
            ..Default::default()
        }
    }

    /// Create a transparent dielectric with the given index of refraction.
    pub fn dielectric(refractive_index: f32) -> Self {
        Self {
            ambient: Color::ZERO,
            diffuse: Color::ZERO,
            specular: Color::ONE,
            refractive_index,
            ..Default::default()
        }
    }

    /// Builder-style name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Builder-style texture.
    pub fn with_texture(mut self, texture: Arc<Texture>) -> Self {
        self.texture = Some(texture);
        self
    }

    /// True when the surface blocks light (refractive index is the 0 sentinel).
    pub fn is_opaque(&self) -> bool {
        self.refractive_index == 0.0
    }

    /// Surface color at the given texture coordinates.
    pub fn sample(&self, u: f32, v: f32) -> Color {
        match &self.texture {
            Some(texture) => texture.sample(u, v),
            None => Color::ONE,
        }
    }
}
