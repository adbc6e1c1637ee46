//! Point lights.

use lumen_math::Vec3;
use serde::{Deserialize, Serialize};

use crate::material::Color;

/// Distance falloff `1 / (constant + linear*d + quadratic*d^2)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Attenuation {
    pub constant: f32,
    pub linear: f32,
    pub quadratic: f32,
}

impl Default for Attenuation {
    fn default() -> Self {
        Self {
            constant: 1.0,
            linear: 0.0,
            quadratic: 0.0,
        }
    }
}

impl Attenuation {
    /// Scale factor at distance `d`.
    pub fn factor(&self, distance: f32) -> f32 {
        1.0 / (self.constant + self.linear * distance + self.quadratic * distance * distance)
    }
}

/// An omnidirectional light at a point in world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointLight {
    pub position: Vec3,
    pub color: Color,
    #[serde(default)]
    pub attenuation: Attenuation,
}

impl Default for PointLight {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            color: Color::ONE,
            attenuation: Attenuation::default(),
        }
    }
}

impl PointLight {
    /// Create a light with no falloff.
    pub fn new(position: Vec3, color: Color) -> Self {
        Self {
            position,
            color,
            attenuation: Attenuation::default(),
        }
    }

    /// Builder-style attenuation.
    pub fn with_attenuation(mut self, constant: f32, linear: f32, quadratic: f32) -> Self {
        self.attenuation = Attenuation {
            constant,
            linear,
            quadratic,
        };
        self
    }

    /// Light color arriving at `distance`.
    pub fn attenuated_color(&self, distance: f32) -> Color {
        self.color * self.attenuation.factor(distance)
    }
}
