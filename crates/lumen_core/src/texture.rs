//! Texel storage and filtered lookup for materials.
//!
//! Decoding image files is the loader's job; this module only holds texels
//! that were handed over already decoded.

use crate::material::Color;
use thiserror::Error;

/// Errors that can occur when building a texture from raw data.
#[derive(Error, Debug, PartialEq)]
pub enum TextureError {
    #[error("Texture has zero size: {width}x{height}")]
    Empty { width: u32, height: u32 },

    #[error("Texture {width}x{height} expects {expected} bytes, got {actual}")]
    SizeMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

pub type TextureResult<T> = Result<T, TextureError>;

/// An RGB texture.
///
/// Texels are stored row-major, row 0 at `v = 0`. Lookups wrap around in both
/// directions, so `(u, v)` and `(u + 1, v - 3)` sample the same point.
#[derive(Clone, Debug, PartialEq)]
pub struct Texture {
    width: u32,
    height: u32,
    texels: Vec<Color>,
}

impl Texture {
    /// Create a solid color texture (1x1).
    pub fn solid_color(color: Color) -> Self {
        Self {
            width: 1,
            height: 1,
            texels: vec![color],
        }
    }

    /// Create a texture from float texels.
    pub fn from_texels(width: u32, height: u32, texels: Vec<Color>) -> TextureResult<Self> {
        if width == 0 || height == 0 {
            return Err(TextureError::Empty { width, height });
        }
        let expected = width as usize * height as usize;
        if texels.len() != expected {
            return Err(TextureError::SizeMismatch {
                width,
                height,
                expected,
                actual: texels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            texels,
        })
    }

    /// Create a texture from 8-bit RGBA data. Alpha is ignored.
    pub fn from_rgba8(width: u32, height: u32, bytes: &[u8]) -> TextureResult<Self> {
        let expected = width as usize * height as usize * 4;
        if bytes.len() != expected {
            return Err(TextureError::SizeMismatch {
                width,
                height,
                expected,
                actual: bytes.len(),
            });
        }

        let texels = bytes
            .chunks_exact(4)
            .map(|p| Color::new(p[0] as f32, p[1] as f32, p[2] as f32) / 255.0)
            .collect();
        Self::from_texels(width, height, texels)
    }

    /// Texture width in texels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Texture height in texels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Sample the texture at UV coordinates (bilinear filtering, wraparound).
    pub fn sample(&self, u: f32, v: f32) -> Color {
        let (x0, x1, fx) = Self::wrap_axis(u, self.width);
        let (y0, y1, fy) = Self::wrap_axis(v, self.height);

        let p00 = self.texel(x0, y0);
        let p10 = self.texel(x1, y0);
        let p01 = self.texel(x0, y1);
        let p11 = self.texel(x1, y1);

        let bottom = p00 * (1.0 - fx) + p10 * fx;
        let top = p01 * (1.0 - fx) + p11 * fx;
        bottom * (1.0 - fy) + top * fy
    }

    /// Split a coordinate into the two neighbouring texel indices along one
    /// axis and the blend factor between them. The neighbour of the last
    /// texel is texel 0.
    fn wrap_axis(coord: f32, size: u32) -> (u32, u32, f32) {
        let wrapped = coord.rem_euclid(1.0);
        let scaled = if wrapped.is_finite() { wrapped * size as f32 } else { 0.0 };
        let lower = (scaled.floor() as u32).min(size - 1);
        let upper = if lower + 1 == size { 0 } else { lower + 1 };
        (lower, upper, (scaled - lower as f32).clamp(0.0, 1.0))
    }

    /// Get texel at integer coordinates.
    fn texel(&self, x: u32, y: u32) -> Color {
        self.texels[(y * self.width + x) as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Color, b: Color) -> bool {
        (a - b).length() < 1e-5
    }

    fn checker() -> Texture {
        // 2x2: black, white / white, black
        Texture::from_texels(
            2,
            2,
            vec![Color::ZERO, Color::ONE, Color::ONE, Color::ZERO],
        )
        .unwrap()
    }

    #[test]
    fn test_dimensions_follow_texels() {
        let tex = Texture::from_rgba8(3, 2, &[128; 24]).unwrap();
        assert_eq!((tex.width(), tex.height()), (3, 2));
        // Every in-range and wrapped lookup stays inside the texel store
        for (u, v) in [(0.0, 0.0), (0.99, 0.99), (-0.01, 1.5), (7.3, -2.2)] {
            assert!(approx(tex.sample(u, v), Color::splat(128.0 / 255.0)));
        }
    }

    #[test]
    fn test_solid_color_texture() {
        let tex = Texture::solid_color(Color::new(1.0, 0.5, 0.0));
        assert_eq!(tex.width(), 1);
        assert_eq!(tex.height(), 1);

        assert!(approx(tex.sample(0.5, 0.5), Color::new(1.0, 0.5, 0.0)));
        assert!(approx(tex.sample(-3.7, 12.2), Color::new(1.0, 0.5, 0.0)));
    }

    #[test]
    fn test_texel_corners() {
        let tex = checker();
        assert!(approx(tex.sample(0.0, 0.0), Color::ZERO));
        assert!(approx(tex.sample(0.5, 0.0), Color::ONE));
        assert!(approx(tex.sample(0.0, 0.5), Color::ONE));
        assert!(approx(tex.sample(0.5, 0.5), Color::ZERO));
    }

    #[test]
    fn test_bilinear_blend() {
        let tex = checker();
        // Halfway between texel 0 (black) and texel 1 (white) on the bottom row
        let c = tex.sample(0.25, 0.0);
        assert!(approx(c, Color::splat(0.5)));
    }

    #[test]
    fn test_wraparound() {
        let tex = checker();
        // Between the last column (white) and column 0 (black)
        let c = tex.sample(0.75, 0.0);
        assert!(approx(c, Color::splat(0.5)));

        // Negative and >1 coordinates wrap
        assert!(approx(tex.sample(-0.5, 0.0), tex.sample(0.5, 0.0)));
        assert!(approx(tex.sample(1.25, 2.0), tex.sample(0.25, 0.0)));
    }

    #[test]
    fn test_from_rgba8() {
        let tex = Texture::from_rgba8(1, 1, &[255, 0, 51, 7]).unwrap();
        assert!(approx(tex.sample(0.3, 0.3), Color::new(1.0, 0.0, 0.2)));

        let err = Texture::from_rgba8(2, 2, &[0; 12]).unwrap_err();
        assert_eq!(
            err,
            TextureError::SizeMismatch {
                width: 2,
                height: 2,
                expected: 16,
                actual: 12
            }
        );
    }

    #[test]
    fn test_empty_texture_rejected() {
        assert_eq!(
            Texture::from_texels(0, 4, Vec::new()).unwrap_err(),
            TextureError::Empty { width: 0, height: 4 }
        );
    }
}
