//! Recursive Whitted shading.
//!
//! Opaque surfaces get ambient and diffuse light from every unoccluded point
//! light plus a mirror bounce when their specular color isn't black.
//! Transparent surfaces split between a mirror bounce and a refracted ray,
//! weighted by Schlick's Fresnel approximation.

use crate::config::TraceConfig;
use crate::hittable::{closest_hit, occluded, HitRecord};
use lumen_core::{Color, Scene};
use lumen_math::{Interval, Ray, Vec3};

/// Outcome of bending a ray through a dielectric boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Refraction {
    /// The ray passes through; `reflectance` of the light is reflected instead.
    Transmitted { direction: Vec3, reflectance: f32 },
    /// All light is reflected.
    TotalInternalReflection,
}

/// Schlick's approximation of the Fresnel reflectance.
///
/// `nt` is the refractive index on the transmission side.
pub fn schlick(cos_term: f32, nt: f32) -> f32 {
    let r0 = ((nt - 1.0) / (nt + 1.0)).powi(2);
    r0 + (1.0 - r0) * (1.0 - cos_term).powi(5)
}

/// Refract unit direction `incoming` at a surface with outward unit `normal`.
///
/// A ray arriving against the normal enters the surface's medium; otherwise it
/// leaves it for the ambient medium.
pub fn refract(incoming: Vec3, normal: Vec3, surface_index: f32, ambient_index: f32) -> Refraction {
    let dn = incoming.dot(normal);
    let entering = dn < 0.0;
    let (normal, dn, ratio, nt) = if entering {
        (normal, dn, ambient_index / surface_index, surface_index)
    } else {
        let flipped = -normal;
        (flipped, incoming.dot(flipped), surface_index / ambient_index, ambient_index)
    };

    let discriminant = 1.0 - ratio * ratio * (1.0 - dn * dn);
    if discriminant < 0.0 {
        return Refraction::TotalInternalReflection;
    }

    let direction = (ratio * (incoming - normal * dn) - normal * discriminant.sqrt()).normalize();
    let cos_term = if entering {
        -dn
    } else {
        direction.dot(-normal)
    };

    Refraction::Transmitted {
        direction,
        reflectance: schlick(cos_term, nt),
    }
}

/// Mirror `incoming` about `normal`.
fn reflect(incoming: Vec3, normal: Vec3) -> Vec3 {
    (incoming - 2.0 * incoming.dot(normal) * normal).normalize()
}

/// Ambient plus unshadowed diffuse light at a hit, tinted by its surface color.
pub fn direct_illumination(scene: &Scene, hit: &HitRecord, config: &TraceConfig) -> Color {
    let ambient_term = hit.ambient * scene.ambient_light;
    let mut diffuse_sum = Color::ZERO;

    for light in scene.lights() {
        let to_light = light.position - hit.position;
        let distance = to_light.length();
        let Some(light_dir) = to_light.try_normalize() else {
            log::warn!("Light at {:?} coincides with a shaded point, skipping", light.position);
            continue;
        };

        let shadow_ray = Ray::new(hit.position, light_dir);
        let shadow_t = Interval::new(distance * config.shadow_epsilon_ratio, distance);
        if occluded(scene, &shadow_ray, shadow_t) {
            continue;
        }

        diffuse_sum += light.attenuated_color(distance) * hit.diffuse * hit.normal.dot(light_dir).max(0.0);
    }

    hit.surface_color * (ambient_term + diffuse_sum)
}

/// Compute the color seen by a ray.
///
/// `depth` is the remaining recursion budget; at zero the result is black.
pub fn trace_ray(scene: &Scene, ray: &Ray, ray_t: Interval, depth: u32, config: &TraceConfig) -> Color {
    if depth == 0 {
        return Color::ZERO;
    }

    let Some((_, hit)) = closest_hit(scene, ray, ray_t) else {
        return scene.background_color;
    };

    let incoming = ray.direction.normalize();
    let secondary_t = Interval::new(config.secondary_epsilon, config.secondary_t_max);

    let direct = if hit.is_opaque() {
        direct_illumination(scene, &hit, config)
    } else {
        Color::ZERO
    };

    let reflected = if hit.specular != Color::ZERO {
        let bounce = Ray::new(hit.position, reflect(incoming, hit.normal));
        hit.specular * hit.surface_color * trace_ray(scene, &bounce, secondary_t, depth - 1, config)
    } else {
        Color::ZERO
    };

    if hit.is_opaque() {
        return direct + reflected;
    }

    match refract(incoming, hit.normal, hit.refractive_index, scene.refractive_index) {
        Refraction::TotalInternalReflection => direct + reflected,
        Refraction::Transmitted {
            direction,
            reflectance,
        } => {
            let through = Ray::new(hit.position, direction);
            let refracted = hit.surface_color * trace_ray(scene, &through, secondary_t, depth - 1, config);
            direct + reflectance * reflected + (1.0 - reflectance) * refracted
        }
    }
}
