use crate::{Interval, Ray, Vec3};

/// Axis-aligned bounding box used as a fast-reject filter in front of
/// per-triangle mesh tests.
///
/// A freshly created box is empty (`min > max` on every axis) and grows by
/// absorbing points. The box lives in whatever frame its points were given in;
/// meshes build theirs in world space.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl BoundingBox {
    /// The empty box (contains nothing, not yet built).
    pub const EMPTY: BoundingBox = BoundingBox {
        min: Vec3::splat(f32::INFINITY),
        max: Vec3::splat(f32::NEG_INFINITY),
    };

    /// Create the smallest box containing every point.
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Self {
        let mut bbox = Self::EMPTY;
        for p in points {
            bbox.absorb(p);
        }
        bbox
    }

    /// True until at least one point has been absorbed.
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Grow the box so it contains `point`.
    pub fn absorb(&mut self, point: Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    /// Slab test: could `ray` pass through the box for some `t` in `ray_t`?
    ///
    /// The ray must already be expressed in the box's frame. A `true` result
    /// does not guarantee a surface hit and no `t` is reported; a `false`
    /// result guarantees nothing inside the box is hit within `ray_t`.
    ///
    /// An axis whose direction component is exactly zero can't be divided by;
    /// the ray is parallel to that slab and only passes if its origin lies
    /// within the slab. The remaining axes are still tested.
    pub fn hit(&self, ray: &Ray, ray_t: Interval) -> bool {
        if self.is_empty() {
            return false;
        }

        let mut t_enter = ray_t.min;
        let mut t_exit = ray_t.max;

        for axis in 0..3 {
            let origin = ray.origin[axis];
            let direction = ray.direction[axis];
            let lo = self.min[axis];
            let hi = self.max[axis];

            if direction == 0.0 {
                if origin < lo || origin > hi {
                    return false;
                }
                continue;
            }

            let inv = 1.0 / direction;
            let mut t0 = (lo - origin) * inv;
            let mut t1 = (hi - origin) * inv;
            if inv < 0.0 {
                std::mem::swap(&mut t0, &mut t1);
            }

            t_enter = t_enter.max(t0);
            t_exit = t_exit.min(t1);
            if t_exit < t_enter {
                return false;
            }
        }

        true
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::EMPTY
    }
}
