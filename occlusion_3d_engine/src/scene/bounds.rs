/// Bounding volumes used by the culling core.
///
/// `AABB` holds local mesh bounds (as returned by the scene) and
/// world-space candidate boxes for the frustum test. `BoundingSphere`
/// is the conservative stand-in for a candidate in containment and
/// line-of-sight tests.

use glam::Vec3;

// ===== AABB =====

/// Axis-Aligned Bounding Box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    /// Minimum corner (x, y, z)
    pub min: Vec3,
    /// Maximum corner (x, y, z)
    pub max: Vec3,
}

impl AABB {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    pub fn from_center_extents(center: Vec3, extents: Vec3) -> Self {
        Self { min: center - extents, max: center + extents }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Half-size along each axis.
    pub fn extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// The 8 corners. Bit 0 of the index selects max.x, bit 1 max.y, bit 2 max.z.
    pub fn corners(&self) -> [Vec3; 8] {
        std::array::from_fn(|i| Vec3::new(
            if i & 1 != 0 { self.max.x } else { self.min.x },
            if i & 2 != 0 { self.max.y } else { self.min.y },
            if i & 4 != 0 { self.max.z } else { self.min.z },
        ))
    }
}

// ===== BOUNDING SPHERE =====

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    pub center: Vec3,
    pub radius: f32,
}

impl BoundingSphere {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Tightest axis-aligned box around the sphere.
    pub fn aabb(&self) -> AABB {
        AABB::from_center_extents(self.center, Vec3::splat(self.radius))
    }

    /// Ray parameter of the first intersection with the sphere, if any.
    ///
    /// `direction` need not be normalized; the parameter is in units of it.
    /// An origin inside the sphere hits at `t = 0`.
    pub fn ray_hit(&self, origin: Vec3, direction: Vec3) -> Option<f32> {
        let oc = origin - self.center;
        let a = direction.length_squared();
        if a == 0.0 {
            return None;
        }
        let c = oc.length_squared() - self.radius * self.radius;
        if c <= 0.0 {
            return Some(0.0);
        }
        let b = oc.dot(direction);
        let discriminant = b * b - a * c;
        if discriminant < 0.0 {
            return None;
        }
        let t = (-b - discriminant.sqrt()) / a;
        (t >= 0.0).then_some(t)
    }
}

/// Slab test of a ray against an AABB. Returns the entry parameter.
///
/// An origin inside the box hits at `t = 0`.
pub fn ray_aabb_hit(aabb: &AABB, origin: Vec3, direction: Vec3) -> Option<f32> {
    let mut t_min = 0.0f32;
    let mut t_max = f32::INFINITY;

    for axis in 0..3 {
        let o = origin[axis];
        let d = direction[axis];
        if d.abs() < f32::EPSILON {
            if o < aabb.min[axis] || o > aabb.max[axis] {
                return None;
            }
            continue;
        }
        let inv = 1.0 / d;
        let mut t0 = (aabb.min[axis] - o) * inv;
        let mut t1 = (aabb.max[axis] - o) * inv;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        t_min = t_min.max(t0);
        t_max = t_max.min(t1);
        if t_min > t_max {
            return None;
        }
    }

    Some(t_min)
}

#[cfg(test)]
#[path = "bounds_tests.rs"]
mod tests;
