/// Viewer: immutable per-frame snapshot of the occlusion camera.
///
/// Built once per frame, either directly or from the viewer object's
/// transform plus the configured `Lens`. Everything derived from it
/// (frustum, occlusion volumes) is valid for that frame only.

use glam::Vec3;
use crate::scene::Transform;

/// Optical parameters of the occlusion camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lens {
    /// Near clip distance
    pub near: f32,
    /// Far clip distance
    pub far: f32,
    /// Vertical field of view, half-angle in radians
    pub half_fov_y: f32,
    /// Width / height
    pub aspect: f32,
}

impl Lens {
    /// Lens from a full vertical field of view in degrees.
    pub fn from_fov_degrees(fov_y_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            near,
            far,
            half_fov_y: (fov_y_degrees * 0.5).to_radians(),
            aspect,
        }
    }
}

impl Default for Lens {
    /// 60° vertical, 16:9, 0.3 to 1000.
    fn default() -> Self {
        Self::from_fov_degrees(60.0, 16.0 / 9.0, 0.3, 1000.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewer {
    pub position: Vec3,
    pub forward: Vec3,
    pub right: Vec3,
    pub up: Vec3,
    pub lens: Lens,
}

impl Viewer {
    pub fn new(position: Vec3, forward: Vec3, right: Vec3, up: Vec3, lens: Lens) -> Self {
        Self { position, forward, right, up, lens }
    }

    /// Snapshot from a world transform. Scale is ignored.
    pub fn from_transform(transform: &Transform, lens: Lens) -> Self {
        Self {
            position: transform.position,
            forward: transform.forward(),
            right: transform.right(),
            up: transform.up(),
            lens,
        }
    }

    /// Viewer at `position` looking along `forward`, with `up` as the roll hint.
    pub fn looking_to(position: Vec3, forward: Vec3, up: Vec3, lens: Lens) -> Self {
        let forward = forward.normalize();
        let right = up.cross(forward).normalize();
        let up = forward.cross(right);
        Self { position, forward, right, up, lens }
    }

    /// Full height of the view volume's cross-section at distance `d`.
    pub fn height_at(&self, distance: f32) -> f32 {
        2.0 * self.lens.half_fov_y.tan() * distance
    }

    /// Full width of the view volume's cross-section at distance `d`.
    pub fn width_at(&self, distance: f32) -> f32 {
        self.height_at(distance) * self.lens.aspect
    }
}

#[cfg(test)]
#[path = "viewer_tests.rs"]
mod tests;
