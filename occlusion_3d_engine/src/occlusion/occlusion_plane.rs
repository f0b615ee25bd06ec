/// One bounding plane of an occlusion volume.
///
/// Stored as (center, outward unit normal) rather than (normal, d) so that
/// the plane can be drawn at a meaningful spot for diagnostics.

use glam::Vec3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OcclusionPlane {
    /// A point on the plane
    pub center: Vec3,
    /// Unit normal pointing away from the volume's interior
    pub normal: Vec3,
}

impl OcclusionPlane {
    /// Plane through `center`. `normal` is normalized here.
    pub fn new(center: Vec3, normal: Vec3) -> Self {
        Self { center, normal: normal.normalize_or_zero() }
    }

    /// h = (P − center)·normal. Negative inside, positive outside.
    #[inline]
    pub fn signed_distance(&self, point: Vec3) -> f32 {
        (point - self.center).dot(self.normal)
    }
}
