/// View frustum: 8 world-space corners and 6 clipping planes.
///
/// Corners are computed directly from the viewer snapshot. Planes are
/// derived from the corners; each is a Vec4 (A, B, C, D) where:
/// - (A, B, C) is the inward-pointing unit normal
/// - A point P is inside if dot(plane, P_homogeneous) >= 0 for all planes

use glam::{Vec3, Vec4};
use crate::scene::AABB;
use super::viewer::Viewer;

/// Corner indices, in storage order
pub const NEAR_BOTTOM_LEFT: usize = 0;
pub const NEAR_BOTTOM_RIGHT: usize = 1;
pub const NEAR_TOP_RIGHT: usize = 2;
pub const NEAR_TOP_LEFT: usize = 3;
pub const FAR_BOTTOM_LEFT: usize = 4;
pub const FAR_BOTTOM_RIGHT: usize = 5;
pub const FAR_TOP_RIGHT: usize = 6;
pub const FAR_TOP_LEFT: usize = 7;

/// Frustum plane indices
pub const PLANE_LEFT: usize = 0;
pub const PLANE_RIGHT: usize = 1;
pub const PLANE_BOTTOM: usize = 2;
pub const PLANE_TOP: usize = 3;
pub const PLANE_NEAR: usize = 4;
pub const PLANE_FAR: usize = 5;

/// The 12 frustum edges as corner index pairs (near ring, far ring, sides).
pub const FRUSTUM_EDGES: [(usize, usize); 12] = [
    (0, 1), (1, 2), (2, 3), (3, 0),
    (4, 5), (5, 6), (6, 7), (7, 4),
    (0, 4), (1, 5), (2, 6), (3, 7),
];

/// The 8 corners of the viewer's view volume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrustumCorners {
    pub points: [Vec3; 8],
}

impl FrustumCorners {
    /// Corners at `near` and `far` along the viewer's forward axis.
    ///
    /// No clamping: fov >= 180° or near >= far give a degenerate frustum.
    pub fn compute(viewer: &Viewer) -> Self {
        let ring = |distance: f32| -> [Vec3; 4] {
            let center = viewer.position + viewer.forward * distance;
            let half_w = viewer.right * (viewer.width_at(distance) * 0.5);
            let half_h = viewer.up * (viewer.height_at(distance) * 0.5);
            [
                center - half_w - half_h,
                center + half_w - half_h,
                center + half_w + half_h,
                center - half_w + half_h,
            ]
        };

        let near = ring(viewer.lens.near);
        let far = ring(viewer.lens.far);
        Self {
            points: [near[0], near[1], near[2], near[3], far[0], far[1], far[2], far[3]],
        }
    }

    pub fn near_ring(&self) -> &[Vec3] {
        &self.points[NEAR_BOTTOM_LEFT..=NEAR_TOP_LEFT]
    }

    pub fn far_ring(&self) -> &[Vec3] {
        &self.points[FAR_BOTTOM_LEFT..=FAR_TOP_LEFT]
    }

    pub fn centroid(&self) -> Vec3 {
        self.points.iter().copied().sum::<Vec3>() / 8.0
    }
}

/// Six frustum planes for culling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frustum {
    /// Frustum planes: left, right, bottom, top, near, far
    pub planes: [Vec4; 6],
}

impl Frustum {
    /// Derive the 6 inward planes from the corners.
    ///
    /// Each plane passes through three corners of its face and is oriented
    /// toward the corners' centroid.
    pub fn from_corners(corners: &FrustumCorners) -> Self {
        let p = &corners.points;
        let inside = corners.centroid();
        let faces = [
            (NEAR_BOTTOM_LEFT, NEAR_TOP_LEFT, FAR_BOTTOM_LEFT),
            (NEAR_BOTTOM_RIGHT, NEAR_TOP_RIGHT, FAR_BOTTOM_RIGHT),
            (NEAR_BOTTOM_LEFT, NEAR_BOTTOM_RIGHT, FAR_BOTTOM_LEFT),
            (NEAR_TOP_LEFT, NEAR_TOP_RIGHT, FAR_TOP_LEFT),
            (NEAR_BOTTOM_LEFT, NEAR_BOTTOM_RIGHT, NEAR_TOP_RIGHT),
            (FAR_BOTTOM_LEFT, FAR_BOTTOM_RIGHT, FAR_TOP_RIGHT),
        ];

        let planes = faces.map(|(a, b, c)| {
            let mut normal = (p[b] - p[a]).cross(p[c] - p[a]).normalize_or_zero();
            if normal.dot(inside - p[a]) < 0.0 {
                normal = -normal;
            }
            normal.extend(-normal.dot(p[a]))
        });

        Self { planes }
    }

    /// Corners and planes of a viewer's frustum in one call.
    pub fn from_viewer(viewer: &Viewer) -> (FrustumCorners, Self) {
        let corners = FrustumCorners::compute(viewer);
        let frustum = Self::from_corners(&corners);
        (corners, frustum)
    }

    /// Test if a point is inside (or on) every plane.
    pub fn contains_point(&self, point: Vec3) -> bool {
        self.planes.iter().all(|plane| plane.truncate().dot(point) + plane.w >= 0.0)
    }

    /// Test if an AABB intersects this frustum.
    ///
    /// "Positive vertex" test: for each plane, take the AABB corner most in
    /// the direction of the plane normal. If that corner is outside, the
    /// AABB is fully outside.
    ///
    /// Conservative: may return false positives near frustum edges, never
    /// false negatives.
    pub fn intersects_aabb(&self, aabb: &AABB) -> bool {
        for plane in &self.planes {
            let normal = plane.truncate();

            let p_vertex = Vec3::new(
                if normal.x >= 0.0 { aabb.max.x } else { aabb.min.x },
                if normal.y >= 0.0 { aabb.max.y } else { aabb.min.y },
                if normal.z >= 0.0 { aabb.max.z } else { aabb.min.z },
            );

            if normal.dot(p_vertex) + plane.w < 0.0 {
                return false;
            }
        }

        true
    }
}

#[cfg(test)]
#[path = "frustum_tests.rs"]
mod tests;
