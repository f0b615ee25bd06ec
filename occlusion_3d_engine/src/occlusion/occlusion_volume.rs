/// OcclusionVolume: the convex region an occluder hides from the viewer.
///
/// Built from the occluder's local mesh bounds, placed in world space by
/// the occluder's transform. The face of the resulting box that best faces
/// the viewer (largest projected area) becomes the cap; each of its four
/// edges, together with the viewer position, spans a side plane. Any point
/// inside cap + sides is reached from the viewer only through that face, so
/// the volume never claims visible space as hidden.
///
/// Lifetime: one frame. Occluder and viewer may both move.

use glam::Vec3;
use crate::scene::{AABB, BoundingSphere, ObjectId, Transform};
use super::occlusion_plane::OcclusionPlane;
use super::visibility_tester::VisibilityTester;

/// Box faces as corner loops. Corner index bits: 1 = max.x, 2 = max.y, 4 = max.z.
const BOX_FACES: [[usize; 4]; 6] = [
    [0, 2, 6, 4], // -X
    [1, 5, 7, 3], // +X
    [0, 4, 5, 1], // -Y
    [2, 3, 7, 6], // +Y
    [0, 1, 3, 2], // -Z
    [4, 6, 7, 5], // +Z
];

/// The face of an occluder chosen as the volume's cap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OccluderFace {
    /// Corner loop in world space
    pub corners: [Vec3; 4],
    /// Face center in world space
    pub center: Vec3,
    /// Outward unit normal of the occluder box (points toward the viewer)
    pub normal: Vec3,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OcclusionVolume {
    occluder: ObjectId,
    planes: Vec<OcclusionPlane>,
}

impl OcclusionVolume {
    /// Build the volume hidden behind `occluder` as seen from `viewer_position`.
    ///
    /// Returns `None` when no face of the occluder faces the viewer (viewer
    /// inside or touching the occluder) or the bounds are degenerate.
    pub fn build(
        occluder: ObjectId,
        transform: &Transform,
        local_bounds: &AABB,
        viewer_position: Vec3,
    ) -> Option<Self> {
        let face = Self::silhouette_face(transform, local_bounds, viewer_position)?;
        let mut planes = Vec::with_capacity(5);

        planes.push(OcclusionPlane::new(face.center, face.normal));

        for i in 0..4 {
            let a = face.corners[i];
            let b = face.corners[(i + 1) % 4];
            let mut normal = (a - viewer_position).cross(b - viewer_position).normalize_or_zero();
            if normal == Vec3::ZERO {
                return None;
            }
            if normal.dot(face.center - a) > 0.0 {
                normal = -normal;
            }
            planes.push(OcclusionPlane::new((a + b) * 0.5, normal));
        }

        Some(Self { occluder, planes })
    }

    /// Volume from explicit planes (custom occluder shapes).
    pub fn from_planes(occluder: ObjectId, planes: Vec<OcclusionPlane>) -> Self {
        Self { occluder, planes }
    }

    /// Face of the world-space box with the largest area projected toward the viewer.
    pub fn silhouette_face(
        transform: &Transform,
        local_bounds: &AABB,
        viewer_position: Vec3,
    ) -> Option<OccluderFace> {
        let corners = local_bounds.corners().map(|c| transform.transform_point(c));
        let box_center = transform.transform_point(local_bounds.center());

        let mut best: Option<(f32, OccluderFace)> = None;
        for face in BOX_FACES {
            let loop_corners = face.map(|i| corners[i]);
            let center = loop_corners.iter().copied().sum::<Vec3>() * 0.25;

            let cross = (loop_corners[1] - loop_corners[0]).cross(loop_corners[3] - loop_corners[0]);
            let area = cross.length();
            let mut normal = cross.normalize_or_zero();
            if normal == Vec3::ZERO {
                continue;
            }
            if normal.dot(center - box_center) < 0.0 {
                normal = -normal;
            }

            let to_viewer = viewer_position - center;
            let facing = normal.dot(to_viewer.normalize_or_zero());
            if facing <= 0.0 {
                continue;
            }

            let score = area * facing;
            if best.map_or(true, |(best_score, _)| score > best_score) {
                best = Some((score, OccluderFace { corners: loop_corners, center, normal }));
            }
        }

        best.map(|(_, face)| face)
    }

    pub fn occluder(&self) -> ObjectId {
        self.occluder
    }

    pub fn planes(&self) -> &[OcclusionPlane] {
        &self.planes
    }

    pub fn is_empty(&self) -> bool {
        self.planes.is_empty()
    }

    /// Whether the sphere lies entirely inside this volume.
    pub fn contains_sphere(&self, sphere: &BoundingSphere, epsilon: f32) -> bool {
        VisibilityTester::new(epsilon).is_fully_occluded(sphere, &self.planes)
    }
}

#[cfg(test)]
#[path = "occlusion_volume_tests.rs"]
mod tests;
