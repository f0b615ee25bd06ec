/// VisibilityTester: sphere-in-volume containment.
///
/// A sphere is fully occluded by a volume when it lies on the inner side of
/// every plane by at least its radius: h = (center − p.center)·p.normal must
/// satisfy h <= −radius − epsilon for all planes. One failing plane is
/// enough to reject, so evaluation stops at the first one.
///
/// `epsilon` pushes borderline spheres toward "not occluded". Zero gives
/// the plain strict test.

use crate::scene::{BoundingSphere, ObjectId};
use super::occlusion_plane::OcclusionPlane;
use super::occlusion_volume::OcclusionVolume;

/// Default boundary tolerance (world units)
pub const DEFAULT_CONTAINMENT_EPSILON: f32 = 1e-5;

/// A candidate proven hidden, and the first occluder that hides it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occlusion {
    pub candidate: ObjectId,
    pub occluder: ObjectId,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityTester {
    epsilon: f32,
}

impl VisibilityTester {
    pub fn new(epsilon: f32) -> Self {
        Self { epsilon }
    }

    pub fn epsilon(&self) -> f32 {
        self.epsilon
    }

    /// Whether the sphere lies entirely inside every plane's half-space.
    pub fn is_fully_occluded(&self, sphere: &BoundingSphere, planes: &[OcclusionPlane]) -> bool {
        let limit = -sphere.radius - self.epsilon;
        planes.iter().all(|plane| plane.signed_distance(sphere.center) <= limit)
    }

    /// Resolve candidates against occluders, one occluder at a time.
    ///
    /// A shared working set shrinks as containment is proven: each
    /// candidate is attributed to the first volume (in `volumes` order)
    /// that fully contains it and is never tested again. Results are in
    /// resolution order.
    pub fn resolve(
        &self,
        candidates: &[(ObjectId, BoundingSphere)],
        volumes: &[OcclusionVolume],
    ) -> Vec<Occlusion> {
        let mut unresolved: Vec<&(ObjectId, BoundingSphere)> = candidates.iter().collect();
        let mut resolved = Vec::new();

        for volume in volumes {
            if unresolved.is_empty() {
                break;
            }
            unresolved.retain(|(candidate, sphere)| {
                if self.is_fully_occluded(sphere, volume.planes()) {
                    resolved.push(Occlusion { candidate: *candidate, occluder: volume.occluder() });
                    false
                } else {
                    true
                }
            });
        }

        resolved
    }
}

impl Default for VisibilityTester {
    fn default() -> Self {
        Self::new(DEFAULT_CONTAINMENT_EPSILON)
    }
}

#[cfg(test)]
#[path = "visibility_tester_tests.rs"]
mod tests;
