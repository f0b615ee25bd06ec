/// LineOfSightConfirmer: frustum box test followed by a ray cast.
///
/// A candidate whose sphere box lies outside the view frustum is rejected
/// without touching the scene. Otherwise a ray from the viewer toward the
/// candidate is cast, and the candidate is visible only if the first
/// surface hit is accepted by the `HitMatchPolicy`.

use crate::camera::{Frustum, Viewer};
use crate::scene::{BoundingSphere, ObjectId, Ray, RayFilter, RayHit, SceneQuery, SurfaceTags};
use super::candidate_registry::{BoundingSphereProxy, CandidateRegistry};

/// Which hit objects count as "reached the candidate".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HitMatchPolicy {
    /// The candidate, its own proxy, or ANY surface tagged
    /// `VISIBILITY_PROXY`.
    ///
    /// A sibling candidate's proxy standing in front of this one still
    /// counts as a hit on this candidate, including proxies left behind by
    /// unregistered candidates or owned by another culler.
    #[default]
    ProxyOrSelf,
    /// The candidate or its own proxy only.
    Strict,
}

/// Outcome of the line-of-sight check for one candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOfSight {
    /// Rejected by the frustum box test, no ray cast
    OutsideFrustum,
    /// Ray cast hit nothing
    NoHit,
    /// First hit was an object not accepted by the policy
    Blocked(ObjectId),
    /// First hit was accepted by the policy
    Visible(ObjectId),
}

impl LineOfSight {
    pub fn is_visible(&self) -> bool {
        matches!(self, LineOfSight::Visible(_))
    }

    /// Whether a ray was cast to reach this outcome.
    pub fn cast_ray(&self) -> bool {
        !matches!(self, LineOfSight::OutsideFrustum)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineOfSightConfirmer {
    filter: RayFilter,
    policy: HitMatchPolicy,
}

impl LineOfSightConfirmer {
    pub fn new(filter: RayFilter, policy: HitMatchPolicy) -> Self {
        Self { filter, policy }
    }

    pub fn filter(&self) -> &RayFilter {
        &self.filter
    }

    pub fn policy(&self) -> HitMatchPolicy {
        self.policy
    }

    /// Ray from the viewer toward the candidate's sphere center, unbounded.
    ///
    /// Aimed at the proxy center (the center of the candidate's mesh
    /// bounds) rather than the candidate's pivot, so off-center meshes are
    /// still reached.
    pub fn sight_ray(viewer: &Viewer, sphere: &BoundingSphere) -> Ray {
        Ray::between(viewer.position, sphere.center)
    }

    pub fn confirm(
        &self,
        viewer: &Viewer,
        frustum: &Frustum,
        entry: &BoundingSphereProxy,
        sphere: &BoundingSphere,
        registry: &CandidateRegistry,
        scene: &dyn SceneQuery,
    ) -> LineOfSight {
        if !frustum.intersects_aabb(&sphere.aabb()) {
            return LineOfSight::OutsideFrustum;
        }

        let ray = Self::sight_ray(viewer, sphere);
        match scene.raycast(&ray, &self.filter) {
            None => LineOfSight::NoHit,
            Some(hit) if self.accepts_hit(&hit, entry, registry) => LineOfSight::Visible(hit.object),
            Some(hit) => LineOfSight::Blocked(hit.object),
        }
    }

    /// Whether a hit confirms the candidate in `entry`.
    ///
    /// Proxies known to `registry` are accepted even if the host did not
    /// tag them.
    pub fn accepts_hit(
        &self,
        hit: &RayHit,
        entry: &BoundingSphereProxy,
        registry: &CandidateRegistry,
    ) -> bool {
        if hit.object == entry.candidate || hit.object == entry.proxy {
            return true;
        }
        match self.policy {
            HitMatchPolicy::ProxyOrSelf => {
                hit.tags.contains(SurfaceTags::VISIBILITY_PROXY) || registry.is_proxy(hit.object)
            }
            HitMatchPolicy::Strict => false,
        }
    }
}

#[cfg(test)]
#[path = "line_of_sight_tests.rs"]
mod tests;
