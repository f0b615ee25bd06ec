/// Narrow interface to the host scene/query engine.
///
/// The culling core never walks a scene graph. Everything it needs from
/// the host goes through `SceneQuery`: transforms, local bounds, proxy
/// find-or-create, layer resolution and ray casts.
///
/// Ownership: the host owns the scene and passes it by reference to the
/// registry (setup, `&mut`) and to the culler (per frame, `&`).

use bitflags::bitflags;
use glam::Vec3;
use slotmap::new_key_type;
use crate::error::Result;
use super::bounds::AABB;
use super::transform::Transform;

// ===== OBJECT IDENTITY =====

new_key_type! {
    /// Stable identity of a scene object (viewer, occluder, candidate or proxy).
    pub struct ObjectId;
}

// ===== SURFACE TAGS =====

bitflags! {
    /// Tags carried by hit surfaces, used to filter ray casts.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SurfaceTags: u32 {
        /// Debug geometry (frustum and occlusion-volume visualization)
        const VISUALIZATION = 1 << 0;
        /// Bounding-sphere proxy objects created by the registry
        const VISIBILITY_PROXY = 1 << 1;
    }
}

bitflags! {
    /// Render flags applied to proxy objects.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ProxyRenderFlags: u32 {
        const CAST_SHADOW = 1 << 0;
        const RECEIVE_SHADOW = 1 << 1;
    }
}

// ===== RAYS =====

/// Unbounded ray. `direction` need not be normalized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Ray from `from` through `to`.
    pub fn between(from: Vec3, to: Vec3) -> Self {
        Self { origin: from, direction: to - from }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Nearest surface hit by a ray cast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Object owning the hit surface
    pub object: ObjectId,
    /// World-space hit point
    pub point: Vec3,
    /// Distance from the ray origin (world units)
    pub distance: f32,
    /// Tags of the hit surface
    pub tags: SurfaceTags,
}

/// Predicate applied by the scene to each candidate surface of a ray cast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RayFilter {
    /// Surfaces carrying any of these tags are ignored
    pub ignore: SurfaceTags,
}

impl RayFilter {
    pub fn ignoring(ignore: SurfaceTags) -> Self {
        Self { ignore }
    }

    /// Whether a surface with these tags may be reported as a hit.
    pub fn accepts(&self, tags: SurfaceTags) -> bool {
        !tags.intersects(self.ignore)
    }
}

// ===== PROXY CREATION =====

/// Name of the child object holding a candidate's bounding sphere.
pub const VISIBILITY_SPHERE_NAME: &str = "VisibilitySphere";

/// Description of a bounding-sphere proxy to create under a candidate.
///
/// The proxy is a unit-diameter sphere: its local scale is the diameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ProxyDesc {
    /// Child object name (used by `find_child`)
    pub name: String,
    /// Position relative to the owner, in the owner's local space
    pub local_center: Vec3,
    /// Sphere diameter in the owner's local units
    pub diameter: f32,
    /// Material used to render the proxy
    pub material: String,
    /// Shadow flags (proxies neither cast nor receive shadows)
    pub render_flags: ProxyRenderFlags,
    /// Tags attached to the proxy surface
    pub tags: SurfaceTags,
}

impl ProxyDesc {
    /// Proxy sized to enclose local mesh bounds: diameter = 2·‖extents‖.
    pub fn enclosing(bounds: &AABB, material: &str) -> Self {
        Self {
            name: VISIBILITY_SPHERE_NAME.to_string(),
            local_center: bounds.center(),
            diameter: 2.0 * bounds.extents().length(),
            material: material.to_string(),
            render_flags: ProxyRenderFlags::empty(),
            tags: SurfaceTags::VISIBILITY_PROXY,
        }
    }

    /// Local transform of the proxy relative to its owner.
    pub fn local_transform(&self) -> Transform {
        Transform::from_position(self.local_center).with_scale(Vec3::splat(self.diameter))
    }
}

// ===== SCENE QUERY TRAIT =====

/// Capabilities the culling core consumes from the host scene.
pub trait SceneQuery {
    /// World transform of an object, `None` if the object no longer exists.
    fn transform(&self, id: ObjectId) -> Option<Transform>;

    /// Local-space mesh bounds of an object, `None` if it has no mesh.
    fn local_bounds(&self, id: ObjectId) -> Option<AABB>;

    /// The scene's designated main viewer, if any.
    fn main_viewer(&self) -> Option<ObjectId>;

    /// Child of `owner` with the given name.
    fn find_child(&self, owner: ObjectId, name: &str) -> Option<ObjectId>;

    /// Create a sphere proxy parented to `owner`.
    fn create_proxy(&mut self, owner: ObjectId, desc: &ProxyDesc) -> Result<ObjectId>;

    /// Resolve a named layer to its tag mask.
    fn resolve_layer(&self, name: &str) -> Option<SurfaceTags>;

    /// Nearest surface hit along an unbounded ray, honoring the filter.
    fn raycast(&self, ray: &Ray, filter: &RayFilter) -> Option<RayHit>;
}
