/// Mock scene: an in-memory `SceneQuery` implementation (no physics backend).
///
/// Objects live in a SlotMap with optional parent links and local
/// transforms. Ray casts are brute force over every object carrying a
/// collider shape, which is fine for tests and small hosts.

use std::cell::Cell;
use glam::Vec3;
use rustc_hash::FxHashMap;
use slotmap::SlotMap;
use crate::error::{Error, Result};
use crate::{engine_bail, engine_error};
use super::bounds::{AABB, BoundingSphere, ray_aabb_hit};
use super::scene_query::{
    ObjectId, ProxyDesc, ProxyRenderFlags, Ray, RayFilter, RayHit, SceneQuery, SurfaceTags,
};
use super::transform::Transform;

/// Layer name mapped to `SurfaceTags::VISUALIZATION` in a fresh scene.
pub const FRUSTUMS_LAYER: &str = "Frustums";

/// Collider used by ray casts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockShape {
    /// Not hit by rays
    None,
    /// The object's local bounds
    Box,
    /// Sphere inscribed in the local bounds (radius = smallest extent)
    Sphere,
}

#[derive(Debug, Clone)]
struct MockObject {
    name: String,
    parent: Option<ObjectId>,
    local: Transform,
    bounds: Option<AABB>,
    shape: MockShape,
    tags: SurfaceTags,
    material: Option<String>,
    render_flags: ProxyRenderFlags,
}

pub struct MockScene {
    objects: SlotMap<ObjectId, MockObject>,
    main_viewer: Option<ObjectId>,
    layers: FxHashMap<String, SurfaceTags>,
    raycast_count: Cell<u32>,
    refuse_proxies: bool,
}

impl MockScene {
    pub fn new() -> Self {
        let mut layers = FxHashMap::default();
        layers.insert(FRUSTUMS_LAYER.to_string(), SurfaceTags::VISUALIZATION);
        Self {
            objects: SlotMap::with_key(),
            main_viewer: None,
            layers,
            raycast_count: Cell::new(0),
            refuse_proxies: false,
        }
    }

    // ===== AUTHORING =====

    /// Object without mesh or collider (viewers, empty nodes).
    pub fn add_object(&mut self, name: &str, transform: Transform) -> ObjectId {
        self.insert(name, transform, None, MockShape::None)
    }

    /// Object with box mesh bounds and a matching box collider.
    pub fn add_box(&mut self, name: &str, transform: Transform, bounds: AABB) -> ObjectId {
        self.insert(name, transform, Some(bounds), MockShape::Box)
    }

    /// Object with a sphere collider of `radius` centered on its origin.
    pub fn add_sphere(&mut self, name: &str, transform: Transform, radius: f32) -> ObjectId {
        let bounds = AABB::from_center_extents(Vec3::ZERO, Vec3::splat(radius));
        self.insert(name, transform, Some(bounds), MockShape::Sphere)
    }

    fn insert(
        &mut self,
        name: &str,
        transform: Transform,
        bounds: Option<AABB>,
        shape: MockShape,
    ) -> ObjectId {
        self.objects.insert(MockObject {
            name: name.to_string(),
            parent: None,
            local: transform,
            bounds,
            shape,
            tags: SurfaceTags::empty(),
            material: None,
            render_flags: ProxyRenderFlags::empty(),
        })
    }

    /// Remove an object. Its children are detached, not removed.
    pub fn remove(&mut self, id: ObjectId) {
        self.objects.remove(id);
        for object in self.objects.values_mut() {
            if object.parent == Some(id) {
                object.parent = None;
            }
        }
        if self.main_viewer == Some(id) {
            self.main_viewer = None;
        }
    }

    /// Parent `child` under `parent`. The child's transform becomes local to the parent.
    pub fn set_parent(&mut self, child: ObjectId, parent: Option<ObjectId>) {
        if let Some(object) = self.objects.get_mut(child) {
            object.parent = parent;
        }
    }

    /// Set an object's transform (local to its parent, world if it has none).
    pub fn set_transform(&mut self, id: ObjectId, transform: Transform) {
        if let Some(object) = self.objects.get_mut(id) {
            object.local = transform;
        }
    }

    pub fn set_tags(&mut self, id: ObjectId, tags: SurfaceTags) {
        if let Some(object) = self.objects.get_mut(id) {
            object.tags = tags;
        }
    }

    pub fn set_main_viewer(&mut self, id: Option<ObjectId>) {
        self.main_viewer = id;
    }

    pub fn add_layer(&mut self, name: &str, tags: SurfaceTags) {
        self.layers.insert(name.to_string(), tags);
    }

    /// Make `create_proxy` fail with `Error::BackendError`, as a physics
    /// backend rejecting the new collider would.
    pub fn set_refuse_proxies(&mut self, refuse: bool) {
        self.refuse_proxies = refuse;
    }

    // ===== INSPECTION =====

    pub fn name(&self, id: ObjectId) -> Option<&str> {
        self.objects.get(id).map(|o| o.name.as_str())
    }

    pub fn parent(&self, id: ObjectId) -> Option<ObjectId> {
        self.objects.get(id).and_then(|o| o.parent)
    }

    pub fn tags(&self, id: ObjectId) -> Option<SurfaceTags> {
        self.objects.get(id).map(|o| o.tags)
    }

    pub fn material(&self, id: ObjectId) -> Option<&str> {
        self.objects.get(id).and_then(|o| o.material.as_deref())
    }

    pub fn render_flags(&self, id: ObjectId) -> Option<ProxyRenderFlags> {
        self.objects.get(id).map(|o| o.render_flags)
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Number of `raycast` calls since creation or the last reset.
    pub fn raycast_count(&self) -> u32 {
        self.raycast_count.get()
    }

    pub fn reset_raycast_count(&self) {
        self.raycast_count.set(0);
    }

    // ===== INTERNALS =====

    fn world_transform(&self, id: ObjectId) -> Option<Transform> {
        let object = self.objects.get(id)?;
        match object.parent {
            Some(parent) => {
                let parent_world = self.world_transform(parent)?;
                Some(parent_world.compose(&object.local))
            }
            None => Some(object.local),
        }
    }

    /// Ray parameter of the hit with one object's collider.
    fn hit_object(&self, id: ObjectId, object: &MockObject, ray: &Ray) -> Option<f32> {
        let bounds = object.bounds?;
        let world = self.world_transform(id)?;
        let inverse = world.matrix().inverse();
        let origin = inverse.transform_point3(ray.origin);
        let direction = inverse.transform_vector3(ray.direction);

        match object.shape {
            MockShape::None => None,
            MockShape::Box => ray_aabb_hit(&bounds, origin, direction),
            MockShape::Sphere => {
                let sphere = BoundingSphere::new(bounds.center(), bounds.extents().min_element());
                sphere.ray_hit(origin, direction)
            }
        }
    }
}

impl Default for MockScene {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneQuery for MockScene {
    fn transform(&self, id: ObjectId) -> Option<Transform> {
        self.world_transform(id)
    }

    fn local_bounds(&self, id: ObjectId) -> Option<AABB> {
        self.objects.get(id).and_then(|o| o.bounds)
    }

    fn main_viewer(&self) -> Option<ObjectId> {
        self.main_viewer.filter(|id| self.objects.contains_key(*id))
    }

    fn find_child(&self, owner: ObjectId, name: &str) -> Option<ObjectId> {
        self.objects.iter()
            .find(|(_, o)| o.parent == Some(owner) && o.name == name)
            .map(|(id, _)| id)
    }

    fn create_proxy(&mut self, owner: ObjectId, desc: &ProxyDesc) -> Result<ObjectId> {
        if !self.objects.contains_key(owner) {
            engine_bail!("occlusion3d::MockScene",
                "Cannot create proxy '{}': owner {:?} does not exist", desc.name, owner);
        }
        if self.refuse_proxies {
            let message = format!("Proxy creation refused for owner {:?}", owner);
            engine_error!("occlusion3d::MockScene", "{}", message);
            return Err(Error::BackendError(message));
        }

        let id = self.objects.insert(MockObject {
            name: desc.name.clone(),
            parent: Some(owner),
            local: desc.local_transform(),
            bounds: Some(AABB::from_center_extents(Vec3::ZERO, Vec3::splat(0.5))),
            shape: MockShape::Sphere,
            tags: desc.tags,
            material: Some(desc.material.clone()),
            render_flags: desc.render_flags,
        });
        Ok(id)
    }

    fn resolve_layer(&self, name: &str) -> Option<SurfaceTags> {
        self.layers.get(name).copied()
    }

    fn raycast(&self, ray: &Ray, filter: &RayFilter) -> Option<RayHit> {
        self.raycast_count.set(self.raycast_count.get() + 1);

        let mut nearest: Option<(ObjectId, f32, SurfaceTags)> = None;
        for (id, object) in &self.objects {
            if object.shape == MockShape::None || !filter.accepts(object.tags) {
                continue;
            }
            if let Some(t) = self.hit_object(id, object, ray) {
                if nearest.map_or(true, |(_, best, _)| t < best) {
                    nearest = Some((id, t, object.tags));
                }
            }
        }

        nearest.map(|(object, t, tags)| RayHit {
            object,
            point: ray.at(t),
            distance: (ray.direction * t).length(),
            tags,
        })
    }
}

#[cfg(test)]
#[path = "mock_scene_tests.rs"]
mod tests;
