/// CandidateRegistry: candidates and their bounding-sphere proxies.
///
/// A proxy is created once, when its candidate is registered, and reused
/// every frame afterwards. Lookups go through the candidate's `ObjectId`,
/// never through a scene-graph name search at frame time.

use rustc_hash::FxHashMap;
use crate::error::Result;
use crate::{engine_debug, engine_err};
use crate::scene::{
    BoundingSphere, ObjectId, ProxyDesc, SceneQuery, VISIBILITY_SPHERE_NAME,
};

/// A registered candidate and its proxy object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingSphereProxy {
    /// The renderable under test
    pub candidate: ObjectId,
    /// Child sphere object standing in for it
    pub proxy: ObjectId,
}

impl BoundingSphereProxy {
    /// Current world-space sphere: the proxy's position and half its largest scale.
    ///
    /// `None` if the proxy object no longer exists.
    pub fn world_sphere(&self, scene: &dyn SceneQuery) -> Option<BoundingSphere> {
        let transform = scene.transform(self.proxy)?;
        Some(BoundingSphere::new(transform.position, 0.5 * transform.max_scale()))
    }
}

pub struct CandidateRegistry {
    /// Candidates in registration order
    entries: Vec<BoundingSphereProxy>,
    /// candidate → index into `entries`
    by_candidate: FxHashMap<ObjectId, usize>,
    /// proxy → owning candidate
    by_proxy: FxHashMap<ObjectId, ObjectId>,
    /// Material assigned to newly created proxies
    proxy_material: String,
}

impl CandidateRegistry {
    pub fn new(proxy_material: &str) -> Self {
        Self {
            entries: Vec::new(),
            by_candidate: FxHashMap::default(),
            by_proxy: FxHashMap::default(),
            proxy_material: proxy_material.to_string(),
        }
    }

    /// Register a candidate, finding or creating its proxy.
    ///
    /// Registering the same candidate twice returns the existing proxy.
    ///
    /// # Errors
    ///
    /// - `InvalidResource` if the candidate has no local bounds
    /// - whatever the scene returns when proxy creation fails
    pub fn register(
        &mut self,
        scene: &mut dyn SceneQuery,
        candidate: ObjectId,
    ) -> Result<BoundingSphereProxy> {
        if let Some(existing) = self.get(candidate) {
            return Ok(*existing);
        }

        let bounds = scene.local_bounds(candidate)
            .ok_or_else(|| engine_err!("occlusion3d::CandidateRegistry",
                "Candidate {:?} has no mesh bounds, cannot size its visibility sphere", candidate))?;

        let proxy = match scene.find_child(candidate, VISIBILITY_SPHERE_NAME) {
            Some(existing) => existing,
            None => scene.create_proxy(candidate, &ProxyDesc::enclosing(&bounds, &self.proxy_material))?,
        };

        debug_assert!(
            self.by_proxy.get(&proxy).map_or(true, |&owner| owner == candidate),
            "proxy {:?} of candidate {:?} is already mapped to {:?}",
            proxy, candidate, self.by_proxy.get(&proxy),
        );

        let entry = BoundingSphereProxy { candidate, proxy };
        self.by_candidate.insert(candidate, self.entries.len());
        self.by_proxy.insert(proxy, candidate);
        self.entries.push(entry);

        engine_debug!("occlusion3d::CandidateRegistry",
            "Registered candidate {:?} with proxy {:?}", candidate, proxy);

        Ok(entry)
    }

    /// Forget a candidate. The proxy object stays in the scene.
    pub fn unregister(&mut self, candidate: ObjectId) -> Option<BoundingSphereProxy> {
        let index = self.by_candidate.remove(&candidate)?;
        let entry = self.entries.remove(index);
        self.by_proxy.remove(&entry.proxy);
        for (i, later) in self.entries.iter().enumerate().skip(index) {
            self.by_candidate.insert(later.candidate, i);
        }
        Some(entry)
    }

    pub fn get(&self, candidate: ObjectId) -> Option<&BoundingSphereProxy> {
        self.by_candidate.get(&candidate).map(|&i| &self.entries[i])
    }

    pub fn contains(&self, candidate: ObjectId) -> bool {
        self.by_candidate.contains_key(&candidate)
    }

    /// Whether `object` is any registered candidate's proxy.
    pub fn is_proxy(&self, object: ObjectId) -> bool {
        self.by_proxy.contains_key(&object)
    }

    /// Candidate owning a proxy object.
    pub fn owner_of(&self, proxy: ObjectId) -> Option<ObjectId> {
        self.by_proxy.get(&proxy).copied()
    }

    /// Entries in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &BoundingSphereProxy> + '_ {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[path = "candidate_registry_tests.rs"]
mod tests;
