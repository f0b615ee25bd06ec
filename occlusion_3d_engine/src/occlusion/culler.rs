/// Occlusion culling strategies and the per-frame orchestration.
///
/// `compute_visibility` is the whole frame as a pure function of its
/// inputs: viewer snapshot, occluder list, candidate registry, settings.
/// `OcclusionCuller` wraps it with the configured viewer object, the
/// registry and the last published set.

use rustc_hash::FxHashSet;
use crate::camera::{Frustum, Lens, Viewer, FRUSTUM_EDGES};
use crate::error::{Error, Result};
use crate::{engine_debug, engine_error, engine_info, engine_trace, engine_warn};
use crate::scene::{
    BoundingSphere, DebugDraw, ObjectId, RayFilter, SceneQuery, SurfaceTags,
    COLOR_BLOCKED, COLOR_FRUSTUM, COLOR_OCCLUSION_NORMAL, COLOR_VISIBLE,
};
use super::candidate_registry::{BoundingSphereProxy, CandidateRegistry};
use super::line_of_sight::{HitMatchPolicy, LineOfSight, LineOfSightConfirmer};
use super::occlusion_volume::OcclusionVolume;
use super::visibility_set::{FrameStats, FrameVisibility, VisibilitySet};
use super::visibility_tester::{VisibilityTester, DEFAULT_CONTAINMENT_EPSILON};

/// Layer holding frustum visualization geometry, ignored by sight rays
pub const DEFAULT_EXCLUSION_LAYER: &str = "Frustums";

/// Length of the occlusion plane normals drawn for diagnostics
const NORMAL_DRAW_LENGTH: f32 = 1.0;

const SOURCE: &str = "occlusion3d::Culler";

// ===== SETTINGS =====

/// How containment results feed into the published set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContainmentMode {
    /// Fully occluded candidates are dropped before any ray cast.
    /// Stricter than `ReportOnly` when another proxy sits on a contained
    /// candidate's sight line.
    #[default]
    Gate,
    /// Containment is computed and reported, the published set comes from
    /// line of sight alone.
    ReportOnly,
}

/// Per-frame knobs of `compute_visibility`.
#[derive(Debug, Clone, PartialEq)]
pub struct CullSettings {
    pub containment_mode: ContainmentMode,
    pub hit_policy: HitMatchPolicy,
    /// Boundary tolerance of the containment test (world units)
    pub containment_epsilon: f32,
    /// Surfaces ignored by sight rays
    pub ray_filter: RayFilter,
    /// Emit debug lines (frustum, plane normals, sight rays)
    pub debug_draw: bool,
    /// Material announced to the debug sink for visualization geometry
    pub visualization_material: String,
}

impl Default for CullSettings {
    fn default() -> Self {
        Self {
            containment_mode: ContainmentMode::default(),
            hit_policy: HitMatchPolicy::default(),
            containment_epsilon: DEFAULT_CONTAINMENT_EPSILON,
            ray_filter: RayFilter::ignoring(SurfaceTags::VISUALIZATION),
            debug_draw: false,
            visualization_material: String::new(),
        }
    }
}

// ===== FRAME FUNCTION =====

/// Run one frame of occlusion culling.
///
/// 1. Frustum corners and planes from the viewer
/// 2. One occlusion volume per occluder (absent or degenerate ones skipped)
/// 3. Containment over a shrinking working set
/// 4. Line of sight for each candidate (all of them, or only the
///    non-occluded ones under `ContainmentMode::Gate`)
pub fn compute_visibility(
    scene: &dyn SceneQuery,
    viewer: &Viewer,
    occluders: &[ObjectId],
    registry: &CandidateRegistry,
    settings: &CullSettings,
    debug: &mut dyn DebugDraw,
) -> FrameVisibility {
    let mut stats = FrameStats::default();
    let (corners, frustum) = Frustum::from_viewer(viewer);

    if settings.debug_draw {
        debug.begin_frame(&settings.visualization_material);
        for (a, b) in FRUSTUM_EDGES {
            debug.line(corners.points[a], corners.points[b], COLOR_FRUSTUM);
        }
    }

    // Occlusion volumes
    let mut volumes = Vec::with_capacity(occluders.len());
    for &occluder in occluders {
        let (Some(transform), Some(bounds)) = (scene.transform(occluder), scene.local_bounds(occluder)) else {
            engine_trace!(SOURCE, "Occluder {:?} absent from scene, skipped", occluder);
            stats.occluders_skipped += 1;
            continue;
        };
        match OcclusionVolume::build(occluder, &transform, &bounds, viewer.position) {
            Some(volume) => {
                if settings.debug_draw {
                    for plane in volume.planes() {
                        debug.ray(plane.center, plane.normal * NORMAL_DRAW_LENGTH, COLOR_OCCLUSION_NORMAL);
                    }
                }
                volumes.push(volume);
            }
            None => {
                engine_debug!(SOURCE, "Viewer inside occluder {:?}, no occlusion volume", occluder);
                stats.occluders_skipped += 1;
            }
        }
    }
    stats.occluders = volumes.len() as u32;

    // Candidate spheres
    let mut spheres: Vec<(&BoundingSphereProxy, BoundingSphere)> = Vec::with_capacity(registry.len());
    for entry in registry.iter() {
        match entry.world_sphere(scene) {
            Some(sphere) => spheres.push((entry, sphere)),
            None => {
                engine_trace!(SOURCE, "Proxy of candidate {:?} missing, skipped", entry.candidate);
                stats.candidates_skipped += 1;
            }
        }
    }
    stats.candidates = spheres.len() as u32;

    // Containment
    let tester = VisibilityTester::new(settings.containment_epsilon);
    let keyed: Vec<(ObjectId, BoundingSphere)> = spheres.iter()
        .map(|(entry, sphere)| (entry.candidate, *sphere))
        .collect();
    let occluded = tester.resolve(&keyed, &volumes);
    stats.fully_occluded = occluded.len() as u32;
    let hidden: FxHashSet<ObjectId> = occluded.iter().map(|o| o.candidate).collect();

    // Line of sight
    let confirmer = LineOfSightConfirmer::new(settings.ray_filter, settings.hit_policy);
    let mut visible = VisibilitySet::new();
    let mut line_of_sight = Vec::with_capacity(spheres.len());

    for (entry, sphere) in &spheres {
        if settings.containment_mode == ContainmentMode::Gate && hidden.contains(&entry.candidate) {
            continue;
        }

        let outcome = confirmer.confirm(viewer, &frustum, entry, sphere, registry, scene);
        match outcome {
            LineOfSight::OutsideFrustum => stats.outside_frustum += 1,
            _ => stats.rays_cast += 1,
        }

        if settings.debug_draw && outcome.cast_ray() {
            let color = if outcome.is_visible() { COLOR_VISIBLE } else { COLOR_BLOCKED };
            debug.line(viewer.position, sphere.center, color);
        }

        if outcome.is_visible() {
            visible.insert(entry.candidate);
        }
        line_of_sight.push((entry.candidate, outcome));
    }
    stats.visible = visible.len() as u32;

    engine_trace!(SOURCE,
        "Frame: {} candidates, {} occluders ({} skipped), {} occluded, {} outside frustum, {} rays, {} visible",
        stats.candidates, stats.occluders, stats.occluders_skipped, stats.fully_occluded,
        stats.outside_frustum, stats.rays_cast, stats.visible);

    FrameVisibility {
        visible,
        occluded,
        line_of_sight,
        corners,
        stats,
    }
}

// ===== CULLER TRAIT =====

/// Strategy for determining visible candidates from a viewer.
///
/// Called once per frame. `&mut self` lets implementations keep the last
/// published set.
pub trait Culler: Send + Sync {
    fn cull(
        &mut self,
        scene: &dyn SceneQuery,
        viewer: &Viewer,
        debug: &mut dyn DebugDraw,
    ) -> FrameVisibility;
}

/// Brute-force culler: every candidate is visible (no culling).
///
/// Baseline for comparing culling rates.
pub struct BruteForceCuller {
    candidates: Vec<ObjectId>,
}

impl BruteForceCuller {
    pub fn new(candidates: Vec<ObjectId>) -> Self {
        Self { candidates }
    }
}

impl Culler for BruteForceCuller {
    fn cull(
        &mut self,
        _scene: &dyn SceneQuery,
        viewer: &Viewer,
        _debug: &mut dyn DebugDraw,
    ) -> FrameVisibility {
        let (corners, _) = Frustum::from_viewer(viewer);
        let visible: VisibilitySet = self.candidates.iter().copied().collect();
        let stats = FrameStats {
            candidates: visible.len() as u32,
            visible: visible.len() as u32,
            ..FrameStats::default()
        };
        FrameVisibility {
            visible,
            occluded: Vec::new(),
            line_of_sight: Vec::new(),
            corners,
            stats,
        }
    }
}

// ===== OCCLUSION CULLER =====

/// Setup parameters of an `OcclusionCuller`.
#[derive(Debug, Clone)]
pub struct OcclusionCullerDesc {
    /// Viewer object. `None` uses the scene's main viewer.
    pub viewer: Option<ObjectId>,
    pub lens: Lens,
    pub occluders: Vec<ObjectId>,
    pub candidates: Vec<ObjectId>,
    /// Material for frustum / occlusion-volume visualization
    pub visualization_material: String,
    /// Material for bounding-sphere proxies
    pub proxy_material: String,
    /// Layer ignored by sight rays
    pub exclusion_layer: String,
    pub containment_mode: ContainmentMode,
    pub hit_policy: HitMatchPolicy,
    pub containment_epsilon: f32,
    pub debug_draw: bool,
}

impl Default for OcclusionCullerDesc {
    fn default() -> Self {
        Self {
            viewer: None,
            lens: Lens::default(),
            occluders: Vec::new(),
            candidates: Vec::new(),
            visualization_material: "FrustumVisualization".to_string(),
            proxy_material: "VisibilitySphere".to_string(),
            exclusion_layer: DEFAULT_EXCLUSION_LAYER.to_string(),
            containment_mode: ContainmentMode::default(),
            hit_policy: HitMatchPolicy::default(),
            containment_epsilon: DEFAULT_CONTAINMENT_EPSILON,
            debug_draw: false,
        }
    }
}

/// Occlusion culler bound to a viewer object.
pub struct OcclusionCuller {
    viewer: ObjectId,
    lens: Lens,
    occluders: Vec<ObjectId>,
    registry: CandidateRegistry,
    settings: CullSettings,
    published: VisibilitySet,
    frames: u64,
}

impl OcclusionCuller {
    fn log_and_return_error(error: Error) -> Error {
        engine_error!(SOURCE, "{}", error);
        error
    }

    /// Set up the culler: resolve the viewer and exclusion layer, register
    /// candidates (creating their proxies).
    ///
    /// # Errors
    ///
    /// `InitializationFailed` if no viewer can be resolved. Candidates that
    /// fail to register are logged and left out.
    pub fn new(desc: OcclusionCullerDesc, scene: &mut dyn SceneQuery) -> Result<Self> {
        let viewer = desc.viewer
            .or_else(|| scene.main_viewer())
            .ok_or_else(|| Self::log_and_return_error(Error::InitializationFailed(
                "No occlusion viewer configured and the scene has no main viewer".to_string(),
            )))?;
        if scene.transform(viewer).is_none() {
            return Err(Self::log_and_return_error(Error::InitializationFailed(
                format!("Occlusion viewer {:?} does not exist in the scene", viewer),
            )));
        }

        let ignore = match scene.resolve_layer(&desc.exclusion_layer) {
            Some(tags) => tags,
            None => {
                engine_warn!(SOURCE, "Unknown exclusion layer '{}', ignoring VISUALIZATION surfaces",
                    desc.exclusion_layer);
                SurfaceTags::VISUALIZATION
            }
        };

        let mut registry = CandidateRegistry::new(&desc.proxy_material);
        for &candidate in &desc.candidates {
            if let Err(err) = registry.register(scene, candidate) {
                engine_warn!(SOURCE, "Candidate {:?} not registered: {}", candidate, err);
            }
        }

        engine_info!(SOURCE, "Occlusion culler ready: viewer {:?}, {} occluders, {} candidates",
            viewer, desc.occluders.len(), registry.len());

        Ok(Self {
            viewer,
            lens: desc.lens,
            occluders: desc.occluders,
            registry,
            settings: CullSettings {
                containment_mode: desc.containment_mode,
                hit_policy: desc.hit_policy,
                containment_epsilon: desc.containment_epsilon,
                ray_filter: RayFilter::ignoring(ignore),
                debug_draw: desc.debug_draw,
                visualization_material: desc.visualization_material,
            },
            published: VisibilitySet::new(),
            frames: 0,
        })
    }

    /// Viewer snapshot from the viewer object's current transform.
    pub fn snapshot_viewer(&self, scene: &dyn SceneQuery) -> Option<Viewer> {
        scene.transform(self.viewer).map(|t| Viewer::from_transform(&t, self.lens))
    }

    /// Snapshot the viewer and run one frame.
    ///
    /// Returns `None` (and publishes an empty set) if the viewer object has
    /// disappeared since setup.
    pub fn update(
        &mut self,
        scene: &dyn SceneQuery,
        debug: &mut dyn DebugDraw,
    ) -> Option<FrameVisibility> {
        let Some(viewer) = self.snapshot_viewer(scene) else {
            engine_warn!(SOURCE, "Viewer {:?} missing, publishing an empty visibility set", self.viewer);
            self.published.clear();
            return None;
        };
        Some(self.cull(scene, &viewer, debug))
    }

    pub fn register_candidate(&mut self, scene: &mut dyn SceneQuery, candidate: ObjectId) -> Result<()> {
        self.registry.register(scene, candidate).map(|_| ())
    }

    pub fn unregister_candidate(&mut self, candidate: ObjectId) -> bool {
        self.registry.unregister(candidate).is_some()
    }

    pub fn add_occluder(&mut self, occluder: ObjectId) {
        if !self.occluders.contains(&occluder) {
            self.occluders.push(occluder);
        }
    }

    pub fn remove_occluder(&mut self, occluder: ObjectId) -> bool {
        let before = self.occluders.len();
        self.occluders.retain(|&o| o != occluder);
        self.occluders.len() != before
    }

    /// Set published by the last frame.
    pub fn visible_set(&self) -> &VisibilitySet {
        &self.published
    }

    pub fn viewer(&self) -> ObjectId {
        self.viewer
    }

    pub fn lens(&self) -> &Lens {
        &self.lens
    }

    pub fn occluders(&self) -> &[ObjectId] {
        &self.occluders
    }

    pub fn registry(&self) -> &CandidateRegistry {
        &self.registry
    }

    pub fn settings(&self) -> &CullSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut CullSettings {
        &mut self.settings
    }

    /// Frames computed since setup.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }
}

impl Culler for OcclusionCuller {
    fn cull(
        &mut self,
        scene: &dyn SceneQuery,
        viewer: &Viewer,
        debug: &mut dyn DebugDraw,
    ) -> FrameVisibility {
        let frame = compute_visibility(scene, viewer, &self.occluders, &self.registry, &self.settings, debug);
        self.published = frame.visible.clone();
        self.frames += 1;
        frame
    }
}

#[cfg(test)]
#[path = "culler_tests.rs"]
mod tests;
