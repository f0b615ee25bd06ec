//! Occlusion module
//!
//! Per-frame pipeline: occlusion volumes from occluders, sphere containment
//! over a shrinking working set, then a frustum box test and one sight ray
//! per surviving candidate. The result is a `VisibilitySet` rebuilt from
//! scratch every frame.

mod candidate_registry;
mod culler;
mod line_of_sight;
mod occlusion_plane;
mod occlusion_volume;
mod visibility_set;
mod visibility_tester;

pub use candidate_registry::{BoundingSphereProxy, CandidateRegistry};
pub use culler::{
    compute_visibility, BruteForceCuller, ContainmentMode, CullSettings, Culler,
    OcclusionCuller, OcclusionCullerDesc, DEFAULT_EXCLUSION_LAYER,
};
pub use line_of_sight::{HitMatchPolicy, LineOfSight, LineOfSightConfirmer};
pub use occlusion_plane::OcclusionPlane;
pub use occlusion_volume::{OccluderFace, OcclusionVolume};
pub use visibility_set::{FrameStats, FrameVisibility, VisibilitySet};
pub use visibility_tester::{Occlusion, VisibilityTester, DEFAULT_CONTAINMENT_EPSILON};
