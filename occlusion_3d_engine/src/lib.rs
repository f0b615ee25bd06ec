/*!
# Occlusion 3D Engine

Per-frame occlusion culling for 3D scenes.

Given a viewer, a set of occluder boxes and a set of candidate objects,
the engine decides each frame which candidates are visible. It builds a
convex occlusion volume behind every occluder, drops candidates whose
bounding sphere lies entirely inside one, and confirms the rest with a
frustum test and a single line-of-sight ray cast.

The host scene is reached only through the `SceneQuery` trait, so the
engine runs against any scene graph or physics backend.

## Architecture

- **Viewer / Frustum**: viewer snapshot, frustum corners and planes
- **OcclusionVolume**: cap + side planes hidden behind an occluder
- **VisibilityTester**: sphere-in-volume containment
- **CandidateRegistry**: candidates and their bounding-sphere proxies
- **LineOfSightConfirmer**: frustum box test + ray cast
- **OcclusionCuller**: per-frame orchestration, publishes a `VisibilitySet`
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod camera;
pub mod occlusion;
pub mod scene;

// Main occlusion3d namespace module
pub mod occlusion3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine singleton (logging)
    pub use crate::engine::Engine;

    // Culler trait and the default implementation
    pub use crate::occlusion::{Culler, OcclusionCuller, OcclusionCullerDesc};

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Camera sub-module
    pub mod camera {
        pub use crate::camera::*;
    }

    // Occlusion sub-module
    pub mod occlusion {
        pub use crate::occlusion::*;
    }

    // Scene sub-module
    pub mod scene {
        pub use crate::scene::*;
    }
}

// Re-export math library at crate root
pub use glam;
