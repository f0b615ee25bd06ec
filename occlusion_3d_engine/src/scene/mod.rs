//! Scene interface module
//!
//! The culling core consumes the host scene through `SceneQuery` and
//! draws diagnostics through `DebugDraw`. `MockScene` is an in-memory
//! implementation used by tests and by hosts without a physics backend.

mod bounds;
mod debug_draw;
mod mock_scene;
mod scene_query;
mod transform;

pub use bounds::{AABB, BoundingSphere, ray_aabb_hit};
pub use debug_draw::{
    DebugDraw, NoOpDebugDraw, RecordingDebugDraw,
    COLOR_FRUSTUM, COLOR_OCCLUSION_NORMAL, COLOR_VISIBLE, COLOR_BLOCKED,
};
pub use mock_scene::{MockScene, MockShape, FRUSTUMS_LAYER};
pub use scene_query::{
    ObjectId, ProxyDesc, ProxyRenderFlags, Ray, RayFilter, RayHit, SceneQuery, SurfaceTags,
    VISIBILITY_SPHERE_NAME,
};
pub use transform::Transform;
