//! Camera module: viewer snapshot and view frustum.
//!
//! The engine does NOT own cameras. The host supplies a viewer each
//! frame (directly or through the culler's configured viewer object);
//! everything here is a pure function of that snapshot.

mod frustum;
mod viewer;

pub use frustum::{
    Frustum, FrustumCorners, FRUSTUM_EDGES,
    NEAR_BOTTOM_LEFT, NEAR_BOTTOM_RIGHT, NEAR_TOP_RIGHT, NEAR_TOP_LEFT,
    FAR_BOTTOM_LEFT, FAR_BOTTOM_RIGHT, FAR_TOP_RIGHT, FAR_TOP_LEFT,
    PLANE_LEFT, PLANE_RIGHT, PLANE_BOTTOM, PLANE_TOP, PLANE_NEAR, PLANE_FAR,
};
pub use viewer::{Lens, Viewer};
