//! Error types for the Occlusion3D engine
//!
//! The culling core is a best-effort heuristic, so the taxonomy is narrow:
//! only setup can fail fatally, everything else is local to one candidate
//! or occluder.

use std::fmt;

/// Result type for Occlusion3D operations
pub type Result<T> = std::result::Result<T, Error>;

/// Occlusion3D errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Setup failed (missing viewer, missing required configuration)
    InitializationFailed(String),

    /// Invalid scene object (missing bounds, unknown object)
    InvalidResource(String),

    /// Error reported by the scene/query collaborator (proxy creation refused)
    BackendError(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
