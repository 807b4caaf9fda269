//! Error types for the Stereo3D engine
//!
//! This module defines the error types used throughout the engine,
//! including GPU resource creation, VR runtime access and asset loading.
//!
//! Recoverable per-frame conditions (tracking loss, compositor submission
//! failures) are NOT errors: they are reported as values by the render loop
//! and logged. See `vr::TrackingStatus` and `vr::SubmissionResult`.

use std::fmt;

/// Result type for Stereo3D engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Stereo3D engine errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Backend-specific error (OpenGL object allocation, etc.)
    BackendError(String),

    /// Invalid resource or argument (attachment index, vertex layout, etc.)
    InvalidResource(String),

    /// Initialization failed (VR session, render context, subsystems)
    InitializationFailed(String),

    /// Framebuffer/attachment setup failed. The resource is unusable.
    CreationError(String),

    /// Shader could not be read, compiled or linked
    ShaderLoad(String),

    /// Texture could not be read or decoded
    TextureLoad(String),

    /// The VR runtime reported a failure on a blocking query
    VrRuntime(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            Error::CreationError(msg) => write!(f, "Creation error: {}", msg),
            Error::ShaderLoad(msg) => write!(f, "Shader load error: {}", msg),
            Error::TextureLoad(msg) => write!(f, "Texture load error: {}", msg),
            Error::VrRuntime(msg) => write!(f, "VR runtime error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
