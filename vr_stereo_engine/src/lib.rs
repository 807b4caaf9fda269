/*!
# Stereo3D VR Engine

Core traits and types for a minimal scene engine with a stereo VR path.

This crate is backend-agnostic: the graphics API is reached through the
`GraphicsDevice` trait and the headset through the `VrRuntime` trait.
Backend implementations (OpenGL through `glow`, OpenVR) live in
`vr_stereo_engine_renderer_gl`.

## Architecture

- **OffscreenRenderTarget**: framebuffer with color/depth attachments and
  scoped write/read bindings
- **PoseTracker**: per-frame tracked device poses and per-eye matrices
- **StereoRenderLoop**: renders the scene once per eye and submits both eyes
- **FramePacer**: fixed time step driver for update/display
- **CompositorSubmitter**: hands eye textures to the VR compositor
- **VrSession**: owns the runtime, the tracker and the render loop
*/

// Internal modules
mod error;
mod engine;
mod config;
pub mod log;
pub mod graphics_device;
pub mod target;
pub mod camera;
pub mod resource;
pub mod scene;
pub mod renderer;
pub mod vr;

// Main stereo3d namespace module
pub mod stereo3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine singleton
    pub use crate::engine::Engine;

    // Configuration
    pub use crate::config::VrConfig;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger, LogFacadeLogger};
    }

    // Render sub-module with the render context and panel
    pub mod render {
        pub use crate::renderer::*;
        pub use crate::camera::Camera;
    }

    // Graphics device sub-module
    pub mod graphics_device {
        pub use crate::graphics_device::*;
    }

    // Render target sub-module
    pub mod target {
        pub use crate::target::*;
    }

    // Resource sub-module
    pub mod resource {
        pub use crate::resource::*;
    }

    // Scene sub-module
    pub mod scene {
        pub use crate::scene::*;
    }

    // VR sub-module
    pub mod vr {
        pub use crate::vr::*;
    }
}

// Re-export math library at crate root
pub use glam;
