//! Offscreen render target module
//!
//! Provides the framebuffer-backed render target the VR path renders each
//! eye into before blitting it to the mirror window and handing it to the
//! compositor.

mod render_target;

pub use render_target::{OffscreenRenderTarget, RenderTargetDesc, WriteScope, ReadScope};
