//! Renderer module
//!
//! Backend-agnostic render context trait and the render panel that drives an
//! application through the frame pacer.

pub mod render_context;
pub mod render_panel;

pub use render_context::{RenderContext, RendererKind, Application};
pub use render_panel::VrRenderPanel;
