/// RenderContext trait - per-backend rendering entry point

use std::rc::Rc;

use crate::error::Result;
use crate::resource::{Shader, Texture, VertexData};
use crate::scene::SceneManager;

/// Kind of render context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RendererKind {
    /// GPU rendering (OpenGL)
    Hardware,
    /// CPU rasterization
    Software,
}

/// Render context
///
/// A render context owns the backend state of one window: the default
/// shader, the resource factories and (for VR contexts) the headset session.
/// All calls happen on the thread that owns the graphics context.
pub trait RenderContext {
    /// Backend kind
    fn kind(&self) -> RendererKind;

    /// Render the scene once
    fn display(&mut self, scene: &mut dyn SceneManager) -> Result<()>;

    /// Make `shader` the active program for items without their own shader
    fn use_shader(&mut self, shader: Rc<dyn Shader>);

    /// Switch back to the built-in default shader
    fn use_default_shader(&mut self);

    /// Create an empty shader for this backend
    fn make_shader(&self) -> Box<dyn Shader>;

    /// Create an empty texture for this backend
    fn make_texture(&self) -> Box<dyn Texture>;

    /// Create vertex data for this backend
    fn make_vertex_data(&self, vertex_count: usize) -> VertexData {
        VertexData::new(vertex_count)
    }

    /// Window was resized
    fn resize(&mut self, width: u32, height: u32) -> Result<()>;

    /// Release every backend resource. The context is unusable afterwards.
    fn dispose(&mut self);
}

/// Application driven by a `VrRenderPanel`
pub trait Application<C: RenderContext + ?Sized> {
    /// Build the scene and load resources (called once, before the first step)
    fn init(&mut self, context: &mut C) -> Result<()>;

    /// Advance the simulation by one fixed step
    fn execute_step(&mut self, context: &mut C) -> Result<()>;

    /// Scene rendered after each step
    fn scene_mut(&mut self) -> &mut dyn SceneManager;
}
