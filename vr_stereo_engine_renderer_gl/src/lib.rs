/*!
# Stereo3D VR Engine - OpenGL Backend

OpenGL implementation of the vr_stereo_engine traits using `glow`.

- **GlGraphicsDevice**: framebuffers, attachments and blits for the
  offscreen render target and the mirror window
- **GlShader** / **GlTexture**: shader programs and image textures
- **GlItemDrawer**: draws scene items with the engine's uniform conventions
- **GlVrRenderContext**: hardware render context driving a VR session
- **translate_window_event**: winit events for the mirror window
- **OpenVrRuntime** (`openvr` feature): the native OpenVR runtime

The GL context itself (window, loader) is created by the host application
and handed over as an `Rc<glow::Context>`.
*/

mod gl_graphics_device;
mod gl_shader;
mod gl_texture;
mod gl_vertex_array;
mod gl_item_drawer;
mod gl_render_context;
mod winit_events;

#[cfg(feature = "openvr")]
mod openvr_runtime;

pub use gl_graphics_device::{GlGraphicsDevice, internal_format, framebuffer_binding_point, clear_bits};
pub use gl_shader::{GlShader, attribute_location, ATTRIBUTE_SEMANTICS};
pub use gl_texture::{GlTexture, decode_rgba8};
pub use gl_vertex_array::GlVertexArray;
pub use gl_item_drawer::GlItemDrawer;
pub use gl_render_context::GlVrRenderContext;
pub use winit_events::translate_window_event;

#[cfg(feature = "openvr")]
pub use openvr_runtime::{OpenVrRuntime, SUBMIT_FAILED};

/// Create the OpenGL VR render context on the native OpenVR runtime
///
/// # Example
///
/// ```no_run
/// use std::rc::Rc;
/// use vr_stereo_engine::stereo3d::VrConfig;
/// use vr_stereo_engine_renderer_gl::create_openvr_context;
///
/// # fn run(gl: glow::Context) -> vr_stereo_engine::stereo3d::Result<()> {
/// let context = create_openvr_context(Rc::new(gl), VrConfig::default())?;
/// # Ok(())
/// # }
/// ```
#[cfg(feature = "openvr")]
pub fn create_openvr_context(
    gl: std::rc::Rc<glow::Context>,
    config: vr_stereo_engine::stereo3d::VrConfig,
) -> vr_stereo_engine::stereo3d::Result<GlVrRenderContext<OpenVrRuntime>> {
    let runtime = OpenVrRuntime::init()?;
    GlVrRenderContext::new(gl, runtime, config)
}
