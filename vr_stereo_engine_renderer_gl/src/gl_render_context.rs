/// GlVrRenderContext - hardware render context for a VR headset
///
/// Owns the OpenGL item drawer and the VR session. Every `display()` renders
/// the scene once per eye, mirrors the eyes to the window and submits them
/// to the compositor.

use std::rc::Rc;

use glow::HasContext;
use vr_stereo_engine::stereo3d::graphics_device::GraphicsDevice;
use vr_stereo_engine::stereo3d::render::{RenderContext, RendererKind};
use vr_stereo_engine::stereo3d::resource::{Shader, Texture};
use vr_stereo_engine::stereo3d::scene::SceneManager;
use vr_stereo_engine::stereo3d::vr::{FrameReport, VrRuntime, VrSession};
use vr_stereo_engine::stereo3d::{Error, Result, VrConfig};
use vr_stereo_engine::{engine_err, engine_info};

use crate::gl_graphics_device::GlGraphicsDevice;
use crate::gl_item_drawer::GlItemDrawer;
use crate::gl_shader::GlShader;
use crate::gl_texture::GlTexture;

const SOURCE: &str = "stereo3d::gl::VrRenderContext";

/// OpenGL VR render context
pub struct GlVrRenderContext<R: VrRuntime> {
    gl: Rc<glow::Context>,
    drawer: GlItemDrawer,
    session: Option<VrSession<R>>,
    last_report: Option<FrameReport>,
}

impl<R: VrRuntime> GlVrRenderContext<R> {
    /// Set up the GL state and start the VR session
    ///
    /// The GL context must be current on the calling thread.
    pub fn new(gl: Rc<glow::Context>, runtime: R, config: VrConfig) -> Result<Self> {
        unsafe {
            gl.enable(glow::DEPTH_TEST);
            let [r, g, b, a] = config.clear_color;
            gl.clear_color(r, g, b, a);
        }

        let drawer = GlItemDrawer::new(Rc::clone(&gl))?;
        let device: Rc<dyn GraphicsDevice> = Rc::new(GlGraphicsDevice::new(Rc::clone(&gl)));
        let session = VrSession::new(runtime, device, config)?;

        engine_info!(SOURCE, "OpenGL VR context ready ({}x{} per eye)",
            session.tracker().recommended_size().0, session.tracker().recommended_size().1);

        Ok(Self {
            gl,
            drawer,
            session: Some(session),
            last_report: None,
        })
    }

    /// VR session (None after `dispose`)
    pub fn session(&self) -> Option<&VrSession<R>> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut VrSession<R>> {
        self.session.as_mut()
    }

    /// Report of the last displayed frame
    pub fn last_report(&self) -> Option<&FrameReport> {
        self.last_report.as_ref()
    }

    pub fn drawer(&self) -> &GlItemDrawer {
        &self.drawer
    }

    fn active_session(&mut self) -> Result<&mut VrSession<R>> {
        self.session.as_mut().ok_or_else(|| {
            engine_err!(Error::InvalidResource, SOURCE, "Render context used after dispose")
        })
    }
}

impl<R: VrRuntime> RenderContext for GlVrRenderContext<R> {
    fn kind(&self) -> RendererKind {
        RendererKind::Hardware
    }

    fn display(&mut self, scene: &mut dyn SceneManager) -> Result<()> {
        let session = self.session.as_mut().ok_or_else(|| {
            engine_err!(Error::InvalidResource, SOURCE, "Render context used after dispose")
        })?;
        self.drawer.prune_vertex_arrays();
        let report = session.display(scene, &mut self.drawer)?;
        self.last_report = Some(report);
        Ok(())
    }

    fn use_shader(&mut self, shader: Rc<dyn Shader>) {
        self.drawer.use_shader(shader);
    }

    fn use_default_shader(&mut self) {
        self.drawer.use_default_shader();
    }

    fn make_shader(&self) -> Box<dyn Shader> {
        Box::new(GlShader::new(Rc::clone(&self.gl)))
    }

    fn make_texture(&self) -> Box<dyn Texture> {
        Box::new(GlTexture::new(Rc::clone(&self.gl)))
    }

    fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        self.active_session()?.resize(width, height)
    }

    fn dispose(&mut self) {
        self.drawer.clear_cache();
        if let Some(session) = self.session.take() {
            session.shutdown();
        }
    }
}
