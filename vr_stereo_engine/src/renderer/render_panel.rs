/// VrRenderPanel - runs an application in a render context at a fixed step

use crate::error::Result;
use crate::vr::{Clock, FramePacer, FrameHandler, MirrorWindow};
use super::{Application, RenderContext};

const SOURCE: &str = "stereo3d::VrRenderPanel";

/// Render panel
///
/// Each paced step calls `Application::execute_step` followed by
/// `RenderContext::display` on the application's scene. Window resizes are
/// forwarded to the context.
pub struct VrRenderPanel<A, C>
where
    A: Application<C>,
    C: RenderContext,
{
    application: A,
    context: C,
    initialized: bool,
    disposed: bool,
}

impl<A, C> VrRenderPanel<A, C>
where
    A: Application<C>,
    C: RenderContext,
{
    pub fn new(application: A, context: C) -> Self {
        Self {
            application,
            context,
            initialized: false,
            disposed: false,
        }
    }

    /// Initialize the application (no-op once done)
    pub fn init(&mut self) -> Result<()> {
        if !self.initialized {
            self.application.init(&mut self.context)?;
            self.initialized = true;
            crate::engine_debug!(SOURCE, "Application initialized ({:?} context)", self.context.kind());
        }
        Ok(())
    }

    /// Run until the window closes, then dispose the context
    pub fn run<W, K>(&mut self, window: &mut W, pacer: &mut FramePacer<K>) -> Result<()>
    where
        W: MirrorWindow + ?Sized,
        K: Clock,
    {
        self.init()?;
        let result = pacer.run(window, self);
        self.dispose();
        result
    }

    /// Release the render context
    pub fn dispose(&mut self) {
        if !self.disposed {
            self.context.dispose();
            self.disposed = true;
        }
    }

    pub fn application(&self) -> &A {
        &self.application
    }

    pub fn application_mut(&mut self) -> &mut A {
        &mut self.application
    }

    pub fn context(&self) -> &C {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut C {
        &mut self.context
    }
}

impl<A, C> FrameHandler for VrRenderPanel<A, C>
where
    A: Application<C>,
    C: RenderContext,
{
    fn update(&mut self) -> Result<()> {
        self.application.execute_step(&mut self.context)
    }

    fn display(&mut self) -> Result<()> {
        self.context.display(self.application.scene_mut())
    }

    fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        self.context.resize(width, height)
    }
}

#[cfg(test)]
#[path = "render_panel_tests.rs"]
mod tests;
