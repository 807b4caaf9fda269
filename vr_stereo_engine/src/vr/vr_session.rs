/// VR session - owns the runtime connection, the pose tracker and the
/// stereo render loop for the lifetime of one headset session.

use std::rc::Rc;

use crate::config::VrConfig;
use crate::error::Result;
use crate::graphics_device::GraphicsDevice;
use crate::scene::SceneManager;
use super::{
    VrRuntime, PoseTracker, StereoRenderLoop, ItemDrawer, FrameReport, ControllerState,
    haptic_pulse_micros,
};

const SOURCE: &str = "stereo3d::VrSession";

/// Axis used for haptic pulses
const HAPTIC_AXIS: u32 = 0;

/// VR session
pub struct VrSession<R: VrRuntime> {
    runtime: R,
    tracker: PoseTracker,
    render_loop: StereoRenderLoop,
    shut_down: bool,
}

impl<R: VrRuntime> VrSession<R> {
    /// Start a session on an initialized runtime
    ///
    /// The mirror window is assumed to have the recommended eye size until
    /// the first `resize`.
    pub fn new(mut runtime: R, device: Rc<dyn GraphicsDevice>, config: VrConfig) -> Result<Self> {
        let tracker = PoseTracker::new(&mut runtime, &config)?;
        let render_loop = StereoRenderLoop::new(device, config, tracker.recommended_size());

        crate::engine_info!(SOURCE, "VR session started");

        Ok(Self {
            runtime,
            tracker,
            render_loop,
            shut_down: false,
        })
    }

    /// Render and submit one stereo frame
    pub fn display(&mut self, scene: &mut dyn SceneManager, drawer: &mut dyn ItemDrawer) -> Result<FrameReport> {
        self.render_loop.display(&mut self.tracker, &mut self.runtime, scene, drawer)
    }

    /// Block until fresh poses are available
    pub fn wait_get_poses(&mut self) -> Result<()> {
        self.tracker.refresh(&mut self.runtime)
    }

    /// Mirror window resized
    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        self.render_loop.resize(width, height)
    }

    /// Input state of any controller slot
    pub fn controller_state(&self, index: usize) -> ControllerState {
        self.runtime.controller_state(index).unwrap_or_default()
    }

    /// Side button touched on a controller
    pub fn side_touched(&self, index: usize) -> bool {
        self.controller_state(index).side_touched()
    }

    /// Trigger touched on a controller
    pub fn trigger_touched(&self, index: usize) -> bool {
        self.controller_state(index).trigger_touched()
    }

    /// Fire a haptic pulse of `seconds` on a controller
    pub fn trigger_haptic_pulse(&mut self, index: usize, seconds: f32) {
        self.runtime.trigger_haptic_pulse(index, HAPTIC_AXIS, haptic_pulse_micros(seconds));
    }

    pub fn tracker(&self) -> &PoseTracker {
        &self.tracker
    }

    pub fn render_loop(&self) -> &StereoRenderLoop {
        &self.render_loop
    }

    pub fn runtime(&self) -> &R {
        &self.runtime
    }

    pub fn runtime_mut(&mut self) -> &mut R {
        &mut self.runtime
    }

    /// End the session
    ///
    /// Releases the render target, waits for one more pose update so other
    /// users of the runtime can finish, then shuts the runtime down.
    pub fn shutdown(mut self) {
        self.shutdown_inner();
    }

    fn shutdown_inner(&mut self) {
        if self.shut_down {
            return;
        }
        self.shut_down = true;

        self.render_loop.dispose();
        if let Err(err) = self.tracker.refresh(&mut self.runtime) {
            crate::engine_warn!(SOURCE, "Final pose drain failed: {}", err);
        }
        self.runtime.shutdown();

        crate::engine_info!(SOURCE, "VR session shut down after {} frames", self.render_loop.frame_count());
    }
}

impl<R: VrRuntime> Drop for VrSession<R> {
    fn drop(&mut self) {
        self.shutdown_inner();
    }
}

#[cfg(test)]
#[path = "vr_session_tests.rs"]
mod tests;
