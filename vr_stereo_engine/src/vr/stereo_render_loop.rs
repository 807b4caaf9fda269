/// Stereo render loop - renders the scene once per eye and submits both eyes.
///
/// Per `display()` call:
/// 1. wait for fresh poses if the current ones were consumed
/// 2. snapshot the scene camera and projection
/// 3. for each eye: substitute the eye view and projection, render the scene
///    into the offscreen target, blit it to the mirror window and submit it
/// 4. restore the snapshot (also when rendering fails)
/// 5. mark the poses consumed and hand off to the compositor
///
/// A singular head transform never aborts the frame: the last successfully
/// inverted head transform (identity before the first one) is used instead
/// and the frame is reported as `TrackingStatus::Degraded`.

use std::rc::Rc;
use glam::Mat4;

use crate::config::VrConfig;
use crate::error::{Error, Result};
use crate::graphics_device::{
    GraphicsDevice, FramebufferId, FramebufferTarget, ClearMask, BlitFilter, Rect,
};
use crate::scene::{SceneManager, RenderItem, Light};
use crate::target::{OffscreenRenderTarget, RenderTargetDesc};
use super::{PoseTracker, VrRuntime, Eye, CompositorSubmitter, SubmissionResult, invert};

const SOURCE: &str = "stereo3d::StereoRenderLoop";

/// Head tracking quality of a rendered frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingStatus {
    /// Head transform was inverted this frame
    Tracked,
    /// Head transform was singular, a stale head transform was used
    Degraded,
}

/// Outcome of one `display()` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameReport {
    pub tracking: TrackingStatus,
    /// Submission results, indexed by `Eye::index()`
    pub submissions: [SubmissionResult; 2],
}

/// Per-eye data handed to the item drawer
pub struct DrawContext<'a> {
    pub eye: Eye,
    /// Eye view matrix (also the scene's camera while drawing)
    pub camera: Mat4,
    pub projection: Mat4,
    /// Active lights, capped at `VrConfig::max_lights`
    pub lights: &'a [Light],
}

/// Draws one render item into the currently bound target
pub trait ItemDrawer {
    fn draw(&mut self, item: &RenderItem<'_>, context: &DrawContext<'_>) -> Result<()>;
}

/// Stereo render loop
pub struct StereoRenderLoop {
    device: Rc<dyn GraphicsDevice>,
    config: VrConfig,
    target: Option<OffscreenRenderTarget>,
    submitter: CompositorSubmitter,
    mirror_size: (u32, u32),
    last_head_inverse: Mat4,
    frame_count: u64,
}

impl StereoRenderLoop {
    /// Create the loop. The render target is created on the first frame.
    pub fn new(device: Rc<dyn GraphicsDevice>, config: VrConfig, mirror_size: (u32, u32)) -> Self {
        let submitter = CompositorSubmitter::new(config.color_space);
        Self {
            device,
            config,
            target: None,
            submitter,
            mirror_size,
            last_head_inverse: Mat4::IDENTITY,
            frame_count: 0,
        }
    }

    /// Render and submit one stereo frame
    ///
    /// # Errors
    ///
    /// - pose refresh failures from the runtime
    /// - `CreationError` if the render target cannot be created
    /// - draw errors from the item drawer
    ///
    /// The scene camera and projection are restored in every case.
    pub fn display(
        &mut self,
        tracker: &mut PoseTracker,
        runtime: &mut dyn VrRuntime,
        scene: &mut dyn SceneManager,
        drawer: &mut dyn ItemDrawer,
    ) -> Result<FrameReport> {
        if !tracker.poses_ready() {
            tracker.refresh(runtime)?;
        }

        let saved_camera = scene.camera_matrix();
        let saved_projection = scene.projection_matrix();

        let result = self.render_eyes(tracker, runtime, scene, drawer, saved_camera);

        scene.set_camera_matrix(saved_camera);
        scene.set_projection_matrix(saved_projection);
        tracker.mark_consumed();

        let report = result?;
        runtime.post_present_handoff();
        self.frame_count += 1;
        Ok(report)
    }

    fn render_eyes(
        &mut self,
        tracker: &PoseTracker,
        runtime: &mut dyn VrRuntime,
        scene: &mut dyn SceneManager,
        drawer: &mut dyn ItemDrawer,
        saved_camera: Mat4,
    ) -> Result<FrameReport> {
        let tracking = match invert(&tracker.head_pose().transform) {
            Some(inverse) => {
                self.last_head_inverse = inverse;
                TrackingStatus::Tracked
            }
            None => {
                crate::engine_warn!(SOURCE, "Tracking lost: head transform is not invertible (frame {})",
                    self.frame_count);
                TrackingStatus::Degraded
            }
        };
        let world_to_head = self.last_head_inverse * saved_camera;

        let lights: Vec<Light> = scene.lights().take(self.config.max_lights).copied().collect();

        self.ensure_target(tracker)?;
        let device = Rc::clone(&self.device);

        let mut submissions = [SubmissionResult { eye: Eye::Left, code: 0 }, SubmissionResult { eye: Eye::Right, code: 0 }];

        for eye in Eye::BOTH {
            let view = tracker.head_to_eye(eye) * world_to_head;
            let projection = tracker.projection(eye);
            scene.set_camera_matrix(view);
            scene.set_projection_matrix(projection);

            let context = DrawContext { eye, camera: view, projection, lights: &lights };
            let target = self.target.as_mut().ok_or_else(|| {
                crate::engine_err!(Error::InvalidResource, SOURCE, "Render target missing")
            })?;

            // Render the eye
            {
                let _write = target.begin_write()?;
                device.set_clear_color(self.config.clear_color);
                device.clear(ClearMask::COLOR | ClearMask::DEPTH);
                for item in scene.items() {
                    if item.shape.is_some() {
                        drawer.draw(&item, &context)?;
                    }
                }
                device.flush();
            }

            // Mirror to the window
            let source = Rect::from_size(target.width(), target.height());
            let mirror = Rect::from_size(self.mirror_size.0, self.mirror_size.1);
            device.bind_framebuffer(FramebufferTarget::Draw, FramebufferId::DEFAULT);
            device.clear(ClearMask::COLOR | ClearMask::DEPTH);
            {
                let _read = target.begin_read(0)?;
                device.blit_framebuffer(source, mirror, ClearMask::COLOR, BlitFilter::Linear);
            }
            device.flush();

            // Hand the eye image to the compositor
            device.bind_framebuffer(FramebufferTarget::Both, target.framebuffer());
            let texture = target.color_texture(0).ok_or_else(|| {
                crate::engine_err!(Error::InvalidResource, SOURCE, "Render target has no color attachment")
            })?;
            submissions[eye.index()] = self.submitter.submit(runtime, eye, texture);
            device.bind_framebuffer(FramebufferTarget::Both, FramebufferId::DEFAULT);
        }

        Ok(FrameReport { tracking, submissions })
    }

    fn ensure_target(&mut self, tracker: &PoseTracker) -> Result<()> {
        if self.target.is_none() {
            let (width, height) = tracker.recommended_size();
            let desc = RenderTargetDesc {
                width,
                height,
                color_attachments: self.config.color_attachments,
                use_depth: self.config.use_depth,
                format: self.config.target_format,
            };
            self.target = Some(OffscreenRenderTarget::create(Rc::clone(&self.device), desc)?);
        }
        Ok(())
    }

    /// Mirror window resized
    ///
    /// Updates the blit destination and reallocates the render target (if it
    /// exists) at the new size. If reallocation fails the target is dropped
    /// and the next frame recreates it at the recommended size.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        self.mirror_size = (width, height);
        if let Some(target) = self.target.as_mut() {
            if let Err(err) = target.resize(width, height) {
                self.target = None;
                return Err(err);
            }
        }
        Ok(())
    }

    /// Release the render target
    pub fn dispose(&mut self) {
        if let Some(target) = self.target.take() {
            target.dispose();
        }
    }

    pub fn target(&self) -> Option<&OffscreenRenderTarget> {
        self.target.as_ref()
    }

    pub fn mirror_size(&self) -> (u32, u32) {
        self.mirror_size
    }

    pub fn submitter(&self) -> &CompositorSubmitter {
        &self.submitter
    }

    pub fn config(&self) -> &VrConfig {
        &self.config
    }

    /// Number of completed frames
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

#[cfg(test)]
#[path = "stereo_render_loop_tests.rs"]
mod tests;
