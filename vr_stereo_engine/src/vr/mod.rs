//! VR module - headset session, pose tracking and the stereo frame loop

pub mod vr_runtime;
pub mod controller;
pub mod pose_tracker;
pub mod compositor;
pub mod stereo_render_loop;
pub mod frame_pacer;
pub mod vr_session;

#[cfg(test)]
pub mod mock_vr_runtime;

pub use vr_runtime::*;
pub use controller::{
    ControllerState, SIDE_TOUCH_MASK, TRIGGER_TOUCH_MASK, is_side_touched, is_trigger_touched,
    haptic_pulse_micros,
};
pub use pose_tracker::{PoseTracker, TrackedPose, invert};
pub use compositor::{CompositorSubmitter, SubmissionResult};
pub use stereo_render_loop::{StereoRenderLoop, FrameReport, TrackingStatus, DrawContext, ItemDrawer};
pub use frame_pacer::{Clock, SystemClock, FramePacer, FrameHandler, MirrorWindow, WindowEvent};
pub use vr_session::VrSession;
