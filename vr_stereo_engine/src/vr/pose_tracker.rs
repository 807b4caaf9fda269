/// Pose tracker - per-frame device poses plus the fixed per-eye data.
///
/// Eye transforms and projections are queried once at construction. Poses
/// are refreshed by `refresh()`, which blocks on the runtime until the next
/// pose set arrives.

use glam::Mat4;

use crate::config::VrConfig;
use crate::error::{Error, Result};
use super::{
    VrRuntime, Eye, RawPose, TrackedDeviceClass, TrackingSpace, ControllerState,
    MAX_TRACKED_DEVICE_COUNT, HMD_DEVICE_INDEX, hmd34_to_mat4, hmd44_to_mat4,
};

const SOURCE: &str = "stereo3d::PoseTracker";

/// Pose of one tracked device slot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackedPose {
    /// Device to tracking-space transform. Only meaningful if `valid`.
    pub transform: Mat4,
    /// Device was tracked in the last refresh
    pub valid: bool,
}

impl Default for TrackedPose {
    fn default() -> Self {
        Self {
            transform: Mat4::IDENTITY,
            valid: false,
        }
    }
}

/// Pose tracker
pub struct PoseTracker {
    poses: [TrackedPose; MAX_TRACKED_DEVICE_COUNT],
    raw: [RawPose; MAX_TRACKED_DEVICE_COUNT],
    /// Inverted eye-to-head transforms, indexed by `Eye::index()`
    head_to_eye: [Mat4; 2],
    projections: [Mat4; 2],
    recommended_size: (u32, u32),
    hand_controller: Option<usize>,
    secondary_controller: Option<usize>,
    controller_state: ControllerState,
    poses_ready: bool,
    tracking_space: TrackingSpace,
}

impl PoseTracker {
    /// Query the fixed per-eye data and discover controllers
    ///
    /// # Errors
    ///
    /// `InitializationFailed` if an eye-to-head transform is not invertible.
    pub fn new(runtime: &mut dyn VrRuntime, config: &VrConfig) -> Result<Self> {
        runtime.set_tracking_space(config.tracking_space);

        let mut head_to_eye = [Mat4::IDENTITY; 2];
        let mut projections = [Mat4::IDENTITY; 2];
        for eye in Eye::BOTH {
            let eye_to_head = hmd34_to_mat4(&runtime.eye_to_head_transform(eye));
            head_to_eye[eye.index()] = invert(&eye_to_head).ok_or_else(|| {
                crate::engine_err!(Error::InitializationFailed, SOURCE,
                    "Eye-to-head transform of the {} eye is not invertible", eye.name())
            })?;
            projections[eye.index()] =
                hmd44_to_mat4(&runtime.projection_matrix(eye, config.near_clip, config.far_clip));
        }

        let mut controllers = (0..MAX_TRACKED_DEVICE_COUNT)
            .filter(|&i| runtime.device_class(i) == TrackedDeviceClass::Controller);
        let hand_controller = controllers.next();
        let secondary_controller = controllers.next();

        let recommended_size = runtime.recommended_render_target_size();

        crate::engine_info!(SOURCE, "Target render size {} x {}", recommended_size.0, recommended_size.1);
        match hand_controller {
            Some(index) => crate::engine_info!(SOURCE, "Hand controller in slot {}", index),
            None => crate::engine_warn!(SOURCE, "No controller found"),
        }
        if let Some(index) = secondary_controller {
            crate::engine_info!(SOURCE, "Secondary controller in slot {}", index);
        }

        Ok(Self {
            poses: [TrackedPose::default(); MAX_TRACKED_DEVICE_COUNT],
            raw: [RawPose::default(); MAX_TRACKED_DEVICE_COUNT],
            head_to_eye,
            projections,
            recommended_size,
            hand_controller,
            secondary_controller,
            controller_state: ControllerState::default(),
            poses_ready: false,
            tracking_space: config.tracking_space,
        })
    }

    /// Block until the runtime delivers the next pose set
    ///
    /// Valid devices get their new transform. Invalid devices keep their
    /// previous transform with the flag cleared. The hand controller state is
    /// sampled afterwards.
    pub fn refresh(&mut self, runtime: &mut dyn VrRuntime) -> Result<()> {
        runtime.wait_get_poses(&mut self.raw)?;

        for (pose, raw) in self.poses.iter_mut().zip(self.raw.iter()) {
            if raw.pose_is_valid {
                pose.transform = hmd34_to_mat4(&raw.device_to_absolute_tracking);
                pose.valid = true;
            } else {
                pose.valid = false;
            }
        }

        if let Some(index) = self.hand_controller {
            self.controller_state = runtime.controller_state(index).unwrap_or_default();
        }

        self.poses_ready = true;
        Ok(())
    }

    /// Poses were refreshed and not consumed yet
    pub fn poses_ready(&self) -> bool {
        self.poses_ready
    }

    /// Mark the current poses as consumed
    pub fn mark_consumed(&mut self) {
        self.poses_ready = false;
    }

    /// Pose of a device slot
    pub fn pose(&self, index: usize) -> Option<&TrackedPose> {
        self.poses.get(index)
    }

    pub fn poses(&self) -> &[TrackedPose; MAX_TRACKED_DEVICE_COUNT] {
        &self.poses
    }

    /// Pose of the head-mounted display
    pub fn head_pose(&self) -> &TrackedPose {
        &self.poses[HMD_DEVICE_INDEX]
    }

    /// Head-to-eye transform (inverse of the runtime's eye-to-head)
    pub fn head_to_eye(&self, eye: Eye) -> Mat4 {
        self.head_to_eye[eye.index()]
    }

    /// Eye projection for the configured clip planes
    pub fn projection(&self, eye: Eye) -> Mat4 {
        self.projections[eye.index()]
    }

    pub fn recommended_size(&self) -> (u32, u32) {
        self.recommended_size
    }

    pub fn tracking_space(&self) -> TrackingSpace {
        self.tracking_space
    }

    /// Slot of the first controller found at startup
    pub fn hand_controller(&self) -> Option<usize> {
        self.hand_controller
    }

    /// Slot of the second controller found at startup
    pub fn secondary_controller(&self) -> Option<usize> {
        self.secondary_controller
    }

    /// Hand controller state sampled by the last refresh
    pub fn controller_state(&self) -> &ControllerState {
        &self.controller_state
    }

    /// Hand controller transform, if tracked in the last refresh
    pub fn hand_transform(&self) -> Option<Mat4> {
        self.controller_transform(self.hand_controller)
    }

    /// Secondary controller transform, if tracked in the last refresh
    pub fn secondary_transform(&self) -> Option<Mat4> {
        self.controller_transform(self.secondary_controller)
    }

    fn controller_transform(&self, slot: Option<usize>) -> Option<Mat4> {
        slot.and_then(|i| self.poses.get(i))
            .filter(|pose| pose.valid)
            .map(|pose| pose.transform)
    }

    pub fn side_touched(&self) -> bool {
        self.controller_state.side_touched()
    }

    pub fn trigger_touched(&self) -> bool {
        self.controller_state.trigger_touched()
    }
}

/// Inverse of `m`, or `None` if `m` is singular
pub fn invert(m: &Mat4) -> Option<Mat4> {
    let det = m.determinant();
    if !det.is_finite() || det.abs() <= f32::EPSILON {
        return None;
    }
    let inverse = m.inverse();
    if inverse.is_finite() {
        Some(inverse)
    } else {
        None
    }
}

#[cfg(test)]
#[path = "pose_tracker_tests.rs"]
mod tests;
