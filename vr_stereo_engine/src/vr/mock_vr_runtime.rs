/// Mock VR runtime for unit tests (no headset required)
///
/// Poses are scripted: each `wait_get_poses` call pops the next queued pose
/// set (or repeats the last one). Submissions, hand-offs and haptic pulses
/// are recorded in a call log.

use std::collections::VecDeque;
use glam::{Mat4, Vec3};

use crate::error::{Error, Result};
use crate::vr::{
    VrRuntime, Eye, EyeTexture, RawPose, TrackedDeviceClass, TrackingSpace, ControllerState,
    HmdMatrix34, HmdMatrix44, MAX_TRACKED_DEVICE_COUNT, mat4_to_hmd34,
};

/// Interpupillary half distance used by the mock eye transforms
pub const MOCK_HALF_IPD: f32 = 0.032;

/// Mock VR runtime
pub struct MockVrRuntime {
    pub classes: [TrackedDeviceClass; MAX_TRACKED_DEVICE_COUNT],
    pub recommended_size: (u32, u32),
    pub eye_to_head: [HmdMatrix34; 2],
    pub pose_script: VecDeque<[RawPose; MAX_TRACKED_DEVICE_COUNT]>,
    last_poses: [RawPose; MAX_TRACKED_DEVICE_COUNT],
    pub controller_states: [Option<ControllerState>; MAX_TRACKED_DEVICE_COUNT],
    /// Result code returned by `submit`, per eye
    pub submit_codes: [i32; 2],
    /// Fail the next `wait_get_poses` calls
    pub fail_wait: bool,
    pub tracking_space: Option<TrackingSpace>,
    pub wait_count: usize,
    pub calls: Vec<String>,
    pub submitted: Vec<(Eye, EyeTexture)>,
    pub is_shut_down: bool,
}

impl MockVrRuntime {
    /// HMD in slot 0, two controllers in slots 3 and 5
    pub fn new() -> Self {
        let mut classes = [TrackedDeviceClass::Invalid; MAX_TRACKED_DEVICE_COUNT];
        classes[0] = TrackedDeviceClass::Hmd;
        classes[1] = TrackedDeviceClass::TrackingReference;
        classes[3] = TrackedDeviceClass::Controller;
        classes[5] = TrackedDeviceClass::Controller;

        Self {
            classes,
            recommended_size: (1512, 1680),
            eye_to_head: [
                mat4_to_hmd34(&Mat4::from_translation(Vec3::new(-MOCK_HALF_IPD, 0.0, 0.0))),
                mat4_to_hmd34(&Mat4::from_translation(Vec3::new(MOCK_HALF_IPD, 0.0, 0.0))),
            ],
            pose_script: VecDeque::new(),
            last_poses: [RawPose::default(); MAX_TRACKED_DEVICE_COUNT],
            controller_states: [None; MAX_TRACKED_DEVICE_COUNT],
            submit_codes: [0, 0],
            fail_wait: false,
            tracking_space: None,
            wait_count: 0,
            calls: Vec::new(),
            submitted: Vec::new(),
            is_shut_down: false,
        }
    }

    /// Queue a pose set where only the listed slots are valid
    pub fn push_poses(&mut self, valid: &[(usize, Mat4)]) {
        let mut poses = [RawPose::default(); MAX_TRACKED_DEVICE_COUNT];
        for (index, transform) in valid {
            poses[*index] = RawPose {
                device_to_absolute_tracking: mat4_to_hmd34(transform),
                pose_is_valid: true,
            };
        }
        self.pose_script.push_back(poses);
    }

    /// Queue a raw pose set
    pub fn push_raw_poses(&mut self, poses: [RawPose; MAX_TRACKED_DEVICE_COUNT]) {
        self.pose_script.push_back(poses);
    }

    pub fn count_calls(&self, name: &str) -> usize {
        self.calls.iter().filter(|c| c.as_str() == name).count()
    }
}

impl VrRuntime for MockVrRuntime {
    fn device_class(&self, index: usize) -> TrackedDeviceClass {
        self.classes.get(index).copied().unwrap_or(TrackedDeviceClass::Invalid)
    }

    fn recommended_render_target_size(&self) -> (u32, u32) {
        self.recommended_size
    }

    fn eye_to_head_transform(&self, eye: Eye) -> HmdMatrix34 {
        self.eye_to_head[eye.index()]
    }

    fn projection_matrix(&self, eye: Eye, near: f32, far: f32) -> HmdMatrix44 {
        let offset = if eye == Eye::Left { -0.05 } else { 0.05 };
        let projection = Mat4::from_translation(Vec3::new(offset, 0.0, 0.0))
            * Mat4::perspective_rh_gl(1.7, 0.9, near, far);
        projection.transpose().to_cols_array_2d()
    }

    fn set_tracking_space(&mut self, space: TrackingSpace) {
        self.tracking_space = Some(space);
    }

    fn wait_get_poses(&mut self, poses: &mut [RawPose; MAX_TRACKED_DEVICE_COUNT]) -> Result<()> {
        self.calls.push("wait_get_poses".to_string());
        if self.fail_wait {
            return Err(Error::VrRuntime("WaitGetPoses failed".to_string()));
        }
        self.wait_count += 1;
        if let Some(next) = self.pose_script.pop_front() {
            self.last_poses = next;
        }
        *poses = self.last_poses;
        Ok(())
    }

    fn controller_state(&self, index: usize) -> Option<ControllerState> {
        self.controller_states.get(index).copied().flatten()
    }

    fn trigger_haptic_pulse(&mut self, index: usize, axis: u32, duration_us: u16) {
        self.calls.push(format!("haptic {} {} {}", index, axis, duration_us));
    }

    fn submit(&mut self, eye: Eye, texture: &EyeTexture) -> i32 {
        self.calls.push(format!("submit {}", eye.name()));
        self.submitted.push((eye, *texture));
        self.submit_codes[eye.index()]
    }

    fn post_present_handoff(&mut self) {
        self.calls.push("post_present_handoff".to_string());
    }

    fn shutdown(&mut self) {
        self.calls.push("shutdown".to_string());
        self.is_shut_down = true;
    }
}
