//! VR runtime service trait.
//!
//! The runtime is an opaque native service (OpenVR or a test double). Matrix
//! values cross this boundary in the runtime's own row-major layout; use
//! `hmd34_to_mat4` / `hmd44_to_mat4` to convert them.

use glam::{Mat4, Vec4};
use crate::error::Result;
use super::ControllerState;

/// Number of tracked device slots
pub const MAX_TRACKED_DEVICE_COUNT: usize = 16;

/// Device slot of the head-mounted display
pub const HMD_DEVICE_INDEX: usize = 0;

/// Row-major 3x4 rigid transform as reported by the runtime
pub type HmdMatrix34 = [[f32; 4]; 3];

/// Row-major 4x4 matrix as reported by the runtime
pub type HmdMatrix44 = [[f32; 4]; 4];

/// Eye selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Eye {
    Left,
    Right,
}

impl Eye {
    /// Both eyes in render order
    pub const BOTH: [Eye; 2] = [Eye::Left, Eye::Right];

    /// 0 for left, 1 for right
    pub fn index(self) -> usize {
        match self {
            Eye::Left => 0,
            Eye::Right => 1,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Eye::Left => "left",
            Eye::Right => "right",
        }
    }
}

/// Class of the device occupying a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackedDeviceClass {
    Invalid,
    Hmd,
    Controller,
    GenericTracker,
    TrackingReference,
    DisplayRedirect,
}

/// Tracking universe for pose queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingSpace {
    Seated,
    Standing,
    RawAndUncalibrated,
}

/// Color space announced with a submitted texture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpace {
    Auto,
    Gamma,
    Linear,
}

/// Graphics API of a submitted texture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureType {
    OpenGl,
    Vulkan,
}

/// One device pose as delivered by the runtime
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawPose {
    /// Device to tracking-space transform (row-major)
    pub device_to_absolute_tracking: HmdMatrix34,
    /// Runtime reports the pose as valid
    pub pose_is_valid: bool,
}

impl Default for RawPose {
    fn default() -> Self {
        Self {
            device_to_absolute_tracking: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
            ],
            pose_is_valid: false,
        }
    }
}

/// Texture handed to the compositor for one eye
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EyeTexture {
    /// Native texture handle
    pub handle: u32,
    pub texture_type: TextureType,
    pub color_space: ColorSpace,
}

/// VR runtime service
///
/// `wait_get_poses` blocks until the runtime delivers the next pose set. It
/// is the pacing point of the whole VR loop.
pub trait VrRuntime {
    /// Class of the device in slot `index`
    fn device_class(&self, index: usize) -> TrackedDeviceClass;

    /// Per-eye render size recommended by the runtime
    fn recommended_render_target_size(&self) -> (u32, u32);

    /// Fixed eye-to-head transform
    fn eye_to_head_transform(&self, eye: Eye) -> HmdMatrix34;

    /// Per-eye projection for the given clip planes
    fn projection_matrix(&self, eye: Eye, near: f32, far: f32) -> HmdMatrix44;

    /// Select the tracking universe for subsequent pose queries
    fn set_tracking_space(&mut self, space: TrackingSpace);

    /// Block until new poses are available and write them into `poses`
    fn wait_get_poses(&mut self, poses: &mut [RawPose; MAX_TRACKED_DEVICE_COUNT]) -> Result<()>;

    /// Current input state of a controller
    fn controller_state(&self, index: usize) -> Option<ControllerState>;

    /// Fire a haptic pulse on a controller axis
    fn trigger_haptic_pulse(&mut self, index: usize, axis: u32, duration_us: u16);

    /// Hand an eye image to the compositor. Returns the runtime error code (0 = success).
    fn submit(&mut self, eye: Eye, texture: &EyeTexture) -> i32;

    /// Tell the compositor both eyes have been submitted
    fn post_present_handoff(&mut self);

    /// Close the runtime connection
    fn shutdown(&mut self);
}

/// Convert a row-major 3x4 rigid transform to a glam matrix
pub fn hmd34_to_mat4(m: &HmdMatrix34) -> Mat4 {
    Mat4::from_cols(
        Vec4::new(m[0][0], m[1][0], m[2][0], 0.0),
        Vec4::new(m[0][1], m[1][1], m[2][1], 0.0),
        Vec4::new(m[0][2], m[1][2], m[2][2], 0.0),
        Vec4::new(m[0][3], m[1][3], m[2][3], 1.0),
    )
}

/// Convert a glam matrix to a row-major 3x4 transform (last row dropped)
pub fn mat4_to_hmd34(m: &Mat4) -> HmdMatrix34 {
    let r = m.transpose().to_cols_array_2d();
    [r[0], r[1], r[2]]
}

/// Convert a row-major 4x4 matrix to a glam matrix
pub fn hmd44_to_mat4(m: &HmdMatrix44) -> Mat4 {
    Mat4::from_cols_array_2d(m).transpose()
}
