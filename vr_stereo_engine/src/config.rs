//! VR session configuration
//!
//! Plain configuration struct with sensible defaults for a seated 90 Hz
//! headset. All values can be overridden before the session is created.

use std::time::Duration;
use crate::graphics_device::TextureFormat;
use crate::vr::{ColorSpace, TrackingSpace};

/// VR session configuration
#[derive(Debug, Clone)]
pub struct VrConfig {
    /// Near clip plane distance used for the eye projections
    pub near_clip: f32,
    /// Far clip plane distance used for the eye projections
    pub far_clip: f32,
    /// Native refresh rate of the HMD in Hz (drives the fixed time step)
    pub hmd_refresh_rate: f64,
    /// Maximum number of steps executed by a single pacer poll.
    /// Any backlog beyond this is dropped. 0 is treated as 1.
    pub max_catch_up_steps: u32,
    /// Color format of the offscreen eye target
    pub target_format: TextureFormat,
    /// Allocate a depth attachment on the eye target
    pub use_depth: bool,
    /// Number of color attachments on the eye target (at least 1)
    pub color_attachments: u32,
    /// Tracking universe used for pose queries
    pub tracking_space: TrackingSpace,
    /// Color space announced to the compositor with each eye texture
    pub color_space: ColorSpace,
    /// Swap interval applied to the mirror window (0 = vsync off)
    pub mirror_swap_interval: i32,
    /// Maximum number of scene lights passed to the shading stage
    pub max_lights: usize,
    /// Clear color of the eye target (RGBA)
    pub clear_color: [f32; 4],
}

impl VrConfig {
    /// Fixed simulation/render time step: `1 / hmd_refresh_rate`
    pub fn time_step(&self) -> Duration {
        if self.hmd_refresh_rate > 0.0 {
            Duration::from_secs_f64(1.0 / self.hmd_refresh_rate)
        } else {
            Duration::ZERO
        }
    }
}

impl Default for VrConfig {
    fn default() -> Self {
        Self {
            near_clip: 0.1,
            far_clip: 40.0,
            hmd_refresh_rate: 90.0,
            max_catch_up_steps: 5,
            target_format: TextureFormat::Rgb8,
            use_depth: true,
            color_attachments: 1,
            tracking_space: TrackingSpace::Seated,
            color_space: ColorSpace::Gamma,
            mirror_swap_interval: 0,
            max_lights: 8,
            clear_color: [0.0, 0.0, 0.0, 1.0],
        }
    }
}
