/// OpenVrRuntime - VrRuntime implementation over the native OpenVR SDK
///
/// Compiled with the `openvr` cargo feature.

use vr_stereo_engine::stereo3d::vr::{
    ColorSpace, ControllerState, Eye, EyeTexture, HmdMatrix34, HmdMatrix44, RawPose,
    TextureType, TrackedDeviceClass, TrackingSpace, VrRuntime, MAX_TRACKED_DEVICE_COUNT,
};
use vr_stereo_engine::stereo3d::{Error, Result};
use vr_stereo_engine::{engine_debug, engine_err, engine_info};

const SOURCE: &str = "stereo3d::gl::OpenVr";

/// Result code reported for a failed compositor submission
pub const SUBMIT_FAILED: i32 = 1;

/// OpenVR runtime connection (scene application)
pub struct OpenVrRuntime {
    context: openvr::Context,
    system: openvr::System,
    compositor: openvr::Compositor,
}

impl OpenVrRuntime {
    /// Connect to the runtime
    ///
    /// # Errors
    ///
    /// `InitializationFailed` if no runtime or headset is available.
    pub fn init() -> Result<Self> {
        let context = unsafe { openvr::init(openvr::ApplicationType::Scene) }.map_err(|err| {
            engine_err!(Error::InitializationFailed, SOURCE, "VR_Init failed: {}", err)
        })?;
        let system = context.system().map_err(|err| {
            engine_err!(Error::InitializationFailed, SOURCE, "IVRSystem unavailable: {}", err)
        })?;
        let compositor = context.compositor().map_err(|err| {
            engine_err!(Error::InitializationFailed, SOURCE, "IVRCompositor unavailable: {}", err)
        })?;

        engine_info!(SOURCE, "OpenVR runtime connected");
        Ok(Self { context, system, compositor })
    }
}

fn native_eye(eye: Eye) -> openvr::Eye {
    match eye {
        Eye::Left => openvr::Eye::Left,
        Eye::Right => openvr::Eye::Right,
    }
}

impl VrRuntime for OpenVrRuntime {
    fn device_class(&self, index: usize) -> TrackedDeviceClass {
        match self.system.tracked_device_class(index as u32) {
            openvr::TrackedDeviceClass::HMD => TrackedDeviceClass::Hmd,
            openvr::TrackedDeviceClass::Controller => TrackedDeviceClass::Controller,
            openvr::TrackedDeviceClass::GenericTracker => TrackedDeviceClass::GenericTracker,
            openvr::TrackedDeviceClass::TrackingReference => TrackedDeviceClass::TrackingReference,
            openvr::TrackedDeviceClass::DisplayRedirect => TrackedDeviceClass::DisplayRedirect,
            _ => TrackedDeviceClass::Invalid,
        }
    }

    fn recommended_render_target_size(&self) -> (u32, u32) {
        self.system.recommended_render_target_size()
    }

    fn eye_to_head_transform(&self, eye: Eye) -> HmdMatrix34 {
        self.system.eye_to_head_transform(native_eye(eye))
    }

    fn projection_matrix(&self, eye: Eye, near: f32, far: f32) -> HmdMatrix44 {
        self.system.projection_matrix(native_eye(eye), near, far)
    }

    fn set_tracking_space(&mut self, space: TrackingSpace) {
        let origin = match space {
            TrackingSpace::Seated => openvr::TrackingUniverseOrigin::Seated,
            TrackingSpace::Standing => openvr::TrackingUniverseOrigin::Standing,
            TrackingSpace::RawAndUncalibrated => openvr::TrackingUniverseOrigin::RawAndUncalibrated,
        };
        self.compositor.set_tracking_space(origin);
    }

    fn wait_get_poses(&mut self, poses: &mut [RawPose; MAX_TRACKED_DEVICE_COUNT]) -> Result<()> {
        let wait = self.compositor.wait_get_poses().map_err(|err| {
            engine_err!(Error::VrRuntime, SOURCE, "WaitGetPoses failed: {}", err)
        })?;
        for (pose, native) in poses.iter_mut().zip(wait.render.iter()) {
            *pose = RawPose {
                device_to_absolute_tracking: *native.device_to_absolute_tracking(),
                pose_is_valid: native.pose_is_valid(),
            };
        }
        Ok(())
    }

    fn controller_state(&self, index: usize) -> Option<ControllerState> {
        self.system.controller_state(index as u32).map(|state| ControllerState {
            packet_num: state.packet_num,
            button_pressed: state.button_pressed,
            button_touched: state.button_touched,
        })
    }

    fn trigger_haptic_pulse(&mut self, index: usize, axis: u32, duration_us: u16) {
        self.system.trigger_haptic_pulse(index as u32, axis, duration_us);
    }

    fn submit(&mut self, eye: Eye, texture: &EyeTexture) -> i32 {
        let handle = match texture.texture_type {
            TextureType::OpenGl => openvr::compositor::texture::Handle::OpenGLTexture(texture.handle as usize),
            TextureType::Vulkan => return SUBMIT_FAILED,
        };
        let color_space = match texture.color_space {
            ColorSpace::Auto => openvr::compositor::texture::ColorSpace::Auto,
            ColorSpace::Gamma => openvr::compositor::texture::ColorSpace::Gamma,
            ColorSpace::Linear => openvr::compositor::texture::ColorSpace::Linear,
        };
        let native = openvr::compositor::Texture { handle, color_space };

        match unsafe { self.compositor.submit(native_eye(eye), &native, None, None) } {
            Ok(()) => 0,
            Err(err) => {
                engine_debug!(SOURCE, "Submit ({}) rejected: {}", eye.name(), err);
                SUBMIT_FAILED
            }
        }
    }

    fn post_present_handoff(&mut self) {
        self.compositor.post_present_handoff();
    }

    fn shutdown(&mut self) {
        unsafe { self.context.shutdown() };
        engine_info!(SOURCE, "OpenVR runtime shut down");
    }
}
