/// Compositor submission adapter.
///
/// Wraps an eye texture handle with the metadata the compositor needs and
/// submits it. Failures are logged and counted, never raised: the frame
/// continues with the other eye and the next frame.

use crate::graphics_device::TextureId;
use super::{VrRuntime, Eye, EyeTexture, ColorSpace, TextureType};

const SOURCE: &str = "stereo3d::Compositor";

/// Outcome of one eye submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionResult {
    pub eye: Eye,
    /// Runtime error code (0 = success)
    pub code: i32,
}

impl SubmissionResult {
    pub fn is_success(&self) -> bool {
        self.code == 0
    }
}

/// Compositor submission adapter
pub struct CompositorSubmitter {
    color_space: ColorSpace,
    texture_type: TextureType,
    failures: [u64; 2],
    submissions: [u64; 2],
}

impl CompositorSubmitter {
    /// OpenGL textures in the given color space
    pub fn new(color_space: ColorSpace) -> Self {
        Self {
            color_space,
            texture_type: TextureType::OpenGl,
            failures: [0; 2],
            submissions: [0; 2],
        }
    }

    /// Submit an eye texture
    pub fn submit(&mut self, runtime: &mut dyn VrRuntime, eye: Eye, texture: TextureId) -> SubmissionResult {
        let eye_texture = EyeTexture {
            handle: texture.0,
            texture_type: self.texture_type,
            color_space: self.color_space,
        };

        let code = runtime.submit(eye, &eye_texture);
        self.submissions[eye.index()] += 1;

        if code != 0 {
            self.failures[eye.index()] += 1;
            crate::engine_error!(SOURCE, "Submit compositor error ({}): {}", eye.name(), code);
        }

        SubmissionResult { eye, code }
    }

    /// Number of failed submissions for an eye
    pub fn failure_count(&self, eye: Eye) -> u64 {
        self.failures[eye.index()]
    }

    /// Number of submissions for an eye
    pub fn submission_count(&self, eye: Eye) -> u64 {
        self.submissions[eye.index()]
    }

    pub fn color_space(&self) -> ColorSpace {
        self.color_space
    }

    pub fn texture_type(&self) -> TextureType {
        self.texture_type
    }
}
