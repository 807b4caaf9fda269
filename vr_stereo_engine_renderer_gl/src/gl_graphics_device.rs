/// GlGraphicsDevice - OpenGL implementation of the GraphicsDevice trait

use std::num::NonZeroU32;
use std::rc::Rc;

use glow::HasContext;
use vr_stereo_engine::stereo3d::graphics_device::{
    BlitFilter, ClearMask, FramebufferId, FramebufferStatus, FramebufferTarget, GraphicsDevice,
    Rect, TextureFormat, TextureId,
};
use vr_stereo_engine::stereo3d::{Error, Result};
use vr_stereo_engine::engine_err;

const SOURCE: &str = "stereo3d::gl::GraphicsDevice";

/// OpenGL graphics device
///
/// Wraps a shared `glow` context. Requires OpenGL 4.2 / ES 3.0 (immutable
/// texture storage, framebuffer blits).
pub struct GlGraphicsDevice {
    gl: Rc<glow::Context>,
}

impl GlGraphicsDevice {
    pub fn new(gl: Rc<glow::Context>) -> Self {
        Self { gl }
    }

    /// Underlying context
    pub fn gl(&self) -> &Rc<glow::Context> {
        &self.gl
    }

    fn allocate_texture(&self, width: u32, height: u32, internal_format: u32) -> Result<TextureId> {
        unsafe {
            let texture = self.gl.create_texture().map_err(|msg| {
                engine_err!(Error::BackendError, SOURCE, "glCreateTexture failed: {}", msg)
            })?;
            self.gl.bind_texture(glow::TEXTURE_2D, Some(texture));
            self.gl.tex_storage_2d(glow::TEXTURE_2D, 1, internal_format, width as i32, height as i32);
            self.gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MIN_FILTER, glow::LINEAR as i32);
            self.gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, glow::LINEAR as i32);
            self.gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, glow::CLAMP_TO_EDGE as i32);
            self.gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, glow::CLAMP_TO_EDGE as i32);
            self.gl.bind_texture(glow::TEXTURE_2D, None);
            Ok(TextureId(texture.0.get()))
        }
    }
}

/// GL internal format of a color attachment
pub fn internal_format(format: TextureFormat) -> u32 {
    match format {
        TextureFormat::Rgb8 => glow::RGB8,
        TextureFormat::Rgba8 => glow::RGBA8,
        TextureFormat::Rgba16F => glow::RGBA16F,
        TextureFormat::Rgba32F => glow::RGBA32F,
    }
}

/// GL binding point of a framebuffer target
pub fn framebuffer_binding_point(target: FramebufferTarget) -> u32 {
    match target {
        FramebufferTarget::Draw => glow::DRAW_FRAMEBUFFER,
        FramebufferTarget::Read => glow::READ_FRAMEBUFFER,
        FramebufferTarget::Both => glow::FRAMEBUFFER,
    }
}

/// GL buffer bits of a clear mask
pub fn clear_bits(mask: ClearMask) -> u32 {
    let mut bits = 0;
    if mask.contains(ClearMask::COLOR) {
        bits |= glow::COLOR_BUFFER_BIT;
    }
    if mask.contains(ClearMask::DEPTH) {
        bits |= glow::DEPTH_BUFFER_BIT;
    }
    bits
}

pub(crate) fn native_framebuffer(framebuffer: FramebufferId) -> Option<glow::NativeFramebuffer> {
    NonZeroU32::new(framebuffer.0).map(glow::NativeFramebuffer)
}

pub(crate) fn native_texture(texture: TextureId) -> Option<glow::NativeTexture> {
    NonZeroU32::new(texture.0).map(glow::NativeTexture)
}

impl GraphicsDevice for GlGraphicsDevice {
    fn create_framebuffer(&self) -> Result<FramebufferId> {
        let framebuffer = unsafe { self.gl.create_framebuffer() }.map_err(|msg| {
            engine_err!(Error::BackendError, SOURCE, "glCreateFramebuffer failed: {}", msg)
        })?;
        Ok(FramebufferId(framebuffer.0.get()))
    }

    fn delete_framebuffer(&self, framebuffer: FramebufferId) {
        if let Some(native) = native_framebuffer(framebuffer) {
            unsafe { self.gl.delete_framebuffer(native) };
        }
    }

    fn create_color_texture(&self, width: u32, height: u32, format: TextureFormat) -> Result<TextureId> {
        self.allocate_texture(width, height, internal_format(format))
    }

    fn create_depth_texture(&self, width: u32, height: u32) -> Result<TextureId> {
        self.allocate_texture(width, height, glow::DEPTH_COMPONENT32F)
    }

    fn delete_texture(&self, texture: TextureId) {
        if let Some(native) = native_texture(texture) {
            unsafe { self.gl.delete_texture(native) };
        }
    }

    fn attach_color_texture(&self, index: u32, texture: TextureId) {
        unsafe {
            self.gl.framebuffer_texture_2d(
                glow::FRAMEBUFFER,
                glow::COLOR_ATTACHMENT0 + index,
                glow::TEXTURE_2D,
                native_texture(texture),
                0,
            );
        }
    }

    fn attach_depth_texture(&self, texture: TextureId) {
        unsafe {
            self.gl.framebuffer_texture_2d(
                glow::FRAMEBUFFER,
                glow::DEPTH_ATTACHMENT,
                glow::TEXTURE_2D,
                native_texture(texture),
                0,
            );
        }
    }

    fn set_draw_buffers(&self, count: u32) {
        let buffers: Vec<u32> = (0..count).map(|i| glow::COLOR_ATTACHMENT0 + i).collect();
        unsafe { self.gl.draw_buffers(&buffers) };
    }

    fn framebuffer_status(&self) -> FramebufferStatus {
        let status = unsafe { self.gl.check_framebuffer_status(glow::FRAMEBUFFER) };
        if status == glow::FRAMEBUFFER_COMPLETE {
            FramebufferStatus::Complete
        } else {
            FramebufferStatus::Incomplete(status)
        }
    }

    fn bind_framebuffer(&self, target: FramebufferTarget, framebuffer: FramebufferId) {
        unsafe {
            self.gl.bind_framebuffer(framebuffer_binding_point(target), native_framebuffer(framebuffer));
        }
    }

    fn bound_framebuffer(&self, target: FramebufferTarget) -> FramebufferId {
        let query = match target {
            FramebufferTarget::Read => glow::READ_FRAMEBUFFER_BINDING,
            FramebufferTarget::Draw | FramebufferTarget::Both => glow::DRAW_FRAMEBUFFER_BINDING,
        };
        let binding = unsafe { self.gl.get_parameter_i32(query) };
        FramebufferId(binding.max(0) as u32)
    }

    fn set_read_attachment(&self, index: u32) {
        unsafe { self.gl.read_buffer(glow::COLOR_ATTACHMENT0 + index) };
    }

    fn set_viewport(&self, rect: Rect) {
        unsafe { self.gl.viewport(rect.x, rect.y, rect.width as i32, rect.height as i32) };
    }

    fn set_clear_color(&self, color: [f32; 4]) {
        unsafe { self.gl.clear_color(color[0], color[1], color[2], color[3]) };
    }

    fn clear(&self, mask: ClearMask) {
        unsafe { self.gl.clear(clear_bits(mask)) };
    }

    fn flush(&self) {
        unsafe { self.gl.flush() };
    }

    fn blit_framebuffer(&self, src: Rect, dst: Rect, mask: ClearMask, filter: BlitFilter) {
        let filter = match filter {
            BlitFilter::Nearest => glow::NEAREST,
            BlitFilter::Linear => glow::LINEAR,
        };
        unsafe {
            self.gl.blit_framebuffer(
                src.x,
                src.y,
                src.x + src.width as i32,
                src.y + src.height as i32,
                dst.x,
                dst.y,
                dst.x + dst.width as i32,
                dst.y + dst.height as i32,
                clear_bits(mask),
                filter,
            );
        }
    }
}
