/// Offscreen render target - framebuffer with color and optional depth attachments.
///
/// Created with a fixed size and format. Rendering into it goes through a
/// `WriteScope` guard and reading from it through a `ReadScope` guard; both
/// restore the framebuffer binding that was active before they began.
///
/// Resizing reallocates every attachment (contents are lost). A target whose
/// reallocation failed holds no attachments and refuses both scopes.

use std::ops::Deref;
use std::rc::Rc;

use crate::error::{Error, Result};
use crate::engine_bail;
use crate::graphics_device::{
    GraphicsDevice, FramebufferId, TextureId, FramebufferTarget, FramebufferStatus,
    TextureFormat, Rect,
};

const SOURCE: &str = "stereo3d::RenderTarget";

/// Descriptor for creating an offscreen render target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderTargetDesc {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Number of color attachments (at least 1)
    pub color_attachments: u32,
    /// Allocate a 32-bit float depth attachment
    pub use_depth: bool,
    /// Format of every color attachment
    pub format: TextureFormat,
}

impl RenderTargetDesc {
    /// Single color attachment with depth
    pub fn new(width: u32, height: u32, format: TextureFormat) -> Self {
        Self {
            width,
            height,
            color_attachments: 1,
            use_depth: true,
            format,
        }
    }
}

/// GPU objects owned by a render target
struct Attachments {
    framebuffer: FramebufferId,
    colors: Vec<TextureId>,
    depth: Option<TextureId>,
}

impl Attachments {
    fn release(self, device: &dyn GraphicsDevice) {
        for texture in self.colors {
            device.delete_texture(texture);
        }
        if let Some(depth) = self.depth {
            device.delete_texture(depth);
        }
        device.delete_framebuffer(self.framebuffer);
    }
}

/// Offscreen render target
pub struct OffscreenRenderTarget {
    device: Rc<dyn GraphicsDevice>,
    desc: RenderTargetDesc,
    attachments: Option<Attachments>,
    /// Read binding saved by the last `begin_read` that actually rebound
    saved_read: FramebufferId,
}

impl OffscreenRenderTarget {
    /// Create a render target
    ///
    /// # Errors
    ///
    /// - `InvalidResource` for a zero size or zero color attachments
    /// - `CreationError` if the framebuffer is incomplete. All GPU objects
    ///   allocated so far are released before returning.
    pub fn create(device: Rc<dyn GraphicsDevice>, desc: RenderTargetDesc) -> Result<Self> {
        let attachments = Self::allocate(device.as_ref(), &desc)?;

        crate::engine_debug!(SOURCE, "Created {}x{} target ({} color, depth: {})",
            desc.width, desc.height, desc.color_attachments, desc.use_depth);

        Ok(Self {
            device,
            desc,
            attachments: Some(attachments),
            saved_read: FramebufferId::DEFAULT,
        })
    }

    fn allocate(device: &dyn GraphicsDevice, desc: &RenderTargetDesc) -> Result<Attachments> {
        if desc.width == 0 || desc.height == 0 {
            engine_bail!(SOURCE, "Invalid render target size {}x{}", desc.width, desc.height);
        }
        if desc.color_attachments == 0 {
            engine_bail!(SOURCE, "A render target needs at least one color attachment");
        }

        let framebuffer = device.create_framebuffer()?;
        let mut attachments = Attachments {
            framebuffer,
            colors: Vec::with_capacity(desc.color_attachments as usize),
            depth: None,
        };

        device.bind_framebuffer(FramebufferTarget::Both, framebuffer);

        if let Err(err) = Self::attach_all(device, desc, &mut attachments) {
            device.bind_framebuffer(FramebufferTarget::Both, FramebufferId::DEFAULT);
            attachments.release(device);
            return Err(err);
        }

        let status = device.framebuffer_status();
        device.bind_framebuffer(FramebufferTarget::Both, FramebufferId::DEFAULT);

        if let FramebufferStatus::Incomplete(code) = status {
            attachments.release(device);
            return Err(crate::engine_err!(Error::CreationError, SOURCE,
                "Error occurred while creating the framebuffer object (status {:#06x})", code));
        }

        Ok(attachments)
    }

    fn attach_all(device: &dyn GraphicsDevice, desc: &RenderTargetDesc, attachments: &mut Attachments) -> Result<()> {
        for index in 0..desc.color_attachments {
            let texture = device.create_color_texture(desc.width, desc.height, desc.format)?;
            attachments.colors.push(texture);
            device.attach_color_texture(index, texture);
        }

        if desc.use_depth {
            let depth = device.create_depth_texture(desc.width, desc.height)?;
            attachments.depth = Some(depth);
            device.attach_depth_texture(depth);
        }

        device.set_draw_buffers(desc.color_attachments);
        Ok(())
    }

    /// Bind this target for drawing until the returned scope ends
    ///
    /// Saves the current draw binding, binds this framebuffer and sets the
    /// viewport to the target size.
    ///
    /// # Errors
    ///
    /// `InvalidResource` if the target holds no attachments (failed resize).
    pub fn begin_write(&mut self) -> Result<WriteScope<'_>> {
        let framebuffer = self.live_framebuffer()?;
        let previous = self.device.bound_framebuffer(FramebufferTarget::Draw);
        self.device.bind_framebuffer(FramebufferTarget::Draw, framebuffer);
        self.device.set_viewport(Rect::from_size(self.desc.width, self.desc.height));
        Ok(WriteScope { target: self, previous })
    }

    /// Bind this target for reading from color attachment `attachment`
    ///
    /// If the read binding already is this framebuffer, it is not rebound and
    /// the binding saved by the earlier read is kept.
    ///
    /// # Errors
    ///
    /// `InvalidResource` if `attachment` is out of range or the target holds
    /// no attachments.
    pub fn begin_read(&mut self, attachment: u32) -> Result<ReadScope<'_>> {
        if attachment >= self.desc.color_attachments {
            engine_bail!(SOURCE, "Color attachment {} out of range ({} attachments)",
                attachment, self.desc.color_attachments);
        }

        let framebuffer = self.live_framebuffer()?;
        let current = self.device.bound_framebuffer(FramebufferTarget::Read);
        if current != framebuffer {
            self.saved_read = current;
            self.device.bind_framebuffer(FramebufferTarget::Read, framebuffer);
        }
        self.device.set_read_attachment(attachment);

        Ok(ReadScope { target: self })
    }

    /// Reallocate every attachment at the new size
    ///
    /// Attachment count, format and depth setting are kept. Contents are lost.
    /// On error the old attachments are already gone: the target is unusable
    /// until a later `resize` succeeds.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        self.release();
        self.desc.width = width;
        self.desc.height = height;
        self.attachments = Some(Self::allocate(self.device.as_ref(), &self.desc)?);

        crate::engine_debug!(SOURCE, "Resized target to {}x{}", width, height);
        Ok(())
    }

    /// Release all GPU objects
    pub fn dispose(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(attachments) = self.attachments.take() {
            attachments.release(self.device.as_ref());
        }
        self.saved_read = FramebufferId::DEFAULT;
    }

    fn live_framebuffer(&self) -> Result<FramebufferId> {
        match &self.attachments {
            Some(attachments) => Ok(attachments.framebuffer),
            None => Err(crate::engine_err!(Error::InvalidResource, SOURCE,
                "Render target {}x{} has no attachments", self.desc.width, self.desc.height)),
        }
    }

    // ===== ACCESSORS =====

    pub fn width(&self) -> u32 {
        self.desc.width
    }

    pub fn height(&self) -> u32 {
        self.desc.height
    }

    pub fn format(&self) -> TextureFormat {
        self.desc.format
    }

    pub fn color_attachment_count(&self) -> u32 {
        self.desc.color_attachments
    }

    pub fn has_depth(&self) -> bool {
        self.desc.use_depth
    }

    pub fn desc(&self) -> &RenderTargetDesc {
        &self.desc
    }

    /// False after a failed resize
    pub fn is_allocated(&self) -> bool {
        self.attachments.is_some()
    }

    /// Framebuffer handle (`FramebufferId::DEFAULT` after a failed resize)
    pub fn framebuffer(&self) -> FramebufferId {
        self.attachments.as_ref().map_or(FramebufferId::DEFAULT, |a| a.framebuffer)
    }

    /// Color texture at `index`
    pub fn color_texture(&self, index: u32) -> Option<TextureId> {
        self.attachments.as_ref().and_then(|a| a.colors.get(index as usize).copied())
    }

    /// Depth texture, if allocated
    pub fn depth_texture(&self) -> Option<TextureId> {
        self.attachments.as_ref().and_then(|a| a.depth)
    }

    /// Graphics device the target was created on
    pub fn device(&self) -> &Rc<dyn GraphicsDevice> {
        &self.device
    }
}

impl Drop for OffscreenRenderTarget {
    fn drop(&mut self) {
        self.release();
    }
}

// ============================================================================
// Scopes
// ============================================================================

/// Draw binding scope. Restores the previous draw framebuffer on drop.
pub struct WriteScope<'a> {
    target: &'a mut OffscreenRenderTarget,
    previous: FramebufferId,
}

impl WriteScope<'_> {
    /// Draw framebuffer bound before the scope began
    pub fn previous(&self) -> FramebufferId {
        self.previous
    }

    /// End the scope
    pub fn end(self) {}
}

impl Deref for WriteScope<'_> {
    type Target = OffscreenRenderTarget;

    fn deref(&self) -> &OffscreenRenderTarget {
        self.target
    }
}

impl Drop for WriteScope<'_> {
    fn drop(&mut self) {
        self.target.device.bind_framebuffer(FramebufferTarget::Draw, self.previous);
    }
}

/// Read binding scope. Restores the saved read framebuffer on drop.
pub struct ReadScope<'a> {
    target: &'a mut OffscreenRenderTarget,
}

impl ReadScope<'_> {
    /// Read framebuffer restored when the scope ends
    pub fn previous(&self) -> FramebufferId {
        self.target.saved_read
    }

    /// End the scope
    pub fn end(self) {}
}

impl Deref for ReadScope<'_> {
    type Target = OffscreenRenderTarget;

    fn deref(&self) -> &OffscreenRenderTarget {
        self.target
    }
}

impl Drop for ReadScope<'_> {
    fn drop(&mut self) {
        self.target.device.bind_framebuffer(FramebufferTarget::Read, self.target.saved_read);
    }
}

#[cfg(test)]
#[path = "render_target_tests.rs"]
mod tests;
