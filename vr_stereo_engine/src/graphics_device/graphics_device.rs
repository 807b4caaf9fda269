/// Graphics device trait - backend-agnostic framebuffer and texture operations
///
/// This is the subset of a GL-style API the VR path needs: framebuffer
/// objects with color/depth attachments, binding queries for save/restore,
/// viewport, clear, flush and blit. Backends (e.g. the OpenGL crate)
/// implement it over their native context.
///
/// All methods take `&self`: the device is owned by the single render thread
/// and shared through `Rc`.

use bitflags::bitflags;
use crate::error::Result;

// ============================================================================
// Handles
// ============================================================================

/// Framebuffer handle. `FramebufferId::DEFAULT` (0) is the window framebuffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FramebufferId(pub u32);

impl FramebufferId {
    /// The window (mirror) framebuffer
    pub const DEFAULT: FramebufferId = FramebufferId(0);

    /// Returns true for the window framebuffer
    pub fn is_default(self) -> bool {
        self.0 == 0
    }
}

/// Texture handle (non-zero for live textures)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

// ============================================================================
// Enums and flags
// ============================================================================

/// Framebuffer binding point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramebufferTarget {
    /// Draw framebuffer binding
    Draw,
    /// Read framebuffer binding
    Read,
    /// Both bindings at once (GL_FRAMEBUFFER)
    Both,
}

/// Color attachment formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureFormat {
    /// 8-bit RGB, normalized
    Rgb8,
    /// 8-bit RGBA, normalized
    Rgba8,
    /// 16-bit float RGBA
    Rgba16F,
    /// 32-bit float RGBA
    Rgba32F,
}

/// Blit filtering mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlitFilter {
    Nearest,
    Linear,
}

/// Result of a framebuffer completeness check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramebufferStatus {
    /// Framebuffer is complete and can be rendered to
    Complete,
    /// Framebuffer is incomplete (backend status code)
    Incomplete(u32),
}

bitflags! {
    /// Buffers affected by `clear` and `blit_framebuffer`
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ClearMask: u32 {
        const COLOR = 1 << 0;
        const DEPTH = 1 << 1;
    }
}

/// Integer rectangle in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    /// Rectangle anchored at the origin
    pub fn from_size(width: u32, height: u32) -> Self {
        Self { x: 0, y: 0, width, height }
    }
}

// ============================================================================
// GraphicsDevice trait
// ============================================================================

/// Graphics device trait
///
/// Attachment operations apply to the framebuffer currently bound for draw,
/// mirroring the GL binding model.
pub trait GraphicsDevice {
    /// Create an empty framebuffer object
    fn create_framebuffer(&self) -> Result<FramebufferId>;

    /// Delete a framebuffer object
    fn delete_framebuffer(&self, framebuffer: FramebufferId);

    /// Create a 2D color texture usable as a color attachment
    fn create_color_texture(&self, width: u32, height: u32, format: TextureFormat) -> Result<TextureId>;

    /// Create a 2D 32-bit float depth texture
    fn create_depth_texture(&self, width: u32, height: u32) -> Result<TextureId>;

    /// Delete a texture
    fn delete_texture(&self, texture: TextureId);

    /// Attach a color texture at `COLOR_ATTACHMENT0 + index`
    fn attach_color_texture(&self, index: u32, texture: TextureId);

    /// Attach a depth texture
    fn attach_depth_texture(&self, texture: TextureId);

    /// Enable draw buffers `COLOR_ATTACHMENT0 .. COLOR_ATTACHMENT0 + count`
    fn set_draw_buffers(&self, count: u32);

    /// Completeness of the framebuffer bound for draw
    fn framebuffer_status(&self) -> FramebufferStatus;

    /// Bind a framebuffer
    fn bind_framebuffer(&self, target: FramebufferTarget, framebuffer: FramebufferId);

    /// Currently bound framebuffer (`Both` reports the draw binding)
    fn bound_framebuffer(&self, target: FramebufferTarget) -> FramebufferId;

    /// Select `COLOR_ATTACHMENT0 + index` as read buffer
    fn set_read_attachment(&self, index: u32);

    /// Set the viewport
    fn set_viewport(&self, rect: Rect);

    /// Set the color used by `clear`
    fn set_clear_color(&self, color: [f32; 4]);

    /// Clear the draw framebuffer
    fn clear(&self, mask: ClearMask);

    /// Flush pending commands
    fn flush(&self);

    /// Copy a region from the read framebuffer to the draw framebuffer
    fn blit_framebuffer(&self, src: Rect, dst: Rect, mask: ClearMask, filter: BlitFilter);
}
