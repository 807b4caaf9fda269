/// Mock graphics device for unit tests (no GPU required)
///
/// Tracks live framebuffers and textures so tests can check for leaks,
/// emulates the draw/read binding points, and records every call in a
/// command log.

use std::cell::{Cell, RefCell};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::Result;
use crate::graphics_device::{
    GraphicsDevice, FramebufferId, TextureId, FramebufferTarget, FramebufferStatus,
    TextureFormat, ClearMask, BlitFilter, Rect,
};

/// Attachments recorded for a mock framebuffer
#[derive(Debug, Default, Clone)]
pub struct MockAttachments {
    pub colors: FxHashMap<u32, TextureId>,
    pub depth: Option<TextureId>,
    pub draw_buffers: u32,
}

/// Mock graphics device
pub struct MockGraphicsDevice {
    next_id: Cell<u32>,
    /// Live framebuffers with their attachments
    pub framebuffers: RefCell<FxHashMap<u32, MockAttachments>>,
    /// Live textures with their size and format (`None` for depth)
    pub textures: RefCell<FxHashMap<u32, (u32, u32, Option<TextureFormat>)>>,
    draw_binding: Cell<FramebufferId>,
    read_binding: Cell<FramebufferId>,
    /// Force `framebuffer_status` to report incomplete with this code
    pub incomplete_status: Cell<Option<u32>>,
    /// Command log
    pub commands: RefCell<Vec<String>>,
    /// Viewports set, in call order
    pub viewports: RefCell<Vec<Rect>>,
}

impl MockGraphicsDevice {
    /// Create a new mock device with the window framebuffer bound
    pub fn new() -> Self {
        Self {
            next_id: Cell::new(1),
            framebuffers: RefCell::new(FxHashMap::default()),
            textures: RefCell::new(FxHashMap::default()),
            draw_binding: Cell::new(FramebufferId::DEFAULT),
            read_binding: Cell::new(FramebufferId::DEFAULT),
            incomplete_status: Cell::new(None),
            commands: RefCell::new(Vec::new()),
            viewports: RefCell::new(Vec::new()),
        }
    }

    fn allocate_id(&self) -> u32 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        id
    }

    fn record(&self, command: String) {
        self.commands.borrow_mut().push(command);
    }

    /// Number of live GPU objects (framebuffers + textures)
    pub fn live_handle_count(&self) -> usize {
        self.framebuffers.borrow().len() + self.textures.borrow().len()
    }

    /// Number of live textures
    pub fn live_texture_count(&self) -> usize {
        self.textures.borrow().len()
    }

    /// Attachments of a live framebuffer
    pub fn attachments(&self, framebuffer: FramebufferId) -> Option<MockAttachments> {
        self.framebuffers.borrow().get(&framebuffer.0).cloned()
    }

    /// Snapshot of the command log
    pub fn get_commands(&self) -> Vec<String> {
        self.commands.borrow().clone()
    }

    /// Count commands starting with `prefix`
    pub fn count_commands(&self, prefix: &str) -> usize {
        self.commands.borrow().iter().filter(|c| c.starts_with(prefix)).count()
    }

    /// Clear the command log
    pub fn clear_commands(&self) {
        self.commands.borrow_mut().clear();
    }
}

impl GraphicsDevice for MockGraphicsDevice {
    fn create_framebuffer(&self) -> Result<FramebufferId> {
        let id = self.allocate_id();
        self.framebuffers.borrow_mut().insert(id, MockAttachments::default());
        self.record(format!("create_framebuffer {}", id));
        Ok(FramebufferId(id))
    }

    fn delete_framebuffer(&self, framebuffer: FramebufferId) {
        self.framebuffers.borrow_mut().remove(&framebuffer.0);
        if self.draw_binding.get() == framebuffer {
            self.draw_binding.set(FramebufferId::DEFAULT);
        }
        if self.read_binding.get() == framebuffer {
            self.read_binding.set(FramebufferId::DEFAULT);
        }
        self.record(format!("delete_framebuffer {}", framebuffer.0));
    }

    fn create_color_texture(&self, width: u32, height: u32, format: TextureFormat) -> Result<TextureId> {
        let id = self.allocate_id();
        self.textures.borrow_mut().insert(id, (width, height, Some(format)));
        self.record(format!("create_color_texture {} {}x{} {:?}", id, width, height, format));
        Ok(TextureId(id))
    }

    fn create_depth_texture(&self, width: u32, height: u32) -> Result<TextureId> {
        let id = self.allocate_id();
        self.textures.borrow_mut().insert(id, (width, height, None));
        self.record(format!("create_depth_texture {} {}x{}", id, width, height));
        Ok(TextureId(id))
    }

    fn delete_texture(&self, texture: TextureId) {
        self.textures.borrow_mut().remove(&texture.0);
        self.record(format!("delete_texture {}", texture.0));
    }

    fn attach_color_texture(&self, index: u32, texture: TextureId) {
        let draw = self.draw_binding.get();
        if let Some(attachments) = self.framebuffers.borrow_mut().get_mut(&draw.0) {
            attachments.colors.insert(index, texture);
        }
        self.record(format!("attach_color {} {}", index, texture.0));
    }

    fn attach_depth_texture(&self, texture: TextureId) {
        let draw = self.draw_binding.get();
        if let Some(attachments) = self.framebuffers.borrow_mut().get_mut(&draw.0) {
            attachments.depth = Some(texture);
        }
        self.record(format!("attach_depth {}", texture.0));
    }

    fn set_draw_buffers(&self, count: u32) {
        let draw = self.draw_binding.get();
        if let Some(attachments) = self.framebuffers.borrow_mut().get_mut(&draw.0) {
            attachments.draw_buffers = count;
        }
        self.record(format!("draw_buffers {}", count));
    }

    fn framebuffer_status(&self) -> FramebufferStatus {
        match self.incomplete_status.get() {
            Some(code) => FramebufferStatus::Incomplete(code),
            None => FramebufferStatus::Complete,
        }
    }

    fn bind_framebuffer(&self, target: FramebufferTarget, framebuffer: FramebufferId) {
        match target {
            FramebufferTarget::Draw => self.draw_binding.set(framebuffer),
            FramebufferTarget::Read => self.read_binding.set(framebuffer),
            FramebufferTarget::Both => {
                self.draw_binding.set(framebuffer);
                self.read_binding.set(framebuffer);
            }
        }
        self.record(format!("bind {:?} {}", target, framebuffer.0));
    }

    fn bound_framebuffer(&self, target: FramebufferTarget) -> FramebufferId {
        match target {
            FramebufferTarget::Read => self.read_binding.get(),
            FramebufferTarget::Draw | FramebufferTarget::Both => self.draw_binding.get(),
        }
    }

    fn set_read_attachment(&self, index: u32) {
        self.record(format!("read_attachment {}", index));
    }

    fn set_viewport(&self, rect: Rect) {
        self.viewports.borrow_mut().push(rect);
        self.record(format!("viewport {}x{}", rect.width, rect.height));
    }

    fn set_clear_color(&self, color: [f32; 4]) {
        self.record(format!("clear_color {:?}", color));
    }

    fn clear(&self, mask: ClearMask) {
        self.record(format!("clear {:?}", mask));
    }

    fn flush(&self) {
        self.record("flush".to_string());
    }

    fn blit_framebuffer(&self, src: Rect, dst: Rect, _mask: ClearMask, filter: BlitFilter) {
        self.record(format!(
            "blit {} -> {} {}x{} -> {}x{} {:?}",
            self.read_binding.get().0,
            self.draw_binding.get().0,
            src.width,
            src.height,
            dst.width,
            dst.height,
            filter
        ));
    }
}

/// Set of ids, used by tests comparing handle sets
pub fn id_set(ids: impl IntoIterator<Item = u32>) -> FxHashSet<u32> {
    ids.into_iter().collect()
}

#[cfg(test)]
#[path = "mock_graphics_device_tests.rs"]
mod tests;
