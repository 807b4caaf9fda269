/// Graphics device module - the narrow framebuffer/texture surface used by
/// the offscreen render target and the stereo render loop

pub mod graphics_device;

pub use graphics_device::*;

// Mock graphics device for tests (no GPU required)
#[cfg(test)]
pub mod mock_graphics_device;
