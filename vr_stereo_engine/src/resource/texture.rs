/// Resource-level texture trait.
///
/// A 2D texture decoded from an image file. Textures are created by
/// `RenderContext::make_texture()`.

use std::path::Path;
use crate::error::Result;

/// Texture trait
pub trait Texture {
    /// Decode the image at `path` and upload it
    ///
    /// # Errors
    ///
    /// `TextureLoad` if the file cannot be read or decoded.
    fn load(&mut self, path: &Path) -> Result<()>;

    /// Native texture handle (0 while not loaded)
    fn handle(&self) -> u32;

    /// Width in pixels (0 while not loaded)
    fn width(&self) -> u32;

    /// Height in pixels (0 while not loaded)
    fn height(&self) -> u32;
}
