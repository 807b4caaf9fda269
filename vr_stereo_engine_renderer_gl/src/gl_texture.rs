/// GlTexture - OpenGL implementation of the Texture trait

use std::num::NonZeroU32;
use std::path::Path;
use std::rc::Rc;

use glow::HasContext;
use vr_stereo_engine::stereo3d::resource::Texture;
use vr_stereo_engine::stereo3d::{Error, Result};
use vr_stereo_engine::{engine_debug, engine_err};

const SOURCE: &str = "stereo3d::gl::Texture";

/// OpenGL 2D texture decoded with the `image` crate (RGBA8)
pub struct GlTexture {
    gl: Rc<glow::Context>,
    texture: Option<glow::NativeTexture>,
    width: u32,
    height: u32,
}

impl GlTexture {
    pub fn new(gl: Rc<glow::Context>) -> Self {
        Self {
            gl,
            texture: None,
            width: 0,
            height: 0,
        }
    }

    /// Upload tightly packed RGBA8 pixels
    pub fn upload_rgba8(&mut self, width: u32, height: u32, pixels: &[u8]) -> Result<()> {
        let expected = width as usize * height as usize * 4;
        if width == 0 || height == 0 || pixels.len() != expected {
            return Err(engine_err!(Error::TextureLoad, SOURCE,
                "{}x{} image needs {} bytes, got {}", width, height, expected, pixels.len()));
        }

        let texture = unsafe {
            let texture = self.gl.create_texture().map_err(|msg| {
                engine_err!(Error::TextureLoad, SOURCE, "glCreateTexture failed: {}", msg)
            })?;
            self.gl.bind_texture(glow::TEXTURE_2D, Some(texture));
            self.gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
            self.gl.tex_storage_2d(glow::TEXTURE_2D, 1, glow::RGBA8, width as i32, height as i32);
            self.gl.tex_sub_image_2d(
                glow::TEXTURE_2D,
                0,
                0,
                0,
                width as i32,
                height as i32,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                glow::PixelUnpackData::Slice(pixels),
            );
            self.gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MIN_FILTER, glow::LINEAR as i32);
            self.gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, glow::LINEAR as i32);
            self.gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, glow::REPEAT as i32);
            self.gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, glow::REPEAT as i32);
            self.gl.bind_texture(glow::TEXTURE_2D, None);
            texture
        };

        if let Some(old) = self.texture.replace(texture) {
            unsafe { self.gl.delete_texture(old) };
        }
        self.width = width;
        self.height = height;
        Ok(())
    }

    pub fn texture(&self) -> Option<glow::NativeTexture> {
        self.texture
    }
}

/// Decode an image file to RGBA8
pub fn decode_rgba8(path: &Path) -> Result<image::RgbaImage> {
    let image = image::open(path).map_err(|err| {
        engine_err!(Error::TextureLoad, SOURCE, "Cannot decode {}: {}", path.display(), err)
    })?;
    // GL texture rows start at the bottom
    Ok(image::imageops::flip_vertical(&image.to_rgba8()))
}

impl Texture for GlTexture {
    fn load(&mut self, path: &Path) -> Result<()> {
        let image = decode_rgba8(path)?;
        let (width, height) = image.dimensions();
        self.upload_rgba8(width, height, image.as_raw())?;
        engine_debug!(SOURCE, "Loaded {} ({}x{})", path.display(), width, height);
        Ok(())
    }

    fn handle(&self) -> u32 {
        self.texture.map_or(0, |t| t.0.get())
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }
}

impl Drop for GlTexture {
    fn drop(&mut self) {
        if let Some(texture) = self.texture.take() {
            unsafe { self.gl.delete_texture(texture) };
        }
    }
}

/// Texture handle of any `Texture`
pub(crate) fn native_texture_of(texture: &dyn Texture) -> Option<glow::NativeTexture> {
    NonZeroU32::new(texture.handle()).map(glow::NativeTexture)
}
