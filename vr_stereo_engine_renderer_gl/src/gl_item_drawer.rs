/// GlItemDrawer - draws render items with OpenGL
///
/// Per item: select the program (material shader, else the active shader,
/// else the built-in default), upload the vertex data on first use, set the
/// material and transform uniforms and issue one indexed draw call.
///
/// Uploaded vertex arrays are keyed by vertex data id and hold a weak
/// reference to their owner. `prune_vertex_arrays` frees the GPU buffers of
/// vertex data that has been dropped.
///
/// Uniforms: `modelview`, `projection`, `shininess`, `myTexture` (unit 0),
/// `lightDirection[i]` (w = 0) and `nLights`. Uniforms missing from the
/// program are skipped.

use std::rc::{Rc, Weak};

use glow::HasContext;
use rustc_hash::FxHashMap;
use glam::Mat4;
use vr_stereo_engine::stereo3d::resource::{Shader, VertexData, VertexDataId};
use vr_stereo_engine::stereo3d::scene::RenderItem;
use vr_stereo_engine::stereo3d::vr::{DrawContext, ItemDrawer};
use vr_stereo_engine::stereo3d::{Error, Result};
use vr_stereo_engine::engine_err;

use crate::gl_shader::{native_program, GlShader};
use crate::gl_texture::native_texture_of;
use crate::gl_vertex_array::GlVertexArray;

const SOURCE: &str = "stereo3d::gl::ItemDrawer";

const DEFAULT_VERTEX_SHADER: &str = include_str!("../shaders/default.vert");
const DEFAULT_FRAGMENT_SHADER: &str = include_str!("../shaders/default.frag");

type VertexArrayCache<V> = FxHashMap<VertexDataId, (Weak<VertexData>, V)>;

/// Remove entries whose vertex data is gone, returning how many were removed
fn retain_live<V>(cache: &mut VertexArrayCache<V>) -> usize {
    let before = cache.len();
    cache.retain(|_, (owner, _)| owner.strong_count() > 0);
    before - cache.len()
}

/// OpenGL item drawer
pub struct GlItemDrawer {
    gl: Rc<glow::Context>,
    default_shader: GlShader,
    active_shader: Option<Rc<dyn Shader>>,
    vertex_arrays: VertexArrayCache<GlVertexArray>,
}

impl GlItemDrawer {
    /// Create the drawer and compile the default shader
    pub fn new(gl: Rc<glow::Context>) -> Result<Self> {
        let mut default_shader = GlShader::new(Rc::clone(&gl));
        default_shader.load_sources(DEFAULT_VERTEX_SHADER, DEFAULT_FRAGMENT_SHADER)?;
        Ok(Self {
            gl,
            default_shader,
            active_shader: None,
            vertex_arrays: FxHashMap::default(),
        })
    }

    /// Use `shader` for items without a material shader
    pub fn use_shader(&mut self, shader: Rc<dyn Shader>) {
        self.active_shader = Some(shader);
    }

    pub fn use_default_shader(&mut self) {
        self.active_shader = None;
    }

    /// Number of uploaded vertex arrays
    pub fn cached_vertex_arrays(&self) -> usize {
        self.vertex_arrays.len()
    }

    /// Drop every uploaded vertex array
    pub fn clear_cache(&mut self) {
        self.vertex_arrays.clear();
    }

    /// Free the vertex arrays of dropped vertex data
    pub fn prune_vertex_arrays(&mut self) -> usize {
        let removed = retain_live(&mut self.vertex_arrays);
        if removed > 0 {
            vr_stereo_engine::engine_debug!(SOURCE, "Released {} unused vertex arrays", removed);
        }
        removed
    }

    fn program_for(&self, item: &RenderItem<'_>) -> Option<glow::NativeProgram> {
        let material_shader = item
            .shape
            .and_then(|shape| shape.material())
            .and_then(|material| material.shader.as_deref());

        material_shader
            .or(self.active_shader.as_deref())
            .and_then(|shader| native_program(shader))
            .or_else(|| self.default_shader.program())
    }

    unsafe fn set_matrix(&self, program: glow::NativeProgram, name: &str, matrix: &Mat4) {
        let location = self.gl.get_uniform_location(program, name);
        self.gl.uniform_matrix_4_f32_slice(location.as_ref(), false, &matrix.to_cols_array());
    }
}

impl ItemDrawer for GlItemDrawer {
    fn draw(&mut self, item: &RenderItem<'_>, context: &DrawContext<'_>) -> Result<()> {
        let Some(shape) = item.shape else {
            return Ok(());
        };
        let program = self.program_for(item).ok_or_else(|| {
            engine_err!(Error::InvalidResource, SOURCE, "No linked shader program to draw with")
        })?;

        let vertex_data = shape.vertex_data();
        if !self.vertex_arrays.contains_key(&vertex_data.id()) {
            let vertex_array = GlVertexArray::upload(Rc::clone(&self.gl), vertex_data)?;
            self.vertex_arrays.insert(vertex_data.id(), (Rc::downgrade(vertex_data), vertex_array));
        }

        unsafe {
            self.gl.use_program(Some(program));

            if let Some(material) = shape.material() {
                let shininess = self.gl.get_uniform_location(program, "shininess");
                self.gl.uniform_1_f32(shininess.as_ref(), material.shininess);

                if let Some(texture) = material.texture.as_deref().and_then(|texture| native_texture_of(texture)) {
                    self.gl.active_texture(glow::TEXTURE0);
                    self.gl.bind_texture(glow::TEXTURE_2D, Some(texture));
                    let sampler = self.gl.get_uniform_location(program, "myTexture");
                    self.gl.uniform_1_i32(sampler.as_ref(), 0);
                }
            }

            for (i, light) in context.lights.iter().enumerate() {
                let location = self.gl.get_uniform_location(program, &format!("lightDirection[{}]", i));
                let d = light.direction;
                self.gl.uniform_4_f32(location.as_ref(), d.x, d.y, d.z, 0.0);
            }
            let light_count = self.gl.get_uniform_location(program, "nLights");
            self.gl.uniform_1_i32(light_count.as_ref(), context.lights.len() as i32);

            self.set_matrix(program, "modelview", &(context.camera * item.transform));
            self.set_matrix(program, "projection", &context.projection);
        }

        if let Some((_, vertex_array)) = self.vertex_arrays.get(&vertex_data.id()) {
            vertex_array.draw();
        }

        if shape.material().and_then(|m| m.texture.as_ref()).is_some() {
            unsafe { self.gl.bind_texture(glow::TEXTURE_2D, None) };
        }
        Ok(())
    }
}
