/// GlShader - OpenGL implementation of the Shader trait

use std::num::NonZeroU32;
use std::path::Path;
use std::rc::Rc;

use glow::HasContext;
use vr_stereo_engine::stereo3d::resource::{Semantic, Shader};
use vr_stereo_engine::stereo3d::{Error, Result};
use vr_stereo_engine::{engine_debug, engine_err};

const SOURCE: &str = "stereo3d::gl::Shader";

/// Vertex semantics in attribute location order
pub const ATTRIBUTE_SEMANTICS: [Semantic; 4] = [
    Semantic::Position,
    Semantic::Normal,
    Semantic::Color,
    Semantic::Texcoord,
];

/// Fixed attribute location of a semantic
///
/// Locations are bound before linking, so vertex arrays work with every
/// program.
pub fn attribute_location(semantic: Semantic) -> u32 {
    match semantic {
        Semantic::Position => 0,
        Semantic::Normal => 1,
        Semantic::Color => 2,
        Semantic::Texcoord => 3,
    }
}

/// OpenGL shader program
pub struct GlShader {
    gl: Rc<glow::Context>,
    program: Option<glow::NativeProgram>,
}

impl GlShader {
    pub fn new(gl: Rc<glow::Context>) -> Self {
        Self { gl, program: None }
    }

    /// Compile and link from in-memory GLSL sources
    pub fn load_sources(&mut self, vertex_source: &str, fragment_source: &str) -> Result<()> {
        let program = unsafe { self.link(vertex_source, fragment_source)? };
        if let Some(old) = self.program.replace(program) {
            unsafe { self.gl.delete_program(old) };
        }
        engine_debug!(SOURCE, "Linked program {}", program.0.get());
        Ok(())
    }

    /// Linked program (None while not loaded)
    pub fn program(&self) -> Option<glow::NativeProgram> {
        self.program
    }

    unsafe fn compile(&self, kind: u32, source: &str) -> Result<glow::NativeShader> {
        let shader = self.gl.create_shader(kind).map_err(|msg| {
            engine_err!(Error::ShaderLoad, SOURCE, "glCreateShader failed: {}", msg)
        })?;
        self.gl.shader_source(shader, source);
        self.gl.compile_shader(shader);
        if !self.gl.get_shader_compile_status(shader) {
            let log = self.gl.get_shader_info_log(shader);
            self.gl.delete_shader(shader);
            let stage = if kind == glow::VERTEX_SHADER { "vertex" } else { "fragment" };
            return Err(engine_err!(Error::ShaderLoad, SOURCE, "{} shader compilation failed: {}", stage, log));
        }
        Ok(shader)
    }

    unsafe fn link(&self, vertex_source: &str, fragment_source: &str) -> Result<glow::NativeProgram> {
        let vertex = self.compile(glow::VERTEX_SHADER, vertex_source)?;
        let fragment = match self.compile(glow::FRAGMENT_SHADER, fragment_source) {
            Ok(fragment) => fragment,
            Err(err) => {
                self.gl.delete_shader(vertex);
                return Err(err);
            }
        };

        let program = match self.gl.create_program() {
            Ok(program) => program,
            Err(msg) => {
                self.gl.delete_shader(vertex);
                self.gl.delete_shader(fragment);
                return Err(engine_err!(Error::ShaderLoad, SOURCE, "glCreateProgram failed: {}", msg));
            }
        };

        self.gl.attach_shader(program, vertex);
        self.gl.attach_shader(program, fragment);
        for semantic in ATTRIBUTE_SEMANTICS {
            self.gl.bind_attrib_location(program, attribute_location(semantic), semantic.attribute_name());
        }
        self.gl.link_program(program);

        self.gl.detach_shader(program, vertex);
        self.gl.detach_shader(program, fragment);
        self.gl.delete_shader(vertex);
        self.gl.delete_shader(fragment);

        if !self.gl.get_program_link_status(program) {
            let log = self.gl.get_program_info_log(program);
            self.gl.delete_program(program);
            return Err(engine_err!(Error::ShaderLoad, SOURCE, "Program link failed: {}", log));
        }
        Ok(program)
    }
}

fn read_source(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|err| {
        engine_err!(Error::ShaderLoad, SOURCE, "Cannot read {}: {}", path.display(), err)
    })
}

impl Shader for GlShader {
    fn load(&mut self, vertex_path: &Path, fragment_path: &Path) -> Result<()> {
        let vertex_source = read_source(vertex_path)?;
        let fragment_source = read_source(fragment_path)?;
        self.load_sources(&vertex_source, &fragment_source)
    }

    fn program_id(&self) -> u32 {
        self.program.map_or(0, |p| p.0.get())
    }
}

impl Drop for GlShader {
    fn drop(&mut self) {
        if let Some(program) = self.program.take() {
            unsafe { self.gl.delete_program(program) };
        }
    }
}

/// Program handle of any `Shader`
pub(crate) fn native_program(shader: &dyn Shader) -> Option<glow::NativeProgram> {
    NonZeroU32::new(shader.program_id()).map(glow::NativeProgram)
}
