/// Resource-level shader trait.
///
/// A shader is a linked GPU program built from a vertex and a fragment
/// source file. Shaders are created by `RenderContext::make_shader()`.

use std::path::Path;
use crate::error::Result;

/// Shader program trait
pub trait Shader {
    /// Load, compile and link the program from two GLSL source files
    ///
    /// # Errors
    ///
    /// `ShaderLoad` if a file cannot be read or compilation/linking fails.
    /// The previously linked program (if any) stays valid on failure.
    fn load(&mut self, vertex_path: &Path, fragment_path: &Path) -> Result<()>;

    /// Native program handle (0 while not loaded)
    fn program_id(&self) -> u32;
}
