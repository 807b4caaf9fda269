//! Resource abstractions module
//!
//! Renderer-agnostic shader, texture and vertex data types. Render contexts
//! create concrete shaders and textures; vertex data is plain CPU memory
//! uploaded lazily by the backend.

pub mod shader;
pub mod texture;
pub mod vertex_data;

pub use shader::Shader;
pub use texture::Texture;
pub use vertex_data::{VertexData, VertexElement, Semantic, VertexDataId};
