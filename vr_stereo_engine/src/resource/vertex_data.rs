//! CPU-side vertex data.
//!
//! Vertex data is a list of per-vertex attribute arrays (one float array per
//! semantic) plus a triangle index list. Every instance gets a process-unique
//! id so backends can cache their GPU buffers per instance.

use std::sync::atomic::{AtomicU64, Ordering};
use crate::error::Result;
use crate::engine_bail;

static NEXT_VERTEX_DATA_ID: AtomicU64 = AtomicU64::new(1);

/// Unique id of a `VertexData` instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexDataId(pub u64);

/// Meaning of a vertex attribute array
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Semantic {
    Position,
    Normal,
    Color,
    Texcoord,
}

impl Semantic {
    /// Shader input variable name bound to this semantic
    pub fn attribute_name(self) -> &'static str {
        match self {
            Semantic::Position => "position",
            Semantic::Normal => "normal",
            Semantic::Color => "color",
            Semantic::Texcoord => "texcoord",
        }
    }
}

/// One attribute array
#[derive(Debug, Clone, PartialEq)]
pub struct VertexElement {
    semantic: Semantic,
    components: u32,
    data: Vec<f32>,
}

impl VertexElement {
    pub fn semantic(&self) -> Semantic {
        self.semantic
    }

    /// Number of floats per vertex
    pub fn components(&self) -> u32 {
        self.components
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }
}

/// Vertex data: attribute arrays + indices
#[derive(Debug)]
pub struct VertexData {
    id: VertexDataId,
    vertex_count: usize,
    elements: Vec<VertexElement>,
    indices: Vec<u32>,
}

impl VertexData {
    /// Create empty vertex data for `vertex_count` vertices
    pub fn new(vertex_count: usize) -> Self {
        Self {
            id: VertexDataId(NEXT_VERTEX_DATA_ID.fetch_add(1, Ordering::Relaxed)),
            vertex_count,
            elements: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Add an attribute array
    ///
    /// # Errors
    ///
    /// `InvalidResource` if `components` is not 1..=4 or `data` does not hold
    /// exactly `vertex_count * components` floats.
    pub fn add_element(&mut self, data: Vec<f32>, semantic: Semantic, components: u32) -> Result<()> {
        if components == 0 || components > 4 {
            engine_bail!("stereo3d::VertexData",
                "{:?} element has {} components (expected 1..=4)", semantic, components);
        }
        let expected = self.vertex_count * components as usize;
        if data.len() != expected {
            engine_bail!("stereo3d::VertexData",
                "{:?} element has {} floats, expected {}", semantic, data.len(), expected);
        }
        self.elements.push(VertexElement { semantic, components, data });
        Ok(())
    }

    /// Set the triangle index list
    ///
    /// # Errors
    ///
    /// `InvalidResource` if an index is out of range.
    pub fn set_indices(&mut self, indices: Vec<u32>) -> Result<()> {
        if let Some(bad) = indices.iter().find(|&&i| i as usize >= self.vertex_count) {
            engine_bail!("stereo3d::VertexData",
                "Index {} out of range ({} vertices)", bad, self.vertex_count);
        }
        self.indices = indices;
        Ok(())
    }

    pub fn id(&self) -> VertexDataId {
        self.id
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    pub fn elements(&self) -> &[VertexElement] {
        &self.elements
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }
}

#[cfg(test)]
#[path = "vertex_data_tests.rs"]
mod tests;
