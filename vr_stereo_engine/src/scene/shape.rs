//! Shapes and materials.

use std::rc::Rc;
use glam::Mat4;
use crate::resource::{Shader, Texture, VertexData};

/// Surface appearance of a shape
#[derive(Clone)]
pub struct Material {
    /// Program used for the shape (the context's active program if `None`)
    pub shader: Option<Rc<dyn Shader>>,
    /// Diffuse texture bound to unit 0
    pub texture: Option<Rc<dyn Texture>>,
    /// Specular exponent
    pub shininess: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            shader: None,
            texture: None,
            shininess: 1.0,
        }
    }
}

/// Geometry + material + local transform
#[derive(Clone)]
pub struct Shape {
    vertex_data: Rc<VertexData>,
    material: Option<Material>,
    transform: Mat4,
}

impl Shape {
    /// Create a shape with identity transform and no material
    pub fn new(vertex_data: Rc<VertexData>) -> Self {
        Self {
            vertex_data,
            material: None,
            transform: Mat4::IDENTITY,
        }
    }

    pub fn vertex_data(&self) -> &Rc<VertexData> {
        &self.vertex_data
    }

    pub fn material(&self) -> Option<&Material> {
        self.material.as_ref()
    }

    pub fn set_material(&mut self, material: Option<Material>) {
        self.material = material;
    }

    /// Local transform (applied after the owning node transform)
    pub fn transform(&self) -> &Mat4 {
        &self.transform
    }

    pub fn set_transform(&mut self, transform: Mat4) {
        self.transform = transform;
    }
}
