/// Flat list scene manager.
///
/// Holds a list of nodes (transform + optional shape), a list of lights and a
/// `Camera`. Render items combine the node transform with the shape's local
/// transform.

use glam::Mat4;
use crate::camera::Camera;
use super::{SceneManager, RenderItem, Light, Shape};

/// Node handle returned by `SimpleSceneManager::add_node`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

struct Node {
    transform: Mat4,
    shape: Option<Shape>,
}

/// Flat list scene manager
#[derive(Default)]
pub struct SimpleSceneManager {
    camera: Camera,
    nodes: Vec<Node>,
    lights: Vec<Light>,
}

impl SimpleSceneManager {
    pub fn new(camera: Camera) -> Self {
        Self {
            camera,
            nodes: Vec::new(),
            lights: Vec::new(),
        }
    }

    /// Add a shape at the identity transform
    pub fn add_shape(&mut self, shape: Shape) -> NodeId {
        self.add_node(Mat4::IDENTITY, Some(shape))
    }

    /// Add a node
    pub fn add_node(&mut self, transform: Mat4, shape: Option<Shape>) -> NodeId {
        self.nodes.push(Node { transform, shape });
        NodeId(self.nodes.len() - 1)
    }

    /// Replace a node transform. Returns false for an unknown node.
    pub fn set_node_transform(&mut self, node: NodeId, transform: Mat4) -> bool {
        match self.nodes.get_mut(node.0) {
            Some(n) => {
                n.transform = transform;
                true
            }
            None => false,
        }
    }

    pub fn node_transform(&self, node: NodeId) -> Option<Mat4> {
        self.nodes.get(node.0).map(|n| n.transform)
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

impl SceneManager for SimpleSceneManager {
    fn items(&self) -> Box<dyn Iterator<Item = RenderItem<'_>> + '_> {
        Box::new(self.nodes.iter().map(|node| RenderItem {
            transform: match &node.shape {
                Some(shape) => node.transform * *shape.transform(),
                None => node.transform,
            },
            shape: node.shape.as_ref(),
        }))
    }

    fn lights(&self) -> Box<dyn Iterator<Item = &Light> + '_> {
        Box::new(self.lights.iter())
    }

    fn camera_matrix(&self) -> Mat4 {
        *self.camera.view_matrix()
    }

    fn set_camera_matrix(&mut self, matrix: Mat4) {
        self.camera.set_view(matrix);
    }

    fn projection_matrix(&self) -> Mat4 {
        *self.camera.projection_matrix()
    }

    fn set_projection_matrix(&mut self, matrix: Mat4) {
        self.camera.set_projection(matrix);
    }
}

#[cfg(test)]
#[path = "simple_scene_manager_tests.rs"]
mod tests;
