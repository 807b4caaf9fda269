//! Scene manager trait.

use glam::{Mat4, Vec3};
use super::Shape;

/// A render item: world transform plus optional shape
///
/// Items without a shape (grouping nodes, cameras, ...) are skipped by the
/// render contexts.
#[derive(Clone, Copy)]
pub struct RenderItem<'a> {
    /// Object to world transform
    pub transform: Mat4,
    /// Renderable shape, if any
    pub shape: Option<&'a Shape>,
}

/// Directional light
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    /// Direction the light travels, in world space
    pub direction: Vec3,
}

impl Light {
    pub fn directional(direction: Vec3) -> Self {
        Self { direction }
    }
}

/// Scene manager trait
///
/// `items()` and `lights()` return fresh iterators on every call, so a frame
/// can traverse the scene once per eye.
pub trait SceneManager {
    /// Iterate over all render items
    fn items(&self) -> Box<dyn Iterator<Item = RenderItem<'_>> + '_>;

    /// Iterate over all active lights
    fn lights(&self) -> Box<dyn Iterator<Item = &Light> + '_>;

    /// Active camera (view) matrix
    fn camera_matrix(&self) -> Mat4;

    /// Replace the active camera (view) matrix
    fn set_camera_matrix(&mut self, matrix: Mat4);

    /// Active projection matrix
    fn projection_matrix(&self) -> Mat4;

    /// Replace the active projection matrix
    fn set_projection_matrix(&mut self, matrix: Mat4);
}
