//! Scene module
//!
//! The scene manager is what render contexts draw: a restartable iterator
//! over render items, the active camera and projection matrices, and the
//! active lights.

mod scene_manager;
mod shape;
mod simple_scene_manager;

pub use scene_manager::{SceneManager, RenderItem, Light};
pub use shape::{Shape, Material};
pub use simple_scene_manager::{SimpleSceneManager, NodeId};
