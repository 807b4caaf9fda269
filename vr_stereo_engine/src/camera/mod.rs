//! Camera module - passive view/projection container used by the scene.

mod camera;

pub use camera::Camera;
