/// Camera - low-level passive data container.
///
/// The camera stores a view matrix (world to camera space) and a projection
/// matrix. It computes nothing on its own apart from the convenience
/// constructors. The stereo render loop overwrites both matrices per eye and
/// restores them afterwards.

use glam::{Mat4, Vec3};

/// Low-level camera. A passive data container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    view_matrix: Mat4,
    projection_matrix: Mat4,
}

impl Camera {
    /// Create a new camera with the given matrices
    pub fn new(view: Mat4, projection: Mat4) -> Self {
        Self {
            view_matrix: view,
            projection_matrix: projection,
        }
    }

    /// Right-handed perspective camera looking from `eye` at `target`
    pub fn look_at(eye: Vec3, target: Vec3, up: Vec3, fov_y: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self::new(
            Mat4::look_at_rh(eye, target, up),
            Mat4::perspective_rh_gl(fov_y, aspect, near, far),
        )
    }

    // ===== GETTERS =====

    /// View matrix (inverse of the camera's world transform).
    pub fn view_matrix(&self) -> &Mat4 {
        &self.view_matrix
    }

    /// Projection matrix.
    pub fn projection_matrix(&self) -> &Mat4 {
        &self.projection_matrix
    }

    /// Combined view-projection matrix (projection * view).
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix * self.view_matrix
    }

    // ===== SETTERS =====

    /// Set the view matrix.
    pub fn set_view(&mut self, matrix: Mat4) {
        self.view_matrix = matrix;
    }

    /// Set the projection matrix.
    pub fn set_projection(&mut self, matrix: Mat4) {
        self.projection_matrix = matrix;
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Mat4::IDENTITY, Mat4::IDENTITY)
    }
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
