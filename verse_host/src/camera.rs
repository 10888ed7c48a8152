/// Camera — low-level passive data container.
///
/// The Camera computes nothing beyond the combined view-projection
/// matrix. The Host is responsible for computing and setting all fields
/// from high-level parameters (eye position, field of view, viewport).

use glam::Mat4;

use crate::renderer::Viewport;

/// Low-level camera. A passive data container.
///
/// The caller is responsible for computing and setting all fields.
/// The Host computes view/projection from its viewport and a fixed
/// gallery eye position; scenes never touch the camera directly.
#[derive(Debug, Clone)]
pub struct Camera {
    view_matrix: Mat4,
    projection_matrix: Mat4,
    viewport: Viewport,
}

impl Camera {
    /// Create a new camera with the given parameters.
    pub fn new(view: Mat4, projection: Mat4, viewport: Viewport) -> Self {
        Self {
            view_matrix: view,
            projection_matrix: projection,
            viewport,
        }
    }

    // ===== GETTERS =====

    /// View matrix (inverse of the camera's world transform).
    pub fn view_matrix(&self) -> &Mat4 {
        &self.view_matrix
    }

    /// Projection matrix (perspective or orthographic).
    pub fn projection_matrix(&self) -> &Mat4 {
        &self.projection_matrix
    }

    /// Combined view-projection matrix (projection * view).
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix * self.view_matrix
    }

    /// Viewport dimensions and depth range.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    // ===== SETTERS — store, compute nothing =====

    /// Set the view matrix.
    pub fn set_view(&mut self, matrix: Mat4) {
        self.view_matrix = matrix;
    }

    /// Set the projection matrix.
    pub fn set_projection(&mut self, matrix: Mat4) {
        self.projection_matrix = matrix;
    }

    /// Set the viewport.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
