/// Renderer module - the backend seam: resource factory and frame traits

// Module declarations
pub mod renderer;
pub mod buffer;
pub mod texture;
pub mod frame;

#[cfg(test)]
pub mod mock_renderer;

// Re-export everything from renderer.rs
pub use renderer::*;

// Re-export from other modules
pub use buffer::*;
pub use texture::*;
pub use frame::*;
