/// RendererBuffer trait and buffer descriptor

use std::any::Any;

use crate::error::Result;

/// Buffer usage flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferUsage {
    /// Vertex buffer
    Vertex,
    /// Uniform/constant buffer
    Uniform,
}

/// Descriptor for creating a buffer
#[derive(Debug, Clone)]
pub struct BufferDesc {
    /// Size in bytes
    pub size: u64,
    /// Buffer usage
    pub usage: BufferUsage,
}

/// Buffer resource trait
///
/// Implemented by backend-specific buffer types (e.g., WgpuBuffer).
/// The buffer is automatically destroyed when dropped.
pub trait RendererBuffer: Send + Sync {
    /// Update buffer data
    ///
    /// # Arguments
    ///
    /// * `offset` - Offset into the buffer in bytes
    /// * `data` - Data to write
    fn update(&self, offset: u64, data: &[u8]) -> Result<()>;

    /// Size of the buffer in bytes
    fn size(&self) -> u64;

    /// Downcast support: backends recover their concrete buffer type
    /// when recording draws
    fn as_any(&self) -> &dyn Any;
}
