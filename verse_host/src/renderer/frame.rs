/// RendererFrame trait - records one frame of draw commands

use std::any::Any;
use std::sync::Arc;
use glam::Mat4;

use crate::error::Result;
use crate::renderer::{RendererBuffer, RendererTexture};

/// Viewport dimensions and depth range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub min_depth: f32,
    pub max_depth: f32,
}

impl Viewport {
    /// Full-window viewport with the default 0..1 depth range
    pub fn with_size(width: f32, height: f32) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width,
            height,
            min_depth: 0.0,
            max_depth: 1.0,
        }
    }

    /// Width / height, guarded against a degenerate height
    pub fn aspect_ratio(&self) -> f32 {
        if self.height <= 0.0 {
            1.0
        } else {
            self.width / self.height
        }
    }
}

/// How the vertices of a draw call are assembled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveTopology {
    TriangleList,
    LineList,
    PointList,
}

/// One recorded draw: a vertex buffer with its transform and material data.
///
/// The host composes one DrawCall per visible stage node; the backend
/// turns it into pipeline state + a draw command.
#[derive(Clone)]
pub struct DrawCall {
    /// Vertex buffer holding `Vertex` data
    pub vertex_buffer: Arc<dyn RendererBuffer>,
    /// Number of vertices to draw
    pub vertex_count: u32,
    /// Primitive assembly mode
    pub topology: PrimitiveTopology,
    /// Combined model-view-projection matrix
    pub mvp: Mat4,
    /// Flat RGBA color
    pub color: [f32; 4],
    /// Optional sampled texture (untextured draws use a backend default)
    pub texture: Option<Arc<dyn RendererTexture>>,
}

/// Frame recording trait
///
/// Returned by Renderer::begin_frame(), used to record draw commands.
/// Commands are executed when the frame is passed to Renderer::end_frame().
pub trait RendererFrame: Send {
    /// Set the viewport for subsequent draws
    fn set_viewport(&mut self, viewport: Viewport) -> Result<()>;

    /// Record one draw call
    fn draw(&mut self, call: DrawCall) -> Result<()>;

    /// Recover the concrete frame type in the backend's end_frame()
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}
