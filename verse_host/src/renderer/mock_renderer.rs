/// Mock Renderer for unit tests (no GPU required)
///
/// This mock renderer allows testing the Host, scenes and stage without
/// requiring a real GPU or graphics backend. Resource structs decrement
/// shared alive-counters on Drop, so tests can assert that scene switches
/// do not leak buffers or textures.

use std::any::Any;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::error::Result;
use crate::host_bail;
use crate::renderer::{
    BufferDesc, BufferUsage, DrawCall, Renderer, RendererBuffer, RendererFrame, RendererStats,
    RendererTexture, TextureDesc, TextureInfo, Viewport,
};

// ============================================================================
// Shared counters
// ============================================================================

/// Alive-resource counters shared between the renderer and its resources
#[derive(Default)]
pub struct MockCounters {
    pub buffers_alive: AtomicU32,
    pub textures_alive: AtomicU32,
    pub buffer_bytes: AtomicU64,
    pub buffers_created: AtomicU32,
    pub textures_created: AtomicU32,
}

// ============================================================================
// Mock Buffer
// ============================================================================

pub struct MockBuffer {
    pub desc: BufferDesc,
    counters: Arc<MockCounters>,
}

impl MockBuffer {
    fn new(desc: BufferDesc, counters: Arc<MockCounters>) -> Self {
        counters.buffers_alive.fetch_add(1, Ordering::SeqCst);
        counters.buffers_created.fetch_add(1, Ordering::SeqCst);
        counters.buffer_bytes.fetch_add(desc.size, Ordering::SeqCst);
        Self { desc, counters }
    }
}

impl RendererBuffer for MockBuffer {
    fn update(&self, offset: u64, data: &[u8]) -> Result<()> {
        if offset + data.len() as u64 > self.desc.size {
            host_bail!(
                "versehost::MockBuffer",
                "update past end of buffer: offset {} + {} > {}",
                offset,
                data.len(),
                self.desc.size
            );
        }
        Ok(())
    }

    fn size(&self) -> u64 {
        self.desc.size
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Drop for MockBuffer {
    fn drop(&mut self) {
        self.counters.buffers_alive.fetch_sub(1, Ordering::SeqCst);
        self.counters
            .buffer_bytes
            .fetch_sub(self.desc.size, Ordering::SeqCst);
    }
}

// ============================================================================
// Mock Texture
// ============================================================================

pub struct MockTexture {
    info: TextureInfo,
    counters: Arc<MockCounters>,
}

impl MockTexture {
    fn new(desc: &TextureDesc, counters: Arc<MockCounters>) -> Self {
        counters.textures_alive.fetch_add(1, Ordering::SeqCst);
        counters.textures_created.fetch_add(1, Ordering::SeqCst);
        Self {
            info: TextureInfo {
                width: desc.width,
                height: desc.height,
                format: desc.format,
                usage: desc.usage,
            },
            counters,
        }
    }
}

impl RendererTexture for MockTexture {
    fn info(&self) -> &TextureInfo {
        &self.info
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Drop for MockTexture {
    fn drop(&mut self) {
        self.counters.textures_alive.fetch_sub(1, Ordering::SeqCst);
    }
}

// ============================================================================
// Mock Frame
// ============================================================================

/// Record of one draw call (enough to assert on, without Arc handles)
#[derive(Debug, Clone, PartialEq)]
pub struct DrawRecord {
    pub vertex_count: u32,
    pub color: [f32; 4],
}

pub struct MockFrame {
    pub commands: Vec<String>,
    pub draws: Vec<DrawRecord>,
    pub viewport: Option<Viewport>,
}

impl MockFrame {
    fn new() -> Self {
        Self {
            commands: Vec::new(),
            draws: Vec::new(),
            viewport: None,
        }
    }
}

impl RendererFrame for MockFrame {
    fn set_viewport(&mut self, viewport: Viewport) -> Result<()> {
        self.commands.push("set_viewport".to_string());
        self.viewport = Some(viewport);
        Ok(())
    }

    fn draw(&mut self, call: DrawCall) -> Result<()> {
        self.commands.push("draw".to_string());
        self.draws.push(DrawRecord {
            vertex_count: call.vertex_count,
            color: call.color,
        });
        Ok(())
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

// ============================================================================
// Mock Renderer
// ============================================================================

pub struct MockRenderer {
    counters: Arc<MockCounters>,
    /// When true, the next create_buffer/create_texture call fails
    pub fail_next_create: Arc<Mutex<bool>>,
    last_draw_calls: u32,
    pub frames_submitted: u32,
}

impl MockRenderer {
    pub fn new() -> Self {
        Self {
            counters: Arc::new(MockCounters::default()),
            fail_next_create: Arc::new(Mutex::new(false)),
            last_draw_calls: 0,
            frames_submitted: 0,
        }
    }

    /// Shared counters, for asserting on alive resources after the
    /// renderer handle itself has been moved into a Host
    pub fn counters(&self) -> Arc<MockCounters> {
        self.counters.clone()
    }

    /// Arm the failure flag (next resource creation returns Err)
    pub fn fail_handle(&self) -> Arc<Mutex<bool>> {
        self.fail_next_create.clone()
    }

    fn take_failure(&self) -> bool {
        let mut flag = self.fail_next_create.lock().unwrap();
        std::mem::take(&mut *flag)
    }
}

impl Renderer for MockRenderer {
    fn create_buffer(&mut self, desc: BufferDesc) -> Result<Arc<dyn RendererBuffer>> {
        if self.take_failure() {
            host_bail!("versehost::MockRenderer", "simulated buffer creation failure");
        }
        Ok(Arc::new(MockBuffer::new(desc, self.counters.clone())))
    }

    fn create_texture(&mut self, desc: TextureDesc) -> Result<Arc<dyn RendererTexture>> {
        if self.take_failure() {
            host_bail!(
                "versehost::MockRenderer",
                "simulated texture creation failure"
            );
        }
        Ok(Arc::new(MockTexture::new(&desc, self.counters.clone())))
    }

    fn begin_frame(&mut self) -> Result<Box<dyn RendererFrame>> {
        Ok(Box::new(MockFrame::new()))
    }

    fn end_frame(&mut self, frame: Box<dyn RendererFrame>) -> Result<()> {
        let frame = frame
            .into_any()
            .downcast::<MockFrame>()
            .map_err(|_| crate::host_err!("versehost::MockRenderer", "foreign frame submitted"))?;
        self.last_draw_calls = frame.draws.len() as u32;
        self.frames_submitted += 1;
        Ok(())
    }

    fn resize(&mut self, _width: u32, _height: u32) {}

    fn wait_idle(&self) -> Result<()> {
        Ok(())
    }

    fn stats(&self) -> RendererStats {
        RendererStats {
            draw_calls: self.last_draw_calls,
            buffers_alive: self.counters.buffers_alive.load(Ordering::SeqCst),
            textures_alive: self.counters.textures_alive.load(Ordering::SeqCst),
            gpu_memory_used: self.counters.buffer_bytes.load(Ordering::SeqCst),
        }
    }
}

/// Convenience: a vertex buffer descriptor of the given byte size
pub fn vertex_buffer_desc(size: u64) -> BufferDesc {
    BufferDesc {
        size,
        usage: BufferUsage::Vertex,
    }
}

#[cfg(test)]
#[path = "mock_renderer_tests.rs"]
mod tests;
