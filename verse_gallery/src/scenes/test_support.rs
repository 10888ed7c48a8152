//! Test doubles for scene tests: a headless renderer and a context
//! builder, so every scene can be activated, driven and disposed
//! without a window or GPU.

use std::any::Any;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use verse_host::versehost::content::{Concepts, SlideEntry};
use verse_host::versehost::render::{
    BufferDesc, DrawCall, Renderer, RendererBuffer, RendererFrame, RendererStats,
    RendererTexture, TextureDesc, TextureInfo, Viewport,
};
use verse_host::versehost::{Error, Result};

#[derive(Default)]
pub struct NullCounters {
    pub buffers_alive: AtomicU32,
    pub textures_alive: AtomicU32,
}

pub struct NullBuffer {
    size: u64,
    counters: Arc<NullCounters>,
}

impl RendererBuffer for NullBuffer {
    fn update(&self, offset: u64, data: &[u8]) -> Result<()> {
        if offset + data.len() as u64 > self.size {
            return Err(Error::InvalidResource("update past end of buffer".to_string()));
        }
        Ok(())
    }

    fn size(&self) -> u64 {
        self.size
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Drop for NullBuffer {
    fn drop(&mut self) {
        self.counters.buffers_alive.fetch_sub(1, Ordering::SeqCst);
    }
}

pub struct NullTexture {
    info: TextureInfo,
    counters: Arc<NullCounters>,
}

impl RendererTexture for NullTexture {
    fn info(&self) -> &TextureInfo {
        &self.info
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Drop for NullTexture {
    fn drop(&mut self) {
        self.counters.textures_alive.fetch_sub(1, Ordering::SeqCst);
    }
}

struct NullFrame;

impl RendererFrame for NullFrame {
    fn set_viewport(&mut self, _viewport: Viewport) -> Result<()> {
        Ok(())
    }

    fn draw(&mut self, _call: DrawCall) -> Result<()> {
        Ok(())
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

pub struct NullRenderer {
    counters: Arc<NullCounters>,
}

impl NullRenderer {
    pub fn new() -> Self {
        Self {
            counters: Arc::new(NullCounters::default()),
        }
    }

    pub fn counters(&self) -> Arc<NullCounters> {
        self.counters.clone()
    }

    pub fn shared() -> (Arc<Mutex<dyn Renderer>>, Arc<NullCounters>) {
        let renderer = Self::new();
        let counters = renderer.counters();
        (Arc::new(Mutex::new(renderer)), counters)
    }
}

impl Renderer for NullRenderer {
    fn create_buffer(&mut self, desc: BufferDesc) -> Result<Arc<dyn RendererBuffer>> {
        self.counters.buffers_alive.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(NullBuffer {
            size: desc.size,
            counters: self.counters.clone(),
        }))
    }

    fn create_texture(&mut self, desc: TextureDesc) -> Result<Arc<dyn RendererTexture>> {
        self.counters.textures_alive.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(NullTexture {
            info: TextureInfo {
                width: desc.width,
                height: desc.height,
                format: desc.format,
                usage: desc.usage,
            },
            counters: self.counters.clone(),
        }))
    }

    fn begin_frame(&mut self) -> Result<Box<dyn RendererFrame>> {
        Ok(Box::new(NullFrame))
    }

    fn end_frame(&mut self, _frame: Box<dyn RendererFrame>) -> Result<()> {
        Ok(())
    }

    fn resize(&mut self, _width: u32, _height: u32) {}

    fn wait_idle(&self) -> Result<()> {
        Ok(())
    }

    fn stats(&self) -> RendererStats {
        RendererStats {
            draw_calls: 0,
            buffers_alive: self.counters.buffers_alive.load(Ordering::SeqCst),
            textures_alive: self.counters.textures_alive.load(Ordering::SeqCst),
            gpu_memory_used: 0,
        }
    }
}

/// A slide entry good enough for any scene's activate()
pub fn test_entry(number: u32) -> SlideEntry {
    SlideEntry {
        number,
        title: format!("Verse {}", number),
        text: "test verse".to_string(),
        concepts: Concepts {
            primary: "p".to_string(),
            secondary: "s".to_string(),
            accessible: "a".to_string(),
        },
        controls: Vec::new(),
    }
}
