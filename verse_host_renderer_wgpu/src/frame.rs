//! Frame recording: draws are collected CPU-side and encoded in
//! `WgpuRenderer::end_frame`.

use std::any::Any;

use verse_host::versehost::render::{DrawCall, RendererFrame, Viewport};
use verse_host::versehost::Result;

/// A recorded frame: viewport + ordered draw list
pub struct WgpuFrame {
    pub(crate) viewport: Option<Viewport>,
    pub(crate) draws: Vec<DrawCall>,
}

impl WgpuFrame {
    pub(crate) fn new() -> Self {
        Self {
            viewport: None,
            draws: Vec::new(),
        }
    }
}

impl RendererFrame for WgpuFrame {
    fn set_viewport(&mut self, viewport: Viewport) -> Result<()> {
        self.viewport = Some(viewport);
        Ok(())
    }

    fn draw(&mut self, call: DrawCall) -> Result<()> {
        self.draws.push(call);
        Ok(())
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}
