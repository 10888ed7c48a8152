/*!
# Verse Host wgpu Renderer

wgpu backend for the verse host.

Implements the core crate's `Renderer`, `RendererBuffer`,
`RendererTexture` and `RendererFrame` traits over wgpu, and registers
itself in the host's renderer plugin registry under the name `"wgpu"`.

## Usage

```no_run
use std::sync::Arc;
use verse_host::versehost::render::{renderer_plugin_registry, RendererConfig};

verse_host_renderer_wgpu::register_plugin();

// later, with a winit window in hand:
// let renderer = renderer_plugin_registry().lock().unwrap().as_ref().unwrap()
//     .create_renderer("wgpu", window, RendererConfig::default())?;
# Ok::<(), verse_host::versehost::Error>(())
```
*/

mod context;
mod frame;
mod pipeline;
mod wgpu_renderer;

pub use frame::WgpuFrame;
pub use wgpu_renderer::{WgpuBuffer, WgpuRenderer, WgpuTexture};

// Main versehost namespace module, mirroring the core crate
pub mod versehost {
    pub use crate::wgpu_renderer::WgpuRenderer;
}

use std::sync::{Arc, Mutex};
use verse_host::versehost::render::{register_renderer_plugin, Renderer};

/// Register the wgpu backend in the global renderer plugin registry
/// under the name `"wgpu"`.
pub fn register_plugin() {
    register_renderer_plugin("wgpu", |window, config| {
        let renderer = WgpuRenderer::new(window, config)?;
        Ok(Arc::new(Mutex::new(renderer)) as Arc<Mutex<dyn Renderer>>)
    });
}
