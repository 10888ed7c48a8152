//! Verse Gallery — verses of the Tao Te Ching paired with animated
//! scenes.
//!
//! Usage: `verse_gallery [start_slide]` — the optional argument selects
//! the verse shown first (clamped into range, read once at startup).

mod app;
mod scenes;

use verse_host::host_error;
use verse_host::versehost::content::ContentStore;
use winit::event_loop::{ControlFlow, EventLoop};

use app::GalleryApp;

fn main() {
    let start_slide = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(0);

    let content = match ContentStore::from_ron(include_str!("../assets/verses.ron")) {
        Ok(content) => content,
        Err(e) => {
            host_error!("versegallery::main", "verse content failed to load: {}", e);
            std::process::exit(1);
        }
    };

    verse_host_renderer_wgpu::register_plugin();

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            host_error!("versegallery::main", "event loop failed: {}", e);
            std::process::exit(1);
        }
    };
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut gallery = GalleryApp::new(start_slide, content);
    if let Err(e) = event_loop.run_app(&mut gallery) {
        host_error!("versegallery::main", "event loop error: {}", e);
        std::process::exit(1);
    }
}
