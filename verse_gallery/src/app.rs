//! The gallery application: one winit window driving the Host.
//!
//! Keyboard surface:
//! - Left/Right  — previous / next verse
//! - Space       — play / pause the scene
//! - T           — toggle the verse text (printed to the console)
//! - F           — toggle fullscreen
//! - Tab         — cycle control-panel focus
//! - Up/Down     — step the focused slider / cycle the focused select
//! - Enter       — press the focused button
//! - Escape      — quit

use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Fullscreen, Window, WindowId};

use verse_host::versehost::content::{ContentStore, PanelInput};
use verse_host::versehost::render::{renderer_plugin_registry, RendererConfig, Viewport};
use verse_host::versehost::{Host, HostConfig};
use verse_host::{host_error, host_info};

use crate::scenes;

const SOURCE: &str = "versegallery::App";

pub struct GalleryApp {
    start_slide: usize,
    content: Option<ContentStore>,
    window: Option<Arc<Window>>,
    host: Option<Host>,
}

impl GalleryApp {
    pub fn new(start_slide: usize, content: ContentStore) -> Self {
        Self {
            start_slide,
            content: Some(content),
            window: None,
            host: None,
        }
    }

    fn print_verse(&self) {
        let Some(host) = &self.host else { return };
        if !host.show_text() {
            return;
        }
        let Some(entry) = host.current_entry() else {
            return;
        };
        host_info!(SOURCE, "— Verse {}: {} —", entry.number, entry.title);
        for line in entry.text.lines() {
            host_info!(SOURCE, "  {}", line);
        }
        host_info!(SOURCE, "  ({})", entry.concepts.accessible);
        for widget in host.panel().widgets() {
            host_info!(SOURCE, "  control: {}", widget.describe());
        }
    }

    fn print_focused_control(&self) {
        let Some(host) = &self.host else { return };
        if let Some(widget) = host.panel().focused() {
            host_info!(SOURCE, "focused: {}", widget.describe());
        }
    }

    fn refresh_title(&self) {
        let (Some(window), Some(host)) = (&self.window, &self.host) else {
            return;
        };
        let paused = if host.is_playing() { "" } else { " [paused]" };
        match host.current_entry() {
            Some(entry) => window.set_title(&format!(
                "Verse Gallery — {} ({}/{}){}",
                entry.title,
                host.current_index() + 1,
                host.slide_count(),
                paused
            )),
            None => window.set_title("Verse Gallery — something went wrong, try another verse"),
        }
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, key_code: KeyCode) {
        let Some(host) = self.host.as_mut() else {
            return;
        };
        match key_code {
            KeyCode::Escape => {
                host_info!(SOURCE, "escape pressed, exiting");
                event_loop.exit();
                return;
            }

            // Navigation (clamped at both ends)
            KeyCode::ArrowRight => {
                if host.navigate(1).is_ok() {
                    self.print_verse();
                }
            }
            KeyCode::ArrowLeft => {
                if host.navigate(-1).is_ok() {
                    self.print_verse();
                }
            }

            // Playback and overlays
            KeyCode::Space => {
                let playing = host.toggle_playing();
                host_info!(SOURCE, "{}", if playing { "playing" } else { "paused" });
            }
            KeyCode::KeyT => {
                if host.toggle_text() {
                    self.print_verse();
                }
            }
            KeyCode::KeyF => {
                if let Some(window) = &self.window {
                    let fullscreen = match window.fullscreen() {
                        Some(_) => None,
                        None => Some(Fullscreen::Borderless(None)),
                    };
                    window.set_fullscreen(fullscreen);
                }
            }

            // Control panel
            KeyCode::Tab => {
                host.panel_input(PanelInput::FocusNext);
                self.print_focused_control();
            }
            KeyCode::ArrowUp => {
                host.panel_input(PanelInput::Increase);
                self.print_focused_control();
            }
            KeyCode::ArrowDown => {
                host.panel_input(PanelInput::Decrease);
                self.print_focused_control();
            }
            KeyCode::Enter => {
                host.panel_input(PanelInput::Activate);
                self.print_focused_control();
            }

            _ => {}
        }
        self.refresh_title();
    }
}

impl ApplicationHandler for GalleryApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = Window::default_attributes()
            .with_title("Verse Gallery")
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));
        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                host_error!(SOURCE, "failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let renderer = {
            let registry = renderer_plugin_registry().lock().unwrap();
            let registry = registry.as_ref().unwrap();
            registry.create_renderer(
                "wgpu",
                window.clone(),
                RendererConfig {
                    app_name: "Verse Gallery".to_string(),
                    ..RendererConfig::default()
                },
            )
        };
        let renderer = match renderer {
            Ok(renderer) => renderer,
            Err(e) => {
                host_error!(SOURCE, "renderer failed: {} — try refreshing", e);
                event_loop.exit();
                return;
            }
        };

        let Some(content) = self.content.take() else {
            return;
        };
        let size = window.inner_size();
        let host = Host::new(
            renderer,
            scenes::registry(),
            content,
            HostConfig {
                initial_slide: self.start_slide,
                viewport: Viewport::with_size(size.width as f32, size.height as f32),
                ..HostConfig::default()
            },
        );
        match host {
            Ok(host) => {
                self.window = Some(window);
                self.host = Some(host);
                self.print_verse();
                self.refresh_title();
            }
            Err(e) => {
                host_error!(SOURCE, "something went wrong starting the gallery: {}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                host_info!(SOURCE, "close requested, exiting");
                event_loop.exit();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state.is_pressed() {
                    if let PhysicalKey::Code(key_code) = event.physical_key {
                        self.handle_key(event_loop, key_code);
                    }
                }
            }
            WindowEvent::Resized(new_size) => {
                if let Some(host) = self.host.as_mut() {
                    host.resize(new_size.width, new_size.height);
                }
            }
            WindowEvent::RedrawRequested => {
                if let Some(host) = self.host.as_mut() {
                    host.frame();
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}
