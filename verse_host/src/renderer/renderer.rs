/// Renderer trait - main rendering factory interface

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use winit::window::Window;

use crate::error::{Error, Result};
use crate::renderer::{
    BufferDesc, RendererBuffer, RendererFrame, RendererTexture, TextureDesc,
};

/// Renderer configuration
#[derive(Debug, Clone)]
pub struct RendererConfig {
    /// Enable validation/debug layers
    pub enable_validation: bool,
    /// Application name
    pub app_name: String,
    /// Clear color for the frame background (RGBA)
    pub clear_color: [f32; 4],
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            enable_validation: cfg!(debug_assertions),
            app_name: "Verse Host Application".to_string(),
            clear_color: [0.02, 0.02, 0.04, 1.0],
        }
    }
}

/// Renderer statistics
///
/// `buffers_alive`/`textures_alive` count resources that have been created
/// and not yet dropped; the host's leak regression tests watch these.
#[derive(Debug, Clone, Copy, Default)]
pub struct RendererStats {
    /// Number of draw calls in the last submitted frame
    pub draw_calls: u32,
    /// Buffers currently alive
    pub buffers_alive: u32,
    /// Textures currently alive
    pub textures_alive: u32,
    /// GPU memory used by alive buffers (bytes)
    pub gpu_memory_used: u64,
}

// ============================================================================
// Renderer trait
// ============================================================================

/// Main renderer trait
///
/// This is the central factory interface for creating GPU resources and
/// submitting frames. Implemented by backend-specific renderers
/// (e.g., WgpuRenderer).
pub trait Renderer: Send + Sync {
    /// Create a buffer
    ///
    /// # Arguments
    ///
    /// * `desc` - Buffer descriptor
    ///
    /// # Returns
    ///
    /// A shared pointer to the created buffer
    fn create_buffer(&mut self, desc: BufferDesc) -> Result<Arc<dyn RendererBuffer>>;

    /// Create a texture
    ///
    /// # Arguments
    ///
    /// * `desc` - Texture descriptor
    ///
    /// # Returns
    ///
    /// A shared pointer to the created texture
    fn create_texture(&mut self, desc: TextureDesc) -> Result<Arc<dyn RendererTexture>>;

    /// Begin a new frame
    ///
    /// # Returns
    ///
    /// A frame object for recording draw commands
    fn begin_frame(&mut self) -> Result<Box<dyn RendererFrame>>;

    /// End the current frame and present to screen
    ///
    /// # Arguments
    ///
    /// * `frame` - The frame to submit
    fn end_frame(&mut self, frame: Box<dyn RendererFrame>) -> Result<()>;

    /// Notify renderer that the window has been resized
    ///
    /// # Arguments
    ///
    /// * `width` - New window width
    /// * `height` - New window height
    fn resize(&mut self, width: u32, height: u32);

    /// Wait for all GPU operations to complete
    fn wait_idle(&self) -> Result<()>;

    /// Get statistics about the renderer
    fn stats(&self) -> RendererStats;
}

// ============================================================================
// Plugin system for registering renderer backends
// ============================================================================

/// Renderer plugin factory function type
type RendererPluginFactory =
    Box<dyn Fn(Arc<Window>, RendererConfig) -> Result<Arc<Mutex<dyn Renderer>>> + Send + Sync>;

/// Plugin registry for renderer backends
pub struct RendererPluginRegistry {
    plugins: HashMap<&'static str, RendererPluginFactory>,
}

impl RendererPluginRegistry {
    /// Create a new plugin registry
    fn new() -> Self {
        Self {
            plugins: HashMap::new(),
        }
    }

    /// Register a plugin
    ///
    /// # Arguments
    ///
    /// * `name` - Plugin name (e.g., "wgpu")
    /// * `factory` - Factory function to create the plugin
    pub fn register_plugin<F>(&mut self, name: &'static str, factory: F)
    where
        F: Fn(Arc<Window>, RendererConfig) -> Result<Arc<Mutex<dyn Renderer>>>
            + Send
            + Sync
            + 'static,
    {
        self.plugins.insert(name, Box::new(factory));
    }

    /// Whether a plugin with the given name is registered
    pub fn has_plugin(&self, name: &str) -> bool {
        self.plugins.contains_key(name)
    }

    /// Names of all registered plugins
    pub fn plugin_names(&self) -> Vec<&'static str> {
        self.plugins.keys().copied().collect()
    }

    /// Create a renderer using a registered plugin
    ///
    /// # Arguments
    ///
    /// * `plugin_name` - Name of the plugin to use
    /// * `window` - Window to render to
    /// * `config` - Renderer configuration
    ///
    /// # Returns
    ///
    /// A shared, thread-safe renderer instance
    pub fn create_renderer(
        &self,
        plugin_name: &str,
        window: Arc<Window>,
        config: RendererConfig,
    ) -> Result<Arc<Mutex<dyn Renderer>>> {
        self.plugins
            .get(plugin_name)
            .ok_or_else(|| {
                Error::InitializationFailed(format!("Plugin '{}' not found", plugin_name))
            })?(window, config)
    }
}

static RENDERER_REGISTRY: Mutex<Option<RendererPluginRegistry>> = Mutex::new(None);

/// Get the global renderer plugin registry
pub fn renderer_plugin_registry() -> &'static Mutex<Option<RendererPluginRegistry>> {
    // Initialize on first access
    let mut registry = RENDERER_REGISTRY.lock().unwrap();
    if registry.is_none() {
        *registry = Some(RendererPluginRegistry::new());
    }
    drop(registry);
    &RENDERER_REGISTRY
}

/// Register a renderer plugin in the global registry
///
/// # Arguments
///
/// * `name` - Plugin name
/// * `factory` - Factory function
pub fn register_renderer_plugin<F>(name: &'static str, factory: F)
where
    F: Fn(Arc<Window>, RendererConfig) -> Result<Arc<Mutex<dyn Renderer>>>
        + Send
        + Sync
        + 'static,
{
    renderer_plugin_registry()
        .lock()
        .unwrap()
        .as_mut()
        .unwrap()
        .register_plugin(name, factory);
}

#[cfg(test)]
#[path = "renderer_tests.rs"]
mod tests;
