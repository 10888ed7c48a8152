//! wgpu device/surface context for a winit window.

use std::sync::Arc;
use wgpu::{Device, Instance, Queue, Surface, SurfaceConfiguration};
use winit::window::Window;

use verse_host::host_info;
use verse_host::versehost::{Error, Result};

/// GPU context holding wgpu instance objects and the window surface
pub struct WgpuContext {
    pub surface: Surface<'static>,
    pub device: Device,
    pub queue: Queue,
    pub config: SurfaceConfiguration,
}

impl WgpuContext {
    /// Create a context for the given window.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InitializationFailed`] when no suitable adapter,
    /// device or surface configuration is available.
    pub async fn new(window: Arc<Window>, enable_validation: bool) -> Result<Self> {
        let flags = if enable_validation {
            wgpu::InstanceFlags::debugging()
        } else {
            wgpu::InstanceFlags::default()
        };
        let instance = Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            flags,
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .map_err(|e| Error::InitializationFailed(format!("create_surface: {}", e)))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| {
                Error::InitializationFailed("no suitable GPU adapter".to_string())
            })?;

        host_info!(
            "versehost::WgpuContext",
            "using GPU: {}",
            adapter.get_info().name
        );

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("verse-host-device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                },
                None,
            )
            .await
            .map_err(|e| Error::InitializationFailed(format!("request_device: {}", e)))?;

        let size = window.inner_size();
        let config = surface
            .get_default_config(&adapter, size.width.max(1), size.height.max(1))
            .ok_or_else(|| {
                Error::InitializationFailed("surface not supported by adapter".to_string())
            })?;

        surface.configure(&device, &config);

        Ok(Self {
            surface,
            device,
            queue,
            config,
        })
    }

    /// Handle window resize
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Current surface texture format
    pub fn format(&self) -> wgpu::TextureFormat {
        self.config.format
    }
}
