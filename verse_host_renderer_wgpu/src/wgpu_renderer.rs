//! WgpuRenderer — the Renderer trait implemented over wgpu.
//!
//! Resources decrement shared alive-counters on Drop, which feeds
//! `Renderer::stats()` the same way the core crate's tests observe
//! resource lifetimes. Draws recorded into a `WgpuFrame` are encoded
//! here in `end_frame`: one dynamic-offset uniform block per draw, one
//! render pass per frame.

use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::Arc;

use winit::window::Window;

use verse_host::versehost::render::{
    BufferDesc, BufferUsage, Renderer, RendererBuffer, RendererConfig, RendererFrame,
    RendererStats, RendererTexture, TextureDesc, TextureFormat, TextureInfo, TextureUsage,
};
use verse_host::versehost::{Error, Result};
use verse_host::{host_info, host_warn};

use crate::context::WgpuContext;
use crate::frame::WgpuFrame;
use crate::pipeline::{DrawUniform, FlatPipelines, DEPTH_FORMAT, DRAW_UNIFORM_SIZE};

/// Initial per-frame draw capacity of the uniform buffer
const INITIAL_DRAW_CAPACITY: u32 = 64;

#[derive(Default)]
struct Counters {
    buffers_alive: AtomicU32,
    textures_alive: AtomicU32,
    buffer_bytes: AtomicU64,
}

// ============================================================================
// Resources
// ============================================================================

/// A wgpu-backed vertex/uniform buffer
pub struct WgpuBuffer {
    pub(crate) buffer: wgpu::Buffer,
    size: u64,
    queue: wgpu::Queue,
    counters: Arc<Counters>,
}

impl RendererBuffer for WgpuBuffer {
    fn update(&self, offset: u64, data: &[u8]) -> Result<()> {
        if offset + data.len() as u64 > self.size {
            return Err(Error::InvalidResource(format!(
                "update past end of buffer: offset {} + {} > {}",
                offset,
                data.len(),
                self.size
            )));
        }
        self.queue.write_buffer(&self.buffer, offset, data);
        Ok(())
    }

    fn size(&self) -> u64 {
        self.size
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

impl Drop for WgpuBuffer {
    fn drop(&mut self) {
        self.counters.buffers_alive.fetch_sub(1, Ordering::SeqCst);
        self.counters.buffer_bytes.fetch_sub(self.size, Ordering::SeqCst);
        self.buffer.destroy();
    }
}

/// A wgpu-backed sampled texture
pub struct WgpuTexture {
    pub(crate) view: wgpu::TextureView,
    texture: wgpu::Texture,
    info: TextureInfo,
    counters: Arc<Counters>,
}

impl RendererTexture for WgpuTexture {
    fn info(&self) -> &TextureInfo {
        &self.info
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

impl Drop for WgpuTexture {
    fn drop(&mut self) {
        self.counters.textures_alive.fetch_sub(1, Ordering::SeqCst);
        self.texture.destroy();
    }
}

fn map_texture_format(format: TextureFormat) -> wgpu::TextureFormat {
    match format {
        TextureFormat::R8G8B8A8_SRGB => wgpu::TextureFormat::Rgba8UnormSrgb,
        TextureFormat::R8G8B8A8_UNORM => wgpu::TextureFormat::Rgba8Unorm,
        TextureFormat::D32_FLOAT => wgpu::TextureFormat::Depth32Float,
    }
}

// ============================================================================
// Renderer
// ============================================================================

/// The wgpu backend renderer
pub struct WgpuRenderer {
    ctx: WgpuContext,
    pipelines: FlatPipelines,
    sampler: wgpu::Sampler,
    white_view: wgpu::TextureView,
    depth_view: wgpu::TextureView,
    uniform_buffer: wgpu::Buffer,
    uniform_capacity: u32,
    uniform_stride: u64,
    counters: Arc<Counters>,
    clear_color: wgpu::Color,
    last_draw_calls: u32,
}

impl WgpuRenderer {
    /// Create a renderer for the given window.
    ///
    /// Blocks on adapter/device acquisition; call from the event-loop
    /// thread during `resumed`.
    pub fn new(window: Arc<Window>, config: RendererConfig) -> Result<Self> {
        let ctx = pollster::block_on(WgpuContext::new(window, config.enable_validation))?;

        let pipelines = FlatPipelines::new(&ctx.device, ctx.format());

        let sampler = ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("flat-sampler"),
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let white_view = Self::create_white_texture(&ctx.device, &ctx.queue);
        let depth_view = Self::create_depth(&ctx.device, ctx.config.width, ctx.config.height);

        // Dynamic offsets must be multiples of the device alignment
        let alignment = (ctx.device.limits().min_uniform_buffer_offset_alignment as u64).max(1);
        let uniform_stride = DRAW_UNIFORM_SIZE.div_ceil(alignment) * alignment;
        let uniform_buffer =
            Self::create_uniform_buffer(&ctx.device, uniform_stride, INITIAL_DRAW_CAPACITY);

        host_info!(
            "versehost::WgpuRenderer",
            "renderer ready ({}x{}, {:?})",
            ctx.config.width,
            ctx.config.height,
            ctx.format()
        );

        Ok(Self {
            ctx,
            pipelines,
            sampler,
            white_view,
            depth_view,
            uniform_buffer,
            uniform_capacity: INITIAL_DRAW_CAPACITY,
            uniform_stride,
            counters: Arc::new(Counters::default()),
            clear_color: wgpu::Color {
                r: config.clear_color[0] as f64,
                g: config.clear_color[1] as f64,
                b: config.clear_color[2] as f64,
                a: config.clear_color[3] as f64,
            },
            last_draw_calls: 0,
        })
    }

    fn create_white_texture(device: &wgpu::Device, queue: &wgpu::Queue) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("white-1x1"),
            size: wgpu::Extent3d {
                width: 1,
                height: 1,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        queue.write_texture(
            texture.as_image_copy(),
            &[255u8, 255, 255, 255],
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4),
                rows_per_image: Some(1),
            },
            wgpu::Extent3d {
                width: 1,
                height: 1,
                depth_or_array_layers: 1,
            },
        );
        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    fn create_depth(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth-buffer"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    fn create_uniform_buffer(
        device: &wgpu::Device,
        stride: u64,
        capacity: u32,
    ) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("per-draw-uniforms"),
            size: stride * capacity as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    fn ensure_uniform_capacity(&mut self, draws: u32) {
        if draws <= self.uniform_capacity {
            return;
        }
        let capacity = draws.next_power_of_two();
        self.uniform_buffer =
            Self::create_uniform_buffer(&self.ctx.device, self.uniform_stride, capacity);
        self.uniform_capacity = capacity;
    }
}

impl Renderer for WgpuRenderer {
    fn create_buffer(&mut self, desc: BufferDesc) -> Result<Arc<dyn RendererBuffer>> {
        let usage = match desc.usage {
            BufferUsage::Vertex => wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            BufferUsage::Uniform => wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        };
        let buffer = self.ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene-buffer"),
            size: desc.size,
            usage,
            mapped_at_creation: false,
        });
        self.counters.buffers_alive.fetch_add(1, Ordering::SeqCst);
        self.counters.buffer_bytes.fetch_add(desc.size, Ordering::SeqCst);
        Ok(Arc::new(WgpuBuffer {
            buffer,
            size: desc.size,
            queue: self.ctx.queue.clone(),
            counters: self.counters.clone(),
        }))
    }

    fn create_texture(&mut self, desc: TextureDesc) -> Result<Arc<dyn RendererTexture>> {
        let format = map_texture_format(desc.format);
        let usage = match desc.usage {
            TextureUsage::Sampled => {
                wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST
            }
            TextureUsage::DepthStencil => wgpu::TextureUsages::RENDER_ATTACHMENT,
        };

        let texture = self.ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("scene-texture"),
            size: wgpu::Extent3d {
                width: desc.width.max(1),
                height: desc.height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage,
            view_formats: &[],
        });

        if let Some(data) = &desc.data {
            let expected = desc.width as usize * desc.height as usize * 4;
            if data.len() != expected {
                return Err(Error::InvalidResource(format!(
                    "texture data is {} bytes, expected {}",
                    data.len(),
                    expected
                )));
            }
            self.ctx.queue.write_texture(
                texture.as_image_copy(),
                data,
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(desc.width * 4),
                    rows_per_image: Some(desc.height),
                },
                wgpu::Extent3d {
                    width: desc.width,
                    height: desc.height,
                    depth_or_array_layers: 1,
                },
            );
        }

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        self.counters.textures_alive.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(WgpuTexture {
            view,
            texture,
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
        Ok(Box::new(WgpuFrame::new()))
    }

    fn end_frame(&mut self, frame: Box<dyn RendererFrame>) -> Result<()> {
        let frame = frame
            .into_any()
            .downcast::<WgpuFrame>()
            .map_err(|_| Error::BackendError("foreign frame submitted".to_string()))?;
        let frame = *frame;

        let output = match self.ctx.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                // Reconfigure and drop this frame; the next one recovers
                self.ctx
                    .surface
                    .configure(&self.ctx.device, &self.ctx.config);
                return Ok(());
            }
            Err(e) => {
                return Err(Error::BackendError(format!("surface: {:?}", e)));
            }
        };
        let target = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        // Per-draw uniforms at dynamic offsets
        self.ensure_uniform_capacity(frame.draws.len() as u32);
        for (i, call) in frame.draws.iter().enumerate() {
            let uniform = DrawUniform {
                mvp: call.mvp.to_cols_array_2d(),
                color: call.color,
            };
            self.ctx.queue.write_buffer(
                &self.uniform_buffer,
                i as u64 * self.uniform_stride,
                bytemuck::bytes_of(&uniform),
            );
        }

        // One bind group per draw (texture varies); None marks a draw
        // whose resources came from a different backend
        let bind_groups: Vec<Option<wgpu::BindGroup>> = frame
            .draws
            .iter()
            .map(|call| {
                if call.vertex_buffer.as_any().downcast_ref::<WgpuBuffer>().is_none() {
                    host_warn!("versehost::WgpuRenderer", "draw skipped: foreign buffer");
                    return None;
                }
                let view = match &call.texture {
                    Some(texture) => match texture.as_any().downcast_ref::<WgpuTexture>() {
                        Some(wgpu_texture) => &wgpu_texture.view,
                        None => {
                            host_warn!(
                                "versehost::WgpuRenderer",
                                "draw skipped: foreign texture"
                            );
                            return None;
                        }
                    },
                    None => &self.white_view,
                };
                Some(self.ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some("flat-bind-group"),
                    layout: &self.pipelines.bind_group_layout,
                    entries: &[
                        wgpu::BindGroupEntry {
                            binding: 0,
                            resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                                buffer: &self.uniform_buffer,
                                offset: 0,
                                size: wgpu::BufferSize::new(DRAW_UNIFORM_SIZE),
                            }),
                        },
                        wgpu::BindGroupEntry {
                            binding: 1,
                            resource: wgpu::BindingResource::TextureView(view),
                        },
                        wgpu::BindGroupEntry {
                            binding: 2,
                            resource: wgpu::BindingResource::Sampler(&self.sampler),
                        },
                    ],
                }))
            })
            .collect();

        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame-encoder"),
            });

        let mut drawn = 0;
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("flat-pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            if let Some(viewport) = frame.viewport {
                let width = viewport.width.min(self.ctx.config.width as f32);
                let height = viewport.height.min(self.ctx.config.height as f32);
                if width > 0.0 && height > 0.0 {
                    pass.set_viewport(
                        viewport.x,
                        viewport.y,
                        width,
                        height,
                        viewport.min_depth,
                        viewport.max_depth,
                    );
                }
            }

            for (i, call) in frame.draws.iter().enumerate() {
                let Some(bind_group) = &bind_groups[i] else {
                    continue;
                };
                let Some(buffer) = call.vertex_buffer.as_any().downcast_ref::<WgpuBuffer>()
                else {
                    continue;
                };
                pass.set_pipeline(self.pipelines.for_topology(call.topology));
                pass.set_bind_group(0, bind_group, &[(i as u64 * self.uniform_stride) as u32]);
                pass.set_vertex_buffer(0, buffer.buffer.slice(..));
                pass.draw(0..call.vertex_count, 0..1);
                drawn += 1;
            }
        }

        self.ctx.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        self.last_draw_calls = drawn;
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return; // minimized; keep the old surface and depth buffer
        }
        self.ctx.resize(width, height);
        self.depth_view = Self::create_depth(&self.ctx.device, width, height);
    }

    fn wait_idle(&self) -> Result<()> {
        let _ = self.ctx.device.poll(wgpu::Maintain::Wait);
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
