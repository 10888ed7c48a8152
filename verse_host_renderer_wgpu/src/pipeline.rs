//! Flat-color draw pipelines.
//!
//! One shader, three pipelines (triangles, lines, points) sharing a
//! single bind group layout: a dynamic-offset uniform block per draw
//! (MVP + color) plus a sampled texture and sampler. Untextured draws
//! bind a 1x1 white texture, making the texture a pure tint source.

use std::mem;

use bytemuck::{Pod, Zeroable};
use wgpu::{BindGroupLayout, Device, RenderPipeline, TextureFormat};

use verse_host::versehost::render::PrimitiveTopology;

const SHADER: &str = r#"
struct DrawUniform {
    mvp: mat4x4<f32>,
    color: vec4<f32>,
};

@group(0) @binding(0) var<uniform> draw_data: DrawUniform;
@group(0) @binding(1) var base_texture: texture_2d<f32>;
@group(0) @binding(2) var base_sampler: sampler;

struct VertexOutput {
    @builtin(position) position: vec4<f32>,
    @location(0) uv: vec2<f32>,
};

@vertex
fn vs_main(@location(0) position: vec3<f32>) -> VertexOutput {
    var out: VertexOutput;
    out.position = draw_data.mvp * vec4<f32>(position, 1.0);
    out.uv = position.xy * 0.5 + vec2<f32>(0.5, 0.5);
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return draw_data.color * textureSample(base_texture, base_sampler, in.uv);
}
"#;

/// Per-draw uniform block. Written at dynamic offsets into one buffer.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub(crate) struct DrawUniform {
    pub mvp: [[f32; 4]; 4],
    pub color: [f32; 4],
}

pub(crate) const DRAW_UNIFORM_SIZE: u64 = mem::size_of::<DrawUniform>() as u64;

/// Depth buffer format used by every pipeline
pub(crate) const DEPTH_FORMAT: TextureFormat = TextureFormat::Depth32Float;

/// The shared pipelines and bind group layout
pub(crate) struct FlatPipelines {
    pub bind_group_layout: BindGroupLayout,
    triangles: RenderPipeline,
    lines: RenderPipeline,
    points: RenderPipeline,
}

impl FlatPipelines {
    pub fn new(device: &Device, surface_format: TextureFormat) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("flat-shader"),
            source: wgpu::ShaderSource::Wgsl(SHADER.into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("flat-bind-group-layout"),
            entries: &[
                // Per-draw uniform block at a dynamic offset
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: true,
                        min_binding_size: wgpu::BufferSize::new(DRAW_UNIFORM_SIZE),
                    },
                    count: None,
                },
                // Sampled texture (white 1x1 for untextured draws)
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("flat-pipeline-layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let build = |topology: wgpu::PrimitiveTopology, label: &str| {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[wgpu::VertexBufferLayout {
                        array_stride: 12,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &[wgpu::VertexAttribute {
                            format: wgpu::VertexFormat::Float32x3,
                            offset: 0,
                            shader_location: 0,
                        }],
                    }],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: surface_format,
                        blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: None,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: DEPTH_FORMAT,
                    depth_write_enabled: true,
                    depth_compare: wgpu::CompareFunction::Less,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            })
        };

        Self {
            bind_group_layout,
            triangles: build(wgpu::PrimitiveTopology::TriangleList, "flat-triangles"),
            lines: build(wgpu::PrimitiveTopology::LineList, "flat-lines"),
            points: build(wgpu::PrimitiveTopology::PointList, "flat-points"),
        }
    }

    /// Pipeline for a draw call's topology
    pub fn for_topology(&self, topology: PrimitiveTopology) -> &RenderPipeline {
        match topology {
            PrimitiveTopology::TriangleList => &self.triangles,
            PrimitiveTopology::LineList => &self.lines,
            PrimitiveTopology::PointList => &self.points,
        }
    }
}
