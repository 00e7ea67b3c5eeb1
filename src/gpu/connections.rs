//! Connection line rendering.
//!
//! Segments computed by the field's pairwise pass are streamed as instances
//! and expanded into screen-space quads in the vertex shader, each carrying
//! its own width and alpha.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::field::Connection;

/// Per-instance line segment data.
#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
pub(crate) struct ConnectionInstance {
    start: [f32; 2],
    end: [f32; 2],
    alpha: f32,
    width: f32,
}

impl From<&Connection> for ConnectionInstance {
    fn from(connection: &Connection) -> Self {
        Self {
            start: connection.start.to_array(),
            end: connection.end.to_array(),
            alpha: connection.alpha,
            width: connection.width,
        }
    }
}

/// Stroke color for every connection line.
#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct LineParams {
    color: [f32; 3],
    _pad: f32,
}

/// GPU resources for connection rendering.
pub(crate) struct ConnectionState {
    buffer: wgpu::Buffer,
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    capacity: u32,
}

impl ConnectionState {
    /// Create the line pipeline and an instance buffer sized for the field.
    ///
    /// Eight segments per particle is ample for the densities this effect
    /// runs at; frames that somehow exceed it drop the excess lines.
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        uniform_buffer: &wgpu::Buffer,
        color: Vec3,
        particle_capacity: u32,
        surface_format: wgpu::TextureFormat,
    ) -> Self {
        let capacity = particle_capacity.max(1) * 8;

        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Connection Instance Buffer"),
            size: (capacity as u64) * std::mem::size_of::<ConnectionInstance>() as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let params = LineParams {
            color: color.to_array(),
            _pad: 0.0,
        };
        let params_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Connection Params Buffer"),
            size: std::mem::size_of::<LineParams>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        queue.write_buffer(&params_buffer, 0, bytemuck::bytes_of(&params));

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Connection Bind Group Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Connection Bind Group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: params_buffer.as_entire_binding(),
                },
            ],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Connection Shader"),
            source: wgpu::ShaderSource::Wgsl(LINE_SHADER.into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Connection Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Connection Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<ConnectionInstance>()
                        as wgpu::BufferAddress,
                    step_mode: wgpu::VertexStepMode::Instance,
                    attributes: &[
                        wgpu::VertexAttribute {
                            offset: 0,
                            shader_location: 0,
                            format: wgpu::VertexFormat::Float32x2,
                        },
                        wgpu::VertexAttribute {
                            offset: 8,
                            shader_location: 1,
                            format: wgpu::VertexFormat::Float32x2,
                        },
                        wgpu::VertexAttribute {
                            offset: 16,
                            shader_location: 2,
                            format: wgpu::VertexFormat::Float32,
                        },
                        wgpu::VertexAttribute {
                            offset: 20,
                            shader_location: 3,
                            format: wgpu::VertexFormat::Float32,
                        },
                    ],
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
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        Self {
            buffer,
            pipeline,
            bind_group,
            capacity,
        }
    }

    /// Upload this frame's segments; returns how many will be drawn.
    pub fn upload(&self, queue: &wgpu::Queue, connections: &[ConnectionInstance]) -> u32 {
        let count = (connections.len() as u32).min(self.capacity);
        if count > 0 {
            queue.write_buffer(
                &self.buffer,
                0,
                bytemuck::cast_slice(&connections[..count as usize]),
            );
        }
        count
    }

    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>, count: u32) {
        if count == 0 {
            return;
        }
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.buffer.slice(..));
        render_pass.draw(0..6, 0..count);
    }
}

pub(crate) const LINE_SHADER: &str = r#"
struct Uniforms {
    resolution: vec2<f32>,
};

struct Params {
    color: vec3<f32>,
};

@group(0) @binding(0) var<uniform> uniforms: Uniforms;
@group(0) @binding(1) var<uniform> params: Params;

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) alpha: f32,
};

@vertex
fn vs_main(
    @builtin(vertex_index) vertex_index: u32,
    @location(0) start: vec2<f32>,
    @location(1) end: vec2<f32>,
    @location(2) alpha: f32,
    @location(3) width: f32,
) -> VertexOutput {
    let segment = end - start;
    let len = length(segment);
    var dir = vec2<f32>(1.0, 0.0);
    if len > 0.0001 {
        dir = segment / len;
    }
    let perp = vec2<f32>(-dir.y, dir.x) * width * 0.5;

    var pixel: vec2<f32>;
    switch vertex_index {
        case 0u: { pixel = start - perp; }
        case 1u: { pixel = start + perp; }
        case 2u: { pixel = end - perp; }
        case 3u: { pixel = start + perp; }
        case 4u: { pixel = end - perp; }
        default: { pixel = end + perp; }
    }

    let ndc = pixel / uniforms.resolution * 2.0 - vec2<f32>(1.0, 1.0);

    var out: VertexOutput;
    out.clip_position = vec4<f32>(ndc.x, -ndc.y, 0.0, 1.0);
    out.alpha = alpha;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return vec4<f32>(params.color, in.alpha);
}
"#;
