//! GPU state and particle rendering.
//!
//! The field is simulated on the CPU; the GPU only draws. Particles are
//! instanced quads cut to antialiased discs in the fragment shader, with
//! position, radius, and opacity streamed per instance every frame.
//! Connection lines have their own pipeline in [`connections`].

mod connections;

use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use winit::window::Window;

use crate::config::FieldConfig;
use crate::error::GpuError;
use crate::field::Connection;
use crate::particle::Particle;
pub(crate) use connections::ConnectionInstance;
use connections::ConnectionState;

/// Per-instance particle data streamed to the vertex shader.
#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
pub(crate) struct ParticleInstance {
    position: [f32; 2],
    radius: f32,
    opacity: f32,
}

impl From<&Particle> for ParticleInstance {
    fn from(particle: &Particle) -> Self {
        Self {
            position: particle.position.to_array(),
            radius: particle.radius,
            opacity: particle.opacity,
        }
    }
}

/// Shared per-frame uniforms (pixel resolution of the surface).
#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Uniforms {
    resolution: [f32; 2],
    _padding: [f32; 2],
}

/// Fill color for every particle in the field.
#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct ParticleParams {
    color: [f32; 3],
    _pad: f32,
}

pub(crate) struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    particle_pipeline: wgpu::RenderPipeline,
    particle_buffer: wgpu::Buffer,
    particle_capacity: u32,
    uniform_buffer: wgpu::Buffer,
    particle_bind_group: wgpu::BindGroup,
    connections: Option<ConnectionState>,
    clear_color: wgpu::Color,
}

impl GpuState {
    pub async fn new(
        window: Arc<Window>,
        field_config: &FieldConfig,
        particle_capacity: u32,
    ) -> Result<Self, GpuError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|_| GpuError::NoAdapter)?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
                trace: Default::default(),
            })
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let uniforms = Uniforms {
            resolution: [config.width as f32, config.height as f32],
            _padding: [0.0; 2],
        };
        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Uniform Buffer"),
            size: std::mem::size_of::<Uniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        queue.write_buffer(&uniform_buffer, 0, bytemuck::bytes_of(&uniforms));

        let particle_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Particle Instance Buffer"),
            size: (particle_capacity.max(1) as u64)
                * std::mem::size_of::<ParticleInstance>() as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let params = ParticleParams {
            color: field_config.color.to_array(),
            _pad: 0.0,
        };
        let params_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Particle Params Buffer"),
            size: std::mem::size_of::<ParticleParams>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        queue.write_buffer(&params_buffer, 0, bytemuck::bytes_of(&params));

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Particle Bind Group Layout"),
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

        let particle_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Particle Bind Group"),
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
            label: Some("Particle Shader"),
            source: wgpu::ShaderSource::Wgsl(PARTICLE_SHADER.into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Particle Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let particle_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Particle Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<ParticleInstance>() as wgpu::BufferAddress,
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
                            format: wgpu::VertexFormat::Float32,
                        },
                        wgpu::VertexAttribute {
                            offset: 12,
                            shader_location: 2,
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
                    format: config.format,
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

        let connections = field_config.connections.map(|conn_config| {
            ConnectionState::new(
                &device,
                &queue,
                &uniform_buffer,
                conn_config.color,
                particle_capacity,
                config.format,
            )
        });

        let background = field_config.background;
        let clear_color = wgpu::Color {
            r: background.x as f64,
            g: background.y as f64,
            b: background.z as f64,
            a: 1.0,
        };

        Ok(Self {
            surface,
            device,
            queue,
            config,
            particle_pipeline,
            particle_buffer,
            particle_capacity,
            uniform_buffer,
            particle_bind_group,
            connections,
            clear_color,
        })
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);

            let uniforms = Uniforms {
                resolution: [self.config.width as f32, self.config.height as f32],
                _padding: [0.0; 2],
            };
            self.queue
                .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));
        }
    }

    /// Draw one frame: clear, particles, then connection lines on top.
    pub fn render(
        &mut self,
        particles: &[ParticleInstance],
        connections: &[ConnectionInstance],
    ) -> Result<(), wgpu::SurfaceError> {
        let particle_count = (particles.len() as u32).min(self.particle_capacity);
        if particle_count > 0 {
            self.queue.write_buffer(
                &self.particle_buffer,
                0,
                bytemuck::cast_slice(&particles[..particle_count as usize]),
            );
        }
        let connection_count = match &self.connections {
            Some(state) => state.upload(&self.queue, connections),
            None => 0,
        };

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    depth_slice: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_pipeline(&self.particle_pipeline);
            render_pass.set_bind_group(0, &self.particle_bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.particle_buffer.slice(..));
            render_pass.draw(0..6, 0..particle_count);

            if let Some(state) = &self.connections {
                state.draw(&mut render_pass, connection_count);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

const PARTICLE_SHADER: &str = r#"
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
    @location(0) uv: vec2<f32>,
    @location(1) opacity: f32,
};

@vertex
fn vs_main(
    @builtin(vertex_index) vertex_index: u32,
    @location(0) center: vec2<f32>,
    @location(1) radius: f32,
    @location(2) opacity: f32,
) -> VertexOutput {
    var quad_vertices = array<vec2<f32>, 6>(
        vec2<f32>(-1.0, -1.0),
        vec2<f32>( 1.0, -1.0),
        vec2<f32>(-1.0,  1.0),
        vec2<f32>(-1.0,  1.0),
        vec2<f32>( 1.0, -1.0),
        vec2<f32>( 1.0,  1.0),
    );

    let quad_pos = quad_vertices[vertex_index];
    let pixel = center + quad_pos * radius;
    let ndc = pixel / uniforms.resolution * 2.0 - vec2<f32>(1.0, 1.0);

    var out: VertexOutput;
    out.clip_position = vec4<f32>(ndc.x, -ndc.y, 0.0, 1.0);
    out.uv = quad_pos;
    out.opacity = opacity;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let dist = length(in.uv);
    if dist > 1.0 {
        discard;
    }
    let edge = 1.0 - smoothstep(0.8, 1.0, dist);
    return vec4<f32>(params.color, in.opacity * edge);
}
"#;

/// Instance conversions for the window loop.
pub(crate) fn particle_instances(particles: &[Particle]) -> Vec<ParticleInstance> {
    particles.iter().map(ParticleInstance::from).collect()
}

pub(crate) fn connection_instances(connections: &[Connection]) -> Vec<ConnectionInstance> {
    connections.iter().map(ConnectionInstance::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Validates WGSL code using naga.
    fn validate_wgsl(code: &str) {
        let module = naga::front::wgsl::parse_str(code)
            .unwrap_or_else(|e| panic!("WGSL parse error: {:?}", e));
        let mut validator = naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::all(),
        );
        validator
            .validate(&module)
            .unwrap_or_else(|e| panic!("WGSL validation error: {:?}", e));
    }

    #[test]
    fn test_particle_shader_is_valid() {
        validate_wgsl(PARTICLE_SHADER);
    }

    #[test]
    fn test_connection_shader_is_valid() {
        validate_wgsl(connections::LINE_SHADER);
    }

    #[test]
    fn test_instance_layouts() {
        assert_eq!(std::mem::size_of::<ParticleInstance>(), 16);
        assert_eq!(std::mem::size_of::<ConnectionInstance>(), 24);
        assert_eq!(std::mem::size_of::<Uniforms>(), 16);
    }

    #[test]
    fn test_particle_instance_from_particle() {
        let particle = Particle {
            position: glam::Vec2::new(3.0, 4.0),
            velocity: glam::Vec2::ZERO,
            radius: 1.5,
            opacity: 0.25,
        };
        let instance = ParticleInstance::from(&particle);
        assert_eq!(instance.position, [3.0, 4.0]);
        assert_eq!(instance.radius, 1.5);
        assert_eq!(instance.opacity, 0.25);
    }
}
