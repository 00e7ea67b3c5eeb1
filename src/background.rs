//! Background builder and runner.
//!
//! [`Background`] owns everything one running instance needs: the field,
//! the pointer state, the logical bounds, the frame clock, and the GPU
//! state. Nothing lives in module globals, so multiple backgrounds can run
//! in one process and the simulation is steppable without a window.
//!
//! The animation is driven by winit's redraw cycle: each `RedrawRequested`
//! steps the field, draws the frame, and immediately requests the next
//! redraw, paced by vsync. Closing the window or pressing Escape ends the
//! loop.

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::config::FieldConfig;
use crate::error::BackgroundError;
use crate::field::{Bounds, ParticleField};
use crate::gpu::{self, GpuState};
use crate::pointer::PointerState;
use crate::time::Time;

/// An animated particle background.
///
/// Use method chaining to configure, then call `.run()` to open a window
/// and animate until it closes.
///
/// ```ignore
/// use plexus::{Background, FieldConfig};
///
/// Background::new()
///     .with_config(FieldConfig::fine_mesh())
///     .with_title("plexus")
///     .run()?;
/// ```
pub struct Background {
    config: FieldConfig,
    title: String,
    size: (u32, u32),
    seed: Option<u64>,
}

impl Background {
    /// Background with the classic field configuration.
    pub fn new() -> Self {
        Self {
            config: FieldConfig::classic(),
            title: "plexus".to_string(),
            size: (1280, 720),
            seed: None,
        }
    }

    /// Replace the field configuration.
    pub fn with_config(mut self, config: FieldConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the window title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the initial window size in logical pixels.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }

    /// Seed the field RNG for a reproducible drift.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Run the background. Blocks until the window is closed.
    pub fn run(self) -> Result<(), BackgroundError> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = App::new(self);
        event_loop.run_app(&mut app)?;

        match app.error {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

impl Default for Background {
    fn default() -> Self {
        Self::new()
    }
}

struct App {
    title: String,
    size: (u32, u32),
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    field: ParticleField,
    pointer: PointerState,
    bounds: Bounds,
    time: Time,
    error: Option<BackgroundError>,
}

impl App {
    fn new(background: Background) -> Self {
        let bounds = Bounds::new(0.0, 0.0);
        let field = match background.seed {
            Some(seed) => ParticleField::seeded(background.config, seed),
            None => ParticleField::new(background.config),
        };
        Self {
            title: background.title,
            size: background.size,
            window: None,
            gpu: None,
            field,
            pointer: PointerState::new(bounds),
            bounds,
            time: Time::new(),
            error: None,
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = Window::default_attributes()
            .with_title(self.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(self.size.0, self.size.1));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                self.error = Some(e.into());
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        self.bounds = Bounds::new(size.width as f32, size.height as f32);
        self.pointer = PointerState::new(self.bounds);
        // The one and only population; resizes later rescale bounds but
        // keep this set of particles.
        self.field.populate(self.bounds);

        let gpu = pollster::block_on(GpuState::new(
            window.clone(),
            self.field.config(),
            self.field.len() as u32,
        ));
        match gpu {
            Ok(gpu) => {
                self.gpu = Some(gpu);
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                self.error = Some(e.into());
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                self.bounds =
                    Bounds::new(physical_size.width as f32, physical_size.height as f32);
                self.pointer.on_resize(self.bounds);
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(physical_size);
                }
            }
            WindowEvent::RedrawRequested => {
                self.time.update();
                self.field.step(self.bounds, &self.pointer);

                let particles = gpu::particle_instances(self.field.particles());
                let lines = gpu::connection_instances(&self.field.connections());

                if let Some(gpu) = &mut self.gpu {
                    match gpu.render(&particles, &lines) {
                        Ok(_) => {}
                        Err(wgpu::SurfaceError::Lost) => {
                            gpu.resize(winit::dpi::PhysicalSize {
                                width: gpu.config.width,
                                height: gpu.config.height,
                            })
                        }
                        Err(wgpu::SurfaceError::OutOfMemory) => event_loop.exit(),
                        Err(e) => eprintln!("Render error: {:?}", e),
                    }
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            other => {
                self.pointer.handle_event(&other, self.bounds);
            }
        }
    }
}
