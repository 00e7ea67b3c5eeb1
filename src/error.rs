//! Error types for background setup.
//!
//! The animation loop itself cannot fail; everything fallible happens while
//! bringing the window and the GPU up, and surfaces through these enums.

use std::fmt;

/// Errors that can occur during GPU initialization.
#[derive(Debug)]
pub enum GpuError {
    /// Failed to create a surface for rendering.
    SurfaceCreation(wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    NoAdapter,
    /// Failed to create GPU device.
    DeviceCreation(wgpu::RequestDeviceError),
}

impl fmt::Display for GpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpuError::SurfaceCreation(e) => write!(f, "Failed to create GPU surface: {}", e),
            GpuError::NoAdapter => write!(
                f,
                "No compatible GPU adapter found. Ensure your system has a GPU with WebGPU/Vulkan/Metal/DX12 support."
            ),
            GpuError::DeviceCreation(e) => write!(f, "Failed to create GPU device: {}", e),
        }
    }
}

impl std::error::Error for GpuError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GpuError::SurfaceCreation(e) => Some(e),
            GpuError::DeviceCreation(e) => Some(e),
            GpuError::NoAdapter => None,
        }
    }
}

impl From<wgpu::CreateSurfaceError> for GpuError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        GpuError::SurfaceCreation(e)
    }
}

impl From<wgpu::RequestDeviceError> for GpuError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        GpuError::DeviceCreation(e)
    }
}

/// Errors that can occur when running a background.
#[derive(Debug)]
pub enum BackgroundError {
    /// Failed to create the event loop.
    EventLoop(winit::error::EventLoopError),
    /// Failed to create the window.
    Window(winit::error::OsError),
    /// GPU initialization failed.
    Gpu(GpuError),
}

impl fmt::Display for BackgroundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackgroundError::EventLoop(e) => write!(f, "Failed to create event loop: {}", e),
            BackgroundError::Window(e) => write!(f, "Failed to create window: {}", e),
            BackgroundError::Gpu(e) => write!(f, "GPU error: {}", e),
        }
    }
}

impl std::error::Error for BackgroundError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BackgroundError::EventLoop(e) => Some(e),
            BackgroundError::Window(e) => Some(e),
            BackgroundError::Gpu(e) => Some(e),
        }
    }
}

impl From<winit::error::EventLoopError> for BackgroundError {
    fn from(e: winit::error::EventLoopError) -> Self {
        BackgroundError::EventLoop(e)
    }
}

impl From<winit::error::OsError> for BackgroundError {
    fn from(e: winit::error::OsError) -> Self {
        BackgroundError::Window(e)
    }
}

impl From<GpuError> for BackgroundError {
    fn from(e: GpuError) -> Self {
        BackgroundError::Gpu(e)
    }
}
