//! Rendering module
//!
//! The render pass (`frame`) only reads simulation state and talks to a
//! [`Canvas`]. `pipeline` provides the wgpu-backed canvas used by the window.

pub mod frame;
pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use frame::{Canvas, VertexBatch, draw_frame};
pub use pipeline::RenderState;
pub use vertex::{Color, Vertex, colors};

use thiserror::Error;

/// Failures at the display boundary
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to create window surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),
    #[error("no compatible graphics adapter: {0}")]
    RequestAdapter(#[from] wgpu::RequestAdapterError),
    #[error("failed to open graphics device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
    #[error("surface reports no supported texture formats")]
    NoSurfaceFormat,
    #[error("frame acquisition failed: {0}")]
    Surface(#[from] wgpu::SurfaceError),
}

impl RenderError {
    /// Whether the display can no longer be used
    ///
    /// Per-frame surface errors other than out-of-memory just drop the frame.
    pub fn is_fatal(&self) -> bool {
        match self {
            RenderError::Surface(err) => matches!(err, wgpu::SurfaceError::OutOfMemory),
            _ => true,
        }
    }
}
