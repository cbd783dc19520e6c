//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Linear RGBA color
pub type Color = [f32; 4];

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: Color,
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: Color) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements
pub mod colors {
    use super::Color;

    pub const BACKGROUND: Color = [0.0, 0.0, 0.0, 1.0];
    pub const AVATAR: Color = [0.0, 0.0, 1.0, 1.0];
    pub const AIM_LINE: Color = [0.0, 1.0, 0.0, 1.0];
    pub const ADVERSARY: Color = [1.0, 0.0, 0.0, 1.0];
    pub const PROJECTILE: Color = [1.0, 1.0, 1.0, 1.0];
    pub const HEALTH_BAR: Color = [1.0, 0.0, 0.0, 1.0];
}
