//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// 2D vertex in window pixels with a flat color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
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
    pub const SKY_TOP: [f32; 4] = [0.36, 0.62, 0.92, 1.0];
    pub const SKY_HORIZON: [f32; 4] = [0.78, 0.9, 0.98, 1.0];
    pub const HILLS: [f32; 4] = [0.45, 0.68, 0.42, 1.0];
    pub const GROUND: [f32; 4] = [0.56, 0.42, 0.25, 1.0];
    pub const PLAYER: [f32; 4] = [0.92, 0.26, 0.2, 1.0];
    pub const ROCK: [f32; 4] = [0.48, 0.44, 0.4, 1.0];
    pub const CRYSTAL: [f32; 4] = [0.55, 0.8, 0.95, 1.0]; // Icy blue
    /// Clear color behind everything
    pub const BACKGROUND: [f32; 4] = SKY_HORIZON;
}
