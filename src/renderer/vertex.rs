//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
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

/// Colors for scene elements
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.55, 0.65, 0.8, 1.0];
    pub const SNOW: [f32; 4] = [0.96, 0.97, 1.0, 1.0];
    pub const TREE: [f32; 4] = [0.2, 0.6, 0.2, 1.0];
    pub const SKIER: [f32; 4] = [1.0, 0.9, 0.3, 1.0];
    pub const GATE_RED: [f32; 4] = [1.0, 0.1, 0.1, 1.0];
    pub const GATE_BLUE: [f32; 4] = [0.1, 0.3, 1.0, 1.0];
    /// Alpha applied to gates already behind the skier
    pub const PASSED_ALPHA: f32 = 0.35;
}
