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

/// Colors for arena and panel elements
pub mod colors {
    const fn rgb(r: u8, g: u8, b: u8) -> [f32; 4] {
        [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
    }

    pub const BACKGROUND: [f32; 4] = rgb(0, 0, 0);
    pub const BOUNCE_RING: [f32; 4] = rgb(255, 255, 255);
    pub const DELETE_RING: [f32; 4] = rgb(100, 100, 100);
    pub const PANEL: [f32; 4] = rgb(100, 100, 100);
    pub const SLIDER_TRACK: [f32; 4] = rgb(50, 50, 50);
    pub const SLIDER_FILL: [f32; 4] = rgb(100, 100, 255);
    pub const SLIDER_KNOB: [f32; 4] = rgb(0, 255, 0);
    pub const BALL: [f32; 4] = rgb(255, 0, 0);
    pub const LABEL: [f32; 4] = rgb(255, 255, 255);

    /// CSS `rgb()` string for text drawn outside the canvas
    pub fn css(color: [f32; 4]) -> String {
        let [r, g, b, _] = color.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8);
        format!("rgb({}, {}, {})", r, g, b)
    }
}
