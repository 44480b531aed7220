use bytemuck::{Pod, Zeroable};

use crate::field::RenderItem;

pub const QUAD_SHADER: &str = include_str!("quad.wgsl");

/// Per-quad vertex data. Layout matches `InstanceInput` in `quad.wgsl`.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct QuadInstance {
    pub position: [f32; 3],
    pub rotation: f32,
    pub size: f32,
    pub _pad: [f32; 3],
}

impl From<&RenderItem> for QuadInstance {
    fn from(item: &RenderItem) -> Self {
        Self {
            position: item.position.to_array(),
            rotation: item.rotation,
            size: item.size,
            _pad: [0.0; 3],
        }
    }
}

impl QuadInstance {
    pub const ATTRIBUTES: [wgpu::VertexAttribute; 3] = [
        wgpu::VertexAttribute {
            offset: 0,
            shader_location: 0,
            format: wgpu::VertexFormat::Float32x3,
        },
        wgpu::VertexAttribute {
            offset: 12,
            shader_location: 1,
            format: wgpu::VertexFormat::Float32,
        },
        wgpu::VertexAttribute {
            offset: 16,
            shader_location: 2,
            format: wgpu::VertexFormat::Float32,
        },
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
pub struct Uniforms {
    pub view_proj: [[f32; 4]; 4],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shader_validates() {
        let module = naga::front::wgsl::parse_str(QUAD_SHADER).expect("quad.wgsl should parse");
        let mut validator = naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::all(),
        );
        validator.validate(&module).expect("quad.wgsl should validate");
    }

    #[test]
    fn test_instance_layout() {
        assert_eq!(std::mem::size_of::<QuadInstance>(), 32);
        assert_eq!(std::mem::size_of::<Uniforms>(), 64);
    }
}
