//! Triangle geometry.
//!
//! A single triangle in object space, uploaded once into a vertex-only
//! buffer. Attribute slot 0 carries the position.

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::device::{ErrorProbe, GpuError};

/// Attribute slot the vertex stage reads positions from.
pub const POSITION_LOCATION: u32 = 0;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
}

impl Vertex {
    const ATTRS: [wgpu::VertexAttribute; 1] =
        wgpu::vertex_attr_array![POSITION_LOCATION => Float32x3];

    /// Three tightly packed floats per vertex at slot 0.
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

pub const TRIANGLE: [Vertex; 3] = [
    Vertex { position: [-1.0, -1.0, 0.0] },
    Vertex { position: [1.0, -1.0, 0.0] },
    Vertex { position: [0.0, 1.0, 0.0] },
];

/// GPU copy of [`TRIANGLE`]. Never written after creation.
pub struct GeometryBuffer {
    vbo: wgpu::Buffer,
    vertex_count: u32,
}

impl GeometryBuffer {
    pub fn upload(device: &wgpu::Device) -> Result<Self, GpuError> {
        let vbo = ErrorProbe::check(device, "geometry upload", || {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("volsample triangle vbo"),
                contents: bytemuck::cast_slice(&TRIANGLE),
                // No COPY_DST: the buffer is immutable once created.
                usage: wgpu::BufferUsages::VERTEX,
            })
        })?;

        log::debug!("uploaded triangle ({} bytes)", vbo.size());

        Ok(Self {
            vbo,
            vertex_count: TRIANGLE.len() as u32,
        })
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    pub fn byte_len(&self) -> u64 {
        self.vbo.size()
    }

    pub fn slice(&self) -> wgpu::BufferSlice<'_> {
        self.vbo.slice(..)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangle_byte_length() {
        assert_eq!(std::mem::size_of_val(&TRIANGLE), 3 * 3 * 4);
        assert_eq!(bytemuck::cast_slice::<Vertex, u8>(&TRIANGLE).len(), 36);
    }

    #[test]
    fn every_vertex_has_three_components() {
        let floats: &[f32] = bytemuck::cast_slice(&TRIANGLE);
        assert_eq!(floats.len(), 9);
        assert_eq!(floats, &[-1.0, -1.0, 0.0, 1.0, -1.0, 0.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn layout_is_tightly_packed_slot_zero() {
        let layout = Vertex::layout();
        assert_eq!(layout.array_stride, 12);
        assert_eq!(layout.step_mode, wgpu::VertexStepMode::Vertex);
        assert_eq!(layout.attributes.len(), 1);

        let attr = layout.attributes[0];
        assert_eq!(attr.shader_location, 0);
        assert_eq!(attr.offset, 0);
        assert_eq!(attr.format, wgpu::VertexFormat::Float32x3);
    }
}
