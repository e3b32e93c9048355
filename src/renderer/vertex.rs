use crate::config::Rgb;
use glam::Mat4;
use std::mem;

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex {
    pub fn desc<'a>() -> wgpu::VertexBufferLayout<'a> {
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                // Position: @location(0) in shader
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                // Normal: @location(1) in shader
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}

/// Per-object GPU data: model matrix plus material. `tint` packs the
/// linear rgb color with an intensity multiplier (above 1 for the
/// emissive electrons); `shade` blends in a directional falloff so the
/// nucleons keep their silhouette without a lighting pass.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceRaw {
    pub model: [[f32; 4]; 4],
    pub tint: [f32; 4],
    pub shade: f32,
}

impl InstanceRaw {
    pub fn new(model: Mat4, color: Rgb, intensity: f32, shade: f32) -> Self {
        let [r, g, b] = color.to_linear();
        Self {
            model: model.to_cols_array_2d(),
            tint: [r, g, b, intensity],
            shade,
        }
    }

    pub fn desc<'a>() -> wgpu::VertexBufferLayout<'a> {
        const MAT4_COLUMN: wgpu::BufferAddress = mem::size_of::<[f32; 4]>() as wgpu::BufferAddress;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<InstanceRaw>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[
                // Model matrix columns: @location(2..=5)
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: MAT4_COLUMN,
                    shader_location: 3,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: 2 * MAT4_COLUMN,
                    shader_location: 4,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: 3 * MAT4_COLUMN,
                    shader_location: 5,
                    format: wgpu::VertexFormat::Float32x4,
                },
                // Tint (rgb + intensity): @location(6)
                wgpu::VertexAttribute {
                    offset: 4 * MAT4_COLUMN,
                    shader_location: 6,
                    format: wgpu::VertexFormat::Float32x4,
                },
                // Shade factor: @location(7)
                wgpu::VertexAttribute {
                    offset: 5 * MAT4_COLUMN,
                    shader_location: 7,
                    format: wgpu::VertexFormat::Float32,
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn instance_layout_matches_struct() {
        let desc = InstanceRaw::desc();
        assert_eq!(desc.array_stride, mem::size_of::<InstanceRaw>() as u64);
        let last = desc.attributes.last().unwrap();
        assert_eq!(last.offset, 80);
    }

    #[test]
    fn instance_packs_model_columns() {
        let model = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        let instance = InstanceRaw::new(model, Rgb([1.0, 1.0, 1.0]), 1.0, 0.0);
        assert_eq!(instance.model[3], [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(instance.tint[3], 1.0);
    }
}
