use crate::renderer::vertex::Vertex;
use glam::Vec3;
use std::f32::consts::{PI, TAU};
use wgpu::util::DeviceExt;

pub struct Mesh {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub num_indices: u32,
}

impl Mesh {
    /// Unit sphere shared by nucleons and electrons; per-instance
    /// scaling gives each its radius.
    pub fn unit_sphere(device: &wgpu::Device, latitudes: u32, longitudes: u32) -> Self {
        let (vertices, indices) = generate_uv_sphere(latitudes, longitudes);
        Self::upload(device, "Sphere", &vertices, &indices)
    }

    pub fn torus(
        device: &wgpu::Device,
        ring_radius: f32,
        tube_radius: f32,
        tube_segments: u32,
        ring_segments: u32,
    ) -> Self {
        let (vertices, indices) =
            generate_torus(ring_radius, tube_radius, tube_segments, ring_segments);
        Self::upload(device, "Ring", &vertices, &indices)
    }

    fn upload(device: &wgpu::Device, label: &str, vertices: &[Vertex], indices: &[u32]) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Vertex Buffer")),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Index Buffer")),
            contents: bytemuck::cast_slice(indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            vertex_buffer,
            index_buffer,
            num_indices: indices.len() as u32,
        }
    }
}

/// Generates a unit UV sphere with latitude/longitude subdivisions.
pub fn generate_uv_sphere(latitudes: u32, longitudes: u32) -> (Vec<Vertex>, Vec<u32>) {
    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    for lat in 0..=latitudes {
        let theta = lat as f32 * PI / latitudes as f32;
        let sin_theta = theta.sin();
        let cos_theta = theta.cos();

        for lon in 0..=longitudes {
            let phi = lon as f32 * TAU / longitudes as f32;

            let x = phi.cos() * sin_theta;
            let y = cos_theta;
            let z = phi.sin() * sin_theta;

            // On a unit sphere the normal is the position itself.
            vertices.push(Vertex {
                position: [x, y, z],
                normal: [x, y, z],
            });
        }
    }

    for lat in 0..latitudes {
        for lon in 0..longitudes {
            let first = lat * (longitudes + 1) + lon;
            let second = first + longitudes + 1;

            indices.extend_from_slice(&[first, second, first + 1, second, second + 1, first + 1]);
        }
    }

    (vertices, indices)
}

/// Generates a torus lying in the xy plane, matching the orbit circle
/// the electrons travel.
pub fn generate_torus(
    ring_radius: f32,
    tube_radius: f32,
    tube_segments: u32,
    ring_segments: u32,
) -> (Vec<Vertex>, Vec<u32>) {
    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    for ring in 0..=ring_segments {
        let u = ring as f32 * TAU / ring_segments as f32;
        let (sin_u, cos_u) = u.sin_cos();
        let center = Vec3::new(ring_radius * cos_u, ring_radius * sin_u, 0.0);

        for tube in 0..=tube_segments {
            let v = tube as f32 * TAU / tube_segments as f32;
            let (sin_v, cos_v) = v.sin_cos();

            // Tube cross-section: radial in the xy plane, plus z.
            let normal = Vec3::new(cos_u * cos_v, sin_u * cos_v, sin_v);
            let position = center + normal * tube_radius;

            vertices.push(Vertex {
                position: position.to_array(),
                normal: normal.to_array(),
            });
        }
    }

    for ring in 0..ring_segments {
        for tube in 0..tube_segments {
            let first = ring * (tube_segments + 1) + tube;
            let second = first + tube_segments + 1;

            indices.extend_from_slice(&[first, second, first + 1, second, second + 1, first + 1]);
        }
    }

    (vertices, indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sphere_vertices_lie_on_unit_sphere() {
        let (vertices, indices) = generate_uv_sphere(16, 32);
        assert_eq!(vertices.len(), 17 * 33);
        assert_eq!(indices.len(), (16 * 32 * 6) as usize);
        for vertex in &vertices {
            let radius = Vec3::from(vertex.position).length();
            assert!((radius - 1.0).abs() < 1e-4);
        }
        let max_index = *indices.iter().max().unwrap();
        assert!((max_index as usize) < vertices.len());
    }

    #[test]
    fn torus_vertices_stay_near_orbit_circle() {
        let ring_radius = 6.0;
        let tube_radius = 0.01;
        let (vertices, indices) = generate_torus(ring_radius, tube_radius, 16, 100);
        for vertex in &vertices {
            let position = Vec3::from(vertex.position);
            let planar = Vec3::new(position.x, position.y, 0.0).length();
            assert!((planar - ring_radius).abs() <= tube_radius + 1e-4);
            assert!(position.z.abs() <= tube_radius + 1e-5);
        }
        let max_index = *indices.iter().max().unwrap();
        assert!((max_index as usize) < vertices.len());
    }

    #[test]
    fn torus_normals_are_unit_length() {
        let (vertices, _) = generate_torus(3.0, 0.01, 8, 24);
        for vertex in &vertices {
            assert!((Vec3::from(vertex.normal).length() - 1.0).abs() < 1e-4);
        }
    }
}
