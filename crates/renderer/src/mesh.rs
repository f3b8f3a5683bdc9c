//! Mesh data structures and primitive generation.

use crate::vertex::Vertex;
use glam::Vec3;
use wgpu::util::DeviceExt;

/// A GPU mesh with vertex and index buffers.
pub struct Mesh {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub num_indices: u32,
}

impl Mesh {
    /// Create a mesh from vertex and index data.
    pub fn new(device: &wgpu::Device, vertices: &[Vertex], indices: &[u32]) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Vertex Buffer"),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Index Buffer"),
            contents: bytemuck::cast_slice(indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            vertex_buffer,
            index_buffer,
            num_indices: indices.len() as u32,
        }
    }

    /// Upload CPU-side geometry.
    pub fn from_data(device: &wgpu::Device, data: &MeshData) -> Self {
        Self::new(device, &data.vertices, &data.indices)
    }
}

/// CPU-side geometry, built before upload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Axis-aligned box centered at origin with the given full extents.
    pub fn cuboid(size: Vec3) -> Self {
        let h = size * 0.5;
        // (normal, u axis, v axis) per face; u × v = normal keeps CCW winding.
        let faces = [
            (Vec3::Z, Vec3::X, Vec3::Y),
            (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
            (Vec3::Y, Vec3::X, Vec3::NEG_Z),
            (Vec3::NEG_Y, Vec3::X, Vec3::Z),
            (Vec3::X, Vec3::NEG_Z, Vec3::Y),
            (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        ];

        let mut data = Self::default();
        for (normal, u, v) in faces {
            let center = normal * h;
            let du = u * h;
            let dv = v * h;
            let corners = [
                center - du - dv,
                center + du - dv,
                center + du + dv,
                center - du + dv,
            ];
            data.push_quad(corners, normal, [1.0, 1.0, 1.0, 1.0]);
        }
        data
    }

    /// Square ground plane at y = 0 split into `tiles` x `tiles` checker squares.
    pub fn ground_grid(extent: f32, tiles: u32, colors: [[f32; 4]; 2]) -> Self {
        let tiles = tiles.max(1);
        let step = extent / tiles as f32;
        let origin = -extent * 0.5;

        let mut data = Self::default();
        for row in 0..tiles {
            for col in 0..tiles {
                let x0 = origin + col as f32 * step;
                let z0 = origin + row as f32 * step;
                let color = colors[((row + col) % 2) as usize];
                data.push_quad(
                    [
                        Vec3::new(x0, 0.0, z0 + step),
                        Vec3::new(x0 + step, 0.0, z0 + step),
                        Vec3::new(x0 + step, 0.0, z0),
                        Vec3::new(x0, 0.0, z0),
                    ],
                    Vec3::Y,
                    color,
                );
            }
        }
        data
    }

    /// Append a quad given counter-clockwise corners (seen from the normal side).
    fn push_quad(&mut self, corners: [Vec3; 4], normal: Vec3, color: [f32; 4]) {
        let base = self.vertices.len() as u32;
        for corner in corners {
            self.vertices
                .push(Vertex::with_color(corner.to_array(), normal.to_array(), color));
        }
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }
}
