//! Latitude/longitude sphere tessellation.
//!
//! Two meshes are kept per sphere: the display mesh and a coarser wireframe
//! mesh, each driven by its own resolution.

use std::f32::consts::PI;

/// Interleaved vertex layout shared with the host rasterizer.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

/// Triangle mesh for a tessellated sphere.
#[derive(Debug, Clone, Default)]
pub struct SphereMesh {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl SphereMesh {
    /// Tessellate a sphere of `radius` into `resolution` latitude bands and
    /// `resolution` longitude segments. `resolution` is assumed to be >= 4
    /// (the patch boundary clamps it).
    #[must_use]
    pub fn generate(radius: f32, resolution: u32) -> Self {
        let res = resolution as usize;
        let mut vertices = Vec::with_capacity((res + 1) * (res + 1));
        let mut indices = Vec::with_capacity(res * res * 6);

        for i in 0..=res {
            let lat = PI * (-0.5 + i as f32 / res as f32);
            let (sin_lat, cos_lat) = lat.sin_cos();

            for j in 0..=res {
                let lon = 2.0 * PI * j as f32 / res as f32;
                let (sin_lon, cos_lon) = lon.sin_cos();

                let normal = [cos_lat * cos_lon, sin_lat, cos_lat * sin_lon];
                vertices.push(MeshVertex {
                    position: [normal[0] * radius, normal[1] * radius, normal[2] * radius],
                    normal,
                    uv: [j as f32 / res as f32, i as f32 / res as f32],
                });
            }
        }

        let stride = (res + 1) as u32;
        for i in 0..res as u32 {
            for j in 0..res as u32 {
                let first = i * stride + j;
                let second = first + stride;
                indices.extend_from_slice(&[first, second, first + 1]);
                indices.extend_from_slice(&[second, second + 1, first + 1]);
            }
        }

        Self { vertices, indices }
    }

    /// Raw vertex bytes for upload by the host rasterizer.
    #[must_use]
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}
