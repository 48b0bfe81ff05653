use bytemuck::{Pod, Zeroable};
use std::f32::consts::{PI, TAU};

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

#[derive(Clone, Debug, Default)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

/// Unit-radius UV sphere shared by the lattice and the cursor.
///
/// `rings` latitude bands and `segments` longitude slices; the seam column is
/// duplicated so every ring has `segments + 1` vertices.
pub fn uv_sphere(rings: u32, segments: u32) -> Mesh {
    let rings = rings.max(2);
    let segments = segments.max(3);
    let mut vertices = Vec::with_capacity(((rings + 1) * (segments + 1)) as usize);
    for r in 0..=rings {
        let theta = PI * r as f32 / rings as f32;
        let (sin_t, cos_t) = theta.sin_cos();
        for s in 0..=segments {
            let phi = TAU * s as f32 / segments as f32;
            let (sin_p, cos_p) = phi.sin_cos();
            let n = [sin_t * cos_p, cos_t, sin_t * sin_p];
            vertices.push(Vertex {
                position: n,
                normal: n,
            });
        }
    }

    let stride = segments + 1;
    let mut indices = Vec::with_capacity((rings * segments * 6) as usize);
    for r in 0..rings {
        for s in 0..segments {
            let a = r * stride + s;
            let b = a + stride;
            // pole rows collapse one triangle of each quad
            if r != 0 {
                indices.extend_from_slice(&[a, a + 1, b]);
            }
            if r != rings - 1 {
                indices.extend_from_slice(&[a + 1, b + 1, b]);
            }
        }
    }
    Mesh { vertices, indices }
}
