use crate::geometry::{Mesh, geodesic, planar};
use crate::{Error, Result};

use super::context::GpuContext;
use super::types::{BufferUsage, FloatBuffer, IndexBuffer};

/// Vertex and index buffers for one static mesh.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct MeshBuffers {
    pub vertices: FloatBuffer,
    pub indices: IndexBuffer,
    /// Floats per vertex in `vertices`.
    pub components: u32,
}

impl MeshBuffers {
    /// Uploads `mesh` as two static buffers.
    pub fn upload<G>(gpu: &mut G, label: &'static str, mesh: &Mesh) -> Result<Self>
    where
        G: GpuContext + ?Sized,
    {
        if mesh.positions.is_empty() || mesh.indices.is_empty() {
            return Err(Error::EmptyBuffer { label });
        }
        debug_assert!(mesh.indices_in_bounds(), "mesh `{label}` has out-of-range indices");

        let vertices = gpu.create_float_buffer(label, &mesh.positions, BufferUsage::Static)?;
        let indices = gpu.create_index_buffer(label, &mesh.indices, BufferUsage::Static)?;
        Ok(Self {
            vertices,
            indices,
            components: mesh.components,
        })
    }

    #[inline]
    pub fn vertex_count(&self) -> u32 {
        self.vertices.len / self.components
    }
}

/// Builds a geodesic sphere of `depth` and uploads it.
pub fn geodesic_buffers<G>(gpu: &mut G, depth: u32) -> Result<MeshBuffers>
where
    G: GpuContext + ?Sized,
{
    MeshBuffers::upload(gpu, "geodesic sphere", &geodesic(depth)?)
}

/// Builds a quad-tree plane of `depth` and uploads it.
pub fn planar_buffers<G>(gpu: &mut G, depth: u32, flip: bool) -> Result<MeshBuffers>
where
    G: GpuContext + ?Sized,
{
    MeshBuffers::upload(gpu, "planar grid", &planar(depth, flip)?)
}
