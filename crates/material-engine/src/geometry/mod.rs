//! Procedural geometry.
//!
//! Everything here is pure CPU work: generators return a [`Mesh`] and never
//! touch the GPU. Uploading is done by [`crate::gpu::MeshBuffers`].
//!
//! Generators are deterministic for a given set of arguments, so callers may
//! build meshes once at startup and keep the resulting buffers for the
//! lifetime of the process.

mod geodesic;
mod mesh;
mod planar;
mod quadtree;
mod slab;

pub use geodesic::{MAX_GEODESIC_DEPTH, geodesic, geodesic_triangle_count, geodesic_vertex_count};
pub use mesh::Mesh;
pub use planar::{MAX_PLANAR_DEPTH, append_quad, flip_y, planar};
pub use quadtree::{Cell, MAX_QUAD_DEPTH, QuadKey, Quadrant, leaf_capacity, split};
pub use slab::slab;
