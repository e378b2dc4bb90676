//! GPU abstraction consumed by widgets.
//!
//! Widgets never talk to a graphics API directly. They issue GL-style calls
//! (bind, set uniform, draw) against a [`GpuContext`]. The crate ships one
//! implementation, [`CommandRecorder`], which turns those calls into a list of
//! self-contained [`DrawCall`]s that the wgpu renderer replays.

mod buffer;
mod context;
mod recorder;
mod types;

pub use buffer::{MeshBuffers, geodesic_buffers, planar_buffers};
pub use context::GpuContext;
pub use recorder::{BoundTexture, BufferData, CommandRecorder, DrawCall, VertexPointer};
pub use types::{
    AttribSlot, BufferId, BufferUsage, FilterMode, FloatBuffer, IndexBuffer, Primitive,
    ProgramId, ShaderSource, ShaderStage, TextureFilter, TextureId, TextureWrap, UniformSlot,
    UniformValue, WrapMode,
};
