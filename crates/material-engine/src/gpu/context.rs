use glam::Mat4;

use crate::Result;

use super::types::{
    AttribSlot, BufferUsage, FloatBuffer, IndexBuffer, Primitive, ProgramId, ShaderSource,
    TextureFilter, TextureId, TextureWrap, UniformSlot,
};

/// GL-style immediate interface to the GPU.
///
/// State set through this trait (bound program, bound buffers, attribute
/// pointers, uniforms) is global to the context and shared by every widget
/// drawing into it, so calls must be issued in order from a single thread.
///
/// Creation calls can fail; binding and drawing cannot. Misuse of the state
/// machine (drawing without a program, pointing an attribute with no buffer
/// bound) is a programming error and is reported through logs and debug
/// assertions rather than return values.
pub trait GpuContext {
    fn create_float_buffer(
        &mut self,
        label: &'static str,
        data: &[f32],
        usage: BufferUsage,
    ) -> Result<FloatBuffer>;

    fn create_index_buffer(
        &mut self,
        label: &'static str,
        data: &[u32],
        usage: BufferUsage,
    ) -> Result<IndexBuffer>;

    /// Compiles and links a vertex + fragment pair.
    fn create_program(
        &mut self,
        label: &str,
        vertex: &ShaderSource,
        fragment: &ShaderSource,
    ) -> Result<ProgramId>;

    fn attrib(&mut self, program: ProgramId, name: &str) -> Result<AttribSlot>;

    fn uniform(&mut self, program: ProgramId, name: &str) -> Result<UniformSlot>;

    fn use_program(&mut self, program: ProgramId);

    fn set_mat4(&mut self, slot: UniformSlot, value: &Mat4);

    fn set_vec4(&mut self, slot: UniformSlot, value: [f32; 4]);

    fn set_vec2(&mut self, slot: UniformSlot, value: [f32; 2]);

    fn set_int(&mut self, slot: UniformSlot, value: i32);

    fn bind_vertex_buffer(&mut self, buffer: &FloatBuffer);

    fn bind_index_buffer(&mut self, buffer: &IndexBuffer);

    /// Sources `attrib` from the bound vertex buffer, `components` floats per vertex.
    fn vertex_pointer(&mut self, attrib: AttribSlot, components: u32);

    fn bind_texture(&mut self, texture: TextureId, filter: TextureFilter, wrap: TextureWrap);

    fn draw_indexed(&mut self, buffer: &IndexBuffer, primitive: Primitive);
}
