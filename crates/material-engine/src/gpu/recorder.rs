use std::collections::BTreeMap;

use glam::Mat4;

use crate::{Error, Result};

use super::context::GpuContext;
use super::types::{
    AttribSlot, BufferId, BufferUsage, FloatBuffer, IndexBuffer, Primitive, ProgramId,
    ShaderSource, ShaderStage, TextureFilter, TextureId, TextureWrap, UniformSlot, UniformValue,
};

/// Contents of a recorded buffer.
#[derive(Debug, Clone, PartialEq)]
pub enum BufferData {
    Float(Vec<f32>),
    Index(Vec<u32>),
}

/// Attribute source captured at draw time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexPointer {
    pub name: String,
    pub buffer: BufferId,
    pub components: u32,
}

/// Texture binding captured at draw time.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct BoundTexture {
    pub texture: TextureId,
    pub filter: TextureFilter,
    pub wrap: TextureWrap,
}

/// One self-contained draw: everything needed to replay it without the
/// context state that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    pub program: ProgramId,
    pub program_label: String,
    pub uniforms: BTreeMap<String, UniformValue>,
    pub pointers: Vec<VertexPointer>,
    pub index_buffer: BufferId,
    pub index_count: u32,
    pub primitive: Primitive,
    pub texture: Option<BoundTexture>,
}

impl DrawCall {
    #[inline]
    pub fn uniform(&self, name: &str) -> Option<&UniformValue> {
        self.uniforms.get(name)
    }

    #[inline]
    pub fn pointer(&self, name: &str) -> Option<&VertexPointer> {
        self.pointers.iter().find(|p| p.name == name)
    }

    #[inline]
    pub fn primitive_count(&self) -> u32 {
        self.index_count / self.primitive.vertices_per_primitive()
    }
}

struct StoredBuffer {
    label: &'static str,
    data: BufferData,
}

struct StoredProgram {
    label: String,
    vertex: ShaderSource,
    fragment: ShaderSource,
    attribs: Vec<String>,
    uniforms: Vec<String>,
    values: Vec<Option<UniformValue>>,
}

impl StoredProgram {
    fn declares(&self, name: &str) -> bool {
        self.vertex.declares(name) || self.fragment.declares(name)
    }
}

/// In-memory [`GpuContext`].
///
/// Behaves like a GL context: uniform values persist per program across
/// draws, buffers and programs persist across frames. Each `draw_indexed`
/// snapshots the current state into a [`DrawCall`].
///
/// Differences from GL, chosen so every draw call is reproducible on its own:
/// - `use_program` resets attribute pointers and the bound texture
/// - attribute and uniform names must appear in the program source
#[derive(Default)]
pub struct CommandRecorder {
    buffers: Vec<StoredBuffer>,
    programs: Vec<StoredProgram>,

    program: Option<ProgramId>,
    vertex_buffer: Option<FloatBuffer>,
    index_buffer: Option<IndexBuffer>,
    pointers: Vec<VertexPointer>,
    texture: Option<BoundTexture>,

    draws: Vec<DrawCall>,
}

impl CommandRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops the draw calls recorded so far. Buffers, programs and uniform
    /// values are kept.
    pub fn begin_frame(&mut self) {
        self.draws.clear();
    }

    /// Draw calls recorded since the last [`begin_frame`](Self::begin_frame), in issue order.
    #[inline]
    pub fn draws(&self) -> &[DrawCall] {
        &self.draws
    }

    #[inline]
    pub fn buffer_count(&self) -> usize {
        self.buffers.len()
    }

    pub fn buffer(&self, id: BufferId) -> Option<(&'static str, &BufferData)> {
        self.buffers
            .get(id.0 as usize)
            .map(|b| (b.label, &b.data))
    }

    pub fn float_data(&self, id: BufferId) -> Option<&[f32]> {
        match self.buffer(id)? {
            (_, BufferData::Float(v)) => Some(v),
            _ => None,
        }
    }

    pub fn index_data(&self, id: BufferId) -> Option<&[u32]> {
        match self.buffer(id)? {
            (_, BufferData::Index(v)) => Some(v),
            _ => None,
        }
    }

    /// Returns the label and the vertex/fragment sources of `program`.
    pub fn program_sources(
        &self,
        program: ProgramId,
    ) -> Option<(&str, &ShaderSource, &ShaderSource)> {
        self.programs
            .get(program.0 as usize)
            .map(|p| (p.label.as_str(), &p.vertex, &p.fragment))
    }

    fn push_buffer(&mut self, label: &'static str, data: BufferData) -> BufferId {
        let id = BufferId(self.buffers.len() as u32);
        self.buffers.push(StoredBuffer { label, data });
        id
    }

    fn stored(&self, program: ProgramId) -> Result<&StoredProgram> {
        self.programs
            .get(program.0 as usize)
            .ok_or(Error::UnknownProgram(program))
    }

    fn stored_mut(&mut self, program: ProgramId) -> Result<&mut StoredProgram> {
        self.programs
            .get_mut(program.0 as usize)
            .ok_or(Error::UnknownProgram(program))
    }

    fn set_uniform(&mut self, slot: UniformSlot, value: UniformValue) {
        if self.program != Some(slot.program) {
            log::warn!("uniform written for {:?} while {:?} is bound", slot.program, self.program);
            debug_assert!(false, "uniform slot does not belong to the bound program");
        }
        match self.stored_mut(slot.program) {
            Ok(program) => program.values[slot.index as usize] = Some(value),
            Err(err) => log::warn!("dropping uniform write: {err}"),
        }
    }

    /// Checks that every index of `indices` addresses a vertex in every
    /// attached stream.
    #[cfg(debug_assertions)]
    fn indices_fit_pointers(&self, indices: &[u32]) -> bool {
        let Some(&max) = indices.iter().max() else {
            return true;
        };
        self.pointers.iter().all(|p| {
            let len = self.float_data(p.buffer).map_or(0, <[f32]>::len);
            (max as usize) < len / p.components.max(1) as usize
        })
    }
}

impl GpuContext for CommandRecorder {
    fn create_float_buffer(
        &mut self,
        label: &'static str,
        data: &[f32],
        usage: BufferUsage,
    ) -> Result<FloatBuffer> {
        if data.is_empty() {
            return Err(Error::EmptyBuffer { label });
        }
        let id = self.push_buffer(label, BufferData::Float(data.to_vec()));
        Ok(FloatBuffer {
            id,
            len: data.len() as u32,
            usage,
        })
    }

    fn create_index_buffer(
        &mut self,
        label: &'static str,
        data: &[u32],
        usage: BufferUsage,
    ) -> Result<IndexBuffer> {
        if data.is_empty() {
            return Err(Error::EmptyBuffer { label });
        }
        let id = self.push_buffer(label, BufferData::Index(data.to_vec()));
        Ok(IndexBuffer {
            id,
            count: data.len() as u32,
            usage,
        })
    }

    fn create_program(
        &mut self,
        label: &str,
        vertex: &ShaderSource,
        fragment: &ShaderSource,
    ) -> Result<ProgramId> {
        let link_error = |message: String| Error::ShaderCompile {
            label: label.to_owned(),
            message,
        };

        if vertex.stage != ShaderStage::Vertex {
            return Err(link_error(format!("`{}` is not a vertex shader", vertex.name)));
        }
        if fragment.stage != ShaderStage::Fragment {
            return Err(link_error(format!("`{}` is not a fragment shader", fragment.name)));
        }
        for src in [vertex, fragment] {
            if src.code.trim().is_empty() {
                return Err(link_error(format!("`{}` is empty", src.name)));
            }
        }

        let id = ProgramId(self.programs.len() as u32);
        self.programs.push(StoredProgram {
            label: label.to_owned(),
            vertex: vertex.clone(),
            fragment: fragment.clone(),
            attribs: Vec::new(),
            uniforms: Vec::new(),
            values: Vec::new(),
        });
        log::debug!("linked program `{label}` as {id:?} ({} + {})", vertex.name, fragment.name);
        Ok(id)
    }

    fn attrib(&mut self, program: ProgramId, name: &str) -> Result<AttribSlot> {
        let stored = self.stored_mut(program)?;
        if !stored.vertex.declares(name) {
            return Err(Error::UnknownAttribute {
                program: stored.label.clone(),
                name: name.to_owned(),
            });
        }
        let index = match stored.attribs.iter().position(|a| a == name) {
            Some(i) => i,
            None => {
                stored.attribs.push(name.to_owned());
                stored.attribs.len() - 1
            }
        };
        Ok(AttribSlot {
            program,
            index: index as u32,
        })
    }

    fn uniform(&mut self, program: ProgramId, name: &str) -> Result<UniformSlot> {
        let stored = self.stored_mut(program)?;
        if !stored.declares(name) {
            return Err(Error::UnknownUniform {
                program: stored.label.clone(),
                name: name.to_owned(),
            });
        }
        let index = match stored.uniforms.iter().position(|u| u == name) {
            Some(i) => i,
            None => {
                stored.uniforms.push(name.to_owned());
                stored.values.push(None);
                stored.uniforms.len() - 1
            }
        };
        Ok(UniformSlot {
            program,
            index: index as u32,
        })
    }

    fn use_program(&mut self, program: ProgramId) {
        debug_assert!(self.stored(program).is_ok(), "use of unknown program {program:?}");
        self.program = Some(program);
        self.pointers.clear();
        self.texture = None;
    }

    fn set_mat4(&mut self, slot: UniformSlot, value: &Mat4) {
        self.set_uniform(slot, UniformValue::mat4(value));
    }

    fn set_vec4(&mut self, slot: UniformSlot, value: [f32; 4]) {
        self.set_uniform(slot, UniformValue::Vec4(value));
    }

    fn set_vec2(&mut self, slot: UniformSlot, value: [f32; 2]) {
        self.set_uniform(slot, UniformValue::Vec2(value));
    }

    fn set_int(&mut self, slot: UniformSlot, value: i32) {
        self.set_uniform(slot, UniformValue::Int(value));
    }

    fn bind_vertex_buffer(&mut self, buffer: &FloatBuffer) {
        self.vertex_buffer = Some(*buffer);
    }

    fn bind_index_buffer(&mut self, buffer: &IndexBuffer) {
        self.index_buffer = Some(*buffer);
    }

    fn vertex_pointer(&mut self, attrib: AttribSlot, components: u32) {
        let Some(buffer) = self.vertex_buffer else {
            log::warn!("vertex_pointer without a bound vertex buffer; ignored");
            debug_assert!(false, "vertex_pointer without a bound vertex buffer");
            return;
        };
        let name = match self.stored(attrib.program) {
            Ok(p) => p.attribs[attrib.index as usize].clone(),
            Err(err) => {
                log::warn!("dropping vertex pointer: {err}");
                return;
            }
        };

        self.pointers.retain(|p| p.name != name);
        self.pointers.push(VertexPointer {
            name,
            buffer: buffer.id,
            components,
        });
    }

    fn bind_texture(&mut self, texture: TextureId, filter: TextureFilter, wrap: TextureWrap) {
        self.texture = Some(BoundTexture {
            texture,
            filter,
            wrap,
        });
    }

    fn draw_indexed(&mut self, buffer: &IndexBuffer, primitive: Primitive) {
        let Some(program) = self.program else {
            log::warn!("draw_indexed without a program; ignored");
            debug_assert!(false, "draw_indexed without a program");
            return;
        };
        if self.index_buffer.map(|b| b.id) != Some(buffer.id) {
            log::warn!("draw_indexed with {:?} while {:?} is bound", buffer.id, self.index_buffer);
        }

        // Full index scan: debug builds only.
        #[cfg(debug_assertions)]
        {
            let indices = self.index_data(buffer.id).unwrap_or_default();
            assert!(
                self.indices_fit_pointers(indices),
                "draw of {:?} indexes past the end of a vertex stream",
                buffer.id
            );
        }

        let Ok(stored) = self.stored(program) else {
            return;
        };
        let uniforms = stored
            .uniforms
            .iter()
            .zip(&stored.values)
            .filter_map(|(name, value)| value.map(|v| (name.clone(), v)))
            .collect();

        let call = DrawCall {
            program,
            program_label: stored.label.clone(),
            uniforms,
            pointers: self.pointers.clone(),
            index_buffer: buffer.id,
            index_count: buffer.count,
            primitive,
            texture: self.texture,
        };
        self.draws.push(call);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VERT: &str = "@location(0) position: vec3<f32>; u.world; u.color;";
    const FRAG: &str = "return u.color;";

    fn program(gpu: &mut CommandRecorder) -> ProgramId {
        gpu.create_program(
            "test",
            &ShaderSource::vertex("test-vert", VERT),
            &ShaderSource::fragment("test-frag", FRAG),
        )
        .unwrap()
    }

    fn triangle(gpu: &mut CommandRecorder) -> (FloatBuffer, IndexBuffer) {
        let v = gpu
            .create_float_buffer("tri", &[0.0; 9], BufferUsage::Static)
            .unwrap();
        let i = gpu
            .create_index_buffer("tri", &[0, 1, 2], BufferUsage::Static)
            .unwrap();
        (v, i)
    }

    #[test]
    fn unknown_names_are_resource_errors() {
        let mut gpu = CommandRecorder::new();
        let prg = program(&mut gpu);
        assert!(matches!(gpu.uniform(prg, "proj"), Err(Error::UnknownUniform { .. })));
        assert!(matches!(gpu.attrib(prg, "tc0"), Err(Error::UnknownAttribute { .. })));
        assert!(gpu.uniform(prg, "color").is_ok());
    }

    #[test]
    fn resolving_twice_returns_the_same_slot() {
        let mut gpu = CommandRecorder::new();
        let prg = program(&mut gpu);
        assert_eq!(gpu.uniform(prg, "world").unwrap(), gpu.uniform(prg, "world").unwrap());
        assert_eq!(gpu.attrib(prg, "position").unwrap(), gpu.attrib(prg, "position").unwrap());
    }

    #[test]
    fn mismatched_stages_fail_to_link() {
        let mut gpu = CommandRecorder::new();
        let err = gpu
            .create_program(
                "swapped",
                &ShaderSource::fragment("f", FRAG),
                &ShaderSource::vertex("v", VERT),
            )
            .unwrap_err();
        assert!(matches!(err, Error::ShaderCompile { .. }));
    }

    #[test]
    fn draw_snapshots_state() {
        let mut gpu = CommandRecorder::new();
        let prg = program(&mut gpu);
        let color = gpu.uniform(prg, "color").unwrap();
        let position = gpu.attrib(prg, "position").unwrap();
        let (vbuf, ibuf) = triangle(&mut gpu);

        gpu.use_program(prg);
        gpu.set_vec4(color, [1.0, 0.0, 0.0, 1.0]);
        gpu.bind_vertex_buffer(&vbuf);
        gpu.bind_index_buffer(&ibuf);
        gpu.vertex_pointer(position, 3);
        gpu.draw_indexed(&ibuf, Primitive::Triangles);

        let [call] = gpu.draws() else { panic!("expected one draw") };
        assert_eq!(call.program, prg);
        assert_eq!(call.program_label, "test");
        assert_eq!(call.uniform("color"), Some(&UniformValue::Vec4([1.0, 0.0, 0.0, 1.0])));
        assert_eq!(call.pointer("position").map(|p| (p.buffer, p.components)), Some((vbuf.id, 3)));
        assert_eq!(call.primitive_count(), 1);
        assert_eq!(call.texture, None);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "indexes past the end of a vertex stream")]
    fn out_of_range_index_panics_in_debug() {
        let mut gpu = CommandRecorder::new();
        let prg = program(&mut gpu);
        let position = gpu.attrib(prg, "position").unwrap();
        let (vbuf, _) = triangle(&mut gpu);
        // Three vertices; index 3 is one past the end.
        let ibuf = gpu
            .create_index_buffer("bad", &[0, 1, 3], BufferUsage::Static)
            .unwrap();

        gpu.use_program(prg);
        gpu.bind_vertex_buffer(&vbuf);
        gpu.bind_index_buffer(&ibuf);
        gpu.vertex_pointer(position, 3);
        gpu.draw_indexed(&ibuf, Primitive::Triangles);
    }

    #[test]
    fn uniforms_persist_but_pointers_reset_on_use_program() {
        let mut gpu = CommandRecorder::new();
        let prg = program(&mut gpu);
        let color = gpu.uniform(prg, "color").unwrap();
        let position = gpu.attrib(prg, "position").unwrap();
        let (vbuf, ibuf) = triangle(&mut gpu);

        gpu.use_program(prg);
        gpu.set_vec4(color, [0.5; 4]);
        gpu.bind_vertex_buffer(&vbuf);
        gpu.vertex_pointer(position, 3);
        gpu.bind_texture(TextureId::new(2), TextureFilter::default(), TextureWrap::default());

        gpu.use_program(prg);
        gpu.bind_index_buffer(&ibuf);
        gpu.draw_indexed(&ibuf, Primitive::Triangles);

        let call = &gpu.draws()[0];
        assert_eq!(call.uniform("color"), Some(&UniformValue::Vec4([0.5; 4])));
        assert!(call.pointers.is_empty());
        assert_eq!(call.texture, None);
    }

    #[test]
    fn begin_frame_keeps_resources() {
        let mut gpu = CommandRecorder::new();
        let prg = program(&mut gpu);
        let (_, ibuf) = triangle(&mut gpu);
        gpu.use_program(prg);
        gpu.bind_index_buffer(&ibuf);
        gpu.draw_indexed(&ibuf, Primitive::Triangles);
        assert_eq!(gpu.draws().len(), 1);

        gpu.begin_frame();
        assert!(gpu.draws().is_empty());
        assert_eq!(gpu.buffer_count(), 2);
        assert!(gpu.program_sources(prg).is_some());
    }

    #[test]
    fn empty_buffers_are_rejected() {
        let mut gpu = CommandRecorder::new();
        assert_eq!(
            gpu.create_float_buffer("nothing", &[], BufferUsage::Static),
            Err(Error::EmptyBuffer { label: "nothing" })
        );
    }
}
