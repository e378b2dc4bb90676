use std::borrow::Cow;

use glam::Mat4;

/// Handle to a buffer owned by a [`GpuContext`](super::GpuContext).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct BufferId(pub(crate) u32);

/// Handle to a linked program.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ProgramId(pub(crate) u32);

/// Resolved vertex attribute of a program.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct AttribSlot {
    pub(crate) program: ProgramId,
    pub(crate) index: u32,
}

/// Resolved uniform of a program.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct UniformSlot {
    pub(crate) program: ProgramId,
    pub(crate) index: u32,
}

/// Texture living in a texture unit.
///
/// Textures are created outside this crate; the id is the unit (atlas index)
/// the texture was registered under.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct TextureId(u32);

impl TextureId {
    #[inline]
    pub const fn new(unit: u32) -> Self {
        Self(unit)
    }

    #[inline]
    pub const fn unit(self) -> u32 {
        self.0
    }

    /// Decodes a raw handle where `0` means "no texture" and any other value is
    /// `unit + 1`.
    #[inline]
    pub const fn from_raw_handle(raw: u32) -> Option<Self> {
        match raw {
            0 => None,
            n => Some(Self(n - 1)),
        }
    }

    /// Inverse of [`TextureId::from_raw_handle`].
    #[inline]
    pub fn to_raw_handle(texture: Option<Self>) -> u32 {
        texture.map_or(0, |t| t.0 + 1)
    }
}

/// Upload frequency hint for buffer creation.
///
/// All geometry here is generated once, so `Static` is the only hint.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum BufferUsage {
    /// Written once, drawn many times.
    #[default]
    Static,
}

/// Primitive kind of an indexed draw.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Primitive {
    Triangles,
}

impl Primitive {
    #[inline]
    pub const fn vertices_per_primitive(self) -> u32 {
        match self {
            Primitive::Triangles => 3,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum FilterMode {
    Nearest,
    Linear,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum WrapMode {
    Repeat,
    MirrorRepeat,
    ClampToEdge,
}

/// Minification and magnification filters.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct TextureFilter {
    pub min: FilterMode,
    pub mag: FilterMode,
}

impl TextureFilter {
    #[inline]
    pub const fn new(min: FilterMode, mag: FilterMode) -> Self {
        Self { min, mag }
    }
}

impl Default for TextureFilter {
    fn default() -> Self {
        Self::new(FilterMode::Linear, FilterMode::Linear)
    }
}

/// Wrap modes along the horizontal (`s`) and vertical (`t`) texture axes.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct TextureWrap {
    pub s: WrapMode,
    pub t: WrapMode,
}

impl TextureWrap {
    #[inline]
    pub const fn new(s: WrapMode, t: WrapMode) -> Self {
        Self { s, t }
    }
}

impl Default for TextureWrap {
    fn default() -> Self {
        Self::new(WrapMode::Repeat, WrapMode::Repeat)
    }
}

/// Value written to a uniform slot.
///
/// Matrices are stored column-major, matching both `glam` and WGSL.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum UniformValue {
    Mat4([[f32; 4]; 4]),
    Vec4([f32; 4]),
    Vec2([f32; 2]),
    Int(i32),
}

impl UniformValue {
    #[inline]
    pub fn mat4(m: &Mat4) -> Self {
        Self::Mat4(m.to_cols_array_2d())
    }

    pub fn as_mat4(&self) -> Option<Mat4> {
        match self {
            Self::Mat4(m) => Some(Mat4::from_cols_array_2d(m)),
            _ => None,
        }
    }

    pub fn as_vec4(&self) -> Option<[f32; 4]> {
        match *self {
            Self::Vec4(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_vec2(&self) -> Option<[f32; 2]> {
        match *self {
            Self::Vec2(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match *self {
            Self::Int(v) => Some(v),
            _ => None,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

/// Shader text for one stage, as handed over by the asset loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSource {
    pub stage: ShaderStage,
    /// Asset name, used for labels and error messages.
    pub name: Cow<'static, str>,
    pub code: Cow<'static, str>,
}

impl ShaderSource {
    pub fn vertex(name: impl Into<Cow<'static, str>>, code: impl Into<Cow<'static, str>>) -> Self {
        Self {
            stage: ShaderStage::Vertex,
            name: name.into(),
            code: code.into(),
        }
    }

    pub fn fragment(
        name: impl Into<Cow<'static, str>>,
        code: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            stage: ShaderStage::Fragment,
            name: name.into(),
            code: code.into(),
        }
    }

    /// Returns true if `ident` appears as a whole identifier in the source.
    pub fn declares(&self, ident: &str) -> bool {
        self.code
            .split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .any(|token| token == ident)
    }
}

/// Vertex buffer of packed `f32`s.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FloatBuffer {
    pub id: BufferId,
    pub len: u32,
    pub usage: BufferUsage,
}

/// Index buffer of `u32`s.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct IndexBuffer {
    pub id: BufferId,
    pub count: u32,
    pub usage: BufferUsage,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_texture_handles_use_zero_as_none() {
        assert_eq!(TextureId::from_raw_handle(0), None);
        assert_eq!(TextureId::from_raw_handle(1), Some(TextureId::new(0)));
        assert_eq!(TextureId::to_raw_handle(Some(TextureId::new(4))), 5);
        assert_eq!(TextureId::to_raw_handle(None), 0);
    }

    #[test]
    fn declares_matches_whole_identifiers() {
        let src = ShaderSource::vertex("t", "let tc0_scaled = u.world * in.position;");
        assert!(src.declares("world"));
        assert!(src.declares("position"));
        assert!(!src.declares("tc0"));
        assert!(!src.declares("pos"));
    }
}
