use crate::gpu::ProgramId;

/// Errors raised while generating geometry or creating GPU resources.
///
/// Precondition violations (`DepthTooLarge`, `MalformedQuadKey`) are reported
/// before anything is allocated. Resource failures are fatal to whatever was
/// being constructed and must be propagated by the caller.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("subdivision depth {requested} exceeds the supported maximum of {max}")]
    DepthTooLarge { requested: u32, max: u32 },

    #[error("malformed quad-tree key {0:#b}")]
    MalformedQuadKey(u32),

    #[error("failed to link program `{label}`: {message}")]
    ShaderCompile { label: String, message: String },

    #[error("program `{program}` has no attribute named `{name}`")]
    UnknownAttribute { program: String, name: String },

    #[error("program `{program}` has no uniform named `{name}`")]
    UnknownUniform { program: String, name: String },

    #[error("unknown program {0:?}")]
    UnknownProgram(ProgramId),

    #[error("refusing to create empty buffer `{label}`")]
    EmptyBuffer { label: &'static str },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
