//! wgpu replay of recorded frames.
//!
//! Widgets draw into a [`CommandRecorder`](crate::gpu::CommandRecorder); the
//! [`MeshRenderer`] turns the recorded draw calls into wgpu render passes.
//!
//! Convention:
//! - programs are WGSL with `vs_main` / `fs_main` entry points
//! - per-draw uniforms live in group 0 (`DrawUniforms` layout)
//! - the bound texture + sampler live in group 1
//! - vertex slot 0 is `position`, slot 1 is `tc0`

mod ctx;
mod mesh;

pub use ctx::{RenderCtx, RenderTarget};
pub use mesh::{DrawUniforms, MeshRenderer};
