//! Material engine crate.
//!
//! This crate owns the pieces below the widget layer:
//! - procedural geometry (geodesic sphere, quad-tree plane, unit slab)
//! - the GPU abstraction widgets draw through, plus an in-memory recorder
//! - the wgpu device and the renderer that replays recorded frames

pub mod coords;
pub mod device;
pub mod geometry;
pub mod gpu;
pub mod logging;
pub mod render;

mod error;

pub use error::{Error, Result};
