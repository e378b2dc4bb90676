//! Coordinate and color types shared by the engine and the widget layer.
//!
//! Widget space:
//! - logical pixels
//! - origin top-left, +X right, +Y down
//!
//! Vectors and matrices come from `glam`; this module only adds the small
//! value types glam does not provide.

mod color;
mod rect;

pub use color::Color;
pub use rect::Rect;
