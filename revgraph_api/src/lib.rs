//! Shared revgraph data models consumed by the renderer and surface backends.

pub mod color;
pub mod glyph;
pub mod row;

pub use color::*;
pub use glyph::*;
pub use row::*;
