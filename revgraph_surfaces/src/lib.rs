mod canvas;
mod glyphs;
mod svg;

pub use canvas::{CanvasBackend, CanvasSurface};
pub use svg::{SvgBackend, SvgSurface};

use revgraph_surface_api::SurfaceRegistry;

/// Build a surface registry populated with the builtin backends.
#[must_use]
pub fn default_registry() -> SurfaceRegistry {
    let mut registry = SurfaceRegistry::new();
    registry.register(SvgBackend);
    registry.register(CanvasBackend);
    registry
}
