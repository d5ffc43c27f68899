//! Drawing surface backends and the render service built on them.

mod service;

pub use revgraph_surface_api::{
    CubicCurve, DrawingSurface, GlyphStyle, Point, RowAnchors, Size, Stroke, SurfaceBackend,
    SurfaceCapabilities, SurfaceError, SurfaceOutput, SurfaceRegistry, SurfaceResult,
    SurfaceSummary,
};
pub use revgraph_surfaces::{
    default_registry, CanvasBackend, CanvasSurface, SvgBackend, SvgSurface,
};

pub use service::{RenderOutput, RenderService};
