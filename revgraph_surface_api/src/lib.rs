mod registry;
mod types;

pub use registry::SurfaceRegistry;
pub use types::{
    CubicCurve, GlyphStyle, Point, Size, Stroke, SurfaceCapabilities, SurfaceError,
    SurfaceOutput, SurfaceResult, SurfaceSummary,
};

use revgraph_api::Glyph;

/// Drawing target for one render pass (an SVG document, a raster canvas, ...).
///
/// Callers size the surface with [`DrawingSurface::resize`] before drawing.
pub trait DrawingSurface {
    /// Set the pixel dimensions of the surface, discarding prior content.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError::InvalidSize`] when the backend cannot allocate
    /// the requested dimensions.
    fn resize(&mut self, size: Size) -> SurfaceResult<()>;

    /// Draw a straight segment.
    ///
    /// # Errors
    ///
    /// Backends surface unsized surfaces and unparseable colors.
    fn draw_line(&mut self, from: Point, to: Point, stroke: &Stroke) -> SurfaceResult<()>;

    /// Draw a cubic Bezier segment.
    ///
    /// # Errors
    ///
    /// Backends surface unsized surfaces and unparseable colors.
    fn draw_curve(&mut self, curve: &CubicCurve, stroke: &Stroke) -> SurfaceResult<()>;

    /// Draw a vertex glyph centered on `center`.
    ///
    /// # Errors
    ///
    /// Backends surface unsized surfaces and unparseable colors.
    fn draw_glyph(&mut self, center: Point, glyph: Glyph, style: &GlyphStyle)
        -> SurfaceResult<()>;

    /// Serialize the current surface content.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError::Encode`] when the backend fails to encode.
    fn finish(&mut self) -> SurfaceResult<SurfaceOutput>;
}

/// Factory for drawing surfaces, registered under a stable identifier.
pub trait SurfaceBackend: Send + Sync {
    /// Stable identifier used for lookup and logging.
    fn id(&self) -> &'static str;

    /// Human-friendly label.
    fn label(&self) -> &'static str;

    /// Capabilities advertised by the backend.
    fn capabilities(&self) -> SurfaceCapabilities;

    /// Create a fresh, unsized surface.
    fn create(&self) -> Box<dyn DrawingSurface>;
}

/// External row elements the graph lines up with.
///
/// Acts as a layout oracle (row heights) and as the target of the
/// left-padding side effect that pushes row text past the drawn tracks.
pub trait RowAnchors {
    /// Rendered height of the row identified by `node`, if it exists.
    fn row_height(&self, node: &str) -> Option<f64>;

    /// Set the left padding of the row identified by `node`.
    fn set_padding_left(&mut self, node: &str, padding: f64);
}
