use serde::{Deserialize, Serialize};

/// Point in surface pixel space; y grows downwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Point {
    /// Horizontal offset from the left edge.
    pub x: f64,
    /// Vertical offset from the top edge.
    pub y: f64,
}

impl Point {
    /// Convenience constructor.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Surface dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Size {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Size {
    /// Convenience constructor.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Cubic Bezier segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CubicCurve {
    /// Start point.
    pub from: Point,
    /// Control point pulling away from `from`.
    pub control1: Point,
    /// Control point pulling into `to`.
    pub control2: Point,
    /// End point.
    pub to: Point,
}

/// Stroke parameters for lines and curves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    /// Hex color.
    pub color: String,
    /// Width in pixels.
    pub width: f64,
}

impl Stroke {
    /// Convenience constructor.
    pub fn new(color: impl Into<String>, width: f64) -> Self {
        Self {
            color: color.into(),
            width,
        }
    }
}

/// Styling for vertex glyphs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlyphStyle {
    /// Hex color used for fills and strokes.
    pub color: String,
    /// Radius of the glyph's bounding circle.
    pub radius: f64,
    /// Stroke width for the line-based glyphs.
    pub line_width: f64,
}

/// Capabilities advertised by a surface backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceCapabilities {
    /// Whether the backend rasterizes (as opposed to emitting vector primitives).
    pub raster: bool,
    /// Media type of the bytes returned by `finish`.
    pub media_type: String,
}

impl SurfaceCapabilities {
    /// Construct capabilities with explicit values.
    pub fn new(raster: bool, media_type: impl Into<String>) -> Self {
        Self {
            raster,
            media_type: media_type.into(),
        }
    }
}

/// Summary information about a registered backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceSummary {
    /// Stable identifier for the backend.
    pub id: String,
    /// Human-friendly label for display.
    pub label: String,
    /// Capability flags.
    pub capabilities: SurfaceCapabilities,
}

/// Encoded surface content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceOutput {
    /// Media type of `bytes`.
    pub media_type: String,
    /// Encoded document or image.
    pub bytes: Vec<u8>,
}

impl SurfaceOutput {
    /// Convenience constructor.
    pub fn new(media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            media_type: media_type.into(),
            bytes,
        }
    }
}

/// Errors surfaced by drawing surfaces.
#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    /// A draw call arrived before the surface was sized.
    #[error("surface must be resized before drawing")]
    NotSized,
    /// The requested dimensions cannot be allocated.
    #[error("invalid surface size {width}x{height}")]
    InvalidSize {
        /// Requested width.
        width: f64,
        /// Requested height.
        height: f64,
    },
    /// A stroke or glyph color is not a hex color.
    #[error("invalid color '{color}'")]
    InvalidColor {
        /// Offending color string.
        color: String,
    },
    /// A stroke width the backend cannot paint.
    #[error("invalid stroke width {width}")]
    InvalidStrokeWidth {
        /// Requested width.
        width: f64,
    },
    /// Encoding the surface content failed.
    #[error("failed to encode surface: {message}")]
    Encode {
        /// Backend-provided detail.
        message: String,
    },
}

/// Convenience result alias for surface operations.
pub type SurfaceResult<T> = std::result::Result<T, SurfaceError>;
