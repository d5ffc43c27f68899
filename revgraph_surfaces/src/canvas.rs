//! Raster backend: paints into a tiny-skia pixmap and encodes it as PNG.

use revgraph_api::{Glyph, Rgb};
use revgraph_surface_api::{
    CubicCurve, DrawingSurface, GlyphStyle, Point, Size, Stroke, SurfaceBackend,
    SurfaceCapabilities, SurfaceError, SurfaceOutput, SurfaceResult,
};
use tiny_skia::{FillRule, LineCap, Paint, Path, PathBuilder, Pixmap, Transform};

use crate::glyphs;

const MEDIA_TYPE: &str = "image/png";

/// Largest pixmap area accepted by `resize` (64 Mpx, 256 MiB of RGBA).
const MAX_PIXELS: u64 = 64 * 1024 * 1024;

/// Backend producing [`CanvasSurface`]s.
#[derive(Debug, Default)]
pub struct CanvasBackend;

impl SurfaceBackend for CanvasBackend {
    fn id(&self) -> &'static str {
        "canvas"
    }

    fn label(&self) -> &'static str {
        "Raster canvas (PNG)"
    }

    fn capabilities(&self) -> SurfaceCapabilities {
        SurfaceCapabilities::new(true, MEDIA_TYPE)
    }

    fn create(&self) -> Box<dyn DrawingSurface> {
        Box::new(CanvasSurface::new())
    }
}

/// Anti-aliased RGBA canvas.
#[derive(Debug, Default)]
pub struct CanvasSurface {
    pixmap: Option<Pixmap>,
}

impl CanvasSurface {
    /// Create an unsized canvas.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pixel buffer, once sized.
    #[must_use]
    pub fn pixmap(&self) -> Option<&Pixmap> {
        self.pixmap.as_ref()
    }

    fn pixmap_mut(&mut self) -> SurfaceResult<&mut Pixmap> {
        self.pixmap.as_mut().ok_or(SurfaceError::NotSized)
    }

    fn stroke(&mut self, path: &Path, color: &str, width: f64) -> SurfaceResult<()> {
        let paint = paint(color)?;
        let pixels = width as f32;
        if !(pixels.is_finite() && pixels > 0.0) {
            return Err(SurfaceError::InvalidStrokeWidth { width });
        }
        let stroke = tiny_skia::Stroke {
            width: pixels,
            line_cap: LineCap::Round,
            ..tiny_skia::Stroke::default()
        };
        self.pixmap_mut()?
            .stroke_path(path, &paint, &stroke, Transform::identity(), None);
        Ok(())
    }
}

impl DrawingSurface for CanvasSurface {
    fn resize(&mut self, size: Size) -> SurfaceResult<()> {
        let invalid = || SurfaceError::InvalidSize {
            width: size.width,
            height: size.height,
        };
        if !(size.width.is_finite() && size.height.is_finite())
            || size.width < 0.0
            || size.height < 0.0
            || size.width > f64::from(u16::MAX)
            || size.height > f64::from(u16::MAX)
        {
            return Err(invalid());
        }

        // Pixmaps cannot be empty; an empty graph still yields a 1px image.
        let width = (size.width.ceil() as u32).max(1);
        let height = (size.height.ceil() as u32).max(1);
        if u64::from(width) * u64::from(height) > MAX_PIXELS {
            return Err(invalid());
        }
        log::trace!("canvas surface resized to {width}x{height}");
        self.pixmap = Some(Pixmap::new(width, height).ok_or_else(invalid)?);
        Ok(())
    }

    fn draw_line(&mut self, from: Point, to: Point, stroke: &Stroke) -> SurfaceResult<()> {
        self.pixmap_mut()?;
        let mut builder = PathBuilder::new();
        builder.move_to(from.x as f32, from.y as f32);
        builder.line_to(to.x as f32, to.y as f32);
        match builder.finish() {
            Some(path) => self.stroke(&path, &stroke.color, stroke.width),
            None => Ok(()),
        }
    }

    fn draw_curve(&mut self, curve: &CubicCurve, stroke: &Stroke) -> SurfaceResult<()> {
        self.pixmap_mut()?;
        let mut builder = PathBuilder::new();
        builder.move_to(curve.from.x as f32, curve.from.y as f32);
        builder.cubic_to(
            curve.control1.x as f32,
            curve.control1.y as f32,
            curve.control2.x as f32,
            curve.control2.y as f32,
            curve.to.x as f32,
            curve.to.y as f32,
        );
        match builder.finish() {
            Some(path) => self.stroke(&path, &stroke.color, stroke.width),
            None => Ok(()),
        }
    }

    fn draw_glyph(
        &mut self,
        center: Point,
        glyph: Glyph,
        style: &GlyphStyle,
    ) -> SurfaceResult<()> {
        self.pixmap_mut()?;
        match glyphs::segments(center, glyph, style.radius) {
            None => {
                let paint = paint(&style.color)?;
                let Some(circle) =
                    PathBuilder::from_circle(center.x as f32, center.y as f32, style.radius as f32)
                else {
                    return Ok(());
                };
                self.pixmap_mut()?.fill_path(
                    &circle,
                    &paint,
                    FillRule::Winding,
                    Transform::identity(),
                    None,
                );
                Ok(())
            }
            Some(segments) => {
                let width = glyphs::stroke_width(style.radius, style.line_width);
                let mut builder = PathBuilder::new();
                for (from, to) in segments {
                    builder.move_to(from.x as f32, from.y as f32);
                    builder.line_to(to.x as f32, to.y as f32);
                }
                match builder.finish() {
                    Some(path) => self.stroke(&path, &style.color, width),
                    None => Ok(()),
                }
            }
        }
    }

    fn finish(&mut self) -> SurfaceResult<SurfaceOutput> {
        let png = self
            .pixmap
            .as_ref()
            .ok_or(SurfaceError::NotSized)?
            .encode_png()
            .map_err(|err| SurfaceError::Encode {
                message: err.to_string(),
            })?;
        Ok(SurfaceOutput::new(MEDIA_TYPE, png))
    }
}

fn paint(color: &str) -> SurfaceResult<Paint<'static>> {
    let rgb = Rgb::parse_hex(color).ok_or_else(|| SurfaceError::InvalidColor {
        color: color.to_owned(),
    })?;
    let mut paint = Paint::default();
    paint.set_color_rgba8(rgb.r, rgb.g, rgb.b, 255);
    paint.anti_alias = true;
    Ok(paint)
}
