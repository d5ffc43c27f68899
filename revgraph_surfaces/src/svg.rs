//! Vector backend: accumulates SVG elements and serializes them as a document.

use revgraph_api::{Glyph, Rgb};
use revgraph_surface_api::{
    CubicCurve, DrawingSurface, GlyphStyle, Point, Size, Stroke, SurfaceBackend,
    SurfaceCapabilities, SurfaceError, SurfaceOutput, SurfaceResult,
};

use crate::glyphs;

const MEDIA_TYPE: &str = "image/svg+xml";

/// Backend producing [`SvgSurface`]s.
#[derive(Debug, Default)]
pub struct SvgBackend;

impl SurfaceBackend for SvgBackend {
    fn id(&self) -> &'static str {
        "svg"
    }

    fn label(&self) -> &'static str {
        "SVG document"
    }

    fn capabilities(&self) -> SurfaceCapabilities {
        SurfaceCapabilities::new(false, MEDIA_TYPE)
    }

    fn create(&self) -> Box<dyn DrawingSurface> {
        Box::new(SvgSurface::new())
    }
}

/// SVG document under construction.
#[derive(Debug, Default)]
pub struct SvgSurface {
    size: Option<Size>,
    elements: Vec<String>,
}

impl SvgSurface {
    /// Create an unsized, empty surface.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current document text.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError::NotSized`] before the first resize.
    pub fn document(&self) -> SurfaceResult<String> {
        let size = self.size.ok_or(SurfaceError::NotSized)?;
        let (width, height) = (num(size.width), num(size.height));

        let mut out = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
        );
        out.push('\n');
        for element in &self.elements {
            out.push_str("  ");
            out.push_str(element);
            out.push('\n');
        }
        out.push_str("</svg>\n");
        Ok(out)
    }

    fn push(&mut self, element: String) -> SurfaceResult<()> {
        if self.size.is_none() {
            return Err(SurfaceError::NotSized);
        }
        self.elements.push(element);
        Ok(())
    }
}

impl DrawingSurface for SvgSurface {
    fn resize(&mut self, size: Size) -> SurfaceResult<()> {
        if !(size.width.is_finite() && size.height.is_finite())
            || size.width < 0.0
            || size.height < 0.0
        {
            return Err(SurfaceError::InvalidSize {
                width: size.width,
                height: size.height,
            });
        }
        log::trace!("svg surface resized to {}x{}", size.width, size.height);
        self.size = Some(size);
        self.elements.clear();
        Ok(())
    }

    fn draw_line(&mut self, from: Point, to: Point, stroke: &Stroke) -> SurfaceResult<()> {
        let element = line(from, to, checked(&stroke.color)?, stroke.width);
        self.push(element)
    }

    fn draw_curve(&mut self, curve: &CubicCurve, stroke: &Stroke) -> SurfaceResult<()> {
        let color = checked(&stroke.color)?;
        let CubicCurve {
            from,
            control1,
            control2,
            to,
        } = curve;
        let d = format!(
            "M {} {} C {} {}, {} {}, {} {}",
            num(from.x),
            num(from.y),
            num(control1.x),
            num(control1.y),
            num(control2.x),
            num(control2.y),
            num(to.x),
            num(to.y),
        );
        let width = num(stroke.width);
        self.push(format!(
            r#"<path d="{d}" fill="none" stroke="{color}" stroke-width="{width}" stroke-linecap="round"/>"#
        ))
    }

    fn draw_glyph(
        &mut self,
        center: Point,
        glyph: Glyph,
        style: &GlyphStyle,
    ) -> SurfaceResult<()> {
        let color = checked(&style.color)?;
        let element = match glyphs::segments(center, glyph, style.radius) {
            None => format!(
                r#"<circle cx="{}" cy="{}" r="{}" fill="{color}"/>"#,
                num(center.x),
                num(center.y),
                num(style.radius),
            ),
            Some(segments) => {
                let width = glyphs::stroke_width(style.radius, style.line_width);
                let lines: Vec<String> = segments
                    .into_iter()
                    .map(|(from, to)| line(from, to, color, width))
                    .collect();
                format!(r#"<g class="glyph-{}">{}</g>"#, glyph_class(glyph), lines.concat())
            }
        };
        self.push(element)
    }

    fn finish(&mut self) -> SurfaceResult<SurfaceOutput> {
        Ok(SurfaceOutput::new(MEDIA_TYPE, self.document()?.into_bytes()))
    }
}

fn line(from: Point, to: Point, color: &str, width: f64) -> String {
    format!(
        r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{color}" stroke-width="{}" stroke-linecap="round"/>"#,
        num(from.x),
        num(from.y),
        num(to.x),
        num(to.y),
        num(width),
    )
}

const fn glyph_class(glyph: Glyph) -> &'static str {
    match glyph {
        Glyph::Normal => "normal",
        Glyph::Closing => "closing",
        Glyph::Unstable => "unstable",
        Glyph::Obsolete => "obsolete",
    }
}

fn checked(color: &str) -> SurfaceResult<&str> {
    Rgb::parse_hex(color)
        .map(|_| color)
        .ok_or_else(|| SurfaceError::InvalidColor {
            color: color.to_owned(),
        })
}

/// Two-decimal rendering with trailing zeros dropped, so output is stable.
fn num(value: f64) -> String {
    let text = format!("{value:.2}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_owned()
    } else {
        text.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn style() -> GlyphStyle {
        GlyphStyle {
            color: "#336699".into(),
            radius: 4.0,
            line_width: 1.5,
        }
    }

    #[test]
    fn document_contains_primitives_in_draw_order() {
        let mut surface = SvgSurface::new();
        surface.resize(Size::new(24.0, 56.0)).expect("resize");
        surface
            .draw_line(
                Point::new(12.0, 14.0),
                Point::new(12.0, 42.0),
                &Stroke::new("#cc3333", 1.5),
            )
            .expect("line");
        surface
            .draw_glyph(Point::new(12.0, 42.0), Glyph::Normal, &style())
            .expect("glyph");

        let expected = concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="24" height="56" viewBox="0 0 24 56">"#,
            "\n",
            r##"  <line x1="12" y1="14" x2="12" y2="42" stroke="#cc3333" stroke-width="1.5" stroke-linecap="round"/>"##,
            "\n",
            r##"  <circle cx="12" cy="42" r="4" fill="#336699"/>"##,
            "\n</svg>\n",
        );
        assert_eq!(surface.document().expect("document"), expected);
    }

    #[test]
    fn curve_is_emitted_as_cubic_path() {
        let mut surface = SvgSurface::new();
        surface.resize(Size::new(40.0, 40.0)).expect("resize");
        let curve = CubicCurve {
            from: Point::new(8.0, 0.0),
            control1: Point::new(8.0, 10.5),
            control2: Point::new(24.0, 10.5),
            to: Point::new(24.0, 21.0),
        };
        surface
            .draw_curve(&curve, &Stroke::new("#000", 2.0))
            .expect("curve");

        let document = surface.document().expect("document");
        assert!(document.contains(r#"d="M 8 0 C 8 10.5, 24 10.5, 24 21""#));
        assert!(document.contains(r#"fill="none""#));
    }

    #[test]
    fn line_glyphs_are_grouped_by_kind() {
        let mut surface = SvgSurface::new();
        surface.resize(Size::new(40.0, 40.0)).expect("resize");
        for glyph in [Glyph::Closing, Glyph::Unstable, Glyph::Obsolete] {
            surface
                .draw_glyph(Point::new(20.0, 20.0), glyph, &style())
                .expect("glyph");
        }

        let document = surface.document().expect("document");
        assert!(document.contains(r#"<g class="glyph-closing">"#));
        assert!(document.contains(r#"<g class="glyph-unstable">"#));
        assert!(document.contains(r#"<g class="glyph-obsolete">"#));
        assert!(!document.contains("<circle"));
        assert_eq!(document.matches("<line").count(), 1 + 3 + 2);
    }

    #[test]
    fn drawing_before_resize_fails() {
        let mut surface = SvgSurface::new();
        let result = surface.draw_line(
            Point::default(),
            Point::new(1.0, 1.0),
            &Stroke::new("#000", 1.0),
        );
        assert!(matches!(result, Err(SurfaceError::NotSized)));
        assert!(matches!(surface.finish(), Err(SurfaceError::NotSized)));
    }

    #[test]
    fn resize_discards_previous_content() {
        let mut surface = SvgSurface::new();
        surface.resize(Size::new(10.0, 10.0)).expect("resize");
        surface
            .draw_glyph(Point::new(5.0, 5.0), Glyph::Normal, &style())
            .expect("glyph");
        surface.resize(Size::new(10.0, 10.0)).expect("resize");
        assert!(!surface.document().expect("document").contains("<circle"));
    }

    #[test]
    fn invalid_color_is_rejected() {
        let mut surface = SvgSurface::new();
        surface.resize(Size::new(10.0, 10.0)).expect("resize");
        let result = surface.draw_line(
            Point::default(),
            Point::new(1.0, 1.0),
            &Stroke::new("\"/><script>", 1.0),
        );
        assert!(matches!(result, Err(SurfaceError::InvalidColor { .. })));
    }

    #[test]
    fn numbers_are_trimmed() {
        assert_eq!(num(12.0), "12");
        assert_eq!(num(10.5), "10.5");
        assert_eq!(num(1.0 / 3.0), "0.33");
        assert_eq!(num(-0.001), "0");
    }
}
