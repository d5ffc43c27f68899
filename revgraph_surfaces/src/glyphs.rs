//! Line geometry for the stroke-based vertex glyphs, shared by every backend.

use revgraph_api::Glyph;
use revgraph_surface_api::Point;

const DIAGONAL: f64 = std::f64::consts::FRAC_1_SQRT_2;
const SIN_30: f64 = 0.5;
const COS_30: f64 = 0.866_025_403_784_438_6;

/// Segments making up `glyph`, or `None` for the filled-circle glyph.
pub(crate) fn segments(center: Point, glyph: Glyph, radius: f64) -> Option<Vec<(Point, Point)>> {
    let Point { x, y } = center;
    let segment = |dx: f64, dy: f64| {
        (
            Point::new(x - dx * radius, y - dy * radius),
            Point::new(x + dx * radius, y + dy * radius),
        )
    };

    match glyph {
        Glyph::Normal => None,
        Glyph::Closing => Some(vec![segment(1.0, 0.0)]),
        Glyph::Unstable => Some(vec![
            segment(0.0, 1.0),
            segment(COS_30, SIN_30),
            segment(COS_30, -SIN_30),
        ]),
        Glyph::Obsolete => Some(vec![
            segment(DIAGONAL, DIAGONAL),
            segment(DIAGONAL, -DIAGONAL),
        ]),
    }
}

/// Stroke width for line glyphs, thick enough to read at small radii.
pub(crate) fn stroke_width(radius: f64, line_width: f64) -> f64 {
    line_width.max(radius / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_line_glyph_has_distinct_segment_count() {
        let center = Point::new(10.0, 10.0);
        assert!(segments(center, Glyph::Normal, 4.0).is_none());
        assert_eq!(segments(center, Glyph::Closing, 4.0).map(|s| s.len()), Some(1));
        assert_eq!(segments(center, Glyph::Obsolete, 4.0).map(|s| s.len()), Some(2));
        assert_eq!(segments(center, Glyph::Unstable, 4.0).map(|s| s.len()), Some(3));
    }

    #[test]
    fn closing_dash_is_horizontal_and_spans_diameter() {
        let dash = segments(Point::new(10.0, 5.0), Glyph::Closing, 3.0).expect("dash");
        assert_eq!(dash, vec![(Point::new(7.0, 5.0), Point::new(13.0, 5.0))]);
    }
}
