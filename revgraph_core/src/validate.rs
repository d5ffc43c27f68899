//! Rejects row payloads that would otherwise draw misleading geometry.

use std::collections::HashSet;

use revgraph_api::{ColorRef, Palette, Row};

use crate::{Error, Result};

/// Widest stroke, in pixels, an edge or the default line width may ask for.
pub const MAX_STROKE_WIDTH: f64 = 1024.0;

/// Validate a full row sequence before layout.
///
/// # Errors
///
/// Returns [`Error::InvalidRow`] for the first row with an empty or repeated
/// node identifier, a negative column, an unresolvable color, or an edge width
/// outside `(0, MAX_STROKE_WIDTH]`.
pub fn validate_rows(rows: &[Row], palette: &Palette) -> Result<()> {
    let mut seen = HashSet::with_capacity(rows.len());

    for (index, row) in rows.iter().enumerate() {
        let fail = |reason: String| Error::InvalidRow {
            row: index,
            node: row.node.clone(),
            reason,
        };

        if row.node.is_empty() {
            return Err(fail("node identifier is empty".to_owned()));
        }
        if !seen.insert(row.node.as_str()) {
            return Err(fail("node identifier appears more than once".to_owned()));
        }

        if row.vertex.column < 0 {
            return Err(fail(format!(
                "vertex column {} is negative",
                row.vertex.column
            )));
        }
        check_color(&row.vertex.color, palette).map_err(|reason| fail(format!("vertex {reason}")))?;

        for (position, edge) in row.edges.iter().enumerate() {
            if edge.start_column < 0 || edge.end_column < 0 {
                return Err(fail(format!(
                    "edge {position} has negative column ({} -> {})",
                    edge.start_column, edge.end_column
                )));
            }
            check_color(&edge.color, palette)
                .map_err(|reason| fail(format!("edge {position} {reason}")))?;
            if let Some(branch_color) = &edge.branch_color {
                check_color(branch_color, palette)
                    .map_err(|reason| fail(format!("edge {position} branch {reason}")))?;
            }
            if let Some(width) = edge.width {
                if !(width > 0.0 && width <= MAX_STROKE_WIDTH) {
                    return Err(fail(format!(
                        "edge {position} width {width} is outside (0, {MAX_STROKE_WIDTH}]"
                    )));
                }
            }
        }
    }

    Ok(())
}

fn check_color(color: &ColorRef, palette: &Palette) -> std::result::Result<(), String> {
    if color.resolve(palette).is_some() {
        return Ok(());
    }
    Err(match color {
        ColorRef::Index(index) => format!("color index {index} is negative"),
        ColorRef::Hex(hex) => format!("color '{hex}' is not a hex color"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use revgraph_api::{Edge, Vertex};

    fn row(node: &str) -> Row {
        Row::new(node, Vertex::new(0, 0usize))
    }

    fn reason(result: Result<()>) -> (usize, String) {
        match result {
            Err(Error::InvalidRow { row, reason, .. }) => (row, reason),
            other => panic!("expected InvalidRow, got {other:?}"),
        }
    }

    #[test]
    fn accepts_well_formed_rows() -> Result<()> {
        let mut edge = Edge::new(0, 2, 9usize);
        edge.width = Some(2.0);
        edge.branch_color = Some(ColorRef::from("#123"));
        let rows = vec![row("a"), row("b").with_edge(edge)];
        validate_rows(&rows, &Palette::default())
    }

    #[test]
    fn rejects_negative_columns() {
        let rows = vec![row("a"), row("b").with_edge(Edge::new(-1, 0, 0usize))];
        let (index, text) = reason(validate_rows(&rows, &Palette::default()));
        assert_eq!(index, 1);
        assert!(text.contains("negative column"));

        let rows = vec![Row::new("a", Vertex::new(-2, 0usize))];
        let (_, text) = reason(validate_rows(&rows, &Palette::default()));
        assert!(text.contains("vertex column -2"));
    }

    #[test]
    fn rejects_unresolvable_colors() {
        let rows = vec![Row::new("a", Vertex::new(0, ColorRef::Index(-3)))];
        let (_, text) = reason(validate_rows(&rows, &Palette::default()));
        assert!(text.contains("color index -3"));

        let mut edge = Edge::new(0, 0, 0usize);
        edge.branch_color = Some(ColorRef::from("blue"));
        let rows = vec![row("a").with_edge(edge)];
        let (_, text) = reason(validate_rows(&rows, &Palette::default()));
        assert!(text.contains("branch color 'blue'"));
    }

    #[test]
    fn rejects_bad_widths() {
        for width in [0.0, -1.0, f64::NAN, f64::INFINITY, 1e300, MAX_STROKE_WIDTH + 1.0] {
            let mut edge = Edge::new(0, 0, 0usize);
            edge.width = Some(width);
            let rows = vec![row("a").with_edge(edge)];
            let (_, text) = reason(validate_rows(&rows, &Palette::default()));
            assert!(text.contains("width"));
        }
    }

    #[test]
    fn accepts_widest_allowed_stroke() -> Result<()> {
        let mut edge = Edge::new(0, 0, 0usize);
        edge.width = Some(MAX_STROKE_WIDTH);
        validate_rows(&[row("a").with_edge(edge)], &Palette::default())
    }

    #[test]
    fn rejects_empty_and_duplicate_nodes() {
        let (_, text) = reason(validate_rows(&[row("")], &Palette::default()));
        assert!(text.contains("empty"));

        let (index, text) = reason(validate_rows(&[row("a"), row("a")], &Palette::default()));
        assert_eq!(index, 1);
        assert!(text.contains("more than once"));
    }
}
