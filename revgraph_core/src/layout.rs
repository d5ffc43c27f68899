//! Pixel layout of a row sequence.
//!
//! Rows stack top to bottom in input order, each as tall as its external
//! anchor. Edges listed on row `i` run from the center of row `i - 1` (the
//! surface top for the first row) to the center of row `i`; vertices sit at
//! the center of their row.

use revgraph_api::{ColorRef, Glyph, Palette, Row};
use revgraph_surface_api::{CubicCurve, GlyphStyle, Point, Size, Stroke};
use serde::Serialize;

use crate::{Error, RenderConfig, Result};

/// Geometry of a single segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum EdgePath {
    /// Straight segment; used whenever the edge stays on one track.
    Line {
        /// Start point.
        from: Point,
        /// End point.
        to: Point,
    },
    /// Track change.
    Curve(CubicCurve),
}

/// A positioned, styled edge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgePrimitive {
    /// Row the edge was listed on.
    pub row: usize,
    /// Geometry.
    pub path: EdgePath,
    /// Resolved color and width.
    pub stroke: Stroke,
}

/// A positioned, styled vertex.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VertexPrimitive {
    /// Row the vertex belongs to.
    pub row: usize,
    /// Glyph center.
    pub center: Point,
    /// Glyph kind.
    pub glyph: Glyph,
    /// Resolved color and radius.
    pub style: GlyphStyle,
}

/// Vertical placement and track usage of a row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowLayout {
    /// Node identifier of the row.
    pub node: String,
    /// Offset of the row's top edge.
    pub top: f64,
    /// Row height as reported by its anchor.
    pub height: f64,
    /// Tracks the row reaches into (highest column used + 1).
    pub tracks: usize,
    /// Left padding that moves row text past the tracks.
    pub padding_left: f64,
}

impl RowLayout {
    /// Vertical center of the row.
    #[must_use]
    pub fn center(&self) -> f64 {
        self.top + self.height / 2.0
    }
}

/// Complete layout of one render pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphLayout {
    /// Highest start or end column over every edge.
    pub columns: usize,
    /// Surface dimensions.
    pub size: Size,
    /// Per-row placement, in input order.
    pub rows: Vec<RowLayout>,
    /// Edges, in input order.
    pub edges: Vec<EdgePrimitive>,
    /// Vertices, in input order.
    pub vertices: Vec<VertexPrimitive>,
}

impl GraphLayout {
    /// Number of straight edges.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.edges
            .iter()
            .filter(|edge| matches!(edge.path, EdgePath::Line { .. }))
            .count()
    }

    /// Number of curved edges.
    #[must_use]
    pub fn curve_count(&self) -> usize {
        self.edges.len() - self.line_count()
    }
}

/// Lay out `rows` given the height of each row.
///
/// `heights` must have one entry per row. Rows are expected to have passed
/// [`crate::validate::validate_rows`]; anything unresolvable is still
/// reported rather than drawn.
///
/// # Errors
///
/// Returns [`Error::InvalidRow`] when a color or column cannot be resolved.
pub fn compute(rows: &[Row], heights: &[f64], config: &RenderConfig) -> Result<GraphLayout> {
    let geometry = Geometry::new(config);
    let mut columns = 0;
    let mut widest_vertex = 0;
    let mut top = 0.0;
    let mut previous_center = 0.0;

    let mut row_layouts = Vec::with_capacity(rows.len());
    let mut edges = Vec::new();
    let mut vertices = Vec::with_capacity(rows.len());

    for (index, (row, &height)) in rows.iter().zip(heights).enumerate() {
        let center = top + height / 2.0;
        let vertex_column = track(index, row, row.vertex.column)?;
        let row_columns = match row.max_edge_column() {
            Some(column) => {
                let edge_column = track(index, row, column)?;
                columns = columns.max(edge_column);
                vertex_column.max(edge_column)
            }
            None => vertex_column,
        };

        for edge in &row.edges {
            let start = track(index, row, edge.start_column)?;
            let end = track(index, row, edge.end_column)?;

            let from = Point::new(geometry.x(start), previous_center);
            let to = Point::new(geometry.x(end), center);
            let path = if edge.is_straight() {
                EdgePath::Line { from, to }
            } else {
                let mid = (from.y + to.y) / 2.0;
                EdgePath::Curve(CubicCurve {
                    from,
                    control1: Point::new(from.x, mid),
                    control2: Point::new(to.x, mid),
                    to,
                })
            };

            let color = resolve(index, row, edge.effective_color(), &config.palette)?;
            edges.push(EdgePrimitive {
                row: index,
                path,
                stroke: Stroke::new(color, edge.width.unwrap_or(config.line_width)),
            });
        }

        widest_vertex = widest_vertex.max(vertex_column);
        vertices.push(VertexPrimitive {
            row: index,
            center: Point::new(geometry.x(vertex_column), center),
            glyph: row.glyph(),
            style: GlyphStyle {
                color: resolve(index, row, &row.vertex.color, &config.palette)?.to_owned(),
                radius: config.vertex_radius,
                line_width: config.line_width,
            },
        });

        let tracks = row_columns + 1;
        row_layouts.push(RowLayout {
            node: row.node.clone(),
            top,
            height,
            tracks,
            padding_left: geometry.width(tracks),
        });

        previous_center = center;
        top += height;
    }

    Ok(GraphLayout {
        columns,
        size: Size::new(geometry.width(columns.max(widest_vertex) + 1), top),
        rows: row_layouts,
        edges,
        vertices,
    })
}

struct Geometry {
    track_width: f64,
    padding: f64,
}

impl Geometry {
    const fn new(config: &RenderConfig) -> Self {
        Self {
            track_width: config.track_width,
            padding: config.padding,
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn x(&self, column: usize) -> f64 {
        self.track_width * column as f64 + self.track_width / 2.0 + self.padding
    }

    #[allow(clippy::cast_precision_loss)]
    fn width(&self, tracks: usize) -> f64 {
        self.track_width * tracks as f64 + 2.0 * self.padding
    }
}

fn track(index: usize, row: &Row, column: i64) -> Result<usize> {
    usize::try_from(column).map_err(|_| Error::InvalidRow {
        row: index,
        node: row.node.clone(),
        reason: format!("column {column} is negative"),
    })
}

fn resolve<'a>(index: usize, row: &Row, color: &'a ColorRef, palette: &'a Palette) -> Result<&'a str> {
    color.resolve(palette).ok_or_else(|| Error::InvalidRow {
        row: index,
        node: row.node.clone(),
        reason: format!("color {color:?} cannot be resolved"),
    })
}
