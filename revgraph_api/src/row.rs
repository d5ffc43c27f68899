use serde::{Deserialize, Serialize};

use crate::{ColorRef, Glyph};

/// Position and color of the vertex drawn for a row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vertex {
    /// Track the vertex sits on.
    pub column: i64,
    /// Vertex fill color.
    pub color: ColorRef,
}

impl Vertex {
    /// Convenience constructor.
    pub fn new(column: i64, color: impl Into<ColorRef>) -> Self {
        Self {
            column,
            color: color.into(),
        }
    }
}

/// Track segment feeding a row: from `start_column` on the previous row to
/// `end_column` on this one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    /// Track on the previous row.
    pub start_column: i64,
    /// Track on this row.
    pub end_column: i64,
    /// Line color.
    pub color: ColorRef,
    /// Stroke width override in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// Named-branch color; wins over `color` when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch_color: Option<ColorRef>,
}

impl Edge {
    /// Edge with no width override and no branch color.
    pub fn new(start_column: i64, end_column: i64, color: impl Into<ColorRef>) -> Self {
        Self {
            start_column,
            end_column,
            color: color.into(),
            width: None,
            branch_color: None,
        }
    }

    /// Color used for drawing: `branch_color` if set, otherwise `color`.
    #[must_use]
    pub fn effective_color(&self) -> &ColorRef {
        self.branch_color.as_ref().unwrap_or(&self.color)
    }

    /// Whether the edge stays on one track.
    #[must_use]
    pub const fn is_straight(&self) -> bool {
        self.start_column == self.end_column
    }
}

/// Graph-layout descriptor for one revision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    /// Identifier of the external row this graph row lines up with.
    pub node: String,
    /// Vertex for the revision itself.
    pub vertex: Vertex,
    /// Segments arriving at this row.
    #[serde(default)]
    pub edges: Vec<Edge>,
    /// Short status code; its last character selects the vertex glyph.
    #[serde(default)]
    pub graphnode_glyph: String,
}

impl Row {
    /// Row with no edges and the default glyph code.
    pub fn new(node: impl Into<String>, vertex: Vertex) -> Self {
        Self {
            node: node.into(),
            vertex,
            edges: Vec::new(),
            graphnode_glyph: "o".into(),
        }
    }

    /// Builder-style edge append.
    #[must_use]
    pub fn with_edge(mut self, edge: Edge) -> Self {
        self.edges.push(edge);
        self
    }

    /// Builder-style glyph code override.
    #[must_use]
    pub fn with_glyph_code(mut self, code: impl Into<String>) -> Self {
        self.graphnode_glyph = code.into();
        self
    }

    /// Glyph selected by `graphnode_glyph`.
    #[must_use]
    pub fn glyph(&self) -> Glyph {
        Glyph::from_code(&self.graphnode_glyph)
    }

    /// Largest start or end column over this row's edges.
    #[must_use]
    pub fn max_edge_column(&self) -> Option<i64> {
        self.edges
            .iter()
            .flat_map(|edge| [edge.start_column, edge.end_column])
            .max()
    }
}
