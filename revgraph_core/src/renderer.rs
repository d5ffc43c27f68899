//! Replays a computed layout onto a drawing surface.

use revgraph_api::Row;
use revgraph_surface_api::{DrawingSurface, RowAnchors, Size};
use serde::Serialize;

use crate::layout::{self, EdgePath, GraphLayout};
use crate::{validate, Error, RenderConfig, Result};

/// Counts describing a finished render pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RenderSummary {
    /// Highest start or end column over every edge.
    pub columns: usize,
    /// Surface dimensions.
    pub size: Size,
    /// Straight edges drawn.
    pub lines: usize,
    /// Curved edges drawn.
    pub curves: usize,
    /// Vertices drawn.
    pub vertices: usize,
}

/// Renderer for one graph view.
///
/// Owns its configuration and the state of the last pass; construct one per
/// view rather than sharing.
#[derive(Debug, Clone)]
pub struct GraphRenderer {
    config: RenderConfig,
    columns: usize,
    last_layout: Option<GraphLayout>,
}

impl GraphRenderer {
    /// Create a renderer with a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] when `config` fails validation.
    pub fn new(config: RenderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            columns: 0,
            last_layout: None,
        })
    }

    /// Configuration in use.
    #[must_use]
    pub const fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Column count of the last pass, or 0 after a reset.
    #[must_use]
    pub const fn columns(&self) -> usize {
        self.columns
    }

    /// Layout of the last successful pass.
    #[must_use]
    pub const fn last_layout(&self) -> Option<&GraphLayout> {
        self.last_layout.as_ref()
    }

    /// Clear the column counter and the retained layout.
    pub fn reset(&mut self) {
        self.columns = 0;
        self.last_layout = None;
    }

    /// Validate `rows`, measure them through `anchors` and compute the layout.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRow`] for malformed rows, and
    /// [`Error::MissingAnchor`] or [`Error::InvalidAnchorHeight`] when a row
    /// cannot be measured.
    pub fn layout(&self, rows: &[Row], anchors: &dyn RowAnchors) -> Result<GraphLayout> {
        validate::validate_rows(rows, &self.config.palette)?;

        let heights = rows
            .iter()
            .map(|row| {
                let height = anchors
                    .row_height(&row.node)
                    .ok_or_else(|| Error::MissingAnchor {
                        node: row.node.clone(),
                    })?;
                if height.is_finite() && height >= 0.0 {
                    Ok(height)
                } else {
                    Err(Error::InvalidAnchorHeight {
                        node: row.node.clone(),
                        height,
                    })
                }
            })
            .collect::<Result<Vec<_>>>()?;

        layout::compute(rows, &heights, &self.config)
    }

    /// Draw `rows` onto `surface` and pad each anchor past the drawn tracks.
    ///
    /// Every call starts from a reset renderer and redraws from scratch. Nothing
    /// is drawn and no anchor is touched unless the whole input validates.
    ///
    /// # Errors
    ///
    /// Propagates [`GraphRenderer::layout`] failures and surface errors.
    pub fn render(
        &mut self,
        rows: &[Row],
        anchors: &mut dyn RowAnchors,
        surface: &mut dyn DrawingSurface,
    ) -> Result<RenderSummary> {
        self.reset();
        let layout = self.layout(rows, anchors)?;
        log::debug!(
            "rendering {} rows across {} columns into {}x{}",
            layout.rows.len(),
            layout.columns,
            layout.size.width,
            layout.size.height
        );

        surface.resize(layout.size)?;
        for edge in &layout.edges {
            match &edge.path {
                EdgePath::Line { from, to } => surface.draw_line(*from, *to, &edge.stroke)?,
                EdgePath::Curve(curve) => surface.draw_curve(curve, &edge.stroke)?,
            }
        }
        for vertex in &layout.vertices {
            log::trace!("vertex {:?} at {:?}", vertex.glyph, vertex.center);
            surface.draw_glyph(vertex.center, vertex.glyph, &vertex.style)?;
        }
        for row in &layout.rows {
            anchors.set_padding_left(&row.node, row.padding_left);
        }

        let summary = RenderSummary {
            columns: layout.columns,
            size: layout.size,
            lines: layout.line_count(),
            curves: layout.curve_count(),
            vertices: layout.vertices.len(),
        };
        self.columns = layout.columns;
        self.last_layout = Some(layout);
        Ok(summary)
    }
}

impl Default for GraphRenderer {
    fn default() -> Self {
        Self {
            config: RenderConfig::default(),
            columns: 0,
            last_layout: None,
        }
    }
}
