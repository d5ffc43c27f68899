//! In-memory row anchors for callers without a live document to measure.

use std::collections::{BTreeMap, HashMap};

use revgraph_api::Row;
use revgraph_surface_api::RowAnchors;

/// Table of row heights keyed by node, recording the paddings it receives.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnchorTable {
    heights: HashMap<String, f64>,
    paddings: BTreeMap<String, f64>,
}

impl AnchorTable {
    /// Create an empty table; every lookup misses until rows are inserted.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// One anchor of `height` per row.
    #[must_use]
    pub fn for_rows(rows: &[Row], height: f64) -> Self {
        let mut table = Self::new();
        for row in rows {
            table.insert(row.node.clone(), height);
        }
        table
    }

    /// Add or replace the anchor for `node`.
    pub fn insert(&mut self, node: impl Into<String>, height: f64) {
        self.heights.insert(node.into(), height);
    }

    /// Left padding last set for `node`.
    #[must_use]
    pub fn padding_left(&self, node: &str) -> Option<f64> {
        self.paddings.get(node).copied()
    }

    /// Every padding set so far, ordered by node.
    #[must_use]
    pub const fn paddings(&self) -> &BTreeMap<String, f64> {
        &self.paddings
    }
}

impl RowAnchors for AnchorTable {
    fn row_height(&self, node: &str) -> Option<f64> {
        self.heights.get(node).copied()
    }

    fn set_padding_left(&mut self, node: &str, padding: f64) {
        self.paddings.insert(node.to_owned(), padding);
    }
}
