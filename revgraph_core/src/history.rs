//! Lane assignment: turns commits (newest first) into graph rows.
//!
//! Each open lane waits for one commit. A commit takes the first lane waiting
//! for it, otherwise the first free lane, otherwise a new one on the right;
//! every other lane waiting for it merges in. Its first parent continues the
//! lane in the same color and each further parent opens a lane in a fresh
//! color.

use revgraph_api::{ColorRef, Edge, Row, Vertex};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Lane {
    target: String,
    color: usize,
    /// Column the lane leaves from on the previous row.
    origin: usize,
}

/// Incremental lane assigner; feed commits in display order.
#[derive(Debug, Clone, Default)]
pub struct LaneAssigner {
    lanes: Vec<Option<Lane>>,
    next_color: usize,
}

impl LaneAssigner {
    /// Create an assigner with no open lanes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of lanes still waiting for a commit.
    #[must_use]
    pub fn open_lanes(&self) -> usize {
        self.lanes.iter().flatten().count()
    }

    /// Place `node` and return its row.
    pub fn assign(&mut self, node: &str, parents: &[String], glyph_code: &str) -> Row {
        let waiting = self
            .lanes
            .iter()
            .position(|lane| lane.as_ref().is_some_and(|lane| lane.target == node));
        let column = waiting
            .or_else(|| self.lanes.iter().position(Option::is_none))
            .unwrap_or(self.lanes.len());
        let color = match waiting.and_then(|index| self.lanes[index].as_ref()) {
            Some(lane) => lane.color,
            None => self.fresh_color(),
        };

        let edges = self
            .lanes
            .iter()
            .enumerate()
            .filter_map(|(index, lane)| {
                let lane = lane.as_ref()?;
                let end = if lane.target == node { column } else { index };
                Some(Edge::new(as_column(lane.origin), as_column(end), lane.color))
            })
            .collect();

        for (index, slot) in self.lanes.iter_mut().enumerate() {
            if slot.as_ref().is_some_and(|lane| lane.target == node) {
                *slot = None;
            } else if let Some(lane) = slot {
                lane.origin = index;
            }
        }
        if self.lanes.len() <= column {
            self.lanes.resize(column + 1, None);
        }

        if let Some((first, rest)) = parents.split_first() {
            self.lanes[column] = Some(Lane {
                target: first.clone(),
                color,
                origin: column,
            });
            for parent in rest {
                let lane = Lane {
                    target: parent.clone(),
                    color: self.fresh_color(),
                    origin: column,
                };
                match self.lanes.iter().position(Option::is_none) {
                    Some(free) => self.lanes[free] = Some(lane),
                    None => self.lanes.push(Some(lane)),
                }
            }
        }

        while matches!(self.lanes.last(), Some(None)) {
            self.lanes.pop();
        }

        Row {
            node: node.to_owned(),
            vertex: Vertex::new(as_column(column), ColorRef::from(color)),
            edges,
            graphnode_glyph: glyph_code.to_owned(),
        }
    }

    fn fresh_color(&mut self) -> usize {
        let color = self.next_color;
        self.next_color += 1;
        color
    }
}

fn as_column(index: usize) -> i64 {
    i64::try_from(index).unwrap_or(i64::MAX)
}
