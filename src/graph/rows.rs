//! Per-row edge records derived from a lane layout.

use std::collections::HashMap;

use serde::Serialize;

use super::LaneLayout;
use crate::git::Commit;

/// How an edge from a commit down to its parent is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeShape {
    /// Child and parent share a lane.
    Straight,
    /// The edge changes lanes.
    Curve,
}

/// A connection from a row's commit to one of its parents further down.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphEdge {
    /// Parent hash.
    pub parent: String,
    /// Row index of the parent.
    pub parent_row: usize,
    /// Lane of the parent.
    pub parent_lane: usize,
    /// Drawing shape.
    pub shape: EdgeShape,
}

/// Everything a renderer needs to draw one commit row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphRow {
    /// Commit hash.
    pub hash: String,
    /// Position in the input list.
    pub row: usize,
    /// Lane the commit node sits on.
    pub lane: usize,
    /// Edges to parents that appear later in the list.
    pub edges: Vec<GraphEdge>,
    /// Parents not present in the list (truncated history).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dangling_parents: Vec<String>,
}

/// Builds one [`GraphRow`] per commit, in input order.
///
/// A parent listed above its child gets no edge; a parent missing from the
/// list is reported in `dangling_parents` instead.
pub fn build_rows(commits: &[Commit], layout: &LaneLayout) -> Vec<GraphRow> {
    let mut row_of: HashMap<&str, usize> = HashMap::with_capacity(commits.len());
    for (row, commit) in commits.iter().enumerate() {
        row_of.entry(commit.hash.as_str()).or_insert(row);
    }

    commits
        .iter()
        .enumerate()
        .map(|(row, commit)| {
            let lane = layout.lane_of(&commit.hash).unwrap_or(0);
            let mut edges = Vec::new();
            let mut dangling_parents = Vec::new();

            for parent in &commit.parents {
                match row_of.get(parent.as_str()) {
                    Some(&parent_row) if parent_row > row => {
                        let parent_lane = layout.lane_of(parent).unwrap_or(0);
                        edges.push(GraphEdge {
                            parent: parent.clone(),
                            parent_row,
                            parent_lane,
                            shape: if parent_lane == lane {
                                EdgeShape::Straight
                            } else {
                                EdgeShape::Curve
                            },
                        });
                    }
                    Some(_) => {}
                    None => dangling_parents.push(parent.clone()),
                }
            }

            GraphRow {
                hash: commit.hash.clone(),
                row,
                lane,
                edges,
                dangling_parents,
            }
        })
        .collect()
}

/// Lanes crossed by an edge in the rows strictly between a child and its
/// parent, as `(row, lane)` pairs. Edges travel on the parent's lane.
pub fn pass_through(rows: &[GraphRow]) -> Vec<(usize, usize)> {
    let mut cells = Vec::new();
    for row in rows {
        for edge in &row.edges {
            cells.extend((row.row + 1..edge.parent_row).map(|r| (r, edge.parent_lane)));
        }
    }
    cells.sort_unstable();
    cells.dedup();
    cells
}
