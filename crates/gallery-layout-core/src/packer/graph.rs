use super::cost::{row_cost, scaled_width};
use crate::error::{LayoutError, Result};
use crate::model::Dimensions;
use std::collections::VecDeque;
use tinyvec::ArrayVec;

/// Hypothesis "items `from..to` form one row", weighted by its row cost.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandidateEdge {
    pub from: usize,
    pub to: usize,
    pub cost: f64,
}

/// Forward DAG over row boundaries `0..=N`; node `N` is the end sentinel.
///
/// Only nodes reachable from 0 are expanded. Edges are stored in the order they were
/// generated, which is the order the search relaxes them in.
#[derive(Debug, Clone)]
pub struct BoundaryGraph {
    node_count: usize,
    edges: Vec<CandidateEdge>,
}

impl BoundaryGraph {
    /// Breadth-first expansion from node 0. Each node is queued the first time an edge
    /// reaches it, so its outgoing edges are generated exactly once.
    pub fn build<T: Dimensions>(items: &[T], viewport_width: f64, ideal_height: f64) -> Self {
        let end = items.len();
        let mut seen = vec![false; end + 1];
        let mut queue = VecDeque::from([0usize]);
        let mut edges = Vec::with_capacity(end * 2);
        seen[0] = true;

        while let Some(start) = queue.pop_front() {
            if start == end {
                continue;
            }
            for to in candidate_targets(items, start, viewport_width, ideal_height) {
                if !seen[to] {
                    seen[to] = true;
                    queue.push_back(to);
                }
                edges.push(CandidateEdge {
                    from: start,
                    to,
                    cost: row_cost(&items[start..to], viewport_width, ideal_height),
                });
            }
        }

        Self {
            node_count: end + 1,
            edges,
        }
    }

    /// Graph from an explicit edge list over `0..node_count`, e.g. to replay a traced run.
    ///
    /// Every edge must point forward and stay inside the node range.
    pub fn from_edges(node_count: usize, edges: Vec<CandidateEdge>) -> Result<Self> {
        if node_count < 2 {
            return Err(LayoutError::InvalidConfig(format!(
                "a boundary graph needs at least 2 nodes, got {node_count}"
            )));
        }
        if let Some(e) = edges
            .iter()
            .find(|e| e.from >= e.to || e.to >= node_count)
        {
            return Err(LayoutError::InvalidConfig(format!(
                "edge {}->{} is not a forward edge inside 0..{}",
                e.from, e.to, node_count
            )));
        }
        Ok(Self { node_count, edges })
    }

    /// Number of nodes including the end sentinel (`N + 1`).
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Index of the end sentinel.
    pub fn end(&self) -> usize {
        self.node_count - 1
    }

    pub fn edges(&self) -> &[CandidateEdge] {
        &self.edges
    }

    pub fn edges_from(&self, node: usize) -> impl Iterator<Item = &CandidateEdge> + '_ {
        self.edges.iter().filter(move |e| e.from == node)
    }
}

/// Row ends worth considering for a row starting at `start`.
///
/// Items are summed at their ideal-height width until the row first overflows the
/// viewport. The overflowing item may either close the previous row or be squeezed
/// into this one; a lone oversized item always gets a row of its own.
pub fn candidate_targets<T: Dimensions>(
    items: &[T],
    start: usize,
    viewport_width: f64,
    ideal_height: f64,
) -> ArrayVec<[usize; 2]> {
    let mut targets = ArrayVec::new();
    let mut current_width = 0.0;
    for (i, item) in items.iter().enumerate().skip(start) {
        current_width += scaled_width(item, ideal_height);
        if viewport_width < current_width {
            if i != start {
                targets.push(i);
            }
            targets.push(i + 1);
            return targets;
        }
    }
    targets.push(items.len());
    targets
}
