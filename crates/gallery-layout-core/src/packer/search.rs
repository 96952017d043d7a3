use super::graph::BoundaryGraph;
use crate::error::{LayoutError, Result};

#[derive(Debug, Clone, Copy)]
struct NodeLabel {
    distance: f64,
    predecessor: Option<usize>,
}

/// Cheapest chain of row breaks from node 0 to the end sentinel.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPath {
    /// `[0, b1, ..., N]`.
    pub nodes: Vec<usize>,
    pub total_cost: f64,
}

impl ShortestPath {
    /// True when `from -> to` is one of the path's hops.
    pub fn contains_edge(&self, from: usize, to: usize) -> bool {
        self.nodes.windows(2).any(|w| w[0] == from && w[1] == to)
    }
}

/// Single-source relaxation over the boundary graph.
///
/// Edges are relaxed in generation order. All edges point forward and sources are
/// expanded in non-decreasing index order, so every source is final before its edges
/// are relaxed. On equal cost the first predecessor found is kept.
pub fn shortest_path(graph: &BoundaryGraph) -> Result<ShortestPath> {
    let mut labels: Vec<Option<NodeLabel>> = vec![None; graph.node_count()];
    labels[0] = Some(NodeLabel {
        distance: 0.0,
        predecessor: None,
    });

    for edge in graph.edges() {
        let Some(from) = labels[edge.from] else {
            return Err(LayoutError::InternalInvariant(format!(
                "edge {}->{} leaves an unreached node",
                edge.from, edge.to
            )));
        };
        let candidate = from.distance + edge.cost;
        let improves = match labels[edge.to] {
            None => true,
            Some(current) => candidate < current.distance,
        };
        if improves {
            labels[edge.to] = Some(NodeLabel {
                distance: candidate,
                predecessor: Some(edge.from),
            });
        }
    }

    let terminal = labels
        .iter()
        .rposition(|l| l.is_some_and(|l| l.predecessor.is_some()))
        .unwrap_or(0);
    if terminal != graph.end() {
        return Err(LayoutError::InternalInvariant(format!(
            "end node {} unreachable (furthest reached: {})",
            graph.end(),
            terminal
        )));
    }

    let mut nodes = vec![terminal];
    let mut node = terminal;
    while node != 0 {
        let prev = labels[node]
            .and_then(|l| l.predecessor)
            .filter(|&p| p < node)
            .ok_or_else(|| {
                LayoutError::InternalInvariant(format!("broken predecessor chain at node {node}"))
            })?;
        nodes.push(prev);
        node = prev;
    }
    nodes.reverse();

    let total_cost = labels[terminal].map_or(0.0, |l| l.distance);
    Ok(ShortestPath { nodes, total_cost })
}
