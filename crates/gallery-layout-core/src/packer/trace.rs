use super::graph::BoundaryGraph;
use super::search::ShortestPath;
use std::fmt::Write as _;

/// Receives the Graphviz description of a packing run.
pub trait TraceSink {
    fn trace(&mut self, dot: &str);
}

impl<F: FnMut(&str)> TraceSink for F {
    fn trace(&mut self, dot: &str) {
        self(dot)
    }
}

/// Forwards the graph to `tracing` at TRACE level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl TraceSink for TracingSink {
    fn trace(&mut self, dot: &str) {
        tracing::trace!(target: "gallery_layout::graph", "{dot}");
    }
}

/// Renders the boundary graph in DOT. Edge labels are `round(sqrt(cost))`, i.e. the
/// pixel deviation from the ideal height; edges on `path` are drawn red.
pub fn render_dot(graph: &BoundaryGraph, path: &ShortestPath) -> String {
    let mut dot = String::from("digraph g {\n");
    for edge in graph.edges() {
        let label = edge.cost.sqrt().round();
        let _ = write!(dot, "{}->{} [label=\"{}\"", edge.from, edge.to, label);
        if path.contains_edge(edge.from, edge.to) {
            dot.push_str(" color=\"red\"");
        }
        dot.push_str("]\n");
    }
    dot.push('}');
    dot
}
