use crate::config::LayoutConfig;
use crate::error::{LayoutError, Result};
use crate::model::{Dimensions, Partition};
use tracing::{debug, instrument};

pub mod cost;
pub mod graph;
pub mod search;
pub mod trace;

use graph::BoundaryGraph;
use search::shortest_path;
use trace::{TraceSink, render_dot};

/// Splits an ordered sequence of images into justified rows.
///
/// Row breaks come from the cheapest path through the boundary graph, where a row
/// costs the squared difference between its full-width height and the ideal height.
/// The packer never reorders items and ignores `gap` (placement applies it later).
#[derive(Debug, Clone)]
pub struct RowPacker {
    config: LayoutConfig,
}

impl RowPacker {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Packs `items` into rows.
    pub fn pack<'a, T: Dimensions>(&self, items: &'a [T]) -> Result<Partition<'a, T>> {
        self.run(items, None)
    }

    /// Same as [`RowPacker::pack`], additionally handing the DOT graph to `sink`.
    pub fn pack_traced<'a, T: Dimensions>(
        &self,
        items: &'a [T],
        sink: &mut dyn TraceSink,
    ) -> Result<Partition<'a, T>> {
        self.run(items, Some(sink))
    }

    #[instrument(skip_all, fields(items = items.len()))]
    fn run<'a, T: Dimensions>(
        &self,
        items: &'a [T],
        sink: Option<&mut dyn TraceSink>,
    ) -> Result<Partition<'a, T>> {
        self.config.validate()?;
        validate_items(items)?;

        let cfg = &self.config;
        let graph = BoundaryGraph::build(items, cfg.viewport_width, cfg.ideal_height);
        if let Some(edge) = graph.edges().iter().find(|e| !e.cost.is_finite()) {
            return Err(LayoutError::InvalidConfig(format!(
                "row {}..{} has no finite cost for a {}px viewport at {}px ideal height",
                edge.from, edge.to, cfg.viewport_width, cfg.ideal_height
            )));
        }
        let path = shortest_path(&graph)?;
        debug!(
            nodes = graph.node_count(),
            edges = graph.edges().len(),
            rows = path.nodes.len() - 1,
            cost = path.total_cost,
            "rows packed"
        );

        if let Some(sink) = sink {
            sink.trace(&render_dot(&graph, &path));
        }

        Ok(Partition::new(items, path.nodes, path.total_cost))
    }
}

/// Packs `items` for a viewport of `viewport_width` aiming at rows of `ideal_height`.
pub fn pack_rows<T: Dimensions>(
    items: &[T],
    viewport_width: f64,
    ideal_height: f64,
) -> Result<Partition<'_, T>> {
    let cfg = LayoutConfig::builder()
        .viewport_width(viewport_width)
        .ideal_height(ideal_height)
        .build();
    RowPacker::new(cfg).pack(items)
}

/// Rejects empty input and any item whose size would make the aspect ratio meaningless.
pub fn validate_items<T: Dimensions>(items: &[T]) -> Result<()> {
    if items.is_empty() {
        return Err(LayoutError::Empty);
    }
    for (index, item) in items.iter().enumerate() {
        let (width, height) = (item.width(), item.height());
        let ratio = item.aspect_ratio();
        let usable = width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0;
        if !usable || !ratio.is_finite() || ratio <= 0.0 {
            return Err(LayoutError::NonPositiveDimension {
                index,
                width,
                height,
            });
        }
    }
    Ok(())
}
