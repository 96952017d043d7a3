use crate::config::LayoutConfig;
use crate::error::{LayoutError, Result};
use crate::model::{Dimensions, GalleryLayout, Partition, Placement, RowMetrics};
use crate::packer::RowPacker;
use crate::packer::cost::{aspect_ratio_sum, row_cost};
use tracing::{info, instrument};

/// Packs `items` into rows and places them inside a container of `cfg.viewport_width`.
#[instrument(skip_all, fields(items = items.len()))]
pub fn layout_gallery<T: Dimensions>(items: &[T], cfg: &LayoutConfig) -> Result<GalleryLayout> {
    let partition = RowPacker::new(cfg.clone()).pack(items)?;
    let layout = layout_partition(&partition, cfg)?;
    info!(
        rows = layout.rows.len(),
        width = layout.width,
        height = layout.height,
        "gallery laid out"
    );
    Ok(layout)
}

/// Places the rows of `partition` with `cfg.gap` between items and between rows.
///
/// Each row is scaled so its items plus gaps span exactly `cfg.viewport_width`:
/// `row_height = (viewport_width - (len - 1) * gap) / Σ(width / height)`.
/// The container height includes the gap after the final row.
pub fn layout_partition<T: Dimensions>(
    partition: &Partition<'_, T>,
    cfg: &LayoutConfig,
) -> Result<GalleryLayout> {
    cfg.validate()?;

    let items = partition.items();
    let mut rows = Vec::with_capacity(partition.len());
    let mut placements = Vec::with_capacity(items.len());
    let mut current_height = 0.0;

    for (row_index, range) in partition.ranges().enumerate() {
        let row = &items[range.clone()];
        let gaps = (row.len() - 1) as f64 * cfg.gap;
        if gaps >= cfg.viewport_width {
            return Err(LayoutError::InvalidConfig(format!(
                "row {row_index}: {} gaps of {}px leave no room in a {}px viewport",
                row.len() - 1,
                cfg.gap,
                cfg.viewport_width
            )));
        }
        let row_height = (cfg.viewport_width - gaps) / aspect_ratio_sum(row);
        if !(row_height.is_finite() && row_height > 0.0) {
            return Err(LayoutError::InvalidConfig(format!(
                "row {row_index}: height {row_height} is not a usable size"
            )));
        }

        let mut current_width = 0.0;
        for (offset, item) in row.iter().enumerate() {
            let width = row_height * item.aspect_ratio();
            placements.push(Placement {
                index: range.start + offset,
                row: row_index,
                x: current_width,
                y: current_height,
                width,
                height: row_height,
            });
            current_width += width + cfg.gap;
        }

        rows.push(RowMetrics {
            index: row_index,
            start: range.start,
            end: range.end,
            height: row_height,
            cost: row_cost(row, cfg.viewport_width, cfg.ideal_height),
        });
        current_height += row_height + cfg.gap;
    }

    Ok(GalleryLayout {
        width: cfg.viewport_width,
        height: current_height,
        ideal_height: cfg.ideal_height,
        gap: cfg.gap,
        rows,
        placements,
    })
}
