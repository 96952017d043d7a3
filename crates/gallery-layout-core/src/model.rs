use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Anything with a natural pixel size. The packer reads nothing else from an item.
pub trait Dimensions {
    fn width(&self) -> f64;
    fn height(&self) -> f64;
    /// `width / height`.
    fn aspect_ratio(&self) -> f64 {
        self.width() / self.height()
    }
}

impl<T: Dimensions + ?Sized> Dimensions for &T {
    fn width(&self) -> f64 {
        (**self).width()
    }
    fn height(&self) -> f64 {
        (**self).height()
    }
}

impl Dimensions for (u32, u32) {
    fn width(&self) -> f64 {
        self.0 as f64
    }
    fn height(&self) -> f64 {
        self.1 as f64
    }
}

impl Dimensions for (f64, f64) {
    fn width(&self) -> f64 {
        self.0
    }
    fn height(&self) -> f64 {
        self.1
    }
}

/// A keyed image with its natural (intrinsic) size.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageBox<K = String> {
    /// User-specified key (e.g., file path or URL).
    pub key: K,
    pub width: f64,
    pub height: f64,
}

impl<K> ImageBox<K> {
    pub fn new(key: K, width: f64, height: f64) -> Self {
        Self { key, width, height }
    }
}

impl<K> Dimensions for ImageBox<K> {
    fn width(&self) -> f64 {
        self.width
    }
    fn height(&self) -> f64 {
        self.height
    }
}

/// Ordered split of a sequence into contiguous, non-empty rows.
///
/// Rows borrow from the packed slice, so concatenating them yields the input unchanged.
#[derive(Debug, Clone)]
pub struct Partition<'a, T> {
    items: &'a [T],
    boundaries: Vec<usize>,
    total_cost: f64,
}

impl<'a, T> Partition<'a, T> {
    pub(crate) fn new(items: &'a [T], boundaries: Vec<usize>, total_cost: f64) -> Self {
        debug_assert_eq!(boundaries.first(), Some(&0));
        debug_assert_eq!(boundaries.last(), Some(&items.len()));
        Self {
            items,
            boundaries,
            total_cost,
        }
    }

    /// Row break indices `[0, b1, ..., N]`, strictly increasing.
    pub fn boundaries(&self) -> &[usize] {
        &self.boundaries
    }

    /// Sum of the row costs along the chosen path.
    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    /// The slice that was packed.
    pub fn items(&self) -> &'a [T] {
        self.items
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.boundaries.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn row(&self, index: usize) -> Option<&'a [T]> {
        let start = *self.boundaries.get(index)?;
        let end = *self.boundaries.get(index + 1)?;
        Some(&self.items[start..end])
    }

    /// Index range of every row in the original sequence.
    pub fn ranges(&self) -> impl ExactSizeIterator<Item = Range<usize>> + '_ {
        self.boundaries.windows(2).map(|w| w[0]..w[1])
    }

    /// Rows top-to-bottom, each in original order.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &'a [T]> + '_ {
        let items = self.items;
        self.boundaries.windows(2).map(move |w| &items[w[0]..w[1]])
    }

    pub fn to_rows(&self) -> Vec<&'a [T]> {
        self.rows().collect()
    }
}

/// Final position of one item inside the gallery container.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Placement {
    /// Index of the item in the input sequence.
    pub index: usize,
    /// Row the item was placed in.
    pub row: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Placement {
    /// CSS transform placing the item at its offset.
    pub fn css_transform(&self) -> String {
        format!("translate({}px,{}px)", self.x, self.y)
    }
}

/// Per-row placement summary.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RowMetrics {
    pub index: usize,
    /// First item index (inclusive).
    pub start: usize,
    /// Last item index (exclusive).
    pub end: usize,
    /// Rendered height after subtracting gaps.
    pub height: f64,
    /// Packing cost of this row (gap-free model).
    pub cost: f64,
}

impl RowMetrics {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }
}

/// Gallery container with every item placed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryLayout {
    /// Container width (the viewport width rows are justified to).
    pub width: f64,
    /// Container height including the gap after the last row.
    pub height: f64,
    pub ideal_height: f64,
    pub gap: f64,
    pub rows: Vec<RowMetrics>,
    /// One placement per input item, in input order.
    pub placements: Vec<Placement>,
}

/// Statistics about a computed gallery layout.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LayoutStats {
    pub num_rows: usize,
    pub num_items: usize,
    /// Sum of row costs (squared px deviation, gap-free).
    pub total_cost: f64,
    pub mean_row_height: f64,
    pub min_row_height: f64,
    pub max_row_height: f64,
    /// Largest |rendered row height - ideal height|.
    pub max_deviation: f64,
    pub container_width: f64,
    pub container_height: f64,
}

impl GalleryLayout {
    /// Computes summary statistics for this layout.
    pub fn stats(&self) -> LayoutStats {
        let num_rows = self.rows.len();
        let mut total_cost = 0.0;
        let mut sum_height = 0.0;
        let mut min_row_height = f64::INFINITY;
        let mut max_row_height = 0.0f64;
        let mut max_deviation = 0.0f64;

        for row in &self.rows {
            total_cost += row.cost;
            sum_height += row.height;
            min_row_height = min_row_height.min(row.height);
            max_row_height = max_row_height.max(row.height);
            max_deviation = max_deviation.max((row.height - self.ideal_height).abs());
        }

        let (mean_row_height, min_row_height) = if num_rows > 0 {
            (sum_height / num_rows as f64, min_row_height)
        } else {
            (0.0, 0.0)
        };

        LayoutStats {
            num_rows,
            num_items: self.placements.len(),
            total_cost,
            mean_row_height,
            min_row_height,
            max_row_height,
            max_deviation,
            container_width: self.width,
            container_height: self.height,
        }
    }
}

impl LayoutStats {
    /// Returns a human-readable summary of the statistics.
    pub fn summary(&self) -> String {
        format!(
            "Rows: {}, Items: {}, Row height: {:.1}..{:.1} (mean {:.1}), Max deviation: {:.1}px, Cost: {:.1}, Container: {:.0}x{:.0}",
            self.num_rows,
            self.num_items,
            self.min_row_height,
            self.max_row_height,
            self.mean_row_height,
            self.max_deviation,
            self.total_cost,
            self.container_width,
            self.container_height,
        )
    }

    /// Average number of items per row.
    pub fn items_per_row(&self) -> f64 {
        if self.num_rows > 0 {
            self.num_items as f64 / self.num_rows as f64
        } else {
            0.0
        }
    }
}
