use crate::model::Dimensions;

/// Sum of `width / height` over a row.
pub fn aspect_ratio_sum<T: Dimensions>(row: &[T]) -> f64 {
    row.iter().map(|item| item.aspect_ratio()).sum()
}

/// Height a row takes when scaled to fill `viewport_width` exactly (no gaps).
pub fn row_height<T: Dimensions>(row: &[T], viewport_width: f64) -> f64 {
    viewport_width / aspect_ratio_sum(row)
}

/// Squared deviation of the full-width row height from `ideal_height`. Lower is better.
pub fn row_cost<T: Dimensions>(row: &[T], viewport_width: f64, ideal_height: f64) -> f64 {
    let deviation = ideal_height - row_height(row, viewport_width);
    deviation * deviation
}

/// Whole-pixel width of an item drawn at `ideal_height`; used by the greedy break scan.
pub fn scaled_width<T: Dimensions>(item: &T, ideal_height: f64) -> f64 {
    (item.aspect_ratio() * ideal_height).round()
}
