use crate::model::{GalleryLayout, Placement};
use serde_json::{Value, json};

/// Schema version of the JSON shapes below.
pub const SCHEMA_VERSION: &str = "1";

fn key_of<K: ToString>(keys: &[K], placement: &Placement) -> String {
    keys.get(placement.index)
        .map(ToString::to_string)
        .unwrap_or_else(|| placement.index.to_string())
}

/// Metadata shared by both JSON shapes.
pub fn meta(layout: &GalleryLayout) -> Value {
    json!({
        "schema_version": SCHEMA_VERSION,
        "app": "gallery-layout",
        "version": env!("CARGO_PKG_VERSION"),
        "container": {"w": layout.width, "h": layout.height},
        "ideal_height": layout.ideal_height,
        "gap": layout.gap,
    })
}

/// Serialize the layout as `{ rows, meta }`, one entry per row with its items in order.
/// `keys[i]` names item `i`; items without a key fall back to their index.
pub fn to_json_array<K: ToString>(layout: &GalleryLayout, keys: &[K]) -> Value {
    let rows_val = layout
        .rows
        .iter()
        .map(|row| {
            let items_val: Vec<Value> = layout
                .placements
                .get(row.start..row.end)
                .unwrap_or_default()
                .iter()
                .map(|p| {
                    json!({
                        "key": key_of(keys, p),
                        "x": p.x,
                        "y": p.y,
                        "width": p.width,
                        "height": p.height,
                        "transform": p.css_transform(),
                    })
                })
                .collect();
            json!({
                "index": row.index,
                "height": row.height,
                "cost": row.cost,
                "items": items_val,
            })
        })
        .collect::<Vec<_>>();
    json!({"rows": rows_val, "meta": meta(layout)})
}

/// Flatten placements keyed by name.
/// Shape: `{ items: { name: { row, x, y, width, height, transform } }, meta }`.
pub fn to_json_hash<K: ToString>(layout: &GalleryLayout, keys: &[K]) -> Value {
    let mut items = serde_json::Map::new();
    for p in &layout.placements {
        items.insert(
            key_of(keys, p),
            json!({
                "row": p.row,
                "x": p.x,
                "y": p.y,
                "width": p.width,
                "height": p.height,
                "transform": p.css_transform(),
            }),
        );
    }
    json!({ "items": items, "meta": meta(layout) })
}
