use gallery_layout_core::prelude::*;

#[test]
fn export_json_array_and_hash_smoke() {
    let items = vec![
        ImageBox::new("a.jpg", 2000.0, 1000.0),
        ImageBox::new("b.jpg", 1000.0, 1000.0),
        ImageBox::new("c.jpg", 4000.0, 1000.0),
    ];
    let cfg = LayoutConfig::builder().viewport_width(800.0).build();
    let layout = layout_gallery(&items, &cfg).expect("layout");
    let keys: Vec<&str> = items.iter().map(|it| it.key).collect();

    // json-array
    let ja = gallery_layout_core::to_json_array(&layout, &keys);
    let obj = ja.as_object().expect("object");
    assert!(obj.contains_key("rows"));
    assert!(obj.contains_key("meta"));
    let rows = obj["rows"].as_array().expect("rows");
    assert_eq!(rows.len(), layout.rows.len());
    assert_eq!(rows[0]["items"][0]["key"], "a.jpg");
    assert!(rows[0]["items"][0]["transform"]
        .as_str()
        .expect("transform")
        .starts_with("translate("));

    // json-hash
    let jh = gallery_layout_core::to_json_hash(&layout, &keys);
    let obj = jh.as_object().expect("object");
    let hash_items = obj["items"].as_object().expect("items");
    assert_eq!(hash_items.len(), 3);
    assert!(hash_items.contains_key("c.jpg"));
    assert_eq!(obj["meta"]["schema_version"], "1");
    assert_eq!(obj["meta"]["gap"], 2.0);
}

#[test]
fn missing_keys_fall_back_to_index() {
    let items = vec![(100u32, 100u32), (100, 100)];
    let layout = layout_gallery(&items, &LayoutConfig::default()).expect("layout");
    let jh = gallery_layout_core::to_json_hash::<String>(&layout, &[]);
    let obj = jh["items"].as_object().expect("items");
    assert!(obj.contains_key("0"));
    assert!(obj.contains_key("1"));
}

#[test]
fn layout_round_trips_through_serde() {
    let items = vec![(1600u32, 900u32), (900, 1600)];
    let layout = layout_gallery(&items, &LayoutConfig::default()).expect("layout");
    let text = serde_json::to_string(&layout).expect("serialize");
    let back: GalleryLayout = serde_json::from_str(&text).expect("deserialize");
    assert_eq!(back.placements.len(), layout.placements.len());
    for (a, b) in back.placements.iter().zip(&layout.placements) {
        assert_eq!((a.index, a.row), (b.index, b.row));
        assert!((a.x - b.x).abs() < 1e-9 && (a.width - b.width).abs() < 1e-9);
    }
    assert_eq!(back.rows.len(), layout.rows.len());
}

#[test]
fn inconsistent_rows_do_not_panic() {
    let layout = GalleryLayout {
        width: 100.0,
        height: 50.0,
        ideal_height: 48.0,
        gap: 2.0,
        rows: vec![RowMetrics {
            index: 0,
            start: 0,
            end: 3,
            height: 48.0,
            cost: 0.0,
        }],
        placements: vec![Placement {
            index: 0,
            row: 0,
            x: 0.0,
            y: 0.0,
            width: 100.0,
            height: 48.0,
        }],
    };
    let ja = gallery_layout_core::to_json_array::<String>(&layout, &[]);
    let rows = ja["rows"].as_array().expect("rows");
    assert_eq!(rows.len(), 1);
    assert!(rows[0]["items"].as_array().expect("items").is_empty());
}
