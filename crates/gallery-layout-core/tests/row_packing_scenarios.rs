use gallery_layout_core::error::LayoutError;
use gallery_layout_core::packer::cost::row_cost;
use gallery_layout_core::prelude::*;

fn boxes(sizes: &[(f64, f64)]) -> Vec<ImageBox<usize>> {
    sizes
        .iter()
        .enumerate()
        .map(|(i, &(w, h))| ImageBox::new(i, w, h))
        .collect()
}

#[test]
fn four_images_pack_into_single_row() {
    // ideal-height widths 440 + 220 + 330 overflow on the fourth (176) image
    let items = boxes(&[(2000.0, 1000.0), (1000.0, 1000.0), (1500.0, 1000.0), (800.0, 1000.0)]);
    let partition = pack_rows(&items, 1000.0, 220.0).expect("pack");

    assert_eq!(partition.boundaries(), &[0, 4]);
    assert_eq!(partition.len(), 1);
    let row_sum: usize = partition.rows().map(|r| r.len()).sum();
    assert_eq!(row_sum, 4);

    // (220 - 1000 / 5.3)^2
    let expected = (220.0f64 - 1000.0 / 5.3).powi(2);
    assert!((partition.total_cost() - expected).abs() < 1e-9);

    let one_per_row: f64 = items
        .iter()
        .map(|it| row_cost(std::slice::from_ref(it), 1000.0, 220.0))
        .sum();
    assert!(partition.total_cost() <= one_per_row);
}

#[test]
fn equal_images_split_evenly() {
    let items = boxes(&[(300.0, 200.0); 4]);
    let partition = pack_rows(&items, 600.0, 200.0).expect("pack");
    assert_eq!(partition.boundaries(), &[0, 2, 4]);
    assert_eq!(partition.total_cost(), 0.0);
    assert_eq!(partition.row(0).map(|r| r.len()), Some(2));
    assert_eq!(partition.row(1).map(|r| r[0].key), Some(2));
    assert!(partition.row(2).is_none());
}

#[test]
fn single_item_gets_one_row() {
    let items = boxes(&[(500.0, 500.0)]);
    let partition = pack_rows(&items, 1000.0, 220.0).expect("pack");
    assert_eq!(partition.boundaries(), &[0, 1]);
    let rows = partition.to_rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0], &items[..]);
}

#[test]
fn oversized_single_item_still_gets_a_row() {
    let items = boxes(&[(3000.0, 1000.0)]);
    let partition = pack_rows(&items, 500.0, 220.0).expect("pack");
    assert_eq!(partition.boundaries(), &[0, 1]);
}

#[test]
fn oversized_item_in_the_middle() {
    // widths at ideal height: 200, 1000, 200 in a 500px viewport
    let items = boxes(&[(100.0, 100.0), (500.0, 100.0), (100.0, 100.0)]);
    let partition = pack_rows(&items, 500.0, 200.0).expect("pack");
    assert_eq!(partition.boundaries(), &[0, 2, 3]);
    for row in partition.rows() {
        assert!(!row.is_empty());
    }
}

#[test]
fn empty_sequence_is_invalid_input() {
    let items: Vec<ImageBox> = Vec::new();
    let err = pack_rows(&items, 1000.0, 220.0).unwrap_err();
    assert!(matches!(err, LayoutError::Empty));
    assert!(err.is_invalid_input());
}

#[test]
fn packing_is_deterministic() {
    let items = boxes(&[
        (1200.0, 800.0),
        (800.0, 1200.0),
        (1920.0, 1080.0),
        (1000.0, 1000.0),
        (640.0, 480.0),
        (3000.0, 1000.0),
        (700.0, 1400.0),
    ]);
    let packer = RowPacker::new(
        LayoutConfig::builder()
            .viewport_width(900.0)
            .ideal_height(180.0)
            .build(),
    );
    let a = packer.pack(&items).expect("pack");
    let b = packer.pack(&items).expect("pack");
    assert_eq!(a.boundaries(), b.boundaries());
    assert_eq!(a.total_cost(), b.total_cost());
}

#[test]
fn plain_tuples_are_accepted() {
    let items: Vec<(u32, u32)> = vec![(400, 300), (300, 400), (1600, 900)];
    let partition = pack_rows(&items, 800.0, 200.0).expect("pack");
    let flat: Vec<(u32, u32)> = partition.rows().flatten().copied().collect();
    assert_eq!(flat, items);
}
