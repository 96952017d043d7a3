use gallery_layout_core::packer::cost::row_cost;
use gallery_layout_core::packer::graph::candidate_targets;
use gallery_layout_core::prelude::*;
use rand::{Rng, SeedableRng};

fn random_gallery(rng: &mut rand::rngs::StdRng) -> (Vec<ImageBox<String>>, f64, f64) {
    let n = rng.gen_range(1..=40);
    let items = (0..n)
        .map(|i| {
            let w = rng.gen_range(100..=4000) as f64;
            let h = rng.gen_range(100..=4000) as f64;
            ImageBox::new(format!("img{}", i), w, h)
        })
        .collect();
    let viewport = rng.gen_range(300..=2000) as f64;
    let ideal = rng.gen_range(100..=400) as f64;
    (items, viewport, ideal)
}

#[test]
fn rows_concatenate_to_input() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(42);
    for _ in 0..200 {
        let (items, viewport, ideal) = random_gallery(&mut rng);
        let partition = pack_rows(&items, viewport, ideal).expect("pack");

        let flat: Vec<&ImageBox<String>> = partition.rows().flatten().collect();
        assert_eq!(flat.len(), items.len());
        for (a, b) in flat.iter().zip(items.iter()) {
            assert!(std::ptr::eq(*a, b), "item identity must be preserved");
        }
    }
}

#[test]
fn rows_are_non_empty_and_boundaries_increase() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(7);
    for _ in 0..200 {
        let (items, viewport, ideal) = random_gallery(&mut rng);
        let partition = pack_rows(&items, viewport, ideal).expect("pack");

        let b = partition.boundaries();
        assert_eq!(b.first(), Some(&0));
        assert_eq!(b.last(), Some(&items.len()));
        assert!(b.windows(2).all(|w| w[0] < w[1]));
        assert!(partition.rows().all(|r| !r.is_empty()));
        assert_eq!(partition.len(), b.len() - 1);
    }
}

#[test]
fn every_row_is_a_candidate_and_costs_add_up() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(1234);
    for _ in 0..200 {
        let (items, viewport, ideal) = random_gallery(&mut rng);
        let partition = pack_rows(&items, viewport, ideal).expect("pack");

        let mut total = 0.0;
        for range in partition.ranges() {
            let targets = candidate_targets(&items, range.start, viewport, ideal);
            assert!(
                targets.contains(&range.end),
                "row {:?} is not a candidate (targets {:?})",
                range,
                targets
            );
            total += row_cost(&items[range], viewport, ideal);
        }
        let diff = (total - partition.total_cost()).abs();
        assert!(diff <= 1e-9 * total.max(1.0), "{} vs {}", total, partition.total_cost());
    }
}

#[test]
fn repeated_runs_match() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(99);
    for _ in 0..50 {
        let (items, viewport, ideal) = random_gallery(&mut rng);
        let a = pack_rows(&items, viewport, ideal).expect("pack");
        let b = pack_rows(&items, viewport, ideal).expect("pack");
        assert_eq!(a.boundaries(), b.boundaries());
        assert_eq!(a.total_cost().to_bits(), b.total_cost().to_bits());
    }
}
