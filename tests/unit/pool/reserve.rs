use super::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::BTreeSet;

fn items(n: usize) -> Vec<Arc<Item>> {
    (0..n)
        .map(|i| Arc::new(Item::new(format!("s{i}"), format!("img/{i}.jpg"))))
        .collect()
}

fn all_ids(p: &Partition) -> Vec<String> {
    let mut out: Vec<String> = p
        .fronts
        .iter()
        .flatten()
        .map(|i| i.id.0.clone())
        .chain(p.reserve.ids().map(|id| id.0.clone()))
        .collect();
    out.sort();
    out
}

#[test]
fn take_one_is_fifo_and_removes() {
    let mut pool = ReservePool::new();
    for item in items(3) {
        pool.give_back(item);
    }
    let first = pool.take_one().unwrap();
    assert_eq!(first.id, ItemId::from("s0"));
    assert!(!pool.contains(&first.id));
    assert_eq!(pool.len(), 2);
    pool.take_one();
    pool.take_one();
    assert!(pool.take_one().is_none());
    assert!(pool.is_empty());
}

#[test]
fn give_back_ignores_present_ids() {
    let mut pool = ReservePool::new();
    let item = items(1).remove(0);
    assert!(pool.give_back(item.clone()));
    assert!(!pool.give_back(item));
    assert_eq!(pool.len(), 1);
}

#[test]
fn five_items_fill_four_tiles_with_one_in_reserve() {
    let mut rng = StdRng::seed_from_u64(7);
    let p = initialize(&items(5), 4, &mut rng);
    assert_eq!(p.fronts.len(), 4);
    assert!(p.fronts.iter().all(Option::is_some));
    assert_eq!(p.reserve.len(), 1);
    assert!(p.shortfall.is_none());
    assert_eq!(all_ids(&p).len(), 5);
}

#[test]
fn three_items_leave_a_blank_tile_and_warn() {
    let mut rng = StdRng::seed_from_u64(7);
    let p = initialize(&items(3), 4, &mut rng);
    assert_eq!(p.fronts.len(), 4);
    assert_eq!(p.fronts.iter().flatten().count(), 3);
    assert!(p.fronts[3].is_none());
    assert!(p.reserve.is_empty());
    let shortfall = p.shortfall.unwrap();
    assert_eq!(shortfall, Shortfall { items: 3, tiles: 4 });
    assert!(shortfall.leaves_blank_tiles());
}

#[test]
fn exact_fit_warns_without_blank_tiles() {
    let mut rng = StdRng::seed_from_u64(1);
    let p = initialize(&items(4), 4, &mut rng);
    let shortfall = p.shortfall.unwrap();
    assert!(!shortfall.leaves_blank_tiles());
    assert!(p.reserve.is_empty());
}

#[test]
fn shuffle_is_seed_deterministic() {
    let a = initialize(&items(20), 6, &mut StdRng::seed_from_u64(42));
    let b = initialize(&items(20), 6, &mut StdRng::seed_from_u64(42));
    let ids = |p: &Partition| -> Vec<String> {
        p.fronts
            .iter()
            .flatten()
            .map(|i| i.id.0.clone())
            .collect()
    };
    assert_eq!(ids(&a), ids(&b));
}

#[test]
fn every_item_lands_first_somewhere_over_many_seeds() {
    let src = items(5);
    let mut seen_first = BTreeSet::new();
    for seed in 0..200 {
        let p = initialize(&src, 2, &mut StdRng::seed_from_u64(seed));
        seen_first.insert(p.fronts[0].as_ref().unwrap().id.0.clone());
    }
    assert_eq!(seen_first.len(), 5);
}

mod props {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn partition_neither_loses_nor_duplicates(n in 0usize..60, tiles in 0usize..40, seed in any::<u64>()) {
            let src = items(n);
            let p = initialize(&src, tiles, &mut StdRng::seed_from_u64(seed));
            let mut expected: Vec<String> = src.iter().map(|i| i.id.0.clone()).collect();
            expected.sort();
            prop_assert_eq!(all_ids(&p), expected);
            prop_assert_eq!(p.fronts.len(), tiles);
            prop_assert_eq!(p.shortfall.is_some(), n < tiles + 1);
        }
    }
}
