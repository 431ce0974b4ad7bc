//! Skip List Invariant Tests
//!
//! Ordering, uniqueness, span correctness and range-delete correctness,
//! checked against a `BTreeMap` after randomized operation sequences.

use std::collections::BTreeMap;

use domainkv::SkipList;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::common::*;

fn assert_matches_model(list: &SkipList, model: &BTreeMap<String, String>) {
    assert_eq!(list.len(), model.len());
    let entries: Vec<(&str, &str)> = list.iter().collect();
    let expected: Vec<(&str, &str)> = model.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
    assert_eq!(entries, expected);
    for (rank, k) in model.keys().enumerate() {
        assert_eq!(list.rank(k).unwrap(), rank, "rank of {}", k);
    }
}

// ============================================================================
// Ordering and Uniqueness
// ============================================================================

#[test]
fn traversal_is_strictly_increasing() {
    let mut list = SkipList::with_seed(TEST_SEED);
    for k in ["pear", "apple", "fig", "banana", "apple", "cherry"] {
        list.insert(k, "x");
    }
    let keys: Vec<&str> = list.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["apple", "banana", "cherry", "fig", "pear"]);
    assert!(keys.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn overwrite_keeps_single_entry() {
    let mut list = SkipList::with_seed(TEST_SEED);
    assert!(list.insert("k", "v1"));
    assert!(!list.insert("k", "v2"));
    assert_eq!(list.len(), 1);
    assert_eq!(list.search("k").unwrap(), "v2");
}

#[test]
fn ordering_is_lexicographic_not_numeric() {
    let mut list = SkipList::with_seed(TEST_SEED);
    for k in ["10", "9", "100", "1"] {
        list.insert(k, k);
    }
    let keys: Vec<&str> = list.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["1", "10", "100", "9"]);
    assert_eq!(list.rank("9").unwrap(), 3);
}

// ============================================================================
// Rank
// ============================================================================

#[test]
fn rank_shifts_after_delete_of_middle_key() {
    let mut list = SkipList::with_seed(TEST_SEED);
    for k in ["a", "b", "c", "d", "e"] {
        list.insert(k, k);
    }
    assert_eq!(list.rank("d").unwrap(), 3);
    assert_eq!(list.rank("e").unwrap(), 4);

    list.delete("c").unwrap();

    assert_eq!(list.rank("a").unwrap(), 0);
    assert_eq!(list.rank("b").unwrap(), 1);
    assert_eq!(list.rank("d").unwrap(), 2);
    assert_eq!(list.rank("e").unwrap(), 3);
}

#[test]
fn absent_key_operations_leave_list_unchanged() {
    let mut list = SkipList::with_seed(TEST_SEED);
    for i in 0..20 {
        list.insert(key(i), "v");
    }
    let before: Vec<(String, String)> = list
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    assert!(list.search("zzz").unwrap_err().is_not_found());
    assert!(list.rank("zzz").unwrap_err().is_not_found());
    assert!(list.delete("zzz").unwrap_err().is_not_found());

    let after: Vec<(String, String)> = list
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    assert_eq!(before, after);
}

#[test]
fn large_list_rank_matches_position() {
    let mut list = SkipList::with_seed(TEST_SEED);
    // Insert in reverse so every insert lands at the head.
    for i in (0..2_000).rev() {
        list.insert(key(i), "v");
    }
    for i in (0..2_000).step_by(37) {
        assert_eq!(list.rank(&key(i)).unwrap(), i);
    }
    assert!(list.level() > 1);
}

// ============================================================================
// Range Delete
// ============================================================================

#[test]
fn delete_range_is_inclusive_on_both_ends() {
    let mut list = SkipList::with_seed(TEST_SEED);
    for i in 0..10 {
        list.insert(key(i), "v");
    }
    assert_eq!(list.delete_range(&key(3), &key(6)), 4);
    let remaining: Vec<&str> = list.iter().map(|(k, _)| k).collect();
    assert_eq!(
        remaining,
        vec![key(0), key(1), key(2), key(7), key(8), key(9)]
    );
    assert_eq!(list.rank(&key(7)).unwrap(), 3);
}

#[test]
fn delete_range_with_bounds_between_keys() {
    let mut list = SkipList::with_seed(TEST_SEED);
    for k in ["b", "d", "f", "h"] {
        list.insert(k, k);
    }
    assert_eq!(list.delete_range("c", "g"), 2);
    assert!(list.contains("b"));
    assert!(list.contains("h"));
    assert!(!list.contains("d"));
    assert!(!list.contains("f"));
}

#[test]
fn delete_range_empty_and_inverted() {
    let mut list = SkipList::with_seed(TEST_SEED);
    for k in ["b", "d"] {
        list.insert(k, k);
    }
    assert_eq!(list.delete_range("x", "z"), 0);
    assert_eq!(list.delete_range("d", "b"), 0);
    assert_eq!(list.len(), 2);
}

#[test]
fn delete_range_everything_then_reuse() {
    let mut list = SkipList::with_seed(TEST_SEED);
    for i in 0..100 {
        list.insert(key(i), "v");
    }
    assert_eq!(list.delete_range("", "~"), 100);
    assert!(list.is_empty());
    assert_eq!(list.level(), 1);

    list.insert("again", "1");
    assert_eq!(list.rank("again").unwrap(), 0);
}

// ============================================================================
// Randomized model check
// ============================================================================

#[test]
fn random_operations_match_btreemap() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut list = SkipList::with_seed(TEST_SEED);
    let mut model = BTreeMap::new();

    for step in 0..3_000 {
        let k = key(rng.gen_range(0..300));
        match rng.gen_range(0..10) {
            0..=4 => {
                let v = format!("s{}", step);
                let created = list.insert(k.clone(), v.clone());
                assert_eq!(created, model.insert(k, v).is_none());
            }
            5..=6 => match model.remove(&k) {
                Some(v) => assert_eq!(list.delete(&k).unwrap(), v),
                None => assert!(list.delete(&k).is_err()),
            },
            7 => {
                let other = key(rng.gen_range(0..300));
                let (lo, hi) = if k <= other { (k, other) } else { (other, k) };
                let doomed: Vec<String> = model.range(lo.clone()..=hi.clone()).map(|(k, _)| k.clone()).collect();
                for d in &doomed {
                    model.remove(d);
                }
                assert_eq!(list.delete_range(&lo, &hi), doomed.len());
            }
            _ => match model.get(&k) {
                Some(v) => assert_eq!(list.search(&k).unwrap(), v),
                None => assert!(list.search(&k).is_err()),
            },
        }
        if step % 250 == 0 {
            assert_matches_model(&list, &model);
        }
    }
    assert_matches_model(&list, &model);
}
