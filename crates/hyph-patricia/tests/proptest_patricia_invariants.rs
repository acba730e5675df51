#![forbid(unsafe_code)]

//! Property-based invariant tests for the PATRICIA map.
//!
//! 1. Lookup agrees with a `BTreeMap` model after any insert sequence.
//! 2. Re-inserting a key never allocates a node.
//! 3. One arena node per distinct non-zero key, plus the root.
//! 4. Branch walks visit every node exactly once, in every order.
//! 5. Absent keys return the default.
//! 6. Teardown releases every node.

use std::collections::BTreeMap;
use std::convert::Infallible;

use hyph_patricia::{IndexError, PatriciaMap, WalkFlags, WalkOrder};
use proptest::prelude::*;

// ── Strategies ──────────────────────────────────────────────────────────

/// Keys without NUL bytes, so no two distinct keys are equal under padding.
fn key() -> impl Strategy<Value = Vec<u8>> {
    prop_oneof![
        proptest::collection::vec(b'a'..=b'e', 0..6),
        proptest::collection::vec(1u8..=255, 1..12),
    ]
}

fn entries() -> impl Strategy<Value = Vec<(Vec<u8>, u32)>> {
    proptest::collection::vec((key(), any::<u32>()), 0..200)
}

/// Arbitrary bytes, NULs included.
fn raw_key() -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec(prop_oneof![Just(0u8), any::<u8>()], 0..6)
}

// ── Helpers ─────────────────────────────────────────────────────────────

fn build(entries: &[(Vec<u8>, u32)]) -> (PatriciaMap<u32>, BTreeMap<Vec<u8>, u32>) {
    let mut map = PatriciaMap::new(u32::MAX);
    let mut model = BTreeMap::new();
    for (k, v) in entries {
        map.insert(k, *v).unwrap();
        model.insert(k.clone(), *v);
    }
    (map, model)
}

fn non_zero_keys(model: &BTreeMap<Vec<u8>, u32>) -> usize {
    model.keys().filter(|k| k.iter().any(|&b| b != 0)).count()
}

proptest! {
    #[test]
    fn lookup_matches_model(entries in entries()) {
        let (map, model) = build(&entries);
        prop_assert_eq!(map.len(), model.len());
        for (k, v) in &model {
            prop_assert_eq!(map.get(k), Some(v), "key {:?}", k);
        }
    }

    #[test]
    fn absent_keys_return_default(entries in entries(), absent in key()) {
        let (map, model) = build(&entries);
        if !model.contains_key(&absent) {
            prop_assert_eq!(*map.lookup(&absent), u32::MAX);
            prop_assert!(!map.contains_key(&absent));
        }
    }

    #[test]
    fn reinsert_keeps_node_count(entries in entries(), value in any::<u32>()) {
        let (mut map, model) = build(&entries);
        let nodes = map.node_count();
        for k in model.keys() {
            map.insert(k, value).unwrap();
        }
        prop_assert_eq!(map.node_count(), nodes);
        for k in model.keys() {
            prop_assert_eq!(*map.lookup(k), value);
        }
    }

    #[test]
    fn one_node_per_key(entries in entries()) {
        let (map, model) = build(&entries);
        prop_assert_eq!(map.node_count(), non_zero_keys(&model) + 1);
    }

    #[test]
    fn branch_walks_cover_each_node_once(entries in entries()) {
        let (map, _) = build(&entries);
        for order in [WalkOrder::InOrder, WalkOrder::PreOrder, WalkOrder::PostOrder] {
            let mut visits = 0usize;
            map.walk(order, WalkFlags::BRANCHES, |_| {
                visits += 1;
                Ok::<(), Infallible>(())
            }).unwrap();
            prop_assert_eq!(visits, map.node_count());
        }
    }

    #[test]
    fn entries_match_model(entries in entries()) {
        let (map, model) = build(&entries);
        let got: BTreeMap<Vec<u8>, u32> = map
            .entries()
            .into_iter()
            .map(|(k, v)| (k.to_vec(), *v))
            .collect();
        prop_assert_eq!(got, model);
    }

    #[test]
    fn destroy_releases_every_node(entries in entries()) {
        let (map, _) = build(&entries);
        let nodes = map.node_count();
        prop_assert_eq!(map.destroy(), nodes);
    }

    #[test]
    fn raw_keys_never_corrupt(keys in proptest::collection::vec(raw_key(), 0..60)) {
        let mut map = PatriciaMap::new(usize::MAX);
        let mut model: BTreeMap<Vec<u8>, usize> = BTreeMap::new();
        for (i, k) in keys.iter().enumerate() {
            match map.insert(k, i) {
                Ok(()) => {
                    // All-zero keys of any length share one entry.
                    if k.iter().all(|&b| b == 0) {
                        model.retain(|m, _| m.iter().any(|&b| b != 0));
                    }
                    model.insert(k.clone(), i);
                }
                Err(IndexError::AmbiguousKey { .. }) => {
                    // Rejected keys must collide with a stored key under padding.
                    let trimmed = |k: &[u8]| {
                        let end = k.iter().rposition(|&b| b != 0).map_or(0, |p| p + 1);
                        k[..end].to_vec()
                    };
                    prop_assert!(model.keys().any(|m| trimmed(m) == trimmed(k) && m != k));
                }
                Err(other) => prop_assert!(false, "unexpected error {other}"),
            }
        }
        for (k, v) in &model {
            prop_assert_eq!(map.get(k), Some(v));
        }
        prop_assert_eq!(map.len(), model.len());
    }

    #[test]
    fn zero_keys_alias_each_other(lens in proptest::collection::vec(0usize..8, 1..10)) {
        let mut map = PatriciaMap::new(u32::MAX);
        for (i, len) in lens.iter().enumerate() {
            map.insert(&vec![0u8; *len], i as u32).unwrap();
        }
        let last = lens.len() as u32 - 1;
        for len in 0..8 {
            prop_assert_eq!(map.get(&vec![0u8; len]), Some(&last));
        }
        prop_assert_eq!(map.len(), 1);
        prop_assert_eq!(map.node_count(), 1);
    }
}
