#![no_main]

use std::collections::BTreeMap;

use arbitrary::Arbitrary;
use hyph_patricia::{IndexError, PatriciaMap, WalkFlags, WalkOrder};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
enum Op {
    Insert(Vec<u8>, u16),
    Lookup(Vec<u8>),
}

fn trimmed(key: &[u8]) -> &[u8] {
    let end = key.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    &key[..end]
}

fuzz_target!(|ops: Vec<Op>| {
    let mut map = PatriciaMap::new(u16::MAX);
    // Keys equal under zero padding share one model slot; only all-zero
    // keys may replace one another.
    let mut model: BTreeMap<Vec<u8>, (Vec<u8>, u16)> = BTreeMap::new();

    for op in ops.iter().take(512) {
        match op {
            Op::Insert(key, value) => match map.insert(key, *value) {
                Ok(()) => {
                    model.insert(trimmed(key).to_vec(), (key.clone(), *value));
                }
                Err(IndexError::AmbiguousKey { .. }) => {
                    let (stored, _) = &model[trimmed(key)];
                    assert_ne!(stored, key);
                }
                Err(IndexError::OutOfMemory(_)) => return,
            },
            Op::Lookup(key) => {
                let expected = match model.get(trimmed(key)) {
                    // Zero keys of any length name the root entry.
                    Some((stored, value)) if stored == key || trimmed(key).is_empty() => {
                        Some(value)
                    }
                    _ => None,
                };
                assert_eq!(map.get(key), expected);
            }
        }
    }

    assert_eq!(map.len(), model.len());
    let nodes = map.node_count();
    let mut branches = 0usize;
    map.walk(WalkOrder::PostOrder, WalkFlags::BRANCHES, |_| {
        branches += 1;
        Ok::<(), ()>(())
    })
    .unwrap();
    assert_eq!(branches, nodes);
    assert_eq!(map.destroy(), nodes);
});
