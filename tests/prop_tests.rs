//! Differential properties against `BTreeMap` as the oracle: same entries,
//! same order, same answers, across arbitrary mutation sequences.

use std::collections::BTreeMap;

use proptest::prelude::*;

use radixmap::RadixMap;

fn key() -> impl Strategy<Value = Vec<u8>> {
    // A tiny byte alphabet makes shared prefixes, edge splits, and erase
    // merges common instead of rare.
    prop::collection::vec(0u8..4, 0..=10)
}

fn entries(max: usize) -> impl Strategy<Value = Vec<(Vec<u8>, u64)>> {
    prop::collection::vec((key(), any::<u64>()), 0..=max)
}

#[derive(Debug, Clone)]
enum Op {
    Insert(Vec<u8>, u64),
    Remove(Vec<u8>),
}

fn ops(max: usize) -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(
        prop_oneof![
            3 => (key(), any::<u64>()).prop_map(|(k, v)| Op::Insert(k, v)),
            2 => key().prop_map(Op::Remove),
        ],
        0..=max,
    )
}

fn build(entries: &[(Vec<u8>, u64)]) -> (RadixMap<Vec<u8>, u64>, BTreeMap<Vec<u8>, u64>) {
    let mut map = RadixMap::new();
    let mut oracle = BTreeMap::new();
    for (k, v) in entries {
        map.insert(k.clone(), *v);
        oracle.entry(k.clone()).or_insert(*v);
    }
    (map, oracle)
}

fn collected(map: &RadixMap<Vec<u8>, u64>) -> Vec<(Vec<u8>, u64)> {
    map.iter().map(|(k, v)| (k.clone(), *v)).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn iteration_is_sorted_and_deduplicated(entries in entries(64)) {
        let (map, oracle) = build(&entries);
        prop_assert_eq!(map.len(), oracle.len());
        let want: Vec<_> = oracle.iter().map(|(k, v)| (k.clone(), *v)).collect();
        prop_assert_eq!(collected(&map), want);
    }

    #[test]
    fn lookups_agree_with_oracle(
        entries in entries(64),
        probes in prop::collection::vec(key(), 0..=32),
    ) {
        let (map, oracle) = build(&entries);
        for probe in &probes {
            prop_assert_eq!(map.get(probe.as_slice()), oracle.get(probe));
            prop_assert_eq!(map.contains_key(probe.as_slice()), oracle.contains_key(probe));
        }
    }

    #[test]
    fn longest_match_agrees_with_oracle(
        entries in entries(64),
        probes in prop::collection::vec(key(), 0..=32),
    ) {
        let (map, oracle) = build(&entries);
        for probe in &probes {
            let want = (0..=probe.len()).rev().find_map(|n| oracle.get_key_value(&probe[..n]));
            prop_assert_eq!(map.longest_match(probe.as_slice()), want);
        }
    }

    #[test]
    fn prefix_match_equals_filtered_oracle(entries in entries(64), prefix in key()) {
        let (map, oracle) = build(&entries);
        let got: Vec<_> = map
            .prefix_match(prefix.as_slice())
            .map(|(k, v)| (k.clone(), *v))
            .collect();
        let want: Vec<_> = oracle
            .iter()
            .filter(|(k, _)| k.starts_with(&prefix))
            .map(|(k, v)| (k.clone(), *v))
            .collect();
        prop_assert_eq!(got, want);
    }

    #[test]
    fn mutation_sequences_preserve_structure(ops in ops(96)) {
        let mut map: RadixMap<Vec<u8>, u64> = RadixMap::new();
        let mut oracle: BTreeMap<Vec<u8>, u64> = BTreeMap::new();
        for op in &ops {
            match op {
                Op::Insert(k, v) => {
                    let (_, inserted) = map.insert(k.clone(), *v);
                    prop_assert_eq!(inserted, !oracle.contains_key(k));
                    oracle.entry(k.clone()).or_insert(*v);
                }
                Op::Remove(k) => {
                    prop_assert_eq!(map.remove(k.as_slice()), oracle.remove(k));
                }
            }
        }
        map.check_invariants();
        prop_assert_eq!(map.len(), oracle.len());
        let want: Vec<_> = oracle.iter().map(|(k, v)| (k.clone(), *v)).collect();
        prop_assert_eq!(collected(&map), want);
    }

    #[test]
    fn remove_undoes_insert(entries in entries(48), target in key()) {
        let (mut map, oracle) = build(&entries);
        prop_assume!(!oracle.contains_key(&target));
        let shape_before = map.stats();
        let before = collected(&map);
        map.insert(target.clone(), 12345);
        prop_assert_eq!(map.remove(target.as_slice()), Some(12345));
        map.check_invariants();
        // Both the entries and the node shape are exactly restored.
        prop_assert_eq!(collected(&map), before);
        prop_assert_eq!(map.stats(), shape_before);
    }
}
