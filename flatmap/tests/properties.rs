//! Model-checked properties of both map backings
//!
//! Each case replays a random sequence of operations against a map and
//! against a plain `Vec` that is kept sorted with a stable insertion rule,
//! then compares the two after every step.

use flatmap::{Error, FlatMap, Reverse, SortedMultimap, StaticFlatMap};
use proptest::prelude::*;

type Key = u8;
type Value = u16;

#[derive(Clone, Debug)]
enum Op {
    Insert(Key, Value),
    Erase(Key),
    EraseAt(usize),
    EraseAll(Key),
    Upsert(Key, Value),
    Clear,
}

fn op() -> impl Strategy<Value = Op> {
    // Keys come from a small range so duplicates are common
    let key = 0..24u8;
    prop_oneof![
        6 => (key.clone(), any::<Value>()).prop_map(|(k, v)| Op::Insert(k, v)),
        2 => key.clone().prop_map(Op::Erase),
        2 => (0..40usize).prop_map(Op::EraseAt),
        1 => key.clone().prop_map(Op::EraseAll),
        2 => (key, any::<Value>()).prop_map(|(k, v)| Op::Upsert(k, v)),
        1 => Just(Op::Clear),
    ]
}

/// Reference multimap: a vector kept sorted, duplicates in insertion order
#[derive(Default)]
struct Model {
    entries: Vec<(Key, Value)>,
    capacity: Option<usize>,
}

impl Model {
    fn insert(&mut self, entry: (Key, Value)) -> Result<usize, Error> {
        if let Some(capacity) = self.capacity {
            if self.entries.len() == capacity {
                return Err(Error::CapacityExceeded { capacity });
            }
        }
        let pos = self.entries.partition_point(|(k, _)| *k <= entry.0);
        self.entries.insert(pos, entry);
        Ok(pos)
    }

    fn find(&self, key: Key) -> Option<usize> {
        self.entries.iter().position(|(k, _)| *k == key)
    }
}

/// Apply one operation to both sides and check they agree.
fn step<M: SortedMultimap<Key, Value>>(
    map: &mut M,
    model: &mut Model,
    op: &Op,
    erase_all: impl FnOnce(&mut M, Key) -> usize,
) -> Result<(), TestCaseError> {
    match *op {
        Op::Insert(k, v) => {
            prop_assert_eq!(map.insert((k, v)), model.insert((k, v)));
        }
        Op::Erase(k) => {
            let expected = match model.find(k) {
                Some(pos) => {
                    model.entries.remove(pos);
                    Ok(pos)
                }
                None => Err(Error::InvalidPosition {
                    position: model.entries.len(),
                    len: model.entries.len(),
                }),
            };
            prop_assert_eq!(map.erase(&k), expected);
        }
        Op::EraseAt(pos) => {
            let len = model.entries.len();
            let expected = if pos < len {
                model.entries.remove(pos);
                Ok(pos)
            } else {
                Err(Error::InvalidPosition { position: pos, len })
            };
            prop_assert_eq!(map.erase_at(pos), expected);
        }
        Op::EraseAll(k) => {
            let before = model.entries.len();
            model.entries.retain(|(key, _)| *key != k);
            prop_assert_eq!(erase_all(map, k), before - model.entries.len());
        }
        Op::Upsert(k, v) => {
            let model_value = match model.find(k) {
                Some(pos) => Ok(pos),
                None => model.insert((k, 0)),
            };
            match (map.get_or_insert_default(k), model_value) {
                (Ok(value), Ok(pos)) => {
                    *value = v;
                    model.entries[pos].1 = v;
                }
                (actual, expected) => {
                    prop_assert_eq!(actual.map(|v| *v), expected.map(|_| 0));
                }
            }
        }
        Op::Clear => {
            map.clear();
            model.entries.clear();
        }
    }
    prop_assert_eq!(map.as_slice(), model.entries.as_slice());
    prop_assert!(map.as_slice().windows(2).all(|w| w[0].0 <= w[1].0));
    Ok(())
}

proptest! {
    #[test]
    fn static_map_matches_model(ops in prop::collection::vec(op(), 0..200)) {
        let mut map = StaticFlatMap::<Key, Value, 16>::new();
        let mut model = Model { capacity: Some(16), ..Model::default() };
        for op in &ops {
            step(&mut map, &mut model, op, |m, k| m.erase_all(&k))?;
        }
        prop_assert!(map.len() <= map.capacity());
    }

    #[test]
    fn growable_map_matches_model(ops in prop::collection::vec(op(), 0..200)) {
        let mut map = FlatMap::<Key, Value>::new();
        let mut model = Model::default();
        for op in &ops {
            step(&mut map, &mut model, op, |m, k| m.erase_all(&k))?;
        }
    }

    #[test]
    fn lookups_find_oldest_present_entry(
        entries in prop::collection::vec((0..32u8, any::<Value>()), 0..64),
        probe in 0..40u8,
    ) {
        let map = FlatMap::<Key, Value>::try_from_pairs(entries.iter().copied()).unwrap();
        let expected = entries.iter().find(|(k, _)| *k == probe).map(|(_, v)| v);
        prop_assert_eq!(map.get(&probe), expected);
        if expected.is_none() {
            prop_assert_eq!(map.find(&probe), map.end());
        }
        prop_assert_eq!(map.count(&probe), entries.iter().filter(|(k, _)| *k == probe).count());
    }

    #[test]
    fn reverse_order_is_mirror_image(keys in prop::collection::vec(any::<Key>(), 0..32)) {
        let ascending = StaticFlatMap::<Key, (), 32>::try_from_pairs(keys.iter().map(|k| (*k, ()))).unwrap();
        let descending = StaticFlatMap::<Key, (), 32, Reverse>::try_from_pairs(keys.iter().map(|k| (*k, ()))).unwrap();
        let mirrored: Vec<Key> = descending.keys().rev().copied().collect();
        prop_assert_eq!(ascending.keys().copied().collect::<Vec<_>>(), mirrored);
    }

    #[test]
    fn copies_do_not_share_state(
        entries in prop::collection::vec((any::<Key>(), any::<Value>()), 1..32),
    ) {
        let original = StaticFlatMap::<Key, Value, 32>::try_from_pairs(entries.iter().copied()).unwrap();
        let snapshot: Vec<_> = original.iter().copied().collect();
        let mut copy = original;
        prop_assert_eq!(copy, original);
        copy.erase_at(0).unwrap();
        if let Some(value) = copy.value_at_mut(0) {
            *value = value.wrapping_add(1);
        }
        prop_assert_eq!(original.as_slice(), snapshot.as_slice());
        prop_assert_eq!(copy.len() + 1, original.len());
    }
}
