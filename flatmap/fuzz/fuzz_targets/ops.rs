//! Fuzzer for StaticFlatMap.
//!
//! The slot storage underneath the map is `unsafe`, so every operation is
//! replayed against a simulated map built from an `ArrayVec` and linear
//! scans, and the two must agree after each step.

#![no_main]
use arbitrary::Arbitrary;
use arrayvec::ArrayVec;
use flatmap::{Error, Natural, StaticFlatMap};
use libfuzzer_sys::fuzz_target;

type Key = u8;
type Val = u32;

#[derive(Clone, Debug, Arbitrary)]
enum Op {
    Insert(Key, Val),
    Find(Key),
    EraseAt(u8),
    Erase(Key),
    EraseAll(Key),
    EraseRange(u8, u8),
    Upsert(Key, Val),
    Bounds(Key),
    Copy,
    Clear,
}

#[derive(Debug, Default)]
struct SimulatedMap<const N: usize>(ArrayVec<(Key, Val), N>);

impl<const N: usize> SimulatedMap<N> {
    fn insert(&mut self, entry: (Key, Val)) -> Result<usize, Error> {
        if self.0.is_full() {
            return Err(Error::CapacityExceeded { capacity: N });
        }
        let pos = self.0.iter().take_while(|(k, _)| *k <= entry.0).count();
        self.0.insert(pos, entry);
        Ok(pos)
    }

    fn find(&self, key: Key) -> usize {
        self.0
            .iter()
            .position(|(k, _)| *k == key)
            .unwrap_or(self.0.len())
    }

    fn erase_at(&mut self, pos: usize) -> Result<usize, Error> {
        let len = self.0.len();
        if pos >= len {
            return Err(Error::InvalidPosition { position: pos, len });
        }
        self.0.remove(pos);
        Ok(pos)
    }
}

struct Sim<const N: usize> {
    map: StaticFlatMap<Key, Val, N>,
    sim: SimulatedMap<N>,
}

impl<const N: usize> Sim<N> {
    fn new() -> Self {
        Self {
            map: StaticFlatMap::new(),
            sim: SimulatedMap::default(),
        }
    }

    fn apply(&mut self, op: &Op) {
        match *op {
            Op::Insert(k, v) => {
                assert_eq!(self.map.insert((k, v)), self.sim.insert((k, v)));
            }
            Op::Find(k) => {
                assert_eq!(self.map.find(&k), self.sim.find(k));
            }
            Op::EraseAt(pos) => {
                let pos = usize::from(pos);
                assert_eq!(self.map.erase_at(pos), self.sim.erase_at(pos));
            }
            Op::Erase(k) => {
                let pos = self.sim.find(k);
                assert_eq!(self.map.erase(&k), self.sim.erase_at(pos));
            }
            Op::EraseAll(k) => {
                let before = self.sim.0.len();
                self.sim.0.retain(|(key, _)| *key != k);
                assert_eq!(self.map.erase_all(&k), before - self.sim.0.len());
            }
            Op::EraseRange(a, b) => {
                let (start, end) = (usize::from(a), usize::from(b));
                let len = self.sim.0.len();
                let expected = if start <= end && end <= len {
                    self.sim.0.drain(start..end);
                    Ok(start)
                } else {
                    Err(Error::InvalidPosition {
                        position: end.max(start),
                        len,
                    })
                };
                assert_eq!(self.map.erase_range(start..end), expected);
            }
            Op::Upsert(k, v) => {
                let pos = self.sim.find(k);
                let expected = if pos < self.sim.0.len() {
                    Ok(pos)
                } else {
                    self.sim.insert((k, 0))
                };
                match (self.map.get_or_insert_default(k), expected) {
                    (Ok(value), Ok(pos)) => {
                        *value = v;
                        self.sim.0[pos].1 = v;
                    }
                    (actual, expected) => {
                        assert_eq!(actual.map(|v| *v), expected.map(|_| 0));
                    }
                }
            }
            Op::Bounds(k) => {
                let slice = self.map.as_slice();
                let lower = self.sim.0.iter().take_while(|(key, _)| *key < k).count();
                let upper = self.sim.0.iter().take_while(|(key, _)| *key <= k).count();
                assert_eq!(flatmap::lower_bound(slice, &k, &Natural), lower);
                assert_eq!(flatmap::upper_bound(slice, &k, &Natural), upper);
                assert_eq!(self.map.equal_range(&k), lower..upper);
            }
            Op::Copy => {
                let copy = self.map;
                self.map.clear();
                self.map = copy;
            }
            Op::Clear => {
                self.map.clear();
                self.sim.0.clear();
            }
        }
        assert_eq!(self.map.as_slice(), self.sim.0.as_slice());
    }
}

fuzz_target!(|ex: Vec<Op>| {
    let mut small: Sim<7> = Sim::new();
    let mut large: Sim<64> = Sim::new();
    for o in &ex {
        small.apply(o);
        large.apply(o);
    }
});
