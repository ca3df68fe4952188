//! Serde support, enabled with the `serde` feature
//!
//! Maps serialize as a sequence of `(key, value)` pairs in sorted order. On
//! the way back in, each pair is inserted in sequence order, so the relative
//! order of duplicate keys survives a round trip. A [`StaticFlatMap`] refuses
//! input with more than `N` pairs.

use crate::compare::Compare;
use crate::flat_map::FlatMap;
use crate::multimap::SortedMultimap;
use crate::static_map::StaticFlatMap;
use serde::de::{self, Deserialize, Deserializer, SeqAccess, Visitor};
use serde::ser::{Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;

impl<K, V, const N: usize, C> Serialize for StaticFlatMap<K, V, N, C>
where
    K: Copy + Serialize,
    V: Copy + Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<K, V, C> Serialize for FlatMap<K, V, C>
where
    K: Copy + Serialize,
    V: Copy + Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

/// Marker for the map and entry types a [`PairsVisitor`] produces
type Produces<M, K, V> = PhantomData<fn() -> (M, K, V)>;

/// Visitor that inserts a sequence of pairs into an empty map of type `M`
struct PairsVisitor<M, K, V>(Produces<M, K, V>);

impl<'de, M, K, V> Visitor<'de> for PairsVisitor<M, K, V>
where
    M: SortedMultimap<K, V> + Default,
    K: Deserialize<'de>,
    V: Deserialize<'de>,
{
    type Value = M;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a sequence of key/value pairs")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<M, A::Error> {
        let mut map = M::default();
        while let Some(entry) = seq.next_element::<(K, V)>()? {
            map.insert(entry).map_err(de::Error::custom)?;
        }
        Ok(map)
    }
}

impl<'de, K, V, const N: usize, C> Deserialize<'de> for StaticFlatMap<K, V, N, C>
where
    K: Copy + Deserialize<'de>,
    V: Copy + Deserialize<'de>,
    C: Compare<K> + Default,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(PairsVisitor(PhantomData))
    }
}

impl<'de, K, V, C> Deserialize<'de> for FlatMap<K, V, C>
where
    K: Copy + Deserialize<'de>,
    V: Copy + Deserialize<'de>,
    C: Compare<K> + Default,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(PairsVisitor(PhantomData))
    }
}
