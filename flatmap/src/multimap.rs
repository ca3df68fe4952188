//! Common interface for both map backings
//!
//! [`SortedMultimap`] covers the operations shared by
//! [`StaticFlatMap`](crate::StaticFlatMap) and [`FlatMap`](crate::FlatMap), so
//! generic code can pick a backing with a type parameter. Each method forwards
//! to the inherent method of the same name; see those for details.

use crate::compare::Compare;
use crate::err::Error;
use crate::flat_map::FlatMap;
use crate::static_map::StaticFlatMap;

/// A multimap kept as a sorted array of key/value pairs
pub trait SortedMultimap<K, V> {
    /// Insert an entry after any equivalent keys, returning its position.
    fn insert(&mut self, entry: (K, V)) -> Result<usize, Error>;

    /// Position of the first entry matching `key`, or [`Self::end`].
    fn find(&self, key: &K) -> usize;

    /// Remove the entry at `position`, returning the position now holding
    /// its successor.
    fn erase_at(&mut self, position: usize) -> Result<usize, Error>;

    /// Remove the first entry matching `key`. Fails if none does.
    fn erase(&mut self, key: &K) -> Result<usize, Error>;

    /// The value for `key`, inserting a default one if it's absent.
    fn get_or_insert_default(&mut self, key: K) -> Result<&mut V, Error>
    where
        V: Default;

    /// The value of the first entry matching `key`, which must exist.
    fn at(&self, key: &K) -> Result<&V, Error>;

    /// All entries in sorted order.
    fn as_slice(&self) -> &[(K, V)];

    /// Number of entries the map can hold without failing or growing.
    fn capacity(&self) -> usize;

    /// Remove every entry.
    fn clear(&mut self);

    /// Number of entries.
    #[inline(always)]
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// True if the map holds no entries.
    #[inline(always)]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The position one past the last entry.
    #[inline(always)]
    fn end(&self) -> usize {
        self.len()
    }
}

impl<K: Copy, V: Copy, const N: usize, C: Compare<K>> SortedMultimap<K, V>
    for StaticFlatMap<K, V, N, C>
{
    fn insert(&mut self, entry: (K, V)) -> Result<usize, Error> {
        StaticFlatMap::insert(self, entry)
    }

    fn find(&self, key: &K) -> usize {
        StaticFlatMap::find(self, key)
    }

    fn erase_at(&mut self, position: usize) -> Result<usize, Error> {
        StaticFlatMap::erase_at(self, position)
    }

    fn erase(&mut self, key: &K) -> Result<usize, Error> {
        StaticFlatMap::erase(self, key)
    }

    fn get_or_insert_default(&mut self, key: K) -> Result<&mut V, Error>
    where
        V: Default,
    {
        StaticFlatMap::get_or_insert_default(self, key)
    }

    fn at(&self, key: &K) -> Result<&V, Error> {
        StaticFlatMap::at(self, key)
    }

    fn as_slice(&self) -> &[(K, V)] {
        StaticFlatMap::as_slice(self)
    }

    fn capacity(&self) -> usize {
        N
    }

    fn clear(&mut self) {
        StaticFlatMap::clear(self);
    }
}

impl<K: Copy, V: Copy, C: Compare<K>> SortedMultimap<K, V> for FlatMap<K, V, C> {
    fn insert(&mut self, entry: (K, V)) -> Result<usize, Error> {
        FlatMap::insert(self, entry)
    }

    fn find(&self, key: &K) -> usize {
        FlatMap::find(self, key)
    }

    fn erase_at(&mut self, position: usize) -> Result<usize, Error> {
        FlatMap::erase_at(self, position)
    }

    fn erase(&mut self, key: &K) -> Result<usize, Error> {
        FlatMap::erase(self, key)
    }

    fn get_or_insert_default(&mut self, key: K) -> Result<&mut V, Error>
    where
        V: Default,
    {
        FlatMap::get_or_insert_default(self, key)
    }

    fn at(&self, key: &K) -> Result<&V, Error> {
        FlatMap::at(self, key)
    }

    fn as_slice(&self) -> &[(K, V)] {
        FlatMap::as_slice(self)
    }

    fn capacity(&self) -> usize {
        FlatMap::capacity(self)
    }

    fn clear(&mut self) {
        FlatMap::clear(self);
    }
}
