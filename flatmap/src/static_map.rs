//! The fixed-capacity sorted-array multimap

use crate::compare::{Compare, Natural};
use crate::err::Error;
use crate::flat_map::FlatMap;
use crate::search;
use crate::slots::SlotArray;
use std::fmt;
use std::ops::Range;

/// A multimap stored as a sorted array of at most `N` key/value pairs
///
/// Entries live in one contiguous block of `N` slots inside the map value
/// itself, so a `StaticFlatMap` never allocates. Entries are kept sorted by
/// key under the comparator `C`, and every lookup is a binary search.
/// Inserting and erasing shift the entries after the affected position, which
/// is O(n) but cheap for the small sizes this map is meant for.
///
/// Duplicate keys are allowed. A new entry is placed after every existing
/// entry with an equivalent key, and key lookups always return the first of
/// them, so among duplicates the oldest is found first.
///
/// Keys and values must be [`Copy`]. Shifting entries, copying the map and
/// clearing it are plain memory operations with no per-entry work.
///
/// Positions returned by [`insert`](Self::insert), [`find`](Self::find) and
/// the bound methods are indices into the sorted entries. The position one
/// past the last entry, [`end`](Self::end), means "not found".
///
/// ```
/// use flatmap::StaticFlatMap;
///
/// let mut map = StaticFlatMap::<u32, char, 8>::new();
/// map.insert((5, 'a')).unwrap();
/// map.insert((2, 'b')).unwrap();
/// map.insert((5, 'c')).unwrap();
///
/// let pos = map.find(&5);
/// assert_eq!(map.entry_at(pos), Some(&(5, 'a')));
/// assert_eq!(map.find(&7), map.end());
/// assert_eq!(map.as_slice(), &[(2, 'b'), (5, 'a'), (5, 'c')]);
/// ```
#[derive(Copy, Clone)]
pub struct StaticFlatMap<K: Copy, V: Copy, const N: usize, C = Natural> {
    /// Entries sorted by key, live in `0 .. len`
    slots: SlotArray<(K, V), N>,
    /// Key ordering, fixed at construction
    compare: C,
}

impl<K: Copy, V: Copy, const N: usize> StaticFlatMap<K, V, N, Natural> {
    /// Create an empty map ordered by [`Ord`].
    pub const fn new() -> Self {
        Self::with_compare(Natural)
    }
}

impl<K: Copy, V: Copy, const N: usize, C> StaticFlatMap<K, V, N, C> {
    /// Maximum number of entries, fixed by the type.
    pub const CAPACITY: usize = N;

    /// Create an empty map ordered by `compare`.
    pub const fn with_compare(compare: C) -> Self {
        Self {
            slots: SlotArray::new(),
            compare,
        }
    }

    /// The comparator this map is ordered by.
    pub fn compare(&self) -> &C {
        &self.compare
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True if the map holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True if another insert would fail.
    pub fn is_full(&self) -> bool {
        self.len() == N
    }

    /// Maximum number of entries, always `N`.
    pub const fn capacity(&self) -> usize {
        N
    }

    /// The end position, one past the last entry.
    ///
    /// Lookups return this when no entry matches.
    pub fn end(&self) -> usize {
        self.len()
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.slots.clear();
    }

    /// All entries, sorted by key.
    pub fn as_slice(&self) -> &[(K, V)] {
        self.slots.as_slice()
    }

    /// Iterate over entries in sorted order.
    ///
    /// The iterator is double-ended; use `.rev()` to walk the map backwards.
    pub fn iter(&self) -> std::slice::Iter<'_, (K, V)> {
        self.as_slice().iter()
    }

    /// Iterate over entries in sorted order, with mutable access to values.
    pub fn iter_mut(&mut self) -> impl DoubleEndedIterator<Item = (&K, &mut V)> + ExactSizeIterator {
        self.slots.as_mut_slice().iter_mut().map(|(k, v)| (&*k, v))
    }

    /// Iterate over keys in sorted order.
    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &K> + ExactSizeIterator {
        self.iter().map(|(k, _)| k)
    }

    /// Iterate over values in key order.
    pub fn values(&self) -> impl DoubleEndedIterator<Item = &V> + ExactSizeIterator {
        self.iter().map(|(_, v)| v)
    }

    /// The entry at `position`, or `None` at or past the end.
    pub fn entry_at(&self, position: usize) -> Option<&(K, V)> {
        self.as_slice().get(position)
    }

    /// The value at `position`, mutably, or `None` at or past the end.
    pub fn value_at_mut(&mut self, position: usize) -> Option<&mut V> {
        self.slots.as_mut_slice().get_mut(position).map(|(_, v)| v)
    }

    /// The entry with the smallest key.
    pub fn first(&self) -> Option<&(K, V)> {
        self.as_slice().first()
    }

    /// The entry with the largest key, latest inserted among duplicates.
    pub fn last(&self) -> Option<&(K, V)> {
        self.as_slice().last()
    }

    /// Remove the entry at `position`.
    ///
    /// Later entries move down one slot, so the returned position (equal to
    /// `position`) now holds the entry that followed the removed one, or is
    /// the end position. Erasing in a loop can keep using it.
    ///
    /// Fails with [`Error::InvalidPosition`] if `position` is not a live
    /// entry, which includes the end position and any position in an empty
    /// map.
    pub fn erase_at(&mut self, position: usize) -> Result<usize, Error> {
        let len = self.len();
        if position >= len {
            #[cfg(feature = "tracing")]
            tracing::debug!(position, len, "rejecting erase at invalid position");
            return Err(Error::InvalidPosition { position, len });
        }
        self.slots.remove_range(position..position + 1);
        Ok(position)
    }

    /// Remove the entries at positions in `range`.
    ///
    /// Returns `range.start`, which now holds the entry that followed the
    /// range. Fails with [`Error::InvalidPosition`] unless
    /// `range.start <= range.end <= len()`.
    pub fn erase_range(&mut self, range: Range<usize>) -> Result<usize, Error> {
        let len = self.len();
        if range.start > range.end || range.end > len {
            #[cfg(feature = "tracing")]
            tracing::debug!(?range, len, "rejecting erase of invalid range");
            return Err(Error::InvalidPosition {
                position: range.end.max(range.start),
                len,
            });
        }
        let start = range.start;
        self.slots.remove_range(range);
        Ok(start)
    }

    /// Write `entry` at `position` without any ordering checks.
    fn insert_at(&mut self, position: usize, entry: (K, V)) -> Result<(), Error> {
        self.slots.insert(position, entry).map_err(|()| {
            #[cfg(feature = "tracing")]
            tracing::debug!(capacity = N, "static flat map is full, rejecting insert");
            Error::CapacityExceeded { capacity: N }
        })
    }
}

impl<K: Copy, V: Copy, const N: usize, C: Compare<K>> StaticFlatMap<K, V, N, C> {
    /// Create a map holding `entries`, inserted one at a time in order.
    ///
    /// Fails with [`Error::CapacityExceeded`] if there are more than `N`.
    pub fn try_from_pairs<I>(entries: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (K, V)>,
        C: Default,
    {
        let mut map = Self::with_compare(C::default());
        map.try_extend(entries)?;
        Ok(map)
    }

    /// Insert every entry from `entries`, in order.
    ///
    /// Stops at the first entry that does not fit. Entries inserted before
    /// the failure stay in the map.
    pub fn try_extend<I>(&mut self, entries: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        for entry in entries {
            self.insert(entry)?;
        }
        Ok(())
    }

    /// Insert an entry, keeping the map sorted.
    ///
    /// The entry goes after any existing entries with an equivalent key.
    /// Returns the position it was written to.
    ///
    /// Fails with [`Error::CapacityExceeded`] if the map already holds `N`
    /// entries, in which case nothing changes.
    pub fn insert(&mut self, entry: (K, V)) -> Result<usize, Error> {
        let position = self.upper_bound(&entry.0);
        self.insert_at(position, entry)?;
        Ok(position)
    }

    /// Position of the first entry with a key equivalent to `key`, or
    /// [`end`](Self::end) if there is none.
    pub fn find(&self, key: &K) -> usize {
        search::find(self.as_slice(), key, &self.compare).unwrap_or(self.end())
    }

    /// First position whose key does not sort before `key`.
    pub fn lower_bound(&self, key: &K) -> usize {
        search::lower_bound(self.as_slice(), key, &self.compare)
    }

    /// First position whose key sorts after `key`.
    pub fn upper_bound(&self, key: &K) -> usize {
        search::upper_bound(self.as_slice(), key, &self.compare)
    }

    /// Positions of all entries with a key equivalent to `key`, in
    /// insertion order.
    pub fn equal_range(&self, key: &K) -> Range<usize> {
        search::equal_range(self.as_slice(), key, &self.compare)
    }

    /// Number of entries with a key equivalent to `key`.
    pub fn count(&self, key: &K) -> usize {
        self.equal_range(key).len()
    }

    /// True if some entry has a key equivalent to `key`.
    pub fn contains_key(&self, key: &K) -> bool {
        search::find(self.as_slice(), key, &self.compare).is_some()
    }

    /// The value of the first entry matching `key`.
    pub fn get(&self, key: &K) -> Option<&V> {
        let position = search::find(self.as_slice(), key, &self.compare)?;
        self.as_slice().get(position).map(|(_, v)| v)
    }

    /// The value of the first entry matching `key`, mutably.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let position = search::find(self.as_slice(), key, &self.compare)?;
        self.value_at_mut(position)
    }

    /// The value of the first entry matching `key`, which must exist.
    ///
    /// Fails with [`Error::KeyNotFound`] otherwise. Never inserts.
    pub fn at(&self, key: &K) -> Result<&V, Error> {
        self.get(key).ok_or_else(key_not_found)
    }

    /// Like [`at`](Self::at), but returns the value mutably.
    pub fn at_mut(&mut self, key: &K) -> Result<&mut V, Error> {
        self.get_mut(key).ok_or_else(key_not_found)
    }

    /// The value for `key`, inserting `V::default()` first if no entry
    /// matches.
    ///
    /// This is the indexed-assignment form of insertion: it never adds a
    /// second entry for a key that is already present. Fails with
    /// [`Error::CapacityExceeded`] when a new entry is needed and the map is
    /// full.
    pub fn get_or_insert_default(&mut self, key: K) -> Result<&mut V, Error>
    where
        V: Default,
    {
        let range = self.equal_range(&key);
        if range.is_empty() {
            self.insert_at(range.start, (key, V::default()))?;
        }
        let len = self.len();
        self.value_at_mut(range.start).ok_or(Error::InvalidPosition {
            position: range.start,
            len,
        })
    }

    /// Remove the first entry matching `key`.
    ///
    /// Returns the position that now holds the entry that followed it.
    /// Fails with [`Error::InvalidPosition`] if no entry matches, like
    /// erasing at the end position. Use [`erase_all`](Self::erase_all) to
    /// get a removal count instead.
    pub fn erase(&mut self, key: &K) -> Result<usize, Error> {
        self.erase_at(self.find(key))
    }

    /// Remove every entry matching `key`, returning how many were removed.
    pub fn erase_all(&mut self, key: &K) -> usize {
        let range = self.equal_range(key);
        let removed = range.len();
        self.slots.remove_range(range);
        removed
    }
}

/// Error for a lookup that must succeed.
fn key_not_found() -> Error {
    #[cfg(feature = "tracing")]
    tracing::debug!("required key is not in the map");
    Error::KeyNotFound
}

impl<K: Copy, V: Copy, const N: usize, C: Default> Default for StaticFlatMap<K, V, N, C> {
    fn default() -> Self {
        Self::with_compare(C::default())
    }
}

impl<K, V, const N: usize, C> fmt::Debug for StaticFlatMap<K, V, N, C>
where
    K: Copy + fmt::Debug,
    V: Copy + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|(k, v)| (k, v)))
            .finish()
    }
}

/// Maps are equal when they hold the same entries in the same order.
impl<K, V, const N: usize, const M: usize, C, D> PartialEq<StaticFlatMap<K, V, M, D>>
    for StaticFlatMap<K, V, N, C>
where
    K: Copy + PartialEq,
    V: Copy + PartialEq,
{
    fn eq(&self, other: &StaticFlatMap<K, V, M, D>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<K: Copy + Eq, V: Copy + Eq, const N: usize, C> Eq for StaticFlatMap<K, V, N, C> {}

impl<'a, K: Copy, V: Copy, const N: usize, C> IntoIterator for &'a StaticFlatMap<K, V, N, C> {
    type Item = &'a (K, V);
    type IntoIter = std::slice::Iter<'a, (K, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Copy, V: Copy, const N: usize, C> From<StaticFlatMap<K, V, N, C>> for FlatMap<K, V, C> {
    fn from(map: StaticFlatMap<K, V, N, C>) -> Self {
        FlatMap::from_sorted_parts(map.as_slice().to_vec(), map.compare)
    }
}

/// Copy a [`FlatMap`] into fixed storage.
///
/// Fails with [`Error::CapacityExceeded`] if it holds more than `N` entries.
impl<K: Copy, V: Copy, const N: usize, C: Clone> TryFrom<&FlatMap<K, V, C>>
    for StaticFlatMap<K, V, N, C>
{
    type Error = Error;

    fn try_from(map: &FlatMap<K, V, C>) -> Result<Self, Error> {
        if map.len() > N {
            return Err(Error::CapacityExceeded { capacity: N });
        }
        let mut result = Self::with_compare(map.compare().clone());
        for (position, entry) in map.iter().enumerate() {
            result.insert_at(position, *entry)?;
        }
        Ok(result)
    }
}
