//! The growable sorted-array multimap
//!
//! [`FlatMap`] has the same contract as [`StaticFlatMap`](crate::StaticFlatMap)
//! but keeps its entries in a heap allocation that grows on demand. Callers
//! can move between the two without changing call sites, either directly or
//! through the [`SortedMultimap`](crate::SortedMultimap) trait.

use crate::compare::{Compare, Natural};
use crate::err::Error;
use crate::search;
use std::fmt;
use std::ops::Range;

/// A multimap stored as a growable sorted array
///
/// Entries are kept sorted by key under the comparator `C`, duplicates are
/// placed after existing equivalent keys, and lookups return the first match.
/// See [`StaticFlatMap`](crate::StaticFlatMap) for the full contract.
///
/// Unlike the fixed-capacity map, inserting only fails when a maximum length
/// was configured through [`FlatMapBuilder::max_len`] and has been reached,
/// or when the allocator cannot grow the buffer.
///
/// ```
/// use flatmap::FlatMap;
///
/// let mut map = FlatMap::new();
/// for key in [30u16, 10, 20, 10] {
///     map.insert((key, key * 2)).unwrap();
/// }
/// assert_eq!(map.count(&10), 2);
/// assert_eq!(map.erase_all(&10), 2);
/// assert_eq!(map.keys().copied().collect::<Vec<_>>(), [20, 30]);
/// ```
#[derive(Clone)]
pub struct FlatMap<K: Copy, V: Copy, C = Natural> {
    /// Entries sorted by key
    entries: Vec<(K, V)>,
    /// Optional limit on the number of entries
    max_len: Option<usize>,
    /// Key ordering, fixed at construction
    compare: C,
}

impl<K: Copy, V: Copy> FlatMap<K, V, Natural> {
    /// Create an empty, unbounded map ordered by [`Ord`].
    ///
    /// Does not allocate until the first insert.
    pub const fn new() -> Self {
        Self::with_compare(Natural)
    }
}

impl<K: Copy, V: Copy, C> FlatMap<K, V, C> {
    /// Create an empty, unbounded map ordered by `compare`.
    pub const fn with_compare(compare: C) -> Self {
        Self {
            entries: Vec::new(),
            max_len: None,
            compare,
        }
    }

    /// Wrap entries that are already sorted under `compare`.
    pub(crate) fn from_sorted_parts(entries: Vec<(K, V)>, compare: C) -> Self {
        Self {
            entries,
            max_len: None,
            compare,
        }
    }

    /// The comparator this map is ordered by.
    pub fn compare(&self) -> &C {
        &self.compare
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the map holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries the current allocation can hold without growing.
    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    /// The configured limit on the number of entries, if any.
    pub fn max_len(&self) -> Option<usize> {
        self.max_len
    }

    /// Reserve space for at least `additional` more entries.
    ///
    /// Fails with [`Error::CapacityExceeded`] if the allocation fails.
    pub fn reserve(&mut self, additional: usize) -> Result<(), Error> {
        self.entries
            .try_reserve(additional)
            .map_err(|_| Error::CapacityExceeded {
                capacity: self.entries.capacity(),
            })
    }

    /// Release unused capacity.
    pub fn shrink_to_fit(&mut self) {
        self.entries.shrink_to_fit();
    }

    /// The end position, one past the last entry.
    pub fn end(&self) -> usize {
        self.len()
    }

    /// Remove every entry, keeping the allocation.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// All entries, sorted by key.
    pub fn as_slice(&self) -> &[(K, V)] {
        &self.entries
    }

    /// Iterate over entries in sorted order.
    pub fn iter(&self) -> std::slice::Iter<'_, (K, V)> {
        self.entries.iter()
    }

    /// Iterate over entries in sorted order, with mutable access to values.
    pub fn iter_mut(&mut self) -> impl DoubleEndedIterator<Item = (&K, &mut V)> + ExactSizeIterator {
        self.entries.iter_mut().map(|(k, v)| (&*k, v))
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
        self.entries.get(position)
    }

    /// The value at `position`, mutably, or `None` at or past the end.
    pub fn value_at_mut(&mut self, position: usize) -> Option<&mut V> {
        self.entries.get_mut(position).map(|(_, v)| v)
    }

    /// The entry with the smallest key.
    pub fn first(&self) -> Option<&(K, V)> {
        self.entries.first()
    }

    /// The entry with the largest key, latest inserted among duplicates.
    pub fn last(&self) -> Option<&(K, V)> {
        self.entries.last()
    }

    /// Remove the entry at `position`.
    ///
    /// Returns `position`, which now holds the entry that followed the
    /// removed one. Fails with [`Error::InvalidPosition`] if `position` is
    /// not a live entry.
    pub fn erase_at(&mut self, position: usize) -> Result<usize, Error> {
        let len = self.len();
        if position >= len {
            #[cfg(feature = "tracing")]
            tracing::debug!(position, len, "rejecting erase at invalid position");
            return Err(Error::InvalidPosition { position, len });
        }
        self.entries.remove(position);
        Ok(position)
    }

    /// Remove the entries at positions in `range`, returning `range.start`.
    ///
    /// Fails with [`Error::InvalidPosition`] unless
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
        self.entries.drain(range);
        Ok(start)
    }

    /// Write `entry` at `position` without any ordering checks, growing the
    /// allocation if needed.
    fn insert_at(&mut self, position: usize, entry: (K, V)) -> Result<(), Error> {
        if let Some(max_len) = self.max_len {
            if self.entries.len() >= max_len {
                #[cfg(feature = "tracing")]
                tracing::debug!(max_len, "flat map reached its maximum length, rejecting insert");
                return Err(Error::CapacityExceeded { capacity: max_len });
            }
        }
        if self.entries.len() == self.entries.capacity() {
            self.reserve(1)?;
            #[cfg(feature = "tracing")]
            tracing::trace!(capacity = self.entries.capacity(), "flat map grew");
        }
        self.entries.insert(position, entry);
        Ok(())
    }
}

impl<K: Copy, V: Copy, C: Compare<K>> FlatMap<K, V, C> {
    /// Create an unbounded map holding `entries`, inserted in order.
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

    /// Insert an entry after any existing entries with an equivalent key,
    /// returning its position.
    pub fn insert(&mut self, entry: (K, V)) -> Result<usize, Error> {
        let position = self.upper_bound(&entry.0);
        self.insert_at(position, entry)?;
        Ok(position)
    }

    /// Position of the first entry matching `key`, or [`end`](Self::end).
    pub fn find(&self, key: &K) -> usize {
        search::find(&self.entries, key, &self.compare).unwrap_or(self.end())
    }

    /// First position whose key does not sort before `key`.
    pub fn lower_bound(&self, key: &K) -> usize {
        search::lower_bound(&self.entries, key, &self.compare)
    }

    /// First position whose key sorts after `key`.
    pub fn upper_bound(&self, key: &K) -> usize {
        search::upper_bound(&self.entries, key, &self.compare)
    }

    /// Positions of all entries matching `key`, in insertion order.
    pub fn equal_range(&self, key: &K) -> Range<usize> {
        search::equal_range(&self.entries, key, &self.compare)
    }

    /// Number of entries matching `key`.
    pub fn count(&self, key: &K) -> usize {
        self.equal_range(key).len()
    }

    /// True if some entry matches `key`.
    pub fn contains_key(&self, key: &K) -> bool {
        search::find(&self.entries, key, &self.compare).is_some()
    }

    /// The value of the first entry matching `key`.
    pub fn get(&self, key: &K) -> Option<&V> {
        let position = search::find(&self.entries, key, &self.compare)?;
        self.entries.get(position).map(|(_, v)| v)
    }

    /// The value of the first entry matching `key`, mutably.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let position = search::find(&self.entries, key, &self.compare)?;
        self.value_at_mut(position)
    }

    /// The value of the first entry matching `key`, which must exist.
    ///
    /// Fails with [`Error::KeyNotFound`] otherwise.
    pub fn at(&self, key: &K) -> Result<&V, Error> {
        self.get(key).ok_or(Error::KeyNotFound)
    }

    /// Like [`at`](Self::at), but returns the value mutably.
    pub fn at_mut(&mut self, key: &K) -> Result<&mut V, Error> {
        self.get_mut(key).ok_or(Error::KeyNotFound)
    }

    /// The value for `key`, inserting `V::default()` first if no entry
    /// matches. Never adds a second entry for a present key.
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
    /// Fails with [`Error::InvalidPosition`] if no entry matches.
    pub fn erase(&mut self, key: &K) -> Result<usize, Error> {
        self.erase_at(self.find(key))
    }

    /// Remove every entry matching `key`, returning how many were removed.
    pub fn erase_all(&mut self, key: &K) -> usize {
        let range = self.equal_range(key);
        let removed = range.len();
        self.entries.drain(range);
        removed
    }
}

impl<K: Copy, V: Copy, C: Default> Default for FlatMap<K, V, C> {
    fn default() -> Self {
        Self::with_compare(C::default())
    }
}

impl<K: Copy + fmt::Debug, V: Copy + fmt::Debug, C> fmt::Debug for FlatMap<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|(k, v)| (k, v)))
            .finish()
    }
}

impl<K, V, C, D> PartialEq<FlatMap<K, V, D>> for FlatMap<K, V, C>
where
    K: Copy + PartialEq,
    V: Copy + PartialEq,
{
    fn eq(&self, other: &FlatMap<K, V, D>) -> bool {
        self.entries == other.entries
    }
}

impl<K: Copy + Eq, V: Copy + Eq, C> Eq for FlatMap<K, V, C> {}

impl<'a, K: Copy, V: Copy, C> IntoIterator for &'a FlatMap<K, V, C> {
    type Item = &'a (K, V);
    type IntoIter = std::slice::Iter<'a, (K, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Builder for [`FlatMap`] instances with custom settings
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct FlatMapBuilder {
    /// Number of entries to allocate room for up front
    initial_capacity: usize,
    /// Limit on the number of entries, `None` for unbounded
    max_len: Option<usize>,
}

impl FlatMapBuilder {
    /// Create a new [`FlatMapBuilder`] with default settings.
    ///
    /// Immediately calling [`Self::build()`] would be equivalent to using
    /// [`FlatMap::new()`].
    pub fn new() -> Self {
        Self {
            initial_capacity: 0,
            max_len: None,
        }
    }

    /// Allocate room for `capacity` entries when the map is built.
    ///
    /// Clamped to the maximum length, if one is set.
    pub fn initial_capacity(&mut self, capacity: usize) -> &mut Self {
        self.initial_capacity = capacity;
        self
    }

    /// Limit the number of entries. Inserts beyond it fail with
    /// [`Error::CapacityExceeded`].
    pub fn max_len(&mut self, max_len: Option<usize>) -> &mut Self {
        self.max_len = max_len;
        self
    }

    /// Build an empty map ordered by [`Ord`].
    pub fn build<K: Copy, V: Copy>(&self) -> Result<FlatMap<K, V>, Error> {
        self.build_with_compare(Natural)
    }

    /// Build an empty map ordered by `compare`.
    ///
    /// Fails with [`Error::CapacityExceeded`] if the initial allocation
    /// fails.
    pub fn build_with_compare<K: Copy, V: Copy, C>(&self, compare: C) -> Result<FlatMap<K, V, C>, Error> {
        let mut map = FlatMap::with_compare(compare);
        map.max_len = self.max_len;
        let initial = match self.max_len {
            Some(max_len) => self.initial_capacity.min(max_len),
            None => self.initial_capacity,
        };
        map.reserve(initial)?;
        Ok(map)
    }
}

#[cfg(test)]
mod test {
    use super::{FlatMap, FlatMapBuilder};
    use crate::compare::Reverse;
    use crate::err::Error;
    use crate::static_map::StaticFlatMap;

    #[test]
    fn bounded_map_rejects_overflow() {
        let mut map = FlatMapBuilder::new()
            .initial_capacity(8)
            .max_len(Some(2))
            .build::<u32, u32>()
            .unwrap();
        assert!(map.capacity() >= 2);
        assert_eq!(map.max_len(), Some(2));
        map.insert((2, 0)).unwrap();
        map.insert((1, 0)).unwrap();
        assert_eq!(map.insert((3, 0)), Err(Error::CapacityExceeded { capacity: 2 }));
        assert_eq!(
            map.get_or_insert_default(4),
            Err(Error::CapacityExceeded { capacity: 2 })
        );
        assert_eq!(map.keys().copied().collect::<Vec<_>>(), [1, 2]);
    }

    #[test]
    fn unbounded_map_grows() {
        let mut map = FlatMapBuilder::new().build_with_compare(Reverse).unwrap();
        for key in 0u16..500 {
            map.insert((key, ())).unwrap();
        }
        assert_eq!(map.len(), 500);
        assert_eq!(map.first(), Some(&(499, ())));
        assert_eq!(map.last(), Some(&(0, ())));
        map.clear();
        assert!(map.is_empty());
        assert!(map.capacity() >= 500);
    }

    #[test]
    fn conversions_between_backings() {
        let fixed = StaticFlatMap::<u8, char, 4>::try_from_pairs([(3, 'c'), (1, 'a'), (1, 'b')]).unwrap();
        let growable = FlatMap::from(fixed);
        assert_eq!(growable.as_slice(), fixed.as_slice());

        let back = StaticFlatMap::<u8, char, 3>::try_from(&growable).unwrap();
        assert_eq!(back, fixed);
        assert_eq!(
            StaticFlatMap::<u8, char, 2>::try_from(&growable),
            Err(Error::CapacityExceeded { capacity: 2 })
        );
    }

    #[test]
    fn erase_by_key_and_position() {
        let mut map = FlatMap::<i8, i8>::try_from_pairs([(1, 1), (2, 2), (2, 3)]).unwrap();
        assert_eq!(map.erase(&2), Ok(1));
        assert_eq!(map.entry_at(1), Some(&(2, 3)));
        assert_eq!(map.erase(&5), Err(Error::InvalidPosition { position: 2, len: 2 }));
        assert_eq!(map.erase_at(2), Err(Error::InvalidPosition { position: 2, len: 2 }));
        assert_eq!(map.erase_range(0..2), Ok(0));
        assert_eq!(map.erase_at(0), Err(Error::InvalidPosition { position: 0, len: 0 }));
    }
}
