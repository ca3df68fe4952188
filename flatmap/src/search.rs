//! Binary search over a sorted run of key/value pairs
//!
//! Both map types keep their live entries in one contiguous slice sorted by
//! key. All lookups reduce to the two bounds defined here, computed with
//! [`slice::partition_point`] so each is a single O(log n) binary search.
//!
//! Only keys take part in comparisons. Values are opaque.

use crate::compare::Compare;
use std::ops::Range;

/// First position whose key does not sort before `key`.
///
/// This is where a lookup for `key` begins; if any entry is equivalent to
/// `key`, the first of them is at this position.
#[cfg_attr(feature = "bound-search", visibility::make(pub))]
#[inline]
pub(crate) fn lower_bound<K, V, C: Compare<K>>(entries: &[(K, V)], key: &K, compare: &C) -> usize {
    entries.partition_point(|(k, _)| compare.less(k, key))
}

/// First position whose key sorts after `key`.
///
/// New entries are inserted here, which puts them after every existing
/// entry with an equivalent key.
#[cfg_attr(feature = "bound-search", visibility::make(pub))]
#[inline]
pub(crate) fn upper_bound<K, V, C: Compare<K>>(entries: &[(K, V)], key: &K, compare: &C) -> usize {
    entries.partition_point(|(k, _)| !compare.less(key, k))
}

/// Range of positions holding keys equivalent to `key`.
///
/// The range is empty, starting at the insertion point, when no entry
/// matches.
#[cfg_attr(feature = "bound-search", visibility::make(pub))]
#[inline]
pub(crate) fn equal_range<K, V, C: Compare<K>>(
    entries: &[(K, V)],
    key: &K,
    compare: &C,
) -> Range<usize> {
    let start = lower_bound(entries, key, compare);
    let end = start + upper_bound(&entries[start..], key, compare);
    start..end
}

/// Position of the first entry equivalent to `key`, if there is one.
#[cfg_attr(feature = "bound-search", visibility::make(pub))]
#[inline]
pub(crate) fn find<K, V, C: Compare<K>>(entries: &[(K, V)], key: &K, compare: &C) -> Option<usize> {
    let pos = lower_bound(entries, key, compare);
    match entries.get(pos) {
        Some((k, _)) if !compare.less(key, k) => Some(pos),
        _ => None,
    }
}

#[cfg(test)]
mod test {
    use super::{equal_range, find, lower_bound, upper_bound};
    use crate::compare::{Natural, Reverse};

    const ENTRIES: [(u8, char); 6] = [
        (1, 'a'),
        (3, 'b'),
        (3, 'c'),
        (3, 'd'),
        (7, 'e'),
        (9, 'f'),
    ];

    #[test]
    fn bounds_around_duplicates() {
        assert_eq!(lower_bound(&ENTRIES, &3, &Natural), 1);
        assert_eq!(upper_bound(&ENTRIES, &3, &Natural), 4);
        assert_eq!(equal_range(&ENTRIES, &3, &Natural), 1..4);
        assert_eq!(find(&ENTRIES, &3, &Natural), Some(1));
    }

    #[test]
    fn bounds_for_missing_keys() {
        assert_eq!(equal_range(&ENTRIES, &0, &Natural), 0..0);
        assert_eq!(equal_range(&ENTRIES, &5, &Natural), 4..4);
        assert_eq!(equal_range(&ENTRIES, &10, &Natural), 6..6);
        assert_eq!(find(&ENTRIES, &5, &Natural), None);
        assert_eq!(find(&ENTRIES, &10, &Natural), None);
        assert_eq!(find::<u8, char, _>(&[], &1, &Natural), None);
    }

    #[test]
    fn bounds_with_reversed_order() {
        let mut entries = ENTRIES;
        entries.reverse();
        assert_eq!(lower_bound(&entries, &3, &Reverse), 2);
        assert_eq!(upper_bound(&entries, &3, &Reverse), 5);
        assert_eq!(find(&entries, &9, &Reverse), Some(0));
    }
}
