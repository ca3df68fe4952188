//! Key ordering
//!
//! Maps take their ordering as a stored [`Compare`] value rather than relying
//! on [`Ord`] directly, so a map can be sorted descending or by an arbitrary
//! closure. The provided [`Natural`] and [`Reverse`] orderings are zero-sized
//! and add nothing to the size of a map.

use std::cmp::Ordering;

/// A strict weak ordering over keys
///
/// Implementations must be irreflexive (`less(a, a)` is false) and
/// transitive, and equivalence (neither key less than the other) must be
/// transitive as well. Maps only ever call [`Compare::less`]; two keys are
/// treated as equal when [`Compare::equivalent`] holds.
pub trait Compare<K: ?Sized> {
    /// Returns true if `a` sorts strictly before `b`.
    fn less(&self, a: &K, b: &K) -> bool;

    /// Returns true if neither key sorts before the other.
    #[inline(always)]
    fn equivalent(&self, a: &K, b: &K) -> bool {
        !self.less(a, b) && !self.less(b, a)
    }
}

/// Ascending order according to [`Ord`]
///
/// This is the default ordering for every map in this crate.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Natural;

impl<K: Ord + ?Sized> Compare<K> for Natural {
    #[inline(always)]
    fn less(&self, a: &K, b: &K) -> bool {
        a.cmp(b) == Ordering::Less
    }
}

/// Descending order according to [`Ord`]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Reverse;

impl<K: Ord + ?Sized> Compare<K> for Reverse {
    #[inline(always)]
    fn less(&self, a: &K, b: &K) -> bool {
        b.cmp(a) == Ordering::Less
    }
}

/// Ordering defined by a "less than" closure
///
/// ```
/// use flatmap::{CompareFn, StaticFlatMap};
///
/// // Order by absolute value
/// let by_abs = CompareFn(|a: &i32, b: &i32| a.abs() < b.abs());
/// let mut map = StaticFlatMap::<i32, char, 4, _>::with_compare(by_abs);
/// map.insert((-3, 'a')).unwrap();
/// map.insert((2, 'b')).unwrap();
/// assert_eq!(map.keys().copied().collect::<Vec<_>>(), [2, -3]);
/// ```
#[derive(Copy, Clone, Default)]
pub struct CompareFn<F>(pub F);

impl<K: ?Sized, F: Fn(&K, &K) -> bool> Compare<K> for CompareFn<F> {
    #[inline(always)]
    fn less(&self, a: &K, b: &K) -> bool {
        (self.0)(a, b)
    }
}

impl<F> std::fmt::Debug for CompareFn<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("CompareFn").finish()
    }
}
