//! Fixed-capacity slot storage
//!
//! A [`StaticFlatMap`](crate::StaticFlatMap) keeps its entries in a block of
//! `N` slots that is sized at compile time and never reallocated. Only a
//! prefix of that block holds live entries; everything after it is treated
//! as uninitialized memory and is never read.
//!
//! The block itself is a [`SlotMemory`], an array of [`MaybeUninit`]. It is
//! paired with a live count in [`SlotArray`], which is the only type allowed
//! to hand out references into the memory. The count starts at zero and is
//! only incremented after the slot it covers has been written, so every slot
//! in `0 .. len` is always initialized.
//!
//! Item types are restricted to [`Copy`]. Copy types can be relocated with a
//! plain memory copy and have no destructor, which is what lets insertion and
//! removal shift entries with [`std::ptr::copy`] and lets [`SlotArray::clear`]
//! forget entries without visiting them.

use std::mem::MaybeUninit;
use std::ops::Range;
use std::ptr;

/// Backing memory for `N` items of type `T`
///
/// Always assumed uninitialized unless paired with a live count in a
/// [`SlotArray`].
#[derive(Copy, Clone)]
struct SlotMemory<T: Copy, const N: usize>([MaybeUninit<T>; N]);

impl<T: Copy, const N: usize> SlotMemory<T, N> {
    /// Fresh memory, with every slot uninitialized.
    #[inline(always)]
    const fn uninit() -> Self {
        Self([MaybeUninit::uninit(); N])
    }

    /// Pointer to the first slot.
    #[inline(always)]
    fn as_ptr(&self) -> *const T {
        self.0.as_ptr().cast::<T>()
    }

    /// Mutable pointer to the first slot.
    #[inline(always)]
    fn as_mut_ptr(&mut self) -> *mut T {
        self.0.as_mut_ptr().cast::<T>()
    }
}

/// A [`SlotMemory`] paired with the number of initialized leading slots
///
/// Copying a `SlotArray` copies the whole block bitwise, including slots past
/// the live count. Those stay uninitialized in the copy as well.
#[derive(Copy, Clone)]
pub(crate) struct SlotArray<T: Copy, const N: usize> {
    /// Slot storage, initialized in `0 .. len`
    mem: SlotMemory<T, N>,
    /// Number of initialized slots at the start of `mem`
    len: usize,
}

impl<T: Copy, const N: usize> SlotArray<T, N> {
    /// An empty array. No slot is initialized.
    #[inline(always)]
    pub(crate) const fn new() -> Self {
        Self {
            mem: SlotMemory::uninit(),
            len: 0,
        }
    }

    /// Number of live items.
    #[inline(always)]
    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    /// Live items, in slot order.
    #[inline(always)]
    pub(crate) fn as_slice(&self) -> &[T] {
        // SAFETY: Slots `0 .. len` are initialized, and the memory stays
        //         borrowed for the lifetime of the returned slice.
        unsafe { std::slice::from_raw_parts(self.mem.as_ptr(), self.len) }
    }

    /// Live items, in slot order, mutably.
    #[inline(always)]
    pub(crate) fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: Slots `0 .. len` are initialized, and the memory stays
        //         mutably borrowed for the lifetime of the returned slice.
        unsafe { std::slice::from_raw_parts_mut(self.mem.as_mut_ptr(), self.len) }
    }

    /// Insert an item at `index`, shifting every later item up one slot.
    ///
    /// If every slot is in use, returns `Err(())` and makes no changes.
    /// Panics if `index > len`.
    #[inline]
    pub(crate) fn insert(&mut self, index: usize, item: T) -> Result<(), ()> {
        let len = self.len;
        assert!(index <= len, "slot index {index} past live count {len}");
        if len == N {
            return Err(());
        }
        let base = self.mem.as_mut_ptr();
        // SAFETY: `len < N`, so both the source range `index .. len` and the
        //         destination `index + 1 .. len + 1` lie inside the memory.
        //         `ptr::copy` handles the overlap. Slot `index` is written
        //         before the count grows to cover the new last slot.
        unsafe {
            ptr::copy(base.add(index), base.add(index + 1), len - index);
            base.add(index).write(item);
        }
        self.len = len + 1;
        Ok(())
    }

    /// Remove the items in `range`, shifting every later item down.
    ///
    /// Panics unless `range.start <= range.end <= len`.
    #[inline]
    pub(crate) fn remove_range(&mut self, range: Range<usize>) {
        let len = self.len;
        let Range { start, end } = range;
        assert!(
            start <= end && end <= len,
            "slot range {start}..{end} outside live count {len}"
        );
        let base = self.mem.as_mut_ptr();
        // SAFETY: Both `end .. len` and `start .. start + (len - end)` are
        //         within the initialized prefix. Items are `Copy`, so the
        //         overwritten ones need no drop, and the tail past the new
        //         count is simply forgotten.
        unsafe {
            ptr::copy(base.add(end), base.add(start), len - end);
        }
        self.len = len - (end - start);
    }

    /// Forget all items. Slot contents are left as they are.
    #[inline(always)]
    pub(crate) fn clear(&mut self) {
        self.len = 0;
    }
}

#[cfg(test)]
mod test {
    use super::SlotArray;

    #[test]
    fn insert_shifts_right() {
        let mut slots = SlotArray::<u16, 4>::new();
        assert_eq!(slots.insert(0, 30), Ok(()));
        assert_eq!(slots.insert(0, 10), Ok(()));
        assert_eq!(slots.insert(1, 20), Ok(()));
        assert_eq!(slots.insert(3, 40), Ok(()));
        assert_eq!(slots.as_slice(), &[10, 20, 30, 40]);
        assert_eq!(slots.insert(2, 99), Err(()));
        assert_eq!(slots.as_slice(), &[10, 20, 30, 40]);
    }

    #[test]
    fn remove_shifts_left() {
        let mut slots = SlotArray::<u16, 5>::new();
        for (i, v) in [1, 2, 3, 4, 5].into_iter().enumerate() {
            slots.insert(i, v).unwrap();
        }
        slots.remove_range(1..3);
        assert_eq!(slots.as_slice(), &[1, 4, 5]);
        slots.remove_range(2..3);
        assert_eq!(slots.as_slice(), &[1, 4]);
        slots.remove_range(0..0);
        assert_eq!(slots.len(), 2);
        slots.clear();
        assert!(slots.as_slice().is_empty());
    }

    #[test]
    fn copies_are_independent() {
        let mut a = SlotArray::<(u8, u8), 3>::new();
        a.insert(0, (1, 1)).unwrap();
        let mut b = a;
        b.as_mut_slice()[0].1 = 9;
        b.insert(1, (2, 2)).unwrap();
        assert_eq!(a.as_slice(), &[(1, 1)]);
        assert_eq!(b.as_slice(), &[(1, 9), (2, 2)]);
    }

    #[test]
    fn zero_capacity() {
        let mut slots = SlotArray::<u64, 0>::new();
        assert_eq!(slots.insert(0, 1), Err(()));
        assert!(slots.as_slice().is_empty());
    }

    #[test]
    #[should_panic]
    fn insert_past_end_panics() {
        let mut slots = SlotArray::<u8, 4>::new();
        let _ = slots.insert(1, 0);
    }
}
