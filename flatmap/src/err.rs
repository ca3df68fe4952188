//! Error types for the `flatmap` crate

/// Errors returned by sorted-array map operations
///
/// Every operation is all-or-nothing: when one of these is returned, the map
/// is left exactly as it was before the call.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The map has no free slot for another entry.
    ///
    /// For a [`crate::StaticFlatMap`] this happens once `len() == N`. A
    /// [`crate::FlatMap`] only reports it when its configured maximum
    /// length is reached or the allocator refuses to grow the buffer.
    #[error("map is full, capacity of {capacity} entries exceeded")]
    CapacityExceeded {
        /// Maximum number of entries the map could hold
        capacity: usize,
    },

    /// A key that must be present was not found.
    ///
    /// Returned by `at()` and `at_mut()`. Prefer `find()` or `get()`
    /// when absence is an expected outcome.
    #[error("could not find key in map")]
    KeyNotFound,

    /// A position did not refer to a live entry.
    ///
    /// Positional erase requires `position < len`; erasing the end
    /// position, or anything from an empty map, fails with this error.
    /// Erasing by key reports it too when the key is absent.
    #[error("position {position} is out of range for a map of {len} entries")]
    InvalidPosition {
        /// The rejected position
        position: usize,
        /// Number of live entries at the time of the call
        len: usize,
    },
}
