#![cfg_attr(docsrs, feature(doc_auto_cfg, doc_cfg))]
#![doc = include_str!("../README.md")]
// @@ begin lint list @@
#![allow(renamed_and_removed_lints)]
#![allow(unknown_lints)]
#![warn(missing_docs)]
#![warn(noop_method_call)]
#![warn(unreachable_pub)]
#![warn(clippy::all)]
#![deny(clippy::cast_lossless)]
#![deny(clippy::checked_conversions)]
#![warn(clippy::cognitive_complexity)]
#![deny(clippy::debug_assert_with_mut_call)]
#![deny(clippy::expl_impl_clone_on_copy)]
#![deny(clippy::fallible_impl_from)]
#![deny(clippy::implicit_clone)]
#![deny(clippy::large_stack_arrays)]
#![warn(clippy::manual_ok_or)]
#![deny(clippy::missing_docs_in_private_items)]
#![warn(clippy::needless_borrow)]
#![warn(clippy::needless_pass_by_value)]
#![warn(clippy::option_option)]
#![deny(clippy::print_stderr)]
#![deny(clippy::print_stdout)]
#![warn(clippy::semicolon_if_nothing_returned)]
#![warn(clippy::trait_duplication_in_bounds)]
#![deny(clippy::unnecessary_wraps)]
#![warn(clippy::unseparated_literal_suffix)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::mod_module_files)]
#![allow(clippy::result_unit_err)] // slot storage reports a full block as Err(())
#![allow(clippy::len_without_is_empty)]
#![allow(clippy::uninlined_format_args)]
// @@ end lint list @@

mod compare;
mod err;
mod flat_map;
mod multimap;
mod search;
#[cfg(feature = "serde")]
mod serialize;
mod slots;
mod static_map;

// Export the raw bound searches only to the fuzzer.
// (This is not stable; you should not use it except for testing.)
#[cfg(feature = "bound-search")]
pub use search::{equal_range, find, lower_bound, upper_bound};

pub use compare::{Compare, CompareFn, Natural, Reverse};
pub use err::Error;
pub use flat_map::{FlatMap, FlatMapBuilder};
pub use multimap::SortedMultimap;
pub use static_map::StaticFlatMap;
