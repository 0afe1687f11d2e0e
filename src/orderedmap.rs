//! This crate provides [`OrderedMap`], an associative container that remembers
//! the order in which keys were first inserted.
//!
//! Entries live in a contiguous `Vec<(K, V)>` in insertion order. A hash index
//! maps every key to its position in that vector, so lookups, duplicate checks
//! and erase-by-key never scan the entries. Positional access is O(1), appends
//! are amortized O(1), and erasing from the middle is O(n) because later
//! entries shift down to keep the storage dense.
//!
//! ```
//! use orderedmap::OrderedMap;
//!
//! let mut map = OrderedMap::new();
//! map.insert("b", 2);
//! map.insert("a", 1);
//! map.insert("b", 3); // ignored, "b" is already present
//!
//! let keys: Vec<_> = map.keys().copied().collect();
//! assert_eq!(keys, ["b", "a"]);
//! assert_eq!(map[&"b"], 2);
//! ```
//!
//! Build with the `no_std_support` feature to use `alloc` and `hashbrown`
//! instead of `std`. The default `log` feature reports compaction work through
//! the [`log`](https://docs.rs/log) facade.

#![cfg_attr(feature = "no_std_support", no_std)]

extern crate alloc;

#[cfg(feature = "log")]
#[allow(unused_imports)]
pub(crate) use log::{debug, trace};

#[cfg(not(feature = "log"))]
mod log_shim {
  macro_rules! debug ( ($($tt:tt)*) => {{}} );
  macro_rules! trace ( ($($tt:tt)*) => {{}} );
  #[allow(unused_imports)]
  pub(crate) use debug;
  #[allow(unused_imports)]
  pub(crate) use trace;
}
#[cfg(not(feature = "log"))]
#[allow(unused_imports)]
pub(crate) use log_shim::{debug, trace};

pub mod error;
pub mod iter;
pub mod ordered_map;

#[cfg(test)]
mod ordered_map_tests;

pub use crate::error::{MapError, Result};
pub use crate::iter::{IntoIter, Iter, IterMut, Keys, Values, ValuesMut};
pub use crate::ordered_map::OrderedMap;
