//! The plain (single-threaded) set containers.
//!
//! Two backing stores implement the [`Set`](crate::contract::Set) contract
//! directly, with no synchronization of their own:
//!
//! - [`UnorderedSet`]: one hash-table lookup per point operation, no ordering
//!   guarantee
//! - [`IndexedSet`]: insertion-ordered, a dense sequence plus a reverse index
//!   kept consistent on removal
//!
//! Neither is safe for concurrent use; wrap one in a
//! [`LockedSet`](crate::concurrent::LockedSet) or
//! [`RwLockedSet`](crate::concurrent::RwLockedSet) for that. Within a single
//! thread the borrow checker already rules out mutation during an iteration
//! pass.
//!
//! # Examples
//!
//! ## `UnorderedSet`
//!
//! ```rust
//! use setkit::collections::UnorderedSet;
//! use setkit::contract::Set;
//!
//! let mut set = UnorderedSet::new();
//! assert!(set.add("a"));
//! assert!(!set.add("a")); // duplicates collapse
//! assert_eq!(set.cardinality(), 1);
//! ```
//!
//! ## `IndexedSet`
//!
//! ```rust
//! use setkit::collections::IndexedSet;
//! use setkit::contract::OrderedSet;
//!
//! let set: IndexedSet<i32> = [5, 3, 2].into_iter().collect();
//! assert_eq!(set.at(0), Some(5));       // insertion order
//! assert_eq!(set.index_of(&2), Some(2)); // reverse index
//! ```

// =============================================================================
// Hash Builder Type Alias
// =============================================================================

/// Hasher used by the plain containers' backing tables.
///
/// With the `ahash` feature enabled this is `ahash::RandomState`; with
/// `fxhash` (and not `ahash`) it is `rustc_hash::FxBuildHasher`; otherwise it
/// is the standard library's `RandomState`.
#[cfg(feature = "ahash")]
pub(crate) type DefaultHashBuilder = ahash::RandomState;

#[cfg(all(feature = "fxhash", not(feature = "ahash")))]
pub(crate) type DefaultHashBuilder = rustc_hash::FxBuildHasher;

#[cfg(not(any(feature = "ahash", feature = "fxhash")))]
pub(crate) type DefaultHashBuilder = std::collections::hash_map::RandomState;

mod indexed;
mod unordered;

pub use indexed::IndexedSet;
pub use indexed::IndexedSetIntoIterator;
pub use indexed::IndexedSetIterator;
pub use unordered::UnorderedSet;
pub use unordered::UnorderedSetIntoIterator;
pub use unordered::UnorderedSetIterator;

// =============================================================================
// Tests
// =============================================================================
