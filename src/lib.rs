//! # setkit
//!
//! Interchangeable set implementations: unordered, insertion-ordered, and
//! concurrency-safe variants sharing one contract, plus generic set algebra.
//!
//! ## Overview
//!
//! This library provides mathematical sets: unique-element containers with
//! membership tests, mutation, iteration, and set algebra, where the backing
//! implementation is chosen at construction time and everything downstream
//! operates through the [`Set`](contract::Set) contract:
//!
//! - **Contract**: [`Set`](contract::Set), [`OrderedSet`](contract::OrderedSet),
//!   and the [`Synchronized`](contract::Synchronized) capability marker
//! - **Containers**: [`UnorderedSet`](collections::UnorderedSet) (hash-backed),
//!   [`IndexedSet`](collections::IndexedSet) (insertion-ordered with a dense
//!   reverse index)
//! - **Concurrency wrappers**: [`LockedSet`](concurrent::LockedSet)
//!   (iteration-exclusive, condition-variable based),
//!   [`RwLockedSet`](concurrent::RwLockedSet) (single reader/writer lock), and
//!   [`SyncSet`](concurrent::SyncSet) (concurrent map, weak iteration
//!   semantics)
//! - **Algebra**: [`union`](algebra::union), [`intersection`](algebra::intersection),
//!   [`difference`](algebra::difference), subset/superset/equality/disjointness
//!   tests, and bulk helpers, all generic over the contract
//!
//! ## Feature Flags
//!
//! - `concurrent` (default): the concurrency wrappers and the
//!   concurrent-map-backed container
//! - `serde`: `Serialize`/`Deserialize` for the plain containers
//! - `fxhash` / `ahash`: swap the hasher used by the plain containers
//! - `full`: everything
//!
//! ## Example
//!
//! ```rust
//! use setkit::prelude::*;
//!
//! let evens: UnorderedSet<i32> = (0..10).filter(|n| n % 2 == 0).collect();
//! let small: UnorderedSet<i32> = (0..5).collect();
//!
//! let both = algebra::intersection(&evens, &small);
//! assert_eq!(both.cardinality(), 3); // {0, 2, 4}
//! assert!(algebra::subset(&both, &evens));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports the contract traits, the concrete containers, and the algebra
/// module.
///
/// # Usage
///
/// ```rust
/// use setkit::prelude::*;
/// ```
pub mod prelude {

    pub use crate::algebra;

    pub use crate::collections::*;

    pub use crate::contract::*;

    #[cfg(feature = "concurrent")]
    pub use crate::concurrent::*;
}

pub mod algebra;

pub mod collections;

pub mod contract;

#[cfg(feature = "concurrent")]
pub mod concurrent;
