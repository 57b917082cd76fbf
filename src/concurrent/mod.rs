//! Concurrency-safe set variants.
//!
//! Three ways to share a set between threads, with different trade-offs:
//!
//! - [`LockedSet`]: wraps any delegate implementing the contract and
//!   serializes mutation against whole iteration passes with a mutex plus a
//!   condition variable. Point reads stay concurrent while a pass is running.
//! - [`RwLockedSet`]: wraps any delegate behind a single reader/writer lock;
//!   each call (including a whole iteration pass) holds the lock for its own
//!   duration. Simpler to reason about; prefer this unless profiling shows
//!   writer starvation under read-heavy iteration workloads.
//! - [`SyncSet`]: a concurrent-map-backed container with lock-free point
//!   operations and deliberately weak (non-atomic) iteration semantics.
//!
//! All three implement the [`Synchronized`](crate::contract::Synchronized)
//! capability marker, and mutate through `&self`, so they can be shared via
//! `Arc` without external locking.
//!
//! # Examples
//!
//! ```rust
//! use setkit::concurrent::LockedSet;
//! use setkit::collections::UnorderedSet;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let set = Arc::new(LockedSet::wrap(UnorderedSet::new()));
//!
//! let handles: Vec<_> = (0..4)
//!     .map(|worker| {
//!         let set = Arc::clone(&set);
//!         thread::spawn(move || {
//!             for n in 0..100 {
//!                 set.add(worker * 100 + n);
//!             }
//!         })
//!     })
//!     .collect();
//!
//! for handle in handles {
//!     handle.join().expect("worker panicked");
//! }
//! assert_eq!(set.cardinality(), 400);
//! ```

mod locked;
mod rwlock;
mod sync;

pub use locked::LockedIndexedSet;
pub use locked::LockedSet;
pub use locked::LockedUnorderedSet;
pub use rwlock::RwLockedSet;
pub use sync::SyncSet;
