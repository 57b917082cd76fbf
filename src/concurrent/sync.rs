//! Concurrent-map-backed set with weak iteration semantics.
//!
//! [`SyncSet`] stores its elements as keys of a [`flurry`] concurrent hash
//! map. Point operations (`add`, `remove`, `contains`) are lock-free from the
//! caller's perspective and scale well under contention; there is no
//! wrapper-level lock at all.
//!
//! The trade-off is explicit: [`cardinality`](SyncSet::cardinality) and
//! [`iterate`](SyncSet::iterate) must enumerate the entire backing map, and
//! under concurrent mutation that enumeration offers **no atomicity
//! guarantee**. A pass may observe some but not all concurrent insertions and
//! removals, and two back-to-back `cardinality` calls can return different
//! results without any caller-visible ordering. Callers that need iteration
//! atomicity should use [`LockedSet`](crate::concurrent::LockedSet) or
//! [`RwLockedSet`](crate::concurrent::RwLockedSet) instead.

use std::fmt;
use std::hash::Hash;

use flurry::epoch;

use crate::contract::{Set, Synchronized};

/// A set backed by a concurrent hash map.
///
/// All operations take `&self`; share the set with `Arc` (or a scoped-thread
/// borrow) and operate from any thread without further locking. Element types
/// must be `Send + Sync + 'static`, which the backing map requires to move
/// values between threads during its internal resizing.
///
/// # Iteration safety
///
/// Safe to call concurrently with mutation, but a pass is **not** a snapshot:
/// it reflects an arbitrary interleaving of the mutations in flight. Elements
/// present for the entire duration of the pass are always yielded; elements
/// added or removed mid-pass may or may not be.
///
/// # Examples
///
/// ```rust
/// use setkit::concurrent::SyncSet;
/// use std::sync::Arc;
/// use std::thread;
///
/// let set = Arc::new(SyncSet::new());
///
/// let handles: Vec<_> = (0..4)
///     .map(|worker| {
///         let set = Arc::clone(&set);
///         thread::spawn(move || {
///             for n in 0..100 {
///                 set.add(worker * 100 + n);
///             }
///         })
///     })
///     .collect();
/// for handle in handles {
///     handle.join().expect("worker panicked");
/// }
/// assert_eq!(set.cardinality(), 400);
/// ```
pub struct SyncSet<T>
where
    T: 'static + Sync + Send + Clone + Hash + Eq + Ord,
{
    map: flurry::HashMap<T, ()>,
}

static_assertions::assert_impl_all!(SyncSet<i32>: Send, Sync);
static_assertions::assert_impl_all!(SyncSet<String>: Send, Sync);

impl<T> SyncSet<T>
where
    T: 'static + Sync + Send + Clone + Hash + Eq + Ord,
{
    /// Creates a new, empty set.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use setkit::concurrent::SyncSet;
    ///
    /// let set: SyncSet<i32> = SyncSet::new();
    /// assert!(set.is_empty());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self {
            map: flurry::HashMap::new(),
        }
    }

    /// Adds an element to the set.
    ///
    /// Returns `true` if the element was not already in the set.
    pub fn add(&self, element: T) -> bool {
        let guard = epoch::pin();
        self.map.insert(element, (), &guard).is_none()
    }

    /// Removes an element from the set.
    ///
    /// Returns `true` if the element was in the set.
    pub fn remove(&self, element: &T) -> bool {
        let guard = epoch::pin();
        self.map.remove(element, &guard).is_some()
    }

    /// Returns `true` if the set contains the element.
    pub fn contains(&self, element: &T) -> bool {
        let guard = epoch::pin();
        self.map.contains_key(element, &guard)
    }

    /// Number of elements currently in the set.
    ///
    /// Counts by enumerating the backing map; under concurrent mutation the
    /// result is a point-in-time approximation, and two back-to-back calls
    /// may disagree.
    pub fn cardinality(&self) -> usize {
        let guard = epoch::pin();
        self.map.keys(&guard).count()
    }

    /// Returns `true` if the set contains no elements.
    pub fn is_empty(&self) -> bool {
        let guard = epoch::pin();
        self.map.keys(&guard).next().is_none()
    }

    /// Removes every element this call manages to observe, returning the
    /// number actually removed.
    ///
    /// Not atomic: elements added concurrently may survive the call.
    pub fn clear(&self) -> usize {
        let guard = epoch::pin();
        let snapshot: Vec<T> = self.map.keys(&guard).cloned().collect();
        let mut removed = 0;
        for element in snapshot {
            if self.map.remove(&element, &guard).is_some() {
                removed += 1;
            }
        }
        removed
    }

    /// Iterates the elements with the weak semantics described in the
    /// [type docs](Self): concurrent mutation is safe but the pass is not a
    /// snapshot. Stops early when the consumer returns `false`.
    pub fn iterate<F>(&self, mut consumer: F)
    where
        F: FnMut(&T) -> bool,
    {
        let guard = epoch::pin();
        for element in self.map.keys(&guard) {
            if !consumer(element) {
                return;
            }
        }
    }
}

// =============================================================================
// Contract Implementations
// =============================================================================

impl<T> Clone for SyncSet<T>
where
    T: 'static + Sync + Send + Clone + Hash + Eq + Ord,
{
    /// Snapshots the observable membership into a fresh, unshared set.
    fn clone(&self) -> Self {
        let copy = Self::new();
        let guard = epoch::pin();
        for element in self.map.keys(&guard) {
            copy.add(element.clone());
        }
        copy
    }
}

impl<T> Set for SyncSet<T>
where
    T: 'static + Sync + Send + Clone + Hash + Eq + Ord,
{
    type Element = T;

    fn add(&mut self, element: T) -> bool {
        Self::add(self, element)
    }

    fn remove(&mut self, element: &T) -> bool {
        Self::remove(self, element)
    }

    fn contains(&self, element: &T) -> bool {
        Self::contains(self, element)
    }

    fn cardinality(&self) -> usize {
        Self::cardinality(self)
    }

    fn is_empty(&self) -> bool {
        Self::is_empty(self)
    }

    fn clear(&mut self) -> usize {
        Self::clear(self)
    }

    fn new_empty(&self) -> Self {
        Self::new()
    }

    fn iterate<F>(&self, consumer: F)
    where
        F: FnMut(&T) -> bool,
    {
        Self::iterate(self, consumer);
    }
}

impl<T> Synchronized for SyncSet<T> where T: 'static + Sync + Send + Clone + Hash + Eq + Ord {}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T> Default for SyncSet<T>
where
    T: 'static + Sync + Send + Clone + Hash + Eq + Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for SyncSet<T>
where
    T: 'static + Sync + Send + Clone + Hash + Eq + Ord,
{
    fn from_iter<I: IntoIterator<Item = T>>(iterable: I) -> Self {
        let set = Self::new();
        for element in iterable {
            set.add(element);
        }
        set
    }
}

impl<T> fmt::Debug for SyncSet<T>
where
    T: 'static + Sync + Send + Clone + Hash + Eq + Ord + fmt::Debug,
{
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let guard = epoch::pin();
        formatter
            .debug_set()
            .entries(self.map.keys(&guard))
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
