//! Reader/writer-locked set wrapper.
//!
//! [`RwLockedSet`] is the lighter-weight alternative to
//! [`LockedSet`](crate::concurrent::LockedSet): every individual call guards
//! itself with one reader/writer lock (writers exclusive, readers shared),
//! and a whole iteration pass counts as a single read acquisition held for
//! its complete traversal. That yields the same mutation/iteration
//! exclusivity as the condition-variable wrapper through a single primitive,
//! at the cost of blocking *all* iterations while a mutation is in progress
//! and vice versa.
//!
//! Prefer this wrapper unless profiling shows writer starvation under
//! read-heavy iteration workloads.
//!
//! # Re-entry warning
//!
//! Do not call back into the same wrapper from inside a consumer closure: the
//! pass holds a read acquisition, a re-entrant mutation deadlocks outright,
//! and even a re-entrant read can deadlock once a writer is queued (the lock
//! blocks new readers to avoid starving writers). [`LockedSet`] is the
//! wrapper whose point reads are safe mid-pass.

use std::fmt;

use parking_lot::RwLock;

use crate::contract::{OrderedSet, Set, Synchronized};

/// A set wrapper guarding each call with a reader/writer lock.
///
/// All operations take `&self`; share the wrapper with `Arc` and mutate from
/// any thread. The delegate is exclusively owned by the wrapper; the only
/// way back to it is [`into_inner`](Self::into_inner).
///
/// # Examples
///
/// ```rust
/// use setkit::concurrent::RwLockedSet;
/// use setkit::collections::UnorderedSet;
/// use std::sync::Arc;
/// use std::thread;
///
/// let set = Arc::new(RwLockedSet::wrap(UnorderedSet::new()));
///
/// let handles: Vec<_> = (0..4)
///     .map(|worker| {
///         let set = Arc::clone(&set);
///         thread::spawn(move || {
///             for n in 0..50 {
///                 set.add(worker * 50 + n);
///             }
///         })
///     })
///     .collect();
/// for handle in handles {
///     handle.join().expect("worker panicked");
/// }
/// assert_eq!(set.cardinality(), 200);
/// ```
pub struct RwLockedSet<S> {
    delegate: RwLock<S>,
}

static_assertions::assert_impl_all!(
    RwLockedSet<crate::collections::UnorderedSet<i32>>: Send, Sync
);

impl<S: Set> RwLockedSet<S> {
    /// Wraps a delegate, taking ownership of it.
    pub fn wrap(delegate: S) -> Self {
        Self {
            delegate: RwLock::new(delegate),
        }
    }

    /// Consumes the wrapper and returns the delegate.
    pub fn into_inner(self) -> S {
        self.delegate.into_inner()
    }

    /// Adds an element under the write lock.
    ///
    /// Returns `true` if the element was not already in the set.
    pub fn add(&self, element: S::Element) -> bool {
        self.delegate.write().add(element)
    }

    /// Removes an element under the write lock.
    ///
    /// Returns `true` if the element was in the set.
    pub fn remove(&self, element: &S::Element) -> bool {
        self.delegate.write().remove(element)
    }

    /// Removes all elements under the write lock, returning the number
    /// removed.
    pub fn clear(&self) -> usize {
        self.delegate.write().clear()
    }

    /// Returns `true` if the set contains the element. Shares the read lock.
    pub fn contains(&self, element: &S::Element) -> bool {
        self.delegate.read().contains(element)
    }

    /// Number of elements currently in the set. Shares the read lock.
    pub fn cardinality(&self) -> usize {
        self.delegate.read().cardinality()
    }

    /// Returns `true` if the set contains no elements.
    pub fn is_empty(&self) -> bool {
        self.cardinality() == 0
    }

    /// Iterates the elements while holding the read lock for the whole pass.
    ///
    /// Mutation attempted by another thread is delayed until the pass
    /// finishes, stops early, or panics; the read guard is released on every
    /// exit path. Other read-side calls (including other passes) may share
    /// the lock concurrently.
    pub fn iterate<F>(&self, consumer: F)
    where
        F: FnMut(&S::Element) -> bool,
    {
        self.delegate.read().iterate(consumer);
    }
}

impl<S: OrderedSet> RwLockedSet<S>
where
    S::Element: Ord,
{
    /// Iterates `(position, element)` pairs in ascending order while holding
    /// the read lock for the whole pass.
    pub fn ordered<F>(&self, consumer: F)
    where
        F: FnMut(usize, &S::Element) -> bool,
    {
        self.delegate.read().ordered(consumer);
    }

    /// Iterates `(position, element)` pairs in descending order while holding
    /// the read lock for the whole pass.
    pub fn backwards<F>(&self, consumer: F)
    where
        F: FnMut(usize, &S::Element) -> bool,
    {
        self.delegate.read().backwards(consumer);
    }

    /// Returns the element at `position`, or `None` out of range.
    pub fn at(&self, position: usize) -> Option<S::Element> {
        self.delegate.read().at(position)
    }

    /// Returns the position of `element`, or `None` if absent.
    pub fn index_of(&self, element: &S::Element) -> Option<usize> {
        self.delegate.read().index_of(element)
    }

    /// Sorts the delegate in place under the write lock.
    pub fn sort(&self) {
        self.delegate.write().sort();
    }
}

// =============================================================================
// Contract Implementations
// =============================================================================

impl<S: Set> Clone for RwLockedSet<S> {
    /// Snapshots the delegate under the read lock into a fresh, unshared
    /// wrapper.
    fn clone(&self) -> Self {
        Self::wrap(self.delegate.read().clone())
    }
}

impl<S: Set> Set for RwLockedSet<S> {
    type Element = S::Element;

    fn add(&mut self, element: S::Element) -> bool {
        Self::add(self, element)
    }

    fn remove(&mut self, element: &S::Element) -> bool {
        Self::remove(self, element)
    }

    fn contains(&self, element: &S::Element) -> bool {
        Self::contains(self, element)
    }

    fn cardinality(&self) -> usize {
        Self::cardinality(self)
    }

    fn clear(&mut self) -> usize {
        Self::clear(self)
    }

    fn new_empty(&self) -> Self {
        Self::wrap(self.delegate.read().new_empty())
    }

    fn iterate<F>(&self, consumer: F)
    where
        F: FnMut(&S::Element) -> bool,
    {
        Self::iterate(self, consumer);
    }
}

impl<S: OrderedSet> OrderedSet for RwLockedSet<S>
where
    S::Element: Ord,
{
    fn ordered<F>(&self, consumer: F)
    where
        F: FnMut(usize, &S::Element) -> bool,
    {
        Self::ordered(self, consumer);
    }

    fn backwards<F>(&self, consumer: F)
    where
        F: FnMut(usize, &S::Element) -> bool,
    {
        Self::backwards(self, consumer);
    }

    fn at(&self, position: usize) -> Option<S::Element> {
        Self::at(self, position)
    }

    fn index_of(&self, element: &S::Element) -> Option<usize> {
        Self::index_of(self, element)
    }

    fn sort(&mut self) {
        Self::sort(self);
    }

    fn new_empty_ordered(&self) -> Self {
        Self::wrap(self.delegate.read().new_empty_ordered())
    }
}

impl<S> Synchronized for RwLockedSet<S> {}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<S: Set + Default> Default for RwLockedSet<S> {
    fn default() -> Self {
        Self::wrap(S::default())
    }
}

impl<S> FromIterator<<S as Set>::Element> for RwLockedSet<S>
where
    S: Set + FromIterator<<S as Set>::Element>,
{
    fn from_iter<I: IntoIterator<Item = S::Element>>(iterable: I) -> Self {
        Self::wrap(S::from_iter(iterable))
    }
}

impl<S: Set + fmt::Debug> fmt::Debug for RwLockedSet<S> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let delegate = self.delegate.read();
        formatter
            .debug_tuple("RwLockedSet")
            .field(&*delegate)
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collections::{IndexedSet, UnorderedSet};
    use rstest::rstest;

    #[rstest]
    fn contract_operations_pass_through_to_the_delegate() {
        let set = RwLockedSet::wrap(UnorderedSet::new());
        assert!(set.add(1));
        assert!(!set.add(1));
        assert!(set.contains(&1));
        assert!(set.remove(&1));
        assert_eq!(set.cardinality(), 0);
    }

    #[rstest]
    fn ordered_operations_pass_through_to_the_delegate() {
        let set: RwLockedSet<IndexedSet<i32>> = [5, 3, 2].into_iter().collect();
        assert_eq!(set.at(0), Some(5));
        assert_eq!(set.index_of(&3), Some(1));
        set.sort();
        assert_eq!(set.at(0), Some(2));
    }

    #[rstest]
    fn clear_returns_previous_cardinality() {
        let set: RwLockedSet<UnorderedSet<i32>> = (0..5).collect();
        assert_eq!(set.clear(), 5);
        assert!(set.is_empty());
    }

    #[rstest]
    fn clone_snapshots_independently() {
        let set: RwLockedSet<UnorderedSet<i32>> = [1, 2].into_iter().collect();
        let copy = set.clone();
        copy.add(3);
        assert_eq!(set.cardinality(), 2);
        assert_eq!(copy.cardinality(), 3);
    }

    #[rstest]
    fn iterate_supports_early_termination() {
        let set: RwLockedSet<UnorderedSet<i32>> = (0..100).collect();
        let mut yielded = 0;
        set.iterate(|_| {
            yielded += 1;
            yielded < 5
        });
        assert_eq!(yielded, 5);
    }
}
