//! Iteration-exclusive set wrapper.
//!
//! This module provides [`LockedSet`], a wrapper that makes any delegate
//! implementing the [`Set`](crate::contract::Set) contract safe for
//! concurrent use while guaranteeing that **no mutation interleaves with an
//! in-progress iteration pass**: a whole traversal is atomic with respect to
//! `add`/`remove`/`clear`/`sort`, and a mutation attempted during a pass is
//! delayed, never rejected or lost.
//!
//! # Locking discipline
//!
//! The wrapper owns three pieces of state: the delegate behind a
//! reader/writer lock, a mutex-guarded `iterating` flag, and a condition
//! variable bound to that mutex. The following invariants are maintained:
//!
//! - The flag is `true` for at most one logical iteration pass at a time; a
//!   second pass requested concurrently waits its turn (passes serialize
//!   against passes, not only against mutators).
//! - A mutator that observes the flag set parks on the condition variable,
//!   releasing the mutex while it waits, and re-checks the flag on wake.
//! - A mutator holds the flag mutex across its whole mutation, so mutators
//!   are mutually exclusive and a pass cannot begin mid-mutation.
//! - The traversal itself runs under the delegate *read* lock, so point reads
//!   (`contains`, `cardinality`, `at`, `index_of`, cloning) proceed
//!   concurrently with an active pass and block only during a mutation.
//! - Clearing the flag and waking all waiters happens in the `Drop` of an
//!   RAII guard acquired at the start of the pass, so cleanup runs on every
//!   exit path: natural exhaustion, consumer early-stop, and consumer panic.
//!
//! # Re-entry warning
//!
//! From inside a consumer closure, point reads on the same wrapper are safe:
//! waiting mutators are parked on the condition variable rather than queued
//! on the reader/writer lock, so a re-entrant read acquisition cannot be
//! blocked behind a writer. A *mutation* from inside a consumer deadlocks the
//! calling thread, as does a mutation while the same thread is parked in
//! another call; there is no built-in timeout. A consumer that never
//! finishes its pass starves all mutators indefinitely; that is an accepted
//! trade-off of this design, not a recoverable error.
//!
//! # Examples
//!
//! ```rust
//! use setkit::concurrent::LockedSet;
//! use setkit::collections::IndexedSet;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let set = Arc::new(LockedSet::wrap(IndexedSet::new()));
//! for n in 0..100 {
//!     set.add(n);
//! }
//!
//! let reader = {
//!     let set = Arc::clone(&set);
//!     thread::spawn(move || {
//!         let mut yielded = 0;
//!         set.iterate(|_| {
//!             yielded += 1;
//!             true
//!         });
//!         yielded
//!     })
//! };
//!
//! set.add(100); // waits out any in-flight pass, never tears it
//! assert_eq!(reader.join().expect("reader"), 100);
//! ```

use std::fmt;

use parking_lot::{Condvar, Mutex, RwLock};

use crate::collections::{IndexedSet, UnorderedSet};
use crate::contract::{OrderedSet, Set, Synchronized};

/// An iteration-exclusive wrapper around any set implementation.
///
/// All operations take `&self`; share the wrapper with `Arc` and mutate from
/// any thread. The delegate is exclusively owned by the wrapper, and the only
/// way back to it is [`into_inner`](Self::into_inner), which consumes the
/// wrapper, so every access goes through the locking discipline described in
/// the [module docs](self).
///
/// For a wrapper that does not keep point reads running during a pass (and
/// needs no condition variable), see
/// [`RwLockedSet`](crate::concurrent::RwLockedSet).
pub struct LockedSet<S> {
    delegate: RwLock<S>,
    pass_active: Mutex<bool>,
    pass_done: Condvar,
}

/// [`LockedSet`] around the hash-backed container.
pub type LockedUnorderedSet<T> = LockedSet<UnorderedSet<T>>;

/// [`LockedSet`] around the insertion-ordered container.
pub type LockedIndexedSet<T> = LockedSet<IndexedSet<T>>;

// LockedSet is the safe way to share the plain containers across threads.
static_assertions::assert_impl_all!(LockedUnorderedSet<i32>: Send, Sync);
static_assertions::assert_impl_all!(LockedIndexedSet<String>: Send, Sync);

/// Clears the `iterating` flag and wakes all parked mutators when a pass ends,
/// on every exit path including consumer panics.
struct IterationPass<'a, S> {
    set: &'a LockedSet<S>,
}

impl<'a, S> IterationPass<'a, S> {
    /// Waits until no other pass is in flight, then claims the flag.
    fn begin(set: &'a LockedSet<S>) -> Self {
        let mut iterating = set.pass_active.lock();
        while *iterating {
            set.pass_done.wait(&mut iterating);
        }
        *iterating = true;
        Self { set }
    }
}

impl<S> Drop for IterationPass<'_, S> {
    fn drop(&mut self) {
        let mut iterating = self.set.pass_active.lock();
        *iterating = false;
        self.set.pass_done.notify_all();
    }
}

impl<S: Set> LockedSet<S> {
    /// Wraps a delegate, taking ownership of it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use setkit::concurrent::LockedSet;
    /// use setkit::collections::UnorderedSet;
    ///
    /// let set = LockedSet::wrap(UnorderedSet::new());
    /// assert!(set.add(1));
    /// ```
    pub fn wrap(delegate: S) -> Self {
        Self {
            delegate: RwLock::new(delegate),
            pass_active: Mutex::new(false),
            pass_done: Condvar::new(),
        }
    }

    /// Consumes the wrapper and returns the delegate.
    pub fn into_inner(self) -> S {
        self.delegate.into_inner()
    }

    /// Adds an element, waiting out any in-flight iteration pass.
    ///
    /// Returns `true` if the element was not already in the set.
    pub fn add(&self, element: S::Element) -> bool {
        self.with_write(|delegate| delegate.add(element))
    }

    /// Removes an element, waiting out any in-flight iteration pass.
    ///
    /// Returns `true` if the element was in the set.
    pub fn remove(&self, element: &S::Element) -> bool {
        self.with_write(|delegate| delegate.remove(element))
    }

    /// Removes all elements, waiting out any in-flight iteration pass.
    ///
    /// Returns the number of elements removed.
    pub fn clear(&self) -> usize {
        self.with_write(Set::clear)
    }

    /// Returns `true` if the set contains the element.
    ///
    /// Point reads do not wait for an active iteration pass; they block only
    /// while a mutation holds the delegate exclusively.
    pub fn contains(&self, element: &S::Element) -> bool {
        self.delegate.read().contains(element)
    }

    /// Number of elements currently in the set.
    ///
    /// Point reads do not wait for an active iteration pass.
    pub fn cardinality(&self) -> usize {
        self.delegate.read().cardinality()
    }

    /// Returns `true` if the set contains no elements.
    pub fn is_empty(&self) -> bool {
        self.cardinality() == 0
    }

    /// Iterates the elements as one exclusive pass.
    ///
    /// The pass is atomic with respect to mutation: any `add`, `remove`,
    /// `clear`, or `sort` attempted while the pass runs is delayed until the
    /// consumer finishes (or stops early, or panics). A second pass requested
    /// concurrently also waits its turn.
    pub fn iterate<F>(&self, consumer: F)
    where
        F: FnMut(&S::Element) -> bool,
    {
        let _pass = IterationPass::begin(self);
        let delegate = self.delegate.read();
        delegate.iterate(consumer);
    }

    /// Runs a mutation once no iteration pass is in flight.
    ///
    /// Holds the flag mutex for the whole mutation: mutators are serialized
    /// among themselves, and a pass cannot claim the flag mid-mutation.
    fn with_write<R>(&self, mutation: impl FnOnce(&mut S) -> R) -> R {
        let mut iterating = self.pass_active.lock();
        while *iterating {
            self.pass_done.wait(&mut iterating);
        }
        let mut delegate = self.delegate.write();
        mutation(&mut delegate)
    }
}

impl<S: OrderedSet> LockedSet<S>
where
    S::Element: Ord,
{
    /// Iterates `(position, element)` pairs in ascending order as one
    /// exclusive pass (see [`iterate`](Self::iterate)).
    pub fn ordered<F>(&self, consumer: F)
    where
        F: FnMut(usize, &S::Element) -> bool,
    {
        let _pass = IterationPass::begin(self);
        let delegate = self.delegate.read();
        delegate.ordered(consumer);
    }

    /// Iterates `(position, element)` pairs in descending order as one
    /// exclusive pass (see [`iterate`](Self::iterate)).
    pub fn backwards<F>(&self, consumer: F)
    where
        F: FnMut(usize, &S::Element) -> bool,
    {
        let _pass = IterationPass::begin(self);
        let delegate = self.delegate.read();
        delegate.backwards(consumer);
    }

    /// Returns the element at `position`, or `None` out of range.
    ///
    /// Point reads do not wait for an active iteration pass.
    pub fn at(&self, position: usize) -> Option<S::Element> {
        self.delegate.read().at(position)
    }

    /// Returns the position of `element`, or `None` if absent.
    ///
    /// Point reads do not wait for an active iteration pass.
    pub fn index_of(&self, element: &S::Element) -> Option<usize> {
        self.delegate.read().index_of(element)
    }

    /// Sorts the delegate in place, waiting out any in-flight iteration pass.
    pub fn sort(&self) {
        self.with_write(OrderedSet::sort);
    }
}

// =============================================================================
// Contract Implementations
// =============================================================================

impl<S: Set> Clone for LockedSet<S> {
    /// Snapshots the delegate under the read lock into a fresh, unshared
    /// wrapper.
    fn clone(&self) -> Self {
        Self::wrap(self.delegate.read().clone())
    }
}

impl<S: Set> Set for LockedSet<S> {
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

impl<S: OrderedSet> OrderedSet for LockedSet<S>
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

impl<S> Synchronized for LockedSet<S> {}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<S: Set + Default> Default for LockedSet<S> {
    fn default() -> Self {
        Self::wrap(S::default())
    }
}

impl<S> FromIterator<<S as Set>::Element> for LockedSet<S>
where
    S: Set + FromIterator<<S as Set>::Element>,
{
    fn from_iter<I: IntoIterator<Item = S::Element>>(iterable: I) -> Self {
        Self::wrap(S::from_iter(iterable))
    }
}

impl<S: Set + fmt::Debug> fmt::Debug for LockedSet<S> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let delegate = self.delegate.read();
        formatter.debug_tuple("LockedSet").field(&*delegate).finish()
    }
}

// =============================================================================
// Tests
// =============================================================================


#[cfg(test)]
mod multithread_tests {
    use super::*;
    use rstest::rstest;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::{Arc, Barrier, mpsc};
    use std::thread;
    use std::time::Duration;

    #[rstest]
    fn mutation_waits_for_iteration_cleanup() {
        let set = Arc::new(LockedSet::wrap(UnorderedSet::new()));
        for n in 0..1000 {
            set.add(n);
        }

        let (pass_running_sender, pass_running_receiver) = mpsc::channel();
        let writer = {
            let set = Arc::clone(&set);
            thread::spawn(move || {
                pass_running_receiver.recv().expect("pass start signal");
                // Must park until the pass below finishes its cleanup.
                set.add(1000);
            })
        };

        let mut yielded = 0;
        let mut observed_mutation = false;
        set.iterate(|element| {
            if yielded == 0 {
                pass_running_sender.send(()).expect("signal writer");
                // Give the writer ample time to attempt its mutation.
                thread::sleep(Duration::from_millis(50));
            }
            observed_mutation |= *element == 1000;
            yielded += 1;
            true
        });

        writer.join().expect("writer thread");
        assert!(!observed_mutation, "mutation interleaved with the pass");
        assert_eq!(yielded, 1000);
        assert!(set.contains(&1000));
    }

    #[rstest]
    fn early_termination_releases_waiting_mutators() {
        let set = Arc::new(LockedSet::wrap(UnorderedSet::new()));
        for n in 0..100 {
            set.add(n);
        }

        let mut yielded = 0;
        set.iterate(|_| {
            yielded += 1;
            false // stop after the first element
        });
        assert_eq!(yielded, 1);

        // Would deadlock (and time the test out) if the pass guard leaked.
        let writer = {
            let set = Arc::clone(&set);
            thread::spawn(move || set.add(100))
        };
        assert!(writer.join().expect("writer thread"));
    }

    #[rstest]
    fn panicking_consumer_releases_waiting_mutators() {
        let set = Arc::new(LockedSet::wrap(UnorderedSet::new()));
        set.add(1);

        let panicker = {
            let set = Arc::clone(&set);
            thread::spawn(move || {
                set.iterate(|_| panic!("consumer failure"));
            })
        };
        assert!(panicker.join().is_err());

        // The pass guard must have run during unwinding.
        assert!(set.add(2));
        assert_eq!(set.cardinality(), 2);
    }

    #[rstest]
    fn point_reads_proceed_during_a_pass() {
        let set = Arc::new(LockedSet::wrap(UnorderedSet::new()));
        for n in 0..100 {
            set.add(n);
        }

        let (ask_sender, ask_receiver) = mpsc::channel();
        let (answer_sender, answer_receiver) = mpsc::channel();
        let reader = {
            let set = Arc::clone(&set);
            thread::spawn(move || {
                ask_receiver.recv().expect("ask signal");
                let observed = set.contains(&0) && set.cardinality() == 100;
                answer_sender.send(observed).expect("answer");
            })
        };

        let mut asked = false;
        set.iterate(|_| {
            if !asked {
                asked = true;
                ask_sender.send(()).expect("signal reader");
                // The read must complete while this pass is still running.
                let answered = answer_receiver
                    .recv_timeout(Duration::from_secs(5))
                    .expect("point read blocked behind the pass");
                assert!(answered);
            }
            true
        });
        reader.join().expect("reader thread");
    }

    #[rstest]
    fn concurrent_passes_serialize() {
        let set = Arc::new(LockedSet::wrap(UnorderedSet::new()));
        for n in 0..50 {
            set.add(n);
        }

        let active_passes = Arc::new(AtomicUsize::new(0));
        let overlap_seen = Arc::new(AtomicBool::new(false));
        let barrier = Arc::new(Barrier::new(4));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let set = Arc::clone(&set);
                let active_passes = Arc::clone(&active_passes);
                let overlap_seen = Arc::clone(&overlap_seen);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    set.iterate(|_| {
                        let now_active = active_passes.fetch_add(1, Ordering::SeqCst) + 1;
                        if now_active > 1 {
                            overlap_seen.store(true, Ordering::SeqCst);
                        }
                        thread::yield_now();
                        active_passes.fetch_sub(1, Ordering::SeqCst);
                        true
                    });
                })
            })
            .collect();

        for handle in handles {
            handle.join().expect("iterating thread");
        }
        assert!(!overlap_seen.load(Ordering::SeqCst));
    }

    #[rstest]
    fn concurrent_fuzz_with_mutators_readers_and_iterators() {
        let set = Arc::new(LockedSet::wrap(UnorderedSet::new()));
        for n in 0..1000 {
            set.add(n);
        }

        let barrier = Arc::new(Barrier::new(6));
        let mut handles = Vec::new();

        // Adder and remover churn a disjoint range above the stable base.
        for worker in 0..2 {
            let set = Arc::clone(&set);
            let barrier = Arc::clone(&barrier);
            handles.push(thread::spawn(move || {
                barrier.wait();
                for round in 0..200 {
                    let element = 1000 + worker * 1000 + (round % 7);
                    set.add(element);
                    set.remove(&element);
                }
            }));
        }

        // Point readers.
        for _ in 0..2 {
            let set = Arc::clone(&set);
            let barrier = Arc::clone(&barrier);
            handles.push(thread::spawn(move || {
                barrier.wait();
                for n in 0..200 {
                    let _ = set.contains(&n);
                    let _ = set.cardinality();
                }
            }));
        }

        // Iterators: the stable base 0..1000 never shrinks and each churn
        // thread adds at most one extra element at a time, so an untorn pass
        // yields between 1000 and 1002 elements.
        for _ in 0..2 {
            let set = Arc::clone(&set);
            let barrier = Arc::clone(&barrier);
            handles.push(thread::spawn(move || {
                barrier.wait();
                for _ in 0..20 {
                    let mut yielded = 0usize;
                    set.iterate(|_| {
                        yielded += 1;
                        true
                    });
                    assert!(
                        (1000..=1002).contains(&yielded),
                        "torn pass yielded {yielded} elements"
                    );
                }
            }));
        }

        for handle in handles {
            handle.join().expect("fuzz thread");
        }
        assert_eq!(set.cardinality(), 1000);
    }
}
