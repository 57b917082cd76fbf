//! The set contract: the traits every backing implementation satisfies.
//!
//! The concrete containers, the concurrency wrappers, and the
//! [`algebra`](crate::algebra) functions are all written against [`Set`] and
//! [`OrderedSet`]. A caller picks a concrete kind at
//! construction time and generic code cannot tell which one it received, or
//! whether it is wrapped in a concurrency wrapper.
//!
//! # Iteration model
//!
//! The contract's iteration operation is *internal*: [`Set::iterate`] drives a
//! consumer closure over the elements and stops when the closure returns
//! `false`. This shape lets the concurrency wrappers treat a whole traversal
//! as one guarded pass with cleanup guaranteed on every exit path (normal
//! exhaustion, early stop, or a panicking consumer). The plain containers
//! additionally expose ordinary `iter()`/`IntoIterator` adapters for
//! single-threaded use; the wrappers deliberately do not, since an external
//! iterator could escape the locking discipline.
//!
//! # Examples
//!
//! ```rust
//! use setkit::contract::Set;
//! use setkit::collections::UnorderedSet;
//!
//! fn count_even(set: &impl Set<Element = i32>) -> usize {
//!     let mut even = 0;
//!     set.iterate(|element| {
//!         if element % 2 == 0 {
//!             even += 1;
//!         }
//!         true
//!     });
//!     even
//! }
//!
//! let set: UnorderedSet<i32> = (0..10).collect();
//! assert_eq!(count_even(&set), 5);
//! ```

use std::hash::Hash;

/// A collection of unique elements.
///
/// Every set implementation in this crate satisfies this trait; the functions
/// in [`algebra`](crate::algebra) build on top of it and nothing else.
///
/// The `Clone` supertrait is the contract's snapshot operation: cloning any
/// set, wrapped or bare, produces an independent container of the same
/// concrete kind holding the current membership (and order, for ordered
/// kinds). Mutations to the clone never affect the original and vice versa.
///
/// Mutating operations take `&mut self`. The synchronized kinds
/// ([`LockedSet`](crate::concurrent::LockedSet),
/// [`RwLockedSet`](crate::concurrent::RwLockedSet),
/// [`SyncSet`](crate::concurrent::SyncSet)) additionally expose inherent
/// `&self` mutators so a shared handle (for example an `Arc`) can mutate; for
/// the plain containers the borrow checker makes unsynchronized concurrent
/// mutation unrepresentable.
pub trait Set: Clone {
    /// The element type. Identity is by value; elements are never mutated by
    /// the container.
    type Element: Clone + Eq + Hash;

    /// Adds an element to the set.
    ///
    /// Returns `true` if the element was not already in the set; adding a
    /// present element is a no-op that returns `false`.
    fn add(&mut self, element: Self::Element) -> bool;

    /// Removes an element from the set.
    ///
    /// Returns `true` if the element was in the set.
    fn remove(&mut self, element: &Self::Element) -> bool;

    /// Returns `true` if the set contains the element. No side effects.
    fn contains(&self, element: &Self::Element) -> bool;

    /// Number of elements currently in the set.
    ///
    /// Always equals the number of elements a full [`iterate`](Self::iterate)
    /// pass would yield.
    fn cardinality(&self) -> usize;

    /// Returns `true` if the set contains no elements.
    fn is_empty(&self) -> bool {
        self.cardinality() == 0
    }

    /// Removes all elements and returns the number removed (the cardinality
    /// before clearing).
    fn clear(&mut self) -> usize;

    /// Returns a new, empty container of the same concrete kind.
    ///
    /// Generic code uses this to build a same-kind result without naming a
    /// concrete type (see [`algebra::reverse`](crate::algebra::reverse) for
    /// the ordered counterpart).
    fn new_empty(&self) -> Self;

    /// Iterates over the elements present when the pass begins, calling
    /// `consumer` for each one. Iteration stops early when the consumer
    /// returns `false`.
    ///
    /// Enumeration order is unspecified unless the implementation is ordered.
    /// Whether a pass is atomic with respect to concurrent mutation depends on
    /// the implementation: the plain containers rely on the borrow checker,
    /// [`LockedSet`](crate::concurrent::LockedSet) and
    /// [`RwLockedSet`](crate::concurrent::RwLockedSet) guarantee exclusivity,
    /// and [`SyncSet`](crate::concurrent::SyncSet) documents its weaker
    /// semantics. Implementations must document their iteration safety.
    fn iterate<F>(&self, consumer: F)
    where
        F: FnMut(&Self::Element) -> bool;
}

/// A [`Set`] that additionally maintains a total, dense, zero-based position
/// for every element.
///
/// Positions are contiguous in `[0, cardinality)` and determined by insertion
/// order unless [`sort`](Self::sort) has reordered the sequence. The forward
/// sequence (position to element) and the reverse index (element to position)
/// always agree exactly: after any mutation, every position maps back through
/// [`index_of`](Self::index_of) to itself.
///
/// Ordered sets are restricted to element types with a total order, which
/// [`sort`](Self::sort) uses.
pub trait OrderedSet: Set
where
    Self::Element: Ord,
{
    /// Iterates `(position, element)` pairs in ascending position order,
    /// stopping early when the consumer returns `false`.
    ///
    /// The same iteration-safety notes as [`Set::iterate`] apply.
    fn ordered<F>(&self, consumer: F)
    where
        F: FnMut(usize, &Self::Element) -> bool;

    /// Iterates `(position, element)` pairs in descending position order,
    /// stopping early when the consumer returns `false`.
    ///
    /// The same iteration-safety notes as [`Set::iterate`] apply.
    fn backwards<F>(&self, consumer: F)
    where
        F: FnMut(usize, &Self::Element) -> bool;

    /// Returns the element at `position`, or `None` when `position` is out of
    /// range (`>= cardinality`). O(1).
    ///
    /// The element is returned by value so that synchronized implementations
    /// do not have to hand out references into lock-guarded state.
    fn at(&self, position: usize) -> Option<Self::Element>;

    /// Returns the position of `element`, or `None` if absent. O(1).
    fn index_of(&self, element: &Self::Element) -> Option<usize>;

    /// Reorders the sequence into ascending element order in place, then
    /// rebuilds the reverse index to match.
    ///
    /// Insertion order is lost: elements added afterwards are appended to the
    /// end regardless of sort order, so a set sorted once and then mutated is
    /// not automatically re-sorted.
    fn sort(&mut self);

    /// Returns a new, empty ordered container of the same concrete kind.
    ///
    /// The narrower return type (compared to [`Set::new_empty`]) is what
    /// ordered-only generic code such as
    /// [`algebra::reverse`](crate::algebra::reverse) needs.
    fn new_empty_ordered(&self) -> Self;
}

/// Capability marker for set kinds that are safe for concurrent use.
///
/// Implemented by the concurrency wrappers and by
/// [`SyncSet`](crate::concurrent::SyncSet). Where the original design of this
/// abstraction asked "is this value already a locked set?" at runtime, a Rust
/// caller states the requirement as a bound and the compiler answers it:
///
/// ```rust
/// # #[cfg(feature = "concurrent")] {
/// use setkit::contract::{Set, Synchronized};
/// use setkit::concurrent::LockedSet;
/// use setkit::collections::UnorderedSet;
/// use std::sync::Arc;
///
/// fn shared_handle<S>(set: S) -> Arc<S>
/// where
///     S: Set<Element = i32> + Synchronized,
/// {
///     Arc::new(set)
/// }
///
/// let set = shared_handle(LockedSet::wrap(UnorderedSet::new()));
/// set.add(1);
/// # }
/// ```
pub trait Synchronized {}
