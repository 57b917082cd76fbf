//! Set algebra over the [`Set`](crate::contract::Set) contract.
//!
//! Every function here is generic over the contract and carries no locking
//! knowledge of its own: correctness under concurrency comes entirely from
//! the concrete container or wrapper passed in, and a wrapped set is
//! indistinguishable from a bare one. Binary constructors (`union`,
//! `intersection`, ...) build their result by cloning the first argument, so
//! the result is always the first argument's concrete kind.
//!
//! # Examples
//!
//! ```rust
//! use setkit::algebra;
//! use setkit::collections::UnorderedSet;
//! use setkit::contract::Set;
//!
//! let a: UnorderedSet<i32> = [1, 2, 3].into_iter().collect();
//! let b: UnorderedSet<i32> = [2, 3, 4].into_iter().collect();
//!
//! assert_eq!(algebra::union(&a, &b).cardinality(), 4);
//! assert_eq!(algebra::intersection(&a, &b).cardinality(), 2);
//! assert_eq!(algebra::difference(&a, &b).cardinality(), 1);
//! assert!(algebra::subset(&a, &algebra::union(&a, &b)));
//! ```

use std::borrow::Borrow;

use crate::contract::{OrderedSet, Set};

/// Union of two sets: a new set with all elements from both.
///
/// The result's concrete kind is `a`'s kind.
pub fn union<A, B>(a: &A, b: &B) -> A
where
    A: Set,
    B: Set<Element = A::Element>,
{
    let mut result = a.clone();
    b.iterate(|element| {
        result.add(element.clone());
        true
    });
    result
}

/// Intersection of two sets: a new set with the elements present in both.
///
/// The result's concrete kind is `a`'s kind.
pub fn intersection<A, B>(a: &A, b: &B) -> A
where
    A: Set,
    B: Set<Element = A::Element>,
{
    let mut result = a.clone();
    a.iterate(|element| {
        if !b.contains(element) {
            result.remove(element);
        }
        true
    });
    result
}

/// Difference of two sets: a new set with the elements of `a` that are not in
/// `b`.
///
/// The result's concrete kind is `a`'s kind.
pub fn difference<A, B>(a: &A, b: &B) -> A
where
    A: Set,
    B: Set<Element = A::Element>,
{
    let mut result = a.clone();
    a.iterate(|element| {
        if b.contains(element) {
            result.remove(element);
        }
        true
    });
    result
}

/// Symmetric difference: a new set with the elements present in exactly one
/// of the two sets.
///
/// The result's concrete kind is `a`'s kind.
pub fn symmetric_difference<A, B>(a: &A, b: &B) -> A
where
    A: Set,
    B: Set<Element = A::Element>,
{
    let mut result = a.clone();
    b.iterate(|element| {
        if a.contains(element) {
            result.remove(element);
        } else {
            result.add(element.clone());
        }
        true
    });
    result
}

/// Returns `true` if every element of `a` is also in `b`.
///
/// Short-circuits `false` immediately when `a` has more elements than `b`,
/// and on the first element of `a` missing from `b`.
pub fn subset<A, B>(a: &A, b: &B) -> bool
where
    A: Set,
    B: Set<Element = A::Element>,
{
    if a.cardinality() > b.cardinality() {
        return false;
    }
    let mut all_present = true;
    a.iterate(|element| {
        all_present = b.contains(element);
        all_present
    });
    all_present
}

/// Returns `true` if every element of `b` is also in `a`.
pub fn superset<A, B>(a: &A, b: &B) -> bool
where
    A: Set,
    B: Set<Element = A::Element>,
{
    subset(b, a)
}

/// Returns `true` if the two sets contain exactly the same elements,
/// regardless of concrete kind or order.
pub fn equal<A, B>(a: &A, b: &B) -> bool
where
    A: Set,
    B: Set<Element = A::Element>,
{
    a.cardinality() == b.cardinality() && subset(a, b) && subset(b, a)
}

/// Returns `true` if the two sets have no elements in common.
///
/// Short-circuits on the first shared element.
pub fn disjoint<A, B>(a: &A, b: &B) -> bool
where
    A: Set,
    B: Set<Element = A::Element>,
{
    let mut no_overlap = true;
    a.iterate(|element| {
        no_overlap = !b.contains(element);
        no_overlap
    });
    no_overlap
}

/// Returns `true` if the set contains every element of the sequence.
///
/// An empty set is considered to contain only an empty sequence: a non-empty
/// sequence tested against an empty set is `false`, an empty sequence against
/// an empty set is `true`, and an empty sequence against a non-empty set is
/// `false`.
///
/// # Examples
///
/// ```rust
/// use setkit::algebra;
/// use setkit::collections::UnorderedSet;
///
/// let empty: UnorderedSet<i32> = UnorderedSet::new();
/// assert!(algebra::contains_all(&empty, Vec::<i32>::new()));
/// assert!(!algebra::contains_all(&empty, [1]));
/// ```
pub fn contains_all<S, I>(set: &S, sequence: I) -> bool
where
    S: Set,
    I: IntoIterator,
    I::Item: Borrow<S::Element>,
{
    let mut saw_any = false;
    for element in sequence {
        saw_any = true;
        if !set.contains(element.borrow()) {
            return false;
        }
    }
    saw_any || set.is_empty()
}

/// Adds every element of the sequence to the set, returning how many were
/// newly inserted.
pub fn add_all<S, I>(set: &mut S, sequence: I) -> usize
where
    S: Set,
    I: IntoIterator<Item = S::Element>,
{
    let mut added = 0;
    for element in sequence {
        if set.add(element) {
            added += 1;
        }
    }
    added
}

/// Removes every element of the sequence from the set, returning how many
/// were actually present.
pub fn remove_all<S, I>(set: &mut S, sequence: I) -> usize
where
    S: Set,
    I: IntoIterator,
    I::Item: Borrow<S::Element>,
{
    let mut removed = 0;
    for element in sequence {
        if set.remove(element.borrow()) {
            removed += 1;
        }
    }
    removed
}

/// Snapshot of the set's elements as a vector.
///
/// For ordered sets the vector is in presentation order; otherwise the order
/// is unspecified.
pub fn elements<S>(set: &S) -> Vec<S::Element>
where
    S: Set,
{
    let mut snapshot = Vec::with_capacity(set.cardinality());
    set.iterate(|element| {
        snapshot.push(element.clone());
        true
    });
    snapshot
}

/// Returns `true` if the two ordered sets contain the same elements in the
/// same presentation order.
pub fn equal_ordered<A, B>(a: &A, b: &B) -> bool
where
    A: OrderedSet,
    B: OrderedSet<Element = A::Element>,
    A::Element: Ord,
{
    // Can't be equal if they don't have the same cardinality.
    if a.cardinality() != b.cardinality() {
        return false;
    }
    let b_elements = elements(b);
    let mut matches = true;
    a.ordered(|position, element| {
        matches = b_elements.get(position) == Some(element);
        matches
    });
    matches
}

/// Returns `true` if the ordered set's presentation order is ascending.
pub fn is_sorted<S>(set: &S) -> bool
where
    S: OrderedSet,
    S::Element: Ord,
{
    let mut previous: Option<S::Element> = None;
    let mut ascending = true;
    set.ordered(|_, element| {
        if previous.as_ref().is_some_and(|prior| element < prior) {
            ascending = false;
            return false;
        }
        previous = Some(element.clone());
        true
    });
    ascending
}

/// Returns a new ordered set of the same concrete kind with the elements in
/// reverse presentation order.
pub fn reverse<S>(set: &S) -> S
where
    S: OrderedSet,
    S::Element: Ord,
{
    let mut result = set.new_empty_ordered();
    set.backwards(|_, element| {
        result.add(element.clone());
        true
    });
    result
}

// =============================================================================
// Tests
// =============================================================================
