//! Insertion-ordered set with a dense reverse index.
//!
//! [`IndexedSet`] keeps two structures in lockstep: a forward sequence (a
//! dense `Vec` of elements in presentation order) and a reverse index (a hash
//! map from element to its current position). If the same element is added
//! multiple times, the first insertion determines its position.
//!
//! # Invariant
//!
//! Every position in the forward sequence maps back through the reverse index
//! to itself: for all `i` in `[0, cardinality)`,
//! `index_of(at(i)) == Some(i)`. Positions are contiguous and gap-free.
//!
//! # Time Complexity
//!
//! | Operation   | Cost           |
//! |-------------|----------------|
//! | `add`       | O(1) amortized |
//! | `remove`    | O(n)           |
//! | `contains`  | O(1)           |
//! | `at`        | O(1)           |
//! | `index_of`  | O(1)           |
//! | `sort`      | O(n log n)     |
//! | `iterate`   | O(n)           |
//!
//! Removal deletes the element's slot and renumbers every element at a higher
//! position, preserving the dense invariant. Callers that remove frequently
//! from large ordered sets pay that O(n) cost; the simple invariant is the
//! deliberate trade-off over removal speed.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
#[cfg(feature = "serde")]
use std::marker::PhantomData;
use std::slice;
use std::vec;

use super::DefaultHashBuilder;
use crate::contract::{OrderedSet, Set};

/// A set that maintains the insertion order of its elements.
///
/// Each present element has exactly one integer position in
/// `[0, cardinality)`; the position is assigned by insertion order unless
/// [`sort`](OrderedSet::sort) has reordered the sequence.
///
/// # Iteration safety
///
/// Instances are not synchronized. Within one thread the borrow checker
/// forbids mutation while an iteration borrows the set; for shared multi-
/// threaded use, wrap the set in a
/// [`LockedSet`](crate::concurrent::LockedSet) or
/// [`RwLockedSet`](crate::concurrent::RwLockedSet).
///
/// # Examples
///
/// ```rust
/// use setkit::collections::IndexedSet;
/// use setkit::contract::{OrderedSet, Set};
///
/// let mut set: IndexedSet<i32> = [5, 3, 2].into_iter().collect();
/// assert_eq!(set.at(1), Some(3));
///
/// // Removal renumbers the elements above the removed slot.
/// set.remove(&3);
/// assert_eq!(set.index_of(&2), Some(1));
/// ```
#[derive(Clone)]
pub struct IndexedSet<T> {
    values: Vec<T>,
    index: HashMap<T, usize, DefaultHashBuilder>,
}

impl<T> IndexedSet<T> {
    /// Creates a new empty set.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use setkit::collections::IndexedSet;
    /// use setkit::contract::Set;
    ///
    /// let set: IndexedSet<i32> = IndexedSet::new();
    /// assert!(set.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            values: Vec::new(),
            index: HashMap::default(),
        }
    }

    /// Returns the elements as a slice in presentation order.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.values
    }

    /// Returns an iterator over the elements in presentation order.
    ///
    /// This external iterator borrows the set, so the set cannot be mutated
    /// until the iterator is dropped.
    #[inline]
    pub fn iter(&self) -> IndexedSetIterator<'_, T> {
        IndexedSetIterator {
            inner: self.values.iter(),
        }
    }
}

impl<T: Clone + Eq + Hash> IndexedSet<T> {
    /// Forward sequence and reverse index agree exactly.
    fn reverse_index_agrees(&self) -> bool {
        self.values.len() == self.index.len()
            && self
                .values
                .iter()
                .enumerate()
                .all(|(position, element)| self.index.get(element) == Some(&position))
    }
}

impl<T: Clone + Eq + Hash> Set for IndexedSet<T> {
    type Element = T;

    fn add(&mut self, element: T) -> bool {
        if self.index.contains_key(&element) {
            return false;
        }
        self.index.insert(element.clone(), self.values.len());
        self.values.push(element);
        true
    }

    fn remove(&mut self, element: &T) -> bool {
        let Some(position) = self.index.remove(element) else {
            return false;
        };
        self.values.remove(position);
        // Renumber everything that slid down one slot.
        for shifted in &self.values[position..] {
            if let Some(recorded) = self.index.get_mut(shifted) {
                *recorded -= 1;
            }
        }
        debug_assert!(self.reverse_index_agrees());
        true
    }

    #[inline]
    fn contains(&self, element: &T) -> bool {
        self.index.contains_key(element)
    }

    #[inline]
    fn cardinality(&self) -> usize {
        self.values.len()
    }

    fn clear(&mut self) -> usize {
        let removed = self.values.len();
        self.values.clear();
        self.index.clear();
        removed
    }

    #[inline]
    fn new_empty(&self) -> Self {
        Self::new()
    }

    fn iterate<F>(&self, mut consumer: F)
    where
        F: FnMut(&T) -> bool,
    {
        for element in &self.values {
            if !consumer(element) {
                return;
            }
        }
    }
}

impl<T: Clone + Eq + Hash + Ord> OrderedSet for IndexedSet<T> {
    fn ordered<F>(&self, mut consumer: F)
    where
        F: FnMut(usize, &T) -> bool,
    {
        for (position, element) in self.values.iter().enumerate() {
            if !consumer(position, element) {
                return;
            }
        }
    }

    fn backwards<F>(&self, mut consumer: F)
    where
        F: FnMut(usize, &T) -> bool,
    {
        for (position, element) in self.values.iter().enumerate().rev() {
            if !consumer(position, element) {
                return;
            }
        }
    }

    #[inline]
    fn at(&self, position: usize) -> Option<T> {
        self.values.get(position).cloned()
    }

    #[inline]
    fn index_of(&self, element: &T) -> Option<usize> {
        self.index.get(element).copied()
    }

    fn sort(&mut self) {
        self.values.sort_unstable();
        for (position, element) in self.values.iter().enumerate() {
            if let Some(recorded) = self.index.get_mut(element) {
                *recorded = position;
            }
        }
        debug_assert!(self.reverse_index_agrees());
    }

    #[inline]
    fn new_empty_ordered(&self) -> Self {
        Self::new()
    }
}

// =============================================================================
// Iterators
// =============================================================================

/// Borrowing iterator over an [`IndexedSet`], in presentation order.
pub struct IndexedSetIterator<'a, T> {
    inner: slice::Iter<'a, T>,
}

impl<'a, T> Iterator for IndexedSetIterator<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for IndexedSetIterator<'_, T> {
    #[inline]
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<T> DoubleEndedIterator for IndexedSetIterator<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

/// Owning iterator over an [`IndexedSet`], in presentation order.
pub struct IndexedSetIntoIterator<T> {
    inner: vec::IntoIter<T>,
}

impl<T> Iterator for IndexedSetIntoIterator<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for IndexedSetIntoIterator<T> {
    #[inline]
    fn len(&self) -> usize {
        self.inner.len()
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T> Default for IndexedSet<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Eq + Hash> FromIterator<T> for IndexedSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iterable: I) -> Self {
        let mut set = Self::new();
        for element in iterable {
            set.add(element);
        }
        set
    }
}

impl<T: Clone + Eq + Hash> Extend<T> for IndexedSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iterable: I) {
        for element in iterable {
            self.add(element);
        }
    }
}

impl<T> IntoIterator for IndexedSet<T> {
    type Item = T;
    type IntoIter = IndexedSetIntoIterator<T>;

    fn into_iter(self) -> Self::IntoIter {
        IndexedSetIntoIterator {
            inner: self.values.into_iter(),
        }
    }
}

impl<'a, T> IntoIterator for &'a IndexedSet<T> {
    type Item = &'a T;
    type IntoIter = IndexedSetIterator<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Sequence equality: same elements in the same presentation order.
///
/// Membership-only comparison is [`algebra::equal`](crate::algebra::equal).
impl<T: PartialEq> PartialEq for IndexedSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

impl<T: Eq> Eq for IndexedSet<T> {}

impl<T: fmt::Debug> fmt::Debug for IndexedSet<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.values.iter()).finish()
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for IndexedSet<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;
        let mut sequence = serializer.serialize_seq(Some(self.values.len()))?;
        for element in &self.values {
            sequence.serialize_element(element)?;
        }
        sequence.end()
    }
}

#[cfg(feature = "serde")]
struct IndexedSetVisitor<T> {
    marker: PhantomData<T>,
}

#[cfg(feature = "serde")]
impl<T> IndexedSetVisitor<T> {
    const fn new() -> Self {
        Self {
            marker: PhantomData,
        }
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::de::Visitor<'de> for IndexedSetVisitor<T>
where
    T: serde::Deserialize<'de> + Clone + Eq + Hash,
{
    type Value = IndexedSet<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a sequence of set elements")
    }

    fn visit_seq<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        let mut set = IndexedSet::new();
        while let Some(element) = access.next_element()? {
            set.add(element);
        }
        Ok(set)
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::Deserialize<'de> for IndexedSet<T>
where
    T: serde::Deserialize<'de> + Clone + Eq + Hash,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_seq(IndexedSetVisitor::new())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn ordered_pairs(set: &IndexedSet<i32>) -> Vec<(usize, i32)> {
        let mut pairs = Vec::new();
        set.ordered(|position, element| {
            pairs.push((position, *element));
            true
        });
        pairs
    }

    // =========================================================================
    // insertion order
    // =========================================================================

    #[rstest]
    fn add_preserves_insertion_order() {
        let set: IndexedSet<i32> = [5, 3, 2].into_iter().collect();
        assert_eq!(set.as_slice(), &[5, 3, 2]);
    }

    #[rstest]
    fn first_insertion_determines_position() {
        let mut set: IndexedSet<i32> = [5, 3].into_iter().collect();
        assert!(!set.add(5));
        assert_eq!(set.index_of(&5), Some(0));
    }

    #[rstest]
    fn batched_adds_append_only_new_elements() {
        let mut set: IndexedSet<i32> = [5, 3].into_iter().collect();
        set.extend([2, 4, 1]);
        set.extend([5, 6, 1]);
        assert_eq!(set.as_slice(), &[5, 3, 2, 4, 1, 6]);
    }

    // =========================================================================
    // removal and renumbering
    // =========================================================================

    #[rstest]
    fn remove_renumbers_higher_positions() {
        let mut set: IndexedSet<i32> = (0..5).collect();
        assert!(set.remove(&2));
        assert_eq!(set.as_slice(), &[0, 1, 3, 4]);
        assert_eq!(set.index_of(&3), Some(2));
        assert_eq!(set.index_of(&4), Some(3));
    }

    #[rstest]
    fn remove_first_element_renumbers_everything() {
        let mut set: IndexedSet<i32> = (0..4).collect();
        assert!(set.remove(&0));
        assert_eq!(set.as_slice(), &[1, 2, 3]);
        assert_eq!(set.index_of(&1), Some(0));
    }

    #[rstest]
    fn remove_last_element_renumbers_nothing() {
        let mut set: IndexedSet<i32> = (0..4).collect();
        assert!(set.remove(&3));
        assert_eq!(set.as_slice(), &[0, 1, 2]);
        assert_eq!(set.index_of(&2), Some(2));
    }

    #[rstest]
    fn remove_absent_element_returns_false() {
        let mut set: IndexedSet<i32> = (0..4).collect();
        assert!(!set.remove(&9));
        assert_eq!(set.cardinality(), 4);
    }

    #[rstest]
    fn readd_after_remove_goes_to_the_end() {
        let mut set: IndexedSet<i32> = (0..4).collect();
        set.remove(&1);
        set.add(1);
        assert_eq!(set.as_slice(), &[0, 2, 3, 1]);
    }

    // =========================================================================
    // positional access
    // =========================================================================

    #[rstest]
    fn at_returns_element_at_position() {
        let set: IndexedSet<i32> = [5, 3, 2].into_iter().collect();
        assert_eq!(set.at(0), Some(5));
        assert_eq!(set.at(2), Some(2));
    }

    #[rstest]
    fn at_out_of_range_returns_none() {
        let set: IndexedSet<i32> = [5, 3].into_iter().collect();
        assert_eq!(set.at(2), None);
        assert_eq!(set.at(usize::MAX), None);
    }

    #[rstest]
    fn index_of_absent_element_returns_none() {
        let set: IndexedSet<i32> = [5, 3].into_iter().collect();
        assert_eq!(set.index_of(&9), None);
    }

    // =========================================================================
    // sort
    // =========================================================================

    #[rstest]
    fn sort_reorders_in_place_and_rebuilds_index() {
        let mut set: IndexedSet<i32> = [5, 3, 2, 4].into_iter().collect();
        set.sort();
        assert_eq!(set.as_slice(), &[2, 3, 4, 5]);
        assert_eq!(set.index_of(&2), Some(0));
        assert_eq!(set.index_of(&5), Some(3));
    }

    #[rstest]
    fn additions_after_sort_append_to_the_end() {
        let mut set: IndexedSet<i32> = [5, 3].into_iter().collect();
        set.sort();
        set.add(1);
        assert_eq!(set.as_slice(), &[3, 5, 1]);
    }

    // =========================================================================
    // ordered / backwards iteration
    // =========================================================================

    #[rstest]
    fn ordered_yields_ascending_positions() {
        let set: IndexedSet<i32> = [5, 3, 2].into_iter().collect();
        assert_eq!(ordered_pairs(&set), vec![(0, 5), (1, 3), (2, 2)]);
    }

    #[rstest]
    fn backwards_yields_descending_positions() {
        let set: IndexedSet<i32> = [5, 3, 2].into_iter().collect();
        let mut pairs = Vec::new();
        set.backwards(|position, element| {
            pairs.push((position, *element));
            true
        });
        assert_eq!(pairs, vec![(2, 2), (1, 3), (0, 5)]);
    }

    #[rstest]
    fn ordered_supports_early_termination() {
        let set: IndexedSet<i32> = (0..100).collect();
        let mut yielded = 0;
        set.ordered(|_, _| {
            yielded += 1;
            yielded < 2
        });
        assert_eq!(yielded, 2);
    }

    // =========================================================================
    // contract operations
    // =========================================================================

    #[rstest]
    fn clear_returns_previous_cardinality() {
        let mut set: IndexedSet<i32> = (0..3).collect();
        assert_eq!(set.clear(), 3);
        assert!(set.is_empty());
        assert_eq!(set.index_of(&0), None);
    }

    #[rstest]
    fn clone_is_independent_of_original() {
        let original: IndexedSet<i32> = [5, 3].into_iter().collect();
        let mut copy = original.clone();
        copy.add(2);
        assert_eq!(original.as_slice(), &[5, 3]);
        assert_eq!(copy.as_slice(), &[5, 3, 2]);
    }

    #[rstest]
    fn clone_preserves_order() {
        let original: IndexedSet<i32> = [5, 3, 2].into_iter().collect();
        assert_eq!(original.clone(), original);
    }

    #[rstest]
    fn new_empty_ordered_is_empty_and_ordered() {
        let set: IndexedSet<i32> = [5, 3].into_iter().collect();
        let mut empty = set.new_empty_ordered();
        assert!(empty.is_empty());
        empty.add(1);
        assert_eq!(empty.at(0), Some(1));
    }

    #[rstest]
    fn sequence_equality_requires_same_order() {
        let forward: IndexedSet<i32> = [1, 2].into_iter().collect();
        let reverse: IndexedSet<i32> = [2, 1].into_iter().collect();
        assert_ne!(forward, reverse);
    }

    #[rstest]
    fn external_iterators_follow_presentation_order() {
        let set: IndexedSet<i32> = [5, 3, 2].into_iter().collect();
        let borrowed: Vec<i32> = set.iter().copied().collect();
        let owned: Vec<i32> = set.into_iter().collect();
        assert_eq!(borrowed, vec![5, 3, 2]);
        assert_eq!(owned, vec![5, 3, 2]);
    }
}
