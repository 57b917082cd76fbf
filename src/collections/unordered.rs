//! Unordered hash-backed set.
//!
//! [`UnorderedSet`] stores elements as keys of a hash table with a unit
//! marker as the value, giving one hash lookup per point operation and no
//! ordering guarantee whatsoever. It is the default choice when iteration
//! order does not matter.
//!
//! Not safe for concurrent use without a wrapper; see the
//! [`concurrent`](crate::concurrent) module.

use std::collections::HashMap;
use std::collections::hash_map;
use std::fmt;
use std::hash::Hash;
#[cfg(feature = "serde")]
use std::marker::PhantomData;

use super::DefaultHashBuilder;
use crate::contract::Set;

/// A set of unique elements backed by a hash table.
///
/// Point operations (`add`, `remove`, `contains`) are single hash lookups.
/// Enumeration order is unspecified and may vary between passes.
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
/// use setkit::collections::UnorderedSet;
/// use setkit::contract::Set;
///
/// let mut set: UnorderedSet<i32> = [1, 2, 3].into_iter().collect();
/// assert!(set.contains(&2));
/// assert!(set.remove(&2));
/// assert_eq!(set.cardinality(), 2);
/// ```
#[derive(Clone)]
pub struct UnorderedSet<T> {
    table: HashMap<T, (), DefaultHashBuilder>,
}

impl<T> UnorderedSet<T> {
    /// Creates a new empty set.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use setkit::collections::UnorderedSet;
    /// use setkit::contract::Set;
    ///
    /// let set: UnorderedSet<i32> = UnorderedSet::new();
    /// assert!(set.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            table: HashMap::default(),
        }
    }

    /// Returns an iterator over the elements, in unspecified order.
    ///
    /// This external iterator borrows the set, so the set cannot be mutated
    /// until the iterator is dropped.
    #[inline]
    pub fn iter(&self) -> UnorderedSetIterator<'_, T> {
        UnorderedSetIterator {
            inner: self.table.keys(),
        }
    }
}

impl<T: Clone + Eq + Hash> Set for UnorderedSet<T> {
    type Element = T;

    #[inline]
    fn add(&mut self, element: T) -> bool {
        self.table.insert(element, ()).is_none()
    }

    #[inline]
    fn remove(&mut self, element: &T) -> bool {
        self.table.remove(element).is_some()
    }

    #[inline]
    fn contains(&self, element: &T) -> bool {
        self.table.contains_key(element)
    }

    #[inline]
    fn cardinality(&self) -> usize {
        self.table.len()
    }

    fn clear(&mut self) -> usize {
        let removed = self.table.len();
        self.table.clear();
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
        for element in self.table.keys() {
            if !consumer(element) {
                return;
            }
        }
    }
}

// =============================================================================
// Iterators
// =============================================================================

/// Borrowing iterator over an [`UnorderedSet`], in unspecified order.
pub struct UnorderedSetIterator<'a, T> {
    inner: hash_map::Keys<'a, T, ()>,
}

impl<'a, T> Iterator for UnorderedSetIterator<'a, T> {
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

impl<T> ExactSizeIterator for UnorderedSetIterator<'_, T> {
    #[inline]
    fn len(&self) -> usize {
        self.inner.len()
    }
}

/// Owning iterator over an [`UnorderedSet`], in unspecified order.
pub struct UnorderedSetIntoIterator<T> {
    inner: hash_map::IntoKeys<T, ()>,
}

impl<T> Iterator for UnorderedSetIntoIterator<T> {
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

impl<T> ExactSizeIterator for UnorderedSetIntoIterator<T> {
    #[inline]
    fn len(&self) -> usize {
        self.inner.len()
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T> Default for UnorderedSet<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Eq + Hash> FromIterator<T> for UnorderedSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iterable: I) -> Self {
        let mut set = Self::new();
        for element in iterable {
            set.add(element);
        }
        set
    }
}

impl<T: Clone + Eq + Hash> Extend<T> for UnorderedSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iterable: I) {
        for element in iterable {
            self.add(element);
        }
    }
}

impl<T> IntoIterator for UnorderedSet<T> {
    type Item = T;
    type IntoIter = UnorderedSetIntoIterator<T>;

    fn into_iter(self) -> Self::IntoIter {
        UnorderedSetIntoIterator {
            inner: self.table.into_keys(),
        }
    }
}

impl<'a, T> IntoIterator for &'a UnorderedSet<T> {
    type Item = &'a T;
    type IntoIter = UnorderedSetIterator<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Clone + Eq + Hash> PartialEq for UnorderedSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.table.len() == other.table.len()
            && self.table.keys().all(|element| other.table.contains_key(element))
    }
}

impl<T: Clone + Eq + Hash> Eq for UnorderedSet<T> {}

impl<T: fmt::Debug> fmt::Debug for UnorderedSet<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.table.keys()).finish()
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T: serde::Serialize + Clone + Eq + Hash> serde::Serialize for UnorderedSet<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;
        let mut sequence = serializer.serialize_seq(Some(self.table.len()))?;
        for element in self.table.keys() {
            sequence.serialize_element(element)?;
        }
        sequence.end()
    }
}

#[cfg(feature = "serde")]
struct UnorderedSetVisitor<T> {
    marker: PhantomData<T>,
}

#[cfg(feature = "serde")]
impl<T> UnorderedSetVisitor<T> {
    const fn new() -> Self {
        Self {
            marker: PhantomData,
        }
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::de::Visitor<'de> for UnorderedSetVisitor<T>
where
    T: serde::Deserialize<'de> + Clone + Eq + Hash,
{
    type Value = UnorderedSet<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a sequence of set elements")
    }

    fn visit_seq<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        let mut set = UnorderedSet::new();
        while let Some(element) = access.next_element()? {
            set.add(element);
        }
        Ok(set)
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::Deserialize<'de> for UnorderedSet<T>
where
    T: serde::Deserialize<'de> + Clone + Eq + Hash,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_seq(UnorderedSetVisitor::new())
    }
}

// =============================================================================
// Tests
// =============================================================================
