//! A double-ended string queue with in-place structural transforms.

use std::fmt;
use std::iter::{FromIterator, FusedIterator};

use crate::list::{iterator, List};

/// A queue of owned strings on a cyclic doubly-linked list.
///
/// Elements can be inserted and removed at both ends in *O*(1) time. Every
/// inserted string is copied into a node owned by the queue, so the queue
/// never borrows caller memory. All transforms rearrange the queue by
/// relinking nodes; payloads are never copied after insertion.
///
/// String comparison is byte-wise lexicographic (`str`'s `Ord`), everywhere:
/// `"10"` sorts before `"9"`.
pub struct Queue {
    list: List<Box<str>>,
}

impl Queue {
    /// Create an empty `Queue`.
    #[inline]
    pub fn new() -> Self {
        Self { list: List::new() }
    }

    /// Returns `true` if the `Queue` is empty, in *O*(1) time.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Returns the number of elements in the `Queue`, in *O*(1) time.
    /// Enabled by `feature = "length"`.
    #[cfg(feature = "length")]
    #[inline]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Removes all elements from the `Queue` in *O*(*n*) time.
    #[inline]
    pub fn clear(&mut self) {
        self.list.clear();
    }

    /// Returns `true` if the `Queue` contains an element equal to the given
    /// string, in *O*(*n*) time.
    pub fn contains(&self, x: &str) -> bool {
        self.iter().any(|s| s == x)
    }

    /// Provides a reference to the front element, or `None` if the queue is
    /// empty.
    #[inline]
    pub fn front(&self) -> Option<&str> {
        self.list.front().map(|s| &**s)
    }

    /// Provides a reference to the back element, or `None` if the queue is
    /// empty.
    #[inline]
    pub fn back(&self) -> Option<&str> {
        self.list.back().map(|s| &**s)
    }

    /// Copies the string into a new node and adds it at the front, in *O*(1)
    /// time (plus the copy).
    pub fn push_front(&mut self, s: &str) {
        self.list.push_front(s.into());
    }

    /// Copies the string into a new node and adds it at the back, in *O*(1)
    /// time (plus the copy).
    pub fn push_back(&mut self, s: &str) {
        self.list.push_back(s.into());
    }

    /// Removes the front element and returns its payload, or `None` if the
    /// queue is empty. *O*(1) time.
    pub fn pop_front(&mut self) -> Option<Box<str>> {
        self.list.pop_front()
    }

    /// Removes the back element and returns its payload, or `None` if the
    /// queue is empty. *O*(1) time.
    pub fn pop_back(&mut self) -> Option<Box<str>> {
        self.list.pop_back()
    }

    /// Provides a reference to the element at the given index, or `None` if
    /// `at` is out of bounds. *O*(*n*) time.
    pub fn get(&self, at: usize) -> Option<&str> {
        let mut cursor = self.list.cursor_start();
        cursor.seek_to(at).ok()?;
        cursor.current().map(|s| &**s)
    }

    /// Provides a forward iterator over the elements.
    #[inline]
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.list.iter(),
        }
    }

    /// Moves all elements from `other` to the end of the queue, reusing its
    /// nodes. After this operation, `other` becomes empty.
    ///
    /// *O*(1) time and memory.
    pub fn append(&mut self, other: &mut Self) {
        self.list.append(&mut other.list);
    }

    /// Moves all elements from `other` to the beginning of the queue,
    /// reusing its nodes. After this operation, `other` becomes empty.
    ///
    /// *O*(1) time and memory.
    pub fn prepend(&mut self, other: &mut Self) {
        self.list.prepend(&mut other.list);
    }

    /// Splits the queue into two at the given index. Returns everything
    /// after the given index (inclusive).
    ///
    /// # Panics
    ///
    /// Panics if `at > len`.
    pub fn split_off(&mut self, at: usize) -> Queue {
        Queue {
            list: self.list.split_off(at),
        }
    }

    /// Copies the string into a new node at the given index, in *O*(*n*)
    /// time.
    ///
    /// # Panics
    ///
    /// Panics if `at > len`.
    pub fn insert(&mut self, at: usize, s: &str) {
        self.list.insert(at, s.into());
    }

    /// Removes the element at the given index and returns its payload, in
    /// *O*(*n*) time.
    ///
    /// # Panics
    ///
    /// Panics if `at >= len`.
    pub fn remove(&mut self, at: usize) -> Box<str> {
        self.list.remove(at)
    }

    /// Splices another queue at the given index, in *O*(*n*) time (finding
    /// the position) plus *O*(1) relinking.
    ///
    /// # Panics
    ///
    /// Panics if `at > len`.
    pub fn splice_at(&mut self, at: usize, other: Queue) {
        self.list.splice_at(at, other.list);
    }
}

// whole-queue transforms
impl Queue {
    /// Removes the element at index ⌊*n*/2⌋ (0-indexed from the front) and
    /// returns its payload, or returns `None` if the queue is empty.
    /// *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    /// use std::iter::FromIterator;
    ///
    /// let mut queue = Queue::from_iter(["a", "b", "c", "d", "e"]);
    /// assert_eq!(queue.pop_middle().as_deref(), Some("c"));
    ///
    /// let mut queue = Queue::from_iter(["a", "b", "c", "d"]);
    /// assert_eq!(queue.pop_middle().as_deref(), Some("c"));
    /// ```
    pub fn pop_middle(&mut self) -> Option<Box<str>> {
        self.list.pop_middle()
    }

    /// Deletes every maximal run of two or more consecutive equal elements,
    /// the first occurrence included. *O*(*n*) time.
    ///
    /// Equality is only recognized between adjacent elements, so this is
    /// most useful on a sorted queue, where it removes every string that
    /// occurs more than once.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    /// use std::iter::FromIterator;
    ///
    /// let mut queue = Queue::from_iter(["1", "2", "2", "3"]);
    /// queue.dedup_runs();
    /// assert_eq!(Vec::from_iter(queue.iter()), vec!["1", "3"]);
    /// ```
    pub fn dedup_runs(&mut self) {
        self.list.dedup_runs();
    }

    /// Exchanges the elements of each adjacent pair; a final unpaired
    /// element stays put. *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    /// use std::iter::FromIterator;
    ///
    /// let mut queue = Queue::from_iter(["a", "b", "c", "d", "e"]);
    /// queue.swap_pairs();
    /// assert_eq!(Vec::from_iter(queue.iter()), vec!["b", "a", "d", "c", "e"]);
    /// ```
    pub fn swap_pairs(&mut self) {
        self.list.swap_pairs();
    }

    /// Reverses the order of the elements in place, in *O*(*n*) time.
    pub fn reverse(&mut self) {
        self.list.reverse();
    }

    /// Reverses every contiguous run of exactly `k` elements, left to
    /// right; a trailing run shorter than `k` keeps its original order.
    /// `k <= 1` is a no-op. *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    /// use std::iter::FromIterator;
    ///
    /// let mut queue = Queue::from_iter(["a", "b", "c", "d", "e"]);
    /// queue.reverse_chunks(2);
    /// assert_eq!(Vec::from_iter(queue.iter()), vec!["b", "a", "d", "c", "e"]);
    /// ```
    pub fn reverse_chunks(&mut self, k: usize) {
        self.list.reverse_chunks(k);
    }

    /// Merges the already-sorted `other` into this already-sorted queue;
    /// `other` becomes empty. *O*(*n* + *m*) time.
    ///
    /// The merge is stable: on equal strings, the element of `self` comes
    /// first. If either queue is not sorted the result is some interleaving
    /// of the two, with all elements present.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    /// use std::iter::FromIterator;
    ///
    /// let mut left = Queue::from_iter(["a", "c", "e"]);
    /// let mut right = Queue::from_iter(["b", "d", "f"]);
    /// left.merge(&mut right);
    /// assert!(right.is_empty());
    /// assert_eq!(
    ///     Vec::from_iter(left.iter()),
    ///     vec!["a", "b", "c", "d", "e", "f"],
    /// );
    /// ```
    pub fn merge(&mut self, other: &mut Self) {
        self.list.merge(&mut other.list);
    }

    /// Sorts the queue in ascending byte-wise lexicographic order, in
    /// *O*(*n* log *n*) time by an in-place merge sort.
    ///
    /// The sort is stable (equal strings keep their relative order) and
    /// relinks nodes instead of copying payloads.
    pub fn sort(&mut self) {
        self.list.sort();
    }

    /// Deletes every element that has a strictly greater element anywhere
    /// to its right, and returns the number of surviving elements. The
    /// survivors form a non-increasing sequence. *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Queue;
    /// use std::iter::FromIterator;
    ///
    /// let mut queue = Queue::from_iter(["d", "a", "e", "c", "b"]);
    /// assert_eq!(queue.retain_right_maxima(), 3);
    /// assert_eq!(Vec::from_iter(queue.iter()), vec!["e", "c", "b"]);
    /// ```
    pub fn retain_right_maxima(&mut self) -> usize {
        self.list.retain_right_maxima()
    }
}

impl fmt::Debug for Queue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl Default for Queue {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Queue {
    fn clone(&self) -> Self {
        Self {
            list: self.list.clone(),
        }
    }
}

impl PartialEq for Queue {
    fn eq(&self, other: &Self) -> bool {
        self.list == other.list
    }
}

impl Eq for Queue {}

impl<S: Into<Box<str>>> FromIterator<S> for Queue {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut queue = Queue::new();
        queue.extend(iter);
        queue
    }
}

impl<S: Into<Box<str>>> Extend<S> for Queue {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        iter.into_iter()
            .for_each(|item| self.list.push_back(item.into()));
    }
}

/// An iterator over the elements of a [`Queue`].
#[derive(Clone, Debug)]
pub struct Iter<'a> {
    inner: iterator::Iter<'a, Box<str>>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|s| &**s)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a> DoubleEndedIterator for Iter<'a> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|s| &**s)
    }
}

#[cfg(feature = "length")]
impl<'a> ExactSizeIterator for Iter<'a> {}

impl<'a> FusedIterator for Iter<'a> {}

/// An owning iterator over the elements of a [`Queue`].
#[derive(Debug)]
pub struct IntoIter {
    inner: iterator::IntoIter<Box<str>>,
}

impl Iterator for IntoIter {
    type Item = Box<str>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for IntoIter {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

#[cfg(feature = "length")]
impl ExactSizeIterator for IntoIter {}

impl FusedIterator for IntoIter {}

impl IntoIterator for Queue {
    type Item = Box<str>;
    type IntoIter = IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.list.into_iter(),
        }
    }
}

impl<'a> IntoIterator for &'a Queue {
    type Item = &'a str;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
