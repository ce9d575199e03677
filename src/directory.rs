//! A directory of queues and a k-way merge across them.

use std::fmt;
use std::iter::FusedIterator;

use crate::list::{iterator, List};
use crate::queue::Queue;

/// One registered queue together with its cached element count.
///
/// The cached size spares the merge loop from recounting queues between
/// rounds; it is updated whenever a merge moves elements between entries.
#[derive(Debug)]
pub struct Entry {
    queue: Queue,
    size: usize,
}

impl Entry {
    /// The registered queue.
    pub fn queue(&self) -> &Queue {
        &self.queue
    }

    /// The cached number of elements in the queue.
    pub fn size(&self) -> usize {
        self.size
    }
}

/// An ordered collection of independently owned queues, kept on the same
/// cyclic list structure as the queues themselves.
///
/// Its purpose is [`Directory::merge_all`]: a k-way merge that drains every
/// registered queue into the first one.
pub struct Directory {
    entries: List<Entry>,
}

impl Directory {
    /// Create an empty `Directory`.
    #[inline]
    pub fn new() -> Self {
        Self {
            entries: List::new(),
        }
    }

    /// Returns `true` if no queue has been registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of registered queues, in *O*(*k*) time.
    pub fn len(&self) -> usize {
        self.entries.iter().count()
    }

    /// Takes ownership of a queue and appends it to the directory, caching
    /// its element count.
    pub fn register(&mut self, queue: Queue) {
        let size = queue.iter().count();
        self.entries.push_back(Entry { queue, size });
    }

    /// Provides an iterator over the registered entries, in registration
    /// order.
    #[inline]
    pub fn iter(&self) -> Entries<'_> {
        Entries {
            inner: self.entries.iter(),
        }
    }

    /// Merges every registered queue into the first one and returns the
    /// total number of elements it then holds; the other queues are left
    /// registered but empty, with their cached sizes set to zero.
    ///
    /// The merge runs as a tournament: each round pairs the first unmerged
    /// entry with the last one and drains the latter into the former, so
    /// every element moves *O*(log *k*) times rather than *O*(*k*).
    /// When every registered queue is sorted, the first queue ends up
    /// sorted; each pairwise merge is [`Queue::merge`], so it is stable
    /// with the earlier-registered queue winning ties.
    ///
    /// Returns 0 if the directory is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::{Directory, Queue};
    /// use std::iter::FromIterator;
    ///
    /// let mut directory = Directory::new();
    /// directory.register(Queue::from_iter(["a", "d"]));
    /// directory.register(Queue::from_iter(["b", "e"]));
    /// directory.register(Queue::from_iter(["c", "f"]));
    ///
    /// assert_eq!(directory.merge_all(), 6);
    /// let merged = directory.into_first().unwrap();
    /// assert_eq!(
    ///     Vec::from_iter(merged.iter()),
    ///     vec!["a", "b", "c", "d", "e", "f"],
    /// );
    /// ```
    pub fn merge_all(&mut self) -> usize {
        if self.entries.is_empty() {
            return 0;
        }
        let head = self.entries.sentinel_node();
        // SAFETY: `start` and `end` always point at element nodes of
        // `entries`, and the inner loop guarantees `start != end` before
        // both are dereferenced mutably.
        unsafe {
            let mut end = head.as_ref().prev;
            while end != head.as_ref().next {
                let mut start = head.as_ref().next;
                while start != end && start.as_ref().prev != end {
                    let winner = &mut (*start.as_ptr()).element;
                    let loser = &mut (*end.as_ptr()).element;
                    winner.queue.merge(&mut loser.queue);
                    winner.size += loser.size;
                    loser.size = 0;
                    start = start.as_ref().next;
                    end = end.as_ref().prev;
                }
            }
            head.as_ref().next.as_ref().element.size
        }
    }

    /// Consumes the directory and returns the first registered queue, or
    /// `None` if the directory is empty.
    pub fn into_first(mut self) -> Option<Queue> {
        self.entries.pop_front().map(|entry| entry.queue)
    }
}

impl fmt::Debug for Directory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl Default for Directory {
    fn default() -> Self {
        Self::new()
    }
}

/// An iterator over the entries of a [`Directory`].
#[derive(Clone, Debug)]
pub struct Entries<'a> {
    inner: iterator::Iter<'a, Entry>,
}

impl<'a> Iterator for Entries<'a> {
    type Item = &'a Entry;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a> DoubleEndedIterator for Entries<'a> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

#[cfg(feature = "length")]
impl<'a> ExactSizeIterator for Entries<'a> {}

impl<'a> FusedIterator for Entries<'a> {}

impl<'a> IntoIterator for &'a Directory {
    type Item = &'a Entry;
    type IntoIter = Entries<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::Directory;
    use crate::queue::Queue;
    use std::iter::FromIterator;

    fn contents(queue: &Queue) -> Vec<&str> {
        Vec::from_iter(queue.iter())
    }

    #[test]
    fn merge_all_on_empty_and_singleton() {
        let mut directory = Directory::new();
        assert!(directory.is_empty());
        assert_eq!(directory.merge_all(), 0);
        assert_eq!(directory.into_first().map(|q| q.is_empty()), None);

        let mut directory = Directory::new();
        directory.register(Queue::from_iter(["b", "a"]));
        assert_eq!(directory.len(), 1);
        // a single queue is already the result; it is not re-sorted
        assert_eq!(directory.merge_all(), 2);
        let only = directory.into_first().unwrap();
        assert_eq!(contents(&only), vec!["b", "a"]);
    }

    #[test]
    fn merge_all_drains_later_queues_into_the_first() {
        let mut directory = Directory::new();
        directory.register(Queue::from_iter(["b", "e", "h"]));
        directory.register(Queue::from_iter(["c", "f"]));
        directory.register(Queue::from_iter(["a", "d", "g", "i"]));

        let sizes: Vec<usize> = directory.iter().map(|e| e.size()).collect();
        assert_eq!(sizes, vec![3, 2, 4]);

        assert_eq!(directory.merge_all(), 9);

        let sizes: Vec<usize> = directory.iter().map(|e| e.size()).collect();
        assert_eq!(sizes, vec![9, 0, 0]);
        for entry in directory.iter().skip(1) {
            assert!(entry.queue().is_empty());
        }

        let merged = directory.into_first().unwrap();
        assert_eq!(
            contents(&merged),
            vec!["a", "b", "c", "d", "e", "f", "g", "h", "i"],
        );
    }

    #[test]
    fn merge_all_keeps_earlier_queues_first_on_ties() {
        let mut directory = Directory::new();
        directory.register(Queue::from_iter(["a", "b"]));
        directory.register(Queue::from_iter(["a", "b"]));
        assert_eq!(directory.merge_all(), 4);
        let merged = directory.into_first().unwrap();
        assert_eq!(contents(&merged), vec!["a", "a", "b", "b"]);
    }

    #[test]
    fn merge_all_tolerates_empty_queues() {
        let mut directory = Directory::new();
        directory.register(Queue::new());
        directory.register(Queue::from_iter(["a", "c"]));
        directory.register(Queue::new());
        directory.register(Queue::from_iter(["b"]));
        assert_eq!(directory.merge_all(), 3);
        let merged = directory.into_first().unwrap();
        assert_eq!(contents(&merged), vec!["a", "b", "c"]);
    }
}
