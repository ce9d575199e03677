use std::fmt;
use std::fmt::Formatter;
use std::ptr::NonNull;

use crate::error::SeekError;
use crate::list::{List, Node};

/// A cursor over a `List`.
///
/// A `Cursor` is like an iterator, except that it can freely seek
/// back-and-forth.
///
/// In a list with length *n*, there are *n* + 1 valid locations for the
/// cursor, indexed by 0, 1, ..., *n*, where *n* is the sentinel node of the
/// list.
pub(crate) struct Cursor<'a, T: 'a> {
    #[cfg(feature = "length")]
    index: usize,
    pub(crate) current: NonNull<Node<T>>,
    pub(crate) list: &'a List<T>,
}

/// A cursor over a `List` with editing operations.
///
/// A `CursorMut` is like an iterator, except that it can freely seek
/// back-and-forth, and can safely mutate the list during iteration. The
/// lifetime of its yielded references is tied to its own lifetime, so a
/// cursor cannot yield multiple elements at once.
pub(crate) struct CursorMut<'a, T: 'a> {
    #[cfg(feature = "length")]
    index: usize,
    pub(crate) current: NonNull<Node<T>>,
    pub(crate) list: &'a mut List<T>,
}

macro_rules! impl_cursor {
    ($CURSOR:ident) => {
        // Private methods
        impl<'a, T: 'a> $CURSOR<'a, T> {
            pub(crate) fn is_sentinel_node(&self) -> bool {
                self.current == self.list.sentinel_node()
            }
            pub(crate) fn is_front_node(&self) -> bool {
                self.prev_node() == self.list.sentinel_node()
            }
            pub(crate) fn next_node(&self) -> NonNull<Node<T>> {
                // SAFETY: `current.next` is always valid since it is a cyclic list.
                unsafe { self.current.as_ref().next }
            }
            pub(crate) fn prev_node(&self) -> NonNull<Node<T>> {
                // SAFETY: `current.prev` is always valid since it is a cyclic list.
                unsafe { self.current.as_ref().prev }
            }

            /// Move forward the cursor by given steps, without checking
            /// whether it will pass through the sentinel node.
            ///
            /// It is unsafe because if the moving passes through the sentinel
            /// node, the index will be invalid.
            #[cfg(feature = "length")]
            unsafe fn seek_forward_fast(&mut self, steps: usize) {
                self.index = self.index.saturating_add(steps);
                (0..steps).for_each(|_| self.current = self.next_node());
            }

            /// Move backward the cursor by given steps, without checking
            /// whether it will pass through the sentinel node.
            ///
            /// It is unsafe because if the moving passes through the sentinel
            /// node, the index will be invalid.
            #[cfg(feature = "length")]
            unsafe fn seek_backward_fast(&mut self, steps: usize) {
                self.index = self.index.saturating_sub(steps);
                (0..steps).for_each(|_| self.current = self.prev_node());
            }
        }

        impl<'a, T: 'a> $CURSOR<'a, T> {
            #[cfg(feature = "length")]
            /// Return the index of the cursor.
            pub(crate) fn index(&self) -> usize {
                self.index
            }

            /// Returns `true` if the `List` is empty. See [`List::is_empty`].
            pub(crate) fn is_empty(&self) -> bool {
                self.list.is_empty()
            }

            /// Move the cursor to the next position, where passing through
            /// the sentinel node is allowed. *O*(1) time.
            pub(crate) fn move_next_cyclic(&mut self) {
                if self.is_empty() {
                    return;
                }
                #[cfg(feature = "length")]
                if self.is_sentinel_node() {
                    self.index = 0;
                } else {
                    self.index += 1;
                }
                self.current = self.next_node();
            }

            /// Move the cursor to the previous position, where passing
            /// through the sentinel node is allowed. *O*(1) time.
            pub(crate) fn move_prev_cyclic(&mut self) {
                if self.is_empty() {
                    return;
                }
                #[cfg(feature = "length")]
                if self.is_front_node() {
                    self.index = self.list.len();
                } else {
                    self.index -= 1;
                }
                self.current = self.prev_node();
            }

            /// Move the cursor to the next position, or return an error when
            /// the move would pass through the sentinel node. *O*(1) time.
            pub(crate) fn move_next(&mut self) -> Result<(), SeekError> {
                if !self.is_empty() && !self.is_sentinel_node() {
                    self.move_next_cyclic();
                    return Ok(());
                }
                Err(SeekError::new(0))
            }

            /// Move the cursor to the previous position, or return an error
            /// when the move would pass through the sentinel node. *O*(1)
            /// time.
            pub(crate) fn move_prev(&mut self) -> Result<(), SeekError> {
                if !self.is_empty() && !self.is_front_node() {
                    self.move_prev_cyclic();
                    return Ok(());
                }
                Err(SeekError::new(0))
            }

            /// Move forward the cursor by given steps, or return an error
            /// recording the steps actually taken when the sentinel boundary
            /// is hit. On error, the cursor stays at the sentinel node.
            /// *O*(*n*) time.
            pub(crate) fn seek_forward(&mut self, steps: usize) -> Result<(), SeekError> {
                (0..steps).try_for_each(|i| self.move_next().map_err(|_| SeekError::new(i)))
            }

            /// Move backward the cursor by given steps, or return an error
            /// recording the steps actually taken when the sentinel boundary
            /// is hit. On error, the cursor stays at the first node.
            /// *O*(*n*) time.
            pub(crate) fn seek_backward(&mut self, steps: usize) -> Result<(), SeekError> {
                (0..steps).try_for_each(|i| self.move_prev().map_err(|_| SeekError::new(i)))
            }

            /// Move the cursor to the given position `target`, or return an
            /// error when `target > len`. On error, the cursor stays put.
            /// *O*(*n*) time.
            pub(crate) fn seek_to(&mut self, target: usize) -> Result<(), SeekError> {
                #[cfg(not(feature = "length"))]
                {
                    let current = self.current;
                    self.move_to_start();
                    self.seek_forward(target).map_err(|e| {
                        self.current = current;
                        e
                    })
                }
                #[cfg(feature = "length")]
                {
                    if target == self.index {
                        return Ok(());
                    }
                    let len = self.list.len();
                    match target {
                        target if target > len => return Err(SeekError::new(0)),
                        0 => self.move_to_start(),
                        target if target == len => self.move_to_end(),
                        _ => unsafe {
                            // current=c, target=t, sentinel=#
                            if target > self.index {
                                // target is at the right side of current: [   c----->t   #]
                                if target - self.index <= len - target {
                                    // near the right side: [    c-->t     #]
                                    self.seek_forward_fast(target - self.index);
                                } else {
                                    // far from the right side: [ c     t<--#]
                                    self.move_to_end();
                                    self.seek_backward_fast(len - target);
                                }
                            } else {
                                // target is at the left side of current: [   t<-----c   #]
                                if self.index - target <= target {
                                    // near the left side: [    t<--c     #]
                                    self.seek_backward_fast(self.index - target);
                                } else {
                                    // far from the left side: [-->t      c #]
                                    self.move_to_start();
                                    self.seek_forward_fast(target);
                                }
                            }
                        },
                    }
                    Ok(())
                }
            }

            /// Set the cursor to the start of the list (the first node).
            /// *O*(1) time.
            #[inline]
            pub(crate) fn move_to_start(&mut self) {
                #[cfg(feature = "length")]
                {
                    self.index = 0;
                }
                self.current = self.list.front_node();
            }

            /// Set the cursor to the end of the list (the sentinel node).
            /// *O*(1) time.
            #[inline]
            pub(crate) fn move_to_end(&mut self) {
                #[cfg(feature = "length")]
                {
                    self.index = self.list.len();
                }
                self.current = self.list.sentinel_node();
            }

            /// Return an immutable reference to the current node's element,
            /// or `None` if the cursor is at the sentinel node.
            pub(crate) fn current(&self) -> Option<&'a T> {
                if self.is_sentinel_node() {
                    return None;
                }
                // SAFETY: non-sentinel nodes always hold a valid element.
                unsafe { Some(&self.current.as_ref().element) }
            }

            /// Return an immutable reference to the previous node's element,
            /// or `None` if the cursor is at the first node.
            pub(crate) fn previous(&self) -> Option<&'a T> {
                if self.is_front_node() {
                    return None;
                }
                // SAFETY: the previous node of a non-first node is never the
                // sentinel, and non-sentinel nodes always hold a valid
                // element.
                Some(unsafe { &self.prev_node().as_ref().element })
            }
        }

        impl<'a, T: fmt::Debug + 'a> fmt::Debug for $CURSOR<'a, T> {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                let mut f = f.debug_struct(stringify!($CURSOR));
                f.field("list", &self.list)
                    .field("current", &self.current());
                #[cfg(feature = "length")]
                f.field("index", &self.index);
                f.finish()
            }
        }
    };
}

impl_cursor!(CursorMut);
impl_cursor!(Cursor);

impl<'a, T: 'a> Cursor<'a, T> {
    pub(crate) fn new(
        list: &'a List<T>,
        current: NonNull<Node<T>>,
        #[cfg(feature = "length")] index: usize,
    ) -> Self {
        Self {
            #[cfg(feature = "length")]
            index,
            current,
            list,
        }
    }
}

impl<'a, T: 'a> CursorMut<'a, T> {
    pub(crate) fn new(
        list: &'a mut List<T>,
        current: NonNull<Node<T>>,
        #[cfg(feature = "length")] index: usize,
    ) -> Self {
        Self {
            #[cfg(feature = "length")]
            index,
            current,
            list,
        }
    }

    /// Insert a new item before the given node `next`.
    ///
    /// It is unsafe because it does not check whether `next` belongs to the
    /// list the cursor points into.
    unsafe fn insert_before(&mut self, next: NonNull<Node<T>>, item: T) -> NonNull<Node<T>> {
        let node = Node::new_detached(item);
        self.list.attach_node(next.as_ref().prev, next, node);
        node
    }
}

// Methods that might change the linking structure of the list.
impl<'a, T: 'a> CursorMut<'a, T> {
    /// Add an element before the cursor position. After insertion, the
    /// cursor stays put but its `index` becomes `index + 1`. *O*(1) time.
    pub(crate) fn insert(&mut self, item: T) {
        // SAFETY: `self.current` is a valid node in the list, so it is safe.
        unsafe { self.insert_before(self.current, item) };
        #[cfg(feature = "length")]
        {
            self.index += 1;
        }
    }

    /// Remove the element at the cursor and return it, or return `None` if
    /// the cursor is at the sentinel node. After removal, the cursor is
    /// moved to the next node. *O*(1) time.
    pub(crate) fn remove(&mut self) -> Option<T> {
        if self.is_sentinel_node() {
            return None;
        }
        // SAFETY: `self.current` is a valid non-sentinel node in the list.
        let node = unsafe { self.list.detach_node(self.current) };
        self.current = self.next_node();
        Some(Node::into_element(node))
    }

    /// Remove the element before the cursor and return it, or return `None`
    /// if the cursor is at the first node. After removal, the cursor is not
    /// moved, but its `index` becomes `index - 1`. *O*(1) time.
    pub(crate) fn backspace(&mut self) -> Option<T> {
        self.move_prev().ok().and_then(|_| self.remove())
    }

    /// Split the list into two after the current element (inclusive). This
    /// returns a new list consisting of everything after the cursor
    /// (inclusive), with the original list retaining everything before
    /// (exclusive).
    ///
    /// If the cursor is pointing at the sentinel node, `None` is returned.
    /// *O*(1) time.
    pub(crate) fn split(&mut self) -> Option<List<T>> {
        if self.is_sentinel_node() {
            return None;
        }
        #[cfg(feature = "length")]
        let len = self.list.len - self.index;
        // After splitting, the cursor points to the sentinel node.
        let current = std::mem::replace(&mut self.current, self.list.sentinel_node());
        // SAFETY: since current is a non-sentinel node, the range from
        // current to the back node is a valid range in the list.
        unsafe {
            Some(List::from_detached(self.list.detach_nodes(
                current,
                self.list.back_node(),
                #[cfg(feature = "length")]
                len,
            )))
        }
    }

    /// Splice another list between the current node and its previous node.
    /// *O*(1) time.
    pub(crate) fn splice(&mut self, other: List<T>) {
        if let Some(detached) = other.into_detached() {
            #[cfg(feature = "length")]
            {
                self.index += detached.len;
            }
            // SAFETY: `self.current.prev` and `self.current` are valid nodes
            // in the list, and they are adjacent, so it is safe.
            unsafe {
                self.list
                    .attach_nodes(self.prev_node(), self.current, detached);
            }
        }
    }
}

unsafe impl<T: Sync> Send for Cursor<'_, T> {}

unsafe impl<T: Sync> Sync for Cursor<'_, T> {}

unsafe impl<T: Send> Send for CursorMut<'_, T> {}

unsafe impl<T: Sync> Sync for CursorMut<'_, T> {}

#[cfg(test)]
mod tests {
    use crate::list::List;
    use std::iter::FromIterator;

    #[test]
    fn cursor_moves_and_reads() {
        let list = List::from_iter(['a', 'b', 'c', 'd']);

        let mut cursor = list.cursor_start();
        assert_eq!(cursor.current(), Some(&'a'));
        assert_eq!(cursor.previous(), None);

        assert!(cursor.move_next().is_ok());
        assert_eq!(cursor.current(), Some(&'b'));
        assert_eq!(cursor.previous(), Some(&'a'));

        let mut cursor = list.cursor_end();
        assert_eq!(cursor.current(), None);
        assert_eq!(cursor.previous(), Some(&'d'));
        assert!(cursor.move_next().is_err());

        // Crossing the sentinel boundary cyclically wraps to the front.
        cursor.move_next_cyclic();
        assert_eq!(cursor.current(), Some(&'a'));
        cursor.move_prev_cyclic();
        assert_eq!(cursor.current(), None);
    }

    #[test]
    fn cursor_seek_bounds() {
        let list = List::from_iter(0..5);
        let mut cursor = list.cursor_start();

        assert!(cursor.seek_to(3).is_ok());
        assert_eq!(cursor.current(), Some(&3));
        assert!(cursor.seek_to(5).is_ok());
        assert_eq!(cursor.current(), None);

        // Overshooting reports failure and leaves the cursor put.
        assert!(cursor.seek_to(6).is_err());
        assert_eq!(cursor.current(), None);

        cursor.move_to_start();
        let err = cursor.seek_forward(9).unwrap_err();
        assert_eq!(err.steps_taken(), 5);

        cursor.move_to_end();
        let err = cursor.seek_backward(9).unwrap_err();
        assert_eq!(err.steps_taken(), 5);
        assert_eq!(cursor.current(), Some(&0));
    }

    #[test]
    fn cursor_edits() {
        let mut list = List::from_iter([1, 2, 3, 4]);
        let mut cursor = list.cursor_start_mut();

        cursor.insert(5); // becomes [5, 1, 2, 3, 4], points to 1
        assert_eq!(cursor.current(), Some(&1));

        assert!(cursor.seek_forward(2).is_ok());
        assert_eq!(cursor.remove(), Some(3)); // becomes [5, 1, 2, 4], points to 4
        assert_eq!(cursor.current(), Some(&4));

        assert_eq!(cursor.backspace(), Some(2)); // becomes [5, 1, 4], points to 4
        assert_eq!(cursor.current(), Some(&4));

        assert_eq!(Vec::from_iter(list), vec![5, 1, 4]);
    }

    #[test]
    fn cursor_split_and_splice() {
        let mut list = List::from_iter(0..10);
        let mut cursor = list.cursor_mut(5);

        let split = cursor.split().unwrap();
        assert_eq!(cursor.current(), None);
        assert_eq!(Vec::from_iter(split), vec![5, 6, 7, 8, 9]);
        assert_eq!(Vec::from_iter(list.iter().copied()), vec![0, 1, 2, 3, 4]);

        let mut cursor = list.cursor_mut(2);
        cursor.splice(List::from_iter([10, 11]));
        assert_eq!(cursor.current(), Some(&2));
        #[cfg(feature = "length")]
        assert_eq!(cursor.index(), 4);
        assert_eq!(Vec::from_iter(list), vec![0, 1, 10, 11, 2, 3, 4]);
    }
}
