use crate::list::{connect, List, Node};

mod sort;

use sort::{merge_lists, merge_sort};

impl<T: PartialEq> PartialEq for List<T> {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other)
    }
}

impl<T: Eq> Eq for List<T> {}

impl<T: Clone> Clone for List<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T> List<T> {
    /// Remove the element at index ⌊*n*/2⌋ (0-indexed from the front) and
    /// return it, or return `None` if the list is empty.
    ///
    /// The middle is found by a slow/fast scan. The sentinel terminates the
    /// `start..end` range, so the fast pointer can never wrap around the
    /// cycle.
    pub(crate) fn pop_middle(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let end = self.sentinel_node();
        let mut slow = self.front_node();
        let mut fast = self.front_node();
        unsafe {
            while fast != end && fast.as_ref().next != end {
                fast = fast.as_ref().next.as_ref().next;
                slow = slow.as_ref().next;
            }
            Some(Node::into_element(self.detach_node(slow)))
        }
    }

    /// Delete every maximal run of two or more consecutive equal elements,
    /// the first occurrence included; non-repeated elements are kept.
    ///
    /// A single forward scan, *O*(*n*). Equal elements are only recognized
    /// as duplicates when adjacent, so the scan is meaningful on pre-sorted
    /// input.
    pub(crate) fn dedup_runs(&mut self)
    where
        T: PartialEq,
    {
        let end = self.sentinel_node();
        let mut node = self.front_node();
        unsafe {
            while node != end {
                // find the end of the run of elements equal to `*node`
                let mut run_end = node.as_ref().next;
                while run_end != end && run_end.as_ref().element == node.as_ref().element {
                    run_end = run_end.as_ref().next;
                }
                if run_end != node.as_ref().next {
                    // a run of two or more: delete it entirely
                    let mut cur = node;
                    while cur != run_end {
                        let next = cur.as_ref().next;
                        drop(self.detach_node(cur));
                        cur = next;
                    }
                }
                node = run_end;
            }
        }
    }

    /// Exchange the elements at positions (2*i*, 2*i* + 1) for every *i* by
    /// relinking; a final unpaired element is left untouched. *O*(*n*).
    pub(crate) fn swap_pairs(&mut self) {
        let end = self.sentinel_node();
        let mut first = self.front_node();
        unsafe {
            while first != end {
                let second = first.as_ref().next;
                if second == end {
                    break;
                }
                // [prev] first second [rest] -> [prev] second first [rest]
                let prev = first.as_ref().prev;
                let rest = second.as_ref().next;
                connect(prev, second);
                connect(second, first);
                connect(first, rest);
                first = rest;
            }
        }
    }

    /// Reverse the traversal order of the whole list in place by swapping
    /// every node's `next`/`prev`, the sentinel's included. *O*(*n*).
    pub(crate) fn reverse(&mut self) {
        if self.is_empty() {
            return;
        }
        let end = self.sentinel_node();
        let mut node = end;
        loop {
            // cache the forward link before it is overwritten
            let next = unsafe { node.as_ref().next };
            unsafe {
                let n = &mut *node.as_ptr();
                std::mem::swap(&mut n.next, &mut n.prev);
            }
            node = next;
            if node == end {
                break;
            }
        }
    }

    /// Reverse every contiguous run of exactly `k` elements, left to right;
    /// a trailing run shorter than `k` is left in its original order.
    ///
    /// Each chunk is cut into a stack-local header, reversed with
    /// [`List::reverse`], and spliced back between the same neighbours.
    /// *O*(*n*) total; `k <= 1`, an empty list or a singleton is a no-op.
    pub(crate) fn reverse_chunks(&mut self, k: usize) {
        if k <= 1 || self.is_empty() || self.is_singleton() {
            return;
        }
        let end = self.sentinel_node();
        let mut chunk_front = self.front_node();
        while chunk_front != end {
            // walk to the back of the chunk; a short trailing run stays put
            let mut chunk_back = chunk_front;
            for _ in 1..k {
                let next = unsafe { chunk_back.as_ref().next };
                if next == end {
                    return;
                }
                chunk_back = next;
            }
            let prev = unsafe { chunk_front.as_ref().prev };
            let next_chunk = unsafe { chunk_back.as_ref().next };
            let detached = unsafe {
                self.detach_nodes(
                    chunk_front,
                    chunk_back,
                    #[cfg(feature = "length")]
                    k,
                )
            };
            let mut chunk = List::from_detached(detached);
            chunk.reverse();
            if let Some(detached) = chunk.into_detached() {
                unsafe { self.attach_nodes(prev, next_chunk, detached) };
            }
            chunk_front = next_chunk;
        }
    }

    /// Delete every element that has a strictly greater element anywhere to
    /// its right, and return the number of surviving elements.
    ///
    /// A single tail-to-head scan maintaining the maximum among kept
    /// elements; the rightmost element is always kept. *O*(*n*).
    pub(crate) fn retain_right_maxima(&mut self) -> usize
    where
        T: Ord,
    {
        let end = self.sentinel_node();
        let back = self.back_node();
        if back == end {
            return 0;
        }
        // the rightmost element seeds the running maximum
        let mut max = back;
        let mut kept = 1;
        let mut node = unsafe { back.as_ref().prev };
        unsafe {
            while node != end {
                let prev = node.as_ref().prev;
                if node.as_ref().element < max.as_ref().element {
                    drop(self.detach_node(node));
                } else {
                    max = node;
                    kept += 1;
                }
                node = prev;
            }
        }
        kept
    }

    /// Merge the already-sorted `other` into the already-sorted `self`;
    /// `other` becomes empty. Stable: ties keep the `self` element first.
    /// *O*(*n* + *m*), or *O*(1) when either side is empty.
    pub(crate) fn merge(&mut self, other: &mut Self)
    where
        T: Ord,
    {
        merge_lists(self, other);
    }

    /// Sort the list in ascending order.
    ///
    /// This sort is stable (i.e., does not reorder equal elements).
    ///
    /// # Complexity
    ///
    /// *O*(*n* log *n*) time by a top-down merge sort: the midpoint is found
    /// by a slow/fast scan, the halves are cut into stack-local headers and
    /// sorted recursively, then merged with [`List::merge`]. Only *O*(log
    /// *n*) auxiliary list headers on the call stack; elements are relinked,
    /// never copied.
    pub(crate) fn sort(&mut self)
    where
        T: Ord,
    {
        merge_sort(self);
    }
}

#[cfg(test)]
mod tests {
    use crate::list::List;
    use std::iter::FromIterator;

    fn to_vec<T: Clone>(list: &List<T>) -> Vec<T> {
        list.iter().cloned().collect()
    }

    #[test]
    fn pop_middle_removes_upper_middle() {
        let mut list = List::<i32>::new();
        assert_eq!(list.pop_middle(), None);

        let mut list = List::from_iter([7]);
        assert_eq!(list.pop_middle(), Some(7));
        assert!(list.is_empty());

        let mut list = List::from_iter(0..2);
        assert_eq!(list.pop_middle(), Some(1));
        assert_eq!(to_vec(&list), vec![0]);

        let mut list = List::from_iter(0..5);
        assert_eq!(list.pop_middle(), Some(2));
        assert_eq!(to_vec(&list), vec![0, 1, 3, 4]);

        let mut list = List::from_iter(0..6);
        assert_eq!(list.pop_middle(), Some(3));
        assert_eq!(to_vec(&list), vec![0, 1, 2, 4, 5]);
        #[cfg(feature = "length")]
        assert_eq!(list.len(), 5);
    }

    #[test]
    fn dedup_runs_deletes_whole_runs() {
        let mut list = List::from_iter([1, 2, 2, 3]);
        list.dedup_runs();
        assert_eq!(to_vec(&list), vec![1, 3]);

        let mut list = List::from_iter([1, 1, 1, 1]);
        list.dedup_runs();
        assert!(list.is_empty());

        let mut list = List::from_iter([1, 2, 3]);
        list.dedup_runs();
        assert_eq!(to_vec(&list), vec![1, 2, 3]);

        // runs are only recognized when adjacent
        let mut list = List::from_iter([1, 2, 1, 1, 2]);
        list.dedup_runs();
        assert_eq!(to_vec(&list), vec![1, 2, 2]);

        let mut list = List::<i32>::new();
        list.dedup_runs();
        assert!(list.is_empty());
    }

    #[test]
    fn swap_pairs_leaves_odd_tail() {
        let mut list = List::from_iter(0..6);
        list.swap_pairs();
        assert_eq!(to_vec(&list), vec![1, 0, 3, 2, 5, 4]);

        let mut list = List::from_iter(0..5);
        list.swap_pairs();
        assert_eq!(to_vec(&list), vec![1, 0, 3, 2, 4]);

        let mut list = List::from_iter([1]);
        list.swap_pairs();
        assert_eq!(to_vec(&list), vec![1]);

        let mut list = List::<i32>::new();
        list.swap_pairs();
        assert!(list.is_empty());
    }

    #[test]
    fn reverse_is_an_involution() {
        let mut list = List::from_iter(0..7);
        list.reverse();
        assert_eq!(to_vec(&list), Vec::from_iter((0..7).rev()));
        list.reverse();
        assert_eq!(to_vec(&list), Vec::from_iter(0..7));

        let mut list = List::<i32>::new();
        list.reverse();
        assert!(list.is_empty());

        let mut list = List::from_iter([1]);
        list.reverse();
        assert_eq!(to_vec(&list), vec![1]);
    }

    #[test]
    fn reverse_chunks_boundaries() {
        // k divides the length evenly
        let mut list = List::from_iter(0..6);
        list.reverse_chunks(3);
        assert_eq!(to_vec(&list), vec![2, 1, 0, 5, 4, 3]);

        // a short trailing run stays in order
        let mut list = List::from_iter(0..5);
        list.reverse_chunks(3);
        assert_eq!(to_vec(&list), vec![2, 1, 0, 3, 4]);

        // k exceeding the length leaves the list unchanged
        let mut list = List::from_iter(0..4);
        list.reverse_chunks(9);
        assert_eq!(to_vec(&list), Vec::from_iter(0..4));

        // k equal to the length is a full reversal
        let mut list = List::from_iter(0..4);
        list.reverse_chunks(4);
        let mut reversed = List::from_iter(0..4);
        reversed.reverse();
        assert_eq!(list, reversed);

        // degenerate chunk sizes are no-ops
        let mut list = List::from_iter(0..4);
        list.reverse_chunks(1);
        list.reverse_chunks(0);
        assert_eq!(to_vec(&list), Vec::from_iter(0..4));
        #[cfg(feature = "length")]
        assert_eq!(list.len(), 4);
    }

    #[test]
    fn retain_right_maxima_keeps_suffix_maxima() {
        let mut list = List::from_iter([4, 1, 5, 3, 2]);
        assert_eq!(list.retain_right_maxima(), 3);
        assert_eq!(to_vec(&list), vec![5, 3, 2]);

        let mut list = List::from_iter([1, 2, 3]);
        assert_eq!(list.retain_right_maxima(), 1);
        assert_eq!(to_vec(&list), vec![3]);

        let mut list = List::from_iter([3, 2, 1]);
        assert_eq!(list.retain_right_maxima(), 3);
        assert_eq!(to_vec(&list), vec![3, 2, 1]);

        // equal elements do not shadow each other
        let mut list = List::from_iter([2, 2, 1]);
        assert_eq!(list.retain_right_maxima(), 3);
        assert_eq!(to_vec(&list), vec![2, 2, 1]);

        let mut list = List::<i32>::new();
        assert_eq!(list.retain_right_maxima(), 0);
    }
}
