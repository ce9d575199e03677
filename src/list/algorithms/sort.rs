use std::ptr::NonNull;

use crate::list::{connect, List, Node};

/// Move the closed range `from_front..=from_back` directly before `to`,
/// within one list. No length bookkeeping is needed, no node leaves the
/// list.
///
/// It is unsafe because it does not check that the range is valid or that
/// every node involved belongs to the same list.
unsafe fn move_nodes<T>(
    from_front: NonNull<Node<T>>,
    from_back: NonNull<Node<T>>,
    to: NonNull<Node<T>>,
) {
    connect(from_front.as_ref().prev, from_back.as_ref().next);
    connect(to.as_ref().prev, from_front);
    connect(from_back, to);
}

/// Stable two-way merge of two ascending lists: drain `src` into `dst` so
/// that `dst` ends up ascending and `src` empty. On equal elements the
/// `dst` element comes first.
///
/// One pass over both lists. The merged region grows at `dst`'s back:
/// each step either rotates `dst`'s unmerged head to the back or moves
/// `src`'s head there, and whichever list empties first lets the other's
/// remainder be spliced in wholesale.
pub(super) fn merge_lists<T: Ord>(dst: &mut List<T>, src: &mut List<T>) {
    if src.is_empty() {
        return;
    }
    if dst.is_empty() {
        dst.append(src);
        return;
    }
    let dst_end = dst.sentinel_node();
    // the back of the original `dst` run; once it rotates into the merged
    // region, everything left in `src` is greater or equal
    let tail = dst.back_node();
    let mut tail_moved = false;
    unsafe {
        while !tail_moved && !src.is_empty() {
            let a = dst.front_node();
            let b = src.front_node();
            if b.as_ref().element < a.as_ref().element {
                let detached = src.detach_nodes(
                    b,
                    b,
                    #[cfg(feature = "length")]
                    1,
                );
                dst.attach_nodes(dst.back_node(), dst_end, detached);
            } else {
                // ties keep the `dst` element first
                tail_moved = a == tail;
                move_nodes(a, a, dst_end);
            }
        }
        if tail_moved {
            if let Some(detached) = src.detach_all_nodes() {
                dst.attach_nodes(dst.back_node(), dst_end, detached);
            }
        } else {
            // `src` ran out; rotate the remaining unmerged run to the back
            move_nodes(dst.front_node(), tail, dst_end);
        }
    }
}

/// Top-down merge sort: cut the front half into a stack-local list, sort
/// both halves recursively, then merge. Merging into the front half keeps
/// equal elements in their original order.
pub(super) fn merge_sort<T: Ord>(list: &mut List<T>) {
    if list.is_empty() || list.is_singleton() {
        return;
    }
    let end = list.sentinel_node();
    let mut slow = list.front_node();
    let mut fast = list.front_node();
    #[cfg(feature = "length")]
    let mut front_len = 0;
    unsafe {
        // `slow` lands on the first node of the back half
        while fast != end && fast.as_ref().next != end {
            fast = fast.as_ref().next.as_ref().next;
            slow = slow.as_ref().next;
            #[cfg(feature = "length")]
            {
                front_len += 1;
            }
        }
    }
    let detached = unsafe {
        let front = list.front_node();
        let back = slow.as_ref().prev;
        list.detach_nodes(
            front,
            back,
            #[cfg(feature = "length")]
            front_len,
        )
    };
    let mut front_half = List::from_detached(detached);
    merge_sort(&mut front_half);
    merge_sort(list);
    merge_lists(&mut front_half, list);
    list.append(&mut front_half);
}

#[cfg(test)]
mod tests {
    use crate::list::List;
    use std::cmp::Ordering;
    use std::iter::FromIterator;

    fn to_vec<T: Clone>(list: &List<T>) -> Vec<T> {
        list.iter().cloned().collect()
    }

    #[test]
    fn merge_interleaves_sorted_lists() {
        let mut dst = List::from_iter([1, 3, 5]);
        let mut src = List::from_iter([2, 4, 6]);
        dst.merge(&mut src);
        assert!(src.is_empty());
        assert_eq!(to_vec(&dst), vec![1, 2, 3, 4, 5, 6]);
        #[cfg(feature = "length")]
        assert_eq!(dst.len(), 6);
    }

    #[test]
    fn merge_handles_empty_and_disjoint_runs() {
        let mut dst = List::<i32>::new();
        let mut src = List::from_iter([1, 2]);
        dst.merge(&mut src);
        assert_eq!(to_vec(&dst), vec![1, 2]);

        let mut src = List::<i32>::new();
        dst.merge(&mut src);
        assert_eq!(to_vec(&dst), vec![1, 2]);

        // all of src greater than dst
        let mut src = List::from_iter([3, 4]);
        dst.merge(&mut src);
        assert_eq!(to_vec(&dst), vec![1, 2, 3, 4]);

        // all of src smaller than dst
        let mut src = List::from_iter([-2, -1]);
        dst.merge(&mut src);
        assert_eq!(to_vec(&dst), vec![-2, -1, 1, 2, 3, 4]);
    }

    #[test]
    fn sort_orders_and_is_idempotent() {
        let mut list = List::from_iter([5, 2, 4, 1, 3]);
        list.sort();
        assert_eq!(to_vec(&list), vec![1, 2, 3, 4, 5]);
        list.sort();
        assert_eq!(to_vec(&list), vec![1, 2, 3, 4, 5]);

        let mut list = List::from_iter([2, 1]);
        list.sort();
        assert_eq!(to_vec(&list), vec![1, 2]);

        let mut list = List::from_iter([1]);
        list.sort();
        assert_eq!(to_vec(&list), vec![1]);

        let mut list = List::<i32>::new();
        list.sort();
        assert!(list.is_empty());

        let mut list = List::from_iter([3, 1, 3, 1, 2, 2]);
        list.sort();
        assert_eq!(to_vec(&list), vec![1, 1, 2, 2, 3, 3]);
        #[cfg(feature = "length")]
        assert_eq!(list.len(), 6);
    }

    /// Compares by `key` only; `tag` records the original position.
    #[derive(Debug, Clone)]
    struct Keyed {
        key: i32,
        tag: usize,
    }

    impl PartialEq for Keyed {
        fn eq(&self, other: &Self) -> bool {
            self.key == other.key
        }
    }

    impl Eq for Keyed {}

    impl PartialOrd for Keyed {
        fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
            Some(self.cmp(other))
        }
    }

    impl Ord for Keyed {
        fn cmp(&self, other: &Self) -> Ordering {
            self.key.cmp(&other.key)
        }
    }

    fn keyed(pairs: &[(i32, usize)]) -> List<Keyed> {
        pairs.iter().map(|&(key, tag)| Keyed { key, tag }).collect()
    }

    fn pairs(list: &List<Keyed>) -> Vec<(i32, usize)> {
        list.iter().map(|k| (k.key, k.tag)).collect()
    }

    #[test]
    fn merge_keeps_dst_first_on_ties() {
        let mut dst = keyed(&[(1, 0), (2, 1)]);
        let mut src = keyed(&[(1, 2), (2, 3)]);
        dst.merge(&mut src);
        assert_eq!(pairs(&dst), vec![(1, 0), (1, 2), (2, 1), (2, 3)]);
    }

    #[test]
    fn sort_is_stable() {
        let mut list = keyed(&[(2, 0), (1, 1), (2, 2), (1, 3), (2, 4)]);
        list.sort();
        assert_eq!(pairs(&list), vec![(1, 1), (1, 3), (2, 0), (2, 2), (2, 4)]);
    }
}
