use std::fmt::{Debug, Formatter};
use std::marker::PhantomData;
use std::mem::MaybeUninit;
use std::ptr::NonNull;

use crate::list::cursor::{Cursor, CursorMut};
use crate::list::iterator::Iter;

pub(crate) mod cursor;
pub(crate) mod iterator;

mod algorithms;

/// The crate-private linking core: a doubly-linked list with owned nodes,
/// implemented as a cyclic list around one heap-allocated sentinel node.
///
/// Inserting and removing at any known position is *O*(1); finding a
/// position is *O*(*n*). The public [`Queue`](crate::Queue) and
/// [`Directory`](crate::Directory) are thin facades over this core with
/// string and entry payloads respectively.
///
/// # Naming Conventions
///
/// - `front..=back`: a closed range of list nodes, both inclusive;
/// - `start..end`: a half-open range of list nodes, left inclusive and right
///   exclusive (possibly the sentinel node).
pub(crate) struct List<T> {
    sentinel: Box<Node<Erased>>,
    #[cfg(feature = "length")]
    /// the number of element nodes, sentinel excluded
    pub(crate) len: usize,
    _marker: PhantomData<Box<Node<T>>>,
}

#[repr(C)]
pub(crate) struct Node<T> {
    pub(crate) next: NonNull<Node<T>>,
    pub(crate) prev: NonNull<Node<T>>,
    pub(crate) element: T,
}

#[derive(Default)]
struct Erased;

/// Nodes fragment detached from a list, used in list splitting or
/// splicing.
///
/// When detached from a list, reading of `front.prev` and `back.next`
/// is invalid.
pub(crate) struct DetachedNodes<T> {
    pub(crate) front: NonNull<Node<T>>,
    pub(crate) back: NonNull<Node<T>>,
    #[cfg(feature = "length")]
    pub(crate) len: usize,
    _marker: PhantomData<Box<Node<T>>>,
}

/// Make `prev` and `next` adjacent, in that order. The four-pointer relink
/// every structural edit in this crate reduces to.
///
/// It is unsafe because it does not check that both nodes belong to the
/// same list.
pub(crate) unsafe fn connect<T>(mut prev: NonNull<Node<T>>, mut next: NonNull<Node<T>>) {
    prev.as_mut().next = next;
    next.as_mut().prev = prev;
}

// private methods
impl<T> List<T> {
    pub(crate) fn sentinel_node(&self) -> NonNull<Node<T>> {
        NonNull::from(self.sentinel.as_ref()).cast()
    }
    pub(crate) fn front_node(&self) -> NonNull<Node<T>> {
        // SAFETY: `sentinel.next` is always valid (either the sentinel itself,
        // or the first element of the cyclic list).
        NonNull::from(unsafe { self.sentinel_node().as_ref().next.as_ref() }).cast()
    }
    pub(crate) fn back_node(&self) -> NonNull<Node<T>> {
        // SAFETY: `sentinel.prev` is always valid (either the sentinel itself,
        // or the last element of the cyclic list).
        NonNull::from(unsafe { self.sentinel_node().as_ref().prev.as_ref() }).cast()
    }

    /// Detach a single node `node` from the list, and return it as a box.
    ///
    /// It is unsafe because it does not check whether `node` belongs to the
    /// list. If it does not, this call makes the list ill-formed.
    pub(crate) unsafe fn detach_node(&mut self, node: NonNull<Node<T>>) -> Box<Node<T>> {
        #[cfg(feature = "length")]
        {
            self.len -= 1;
        }
        let node = Box::from_raw(node.as_ptr());
        connect(node.prev, node.next);
        node
    }

    /// Attach a single node `node` to the list, between `prev` and `next`.
    ///
    /// It is unsafe because it does not check whether `prev` and `next`
    /// belong to the list, or whether they are adjacent (only in
    /// `#[cfg(debug_assertions)]`).
    pub(crate) unsafe fn attach_node(
        &mut self,
        prev: NonNull<Node<T>>,
        next: NonNull<Node<T>>,
        node: NonNull<Node<T>>,
    ) {
        #[cfg(debug_assertions)]
        assert_adjacent(prev, next);
        connect(prev, node);
        connect(node, next);
        #[cfg(feature = "length")]
        {
            self.len += 1;
        }
        #[cfg(debug_assertions)]
        {
            assert_adjacent(prev, node);
            assert_adjacent(node, next);
        }
    }

    /// Detach a range of nodes `front..=back` from the list, and return the
    /// detached nodes.
    ///
    /// It is unsafe because it does not check whether `front..=back` is a
    /// valid range (`front` must **NOT** be at the right of `back`), or
    /// whether it belongs to the list.
    pub(crate) unsafe fn detach_nodes(
        &mut self,
        front: NonNull<Node<T>>,
        back: NonNull<Node<T>>,
        #[cfg(feature = "length")] len: usize,
    ) -> DetachedNodes<T> {
        #[cfg(feature = "length")]
        {
            self.len -= len;
        }
        connect(front.as_ref().prev, back.as_ref().next);
        DetachedNodes::new(
            front,
            back,
            #[cfg(feature = "length")]
            len,
        )
    }

    /// Attach a range of detached nodes to the list, between `prev` and
    /// `next`.
    ///
    /// It is unsafe because it does not check whether `prev` and `next`
    /// belong to the list, or whether they are adjacent (only in
    /// `#[cfg(debug_assertions)]`).
    pub(crate) unsafe fn attach_nodes(
        &mut self,
        prev: NonNull<Node<T>>,
        next: NonNull<Node<T>>,
        detached: DetachedNodes<T>,
    ) {
        #[cfg(debug_assertions)]
        assert_adjacent(prev, next);
        connect(prev, detached.front);
        connect(detached.back, next);
        #[cfg(feature = "length")]
        {
            self.len += detached.len;
        }
        #[cfg(debug_assertions)]
        {
            assert_adjacent(prev, detached.front);
            assert_adjacent(detached.back, next);
        }
    }

    /// Detach all nodes from the list, and return the detached nodes, or
    /// return `None` if the list is empty.
    ///
    /// It is safe because `self.front_node()..=self.back_node()` is a valid
    /// range.
    pub(crate) fn detach_all_nodes(&mut self) -> Option<DetachedNodes<T>> {
        if self.is_empty() {
            return None;
        }
        unsafe {
            Some(self.detach_nodes(
                self.front_node(),
                self.back_node(),
                #[cfg(feature = "length")]
                self.len,
            ))
        }
    }

    /// Construct a list from detached nodes.
    ///
    /// It is safe because the detached nodes are guaranteed to be a valid
    /// range at construction.
    pub(crate) fn from_detached(detached: DetachedNodes<T>) -> Self {
        let mut list = List::new();
        unsafe {
            list.attach_nodes(list.sentinel_node(), list.sentinel_node(), detached);
        }
        list
    }

    /// Like [`List::detach_all_nodes`], but consume the list.
    pub(crate) fn into_detached(mut self) -> Option<DetachedNodes<T>> {
        self.detach_all_nodes()
    }
}

impl<T> List<T> {
    /// Create an empty `List`.
    #[inline]
    pub(crate) fn new() -> Self {
        let sentinel = new_sentinel();
        #[cfg(feature = "length")]
        let len = 0;
        let _marker = PhantomData;
        Self {
            sentinel,
            #[cfg(feature = "length")]
            len,
            _marker,
        }
    }

    /// Returns `true` if the `List` is empty, in *O*(1) time.
    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.front_node() == self.sentinel_node()
    }

    /// Returns `true` if the `List` holds exactly one element, in *O*(1)
    /// time and independently of the `length` feature.
    #[inline]
    pub(crate) fn is_singleton(&self) -> bool {
        !self.is_empty() && self.front_node() == self.back_node()
    }

    /// Returns the length of the `List` in *O*(1) time. Enabled by
    /// `feature = "length"`.
    #[cfg(feature = "length")]
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Removes all elements from the `List` in *O*(*n*) time.
    #[inline]
    pub(crate) fn clear(&mut self) {
        while self.pop_front().is_some() {}
    }

    /// Provides a reference to the front element, or `None` if the list is
    /// empty.
    #[inline]
    pub(crate) fn front(&self) -> Option<&T> {
        self.cursor_start().current()
    }

    /// Provides a reference to the back element, or `None` if the list is
    /// empty.
    #[inline]
    pub(crate) fn back(&self) -> Option<&T> {
        self.cursor_end().previous()
    }

    /// Adds an element first in the list, in *O*(1) time.
    pub(crate) fn push_front(&mut self, elt: T) {
        self.cursor_start_mut().insert(elt);
    }

    /// Removes the first element and returns it, or `None` if the list is
    /// empty. *O*(1) time.
    pub(crate) fn pop_front(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        self.cursor_start_mut().remove()
    }

    /// Appends an element to the back of the list, in *O*(1) time.
    pub(crate) fn push_back(&mut self, elt: T) {
        self.cursor_end_mut().insert(elt);
    }

    /// Removes the last element and returns it, or `None` if the list is
    /// empty. *O*(1) time.
    pub(crate) fn pop_back(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        self.cursor_end_mut().backspace()
    }

    /// Provides a cursor at the first node, or at the sentinel node if the
    /// list is empty.
    pub(crate) fn cursor_start(&self) -> Cursor<'_, T> {
        Cursor::new(
            self,
            self.front_node(),
            #[cfg(feature = "length")]
            0,
        )
    }

    /// Provides a cursor at the sentinel node.
    pub(crate) fn cursor_end(&self) -> Cursor<'_, T> {
        Cursor::new(
            self,
            self.sentinel_node(),
            #[cfg(feature = "length")]
            self.len,
        )
    }

    /// Provides a cursor with editing operations at the node with the given
    /// index.
    ///
    /// # Panics
    ///
    /// Panics if `at > len`.
    pub(crate) fn cursor_mut(&mut self, at: usize) -> CursorMut<'_, T> {
        #[cfg(feature = "length")]
        assert!(at <= self.len, "Cannot create cursor at a nonexistent index");
        let mut cursor = self.cursor_start_mut();
        cursor
            .seek_to(at)
            .expect("Cannot create cursor at a nonexistent index");
        cursor
    }

    /// Provides a cursor with editing operations at the first node, or at
    /// the sentinel node if the list is empty.
    pub(crate) fn cursor_start_mut(&mut self) -> CursorMut<'_, T> {
        let front = self.front_node();
        CursorMut::new(
            self,
            front,
            #[cfg(feature = "length")]
            0,
        )
    }

    /// Provides a cursor with editing operations at the sentinel node.
    pub(crate) fn cursor_end_mut(&mut self) -> CursorMut<'_, T> {
        let sentinel = self.sentinel_node();
        #[cfg(feature = "length")]
        let len = self.len;
        CursorMut::new(
            self,
            sentinel,
            #[cfg(feature = "length")]
            len,
        )
    }

    /// Provides a forward iterator over the elements.
    #[inline]
    pub(crate) fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    /// Moves all elements from `other` to the end of the list, reusing its
    /// nodes. After this operation, `other` becomes empty.
    ///
    /// *O*(1) time and memory.
    pub(crate) fn append(&mut self, other: &mut Self) {
        if let Some(detached) = other.detach_all_nodes() {
            // `self.back_node()` and `self.sentinel_node()` are valid nodes
            // in the list and they are adjacent, so it is safe.
            unsafe { self.attach_nodes(self.back_node(), self.sentinel_node(), detached) }
        }
    }

    /// Moves all elements from `other` to the beginning of the list, reusing
    /// its nodes. After this operation, `other` becomes empty.
    ///
    /// *O*(1) time and memory.
    pub(crate) fn prepend(&mut self, other: &mut Self) {
        if let Some(detached) = other.detach_all_nodes() {
            // `self.sentinel_node()` and `self.front_node()` are valid nodes
            // in the list and they are adjacent, so it is safe.
            unsafe { self.attach_nodes(self.sentinel_node(), self.front_node(), detached) }
        }
    }

    /// Splits the list into two at the given index. Returns everything after
    /// the given index (inclusive).
    ///
    /// # Panics
    ///
    /// Panics if `at > len`.
    pub(crate) fn split_off(&mut self, at: usize) -> List<T> {
        #[cfg(feature = "length")]
        assert!(at <= self.len, "Cannot split off at a nonexistent index");
        #[cfg(feature = "length")]
        if at == self.len {
            return List::new();
        }
        self.cursor_mut(at).split().unwrap_or_default()
    }

    /// Removes the element at the given index and returns it, in *O*(*n*)
    /// time.
    ///
    /// # Panics
    ///
    /// Panics if `at >= len`.
    pub(crate) fn remove(&mut self, at: usize) -> T {
        #[cfg(feature = "length")]
        assert!(
            at < self.len,
            "Cannot remove at an index outside of the list bounds"
        );
        self.cursor_mut(at)
            .remove()
            .expect("Cannot remove at an index outside of the list bounds")
    }

    /// Adds an element at the given index in the list, in *O*(*n*) time.
    ///
    /// # Panics
    ///
    /// Panics if `at > len`.
    pub(crate) fn insert(&mut self, at: usize, elm: T) {
        #[cfg(feature = "length")]
        assert!(
            at <= self.len,
            "Cannot insert at an index outside of the list bounds"
        );
        self.cursor_mut(at).insert(elm);
    }

    /// Splices another list at the given index, in *O*(*n*) time (finding
    /// the position) plus *O*(1) relinking.
    ///
    /// # Panics
    ///
    /// Panics if `at > len`.
    pub(crate) fn splice_at(&mut self, at: usize, other: Self) {
        #[cfg(feature = "length")]
        assert!(at <= self.len, "Cannot splice at a nonexistent node");
        let mut cursor_mut = self.cursor_start_mut();
        cursor_mut
            .seek_forward(at)
            .expect("Cannot splice at a nonexistent node");
        cursor_mut.splice(other);
    }
}

impl<T: Debug> Debug for List<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Node<T> {
    /// Create a detached node with the given element.
    pub(crate) fn new_detached(element: T) -> NonNull<Node<T>> {
        // SAFETY:
        // - `node.element` is manually written, so it is safe;
        // - `node.prev` and `node.next` are dangling, but need unsafe blocks
        //   for dereference, so it is also safe.
        NonNull::from(unsafe {
            // `node.prev` and `node.next` will not be read, so it is ok to be
            // uninitialized. `node.element` is initialized manually by
            // `ptr::write`.
            #[allow(invalid_value, clippy::uninit_assumed_init)]
            let node = Box::<Node<T>>::leak(Box::new(MaybeUninit::uninit().assume_init()));
            std::ptr::write(&mut node.element, element);
            node
        })
    }

    /// Consume a detached boxed node and return its element.
    pub(crate) fn into_element(node: Box<Node<T>>) -> T {
        node.element
    }
}

impl<T> DetachedNodes<T> {
    /// It is unsafe because it must be guaranteed that `front..=back` is a
    /// valid range and its length must be equal to `len` (with
    /// `#[cfg(feature = "length")]`).
    unsafe fn new(
        front: NonNull<Node<T>>,
        back: NonNull<Node<T>>,
        #[cfg(feature = "length")] len: usize,
    ) -> Self {
        let _marker = PhantomData;
        #[cfg(feature = "length")]
        debug_assert!(len > 0, "Cannot detach nodes of length 0");
        Self {
            front,
            back,
            #[cfg(feature = "length")]
            len,
            _marker,
        }
    }
}

fn new_sentinel() -> Box<Node<Erased>> {
    let sentinel_ptr = Node::new_detached(Erased::default());
    // SAFETY:
    // - `sentinel.next`, `sentinel.prev` are initialized immediately after
    //   creating the node.
    // - `sentinel.element` is never read, so it is erased out.
    let mut sentinel = unsafe { Box::from_raw(sentinel_ptr.as_ptr()) };
    sentinel.next = sentinel_ptr;
    sentinel.prev = sentinel_ptr;
    sentinel
}

#[cfg(debug_assertions)]
fn assert_adjacent<T>(prev: NonNull<Node<T>>, next: NonNull<Node<T>>) {
    unsafe {
        assert_eq!(prev.as_ref().next, next);
        assert_eq!(next.as_ref().prev, prev);
    }
}

impl<T> Drop for List<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

unsafe impl<T: Send> Send for List<T> {}

unsafe impl<T: Sync> Sync for List<T> {}

#[cfg(test)]
mod tests {
    use crate::list::List;
    use std::cell::RefCell;
    use std::iter::FromIterator;

    fn list_eq<T, I>(list: &List<T>, expected: I)
    where
        T: std::fmt::Debug + Clone + Eq,
        I: IntoIterator<Item = T>,
    {
        assert_eq!(
            Vec::from_iter(list.iter().cloned()),
            Vec::from_iter(expected)
        );
    }

    #[test]
    fn list_create_and_ends() {
        let mut list = List::<i32>::new();
        assert!(list.is_empty());
        assert!(!list.is_singleton());
        assert_eq!(list.front(), None);
        assert_eq!(list.back(), None);
        assert_eq!(list.pop_front(), None);
        assert_eq!(list.pop_back(), None);

        list.push_back(1);
        assert!(list.is_singleton());
        assert_eq!(list.front(), Some(&1));
        assert_eq!(list.back(), Some(&1));

        list.push_front(0);
        list.push_back(2);
        assert!(!list.is_singleton());
        assert_eq!(list.front(), Some(&0));
        assert_eq!(list.back(), Some(&2));
        #[cfg(feature = "length")]
        assert_eq!(list.len(), 3);

        assert_eq!(list.pop_front(), Some(0));
        assert_eq!(list.pop_back(), Some(2));
        assert_eq!(list.pop_back(), Some(1));
        assert!(list.is_empty());
        #[cfg(feature = "length")]
        assert_eq!(list.len(), 0);
    }

    #[test]
    fn list_drop_releases_every_element() {
        struct DropChecker<'a>(i32, &'a RefCell<Vec<i32>>);
        impl<'a> Drop for DropChecker<'a> {
            fn drop(&mut self) {
                self.1.borrow_mut().push(self.0);
            }
        }
        let dropped = RefCell::new(Vec::new());
        let mut list = List::new();
        list.push_back(DropChecker(1, &dropped));
        list.push_back(DropChecker(2, &dropped));
        list.push_back(DropChecker(3, &dropped));
        drop(list);
        assert_eq!(dropped.borrow().as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn list_insert_and_remove_at_index() {
        let mut list = List::from_iter(0..5);
        list.insert(2, 10);
        list_eq(&list, vec![0, 1, 10, 2, 3, 4]);

        assert_eq!(list.remove(2), 10);
        list_eq(&list, 0..5);

        list.insert(0, 11);
        assert_eq!(list.front(), Some(&11));
        assert_eq!(list.remove(0), 11);

        list.insert(5, 12);
        assert_eq!(list.back(), Some(&12));
        assert_eq!(list.remove(5), 12);
        list_eq(&list, 0..5);
    }

    #[test]
    fn list_append_prepend_split() {
        let mut list = List::from_iter(0..5);
        let mut other = List::from_iter(5..7);
        list.append(&mut other);
        assert!(other.is_empty());
        list_eq(&list, 0..7);

        let split = list.split_off(5);
        list_eq(&list, 0..5);
        list_eq(&split, 5..7);

        let mut front = List::from_iter(-2..0);
        list.prepend(&mut front);
        assert!(front.is_empty());
        list_eq(&list, -2..5);

        let all = list.split_off(0);
        assert!(list.is_empty());
        list_eq(&all, -2..5);
    }

    #[test]
    fn list_splice_at() {
        let mut list = List::from_iter([0, 1, 7, 8, 9]);
        list.splice_at(2, List::from_iter(2..7));
        list_eq(&list, 0..10);
        #[cfg(feature = "length")]
        assert_eq!(list.len(), 10);

        let mut list = List::<i32>::new();
        list.splice_at(0, List::from_iter(0..3));
        list_eq(&list, 0..3);
        list.splice_at(3, List::new());
        list_eq(&list, 0..3);
    }
}
