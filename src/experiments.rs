//! An experimental no-`unsafe` rendition of the string deque, with node
//! ownership split across `StaticRc` halves and link mutation mediated by a
//! `GhostToken`.
//!
//! It supports end insertion and removal only; the whole-queue transforms
//! live on the pointer-based queue. Kept private as a correctness
//! cross-check for the end operations.

use ghost_cell::{GhostCell, GhostToken};
use static_rc::StaticRc;
use std::ops::Deref;

pub struct Deque<'id> {
    links: [Option<NodePtr<'id>>; 2],
}

struct Node<'id> {
    links: [Option<NodePtr<'id>>; 2],
    elem: Box<str>,
}

type NodePtr<'id> = Half<GhostCell<'id, Node<'id>>>;

type Half<T> = StaticRc<T, 1, 2>;
type Full<T> = StaticRc<T, 2, 2>;

impl<'id> Node<'id> {
    const NEXT: usize = 0;
    const PREV: usize = 1;
    fn new(elem: Box<str>) -> Self {
        let links = [None, None];
        Self { elem, links }
    }
}

impl<'id> Default for Deque<'id> {
    fn default() -> Self {
        let links = [None, None];
        Self { links }
    }
}

impl<'id> Deque<'id> {
    const HEAD: usize = 0;
    const TAIL: usize = 1;

    fn push_at(&mut self, side: usize, s: &str, token: &mut GhostToken<'id>) {
        let oppo = 1 - side;
        let (left, right) = Full::split(Full::new(GhostCell::new(Node::new(s.into()))));
        match self.links[side].take() {
            Some(this_side) => {
                this_side.deref().borrow_mut(token).links[oppo] = Some(left);
                right.deref().borrow_mut(token).links[side] = Some(this_side);
            }
            None => self.links[oppo] = Some(left),
        }
        self.links[side] = Some(right);
    }
    fn pop_at(&mut self, side: usize, token: &mut GhostToken<'id>) -> Option<Box<str>> {
        debug_assert!(side < 2);
        let oppo = 1 - side;
        let right = self.links[side].take()?;
        let left = match right.deref().borrow_mut(token).links[side].take() {
            Some(this_side) => {
                let left = this_side.deref().borrow_mut(token).links[oppo]
                    .take()
                    .unwrap();
                self.links[side] = Some(this_side);
                left
            }
            None => self.links[oppo].take().unwrap(),
        };
        Some(Full::into_box(Full::join(left, right)).into_inner().elem)
    }
}

impl<'id> Deque<'id> {
    pub fn new() -> Self {
        Default::default()
    }
    pub fn is_empty(&self) -> bool {
        self.links[Self::HEAD].is_none()
    }
    pub fn push_back(&mut self, s: &str, token: &mut GhostToken<'id>) {
        self.push_at(Self::TAIL, s, token);
    }
    pub fn pop_back(&mut self, token: &mut GhostToken<'id>) -> Option<Box<str>> {
        self.pop_at(Self::TAIL, token)
    }
    pub fn push_front(&mut self, s: &str, token: &mut GhostToken<'id>) {
        self.push_at(Self::HEAD, s, token);
    }
    pub fn pop_front(&mut self, token: &mut GhostToken<'id>) -> Option<Box<str>> {
        self.pop_at(Self::HEAD, token)
    }
}

#[cfg(test)]
mod tests {
    use crate::experiments::Deque;
    use ghost_cell::GhostToken;

    #[test]
    fn deque_push_pop() {
        GhostToken::new(|mut token| {
            let mut deque = Deque::new();
            assert!(deque.is_empty());
            deque.push_back("b", &mut token);
            deque.push_front("a", &mut token);
            deque.push_back("c", &mut token);
            assert!(!deque.is_empty());
            assert_eq!(deque.pop_back(&mut token).as_deref(), Some("c"));
            assert_eq!(deque.pop_front(&mut token).as_deref(), Some("a"));
            assert_eq!(deque.pop_front(&mut token).as_deref(), Some("b"));
            assert!(deque.is_empty());
        })
    }
}
