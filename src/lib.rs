//! This crate provides a string queue implemented on a cyclic doubly-linked
//! list, together with a family of whole-queue transforms: middle removal,
//! run-based duplicate elimination, pairwise swapping, full and chunked
//! reversal, stable merge sort, a right-maxima filter, and a k-way merge of
//! multiple independently sorted queues driven by a [`Directory`].
//!
//! The [`Queue`] allows inserting and removing elements at both ends in
//! constant time, and every transform rearranges the queue in place by
//! relinking nodes, never by copying payloads.
//!
//! ```
//! use cyclic_queue::Queue;
//! use std::iter::FromIterator;
//!
//! let mut queue = Queue::from_iter(["banana", "apple", "cherry"]);
//!
//! queue.sort();
//! assert_eq!(Vec::from_iter(queue.iter()), vec!["apple", "banana", "cherry"]);
//!
//! queue.reverse();
//! assert_eq!(queue.pop_front().as_deref(), Some("cherry"));
//! ```
//!
//! # Memory Layout
//!
//! The memory layout of a queue is like the following graph:
//! ```text
//!          ┌─────────────────────────────────────────────────────────────────┐
//!          ↓                                              Sentinel node      │
//!    ╔═══════════╗         ╔═══════════╗                  ┌───────────┐      │
//!    ║   next    ║ ──────→ ║   next    ║ ──────→ ┄┄ ────→ │   next    │ ─────┘
//!    ╟───────────╢         ╟───────────╢  Node 2, 3, ...  ├───────────┤
//! ┌─ ║   prev    ║ ←────── ║   prev    ║ ←────── ┄┄ ←──── │   prev    │
//! │  ╟───────────╢         ╟───────────╢                  ├───────────┤
//! │  ║  payload  ║         ║  payload  ║                  ┊No payload ┊
//! │  ╚═══════════╝         ╚═══════════╝                  └╌╌╌╌╌╌╌╌╌╌╌┘
//! │      Node 0                Node 1                         ↑   ↑
//! └───────────────────────────────────────────────────────────┘   │
//! ╔═══════════╗                                                   │
//! ║  sentinel ║ ──────────────────────────────────────────────────┘
//! ╟───────────╢
//! ║   (len)   ║
//! ╚═══════════╝
//!     Queue
//! ```
//!
//! Each element node is allocated on the heap and owns its payload (a copy of
//! the inserted string; the queue never aliases caller memory). The sentinel
//! node carries no payload and is never an element: an empty queue is exactly
//! a sentinel whose `next` and `prev` point to itself, so "is this the
//! sentinel" is a structural question rather than a convention callers can
//! violate.
//!
//! The cached length field can be disabled by disabling the `length` feature
//! in your `Cargo.toml`:
//! ```text
//! [dependencies]
//! cyclic_queue = { default-features = false }
//! ```
//! With the feature off, all operations still work and counting becomes
//! *O*(*n*).
//!
//! # Transforms
//!
//! All transforms run to completion once relinking starts; none of them
//! allocates while pointers are being rewired, so a queue is never observed
//! half-edited.
//!
//! - [`Queue::pop_middle`]: remove the element at index ⌊*n*/2⌋;
//! - [`Queue::dedup_runs`]: delete every maximal run of 2+ equal payloads;
//! - [`Queue::swap_pairs`]: exchange the elements of each adjacent pair;
//! - [`Queue::reverse`] and [`Queue::reverse_chunks`]: full and chunked
//!   reversal;
//! - [`Queue::sort`] and [`Queue::merge`]: stable merge sort and stable
//!   two-way merge of sorted queues;
//! - [`Queue::retain_right_maxima`]: keep only elements with no strictly
//!   greater payload to their right;
//! - [`Directory::merge_all`]: tournament k-way merge over registered queues.
//!
//! Payload comparison is always byte-wise lexicographic (`str`'s `Ord`).
//!
//! # Concurrency
//!
//! A `Queue` is a single-owner value. No operation blocks, suspends or
//! performs I/O; callers needing shared access must serialize externally.

#[doc(inline)]
pub use directory::{Directory, Entry};
#[doc(inline)]
pub use queue::{IntoIter, Iter, Queue};

mod error;
mod list;

pub mod directory;
pub mod queue;

mod experiments;
