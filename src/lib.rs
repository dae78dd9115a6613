#![deny(
    rustdoc::broken_intra_doc_links,
    rustdoc::private_intra_doc_links,
    missing_docs,
    missing_debug_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_op_in_unsafe_fn,
    unused_extern_crates,
    unused_import_braces,
    unused_lifetimes,
    unused_qualifications,
    unused_results,
    rust_2018_idioms
)]

//! A thread-safe unbounded FIFO queue with separate head and tail locks, and its
//! single-lock LIFO companion.
//!
//! The [`Queue`] keeps a singly-linked chain that always ends with an empty sentinel
//! node. Producers fill the sentinel and append a new one under the tail lock, consumers
//! unlink the first node under the head lock. A producer and a consumer therefore only
//! meet when comparing the head against the tail.
//!
//! Popped items come out as [`Arc`] handles, so an item can outlive the node it was
//! stored in. The `*_value` variants unwrap the handle.
//!
//! [`Arc`]: std::sync::Arc
//!
//! # Examples
//!
//! Single Producer - Single Consumer:
//!
//! ```
//! use two_lock_queue::Queue;
//!
//! let queue = Queue::new();
//! queue.push(1);
//! queue.push(2);
//!
//! assert_eq!(1, *queue.wait_and_pop());
//! assert_eq!(Some(2), queue.try_pop_value());
//! assert!(queue.try_pop().is_none());
//! assert!(queue.is_empty());
//! ```
//!
//! Multi Producer - Multi Consumer:
//!
//! ```
//! use two_lock_queue::Queue;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::thread;
//!
//! const COUNT: usize = 1_000;
//! const CONCURRENCY: usize = 4;
//!
//! let queue: Queue<usize> = Queue::new();
//! let items: Vec<_> = (0..COUNT).map(|_| AtomicUsize::new(0)).collect();
//!
//! thread::scope(|s| {
//!     for _ in 0..CONCURRENCY {
//!         s.spawn(|| {
//!             for _ in 0..COUNT {
//!                 let n = queue.wait_and_pop_value();
//!                 items[n].fetch_add(1, Ordering::SeqCst);
//!             }
//!         });
//!         s.spawn(|| {
//!             for i in 0..COUNT {
//!                 queue.push(i);
//!             }
//!         });
//!     }
//! });
//!
//! for c in &items {
//!     assert_eq!(c.load(Ordering::SeqCst), CONCURRENCY);
//! }
//!
//! assert!(queue.is_empty());
//! ```
//!
//! Stack:
//!
//! ```
//! use two_lock_queue::Stack;
//!
//! let stack: Stack<usize> = (0..3).collect();
//!
//! assert_eq!(Some(2), stack.try_pop_value());
//! assert_eq!(Some(1), stack.try_pop_value());
//! assert_eq!(Some(0), stack.try_pop_value());
//! assert!(stack.is_empty());
//! ```
//!
//! # Model checking
//!
//! Build with `RUSTFLAGS="--cfg loom"` to run the locks, the condition variable and the
//! node cells on top of [`loom`](https://docs.rs/loom/).

mod queue;
mod stack;

pub(crate) mod cache_pad;
pub(crate) mod node;
pub(crate) mod variant;

pub use queue::Queue;
pub use stack::Stack;
