//! A link of the [`Queue`] chain.
//!
//! The chain always ends with a sentinel [`Node`]: its value slot is uninitialized and
//! its `next` pointer is null. A push fills the current sentinel in place and links a
//! fresh sentinel behind it, so every node between the head and the tail holds a value.
//!
//! Each node is allocated with [`Box`] and owned by its predecessor (the head pointer
//! owns the first one). Ownership is handed back to a [`Box`] when the node is unlinked.
//!
//! [`Queue`]: crate::queue::Queue

use crate::variant::cell::UnsafeCell;

use std::mem::MaybeUninit;
use std::ptr;
use std::sync::Arc;

/// A link of the [`Queue`] chain.
///
/// [`Queue`]: crate::queue::Queue
pub(crate) struct Node<T> {
    /// The value pushed into the [`Queue`], initialized for every node but the sentinel.
    ///
    /// [`Queue`]: crate::queue::Queue
    data: UnsafeCell<MaybeUninit<Arc<T>>>,

    /// The next [`Node`] of the chain, null for the sentinel.
    next: UnsafeCell<*mut Node<T>>,
}

impl<T> Node<T> {
    /// Allocates an empty sentinel and leaks it as a raw pointer.
    pub(crate) fn sentinel() -> *mut Node<T> {
        Box::into_raw(Box::new(Node {
            data: UnsafeCell::new(MaybeUninit::uninit()),
            next: UnsafeCell::new(ptr::null_mut()),
        }))
    }

    /// Turns the sentinel into a data-bearing node followed by `next`.
    ///
    /// # Safety
    ///
    /// `node` must be the current sentinel of a live chain and the caller must hold the
    /// tail lock. `next` must come from [`Node::sentinel`].
    pub(crate) unsafe fn fill(node: *mut Node<T>, data: Arc<T>, next: *mut Node<T>) {
        let node = unsafe { &*node };
        node.data.with_mut(|p| unsafe { p.write(MaybeUninit::new(data)) });
        node.next.with_mut(|p| unsafe { p.write(next) });
    }

    /// Unlinks a data-bearing node, frees it and returns its value with its successor.
    ///
    /// # Safety
    ///
    /// `node` must be the head of a live chain, distinct from the sentinel, and the caller
    /// must hold the head lock (or have exclusive access to the whole chain).
    pub(crate) unsafe fn unlink(node: *mut Node<T>) -> (Arc<T>, *mut Node<T>) {
        let node = unsafe { Box::from_raw(node) };
        let data = node.data.with(|p| unsafe { p.read().assume_init() });
        let next = node.next.with(|p| unsafe { p.read() });
        (data, next)
    }

    /// Frees the sentinel.
    ///
    /// # Safety
    ///
    /// `node` must be a sentinel that nothing else points to anymore.
    pub(crate) unsafe fn release(node: *mut Node<T>) {
        drop(unsafe { Box::from_raw(node) });
    }
}
