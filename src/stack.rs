//! A thread-safe unbounded LIFO stack guarded by a single lock.

use crate::variant::sync::Mutex;

use std::fmt;
use std::sync::Arc;

use tracing::trace;

/// A thread-safe unbounded LIFO stack.
///
/// Every operation takes the same lock and none of them waits for an item to show up.
/// Share it between threads by reference or through an [`Arc`].
pub struct Stack<T> {
    head: Mutex<Option<Box<Link<T>>>>,
}

struct Link<T> {
    data: Arc<T>,
    next: Option<Box<Link<T>>>,
}

impl<T> Stack<T> {
    /// Creates a new empty [`Stack`].
    ///
    /// # Examples
    ///
    /// ```
    /// use two_lock_queue::Stack;
    ///
    /// let stack = Stack::<usize>::new();
    /// assert!(stack.is_empty());
    /// ```
    pub fn new() -> Self {
        Self {
            head: Mutex::new(None),
        }
    }

    /// Push an item on top of the [`Stack`].
    pub fn push(&self, item: T) {
        let mut link = Box::new(Link {
            data: Arc::new(item),
            next: None,
        });

        let mut head = self.head.lock();
        link.next = head.take();
        *head = Some(link);
    }

    /// Pop the item on top of the [`Stack`]. Returns none if the [`Stack`] is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use two_lock_queue::Stack;
    ///
    /// let stack = Stack::<usize>::new();
    /// stack.push(1);
    /// stack.push(2);
    ///
    /// assert_eq!(2, *stack.try_pop().unwrap());
    /// assert_eq!(1, *stack.try_pop().unwrap());
    /// assert!(stack.try_pop().is_none());
    /// ```
    pub fn try_pop(&self) -> Option<Arc<T>> {
        let link = {
            let mut head = self.head.lock();
            let mut link = head.take()?;
            *head = link.next.take();
            link
        };

        Some(link.data)
    }

    /// Reports whether the [`Stack`] holds no item.
    pub fn is_empty(&self) -> bool {
        self.head.lock().is_none()
    }
}

impl<T: Clone> Stack<T> {
    /// Pop the item on top of the [`Stack`] and take it out of its shared handle.
    /// Returns none if the [`Stack`] is empty.
    pub fn try_pop_value(&self) -> Option<T> {
        self.try_pop().map(Arc::unwrap_or_clone)
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for Stack<T> {
    /// Creates a [`Stack`] with the last yielded item on top.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut stack = Self::new();
        stack.extend(iter);
        stack
    }
}

impl<T> Extend<T> for Stack<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}

impl<'a, T> Extend<T> for &'a Stack<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}

impl<T> fmt::Debug for Stack<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stack")
            .field("is_empty", &self.is_empty())
            .finish_non_exhaustive()
    }
}

impl<T> Drop for Stack<T> {
    // Unlink iteratively, the default drop glue would recurse once per item.
    fn drop(&mut self) {
        let mut next = self.head.lock().take();
        let mut dropped = 0_usize;

        while let Some(mut link) = next {
            next = link.next.take();
            dropped += 1;
        }

        trace!(dropped, "stack dropped");
    }
}
