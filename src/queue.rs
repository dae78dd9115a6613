//! A thread-safe unbounded FIFO queue with separate head and tail locks.

use crate::cache_pad::CachePad;
use crate::node::Node;
use crate::variant::sync::atomic::{AtomicUsize, Ordering};
use crate::variant::sync::{Condvar, Mutex, MutexGuard};

use std::fmt;
use std::sync::Arc;

use tracing::trace;

/// A thread-safe unbounded FIFO queue.
///
/// Producers only take the tail lock and consumers take the head lock, so one producer
/// and one consumer don't contend with each other. Share it between threads by
/// reference or through an [`Arc`].
pub struct Queue<T> {
    /// Points to the first node of the chain, which owns the rest of it.
    head: CachePad<Mutex<*mut Node<T>>>,

    /// Points to the sentinel, the last node of the chain.
    tail: CachePad<Mutex<*mut Node<T>>>,

    /// Signaled after a push whenever some consumer is waiting for data.
    data_cond: Condvar,

    /// Number of consumers registered in [`Queue::wait_and_pop`].
    ///
    /// A consumer registers while holding the head lock and before checking the tail,
    /// so a producer that misses the waiter when reading the count has published its
    /// node before the consumer checked.
    waiters: AtomicUsize,
}

// The chain is only reachable through the two locks and every value is moved from
// the producer to exactly one consumer.
unsafe impl<T: Send> Send for Queue<T> {}
unsafe impl<T: Send> Sync for Queue<T> {}

impl<T> Queue<T> {
    /// Creates a new empty [`Queue`].
    ///
    /// # Examples
    ///
    /// ```
    /// use two_lock_queue::Queue;
    ///
    /// let queue = Queue::<usize>::new();
    /// assert!(queue.is_empty());
    /// ```
    pub fn new() -> Self {
        let sentinel = Node::sentinel();

        Self {
            head: CachePad::new(Mutex::new(sentinel)),
            tail: CachePad::new(Mutex::new(sentinel)),
            data_cond: Condvar::new(),
            waiters: AtomicUsize::new(0),
        }
    }

    /// Push an item at the back of the [`Queue`].
    ///
    /// Wakes up the consumers blocked in [`Queue::wait_and_pop`], if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use two_lock_queue::Queue;
    ///
    /// let queue = Queue::<usize>::new();
    ///
    /// queue.push(1);
    /// queue.push(2);
    /// assert!(!queue.is_empty());
    /// ```
    pub fn push(&self, item: T) {
        // Allocate before locking so a failed allocation leaves the chain untouched.
        let data = Arc::new(item);
        let sentinel = Node::sentinel();

        {
            let mut tail = self.tail.lock();
            // SAFETY: `*tail` is the current sentinel and we hold the tail lock.
            unsafe { Node::fill(*tail, data, sentinel) };
            *tail = sentinel;
        }

        if self.waiters.load(Ordering::SeqCst) != 0 {
            // A registered waiter holds the head lock until it is parked on the condition
            // variable. Going through the head lock makes sure it can't miss the signal.
            drop(self.head.lock());
            self.data_cond.notify_all();
        }
    }

    /// Pop the item at the front of the [`Queue`]. Returns none if the [`Queue`] is empty.
    ///
    /// Never blocks, apart from briefly acquiring the locks.
    ///
    /// # Examples
    ///
    /// ```
    /// use two_lock_queue::Queue;
    ///
    /// let queue = Queue::<usize>::new();
    /// assert!(queue.try_pop().is_none());
    ///
    /// queue.push(7);
    /// assert_eq!(7, *queue.try_pop().unwrap());
    /// assert!(queue.try_pop().is_none());
    /// ```
    pub fn try_pop(&self) -> Option<Arc<T>> {
        let mut head = self.head.lock();
        if *head == self.tail() {
            return None;
        }

        Some(Self::pop_head(&mut head))
    }

    /// Pop the item at the front of the [`Queue`], blocking until one is available.
    ///
    /// When several consumers are waiting, each pushed item is returned to exactly one
    /// of them; there is no fairness between waiters.
    ///
    /// # Examples
    ///
    /// ```
    /// use two_lock_queue::Queue;
    /// use std::thread;
    ///
    /// let queue = Queue::<usize>::new();
    ///
    /// thread::scope(|s| {
    ///     let consumer = s.spawn(|| *queue.wait_and_pop());
    ///     queue.push(42);
    ///     assert_eq!(42, consumer.join().unwrap());
    /// });
    /// ```
    pub fn wait_and_pop(&self) -> Arc<T> {
        let mut head = self.wait_for_data();
        Self::pop_head(&mut head)
    }

    /// Reports whether the [`Queue`] holds no item.
    ///
    /// The answer is a snapshot: a concurrent push or pop may change it right away.
    pub fn is_empty(&self) -> bool {
        let head = self.head.lock();
        *head == self.tail()
    }

    /// Reads the tail pointer under its own lock, released on return.
    ///
    /// Callers only compare the result against the head, they never dereference it.
    fn tail(&self) -> *mut Node<T> {
        *self.tail.lock()
    }

    /// Returns the head lock once the [`Queue`] holds at least one item.
    fn wait_for_data(&self) -> MutexGuard<'_, *mut Node<T>> {
        let mut head = self.head.lock();
        if *head != self.tail() {
            return head;
        }

        let _ = self.waiters.fetch_add(1, Ordering::SeqCst);
        // Re-checked on every wake up: another consumer may have taken the item, or the
        // wake up was spurious.
        while *head == self.tail() {
            trace!("queue is empty, waiting for a push");
            head = self.data_cond.wait(head);
        }
        let _ = self.waiters.fetch_sub(1, Ordering::SeqCst);

        head
    }

    /// Detaches the head node, advances the head and returns the detached item.
    ///
    /// The caller holds the head lock and has checked the head isn't the sentinel.
    fn pop_head(head: &mut MutexGuard<'_, *mut Node<T>>) -> Arc<T> {
        // SAFETY: the head lock is held and the head isn't the sentinel, so it was filled
        // by a push that released the tail lock before we read the tail.
        let (data, next) = unsafe { Node::unlink(**head) };
        **head = next;
        data
    }
}

impl<T: Clone> Queue<T> {
    /// Pop the item at the front of the [`Queue`] and take it out of its shared handle.
    /// Returns none if the [`Queue`] is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use two_lock_queue::Queue;
    ///
    /// let queue: Queue<String> = ["a", "b"].iter().map(|s| s.to_string()).collect();
    ///
    /// assert_eq!(Some("a".to_string()), queue.try_pop_value());
    /// assert_eq!(Some("b".to_string()), queue.try_pop_value());
    /// assert_eq!(None, queue.try_pop_value());
    /// ```
    pub fn try_pop_value(&self) -> Option<T> {
        self.try_pop().map(Arc::unwrap_or_clone)
    }

    /// Pop the item at the front of the [`Queue`], blocking until one is available, and
    /// take it out of its shared handle.
    pub fn wait_and_pop_value(&self) -> T {
        Arc::unwrap_or_clone(self.wait_and_pop())
    }
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for Queue<T> {
    /// Creates a [`Queue`] holding the items in iteration order.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut queue = Self::new();
        queue.extend(iter);
        queue
    }
}

impl<T> Extend<T> for Queue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}

impl<'a, T> Extend<T> for &'a Queue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}

impl<T> fmt::Debug for Queue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Queue")
            .field("is_empty", &self.is_empty())
            .finish_non_exhaustive()
    }
}

impl<T> Drop for Queue<T> {
    fn drop(&mut self) {
        let tail = self.tail();
        let mut node = *self.head.lock();
        let mut dropped = 0_usize;

        while node != tail {
            // SAFETY: `&mut self` gives exclusive access to the chain and `node` sits
            // between the head and the sentinel.
            let (data, next) = unsafe { Node::unlink(node) };
            drop(data);
            node = next;
            dropped += 1;
        }

        // SAFETY: every node before the sentinel has been released above.
        unsafe { Node::release(tail) };

        trace!(dropped, "queue dropped");
    }
}
