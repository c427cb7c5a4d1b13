//! Bounded blocking FIFO shared by producers and the writer thread
//!
//! A single `parking_lot::Mutex` guards the item buffer, the capacity and the
//! closed flag. Three condition variables hang off it:
//!
//! - `not_empty`: poppers wait here while the queue is empty
//! - `not_full`: pushers wait here while `len >= capacity`
//! - `closing`: the consumer's timed wait, woken only by [`BoundedQueue::close`]
//!
//! # Invariants
//!
//! - `len() <= capacity()` whenever the capacity has not been lowered below the
//!   current length; a lowered capacity is enforced from the next push on
//! - Items leave in exactly the order they entered
//! - Nothing is dropped or overwritten; `push` waits instead
//!
//! There are no timeouts on `push` or `pop`. A stalled consumer blocks
//! producers indefinitely.

use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;
use std::fmt;
use std::time::Instant;
use tracing::warn;

/// Returned by [`BoundedQueue::push`] when the queue is closed.
///
/// Carries the rejected item back to the caller.
#[derive(PartialEq, Eq)]
pub struct Closed<T>(pub T);

impl<T> Closed<T> {
    /// Recover the item that was not enqueued.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> fmt::Debug for Closed<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Closed(..)")
    }
}

impl<T> fmt::Display for Closed<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("queue is closed")
    }
}

impl<T> std::error::Error for Closed<T> {}

struct Inner<T> {
    items: VecDeque<T>,
    capacity: usize,
    closed: bool,
}

/// Blocking FIFO with a fixed capacity.
///
/// # Example
///
/// ```
/// use tfevent_concurrency::BoundedQueue;
///
/// let queue = BoundedQueue::new(2);
/// queue.push("a").unwrap();
/// queue.push("b").unwrap();
/// assert_eq!(queue.pop(), Some("a"));
/// assert_eq!(queue.len(), 1);
/// ```
pub struct BoundedQueue<T> {
    inner: Mutex<Inner<T>>,
    not_empty: Condvar,
    not_full: Condvar,
    closing: Condvar,
}

impl<T> BoundedQueue<T> {
    /// Create a queue holding at most `capacity` items.
    ///
    /// A capacity of zero would block every push forever and is raised to 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = clamp_capacity(capacity);
        Self {
            inner: Mutex::new(Inner {
                items: VecDeque::with_capacity(capacity),
                capacity,
                closed: false,
            }),
            not_empty: Condvar::new(),
            not_full: Condvar::new(),
            closing: Condvar::new(),
        }
    }

    /// Append `item` at the tail, blocking while the queue is full.
    ///
    /// Wakes one blocked popper. Fails with [`Closed`] if the queue is closed
    /// before space becomes available.
    pub fn push(&self, item: T) -> Result<(), Closed<T>> {
        let mut inner = self.inner.lock();
        while inner.items.len() >= inner.capacity && !inner.closed {
            self.not_full.wait(&mut inner);
        }
        if inner.closed {
            return Err(Closed(item));
        }
        inner.items.push_back(item);
        drop(inner);

        self.not_empty.notify_one();
        Ok(())
    }

    /// Remove and return the head item, blocking while the queue is empty.
    ///
    /// Wakes one blocked pusher. Returns `None` only once the queue is closed
    /// and every remaining item has been taken.
    pub fn pop(&self) -> Option<T> {
        let mut inner = self.inner.lock();
        loop {
            if let Some(item) = inner.items.pop_front() {
                drop(inner);
                self.not_full.notify_one();
                return Some(item);
            }
            if inner.closed {
                return None;
            }
            self.not_empty.wait(&mut inner);
        }
    }

    /// Remove the head item without blocking.
    pub fn try_pop(&self) -> Option<T> {
        let item = self.inner.lock().items.pop_front();
        if item.is_some() {
            self.not_full.notify_one();
        }
        item
    }

    /// Remove every queued item in FIFO order under one lock acquisition.
    ///
    /// Wakes all blocked pushers, since any number of slots may have opened.
    pub fn drain(&self) -> Vec<T> {
        let items: Vec<T> = self.inner.lock().items.drain(..).collect();
        if !items.is_empty() {
            self.not_full.notify_all();
        }
        items
    }

    /// Block until at least one item is queued or the queue is closed.
    ///
    /// Returns `true` if items are available, `false` if the queue is closed
    /// and empty.
    pub fn wait_for_items(&self) -> bool {
        let mut inner = self.inner.lock();
        while inner.items.is_empty() && !inner.closed {
            self.not_empty.wait(&mut inner);
        }
        !inner.items.is_empty()
    }

    /// Sleep until `deadline` or until the queue is closed, whichever is first.
    ///
    /// Returns `true` if the queue is closed. Pushes do not end the wait.
    pub fn wait_until(&self, deadline: Instant) -> bool {
        let mut inner = self.inner.lock();
        while !inner.closed {
            if self.closing.wait_until(&mut inner, deadline).timed_out() {
                break;
            }
        }
        inner.closed
    }

    /// Close the queue and wake every waiter.
    ///
    /// Queued items stay poppable. Later pushes fail. Returns `true` for the
    /// call that actually closed the queue.
    pub fn close(&self) -> bool {
        let mut inner = self.inner.lock();
        let first = !inner.closed;
        inner.closed = true;
        drop(inner);

        self.not_empty.notify_all();
        self.not_full.notify_all();
        self.closing.notify_all();
        first
    }

    /// Check if the queue has been closed.
    pub fn is_closed(&self) -> bool {
        self.inner.lock().closed
    }

    /// Number of queued items at this instant.
    pub fn len(&self) -> usize {
        self.inner.lock().items.len()
    }

    /// Check if the queue is empty at this instant.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().items.is_empty()
    }

    /// Current capacity.
    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity
    }

    /// Change the capacity.
    ///
    /// Blocked pushers are not woken; they observe the new capacity the next
    /// time a pop, drain or close wakes them.
    pub fn set_capacity(&self, capacity: usize) {
        self.inner.lock().capacity = clamp_capacity(capacity);
    }
}

impl<T> fmt::Debug for BoundedQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("BoundedQueue")
            .field("len", &inner.items.len())
            .field("capacity", &inner.capacity)
            .field("closed", &inner.closed)
            .finish()
    }
}

fn clamp_capacity(capacity: usize) -> usize {
    if capacity == 0 {
        warn!("Queue capacity 0 would block every push, using 1");
        1
    } else {
        capacity
    }
}
