//! Fixed-capacity blocking FIFO shared by the producer and consumer threads.
//!
//! One `Mutex` guards the buffer together with the lifecycle flags, and two
//! `Condvar`s carry the wake-ups:
//!
//! - `not_full`: signalled by `pop`, waited on by `push`.
//! - `not_empty`: signalled by `push`, waited on by `pop`.
//!
//! End-of-stream is an explicit `close()`; `pop` keeps returning buffered
//! items after a close and only reports `Ok(None)` once the buffer is empty.
//! `cancel()` aborts every waiter on both conditions and makes all further
//! operations fail with [`QueueError::Cancelled`].

use crate::pipeline::error::{PipelineError, PipelineResult, QueueError};
use std::collections::VecDeque;
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

/// Default buffer capacity.
pub const DEFAULT_CAPACITY: usize = 50;

struct QueueState<T> {
    items: VecDeque<T>,
    closed: bool,
    cancelled: bool,
}

type StateGuard<'a, T> = MutexGuard<'a, QueueState<T>>;

/// Bounded blocking queue with one exclusive lock and two conditions.
pub struct BoundedQueue<T> {
    state: Mutex<QueueState<T>>,
    not_full: Condvar,
    not_empty: Condvar,
    capacity: usize,
}

impl<T> BoundedQueue<T> {
    /// Create a queue holding at most `capacity` items.
    pub fn new(capacity: usize) -> PipelineResult<Self> {
        if capacity == 0 {
            return Err(PipelineError::Config(
                "queue capacity must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            state: Mutex::new(QueueState {
                items: VecDeque::with_capacity(capacity.min(DEFAULT_CAPACITY)),
                closed: false,
                cancelled: false,
            }),
            not_full: Condvar::new(),
            not_empty: Condvar::new(),
            capacity,
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of buffered items.
    pub fn len(&self) -> usize {
        self.lock_lenient().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_closed(&self) -> bool {
        self.lock_lenient().closed
    }

    pub fn is_cancelled(&self) -> bool {
        self.lock_lenient().cancelled
    }

    /// Append `item`, blocking while the queue is full.
    pub fn push(&self, item: T) -> Result<(), QueueError> {
        self.push_until(item, None)
    }

    /// Like [`push`](Self::push), giving up with [`QueueError::TimedOut`]
    /// once `deadline` has passed.
    pub fn push_until(&self, item: T, deadline: Option<Instant>) -> Result<(), QueueError> {
        let mut state = self.lock()?;
        loop {
            if state.cancelled {
                return Err(QueueError::Cancelled);
            }
            if state.closed {
                return Err(QueueError::Closed);
            }
            if state.items.len() < self.capacity {
                break;
            }
            state = wait(&self.not_full, state, deadline)?;
        }

        state.items.push_back(item);
        drop(state);
        self.not_empty.notify_one();
        Ok(())
    }

    /// Remove the oldest item, blocking while the queue is empty.
    ///
    /// Returns `Ok(None)` once the queue is closed and fully drained.
    pub fn pop(&self) -> Result<Option<T>, QueueError> {
        self.pop_until(None)
    }

    /// Like [`pop`](Self::pop), giving up with [`QueueError::TimedOut`]
    /// once `deadline` has passed.
    pub fn pop_until(&self, deadline: Option<Instant>) -> Result<Option<T>, QueueError> {
        let mut state = self.lock()?;
        loop {
            if state.cancelled {
                return Err(QueueError::Cancelled);
            }
            if let Some(item) = state.items.pop_front() {
                drop(state);
                self.not_full.notify_one();
                return Ok(Some(item));
            }
            if state.closed {
                return Ok(None);
            }
            state = wait(&self.not_empty, state, deadline)?;
        }
    }

    /// Mark end-of-stream. Buffered items remain available to `pop`.
    pub fn close(&self) {
        let mut state = self.lock_lenient();
        if state.closed {
            return;
        }
        state.closed = true;
        drop(state);
        tracing::debug!("Queue closed");
        self.not_empty.notify_all();
        self.not_full.notify_all();
    }

    /// Abort all current and future operations.
    pub fn cancel(&self) {
        let mut state = self.lock_lenient();
        if state.cancelled {
            return;
        }
        state.cancelled = true;
        let discarded = state.items.len();
        drop(state);
        tracing::debug!("Queue cancelled with {} buffered items", discarded);
        self.not_empty.notify_all();
        self.not_full.notify_all();
    }

    fn lock(&self) -> Result<StateGuard<'_, T>, QueueError> {
        self.state.lock().map_err(|_| QueueError::Poisoned)
    }

    // Flag updates and introspection must keep working after a task panicked
    // while holding the lock, otherwise shutdown could not proceed.
    fn lock_lenient(&self) -> StateGuard<'_, T> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn wait<'a, T>(
    cond: &Condvar,
    guard: StateGuard<'a, T>,
    deadline: Option<Instant>,
) -> Result<StateGuard<'a, T>, QueueError> {
    match deadline {
        None => cond.wait(guard).map_err(|_| QueueError::Poisoned),
        Some(deadline) => {
            let now = Instant::now();
            if now >= deadline {
                return Err(QueueError::TimedOut);
            }
            let (guard, _) = cond
                .wait_timeout(guard, deadline - now)
                .map_err(|_| QueueError::Poisoned)?;
            Ok(guard)
        }
    }
}
