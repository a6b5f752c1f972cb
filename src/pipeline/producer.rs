//! Producer task: moves items from a [`Source`] into the queue.
//!
//! Exhaustion closes the queue so the consumer can drain and stop. A source
//! failure cancels the queue instead: nothing further is enqueued and the
//! consumer stops at its next suspension point.

use crate::pipeline::error::{PipelineResult, QueueError};
use crate::pipeline::node::Source;
use crate::pipeline::queue::BoundedQueue;

/// Single producer bound to one queue and one source.
pub struct Producer<'q, T, S> {
    queue: &'q BoundedQueue<T>,
    source: S,
    produced: u64,
}

impl<'q, T, S> Producer<'q, T, S>
where
    S: Source<T>,
{
    pub fn new(queue: &'q BoundedQueue<T>, source: S) -> Self {
        Self {
            queue,
            source,
            produced: 0,
        }
    }

    /// Run until the source is exhausted, fails, or the queue is cancelled.
    ///
    /// Returns the number of items pushed.
    pub fn run(mut self) -> PipelineResult<u64> {
        tracing::debug!("Producer started on source '{}'", self.source.name());

        loop {
            if self.queue.is_cancelled() {
                tracing::debug!("Producer cancelled after {} items", self.produced);
                return Err(QueueError::Cancelled.into());
            }

            match self.source.next_item() {
                Ok(Some(item)) => {
                    if let Err(e) = self.queue.push(item) {
                        if e != QueueError::Cancelled {
                            tracing::error!("Producer push failed: {}", e);
                            self.queue.cancel();
                        }
                        return Err(e.into());
                    }
                    self.produced += 1;
                    tracing::trace!("Produced item #{}", self.produced);
                }
                Ok(None) => {
                    self.queue.close();
                    tracing::info!(
                        "Source '{}' exhausted after {} items",
                        self.source.name(),
                        self.produced
                    );
                    return Ok(self.produced);
                }
                Err(e) => {
                    tracing::error!(
                        "Source '{}' failed after {} items: {}",
                        self.source.name(),
                        self.produced,
                        e
                    );
                    self.queue.cancel();
                    return Err(e.into());
                }
            }
        }
    }
}
