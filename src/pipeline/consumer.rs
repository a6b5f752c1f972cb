//! Consumer task: pops items and routes each one through a [`Router`].
//!
//! The consumer has no notion of "done" other than what the queue tells it:
//! `Ok(None)` from `pop` means the producer closed the stream and every
//! buffered item has been classified.

use crate::pipeline::error::{PipelineResult, QueueError};
use crate::pipeline::queue::BoundedQueue;
use crate::pipeline::router::Router;
use crate::types::CategoryCounts;

/// What the consumer handled before it stopped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsumerSummary {
    pub consumed: u64,
    pub counts: CategoryCounts,
}

/// Single consumer bound to one queue and the sinks behind a router.
pub struct Consumer<'q, T> {
    queue: &'q BoundedQueue<T>,
    router: Router<T>,
    consumed: u64,
}

impl<'q, T> Consumer<'q, T> {
    pub fn new(queue: &'q BoundedQueue<T>, router: Router<T>) -> Self {
        Self {
            queue,
            router,
            consumed: 0,
        }
    }

    /// Run until end-of-stream, a sink failure, or cancellation.
    ///
    /// Sinks are flushed on every exit path.
    pub fn run(mut self) -> PipelineResult<ConsumerSummary> {
        tracing::debug!("Consumer started with {} routes", self.router.len());

        loop {
            match self.queue.pop() {
                Ok(Some(item)) => {
                    if let Err(e) = self.router.dispatch(&item) {
                        tracing::error!("Consumer stopping after {} items: {}", self.consumed, e);
                        self.queue.cancel();
                        // best-effort, failures already logged
                        self.router.flush_all().ok();
                        return Err(e.into());
                    }
                    self.consumed += 1;
                    tracing::trace!("Consumed item #{}", self.consumed);
                }
                Ok(None) => {
                    self.router.flush_all()?;
                    tracing::info!("Consumer drained queue after {} items", self.consumed);
                    return Ok(ConsumerSummary {
                        consumed: self.consumed,
                        counts: self.router.counts().clone(),
                    });
                }
                Err(e) => {
                    if e == QueueError::Cancelled {
                        tracing::debug!("Consumer cancelled after {} items", self.consumed);
                    } else {
                        tracing::error!("Consumer pop failed: {}", e);
                        self.queue.cancel();
                    }
                    // best-effort, failures already logged
                    self.router.flush_all().ok();
                    return Err(e.into());
                }
            }
        }
    }
}
