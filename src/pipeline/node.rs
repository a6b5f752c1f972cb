//! Endpoint abstractions for the pipeline.
//!
//! - **`Source<T>`**: feeds the producer; a finite, non-restartable sequence.
//! - **`Sink<T>`**: receives every item routed to one category; written only
//!   by the consumer thread, so implementations need no synchronization.

use crate::pipeline::error::{SinkError, SourceError};

/// Lazy, finite supply of items for the producer.
pub trait Source<T>: Send {
    /// Human-readable name used in logs.
    fn name(&self) -> &str;

    /// Next item, `Ok(None)` on clean exhaustion.
    fn next_item(&mut self) -> Result<Option<T>, SourceError>;
}

/// Append-only destination for one category of items.
pub trait Sink<T>: Send {
    /// Human-readable name used in logs.
    fn name(&self) -> &str;

    /// Append one item.
    fn record(&mut self, item: &T) -> Result<(), SinkError>;

    /// Make everything recorded so far durable.
    fn flush(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}

impl<T, S: Source<T> + ?Sized> Source<T> for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn next_item(&mut self) -> Result<Option<T>, SourceError> {
        (**self).next_item()
    }
}

impl<T, S: Sink<T> + ?Sized> Sink<T> for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn record(&mut self, item: &T) -> Result<(), SinkError> {
        (**self).record(item)
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        (**self).flush()
    }
}

#[cfg(test)]
mockall::mock! {
    pub Sink {}

    impl Sink<i64> for Sink {
        fn name(&self) -> &str;
        fn record(&mut self, item: &i64) -> Result<(), SinkError>;
        fn flush(&mut self) -> Result<(), SinkError>;
    }
}
