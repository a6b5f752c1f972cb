//! Bounded-buffer producer/consumer pipeline.
//!
//! One producer thread moves items from a `Source` into a fixed-capacity
//! queue; one consumer thread pops them and routes each to every category
//! sink whose predicate matches. The two threads share nothing but the queue.
//!
//! # Architecture
//!
//! ```text
//! [Source] ──► Producer ──► BoundedQueue ──► Consumer ──► Router ──► [even.out]
//!                                                               ├──► [odd.out]
//!                                                               └──► ...
//! ```
//!
//! # Design
//!
//! - **One lock, two conditions**: `not_full` wakes the producer, `not_empty`
//!   wakes the consumer; each signal targets the condition that just became true.
//! - **Explicit end-of-stream**: the producer closes the queue on exhaustion and
//!   the consumer drains every buffered item before it exits.
//! - **Bounded shutdown**: cancellation is observed at every queue wait, and the
//!   executor can cap how long the consumer drains after the producer is done.
//! - **No globals**: `Pipeline` owns the queue, the `Router` owns the sinks.

pub mod consumer;
pub mod error;
pub mod executor;
pub mod node;
pub mod nodes;
pub mod producer;
pub mod queue;
pub mod report;
pub mod router;

pub use consumer::{Consumer, ConsumerSummary};
pub use error::{PipelineError, PipelineResult, QueueError, SinkError, SourceError};
pub use executor::{Pipeline, Task};
pub use node::{Sink, Source};
pub use producer::Producer;
pub use queue::{BoundedQueue, DEFAULT_CAPACITY};
pub use report::PipelineReport;
pub use router::{Predicate, Router};
