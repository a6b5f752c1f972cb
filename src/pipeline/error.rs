//! Pipeline-specific error types.

use std::path::PathBuf;
use thiserror::Error;

/// Why a blocking queue operation did not complete.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueError {
    #[error("queue is closed")]
    Closed,

    #[error("queue operation cancelled")]
    Cancelled,

    #[error("queue operation timed out")]
    TimedOut,

    #[error("queue lock poisoned by a panicked task")]
    Poisoned,
}

/// Failures reported by a [`Source`](crate::pipeline::node::Source).
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("cannot open source {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("read error: {0}")]
    Read(#[from] std::io::Error),

    #[error("line {line}: invalid integer {token:?}")]
    Parse { line: usize, token: String },
}

/// Failures reported by a [`Sink`](crate::pipeline::node::Sink).
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("sink '{sink}' write failed: {source}")]
    Write {
        sink: String,
        #[source]
        source: std::io::Error,
    },

    #[error("sink '{sink}' flush failed: {source}")]
    Flush {
        sink: String,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that can occur within the pipeline system.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    #[error("Sink error: {0}")]
    Sink(#[from] SinkError),

    #[error("Queue error: {0}")]
    Queue(#[from] QueueError),

    #[error("{task} task panicked")]
    TaskPanicked { task: &'static str },

    #[error("Consumer did not drain within {0:?} after the producer finished")]
    ShutdownTimedOut(std::time::Duration),

    #[error("Pipeline has already run")]
    AlreadyRun,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PipelineError {
    /// True when this error is only a consequence of another task aborting.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, PipelineError::Queue(QueueError::Cancelled))
    }
}

pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
