//! Error handling for numclass-rs
//!
//! This module defines the crate-level error type and a Result alias for use
//! outside the pipeline internals (configuration, reports, the binary).

use crate::pipeline::error::{PipelineError, SourceError};
use thiserror::Error;

/// Main error type for numclass-rs operations
#[derive(Error, Debug)]
pub enum NumClassError {
    /// Errors raised by the producer/consumer pipeline
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// Errors related to configuration loading/saving
    #[error("Configuration error: {0}")]
    Config(String),

    /// Command-line usage errors
    #[error("Usage error: {0}")]
    Usage(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<NumClassError>,
    },
}

impl NumClassError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        NumClassError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

impl From<SourceError> for NumClassError {
    fn from(err: SourceError) -> Self {
        NumClassError::Pipeline(PipelineError::Source(err))
    }
}

impl From<serde_json::Error> for NumClassError {
    fn from(err: serde_json::Error) -> Self {
        NumClassError::Serialization(err.to_string())
    }
}

/// Result type alias for numclass-rs operations
pub type Result<T> = std::result::Result<T, NumClassError>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error result
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context lazily to an error result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<NumClassError>,
{
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| Into::<NumClassError>::into(e).with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| Into::<NumClassError>::into(e).with_context(f()))
    }
}
