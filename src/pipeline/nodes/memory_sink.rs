//! MemorySink node: collects items in a shared vector.
//!
//! Clones share the same storage, so a test can keep one handle while the
//! consumer thread owns the other.

use crate::pipeline::error::SinkError;
use crate::pipeline::node::Sink;
use std::sync::{Arc, Mutex, PoisonError};

/// In-memory sink with shared storage.
#[derive(Clone)]
pub struct MemorySink<T> {
    name: String,
    items: Arc<Mutex<Vec<T>>>,
}

impl<T: Clone> MemorySink<T> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            items: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Snapshot of everything recorded so far.
    pub fn items(&self) -> Vec<T> {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.items.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Clone + Send> Sink<T> for MemorySink<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn record(&mut self, item: &T) -> Result<(), SinkError> {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(item.clone());
        Ok(())
    }
}
