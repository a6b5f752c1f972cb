//! Test sources and sinks with controllable behaviour

use numclass_rs::pipeline::{Sink, SinkError, Source, SourceError};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Yields `0..count`, optionally sleeping before each item
pub struct SlowSource {
    next: i64,
    count: i64,
    delay: Duration,
}

impl SlowSource {
    pub fn new(count: i64, delay: Duration) -> Self {
        Self {
            next: 0,
            count,
            delay,
        }
    }
}

impl Source<i64> for SlowSource {
    fn name(&self) -> &str {
        "slow"
    }

    fn next_item(&mut self) -> Result<Option<i64>, SourceError> {
        if self.next >= self.count {
            return Ok(None);
        }
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
        self.next += 1;
        Ok(Some(self.next - 1))
    }
}

/// Counts records and optionally sleeps on each one
#[derive(Clone)]
pub struct CountingSink {
    records: Arc<AtomicU64>,
    delay: Duration,
}

impl CountingSink {
    pub fn new(delay: Duration) -> Self {
        Self {
            records: Arc::new(AtomicU64::new(0)),
            delay,
        }
    }

    pub fn records(&self) -> u64 {
        self.records.load(Ordering::SeqCst)
    }
}

impl Sink<i64> for CountingSink {
    fn name(&self) -> &str {
        "counting"
    }

    fn record(&mut self, _item: &i64) -> Result<(), SinkError> {
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
        self.records.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Fails every write after the first `ok` records
pub struct FailingSink {
    ok: u64,
}

impl FailingSink {
    pub fn after(ok: u64) -> Self {
        Self { ok }
    }
}

impl Sink<i64> for FailingSink {
    fn name(&self) -> &str {
        "failing"
    }

    fn record(&mut self, _item: &i64) -> Result<(), SinkError> {
        if self.ok == 0 {
            return Err(SinkError::Write {
                sink: "failing".to_string(),
                source: std::io::Error::other("no space left on device"),
            });
        }
        self.ok -= 1;
        Ok(())
    }
}
