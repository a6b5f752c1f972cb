//! Built-in sources and sinks.

pub mod file_sink;
pub mod integer_source;
pub mod iter_source;
pub mod memory_sink;

pub use file_sink::FileSink;
pub use integer_source::{IntegerFileSource, IntegerSource};
pub use iter_source::IteratorSource;
pub use memory_sink::MemorySink;
