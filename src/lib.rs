//! # numclass-rs: Bounded-Buffer Integer Classifier
//!
//! Reads integers from a source on one thread and classifies them on another,
//! with a fixed-capacity queue between the two. Every integer is written to
//! each category file it belongs to (`even.out`, `odd.out`, `positive.out`,
//! `negative.out`, `square.out`, `cube.out`).
//!
//! ## Architecture
//!
//! - **Queue**: `BoundedQueue<T>`, one mutex and two condition variables
//! - **Producer**: pulls from a `Source`, closes the queue at end of input
//! - **Consumer**: pops, classifies and routes through a `Router`
//! - **Executor**: `Pipeline` spawns both threads and supervises shutdown
//! - **Communication**: task exits are reported over a crossbeam channel
//!
//! ## Example
//!
//! ```ignore
//! use numclass_rs::{
//!     config::PipelineConfig,
//!     pipeline::{nodes::IntegerFileSource, Pipeline, Router},
//! };
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = PipelineConfig::load_or_default();
//!     let source = IntegerFileSource::open("input.txt")?;
//!     let router = Router::standard_files(&config.output_dir)?;
//!
//!     let report = Pipeline::new(&config)?.run(source, router)?;
//!     report.log();
//!     Ok(())
//! }
//! ```

pub mod classify;
pub mod config;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod types;

// Re-export commonly used types
pub use config::PipelineConfig;
pub use error::{NumClassError, Result};
pub use pipeline::{BoundedQueue, Pipeline, PipelineError, PipelineReport, Router, Sink, Source};
pub use types::{Category, CategoryCounts};
