//! Predicate-based fan-out from the consumer to category sinks.
//!
//! A `Router` is an ordered list of routes. Each route pairs a [`Category`]
//! with a predicate and the sink that receives every item the predicate
//! accepts. An item is offered to every route, so it can land in several
//! sinks (or none).

use crate::pipeline::error::{PipelineResult, SinkError};
use crate::pipeline::node::Sink;
use crate::pipeline::nodes::FileSink;
use crate::types::{Category, CategoryCounts};
use std::path::Path;

/// Boxed item predicate.
pub type Predicate<T> = Box<dyn Fn(&T) -> bool + Send>;

struct Route<T> {
    category: Category,
    predicate: Predicate<T>,
    sink: Box<dyn Sink<T>>,
}

/// Ordered set of category routes owned by the consumer.
pub struct Router<T> {
    routes: Vec<Route<T>>,
    counts: CategoryCounts,
}

impl<T> Default for Router<T> {
    fn default() -> Self {
        Self {
            routes: Vec::new(),
            counts: CategoryCounts::new(),
        }
    }
}

impl<T> Router<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`add_route`](Self::add_route).
    pub fn with_route(
        mut self,
        category: Category,
        predicate: impl Fn(&T) -> bool + Send + 'static,
        sink: impl Sink<T> + 'static,
    ) -> Self {
        self.add_route(category, predicate, sink);
        self
    }

    pub fn add_route(
        &mut self,
        category: Category,
        predicate: impl Fn(&T) -> bool + Send + 'static,
        sink: impl Sink<T> + 'static,
    ) {
        tracing::debug!("Route '{}' -> sink '{}'", category, sink.name());
        self.routes.push(Route {
            category,
            predicate: Box::new(predicate),
            sink: Box::new(sink),
        });
    }

    /// Number of routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Record `item` in every sink whose predicate matches.
    ///
    /// Returns the number of sinks the item was written to. Stops at the
    /// first sink failure.
    pub fn dispatch(&mut self, item: &T) -> Result<usize, SinkError> {
        let mut matched = 0;
        for route in &mut self.routes {
            if (route.predicate)(item) {
                route.sink.record(item)?;
                self.counts.increment(route.category);
                matched += 1;
            }
        }
        Ok(matched)
    }

    /// Flush every sink, even after a failure; returns the first failure.
    pub fn flush_all(&mut self) -> Result<(), SinkError> {
        let mut first_err = None;
        for route in &mut self.routes {
            if let Err(e) = route.sink.flush() {
                tracing::error!("{}", e);
                first_err.get_or_insert(e);
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Items routed per category so far.
    pub fn counts(&self) -> &CategoryCounts {
        &self.counts
    }
}

impl Router<i64> {
    /// One route per standard category, each with the sink built by
    /// `make_sink`.
    pub fn standard<S, E>(mut make_sink: impl FnMut(Category) -> Result<S, E>) -> Result<Self, E>
    where
        S: Sink<i64> + 'static,
    {
        let mut router = Self::new();
        for category in Category::ALL {
            let sink = make_sink(category)?;
            router.add_route(category, move |item: &i64| category.matches(*item), sink);
        }
        Ok(router)
    }

    /// Standard routes writing `<category>.out` files inside `output_dir`.
    pub fn standard_files(output_dir: &Path) -> PipelineResult<Self> {
        std::fs::create_dir_all(output_dir)?;
        let router = Self::standard(|category| {
            FileSink::create(output_dir.join(category.file_name()), category.label())
        })?;
        Ok(router)
    }
}
