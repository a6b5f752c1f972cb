//! IteratorSource node: adapts any iterator into a [`Source`].

use crate::pipeline::error::SourceError;
use crate::pipeline::node::Source;

/// Source that yields the items of an iterator, then ends.
pub struct IteratorSource<I> {
    iter: I,
    name: String,
}

impl<I> IteratorSource<I> {
    pub fn new(iter: I, name: impl Into<String>) -> Self {
        Self {
            iter,
            name: name.into(),
        }
    }
}

impl<I: Iterator> IteratorSource<I> {
    /// Convenience constructor named "iterator".
    pub fn from_items<C: IntoIterator<IntoIter = I>>(items: C) -> Self {
        Self::new(items.into_iter(), "iterator")
    }
}

impl<T, I> Source<T> for IteratorSource<I>
where
    I: Iterator<Item = T> + Send,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn next_item(&mut self) -> Result<Option<T>, SourceError> {
        Ok(self.iter.next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yields_then_ends() {
        let mut source = IteratorSource::from_items(vec![1i64, 2]);
        assert_eq!(source.name(), "iterator");
        assert_eq!(source.next_item().unwrap(), Some(1));
        assert_eq!(source.next_item().unwrap(), Some(2));
        assert_eq!(source.next_item().unwrap(), None);
    }
}
