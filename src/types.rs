//! Core data types shared across the crate.
//!
//! - [`Category`] - An output category an integer can be routed to
//! - [`CategoryCounts`] - Per-category routing tally

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Output category for a classified integer.
///
/// `Even`/`Odd` are mutually exclusive and exhaustive; `Positive`/`Negative`
/// are mutually exclusive (zero is neither); `Square` and `Cube` are
/// independent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Even,
    Odd,
    Positive,
    Negative,
    Square,
    Cube,
}

impl Category {
    /// All categories, in output order.
    pub const ALL: [Category; 6] = [
        Category::Even,
        Category::Odd,
        Category::Positive,
        Category::Negative,
        Category::Square,
        Category::Cube,
    ];

    /// Stable lowercase label.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Even => "even",
            Category::Odd => "odd",
            Category::Positive => "positive",
            Category::Negative => "negative",
            Category::Square => "square",
            Category::Cube => "cube",
        }
    }

    /// File name of this category's output inside the output directory.
    pub fn file_name(&self) -> String {
        format!("{}.out", self.label())
    }

    /// Whether `value` belongs to this category.
    pub fn matches(&self, value: i64) -> bool {
        use crate::classify;
        match self {
            Category::Even => classify::is_even(value),
            Category::Odd => classify::is_odd(value),
            Category::Positive => classify::is_positive(value),
            Category::Negative => classify::is_negative(value),
            Category::Square => classify::is_perfect_square(value),
            Category::Cube => classify::is_perfect_cube(value),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Number of items routed to each category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCounts(BTreeMap<Category, u64>);

impl CategoryCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, category: Category) {
        *self.0.entry(category).or_insert(0) += 1;
    }

    /// Count for `category` (zero if never routed).
    pub fn get(&self, category: Category) -> u64 {
        self.0.get(&category).copied().unwrap_or(0)
    }

    /// Sum over all categories.
    pub fn total(&self) -> u64 {
        self.0.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, u64)> + '_ {
        self.0.iter().map(|(c, n)| (*c, *n))
    }
}
