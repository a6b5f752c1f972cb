//! Integer classification predicates.
//!
//! The square and cube tests start from the floating-point root rounded to
//! the nearest integer and then confirm with exact integer arithmetic. An
//! `f64` cannot represent every `i64`, so the rounded root may be off by one
//! for large inputs (and `cbrt(8.0)` is not guaranteed to be exactly `2.0`);
//! the neighbours `r - 1` and `r + 1` are therefore checked as well.

use crate::types::Category;

pub fn is_even(value: i64) -> bool {
    value % 2 == 0
}

pub fn is_odd(value: i64) -> bool {
    !is_even(value)
}

/// Strictly greater than zero.
pub fn is_positive(value: i64) -> bool {
    value > 0
}

/// Strictly less than zero.
pub fn is_negative(value: i64) -> bool {
    value < 0
}

/// `value >= 0` and `r * r == value` for some integer `r`.
pub fn is_perfect_square(value: i64) -> bool {
    if value < 0 {
        return false;
    }
    let root = (value as f64).sqrt().round() as i64;
    (root - 1..=root + 1)
        .filter(|r| *r >= 0)
        .any(|r| r.checked_mul(r) == Some(value))
}

/// `r * r * r == value` for some integer `r` of either sign.
pub fn is_perfect_cube(value: i64) -> bool {
    let root = (value as f64).cbrt().round() as i64;
    (root - 1..=root + 1).any(|r| r.checked_mul(r).and_then(|sq| sq.checked_mul(r)) == Some(value))
}

/// Every category `value` belongs to, in [`Category::ALL`] order.
pub fn classify(value: i64) -> Vec<Category> {
    Category::ALL
        .into_iter()
        .filter(|category| category.matches(value))
        .collect()
}
