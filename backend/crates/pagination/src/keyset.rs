//! Keyset ordering over `(sort value, id)` pairs.
//!
//! Sort values are compared as strings, so callers must render them such that
//! lexicographic order matches the column order (for example fixed-width UTC
//! timestamps). Identifiers break ties in ascending order regardless of the
//! primary direction, which yields a stable total order across pages.

use std::cmp::Ordering;

use crate::{CursorData, SortOrder};

/// Compare two rows under the keyset order.
///
/// # Examples
/// ```
/// use std::cmp::Ordering;
/// use pagination::{SortOrder, compare_keys};
///
/// assert_eq!(compare_keys(("b", "1"), ("a", "9"), SortOrder::Desc), Ordering::Less);
/// assert_eq!(compare_keys(("a", "1"), ("a", "2"), SortOrder::Desc), Ordering::Less);
/// ```
#[must_use]
pub fn compare_keys(left: (&str, &str), right: (&str, &str), order: SortOrder) -> Ordering {
    let primary = match order {
        SortOrder::Asc => left.0.cmp(right.0),
        SortOrder::Desc => right.0.cmp(left.0),
    };
    primary.then_with(|| left.1.cmp(right.1))
}

impl CursorData {
    /// Whether a row with the given key sorts strictly after this cursor.
    #[must_use]
    pub fn precedes(&self, sort_value: &str, id: &str, order: SortOrder) -> bool {
        compare_keys((self.sort_value(), self.id()), (sort_value, id), order) == Ordering::Less
    }
}
