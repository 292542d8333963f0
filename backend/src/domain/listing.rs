//! Shared list request model for keyset-paginated collections.
//!
//! Every list endpoint accepts the same knobs: free-text search, whether to
//! include soft-deleted rows, page size, cursor, sort column and direction.
//! Sortable columns are per-entity enums implementing [`SortColumn`]; rows
//! expose their keyset position through [`Keyed`].

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use pagination::{CursorData, PageLimit, SortOrder, compare_keys};
use uuid::Uuid;

/// Maximum length of the free-text search term.
pub const SEARCH_MAX: usize = 200;

/// A column a collection may be ordered by.
pub trait SortColumn: Copy + Eq + Default + fmt::Debug + Send + Sync + 'static {
    /// Every accepted column, default first.
    const ALL: &'static [Self];

    /// Column name as accepted on the query string and sent to storage.
    fn column(self) -> &'static str;

    /// Direction applied when the request does not name one.
    fn default_order(self) -> SortOrder;

    /// Look up a column by its wire name.
    fn parse(raw: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|column| column.column() == raw)
    }

    /// Whether the column holds timestamps. Timestamp columns end in `_at`.
    fn is_timestamp(self) -> bool {
        self.column().ends_with("_at")
    }

    /// Whether a cursor sort value can be compared against this column.
    fn accepts_sort_value(self, value: &str) -> bool {
        !self.is_timestamp() || DateTime::parse_from_rfc3339(value).is_ok()
    }

    /// Comma-separated list of accepted names, for validation messages.
    fn allowed() -> String {
        Self::ALL
            .iter()
            .map(|column| column.column())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Validated list parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRequest<S> {
    /// Trimmed search term; blank input is `None`.
    pub search: Option<String>,
    /// Whether soft-deleted rows are listed.
    pub include_deleted: bool,
    /// Page size.
    pub limit: PageLimit,
    /// Position after which the page starts.
    pub cursor: Option<CursorData>,
    /// Sort column.
    pub sort: S,
    /// Sort direction.
    pub order: SortOrder,
}

impl<S: SortColumn> Default for ListRequest<S> {
    fn default() -> Self {
        let sort = S::default();
        Self {
            search: None,
            include_deleted: false,
            limit: PageLimit::default(),
            cursor: None,
            sort,
            order: sort.default_order(),
        }
    }
}

impl<S: SortColumn> ListRequest<S> {
    /// First page of `limit` rows in the default order.
    #[must_use]
    pub fn first(limit: PageLimit) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }
}

/// A row that can be positioned in a keyset ordering.
pub trait Keyed<S: SortColumn> {
    /// Row identifier, used as the tie-breaker.
    fn key_id(&self) -> Uuid;

    /// Value of `column` rendered so byte order equals column order.
    fn sort_value(&self, column: S) -> String;

    /// Cursor pointing at this row.
    fn cursor(&self, column: S) -> CursorData {
        CursorData::new(self.sort_value(column), self.key_id().to_string())
    }
}

/// Render a timestamp in fixed-width UTC form with microseconds.
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use logbook::domain::sort_timestamp;
///
/// let ts = Utc.with_ymd_and_hms(2026, 5, 1, 6, 30, 0).unwrap();
/// assert_eq!(sort_timestamp(&ts), "2026-05-01T06:30:00.000000Z");
/// ```
#[must_use]
pub fn sort_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Apply a list request to rows already filtered for visibility.
///
/// Sorts by `(sort value, id)`, drops rows at or before the cursor and keeps
/// one extra row so the caller can build the page with look-ahead.
pub fn apply_keyset<T, S>(mut rows: Vec<T>, request: &ListRequest<S>) -> Vec<T>
where
    T: Keyed<S>,
    S: SortColumn,
{
    let sort = request.sort;
    let order = request.order;
    let mut keyed: Vec<(String, String, T)> = rows
        .drain(..)
        .map(|row| (row.sort_value(sort), row.key_id().to_string(), row))
        .filter(|(value, id, _)| {
            request
                .cursor
                .as_ref()
                .is_none_or(|cursor| cursor.precedes(value, id, order))
        })
        .collect();
    keyed.sort_by(|left, right| {
        compare_keys(
            (left.0.as_str(), left.1.as_str()),
            (right.0.as_str(), right.1.as_str()),
            order,
        )
    });
    keyed
        .into_iter()
        .take(request.limit.lookahead())
        .map(|(_, _, row)| row)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    enum Column {
        #[default]
        Label,
    }

    impl SortColumn for Column {
        const ALL: &'static [Self] = &[Self::Label];

        fn column(self) -> &'static str {
            "label"
        }

        fn default_order(self) -> SortOrder {
            SortOrder::Asc
        }
    }

    #[derive(Debug, Clone)]
    struct Row(&'static str, u128);

    impl Keyed<Column> for Row {
        fn key_id(&self) -> Uuid {
            Uuid::from_u128(self.1)
        }

        fn sort_value(&self, _: Column) -> String {
            self.0.to_owned()
        }
    }

    fn rows() -> Vec<Row> {
        vec![Row("b", 2), Row("a", 3), Row("b", 1), Row("c", 4), Row("a", 5)]
    }

    fn ids(rows: &[Row]) -> Vec<u128> {
        rows.iter().map(|row| row.1).collect()
    }

    #[rstest]
    #[case(SortOrder::Asc, vec![3, 5, 1, 2, 4])]
    #[case(SortOrder::Desc, vec![4, 1, 2, 3, 5])]
    fn orders_with_id_tie_break(#[case] order: SortOrder, #[case] expected: Vec<u128>) {
        let request = ListRequest {
            order,
            limit: PageLimit::new(10).expect("limit"),
            ..ListRequest::<Column>::default()
        };
        assert_eq!(ids(&apply_keyset(rows(), &request)), expected);
    }

    #[rstest]
    fn keeps_one_lookahead_row() {
        let request = ListRequest::<Column>::first(PageLimit::new(2).expect("limit"));
        assert_eq!(ids(&apply_keyset(rows(), &request)), vec![3, 5, 1]);
    }

    #[rstest]
    fn cursor_skips_rows_up_to_and_including_position() {
        let cursor = Row("b", 1).cursor(Column::Label);
        let request = ListRequest {
            cursor: Some(cursor),
            ..ListRequest::<Column>::default()
        };
        assert_eq!(ids(&apply_keyset(rows(), &request)), vec![2, 4]);
    }

    #[rstest]
    fn parse_and_allowed_use_wire_names() {
        assert_eq!(Column::parse("label"), Some(Column::Label));
        assert_eq!(Column::parse("Label"), None);
        assert_eq!(Column::allowed(), "label");
    }

    #[rstest]
    #[case(crate::domain::TripSort::StartedAt, "2026-05-01T06:30:00.000000Z", true)]
    #[case(crate::domain::TripSort::StartedAt, "Dawn on the Lech", false)]
    #[case(crate::domain::TripSort::Title, "Dawn on the Lech", true)]
    #[case(crate::domain::RodSort::UpdatedAt, "", false)]
    #[case(crate::domain::RodSort::Name, "", true)]
    fn cursor_values_must_fit_the_column<S: SortColumn>(
        #[case] column: S,
        #[case] value: &str,
        #[case] accepted: bool,
    ) {
        assert_eq!(column.accepts_sort_value(value), accepted);
    }
}
