//! Page envelopes and next-page links.

use serde::Serialize;
use url::Url;

use crate::{CursorData, PageLimit};

/// Query parameter that carries the cursor token.
pub const CURSOR_PARAM: &str = "cursor";

/// One page of results plus the token for the following page.
///
/// Serialises as `{"data": [...], "nextCursor": "..." | null}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Rows on this page, in keyset order.
    #[serde(rename = "data")]
    pub items: Vec<T>,
    /// Opaque token resuming after the last row, absent on the final page.
    pub next_cursor: Option<String>,
}

impl<T> Page<T> {
    /// Build a page from rows fetched with [`PageLimit::lookahead`].
    ///
    /// When more than `limit` rows are supplied the surplus is dropped and the
    /// cursor is taken from the last retained row.
    ///
    /// # Examples
    /// ```
    /// use pagination::{CursorData, Page, PageLimit};
    ///
    /// let limit = PageLimit::new(2).expect("valid limit");
    /// let page = Page::from_lookahead(vec!["a", "b", "c"], limit, |row| {
    ///     CursorData::new(*row, *row)
    /// });
    /// assert_eq!(page.items, vec!["a", "b"]);
    /// assert!(page.next_cursor.is_some());
    /// ```
    pub fn from_lookahead<F>(mut rows: Vec<T>, limit: PageLimit, cursor_for: F) -> Self
    where
        F: FnOnce(&T) -> CursorData,
    {
        if rows.len() <= limit.as_usize() {
            return Self {
                items: rows,
                next_cursor: None,
            };
        }
        rows.truncate(limit.as_usize());
        let next_cursor = rows.last().map(|row| cursor_for(row).encode());
        Self {
            items: rows,
            next_cursor,
        }
    }
}

/// Build the URL of the next page by replacing the cursor parameter.
///
/// Every other query parameter of `current` is preserved in order.
///
/// # Examples
/// ```
/// use pagination::next_page_url;
/// use url::Url;
///
/// let current = Url::parse("https://example.test/rods?limit=5&cursor=old").expect("url");
/// let next = next_page_url(&current, "new");
/// assert_eq!(next.as_str(), "https://example.test/rods?limit=5&cursor=new");
/// ```
#[must_use]
pub fn next_page_url(current: &Url, cursor: &str) -> Url {
    let retained: Vec<(String, String)> = current
        .query_pairs()
        .filter(|(key, _)| key != CURSOR_PARAM)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();
    let mut next = current.clone();
    next.query_pairs_mut()
        .clear()
        .extend_pairs(retained)
        .append_pair(CURSOR_PARAM, cursor);
    next
}

/// Render an RFC 8288 `Link` header value pointing at the next page.
#[must_use]
pub fn next_link_header(current: &Url, cursor: &str) -> String {
    format!("<{}>; rel=\"next\"", next_page_url(current, cursor))
}
