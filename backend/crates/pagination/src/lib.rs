//! Keyset pagination primitives for the logbook list endpoints.
//!
//! - [`CursorData`] encodes and decodes opaque cursor tokens.
//! - [`compare_keys`] and [`CursorData::precedes`] define the keyset order.
//! - [`PageLimit`] and [`SortOrder`] carry validated list parameters.
//! - [`Page`] wraps one page of rows with its `nextCursor`.

mod cursor;
mod keyset;
mod limit;
mod order;
mod page;

pub use cursor::{CursorData, InvalidCursor};
pub use keyset::compare_keys;
pub use limit::{PageLimit, PageLimitError};
pub use order::{SortOrder, SortOrderParseError};
pub use page::{CURSOR_PARAM, Page, next_link_header, next_page_url};
