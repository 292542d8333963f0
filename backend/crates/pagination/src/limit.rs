//! Bounded page sizes.

use serde::Serialize;

/// Number of rows requested for one page, always within
/// [`PageLimit::MIN`]..=[`PageLimit::MAX`].
///
/// # Examples
/// ```
/// use pagination::PageLimit;
///
/// assert_eq!(PageLimit::default().get(), 20);
/// assert!(PageLimit::new(0).is_err());
/// assert!(PageLimit::new(101).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PageLimit(u32);

/// Raised when a requested page size falls outside the permitted range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("limit must be between {min} and {max}, got {value}", min = PageLimit::MIN, max = PageLimit::MAX)]
pub struct PageLimitError {
    /// The rejected value.
    pub value: i64,
}

impl PageLimit {
    /// Smallest page size.
    pub const MIN: u32 = 1;
    /// Largest page size.
    pub const MAX: u32 = 100;
    /// Page size used when the client does not ask for one.
    pub const DEFAULT: u32 = 20;

    /// Validate a requested page size.
    ///
    /// # Errors
    /// Returns [`PageLimitError`] when `value` is outside `[MIN, MAX]`.
    pub fn new(value: i64) -> Result<Self, PageLimitError> {
        u32::try_from(value)
            .ok()
            .filter(|limit| (Self::MIN..=Self::MAX).contains(limit))
            .map(Self)
            .ok_or(PageLimitError { value })
    }

    /// The page size as an integer.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// The page size as a collection length.
    #[must_use]
    pub fn as_usize(self) -> usize {
        usize::try_from(self.0).unwrap_or(usize::MAX)
    }

    /// Number of rows to fetch so the presence of a next page can be detected.
    #[must_use]
    pub fn lookahead(self) -> usize {
        self.as_usize().saturating_add(1)
    }
}

impl Default for PageLimit {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}
