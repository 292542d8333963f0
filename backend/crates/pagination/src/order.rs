//! Sort direction for keyset-paginated listings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Direction applied to the primary sort column.
///
/// The identifier tie-breaker is always ascending, whichever direction is
/// chosen here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Smallest sort value first.
    Asc,
    /// Largest sort value first.
    Desc,
}

/// Raised when a sort direction is neither `asc` nor `desc`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("sort order must be asc or desc, got {value:?}")]
pub struct SortOrderParseError {
    /// The rejected input.
    pub value: String,
}

impl SortOrder {
    /// Wire representation used in query strings.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = SortOrderParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(SortOrderParseError {
                value: other.to_owned(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("asc", SortOrder::Asc)]
    #[case("desc", SortOrder::Desc)]
    fn parses_known_directions(#[case] raw: &str, #[case] expected: SortOrder) {
        assert_eq!(raw.parse::<SortOrder>(), Ok(expected));
        assert_eq!(expected.to_string(), raw);
    }

    #[rstest]
    #[case("ASC")]
    #[case("ascending")]
    #[case("")]
    fn rejects_other_spellings(#[case] raw: &str) {
        assert!(raw.parse::<SortOrder>().is_err());
    }
}
