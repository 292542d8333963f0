//! Opaque keyset cursor tokens.
//!
//! A cursor records the position of the last row a client has seen: the value
//! of the active sort column and the row identifier used as a tie-breaker.
//! Tokens are base64 (URL-safe, unpadded) encodings of compact JSON. They are
//! not signed; tampering that keeps the structure intact simply moves the
//! position, and row visibility is enforced by the storage layer.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};

/// Position in a totally ordered result set.
///
/// # Examples
/// ```
/// use pagination::CursorData;
///
/// let cursor = CursorData::new("Pike", "123e4567-e89b-12d3-a456-426614174000");
/// let token = cursor.encode();
/// assert_eq!(CursorData::decode(&token), Ok(cursor));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CursorData {
    sort_value: String,
    id: String,
}

/// The single failure outcome of [`CursorData::decode`].
///
/// Malformed base64, malformed JSON, missing fields and mistyped fields all
/// collapse into this value so callers cannot learn which check failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid cursor")]
pub struct InvalidCursor;

impl CursorData {
    /// Build a cursor from the sort value and identifier of a row.
    pub fn new(sort_value: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            sort_value: sort_value.into(),
            id: id.into(),
        }
    }

    /// Sort column value of the last-seen row.
    #[must_use]
    pub fn sort_value(&self) -> &str {
        self.sort_value.as_str()
    }

    /// Identifier of the last-seen row.
    #[must_use]
    pub fn id(&self) -> &str {
        self.id.as_str()
    }

    /// Serialise the cursor into an opaque token.
    #[must_use]
    pub fn encode(&self) -> String {
        // Two string fields always serialise; an empty object is unreachable.
        let json = serde_json::to_vec(self).unwrap_or_default();
        URL_SAFE_NO_PAD.encode(json)
    }

    /// Parse a token previously produced by [`CursorData::encode`].
    ///
    /// # Errors
    /// Returns [`InvalidCursor`] for any token that is not the base64 encoding
    /// of a JSON object with string `sortValue` and `id` fields.
    pub fn decode(token: &str) -> Result<Self, InvalidCursor> {
        let bytes = URL_SAFE_NO_PAD
            .decode(token.as_bytes())
            .map_err(|_| InvalidCursor)?;
        serde_json::from_slice(&bytes).map_err(|_| InvalidCursor)
    }
}

#[cfg(test)]
mod tests {
    //! Codec behaviour for well-formed and tampered tokens.

    use super::*;
    use rstest::rstest;

    fn encode_raw(json: &str) -> String {
        URL_SAFE_NO_PAD.encode(json.as_bytes())
    }

    #[rstest]
    #[case("Pike", "123e4567-e89b-12d3-a456-426614174000")]
    #[case("", "")]
    #[case("2026-05-01T06:30:00.000000Z", "00000000-0000-0000-0000-000000000001")]
    #[case("Hecht \"groß\" / ñ & ?=", "id with spaces")]
    #[case("🎣", "line\nbreak")]
    fn decode_inverts_encode(#[case] sort_value: &str, #[case] id: &str) {
        let cursor = CursorData::new(sort_value, id);
        let decoded = CursorData::decode(&cursor.encode()).expect("round trip");
        assert_eq!(decoded, cursor);
    }

    #[rstest]
    fn tokens_are_url_safe() {
        let token = CursorData::new("???>>>", "~~~").encode();
        assert!(
            token
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'),
            "unexpected character in {token}"
        );
    }

    #[rstest]
    fn distinct_cursors_encode_differently() {
        let pairs = [
            CursorData::new("a", "b"),
            CursorData::new("b", "a"),
            CursorData::new("ab", ""),
            CursorData::new("", "ab"),
            CursorData::new("a\"", "b"),
        ];
        for (index, left) in pairs.iter().enumerate() {
            for right in pairs.iter().skip(index + 1) {
                assert_ne!(left.encode(), right.encode(), "{left:?} vs {right:?}");
            }
        }
    }

    #[rstest]
    #[case::not_base64("not-valid-base64!!!".to_owned())]
    #[case::empty(String::new())]
    #[case::base64_of_text(encode_raw("hello there"))]
    #[case::missing_fields(encode_raw(r#"{"foo":"bar"}"#))]
    #[case::missing_id(encode_raw(r#"{"sortValue":"Pike"}"#))]
    #[case::missing_sort_value(encode_raw(r#"{"id":"1"}"#))]
    #[case::wrong_types(encode_raw(r#"{"sortValue":123,"id":true}"#))]
    #[case::null_id(encode_raw(r#"{"sortValue":"Pike","id":null}"#))]
    #[case::array(encode_raw(r#"["Pike","1"]"#))]
    fn invalid_tokens_collapse_to_one_outcome(#[case] token: String) {
        assert_eq!(CursorData::decode(&token), Err(InvalidCursor));
    }

    #[rstest]
    fn padded_standard_base64_is_rejected() {
        let token = base64::engine::general_purpose::STANDARD
            .encode(br#"{"sortValue":"P","id":"1"}"#);
        assert!(token.ends_with('='));
        assert_eq!(CursorData::decode(&token), Err(InvalidCursor));
    }

    #[rstest]
    fn structurally_valid_tampering_is_accepted() {
        let token = encode_raw(r#"{"sortValue":"Zander","id":"forged"}"#);
        let cursor = CursorData::decode(&token).expect("structure is valid");
        assert_eq!(cursor.sort_value(), "Zander");
        assert_eq!(cursor.id(), "forged");
    }

    #[rstest]
    fn payload_exposes_only_two_fields() {
        let token = CursorData::new("Pike", "1").encode();
        let bytes = URL_SAFE_NO_PAD.decode(token).expect("decodes");
        let value: serde_json::Value = serde_json::from_slice(&bytes).expect("json");
        let object = value.as_object().expect("object");
        assert_eq!(object.len(), 2);
        assert!(object.contains_key("sortValue"));
        assert!(object.contains_key("id"));
    }
}
