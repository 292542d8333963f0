//! Short, non-reversible fingerprint of the session key.
//!
//! Logged at startup so operators can tell which key a deployment runs with.

use actix_web::cookie::Key;
use sha2::{Digest, Sha256};

const FINGERPRINT_BYTES: usize = 8;

/// First eight bytes of the SHA-256 of the signing half, as lowercase hex.
///
/// # Examples
///
/// ```rust
/// use actix_web::cookie::Key;
/// use logbook::inbound::http::session_config::fingerprint::key_fingerprint;
///
/// let fp = key_fingerprint(&Key::generate());
/// assert_eq!(fp.len(), 16);
/// ```
#[must_use]
pub fn key_fingerprint(key: &Key) -> String {
    let digest = Sha256::digest(key.signing());
    hex::encode(&digest[..FINGERPRINT_BYTES])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn same_material_same_fingerprint() {
        let first = Key::derive_from(&[b'a'; 64]);
        let second = Key::derive_from(&[b'a'; 64]);
        assert_eq!(key_fingerprint(&first), key_fingerprint(&second));
    }

    #[rstest]
    fn different_material_differs() {
        let first = Key::derive_from(&[b'a'; 64]);
        let second = Key::derive_from(&[b'b'; 64]);
        assert_ne!(key_fingerprint(&first), key_fingerprint(&second));
    }

    #[rstest]
    fn fingerprint_is_lowercase_hex() {
        let fp = key_fingerprint(&Key::generate());
        assert_eq!(fp.len(), FINGERPRINT_BYTES * 2);
        assert!(fp.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }
}
