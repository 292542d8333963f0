//! Session cookie settings validated per build mode.
//!
//! Debug builds tolerate missing or malformed toggles, warn and fall back to
//! defaults. Release builds require every toggle, a secure `SameSite=None`
//! and a session key file of at least 64 bytes.

use std::path::PathBuf;

use actix_web::cookie::{Key, SameSite};
use tracing::warn;
use zeroize::Zeroize;

pub mod fingerprint;

const SESSION_KEY_DEFAULT_PATH: &str = "/var/run/secrets/session_key";
const SESSION_KEY_MIN_LEN: usize = 64;
const COOKIE_SECURE: &str = "LOGBOOK_SESSION_COOKIE_SECURE";
const SAME_SITE: &str = "LOGBOOK_SESSION_SAME_SITE";
const ALLOW_EPHEMERAL: &str = "LOGBOOK_SESSION_ALLOW_EPHEMERAL";
const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";
const SAME_SITE_EXPECTED: &str = "Strict|Lax|None";

/// Build mode for session configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Tolerates defaults and warns about missing toggles.
    Debug,
    /// Requires explicit, valid toggles.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use logbook::inbound::http::session_config::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// assert_eq!(mode == BuildMode::Debug, cfg!(debug_assertions));
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Raw session toggles as loaded from configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionToggles {
    pub key_file: Option<PathBuf>,
    pub cookie_secure: Option<String>,
    pub same_site: Option<String>,
    pub allow_ephemeral: Option<String>,
}

/// Validated session settings.
pub struct SessionSettings {
    /// Signing and encryption key for cookie sessions.
    pub key: Key,
    pub cookie_secure: bool,
    pub same_site: SameSite,
}

/// Errors raised while validating session configuration.
#[derive(thiserror::Error, Debug)]
pub enum SessionConfigError {
    #[error("missing required setting: {name}")]
    Missing { name: &'static str },
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    Invalid {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
    #[error("{SAME_SITE}=None requires {COOKIE_SECURE}=1")]
    InsecureSameSiteNone,
    #[error("{ALLOW_EPHEMERAL} must be 0 in release builds")]
    EphemeralNotAllowed,
}

/// Validate `toggles` for `mode` and load the session key.
///
/// # Examples
///
/// ```rust
/// use logbook::inbound::http::session_config::{BuildMode, SessionToggles, session_settings};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let key_path = std::env::temp_dir().join("logbook_session_key_example");
/// std::fs::write(&key_path, vec![b'a'; 64])?;
///
/// let toggles = SessionToggles {
///     key_file: Some(key_path.clone()),
///     cookie_secure: Some("1".into()),
///     same_site: Some("Strict".into()),
///     allow_ephemeral: Some("0".into()),
/// };
/// let settings = session_settings(&toggles, BuildMode::Release)?;
/// assert!(settings.cookie_secure);
///
/// std::fs::remove_file(&key_path)?;
/// # Ok(())
/// # }
/// ```
pub fn session_settings(
    toggles: &SessionToggles,
    mode: BuildMode,
) -> Result<SessionSettings, SessionConfigError> {
    let cookie_secure = cookie_secure(toggles.cookie_secure.as_deref(), mode)?;
    let same_site = same_site(toggles.same_site.as_deref(), mode, cookie_secure)?;
    let allow_ephemeral = allow_ephemeral(toggles.allow_ephemeral.as_deref(), mode)?;
    let key = session_key(toggles.key_file.as_ref(), mode, allow_ephemeral)?;
    Ok(SessionSettings {
        key,
        cookie_secure,
        same_site,
    })
}

/// Parse a boolean toggle, or apply the debug fallback.
fn flag(
    name: &'static str,
    value: Option<&str>,
    mode: BuildMode,
    debug_default: bool,
) -> Result<bool, SessionConfigError> {
    match value {
        Some(raw) => match parse_bool(raw) {
            Some(flag) => Ok(flag),
            None if mode.is_debug() => {
                warn!(setting = name, value = raw, "invalid toggle; using default");
                Ok(debug_default)
            }
            None => Err(SessionConfigError::Invalid {
                name,
                value: raw.to_owned(),
                expected: BOOL_EXPECTED,
            }),
        },
        None if mode.is_debug() => {
            warn!(setting = name, "toggle not set; using default");
            Ok(debug_default)
        }
        None => Err(SessionConfigError::Missing { name }),
    }
}

fn cookie_secure(value: Option<&str>, mode: BuildMode) -> Result<bool, SessionConfigError> {
    flag(COOKIE_SECURE, value, mode, true)
}

fn allow_ephemeral(value: Option<&str>, mode: BuildMode) -> Result<bool, SessionConfigError> {
    let allowed = flag(ALLOW_EPHEMERAL, value, mode, false)?;
    if allowed && !mode.is_debug() {
        return Err(SessionConfigError::EphemeralNotAllowed);
    }
    Ok(allowed)
}

fn same_site(
    value: Option<&str>,
    mode: BuildMode,
    cookie_secure: bool,
) -> Result<SameSite, SessionConfigError> {
    let fallback = if mode.is_debug() {
        SameSite::Lax
    } else {
        SameSite::Strict
    };
    let Some(raw) = value else {
        if mode.is_debug() {
            warn!(setting = SAME_SITE, "toggle not set; using default");
            return Ok(fallback);
        }
        return Err(SessionConfigError::Missing { name: SAME_SITE });
    };

    match raw.to_ascii_lowercase().as_str() {
        "lax" => Ok(SameSite::Lax),
        "strict" => Ok(SameSite::Strict),
        "none" if cookie_secure => Ok(SameSite::None),
        "none" if mode.is_debug() => {
            warn!("SameSite=None without a secure cookie; browsers may drop the session");
            Ok(SameSite::None)
        }
        "none" => Err(SessionConfigError::InsecureSameSiteNone),
        _ if mode.is_debug() => {
            warn!(setting = SAME_SITE, value = raw, "invalid toggle; using default");
            Ok(fallback)
        }
        _ => Err(SessionConfigError::Invalid {
            name: SAME_SITE,
            value: raw.to_owned(),
            expected: SAME_SITE_EXPECTED,
        }),
    }
}

fn session_key(
    key_file: Option<&PathBuf>,
    mode: BuildMode,
    allow_ephemeral: bool,
) -> Result<Key, SessionConfigError> {
    let path = key_file
        .cloned()
        .unwrap_or_else(|| PathBuf::from(SESSION_KEY_DEFAULT_PATH));

    match std::fs::read(&path) {
        Ok(mut bytes) => {
            let length = bytes.len();
            if mode == BuildMode::Release && length < SESSION_KEY_MIN_LEN {
                bytes.zeroize();
                return Err(SessionConfigError::KeyTooShort {
                    path,
                    length,
                    min_len: SESSION_KEY_MIN_LEN,
                });
            }
            let key = Key::derive_from(&bytes);
            bytes.zeroize();
            Ok(key)
        }
        Err(error) if mode.is_debug() || allow_ephemeral => {
            warn!(
                path = %path.display(),
                error = %error,
                "using temporary session key (dev only)"
            );
            Ok(Key::generate())
        }
        Err(source) => Err(SessionConfigError::KeyRead { path, source }),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}
