//! Application settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `LOGBOOK_*` environment variables and
//! configuration files, in increasing precedence of the former.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::inbound::http::session_config::SessionToggles;
use crate::outbound::open_meteo::DEFAULT_OPEN_METEO_URL;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Server configuration.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "LOGBOOK")]
pub struct AppSettings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// Supabase project URL; requires `supabase_anon_key`.
    pub supabase_url: Option<String>,
    /// Supabase anonymous API key; requires `supabase_url`.
    pub supabase_anon_key: Option<String>,
    /// Open-Meteo base URL override.
    pub open_meteo_url: Option<String>,
    /// Timeout applied to every outbound HTTP call.
    pub http_timeout_secs: Option<u64>,
    /// File holding the session cookie key.
    pub session_key_file: Option<PathBuf>,
    /// Mark session cookies `Secure` (`1|0|true|false|yes|no`).
    pub session_cookie_secure: Option<String>,
    /// `Strict`, `Lax` or `None`.
    pub session_same_site: Option<String>,
    /// Allow a generated session key when the key file is unreadable.
    pub session_allow_ephemeral: Option<String>,
}

/// Where rows and identities live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    /// In-process tables and the fixture auth gateway.
    Memory,
    /// Supabase PostgREST and GoTrue.
    Supabase { url: Url, anon_key: String },
}

/// Errors raised while interpreting [`AppSettings`].
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address '{value}': {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("invalid URL for {name} '{value}': {source}")]
    Url {
        name: &'static str,
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("supabase_url and supabase_anon_key must be set together")]
    PartialSupabase,
}

impl AppSettings {
    /// Address to bind, defaulting to `0.0.0.0:8080`.
    ///
    /// # Errors
    /// [`SettingsError::BindAddr`] when the value is not `host:port`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    /// Selected storage backend.
    ///
    /// # Errors
    /// [`SettingsError::PartialSupabase`] when only one Supabase setting is
    /// given, or [`SettingsError::Url`] for a malformed project URL.
    pub fn storage(&self) -> Result<StorageBackend, SettingsError> {
        match (&self.supabase_url, &self.supabase_anon_key) {
            (None, None) => Ok(StorageBackend::Memory),
            (Some(url), Some(anon_key)) => Ok(StorageBackend::Supabase {
                url: parse_url("supabase_url", url)?,
                anon_key: anon_key.clone(),
            }),
            _ => Err(SettingsError::PartialSupabase),
        }
    }

    /// Open-Meteo base URL.
    ///
    /// # Errors
    /// [`SettingsError::Url`] for a malformed override.
    pub fn open_meteo_url(&self) -> Result<Url, SettingsError> {
        parse_url(
            "open_meteo_url",
            self.open_meteo_url.as_deref().unwrap_or(DEFAULT_OPEN_METEO_URL),
        )
    }

    #[must_use]
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs.unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS))
    }

    /// Session toggles for [`crate::inbound::http::session_config::session_settings`].
    #[must_use]
    pub fn session_toggles(&self) -> SessionToggles {
        SessionToggles {
            key_file: self.session_key_file.clone(),
            cookie_secure: self.session_cookie_secure.clone(),
            same_site: self.session_same_site.clone(),
            allow_ephemeral: self.session_allow_ephemeral.clone(),
        }
    }
}

fn parse_url(name: &'static str, value: &str) -> Result<Url, SettingsError> {
    Url::parse(value).map_err(|source| SettingsError::Url {
        name,
        value: value.to_owned(),
        source,
    })
}
