//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::time::Duration;

use actix_web::cookie::{Key, SameSite};
use logbook::inbound::http::session_config::{
    BuildMode, SessionConfigError, SessionSettings, session_settings,
};
use logbook::settings::{AppSettings, SettingsError, StorageBackend};
use url::Url;

/// Failures while turning settings into a runnable server.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Session(#[from] SessionConfigError),
    #[error("failed to build outbound HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Everything `create_server` needs, resolved from [`AppSettings`].
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) storage: StorageBackend,
    pub(crate) open_meteo_url: Url,
    pub(crate) http_timeout: Duration,
}

impl ServerConfig {
    /// Validate `settings` for `mode`, loading the session key.
    ///
    /// # Errors
    /// Returns the first invalid setting.
    pub fn from_settings(settings: &AppSettings, mode: BuildMode) -> Result<Self, StartupError> {
        let SessionSettings {
            key,
            cookie_secure,
            same_site,
        } = session_settings(&settings.session_toggles(), mode)?;
        Ok(Self {
            key,
            cookie_secure,
            same_site,
            bind_addr: settings.bind_addr()?,
            storage: settings.storage()?,
            open_meteo_url: settings.open_meteo_url()?,
            http_timeout: settings.http_timeout(),
        })
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn debug_defaults_resolve_to_memory_storage() {
        let settings = AppSettings {
            session_key_file: Some("/nonexistent/logbook/key".into()),
            ..AppSettings::default()
        };
        let config = ServerConfig::from_settings(&settings, BuildMode::Debug).expect("config");
        assert_eq!(config.storage, StorageBackend::Memory);
        assert_eq!(config.bind_addr().port(), 8080);
        assert!(config.cookie_secure);
    }

    #[rstest]
    fn release_without_session_toggles_fails() {
        let result = ServerConfig::from_settings(&AppSettings::default(), BuildMode::Release);
        assert!(matches!(result, Err(StartupError::Session(_))));
    }

    #[rstest]
    fn partial_supabase_settings_fail() {
        let settings = AppSettings {
            supabase_url: Some("https://project.supabase.co".into()),
            session_key_file: Some("/nonexistent/logbook/key".into()),
            ..AppSettings::default()
        };
        let result = ServerConfig::from_settings(&settings, BuildMode::Debug);
        assert!(matches!(
            result,
            Err(StartupError::Settings(SettingsError::PartialSupabase))
        ));
    }
}
