//! Shared HTTP plumbing for the PostgREST and GoTrue endpoints.

use std::sync::Arc;
use std::time::Duration;

use mockable::Clock;
use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domain::Identity;
use crate::domain::ports::RepositoryError;

const PREVIEW_CHAR_LIMIT: usize = 160;

/// Connection details for one Supabase project.
#[derive(Clone)]
pub struct SupabaseClient {
    http: Client,
    base_url: Url,
    anon_key: Arc<str>,
    clock: Arc<dyn Clock>,
}

impl SupabaseClient {
    /// Build a client for the project at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        base_url: Url,
        anon_key: impl Into<Arc<str>>,
        timeout: Duration,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, reqwest::Error> {
        let mut base_url = base_url;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url,
            anon_key: anon_key.into(),
            clock,
        })
    }

    pub(super) fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub(super) fn endpoint(&self, path: &str) -> Result<Url, url::ParseError> {
        self.base_url.join(path)
    }

    /// Request carrying the project key, without a user token.
    pub(super) fn anonymous(&self, method: Method, url: Url) -> RequestBuilder {
        self.http
            .request(method, url)
            .header("apikey", self.anon_key.as_ref())
            .header(reqwest::header::ACCEPT, "application/json")
    }

    /// Request carrying the project key and the caller's access token, so
    /// row-level security applies.
    pub(super) fn authorised(&self, method: Method, url: Url, identity: &Identity) -> RequestBuilder {
        self.anonymous(method, url)
            .bearer_auth(identity.access_token().expose())
    }

    fn table_url(&self, table: &str) -> Result<Url, RepositoryError> {
        self.endpoint(&format!("rest/v1/{table}"))
            .map_err(|err| RepositoryError::query(format!("invalid table url: {err}")))
    }

    /// `GET /rest/v1/{table}` with `params`.
    pub(super) async fn select<T: DeserializeOwned>(
        &self,
        identity: &Identity,
        table: &str,
        params: &[(&str, String)],
    ) -> Result<Vec<T>, RepositoryError> {
        let url = self.table_url(table)?;
        let request = self.authorised(Method::GET, url, identity).query(params);
        decode(execute(request).await?)
    }

    /// `POST /rest/v1/{table}` returning the stored row.
    pub(super) async fn insert<T: DeserializeOwned>(
        &self,
        identity: &Identity,
        table: &str,
        row: &Value,
    ) -> Result<T, RepositoryError> {
        let url = self.table_url(table)?;
        let request = self
            .authorised(Method::POST, url, identity)
            .header("Prefer", "return=representation")
            .json(&[row]);
        let mut rows: Vec<T> = decode(execute(request).await?)?;
        rows.pop()
            .ok_or_else(|| RepositoryError::query("insert returned no row"))
    }

    /// `PATCH /rest/v1/{table}` returning the changed rows.
    pub(super) async fn update<T: DeserializeOwned>(
        &self,
        identity: &Identity,
        table: &str,
        params: &[(&str, String)],
        changes: &Value,
    ) -> Result<Vec<T>, RepositoryError> {
        let url = self.table_url(table)?;
        let request = self
            .authorised(Method::PATCH, url, identity)
            .query(params)
            .header("Prefer", "return=representation")
            .json(changes);
        decode(execute(request).await?)
    }

    /// `DELETE /rest/v1/{table}` returning how many rows went away.
    pub(super) async fn delete(
        &self,
        identity: &Identity,
        table: &str,
        params: &[(&str, String)],
    ) -> Result<usize, RepositoryError> {
        let url = self.table_url(table)?;
        let request = self
            .authorised(Method::DELETE, url, identity)
            .query(params)
            .header("Prefer", "return=representation");
        let rows: Vec<Value> = decode(execute(request).await?)?;
        Ok(rows.len())
    }
}

async fn execute(request: RequestBuilder) -> Result<Vec<u8>, RepositoryError> {
    let response = request.send().await.map_err(map_transport_error)?;
    let status = response.status();
    let body = response.bytes().await.map_err(map_transport_error)?;
    if !status.is_success() {
        return Err(map_status_error(status, body.as_ref()));
    }
    Ok(body.to_vec())
}

fn decode<T: DeserializeOwned>(body: Vec<u8>) -> Result<T, RepositoryError> {
    serde_json::from_slice(&body)
        .map_err(|err| RepositoryError::query(format!("unexpected PostgREST payload: {err}")))
}

fn map_transport_error(error: reqwest::Error) -> RepositoryError {
    RepositoryError::connection(error.to_string())
}

/// Whitespace-collapsed prefix of a response body for error messages.
pub(super) fn preview(body: &[u8]) -> String {
    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    compact.chars().take(PREVIEW_CHAR_LIMIT).collect()
}

#[derive(Debug, Default, Deserialize)]
struct PostgrestErrorDto {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Map a PostgREST error response onto the storage taxonomy.
///
/// Postgres error codes take precedence over the HTTP status because
/// PostgREST reports both unique and foreign-key violations as `409`. Class
/// `22` data exceptions come from client-supplied values such as a replayed
/// cursor and are reported as invalid references.
pub(super) fn map_status_error(status: StatusCode, body: &[u8]) -> RepositoryError {
    let dto: PostgrestErrorDto = serde_json::from_slice(body).unwrap_or_default();
    let message = dto.message.unwrap_or_else(|| {
        let text = preview(body);
        if text.is_empty() {
            format!("status {}", status.as_u16())
        } else {
            format!("status {}: {text}", status.as_u16())
        }
    });
    match (status, dto.code.as_deref()) {
        (_, Some("23505")) => RepositoryError::conflict(message),
        (_, Some("23503")) => RepositoryError::invalid_reference(message),
        (_, Some(code)) if code.starts_with("22") => RepositoryError::invalid_reference(message),
        (StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN, _) => {
            RepositoryError::unauthorized(message)
        }
        (StatusCode::CONFLICT, _) => RepositoryError::conflict(message),
        _ if status.is_server_error() => RepositoryError::connection(message),
        _ => RepositoryError::query(message),
    }
}
