//! GoTrue-backed [`AuthGateway`].

use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::client::{SupabaseClient, preview};
use crate::domain::ports::{AuthGateway, AuthGatewayError};
use crate::domain::{AccessToken, Email, Identity, LoginCredentials, UserId};

#[derive(Serialize)]
struct PasswordGrant<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    user: UserDto,
}

#[derive(Deserialize)]
struct UserDto {
    id: String,
    #[serde(default)]
    email: Option<String>,
}

/// Signs anglers in with email and password against Supabase Auth.
#[derive(Clone)]
pub struct SupabaseAuthGateway {
    client: SupabaseClient,
}

impl SupabaseAuthGateway {
    /// Wrap a configured client.
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }
}

fn map_transport_error(error: &reqwest::Error) -> AuthGatewayError {
    AuthGatewayError::transport(error.to_string())
}

fn map_sign_in_status(status: StatusCode, body: &[u8]) -> AuthGatewayError {
    let detail = format!("status {}: {}", status.as_u16(), preview(body));
    match status {
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            AuthGatewayError::invalid_credentials(detail)
        }
        _ if status.is_server_error() => AuthGatewayError::transport(detail),
        _ => AuthGatewayError::rejected(detail),
    }
}

fn identity_from(response: TokenResponse, fallback: &Email) -> Result<Identity, AuthGatewayError> {
    let user_id = UserId::new(&response.user.id)
        .map_err(|err| AuthGatewayError::rejected(format!("user id: {err}")))?;
    let email = match response.user.email.as_deref() {
        Some(raw) => Email::new(raw)
            .map_err(|err| AuthGatewayError::rejected(format!("user email: {err}")))?,
        None => fallback.clone(),
    };
    let token = AccessToken::new(response.access_token)
        .map_err(|err| AuthGatewayError::rejected(format!("access token: {err}")))?;
    Ok(Identity::new(user_id, email, token))
}

#[async_trait]
impl AuthGateway for SupabaseAuthGateway {
    async fn sign_in(&self, credentials: &LoginCredentials) -> Result<Identity, AuthGatewayError> {
        let mut url = self
            .client
            .endpoint("auth/v1/token")
            .map_err(|err| AuthGatewayError::rejected(err.to_string()))?;
        url.query_pairs_mut().append_pair("grant_type", "password");
        let grant = PasswordGrant {
            email: credentials.email().as_str(),
            password: credentials.password(),
        };
        let response = self
            .client
            .anonymous(Method::POST, url)
            .json(&grant)
            .send()
            .await
            .map_err(|err| map_transport_error(&err))?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|err| map_transport_error(&err))?;
        if !status.is_success() {
            return Err(map_sign_in_status(status, body.as_ref()));
        }
        let token: TokenResponse = serde_json::from_slice(body.as_ref())
            .map_err(|err| AuthGatewayError::rejected(format!("token payload: {err}")))?;
        identity_from(token, credentials.email())
    }

    async fn sign_out(&self, identity: &Identity) -> Result<(), AuthGatewayError> {
        let url = self
            .client
            .endpoint("auth/v1/logout")
            .map_err(|err| AuthGatewayError::rejected(err.to_string()))?;
        let response = self
            .client
            .authorised(Method::POST, url, identity)
            .send()
            .await
            .map_err(|err| map_transport_error(&err))?;
        let status = response.status();
        // An expired or revoked token is already signed out.
        if status.is_success() || status == StatusCode::UNAUTHORIZED {
            return Ok(());
        }
        debug!(status = status.as_u16(), "sign-out rejected");
        Err(AuthGatewayError::rejected(format!(
            "status {}",
            status.as_u16()
        )))
    }
}
