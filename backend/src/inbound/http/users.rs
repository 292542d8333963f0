//! Session API handlers.
//!
//! ```text
//! POST /api/v1/login {"email":"angler@example.com","password":"password"}
//! POST /api/v1/logout
//! GET /api/v1/me
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{Email, Error, LoginCredentials, Profile};
use crate::inbound::http::ApiResult;
use crate::inbound::http::context::RequestContext;
use crate::inbound::http::response;
use crate::inbound::http::schemas::{ErrorEnvelope, ProfileEnvelope};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{BodyReader, Issue};

/// Login request body for `POST /api/v1/login`.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
pub struct LoginRequest {
    #[schema(example = "angler@example.com")]
    pub email: String,
    #[schema(example = "password")]
    pub password: String,
}

fn email(value: &serde_json::Value) -> Result<String, String> {
    let raw = value.as_str().ok_or("must be a string")?;
    Email::new(raw)
        .map(|email| email.as_str().to_owned())
        .map_err(|err| err.to_string())
}

fn password(value: &serde_json::Value) -> Result<String, String> {
    match value.as_str() {
        Some("") => Err("must not be empty".to_owned()),
        Some(raw) => Ok(raw.to_owned()),
        None => Err("must be a string".to_owned()),
    }
}

/// Login body schema.
pub(crate) fn login_body(bytes: &[u8]) -> Result<LoginCredentials, Error> {
    let mut body = BodyReader::parse(bytes)?;
    let email = body.required("email", email);
    let password = body.required("password", password);
    body.finish(())?;
    LoginCredentials::try_from_parts(&email, password)
        .map_err(|err| Issue::new("email", err.to_string()).into())
}

/// Authenticate with email and password and establish a session.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in", body = ProfileEnvelope,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorEnvelope),
        (status = 401, description = "Invalid credentials", body = ErrorEnvelope),
        (status = 502, description = "Auth service unavailable", body = ErrorEnvelope)
    ),
    tags = ["session"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Bytes,
) -> ApiResult<HttpResponse> {
    let credentials = login_body(&payload)?;
    let identity = state.sessions.login(&credentials).await?;
    session.persist_identity(&identity)?;
    Ok(response::ok(Profile::from(&identity)))
}

/// Revoke the access token and clear the session.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses(
        (status = 204, description = "Signed out"),
        (status = 401, description = "Unauthorised", body = ErrorEnvelope)
    ),
    tags = ["session"],
    operation_id = "logout"
)]
#[post("/logout")]
pub async fn logout(ctx: RequestContext, session: SessionContext) -> ApiResult<HttpResponse> {
    ctx.state.sessions.logout(&ctx.identity).await;
    session.purge();
    Ok(response::no_content())
}

/// The signed-in angler.
#[utoipa::path(
    get,
    path = "/api/v1/me",
    responses(
        (status = 200, description = "Current angler", body = ProfileEnvelope),
        (status = 401, description = "Unauthorised", body = ErrorEnvelope)
    ),
    tags = ["session"],
    operation_id = "currentUser"
)]
#[get("/me")]
pub async fn me(ctx: RequestContext) -> ApiResult<HttpResponse> {
    Ok(response::ok(Profile::from(&ctx.identity)))
}
