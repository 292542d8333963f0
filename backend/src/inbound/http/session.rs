//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Wraps Actix sessions so handlers only persist, read or purge the
//! authenticated [`Identity`]. The cookie holds the user id, email and the
//! backend access token; the server encrypts it with a private key.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{AccessToken, Email, Error, Identity, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";
pub(crate) const EMAIL_KEY: &str = "email";
pub(crate) const ACCESS_TOKEN_KEY: &str = "access_token";

/// Newtype wrapper that exposes identity-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the authenticated identity in the session cookie.
    pub fn persist_identity(&self, identity: &Identity) -> Result<(), Error> {
        self.0.renew();
        let entries = [
            (USER_ID_KEY, identity.user_id().to_string()),
            (EMAIL_KEY, identity.email().as_str().to_owned()),
            (ACCESS_TOKEN_KEY, identity.access_token().expose().to_owned()),
        ];
        for (key, value) in entries {
            self.0
                .insert(key, value)
                .map_err(|error| Error::internal(format!("failed to persist session: {error}")))?;
        }
        Ok(())
    }

    fn read(&self, key: &str) -> Result<Option<String>, Error> {
        self.0
            .get::<String>(key)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))
    }

    /// Fetch the identity stored in the session, if complete and well formed.
    pub fn identity(&self) -> Result<Option<Identity>, Error> {
        let (Some(user_id), Some(email), Some(token)) = (
            self.read(USER_ID_KEY)?,
            self.read(EMAIL_KEY)?,
            self.read(ACCESS_TOKEN_KEY)?,
        ) else {
            return Ok(None);
        };
        let parsed = UserId::new(user_id).and_then(|user_id| {
            Ok(Identity::new(
                user_id,
                Email::new(email)?,
                AccessToken::new(token)?,
            ))
        });
        match parsed {
            Ok(identity) => Ok(Some(identity)),
            Err(error) => {
                warn!(%error, "invalid identity in session cookie");
                Ok(None)
            }
        }
    }

    /// Require an authenticated identity or return `401 Unauthorized`.
    pub fn require_identity(&self) -> Result<Identity, Error> {
        self.identity()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }

    /// Drop every session entry and expire the cookie.
    pub fn purge(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
