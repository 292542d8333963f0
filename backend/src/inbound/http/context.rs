//! Per-request context for authenticated handlers.

use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;

use super::session::SessionContext;
use super::state::HttpState;
use crate::domain::{Error, Identity};

/// The authenticated caller plus the services handlers call.
///
/// Extraction fails with `401` when the session carries no identity.
pub struct RequestContext {
    pub identity: Identity,
    pub state: web::Data<HttpState>,
}

impl FromRequest for RequestContext {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let session = SessionContext::from_request(req, payload);
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        Box::pin(async move {
            let state = state.ok_or_else(|| Error::internal("HTTP state not configured"))?;
            let identity = session.await.map_err(Error::from)?.require_identity()?;
            Ok(Self { identity, state })
        })
    }
}
