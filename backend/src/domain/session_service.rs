//! Login and logout use-cases.

use std::sync::Arc;

use tracing::{info, warn};

use super::ports::{AuthGateway, AuthGatewayError};
use super::{Error, Identity, LoginCredentials};

/// Exchanges credentials for identities through the auth gateway.
#[derive(Clone)]
pub struct SessionService {
    gateway: Arc<dyn AuthGateway>,
}

impl SessionService {
    /// Create the service over an auth gateway.
    pub fn new(gateway: Arc<dyn AuthGateway>) -> Self {
        Self { gateway }
    }

    /// Authenticate an angler.
    ///
    /// Rejected credentials become `unauthorized`; any other gateway failure
    /// is an upstream fault and becomes `bad_gateway`.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<Identity, Error> {
        match self.gateway.sign_in(credentials).await {
            Ok(identity) => {
                info!(user_id = %identity.user_id(), "angler signed in");
                Ok(identity)
            }
            Err(AuthGatewayError::InvalidCredentials { .. }) => {
                Err(Error::unauthorized("invalid credentials"))
            }
            Err(err) => {
                warn!(error = %err, "auth gateway sign-in failed");
                Err(Error::bad_gateway("authentication service unavailable"))
            }
        }
    }

    /// Revoke the identity's token.
    ///
    /// Failures are logged and swallowed; the caller purges its session
    /// either way.
    pub async fn logout(&self, identity: &Identity) {
        if let Err(err) = self.gateway.sign_out(identity).await {
            warn!(user_id = %identity.user_id(), error = %err, "auth gateway sign-out failed");
        }
    }
}
