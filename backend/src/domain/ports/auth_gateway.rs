//! Driven port for the external auth service.

use async_trait::async_trait;
use uuid::Uuid;

use super::define_port_error;
use crate::domain::{AccessToken, Identity, LoginCredentials, UserId};

define_port_error! {
    /// Errors surfaced while talking to the auth service.
    pub enum AuthGatewayError {
        /// Email or password were rejected.
        InvalidCredentials => "auth rejected credentials",
        /// The auth service could not be reached or timed out.
        Transport => "auth transport failed",
        /// The auth service answered with an unexpected status or payload.
        Rejected => "auth service rejected request",
    }
}

/// Port exchanging credentials for an identity and revoking it again.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Exchange email and password for an authenticated identity.
    async fn sign_in(&self, credentials: &LoginCredentials) -> Result<Identity, AuthGatewayError>;

    /// Revoke the identity's access token.
    async fn sign_out(&self, identity: &Identity) -> Result<(), AuthGatewayError>;
}

/// Email accepted by [`FixtureAuthGateway`].
pub const FIXTURE_EMAIL: &str = "angler@example.com";
/// Password accepted by [`FixtureAuthGateway`].
pub const FIXTURE_PASSWORD: &str = "password";
/// User id issued by [`FixtureAuthGateway`].
pub const FIXTURE_USER_ID: Uuid = Uuid::from_u128(0x123e_4567_e89b_12d3_a456_4266_1417_4000);

/// In-process gateway for local development and tests.
///
/// Accepts [`FIXTURE_EMAIL`] with [`FIXTURE_PASSWORD`] and issues an identity
/// for [`FIXTURE_USER_ID`]; sign-out always succeeds.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAuthGateway;

#[async_trait]
impl AuthGateway for FixtureAuthGateway {
    async fn sign_in(&self, credentials: &LoginCredentials) -> Result<Identity, AuthGatewayError> {
        if credentials.email().as_str() != FIXTURE_EMAIL || credentials.password() != FIXTURE_PASSWORD
        {
            return Err(AuthGatewayError::invalid_credentials("email or password mismatch"));
        }
        let token = AccessToken::new(format!("fixture-token-{FIXTURE_USER_ID}"))
            .map_err(|err| AuthGatewayError::rejected(err.to_string()))?;
        Ok(Identity::new(
            UserId::from_uuid(FIXTURE_USER_ID),
            credentials.email().clone(),
            token,
        ))
    }

    async fn sign_out(&self, _identity: &Identity) -> Result<(), AuthGatewayError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(FIXTURE_EMAIL, FIXTURE_PASSWORD, true)]
    #[case("ANGLER@example.com", FIXTURE_PASSWORD, true)]
    #[case(FIXTURE_EMAIL, "wrong", false)]
    #[case("other@example.com", FIXTURE_PASSWORD, false)]
    #[tokio::test]
    async fn fixture_gateway_accepts_only_fixture_credentials(
        #[case] email: &str,
        #[case] password: &str,
        #[case] should_succeed: bool,
    ) {
        let credentials = LoginCredentials::try_from_parts(email, password).expect("shape");
        let result = FixtureAuthGateway.sign_in(&credentials).await;
        match (should_succeed, result) {
            (true, Ok(identity)) => {
                assert_eq!(*identity.user_id().as_uuid(), FIXTURE_USER_ID);
                assert_eq!(identity.email().as_str(), FIXTURE_EMAIL);
            }
            (false, Err(err)) => {
                assert!(matches!(err, AuthGatewayError::InvalidCredentials { .. }));
            }
            (true, Err(err)) => panic!("expected success, got {err}"),
            (false, Ok(identity)) => panic!("expected failure, got {identity:?}"),
        }
    }
}
