//! Authenticated caller model.
//!
//! An [`Identity`] is what the session layer reconstructs for every request:
//! the caller's user id, their email address and the backend access token
//! forwarded to the storage service so row-level security applies.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use zeroize::Zeroize;

/// Maximum accepted length of an email address.
pub const EMAIL_MAX: usize = 254;

/// Validation errors returned by the user primitives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// The user id was blank.
    EmptyId,
    /// The user id was not a UUID.
    InvalidId,
    /// The email address was malformed.
    InvalidEmail,
    /// The email address exceeded [`EMAIL_MAX`].
    EmailTooLong { max: usize },
    /// The password was empty.
    EmptyPassword,
    /// The access token was empty.
    EmptyAccessToken,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "user id must not be empty"),
            Self::InvalidId => write!(f, "user id must be a valid UUID"),
            Self::InvalidEmail => write!(f, "must be a valid email address"),
            Self::EmailTooLong { max } => write!(f, "must be at most {max} characters"),
            Self::EmptyPassword => write!(f, "must not be empty"),
            Self::EmptyAccessToken => write!(f, "access token must not be empty"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable user identifier issued by the auth service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(Uuid);

impl UserId {
    /// Validate and construct a [`UserId`] from text.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let id = id.as_ref();
        if id.trim().is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        Uuid::parse_str(id)
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Generate a new random [`UserId`].
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0.to_string()
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Email address, trimmed and lowercased.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Validate and normalise an email address.
    ///
    /// Only the shape `local@domain` is checked; deliverability is the auth
    /// service's concern.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let value = raw.as_ref().trim().to_lowercase();
        if value.chars().count() > EMAIL_MAX {
            return Err(UserValidationError::EmailTooLong { max: EMAIL_MAX });
        }
        let Some((local, domain)) = value.split_once('@') else {
            return Err(UserValidationError::InvalidEmail);
        };
        let well_formed = !local.is_empty()
            && !domain.is_empty()
            && !domain.contains('@')
            && !value.chars().any(char::is_whitespace);
        if !well_formed {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(value))
    }

    /// Borrow the normalised address.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

impl TryFrom<String> for Email {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Bearer token issued by the auth service.
///
/// The value is wiped on drop and never printed by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wrap a non-empty token.
    pub fn new(token: impl Into<String>) -> Result<Self, UserValidationError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(UserValidationError::EmptyAccessToken);
        }
        Ok(Self(token))
    }

    /// Borrow the raw token for outbound headers.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

impl Drop for AccessToken {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// Email and password submitted to the login endpoint.
pub struct LoginCredentials {
    email: Email,
    password: String,
}

impl LoginCredentials {
    /// Validate raw login input.
    pub fn try_from_parts(
        email: &str,
        password: impl Into<String>,
    ) -> Result<Self, UserValidationError> {
        let email = Email::new(email)?;
        let password = password.into();
        if password.is_empty() {
            return Err(UserValidationError::EmptyPassword);
        }
        Ok(Self { email, password })
    }

    /// Normalised email address.
    #[must_use]
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Password as submitted.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Drop for LoginCredentials {
    fn drop(&mut self) {
        self.password.zeroize();
    }
}

/// The authenticated caller of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    user_id: UserId,
    email: Email,
    access_token: AccessToken,
}

impl Identity {
    /// Assemble an identity from its parts.
    #[must_use]
    pub fn new(user_id: UserId, email: Email, access_token: AccessToken) -> Self {
        Self {
            user_id,
            email,
            access_token,
        }
    }

    /// Caller's user id.
    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Caller's email address.
    #[must_use]
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Token forwarded to the storage service.
    #[must_use]
    pub fn access_token(&self) -> &AccessToken {
        &self.access_token
    }
}

/// Public view of the caller returned by `/login` and `/me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Caller's user id.
    pub user_id: UserId,
    /// Caller's email address.
    pub email: Email,
}

impl From<&Identity> for Profile {
    fn from(identity: &Identity) -> Self {
        Self {
            user_id: identity.user_id,
            email: identity.email.clone(),
        }
    }
}
