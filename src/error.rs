//! Error taxonomy shared by the token authority and the HTTP adapter.

use crate::credential::CredentialError;
use thiserror::Error;

/// Message shared by every login failure so callers cannot tell an unknown
/// email from a wrong password.
pub const AUTHENTICATION_FAILED: &str = "Invalid email or password";

/// Message shared by every token failure, including deleted subjects.
pub const INVALID_TOKEN: &str = "Invalid or expired token";

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("email already registered")]
    DuplicateEmail,
    #[error("Invalid email or password")]
    Authentication,
    #[error("Invalid or expired token")]
    InvalidToken,
    #[error("Invalid or expired token")]
    SubjectNotFound,
    #[error("refresh token cookie missing")]
    MissingRefreshToken,
    #[error("identity store unavailable")]
    StoreUnavailable(#[source] StoreError),
    #[error("credential error")]
    Credential(#[from] CredentialError),
    #[error("token encoding failed: {0}")]
    Encoding(String),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("database error")]
    Database(#[from] sqlx::Error),
    #[error("failed to decode stored identity: {0}")]
    Decode(String),
    #[error("email already registered")]
    Conflict,
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        Self::StoreUnavailable(err)
    }
}
