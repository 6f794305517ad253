//! HTTP handlers and the mapping from [`AuthError`] to responses.

pub mod health;
pub mod login;
pub mod logout;
pub mod me;
pub mod refresh;
pub mod register;
pub mod types;

use crate::error::{AuthError, AUTHENTICATION_FAILED, INVALID_TOKEN};
use axum::{
    extract::rejection::JsonRejection,
    http::{header::InvalidHeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tracing::{debug, error};
use types::ErrorResponse;

const INTERNAL_ERROR: &str = "Internal server error";

impl AuthError {
    /// HTTP status and client-facing message.
    ///
    /// Token failures and deleted subjects share one response; server-side
    /// failures never expose their cause.
    #[must_use]
    pub fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            Self::InvalidInput(reason) => (StatusCode::BAD_REQUEST, reason.clone()),
            Self::DuplicateEmail => (StatusCode::BAD_REQUEST, "Email already registered".to_string()),
            Self::Authentication => (StatusCode::UNAUTHORIZED, AUTHENTICATION_FAILED.to_string()),
            Self::InvalidToken | Self::SubjectNotFound => {
                (StatusCode::UNAUTHORIZED, INVALID_TOKEN.to_string())
            }
            Self::MissingRefreshToken => {
                (StatusCode::UNAUTHORIZED, "Refresh token missing".to_string())
            }
            Self::Configuration(_)
            | Self::StoreUnavailable(_)
            | Self::Credential(_)
            | Self::Encoding(_) => (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR.to_string()),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        if status.is_server_error() {
            error!("request failed: {self:?}");
        } else {
            debug!("request rejected: {self}");
        }
        (status, Json(ErrorResponse { message })).into_response()
    }
}

impl From<JsonRejection> for AuthError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidInput(rejection.body_text())
    }
}

impl From<InvalidHeaderValue> for AuthError {
    fn from(err: InvalidHeaderValue) -> Self {
        Self::Encoding(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{credential::CredentialError, error::StoreError};

    #[test]
    fn client_errors() {
        assert_eq!(
            AuthError::DuplicateEmail.status_and_message().0,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AuthError::InvalidInput("invalid email".to_string()).status_and_message(),
            (StatusCode::BAD_REQUEST, "invalid email".to_string())
        );
        assert_eq!(
            AuthError::MissingRefreshToken.status_and_message().0,
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn deleted_subject_is_indistinguishable_from_bad_token() {
        assert_eq!(
            AuthError::SubjectNotFound.status_and_message(),
            AuthError::InvalidToken.status_and_message()
        );
    }

    #[test]
    fn server_errors_are_generic() {
        let errors = [
            AuthError::StoreUnavailable(StoreError::Unavailable("db down at 10.0.0.5".to_string())),
            AuthError::Credential(CredentialError::Integrity("bad params".to_string())),
            AuthError::Configuration("missing secret".to_string()),
            AuthError::Encoding("bad header".to_string()),
        ];
        for err in errors {
            assert_eq!(
                err.status_and_message(),
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR.to_string())
            );
        }
    }
}
