//! Request/response types for auth endpoints.

use crate::store::PublicIdentity;
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

#[derive(ToSchema, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

#[derive(ToSchema, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Login body. The refresh token is only ever sent as a cookie.
#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct LoginResponse {
    pub user: PublicIdentity,
    pub access_token: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct RefreshResponse {
    pub access_token: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct ErrorResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Context, Result};

    #[test]
    fn register_request_debug_hides_password() -> Result<()> {
        let request: RegisterRequest = serde_json::from_value(serde_json::json!({
            "name": "Alice",
            "email": "a@x.com",
            "password": "pw123",
        }))?;
        let debug = format!("{request:?}");
        assert!(debug.contains("a@x.com"));
        assert!(!debug.contains("pw123"));
        Ok(())
    }

    #[test]
    fn login_response_has_no_refresh_token() -> Result<()> {
        let response = LoginResponse {
            user: PublicIdentity {
                id: "id-1".to_string(),
                name: "Alice".to_string(),
                email: "a@x.com".to_string(),
                role: crate::store::Role::User,
                created_at: None,
            },
            access_token: "access".to_string(),
        };
        let value = serde_json::to_value(&response)?;
        let object = value.as_object().context("expected object")?;
        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, ["access_token", "user"]);
        Ok(())
    }
}
