use crate::store::Identity;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Access => "access",
            Self::Refresh => "refresh",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Signed payload embedded in every token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenClaims {
    /// Identity id.
    pub sub: String,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

impl TokenClaims {
    #[must_use]
    pub fn for_identity(identity: &Identity, issued_at: i64, expires_at: i64) -> Self {
        Self {
            sub: identity.id.clone(),
            email: identity.email.clone(),
            iat: issued_at,
            exp: expires_at,
        }
    }
}

/// An access token and a refresh token issued together from one identity snapshot.
#[derive(Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

impl fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenPair")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claims_use_registered_names() -> Result<(), serde_json::Error> {
        let claims = TokenClaims {
            sub: "id-1".to_string(),
            email: "a@x.com".to_string(),
            iat: 10,
            exp: 20,
        };
        let value = serde_json::to_value(&claims)?;
        assert_eq!(value, serde_json::json!({"sub": "id-1", "email": "a@x.com", "iat": 10, "exp": 20}));
        Ok(())
    }

    #[test]
    fn token_pair_debug_hides_tokens() {
        let pair = TokenPair {
            access_token: "aaa.bbb.ccc".to_string(),
            refresh_token: "ddd.eee.fff".to_string(),
        };
        let debug = format!("{pair:?}");
        assert!(!debug.contains("aaa.bbb.ccc"));
        assert!(!debug.contains("ddd.eee.fff"));
    }
}
