use super::TokenKind;
use crate::error::AuthError;
use secrecy::{ExposeSecret, SecretString};

/// The two HMAC secrets, fixed for the lifetime of the authority.
#[derive(Debug)]
pub struct SigningContext {
    access_secret: SecretString,
    refresh_secret: SecretString,
}

impl SigningContext {
    /// Validate and hold both signing secrets.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Configuration`] if either secret is missing or
    /// blank, or if both secrets are the same.
    pub fn new(
        access_secret: Option<SecretString>,
        refresh_secret: Option<SecretString>,
    ) -> Result<Self, AuthError> {
        let access_secret = require("access", access_secret)?;
        let refresh_secret = require("refresh", refresh_secret)?;

        if access_secret.expose_secret() == refresh_secret.expose_secret() {
            return Err(AuthError::Configuration(
                "access and refresh token secrets must differ".to_string(),
            ));
        }

        Ok(Self {
            access_secret,
            refresh_secret,
        })
    }

    pub(super) fn key(&self, kind: TokenKind) -> &[u8] {
        match kind {
            TokenKind::Access => self.access_secret.expose_secret().as_bytes(),
            TokenKind::Refresh => self.refresh_secret.expose_secret().as_bytes(),
        }
    }
}

fn require(name: &str, secret: Option<SecretString>) -> Result<SecretString, AuthError> {
    match secret {
        Some(secret) if !secret.expose_secret().trim().is_empty() => Ok(secret),
        _ => Err(AuthError::Configuration(format!(
            "{name} token secret is not configured"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret(value: &str) -> Option<SecretString> {
        Some(SecretString::from(value.to_string()))
    }

    #[test]
    fn accepts_two_distinct_secrets() {
        let context = SigningContext::new(secret("access"), secret("refresh"));
        assert!(context.is_ok());
        if let Ok(context) = context {
            assert_eq!(context.key(TokenKind::Access), b"access");
            assert_eq!(context.key(TokenKind::Refresh), b"refresh");
        }
    }

    #[test]
    fn missing_secret_is_a_configuration_error() {
        assert!(matches!(
            SigningContext::new(None, secret("refresh")),
            Err(AuthError::Configuration(_))
        ));
        assert!(matches!(
            SigningContext::new(secret("access"), None),
            Err(AuthError::Configuration(_))
        ));
    }

    #[test]
    fn blank_secret_is_a_configuration_error() {
        assert!(matches!(
            SigningContext::new(secret("  "), secret("refresh")),
            Err(AuthError::Configuration(_))
        ));
    }

    #[test]
    fn identical_secrets_are_rejected() {
        assert!(matches!(
            SigningContext::new(secret("same"), secret("same")),
            Err(AuthError::Configuration(_))
        ));
    }

    #[test]
    fn debug_does_not_leak_secrets() {
        if let Ok(context) = SigningContext::new(secret("access-xyz"), secret("refresh-xyz")) {
            let debug = format!("{context:?}");
            assert!(!debug.contains("access-xyz"));
            assert!(!debug.contains("refresh-xyz"));
        }
    }
}
