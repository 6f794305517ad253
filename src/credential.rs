//! Password hashing and verification.
//!
//! Secrets are hashed with Argon2id into PHC strings. Callers treat the output
//! as opaque; only [`verify_secret`] interprets it.

use argon2::{
    password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("secret could not be encoded: {0}")]
    Encoding(String),
    #[error("stored hash failed integrity checks: {0}")]
    Integrity(String),
    #[error("hashing task failed: {0}")]
    Task(String),
}

/// Hash a plaintext secret with a fresh random salt.
///
/// # Errors
///
/// Returns [`CredentialError::Encoding`] for an empty secret or when the
/// underlying primitive rejects the input.
pub fn hash_secret(secret: &str) -> Result<String, CredentialError> {
    if secret.is_empty() {
        return Err(CredentialError::Encoding("empty secret".to_string()));
    }

    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(secret.as_bytes(), &salt)
        .map_err(|e| CredentialError::Encoding(e.to_string()))?
        .to_string();

    Ok(hash)
}

/// Check a plaintext secret against a stored hash.
///
/// A wrong secret or a stored value that is not a PHC string yields
/// `Ok(false)`.
///
/// # Errors
///
/// Returns [`CredentialError::Integrity`] when the stored hash parses but
/// carries an algorithm or parameters Argon2 cannot evaluate.
pub fn verify_secret(secret: &str, stored_hash: &str) -> Result<bool, CredentialError> {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return Ok(false);
    };

    match Argon2::default().verify_password(secret.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(e) => Err(CredentialError::Integrity(e.to_string())),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_round_trip() {
        let hash = hash_secret("pw123").unwrap();
        assert!(verify_secret("pw123", &hash).unwrap());
        assert!(!verify_secret("other", &hash).unwrap());
    }

    #[test]
    fn hash_is_salted_per_call() {
        let first = hash_secret("pw123").unwrap();
        let second = hash_secret("pw123").unwrap();
        assert_ne!(first, second);
        assert!(verify_secret("pw123", &second).unwrap());
    }

    #[test]
    fn hash_rejects_empty_secret() {
        assert!(matches!(hash_secret(""), Err(CredentialError::Encoding(_))));
    }

    #[test]
    fn hash_is_phc_argon2id() {
        let hash = hash_secret("pw123").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(!hash.contains("pw123"));
    }

    #[test]
    fn malformed_stored_hash_is_a_mismatch() {
        assert!(!verify_secret("pw123", "not-a-hash").unwrap());
        assert!(!verify_secret("pw123", "").unwrap());
    }

    #[test]
    fn unknown_algorithm_is_an_integrity_error() {
        let foreign = "$scrypt$ln=15,r=8,p=1$c2FsdHNhbHQ$aGFzaGhhc2hoYXNoaGFzaA";
        assert!(matches!(
            verify_secret("pw123", foreign),
            Err(CredentialError::Integrity(_))
        ));
    }
}
