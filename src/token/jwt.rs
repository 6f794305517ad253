//! Minimal HS256 compact JWS encoding for [`TokenClaims`].

use super::TokenClaims;
use base64ct::{Base64UrlUnpadded, Encoding};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

const ALG_HS256: &str = "HS256";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenHeader {
    pub alg: String,
    pub typ: String,
}

impl TokenHeader {
    fn hs256() -> Self {
        Self {
            alg: ALG_HS256.to_string(),
            typ: "JWT".to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum JwtError {
    #[error("invalid token format")]
    TokenFormat,
    #[error("invalid base64url encoding")]
    Base64,
    #[error("invalid json")]
    Json(#[from] serde_json::Error),
    #[error("unsupported algorithm: {0}")]
    UnsupportedAlg(String),
    #[error("invalid signing key")]
    InvalidKey,
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
}

fn b64e_json<T: Serialize>(value: &T) -> Result<String, JwtError> {
    let json = serde_json::to_vec(value)?;
    Ok(Base64UrlUnpadded::encode_string(&json))
}

fn b64d_json<T: for<'de> Deserialize<'de>>(s: &str) -> Result<T, JwtError> {
    let bytes = Base64UrlUnpadded::decode_vec(s).map_err(|_| JwtError::Base64)?;
    Ok(serde_json::from_slice(&bytes)?)
}

fn mac(key: &[u8], signing_input: &str) -> Result<HmacSha256, JwtError> {
    let mut mac = HmacSha256::new_from_slice(key).map_err(|_| JwtError::InvalidKey)?;
    mac.update(signing_input.as_bytes());
    Ok(mac)
}

/// Sign claims into an HS256 JWT.
///
/// # Errors
///
/// Returns an error if the header or claims cannot be encoded.
pub fn sign_hs256(key: &[u8], claims: &TokenClaims) -> Result<String, JwtError> {
    let header_b64 = b64e_json(&TokenHeader::hs256())?;
    let claims_b64 = b64e_json(claims)?;
    let signing_input = format!("{header_b64}.{claims_b64}");

    let signature = mac(key, &signing_input)?.finalize().into_bytes();
    let signature_b64 = Base64UrlUnpadded::encode_string(&signature);

    Ok(format!("{signing_input}.{signature_b64}"))
}

/// Verify an HS256 JWT and return its claims.
///
/// The signature is checked before the claims are decoded, and `exp` must be
/// strictly after `now_unix_seconds`.
///
/// # Errors
///
/// Returns an error if the token is malformed, signed with another algorithm
/// or key, or expired.
pub fn verify_hs256(token: &str, key: &[u8], now_unix_seconds: i64) -> Result<TokenClaims, JwtError> {
    let mut parts = token.split('.');
    let header_b64 = parts.next().ok_or(JwtError::TokenFormat)?;
    let claims_b64 = parts.next().ok_or(JwtError::TokenFormat)?;
    let sig_b64 = parts.next().ok_or(JwtError::TokenFormat)?;
    if parts.next().is_some() {
        return Err(JwtError::TokenFormat);
    }

    let header: TokenHeader = b64d_json(header_b64)?;
    if header.alg != ALG_HS256 {
        return Err(JwtError::UnsupportedAlg(header.alg));
    }

    let signature = Base64UrlUnpadded::decode_vec(sig_b64).map_err(|_| JwtError::Base64)?;
    let signing_input = format!("{header_b64}.{claims_b64}");
    mac(key, &signing_input)?
        .verify_slice(&signature)
        .map_err(|_| JwtError::InvalidSignature)?;

    let claims: TokenClaims = b64d_json(claims_b64)?;
    if claims.exp <= now_unix_seconds {
        return Err(JwtError::Expired);
    }

    Ok(claims)
}
