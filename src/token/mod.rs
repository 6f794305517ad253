//! Access/refresh token issuance, verification and rotation.
//!
//! Tokens are HS256-signed JWTs. Access and refresh tokens are keyed with two
//! distinct secrets held by a [`SigningContext`], so one kind can never be
//! accepted where the other is expected. No server-side session exists: a
//! refresh token stays valid until its own `exp`, even after it has been
//! rotated.

mod authority;
mod claims;
pub mod jwt;
mod secrets;

pub use authority::{
    Authenticated, LoginCredential, Registration, TokenAuthority, DEFAULT_ACCESS_TTL_SECONDS,
    DEFAULT_REFRESH_TTL_SECONDS, MAX_TTL_SECONDS,
};
pub use claims::{TokenClaims, TokenKind, TokenPair};
pub use secrets::SigningContext;
