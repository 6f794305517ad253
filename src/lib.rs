//! # Tollgate
//!
//! `tollgate` issues and rotates session tokens for password-authenticated
//! identities.
//!
//! ## Tokens
//!
//! A successful login yields a short-lived **access token** (15 minutes by
//! default) and a long-lived **refresh token** (7 days by default). Both are
//! HS256-signed JWTs carrying `sub`, `email`, `iat` and `exp`, each signed with
//! its own secret so one kind can never be presented as the other.
//!
//! Refreshing re-reads the identity from the store, so a renamed email shows up
//! in the next access token and a deleted account can no longer refresh.
//!
//! ## Transport
//!
//! The access token is returned in the response body and sent back as
//! `Authorization: Bearer`. The refresh token only ever travels in an
//! `HttpOnly` cookie scoped to `/v1/auth/refresh`.
//!
//! ## Credentials
//!
//! Passwords are stored as Argon2id PHC strings and never leave the store
//! boundary in responses or logs.

pub mod cli;
pub mod credential;
pub mod error;
pub mod store;
pub mod token;
pub mod tollgate;
pub mod validation;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn git_commit_hash_is_hex_or_unknown() {
        if GIT_COMMIT_HASH == "unknown" {
            return;
        }
        assert!(GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn built_info_matches_cargo() {
        assert_eq!(built_info::PKG_NAME, "tollgate");
        assert_eq!(built_info::PKG_VERSION, env!("CARGO_PKG_VERSION"));
    }
}
