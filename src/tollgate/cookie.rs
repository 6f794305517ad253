//! Refresh-token cookie policy.
//!
//! The refresh token only travels in an `HttpOnly` cookie scoped to the
//! refresh endpoint. Setting and clearing use identical attributes so that
//! browsers treat them as the same cookie.

use crate::token::DEFAULT_REFRESH_TTL_SECONDS;
use axum::http::{
    header::{InvalidHeaderValue, AUTHORIZATION, COOKIE},
    HeaderMap, HeaderValue,
};

pub const REFRESH_COOKIE_NAME: &str = "tollgate_refresh";
pub const REFRESH_COOKIE_PATH: &str = "/v1/auth/refresh";

#[derive(Clone, Debug)]
pub struct CookiePolicy {
    production: bool,
    max_age_seconds: i64,
}

impl CookiePolicy {
    #[must_use]
    pub fn new(production: bool) -> Self {
        Self {
            production,
            max_age_seconds: DEFAULT_REFRESH_TTL_SECONDS,
        }
    }

    /// Cookie lifetime; keep it equal to the refresh token lifetime.
    #[must_use]
    pub fn with_max_age_seconds(mut self, seconds: i64) -> Self {
        self.max_age_seconds = seconds;
        self
    }

    #[must_use]
    pub fn production(&self) -> bool {
        self.production
    }

    #[must_use]
    pub fn max_age_seconds(&self) -> i64 {
        self.max_age_seconds
    }

    #[must_use]
    pub fn same_site(&self) -> &'static str {
        if self.production {
            "None"
        } else {
            "Lax"
        }
    }

    fn build(&self, value: &str, max_age_seconds: i64) -> Result<HeaderValue, InvalidHeaderValue> {
        let mut cookie = format!(
            "{REFRESH_COOKIE_NAME}={value}; Path={REFRESH_COOKIE_PATH}; HttpOnly; SameSite={}; Max-Age={max_age_seconds}",
            self.same_site()
        );
        if self.production {
            cookie.push_str("; Secure");
        }
        HeaderValue::from_str(&cookie)
    }

    /// `Set-Cookie` value carrying a refresh token.
    ///
    /// # Errors
    ///
    /// Returns an error if the token contains bytes not allowed in a header.
    pub fn refresh_cookie(&self, token: &str) -> Result<HeaderValue, InvalidHeaderValue> {
        self.build(token, self.max_age_seconds)
    }

    /// `Set-Cookie` value that removes the refresh cookie.
    ///
    /// # Errors
    ///
    /// Returns an error if the header cannot be built.
    pub fn clear_refresh_cookie(&self) -> Result<HeaderValue, InvalidHeaderValue> {
        self.build("", 0)
    }
}

/// Read the refresh token from the request cookies.
pub fn extract_refresh_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|header| header.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|pair| {
            let (key, val) = pair.trim().split_once('=')?;
            let val = val.trim();
            (key.trim() == REFRESH_COOKIE_NAME && !val.is_empty()).then(|| val.to_string())
        })
}

/// Read a bearer token from the `Authorization` header.
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let trimmed = value.trim();
    let token = trimmed
        .strip_prefix("Bearer ")
        .or_else(|| trimmed.strip_prefix("bearer "))?
        .trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}
