use super::types::{ErrorResponse, LoginRequest, LoginResponse};
use crate::{
    error::AuthError,
    store::IdentityStore,
    tollgate::cookie::CookiePolicy,
    token::{LoginCredential, TokenAuthority},
};
use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::{header::SET_COOKIE, HeaderMap},
    Json,
};
use secrecy::SecretString;
use std::sync::Arc;
use tracing::instrument;

#[utoipa::path(
    post,
    path = "/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated; refresh token set as an HttpOnly cookie", body = LoginResponse),
        (status = 401, description = "Invalid email or password", body = ErrorResponse),
        (status = 500, description = "Identity store unavailable", body = ErrorResponse)
    ),
    tag = "auth"
)]
#[instrument(skip_all)]
pub async fn login(
    Extension(authority): Extension<Arc<TokenAuthority>>,
    Extension(store): Extension<Arc<dyn IdentityStore>>,
    Extension(cookies): Extension<CookiePolicy>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<(HeaderMap, Json<LoginResponse>), AuthError> {
    let Json(request) = payload?;

    let outcome = authority
        .login(
            LoginCredential {
                email: request.email,
                password: SecretString::from(request.password),
            },
            store.as_ref(),
        )
        .await?;

    let mut headers = HeaderMap::new();
    headers.insert(
        SET_COOKIE,
        cookies.refresh_cookie(&outcome.tokens.refresh_token)?,
    );

    Ok((
        headers,
        Json(LoginResponse {
            user: outcome.identity,
            access_token: outcome.tokens.access_token,
        }),
    ))
}
