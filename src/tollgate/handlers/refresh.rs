use super::types::{ErrorResponse, RefreshResponse};
use crate::{
    error::AuthError,
    store::IdentityStore,
    tollgate::cookie::{extract_refresh_token, CookiePolicy},
    token::TokenAuthority,
};
use axum::{
    extract::Extension,
    http::{header::SET_COOKIE, HeaderMap},
    Json,
};
use std::sync::Arc;
use tracing::instrument;

#[utoipa::path(
    post,
    path = "/v1/auth/refresh",
    responses(
        (status = 200, description = "Token pair rotated; new refresh token set as a cookie", body = RefreshResponse),
        (status = 401, description = "Refresh cookie missing, invalid or expired", body = ErrorResponse),
        (status = 500, description = "Identity store unavailable", body = ErrorResponse)
    ),
    tag = "auth"
)]
#[instrument(skip_all)]
pub async fn refresh(
    headers: HeaderMap,
    Extension(authority): Extension<Arc<TokenAuthority>>,
    Extension(store): Extension<Arc<dyn IdentityStore>>,
    Extension(cookies): Extension<CookiePolicy>,
) -> Result<(HeaderMap, Json<RefreshResponse>), AuthError> {
    let token = extract_refresh_token(&headers).ok_or(AuthError::MissingRefreshToken)?;

    let tokens = authority.rotate(&token, store.as_ref()).await?;

    let mut response_headers = HeaderMap::new();
    response_headers.insert(SET_COOKIE, cookies.refresh_cookie(&tokens.refresh_token)?);

    Ok((
        response_headers,
        Json(RefreshResponse {
            access_token: tokens.access_token,
        }),
    ))
}
