use crate::tollgate::cookie::CookiePolicy;
use axum::{
    extract::Extension,
    http::{header::SET_COOKIE, HeaderMap, StatusCode},
    response::IntoResponse,
};
use tracing::error;

#[utoipa::path(
    post,
    path = "/v1/auth/logout",
    responses(
        (status = 204, description = "Refresh cookie cleared")
    ),
    tag = "auth"
)]
pub async fn logout(Extension(cookies): Extension<CookiePolicy>) -> impl IntoResponse {
    // Always clear, even when no cookie was sent.
    let mut headers = HeaderMap::new();
    match cookies.clear_refresh_cookie() {
        Ok(cookie) => {
            headers.insert(SET_COOKIE, cookie);
        }
        Err(err) => error!("Failed to build clearing cookie: {err}"),
    }
    (StatusCode::NO_CONTENT, headers)
}
