use super::types::ErrorResponse;
use crate::{
    error::AuthError,
    store::{IdentityStore, PublicIdentity},
    tollgate::cookie::extract_bearer_token,
    token::TokenAuthority,
};
use axum::{extract::Extension, http::HeaderMap, Json};
use std::sync::Arc;
use tracing::instrument;

#[utoipa::path(
    get,
    path = "/v1/auth/me",
    responses(
        (status = 200, description = "Identity of the access token's subject", body = PublicIdentity),
        (status = 401, description = "Missing, invalid or expired access token", body = ErrorResponse)
    ),
    security(("bearer" = [])),
    tag = "auth"
)]
#[instrument(skip_all)]
pub async fn me(
    headers: HeaderMap,
    Extension(authority): Extension<Arc<TokenAuthority>>,
    Extension(store): Extension<Arc<dyn IdentityStore>>,
) -> Result<Json<PublicIdentity>, AuthError> {
    let token = extract_bearer_token(&headers).ok_or(AuthError::InvalidToken)?;
    let claims = authority.verify_access_token(&token)?;

    let identity = store
        .find_by_id(&claims.sub)
        .await?
        .ok_or(AuthError::SubjectNotFound)?;

    Ok(Json(identity.public()))
}
