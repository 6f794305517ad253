use super::types::{ErrorResponse, RegisterRequest};
use crate::{
    error::AuthError,
    store::{IdentityStore, PublicIdentity},
    token::{Registration, TokenAuthority},
};
use axum::{extract::rejection::JsonRejection, extract::Extension, http::StatusCode, Json};
use secrecy::SecretString;
use std::sync::Arc;
use tracing::instrument;

#[utoipa::path(
    post,
    path = "/v1/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Identity created; no tokens are issued", body = PublicIdentity),
        (status = 400, description = "Invalid input or email already registered", body = ErrorResponse),
        (status = 500, description = "Identity store unavailable", body = ErrorResponse)
    ),
    tag = "auth"
)]
#[instrument(skip_all)]
pub async fn register(
    Extension(authority): Extension<Arc<TokenAuthority>>,
    Extension(store): Extension<Arc<dyn IdentityStore>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<PublicIdentity>), AuthError> {
    let Json(request) = payload?;

    let identity = authority
        .register(
            Registration {
                name: request.name,
                email: request.email,
                password: SecretString::from(request.password),
            },
            store.as_ref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(identity)))
}
