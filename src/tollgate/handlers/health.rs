use crate::{store::IdentityStore, GIT_COMMIT_HASH};
use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;
use utoipa::ToSchema;

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct Health {
    commit: String,
    name: String,
    version: String,
    store: String,
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Identity store is reachable", body = Health),
        (status = 503, description = "Identity store is unreachable", body = Health)
    ),
    tag = "health"
)]
pub async fn health(Extension(store): Extension<Arc<dyn IdentityStore>>) -> impl IntoResponse {
    let store_ok = match store.ping().await {
        Ok(()) => true,
        Err(err) => {
            error!("Identity store health check failed: {err}");
            false
        }
    };

    let health = Health {
        commit: GIT_COMMIT_HASH.to_string(),
        name: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        store: if store_ok { "ok" } else { "error" }.to_string(),
    };

    let status = if store_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(health))
}
