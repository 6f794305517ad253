//! HTTP transport for the token authority.
//!
//! Access tokens travel in response bodies and `Authorization` headers;
//! refresh tokens only ever travel in the cookie described by
//! [`CookiePolicy`].

pub mod cookie;
pub(crate) mod handlers;
mod openapi;

pub use cookie::CookiePolicy;
pub use openapi::openapi;

use crate::{store::IdentityStore, token::TokenAuthority};
use anyhow::Result;
use axum::{
    body::Body,
    extract::MatchedPath,
    http::{HeaderName, HeaderValue, Request},
    Extension, Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::PropagateRequestIdLayer, set_header::SetRequestHeaderLayer, trace::TraceLayer,
};
use tracing::{info, info_span, Span};
use ulid::Ulid;

const REQUEST_ID: &str = "x-request-id";

/// Build the application router with every route and middleware layer.
#[must_use]
pub fn app(
    authority: Arc<TokenAuthority>,
    store: Arc<dyn IdentityStore>,
    cookies: CookiePolicy,
) -> Router {
    let (router, _openapi) = openapi::api_router().split_for_parts();

    router.layer(
        ServiceBuilder::new()
            .layer(SetRequestHeaderLayer::if_not_present(
                HeaderName::from_static(REQUEST_ID),
                |_req: &_| HeaderValue::from_str(Ulid::new().to_string().as_str()).ok(),
            ))
            .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                REQUEST_ID,
            )))
            .layer(TraceLayer::new_for_http().make_span_with(make_span))
            .layer(Extension(authority))
            .layer(Extension(store))
            .layer(Extension(cookies)),
    )
}

/// Serve `app` until ctrl-c.
///
/// # Errors
///
/// Returns an error if the port cannot be bound or the server fails.
pub async fn serve(port: u16, app: Router) -> Result<()> {
    let listener = TcpListener::bind(format!("::0:{port}")).await?;

    info!("Listening on [::]:{}", port);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for shutdown signal: {err}");
            }
            info!("Gracefully shutdown");
        })
        .await?;

    Ok(())
}

fn make_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID)
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");
    let matched_path = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| request.uri().path(), MatchedPath::as_str);

    info_span!(
        "http.request",
        http.method = %request.method(),
        http.route = matched_path,
        request_id
    )
}
