use crate::{
    store::{IdentityStore, MemoryStore, PgStore},
    tollgate::{self, CookiePolicy},
    token::{SigningContext, TokenAuthority},
};
use anyhow::{Context, Result};
use secrecy::SecretString;
use sqlx::postgres::PgPoolOptions;
use std::{sync::Arc, time::Duration};
use tracing::{info, warn};

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub dsn: Option<String>,
    pub access_secret: Option<SecretString>,
    pub refresh_secret: Option<SecretString>,
    pub access_ttl_seconds: i64,
    pub refresh_ttl_seconds: i64,
    pub production: bool,
}

/// Wire the authority, store and cookie policy from `args`.
///
/// # Errors
///
/// Returns an error if the signing secrets are unusable or the database is
/// unreachable.
pub async fn build_app(args: &Args) -> Result<axum::Router> {
    let signing = SigningContext::new(args.access_secret.clone(), args.refresh_secret.clone())
        .context("Invalid token signing configuration")?;

    let authority = Arc::new(
        TokenAuthority::new(signing)
            .with_access_ttl_seconds(args.access_ttl_seconds)
            .with_refresh_ttl_seconds(args.refresh_ttl_seconds),
    );

    let cookies = CookiePolicy::new(args.production).with_max_age_seconds(args.refresh_ttl_seconds);

    let store: Arc<dyn IdentityStore> = match &args.dsn {
        Some(dsn) => {
            let pool = PgPoolOptions::new()
                .min_connections(1)
                .max_connections(5)
                .max_lifetime(Duration::from_secs(60 * 2))
                .test_before_acquire(true)
                .connect(dsn)
                .await
                .context("Failed to connect to database")?;
            info!("Using PostgreSQL identity store");
            Arc::new(PgStore::new(pool))
        }
        None => {
            warn!("No DSN configured, identities are kept in memory");
            Arc::new(MemoryStore::new())
        }
    };

    Ok(tollgate::app(authority, store, cookies))
}

/// Execute the server action.
///
/// # Errors
///
/// Returns an error if configuration is invalid or the server fails.
pub async fn execute(args: Args) -> Result<()> {
    let app = build_app(&args).await?;
    tollgate::serve(args.port, app).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(access: Option<&str>, refresh: Option<&str>) -> Args {
        Args {
            port: 0,
            dsn: None,
            access_secret: access.map(|s| SecretString::from(s.to_string())),
            refresh_secret: refresh.map(|s| SecretString::from(s.to_string())),
            access_ttl_seconds: 900,
            refresh_ttl_seconds: 604_800,
            production: false,
        }
    }

    #[tokio::test]
    async fn missing_secret_fails_before_serving() {
        let result = build_app(&args(Some("access"), None)).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn equal_secrets_fail() {
        let result = build_app(&args(Some("same"), Some("same"))).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn memory_store_without_dsn() {
        let result = build_app(&args(Some("access"), Some("refresh"))).await;
        assert!(result.is_ok());
    }
}
