use super::{Identity, IdentityStore, NewIdentity, Role};
use crate::error::StoreError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{postgres::PgRow, Connection, PgPool, Row};
use tracing::{info_span, Instrument, Span};
use uuid::Uuid;

const SELECT_COLUMNS: &str = "id, email, display_name, password_hash, role, created_at";

/// Identity store backed by the `users` table (see `db/sql/01_tollgate.sql`).
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn db_span(operation: &str, statement: &str) -> Span {
    info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = operation,
        db.statement = statement
    )
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().is_some_and(|code| code.as_ref() == "23505"),
        _ => false,
    }
}

fn identity_from_row(row: &PgRow) -> Result<Identity, StoreError> {
    let id: Uuid = row.try_get("id")?;
    let role: String = row.try_get("role")?;
    let created_at: DateTime<Utc> = row.try_get("created_at")?;

    Ok(Identity {
        id: id.to_string(),
        email: row.try_get("email")?,
        display_name: row.try_get("display_name")?,
        password_hash: row.try_get("password_hash")?,
        role: role.parse()?,
        created_at,
    })
}

#[async_trait]
impl IdentityStore for PgStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, StoreError> {
        let query = format!("SELECT {SELECT_COLUMNS} FROM users WHERE email = $1");
        let row = sqlx::query(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .instrument(db_span("SELECT", &query))
            .await?;

        row.as_ref().map(identity_from_row).transpose()
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Identity>, StoreError> {
        // Subjects that are not UUIDs can never match a stored row.
        let Ok(id) = Uuid::parse_str(id) else {
            return Ok(None);
        };

        let query = format!("SELECT {SELECT_COLUMNS} FROM users WHERE id = $1");
        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .instrument(db_span("SELECT", &query))
            .await?;

        row.as_ref().map(identity_from_row).transpose()
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, StoreError> {
        let query = "SELECT EXISTS(SELECT 1 FROM users WHERE email = $1) AS found";
        let row = sqlx::query(query)
            .bind(email)
            .fetch_one(&self.pool)
            .instrument(db_span("SELECT", query))
            .await?;

        Ok(row.try_get("found")?)
    }

    async fn create(&self, new: NewIdentity) -> Result<Identity, StoreError> {
        let query = format!(
            "INSERT INTO users (id, email, display_name, password_hash, role) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {SELECT_COLUMNS}"
        );
        let result = sqlx::query(&query)
            .bind(Uuid::now_v7())
            .bind(&new.email)
            .bind(&new.display_name)
            .bind(&new.password_hash)
            .bind(new.role.as_str())
            .fetch_one(&self.pool)
            .instrument(db_span("INSERT", &query))
            .await;

        match result {
            Ok(row) => identity_from_row(&row),
            Err(err) if is_unique_violation(&err) => Err(StoreError::Conflict),
            Err(err) => Err(err.into()),
        }
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let acquire_span = info_span!(
            "db.acquire",
            db.system = "postgresql",
            db.operation = "ACQUIRE"
        );
        let mut conn = self.pool.acquire().instrument(acquire_span).await?;

        let ping_span = info_span!("db.ping", db.system = "postgresql", db.operation = "PING");
        conn.ping().instrument(ping_span).await?;

        Ok(())
    }
}
