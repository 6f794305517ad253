//! Identity records and the store boundary the token authority reads from.
//!
//! The authority never persists identities itself; it only calls the
//! [`IdentityStore`] it is handed. Two implementations ship with the crate:
//! [`MemoryStore`] for local runs and tests, and [`PgStore`] for Postgres.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use crate::error::StoreError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use utoipa::ToSchema;

#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "USER",
            Self::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = StoreError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "USER" => Ok(Self::User),
            "ADMIN" => Ok(Self::Admin),
            other => Err(StoreError::Decode(format!("unknown role: {other}"))),
        }
    }
}

/// A stored account, including its password hash.
#[derive(Clone)]
pub struct Identity {
    pub id: String,
    pub email: String,
    pub display_name: String,
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl Identity {
    /// The fields safe to return to clients.
    #[must_use]
    pub fn public(&self) -> PublicIdentity {
        PublicIdentity {
            id: self.id.clone(),
            name: self.display_name.clone(),
            email: self.email.clone(),
            role: self.role,
            created_at: None,
        }
    }
}

// The hash stays out of logs.
impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identity")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("display_name", &self.display_name)
            .field("role", &self.role)
            .field("created_at", &self.created_at)
            .finish_non_exhaustive()
    }
}

#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PublicIdentity {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Input for [`IdentityStore::create`]; the secret is already hashed.
#[derive(Clone)]
pub struct NewIdentity {
    pub email: String,
    pub display_name: String,
    pub password_hash: String,
    pub role: Role,
}

impl fmt::Debug for NewIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewIdentity")
            .field("email", &self.email)
            .field("display_name", &self.display_name)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

#[async_trait]
pub trait IdentityStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, StoreError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Identity>, StoreError>;

    async fn exists_by_email(&self, email: &str) -> Result<bool, StoreError>;

    /// Persist a new identity.
    ///
    /// Returns [`StoreError::Conflict`] when the email is already taken.
    async fn create(&self, identity: NewIdentity) -> Result<Identity, StoreError>;

    /// Cheap liveness probe used by `/health`.
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> Identity {
        Identity {
            id: "id-1".to_string(),
            email: "a@x.com".to_string(),
            display_name: "Alice".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            role: Role::Admin,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn public_projection_drops_hash() -> Result<(), serde_json::Error> {
        let value = serde_json::to_value(identity().public())?;
        assert_eq!(value.get("name").and_then(|v| v.as_str()), Some("Alice"));
        assert_eq!(value.get("role").and_then(|v| v.as_str()), Some("ADMIN"));
        assert!(value.get("password_hash").is_none());
        assert!(value.get("created_at").is_none());
        Ok(())
    }

    #[test]
    fn debug_redacts_hash() {
        let debug = format!("{:?}", identity());
        assert!(debug.contains("a@x.com"));
        assert!(!debug.contains("argon2id"));
    }

    #[test]
    fn role_parses_stored_text() {
        assert_eq!("USER".parse::<Role>().ok(), Some(Role::User));
        assert_eq!("ADMIN".parse::<Role>().ok(), Some(Role::Admin));
        assert!("root".parse::<Role>().is_err());
        assert_eq!(Role::default().to_string(), "USER");
    }
}
