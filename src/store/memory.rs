use super::{Identity, IdentityStore, NewIdentity};
use crate::error::StoreError;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-process identity store keyed by id.
#[derive(Default)]
pub struct MemoryStore {
    identities: RwLock<HashMap<String, Identity>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Change the email of an existing identity. Returns `false` if the id is unknown.
    pub async fn update_email(&self, id: &str, email: &str) -> bool {
        let mut identities = self.identities.write().await;
        match identities.get_mut(id) {
            Some(identity) => {
                identity.email = email.to_string();
                true
            }
            None => false,
        }
    }

    /// Delete an identity. Returns the removed record, if any.
    pub async fn remove(&self, id: &str) -> Option<Identity> {
        self.identities.write().await.remove(id)
    }

    pub async fn len(&self) -> usize {
        self.identities.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.identities.read().await.is_empty()
    }
}

#[async_trait]
impl IdentityStore for MemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, StoreError> {
        let identities = self.identities.read().await;
        Ok(identities.values().find(|i| i.email == email).cloned())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Identity>, StoreError> {
        Ok(self.identities.read().await.get(id).cloned())
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, StoreError> {
        let identities = self.identities.read().await;
        Ok(identities.values().any(|i| i.email == email))
    }

    async fn create(&self, new: NewIdentity) -> Result<Identity, StoreError> {
        let mut identities = self.identities.write().await;
        // Checked under the write lock so concurrent registrations cannot both win.
        if identities.values().any(|i| i.email == new.email) {
            return Err(StoreError::Conflict);
        }

        let identity = Identity {
            id: Uuid::now_v7().to_string(),
            email: new.email,
            display_name: new.display_name,
            password_hash: new.password_hash,
            role: new.role,
            created_at: Utc::now(),
        };
        identities.insert(identity.id.clone(), identity.clone());

        Ok(identity)
    }
}
