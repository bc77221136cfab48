/**
 * In-Memory Store
 *
 * Implements both repositories on top of hash maps guarded by a tokio
 * `RwLock`. It is used when no `DATABASE_URL` is configured and by the test
 * suite. Data does not survive a restart.
 *
 * Email uniqueness is checked and the record inserted under the same write
 * lock, so concurrent signups for one address cannot both succeed.
 */

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::backend::auth::users::{NewUser, Subscription, User};
use crate::backend::contacts::types::{Contact, ContactPatch, NewContact};
use crate::backend::store::{ContactRepository, RepositoryError, UserRepository, EMAIL_IN_USE};

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    contacts: HashMap<Uuid, Contact>,
}

/// Process-local record store
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mutate a user in place, bumping `updated_at`
    async fn update_user(
        &self,
        id: Uuid,
        change: impl FnOnce(&mut User) + Send,
    ) -> Option<User> {
        let mut tables = self.tables.write().await;
        let user = tables.users.get_mut(&id)?;
        change(user);
        user.updated_at = Utc::now();
        Some(user.clone())
    }
}

fn visible_to(contact: &Contact, owner: Option<Uuid>) -> bool {
    owner.map_or(true, |owner| contact.owner == owner)
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn insert(&self, user: NewUser) -> Result<User, RepositoryError> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|existing| existing.email == user.email) {
            return Err(RepositoryError::conflict(EMAIL_IN_USE));
        }

        let user = user.into_user(Uuid::new_v4(), Utc::now());
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepositoryError> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|user| user.email == email).cloned())
    }

    async fn verify_by_code(&self, code: &str) -> Result<Option<User>, RepositoryError> {
        let mut tables = self.tables.write().await;
        let Some(user) = tables
            .users
            .values_mut()
            .find(|user| user.verification_code.as_deref() == Some(code))
        else {
            return Ok(None);
        };

        user.verified = true;
        user.verification_code = None;
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }

    async fn set_access_token(
        &self,
        id: Uuid,
        token: Option<&str>,
    ) -> Result<(), RepositoryError> {
        let token = token.map(str::to_string);
        self.update_user(id, move |user| user.access_token = token).await;
        Ok(())
    }

    async fn set_subscription(
        &self,
        id: Uuid,
        subscription: Subscription,
    ) -> Result<Option<User>, RepositoryError> {
        Ok(self
            .update_user(id, move |user| user.subscription = subscription)
            .await)
    }

    async fn set_avatar_url(&self, id: Uuid, url: &str) -> Result<Option<User>, RepositoryError> {
        let url = url.to_string();
        Ok(self.update_user(id, move |user| user.avatar_url = url).await)
    }
}

#[async_trait]
impl ContactRepository for MemoryStore {
    async fn list(&self, owner: Option<Uuid>) -> Result<Vec<Contact>, RepositoryError> {
        let tables = self.tables.read().await;
        let mut contacts: Vec<Contact> = tables
            .contacts
            .values()
            .filter(|contact| visible_to(contact, owner))
            .cloned()
            .collect();
        contacts.sort_by_key(|contact| contact.created_at);
        Ok(contacts)
    }

    async fn find_by_id(
        &self,
        id: Uuid,
        owner: Option<Uuid>,
    ) -> Result<Option<Contact>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables
            .contacts
            .get(&id)
            .filter(|contact| visible_to(contact, owner))
            .cloned())
    }

    async fn insert(&self, owner: Uuid, contact: NewContact) -> Result<Contact, RepositoryError> {
        let contact = contact.into_contact(Uuid::new_v4(), owner, Utc::now());
        self.tables
            .write()
            .await
            .contacts
            .insert(contact.id, contact.clone());
        Ok(contact)
    }

    async fn update(
        &self,
        id: Uuid,
        owner: Option<Uuid>,
        patch: ContactPatch,
    ) -> Result<Option<Contact>, RepositoryError> {
        let mut tables = self.tables.write().await;
        let Some(contact) = tables
            .contacts
            .get_mut(&id)
            .filter(|contact| visible_to(contact, owner))
        else {
            return Ok(None);
        };

        patch.apply(contact, Utc::now());
        Ok(Some(contact.clone()))
    }

    async fn delete(
        &self,
        id: Uuid,
        owner: Option<Uuid>,
    ) -> Result<Option<Contact>, RepositoryError> {
        let mut tables = self.tables.write().await;
        let visible = tables
            .contacts
            .get(&id)
            .is_some_and(|contact| visible_to(contact, owner));
        if !visible {
            return Ok(None);
        }
        Ok(tables.contacts.remove(&id))
    }
}
