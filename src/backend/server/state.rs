/**
 * Application State Management
 *
 * This module defines the application state handed to every handler
 * through `State<AppState>`.
 *
 * # Architecture
 *
 * `AppState` holds the collaborators every handler works through:
 * - the user and contact repositories (PostgreSQL or in-memory)
 * - session token keys
 * - the outbound mailer
 * - the avatar store
 * - the loaded configuration
 *
 * Everything is behind `Arc` or is itself cheap to clone, so cloning the
 * state per request costs a handful of reference count bumps.
 */

use std::sync::Arc;

use uuid::Uuid;

use crate::backend::auth::sessions::SessionKeys;
use crate::backend::avatars::AvatarStore;
use crate::backend::mail::Mailer;
use crate::backend::server::config::ServerConfig;
use crate::backend::store::{ContactRepository, UserRepository};

/// Application state shared by every request handler
#[derive(Clone)]
pub struct AppState {
    /// User records
    pub users: Arc<dyn UserRepository>,
    /// Contact records
    pub contacts: Arc<dyn ContactRepository>,
    /// Token signing and verification
    pub sessions: SessionKeys,
    /// Outbound email
    pub mailer: Arc<dyn Mailer>,
    /// Avatar staging and storage
    pub avatars: AvatarStore,
    /// Loaded configuration
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Build state from configuration and the chosen adapters
    pub fn new(
        config: ServerConfig,
        users: Arc<dyn UserRepository>,
        contacts: Arc<dyn ContactRepository>,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        let sessions = SessionKeys::new(&config.jwt_secret, config.token_ttl_minutes);
        let avatars = AvatarStore::new(
            config.public_dir.clone(),
            config.temp_dir.clone(),
            config.avatar_size,
        );

        Self {
            users,
            contacts,
            sessions,
            mailer,
            avatars,
            config: Arc::new(config),
        }
    }

    /// Owner filter for contact queries
    ///
    /// `None` unless `contacts.owner_scoped` is enabled.
    pub fn contact_scope(&self, user_id: Uuid) -> Option<Uuid> {
        self.config.contacts.owner_scoped.then_some(user_id)
    }
}
