/**
 * Server Initialization
 *
 * Builds the application state from configuration and hands it to the
 * router.
 *
 * # Initialization Process
 *
 * 1. Pick the record store: PostgreSQL when `database_url` is set and
 *    reachable, otherwise the in-memory store
 * 2. Pick the mailer: SMTP when configured, otherwise the log mailer
 * 3. Create the avatar and staging directories
 * 4. Create the router
 */

use std::sync::Arc;

use axum::Router;

use crate::backend::error::BackendError;
use crate::backend::mail::{LogMailer, Mailer, SmtpMailer};
use crate::backend::routes::router::create_router;
use crate::backend::server::config::{load_database, ServerConfig};
use crate::backend::server::state::AppState;
use crate::backend::store::{ContactRepository, MemoryStore, PgStore, UserRepository};

/// Create and configure the Axum application
///
/// # Errors
///
/// Fails when the SMTP settings cannot be turned into a transport or the
/// avatar directories cannot be created. An unreachable database is not an
/// error; see [`load_database`].
pub async fn create_app(config: ServerConfig) -> Result<Router<()>, BackendError> {
    tracing::info!("Initializing contactbook backend server");

    let (users, contacts) = load_store(&config).await;
    let mailer = load_mailer(&config)?;

    let app_state = AppState::new(config, users, contacts, mailer);
    app_state.avatars.prepare().await?;

    Ok(create_router(app_state))
}

async fn load_store(
    config: &ServerConfig,
) -> (Arc<dyn UserRepository>, Arc<dyn ContactRepository>) {
    if let Some(url) = &config.database_url {
        if let Some(pool) = load_database(url).await {
            let store = PgStore::new(pool);
            return (Arc::new(store.clone()), Arc::new(store));
        }
    } else {
        tracing::warn!("DATABASE_URL not set. Records are kept in memory only.");
    }

    let store = MemoryStore::default();
    (Arc::new(store.clone()), Arc::new(store))
}

fn load_mailer(config: &ServerConfig) -> Result<Arc<dyn Mailer>, BackendError> {
    match &config.smtp {
        Some(smtp) => {
            tracing::info!("Sending email through {}:{}", smtp.host, smtp.port);
            Ok(Arc::new(SmtpMailer::new(smtp)?))
        }
        None => {
            tracing::warn!("SMTP not configured. Outgoing email will only be logged.");
            Ok(Arc::new(LogMailer))
        }
    }
}
