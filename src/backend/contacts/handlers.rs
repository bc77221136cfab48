/**
 * Contact Handlers
 *
 * CRUD handlers for `/contacts`. Every route sits behind the
 * authentication middleware. New contacts record their creator as owner;
 * whether reads and writes are limited to the caller's own contacts is
 * decided by `contacts.owner_scoped` (see `AppState::contact_scope`).
 */

use axum::{extract::State, http::StatusCode, response::Json};

use crate::backend::auth::handlers::types::MessageResponse;
use crate::backend::contacts::types::Contact;
use crate::backend::contacts::validation::{
    CreateContactRequest, UpdateContactRequest, UpdateFavoriteRequest,
};
use crate::backend::error::BackendError;
use crate::backend::middleware::{AuthUser, ValidId, Validated};
use crate::backend::server::state::AppState;

const CONTACT_NOT_FOUND: &str = "Contact not found";

fn contact_not_found() -> BackendError {
    BackendError::not_found(CONTACT_NOT_FOUND)
}

/// GET /contacts
pub async fn list_contacts(
    State(app_state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<Contact>>, BackendError> {
    let contacts = app_state
        .contacts
        .list(app_state.contact_scope(user.id))
        .await?;

    tracing::debug!("Listed {} contacts for {}", contacts.len(), user.id);

    Ok(Json(contacts))
}

/// GET /contacts/{id}
pub async fn get_contact(
    State(app_state): State<AppState>,
    AuthUser(user): AuthUser,
    ValidId(id): ValidId,
) -> Result<Json<Contact>, BackendError> {
    let contact = app_state
        .contacts
        .find_by_id(id, app_state.contact_scope(user.id))
        .await?
        .ok_or_else(contact_not_found)?;

    Ok(Json(contact))
}

/// POST /contacts
pub async fn create_contact(
    State(app_state): State<AppState>,
    AuthUser(user): AuthUser,
    Validated(contact): Validated<CreateContactRequest>,
) -> Result<(StatusCode, Json<Contact>), BackendError> {
    let contact = app_state.contacts.insert(user.id, contact).await?;

    tracing::info!("Contact {} created by {}", contact.id, user.id);

    Ok((StatusCode::CREATED, Json(contact)))
}

/// PUT /contacts/{id}
///
/// Only the supplied fields change; `favorite` is always required.
pub async fn update_contact(
    State(app_state): State<AppState>,
    AuthUser(user): AuthUser,
    ValidId(id): ValidId,
    Validated(patch): Validated<UpdateContactRequest>,
) -> Result<Json<Contact>, BackendError> {
    let contact = app_state
        .contacts
        .update(id, app_state.contact_scope(user.id), patch)
        .await?
        .ok_or_else(contact_not_found)?;

    tracing::info!("Contact {} updated by {}", contact.id, user.id);

    Ok(Json(contact))
}

/// PATCH /contacts/{id}/favorite
pub async fn update_favorite(
    State(app_state): State<AppState>,
    AuthUser(user): AuthUser,
    ValidId(id): ValidId,
    Validated(patch): Validated<UpdateFavoriteRequest>,
) -> Result<Json<Contact>, BackendError> {
    let contact = app_state
        .contacts
        .update(id, app_state.contact_scope(user.id), patch)
        .await?
        .ok_or_else(contact_not_found)?;

    Ok(Json(contact))
}

/// DELETE /contacts/{id}
pub async fn delete_contact(
    State(app_state): State<AppState>,
    AuthUser(user): AuthUser,
    ValidId(id): ValidId,
) -> Result<Json<MessageResponse>, BackendError> {
    let contact = app_state
        .contacts
        .delete(id, app_state.contact_scope(user.id))
        .await?
        .ok_or_else(contact_not_found)?;

    tracing::info!("Contact {} deleted by {}", contact.id, user.id);

    Ok(Json(MessageResponse::new("Contact deleted")))
}
