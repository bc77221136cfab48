/**
 * Avatar Upload Handler
 *
 * PATCH /auth/avatars accepts a multipart form with a single file field
 * named `avatar`. The user record is only touched after the resized file
 * is in place; if that update fails, the file is removed again.
 */

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    response::Json,
};

use crate::backend::auth::handlers::types::UserEnvelope;
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;
use crate::shared::SharedError;

const AVATAR_FIELD: &str = "avatar";

/// Replace the caller's avatar
///
/// # Errors
///
/// * `400 Bad Request` - malformed multipart body or no `avatar` field
/// * `500 Internal Server Error` - decoding, resizing or storage failed
pub async fn update_avatar(
    State(app_state): State<AppState>,
    AuthUser(user): AuthUser,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UserEnvelope>, BackendError> {
    let mut multipart = multipart.map_err(|e| BackendError::bad_request(e.body_text()))?;

    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| BackendError::bad_request(e.body_text()))?
    {
        if field.name() != Some(AVATAR_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| BackendError::bad_request(e.body_text()))?;
        upload = Some((file_name, data));
        break;
    }

    let (file_name, data) = upload
        .filter(|(_, data)| !data.is_empty())
        .ok_or_else(|| SharedError::required(AVATAR_FIELD))?;

    let avatar = app_state.avatars.store(user.id, &file_name, data).await?;

    let updated = match app_state.users.set_avatar_url(user.id, &avatar.url).await {
        Ok(Some(updated)) => updated,
        Ok(None) => {
            app_state.avatars.remove(&avatar).await;
            return Err(BackendError::not_found("User not found"));
        }
        Err(e) => {
            app_state.avatars.remove(&avatar).await;
            return Err(e.into());
        }
    };

    tracing::info!("Avatar for {} set to {}", updated.email, updated.avatar_url);

    Ok(Json(UserEnvelope::from(&updated)))
}
