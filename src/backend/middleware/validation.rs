/**
 * Request Extractors
 *
 * Extractors that turn request bodies and path segments into checked values,
 * rejecting with a `BackendError` so failures share the JSON error shape.
 *
 * - `JsonBody<T>` - `Json<T>` with every rejection mapped to 400
 * - `Validated<T>` - `JsonBody<T>` followed by `Validate::validate`
 * - `ValidId` - a UUID path segment, 400 "{id} is not a valid id" otherwise
 */

use axum::{
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::shared::{SharedError, Validate};

/// JSON body with 400 rejections
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                tracing::debug!("Rejected JSON body: {}", rejection.body_text());
                BackendError::bad_request(rejection.body_text())
            })?;
        Ok(Self(value))
    }
}

/// JSON body of raw type `T`, yielding its validated form
pub struct Validated<T: Validate>(pub T::Valid);

impl<S, T> FromRequest<S> for Validated<T>
where
    T: Validate + DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let JsonBody(raw) = JsonBody::<T>::from_request(req, state).await?;
        let valid = raw.validate().map_err(|e| {
            tracing::debug!("Payload failed validation: {}", e);
            e
        })?;
        Ok(Self(valid))
    }
}

/// Record identifier taken from the single path parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidId(pub Uuid);

impl<S> FromRequestParts<S> for ValidId
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| BackendError::bad_request(rejection.body_text()))?;

        Uuid::parse_str(&raw)
            .map(Self)
            .map_err(|_| SharedError::invalid_identifier(raw).into())
    }
}
