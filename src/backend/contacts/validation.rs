/**
 * Contact Payload Schemas
 *
 * Three request shapes are accepted:
 *
 * - create: name, email, phone and favorite, all required
 * - update: name, email and phone optional, favorite required, never empty
 * - favorite: exactly `{ "favorite": <bool> }`
 *
 * Unknown fields are rejected at deserialization time.
 */

use serde::Deserialize;

use crate::backend::contacts::types::{ContactPatch, NewContact};
use crate::shared::validation::{self, Validate};
use crate::shared::SharedError;

/// Body of `POST /contacts`
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateContactRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub favorite: Option<bool>,
}

impl Validate for CreateContactRequest {
    type Valid = NewContact;

    fn validate(self) -> Result<NewContact, SharedError> {
        Ok(NewContact {
            name: validation::require_string("name", self.name)?,
            email: validation::require_email("email", self.email)?,
            phone: validation::require_string("phone", self.phone)?,
            favorite: self.favorite.ok_or_else(|| SharedError::required("favorite"))?,
        })
    }
}

/// Body of `PUT /contacts/{id}`
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateContactRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub favorite: Option<bool>,
}

impl UpdateContactRequest {
    fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.phone.is_none() && self.favorite.is_none()
    }
}

impl Validate for UpdateContactRequest {
    type Valid = ContactPatch;

    fn validate(self) -> Result<ContactPatch, SharedError> {
        if self.is_empty() {
            return Err(SharedError::EmptyPayload);
        }

        let favorite = self.favorite.ok_or_else(|| SharedError::required("favorite"))?;

        Ok(ContactPatch {
            name: self
                .name
                .map(|name| validation::non_empty("name", name))
                .transpose()?,
            email: self
                .email
                .map(|email| validation::email("email", email))
                .transpose()?,
            phone: self
                .phone
                .map(|phone| validation::non_empty("phone", phone))
                .transpose()?,
            favorite: Some(favorite),
        })
    }
}

/// Body of `PATCH /contacts/{id}/favorite`
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateFavoriteRequest {
    pub favorite: Option<bool>,
}

impl Validate for UpdateFavoriteRequest {
    type Valid = ContactPatch;

    fn validate(self) -> Result<ContactPatch, SharedError> {
        let favorite = self.favorite.ok_or_else(|| SharedError::required("favorite"))?;
        Ok(ContactPatch::favorite(favorite))
    }
}
