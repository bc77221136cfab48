//! Contact Data Structures
//!
//! The stored contact record plus the validated shapes used to create and
//! patch it.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// A contact as stored and returned to clients
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    /// Unique contact ID
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub favorite: bool,
    /// The user who created this contact
    pub owner: Uuid,
    #[serde(skip)]
    pub created_at: DateTime<Utc>,
    #[serde(skip)]
    pub updated_at: DateTime<Utc>,
}

/// A fully validated contact ready for insertion
#[derive(Debug, Clone, PartialEq)]
pub struct NewContact {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub favorite: bool,
}

impl NewContact {
    /// Materialize the stored record
    pub fn into_contact(self, id: Uuid, owner: Uuid, now: DateTime<Utc>) -> Contact {
        Contact {
            id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            favorite: self.favorite,
            owner,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A validated partial update
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub favorite: Option<bool>,
}

impl ContactPatch {
    /// Patch that only flips the favorite flag
    pub fn favorite(favorite: bool) -> Self {
        Self {
            favorite: Some(favorite),
            ..Self::default()
        }
    }

    /// Apply the supplied fields to `contact`, leaving the rest untouched
    pub fn apply(self, contact: &mut Contact, now: DateTime<Utc>) {
        if let Some(name) = self.name {
            contact.name = name;
        }
        if let Some(email) = self.email {
            contact.email = email;
        }
        if let Some(phone) = self.phone {
            contact.phone = phone;
        }
        if let Some(favorite) = self.favorite {
            contact.favorite = favorite;
        }
        contact.updated_at = now;
    }
}
