//! Contacts Module
//!
//! The address book: contact records, their payload rules and the HTTP
//! handlers for `/contacts`.
//!
//! # Module Structure
//!
//! ```text
//! contacts/
//! ├── mod.rs        - Module exports
//! ├── types.rs      - Contact, NewContact, ContactPatch
//! ├── validation.rs - Create, update and favorite payloads
//! └── handlers.rs   - HTTP handlers
//! ```

/// Contact data structures
pub mod types;

/// Payload validation
pub mod validation;

/// HTTP handlers
pub mod handlers;

pub use handlers::{
    create_contact, delete_contact, get_contact, list_contacts, update_contact, update_favorite,
};
pub use types::{Contact, ContactPatch, NewContact};
