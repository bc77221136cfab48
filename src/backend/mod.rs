//! Backend Module
//!
//! This module contains all server-side code for the contactbook API. It
//! provides an Axum HTTP server with account management, JWT sessions,
//! avatar processing and a contacts resource.
//!
//! # Architecture
//!
//! The backend is organized into focused submodules:
//!
//! - **`server`** - Server initialization, application state, configuration
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`auth`** - Users, JWT sessions and the authentication handlers
//! - **`contacts`** - Contact records, payload validation and CRUD handlers
//! - **`avatars`** - Avatar upload, resizing and public storage
//! - **`mail`** - Outbound email delivery (SMTP or log-only)
//! - **`store`** - Repository traits with PostgreSQL and in-memory adapters
//! - **`middleware`** - Authorization middleware and validating extractors
//! - **`error`** - Backend error type and its HTTP rendering
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Server binary
//! ├── server/         - Config, state and initialization
//! ├── routes/         - Route configuration
//! ├── auth/           - Authentication
//! ├── contacts/       - Contacts resource
//! ├── avatars/        - Avatar processing
//! ├── mail/           - Email delivery
//! ├── store/          - Persistence adapters
//! ├── middleware/     - Request middleware and extractors
//! └── error/          - Error types
//! ```
//!
//! # Request Flow
//!
//! inbound request → router → validating extractor → authorization
//! middleware (protected routes only) → handler → repository or external
//! service → JSON response. Every failure is a `BackendError`, which renders
//! itself as `{"error": ..., "status": ...}`.
//!
//! # State Management
//!
//! The only state shared between requests is `AppState`: repository handles,
//! the session key material, the mailer and the avatar store. All of it is
//! cheap to clone and safe to share across tasks.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Backend error types
pub mod error;

/// Authentication and user management
pub mod auth;

/// Contacts resource
pub mod contacts;

/// Avatar processing and storage
pub mod avatars;

/// Outbound email delivery
pub mod mail;

/// Persistence adapters
pub mod store;

/// Middleware for request processing
pub mod middleware;

/// Re-export commonly used types
pub use error::BackendError;
pub use server::{create_app, AppState};
