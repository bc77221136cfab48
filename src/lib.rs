//! Contactbook - Main Library
//!
//! Contactbook is a small REST backend for managing a personal contact list.
//! Users sign up with an email address, confirm it through a verification
//! link, sign in to receive a short-lived JWT, and then manage their contacts,
//! subscription tier and avatar.
//!
//! # Module Structure
//!
//! - **`shared`** - Validation helpers and the validation error type used by
//!   every request payload
//! - **`backend`** - The Axum server: routing, authentication, contacts,
//!   avatars, mail delivery and persistence
//!
//! # Usage
//!
//! ```rust,no_run
//! use contactbook::backend::server::{config::ServerConfig, create_app};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::load()?;
//! let app = create_app(config).await?;
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! - `shared::SharedError` for payload validation failures (400)
//! - `backend::BackendError` for everything a handler can return; it renders
//!   itself as a JSON error body with the matching status code

/// Validation helpers and shared error types
pub mod shared;

/// Backend server-side code
pub mod backend;
