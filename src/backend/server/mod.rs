//! Server Module
//!
//! Everything needed to turn a configuration into a running router.
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs    - Module exports and documentation
//! ├── state.rs  - AppState shared by handlers
//! ├── config.rs - Configuration loading and the optional database
//! └── init.rs   - Adapter selection and app creation
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Configuration Loading**: defaults, TOML file, environment
//! 2. **Adapter Selection**: PostgreSQL or in-memory store, SMTP or log mailer
//! 3. **Router Creation**: routes, auth layers, static avatars, tracing

/// Application state management
pub mod state;

/// Server configuration loading
pub mod config;

/// Server initialization
pub mod init;

pub use config::{ConfigError, ServerConfig};
pub use init::create_app;
pub use state::AppState;
