//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs            - Module exports and documentation
//! ├── router.rs         - Main router creation
//! ├── api_routes.rs     - /auth endpoints
//! └── contact_routes.rs - /contacts endpoints
//! ```
//!
//! # Route Organization
//!
//! 1. **Auth Routes** - signup, verification and signin are public; current,
//!    signout, subscription and avatars require a session
//! 2. **Contact Routes** - all require a session
//! 3. **Static Avatars** - `/avatars/*` served from `{public_dir}/avatars`
//! 4. **Fallback Handler** - JSON 404
//!
//! Protected routes get `auth_middleware` as a route layer, so unmatched
//! paths reach the fallback instead of a 401.

/// Main router creation
pub mod router;

/// Authentication routes
pub mod api_routes;

/// Contact routes
pub mod contact_routes;

pub use router::create_router;
