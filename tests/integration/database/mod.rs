//! Database tests
//!
//! Schema checks run only against PostgreSQL. The repository contract runs
//! against every adapter.
