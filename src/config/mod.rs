//! Environment-driven configuration.
//!
//! Each submodule owns one concern and loads itself from environment
//! variables at process start:
//!
//! - [`codec`]: secret key for the credential codec
//! - [`cors`]: allowed CORS origins
//! - [`database`]: PostgreSQL connection pool

pub mod codec;
pub mod cors;
pub mod database;
