//! Data transfer objects for HTTP requests and responses.

pub mod auth;

pub use auth::*;
