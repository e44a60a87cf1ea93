//! # Keymint Core
//!
//! Core token lifecycle engine and domain layer for the keymint server.
//! This crate contains the domain entities, the token issuance and
//! rotation services, the repository interfaces for the external
//! collaborators (user directory and refresh-token store), and the
//! error types that the rest of the application builds on.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
