//! Infrastructure layer for the keymint server
//!
//! Concrete MySQL-backed implementations of the `km_core` repository
//! interfaces, plus the connection-pool helper the binary wires up at
//! startup.

pub mod database;

pub use database::mysql::{MySqlTokenRepository, MySqlUserRepository};
pub use database::create_pool;
