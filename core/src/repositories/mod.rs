//! Repository interfaces for the external collaborators
//!
//! The token lifecycle engine talks to two capabilities: a user
//! directory and a refresh-token record store. Anything satisfying
//! these traits will do; the `infra` crate provides the MySQL
//! implementations and each module ships an in-memory mock for tests.

pub mod token;
pub mod user;

pub use token::{MockTokenRepository, TokenRepository};
pub use user::{MockUserRepository, UserRepository};
