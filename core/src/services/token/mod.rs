//! Token service module for the access/refresh pair lifecycle
//!
//! This module handles all token-related operations:
//! - Signed access-token issuance paired with a persisted refresh record
//! - Strict access-token verification for protected endpoints
//! - The ordered validation sequence and single-use consumption that
//!   make up the rotation protocol

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::TokenServiceConfig;
pub use service::TokenService;
