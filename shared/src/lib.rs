//! Shared configuration and common types for the keymint server
//!
//! This crate provides the functionality used across all server modules:
//! - Configuration types for the JWT signer, database, and HTTP server
//! - Common response body structures

pub mod config;
pub mod types;
