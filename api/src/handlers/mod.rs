//! Shared handler helpers, mostly domain-to-HTTP error mapping.

pub mod error;
