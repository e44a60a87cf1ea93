//! HTTP API layer for the keymint token service.
//!
//! Exposes the authentication endpoints (register, login, refresh, me)
//! on top of the domain services in `km_core`, plus a health probe.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
