//! Error type definitions for authentication, token rotation, and
//! input validation.
//!
//! The rotation variants mirror the ordered validation steps of the
//! verifier: each failing step has its own variant so the surrounding
//! system can log and count them, while the presentation layer
//! collapses them into one opaque response for callers.

use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Email already in use")]
    EmailAlreadyInUse,

    #[error("Authentication failed")]
    AuthenticationFailed,

    #[error("User not found")]
    UserNotFound,
}

/// Token validation and rotation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Token signature verification failed")]
    InvalidSignature,

    #[error("Unexpected token signing algorithm")]
    InvalidAlgorithm,

    #[error("Token expired")]
    TokenExpired,

    #[error("Token has not yet expired")]
    TokenNotExpired,

    #[error("Token does not exist")]
    TokenNotFound,

    #[error("Token has already been used")]
    TokenAlreadyUsed,

    #[error("Token has been revoked")]
    TokenRevoked,

    #[error("Refresh token expired")]
    RefreshTokenExpired,

    #[error("Token does not match the refresh token it was presented with")]
    TokenMismatch,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

/// Input validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field: {field}")]
    RequiredField { field: String },

    #[error("Invalid format: {field}")]
    InvalidFormat { field: String },

    #[error("Invalid length: {field} (min: {min}, max: {max})")]
    InvalidLength {
        field: String,
        min: usize,
        max: usize,
    },

    #[error("Invalid email")]
    InvalidEmail,
}
