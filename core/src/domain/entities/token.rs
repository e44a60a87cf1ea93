//! Token entities for the signed access / refresh pair lifecycle.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::user::User;

/// Claims structure for the JWT payload
///
/// The subject is the user's email, mirroring what the client presents
/// on login. `jti` is unique per issued token and binds the access
/// token to its refresh-token record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user email)
    pub sub: String,

    /// Owning user id
    pub uid: String,

    /// Display name
    pub name: String,

    /// Email claim
    pub email: String,

    /// JWT ID (unique identifier for the token)
    pub jti: String,

    /// Issued at timestamp (epoch seconds)
    pub iat: i64,

    /// Expiration timestamp (epoch seconds)
    pub exp: i64,
}

impl Claims {
    /// Creates new claims for an access token with the given lifetime
    pub fn new_access_token(user: &User, lifetime: Duration) -> Self {
        let now = Utc::now();

        Self {
            sub: user.email.clone(),
            uid: user.id.to_string(),
            name: user.username.clone(),
            email: user.email.clone(),
            jti: Uuid::new_v4().to_string(),
            iat: now.timestamp(),
            exp: (now + lifetime).timestamp(),
        }
    }

    /// Whether the expiry instant is at or before now, allowing for the
    /// given clock-skew tolerance
    pub fn is_expired(&self, clock_skew: Duration) -> bool {
        self.exp <= (Utc::now() + clock_skew).timestamp()
    }

    /// Gets the owning user id from the claims
    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.uid)
    }
}

/// Refresh token record as stored in the database
///
/// Exactly one record exists per issued access token; `jwt_id` holds
/// the `jti` of that token. The record is mutated once in its lifetime,
/// when the rotation consumes it by flipping `is_used`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshToken {
    /// Surrogate key
    pub id: Uuid,

    /// User this token belongs to
    pub user_id: Uuid,

    /// Opaque random token value, unique across all records
    pub token: String,

    /// `jti` claim of the paired access token
    pub jwt_id: String,

    /// Whether the token has been consumed by a rotation
    pub is_used: bool,

    /// Whether the token has been revoked
    pub is_revoked: bool,

    /// Timestamp when the token was created
    pub added_date: DateTime<Utc>,

    /// Timestamp when the token expires
    pub expiry_date: DateTime<Utc>,
}

impl RefreshToken {
    /// Creates a new refresh token record paired with an access token
    pub fn new(user_id: Uuid, token: String, jwt_id: String, lifetime: Duration) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4(),
            user_id,
            token,
            jwt_id,
            is_used: false,
            is_revoked: false,
            added_date: now,
            expiry_date: now + lifetime,
        }
    }

    /// Checks if the record's own expiry horizon has passed
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expiry_date
    }

    /// Whether the record can still be consumed by a rotation
    pub fn is_active(&self) -> bool {
        !self.is_used && !self.is_revoked && !self.is_expired()
    }

    /// Consumes the token. The transition is one-way.
    pub fn mark_used(&mut self) {
        self.is_used = true;
    }

    /// Revokes the token
    pub fn revoke(&mut self) {
        self.is_revoked = true;
    }
}

/// Token pair returned to the client by issuance and rotation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Signed JWT access token
    pub access_token: String,

    /// Opaque single-use refresh token value
    pub refresh_token: String,
}

impl TokenPair {
    pub fn new(access_token: String, refresh_token: String) -> Self {
        Self {
            access_token,
            refresh_token,
        }
    }
}
