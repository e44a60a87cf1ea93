//! JWT signing and token lifetime configuration

use serde::{Deserialize, Serialize};

/// JWT authentication configuration
///
/// The access-token lifetime defaults to a deliberately short value so
/// that clients exercise the refresh path; raise it via
/// `JWT_ACCESS_TOKEN_LIFETIME` for production deployments.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// JWT secret key for signing tokens. Never logged.
    pub secret: String,

    /// Access token lifetime in seconds
    pub access_token_lifetime: i64,

    /// Refresh token lifetime in seconds
    pub refresh_token_lifetime: i64,

    /// Tolerated clock drift, in seconds, when deciding whether an
    /// access token has expired
    #[serde(default)]
    pub clock_skew: i64,
}

/// Refresh tokens live for half a year unless configured otherwise
const DEFAULT_REFRESH_TOKEN_LIFETIME: i64 = 180 * 24 * 60 * 60;

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from("development-secret-please-change-in-production"),
            access_token_lifetime: 30,
            refresh_token_lifetime: DEFAULT_REFRESH_TOKEN_LIFETIME,
            clock_skew: 0,
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with a secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let secret = std::env::var("JWT_SECRET").unwrap_or(defaults.secret);
        let access_token_lifetime = std::env::var("JWT_ACCESS_TOKEN_LIFETIME")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.access_token_lifetime);
        let refresh_token_lifetime = std::env::var("JWT_REFRESH_TOKEN_LIFETIME")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.refresh_token_lifetime);
        let clock_skew = std::env::var("JWT_CLOCK_SKEW")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.clock_skew);

        Self {
            secret,
            access_token_lifetime,
            refresh_token_lifetime,
            clock_skew,
        }
    }

    /// Set access token lifetime in seconds
    pub fn with_access_lifetime_secs(mut self, seconds: i64) -> Self {
        self.access_token_lifetime = seconds;
        self
    }

    /// Set refresh token lifetime in days
    pub fn with_refresh_lifetime_days(mut self, days: i64) -> Self {
        self.refresh_token_lifetime = days * 86400;
        self
    }

    /// Check if using the default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == JwtConfig::default().secret
    }
}
