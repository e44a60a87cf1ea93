//! Configuration for the token service

use km_shared::config::JwtConfig;

/// Configuration for the token service
///
/// The default access lifetime is deliberately short so the refresh
/// path gets exercised; production deployments raise it through
/// configuration.
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// JWT signing secret
    pub jwt_secret: String,
    /// Access token lifetime in seconds
    pub access_token_lifetime_secs: i64,
    /// Refresh token lifetime in seconds
    pub refresh_token_lifetime_secs: i64,
    /// Tolerated clock drift in seconds for expiry comparisons
    pub clock_skew_secs: i64,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "development-secret-please-change-in-production".to_string(),
            access_token_lifetime_secs: 30,
            refresh_token_lifetime_secs: 180 * 24 * 60 * 60,
            clock_skew_secs: 0,
        }
    }
}

impl From<&JwtConfig> for TokenServiceConfig {
    fn from(config: &JwtConfig) -> Self {
        Self {
            jwt_secret: config.secret.clone(),
            access_token_lifetime_secs: config.access_token_lifetime,
            refresh_token_lifetime_secs: config.refresh_token_lifetime,
            clock_skew_secs: config.clock_skew,
        }
    }
}
