use km_core::domain::entities::token::TokenPair;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 64))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

/// Rotation request carrying the expired access token together with the
/// refresh token that was issued alongside it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenRequest {
    pub token: String,
    pub refresh_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: Option<String>,
    pub refresh_token: Option<String>,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl AuthResponse {
    pub fn successful(pair: TokenPair) -> Self {
        Self {
            token: Some(pair.access_token),
            refresh_token: Some(pair.refresh_token),
            success: true,
            errors: None,
        }
    }

    pub fn failed(errors: Vec<String>) -> Self {
        Self {
            token: None,
            refresh_token: None,
            success: false,
            errors: Some(errors),
        }
    }
}
