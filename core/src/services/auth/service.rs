//! Authentication service implementation

use tracing::{info, warn};

use crate::domain::entities::token::TokenPair;
use crate::errors::{AuthError, DomainError};
use crate::repositories::{TokenRepository, UserRepository};
use crate::services::token::TokenService;

/// Orchestrates registration, login, and token rotation over the user
/// directory and the record store
///
/// Each call is an independent unit of work; the service keeps no
/// per-request state and returns plain values.
pub struct AuthService<U, T>
where
    U: UserRepository,
    T: TokenRepository,
{
    pub(crate) user_repository: U,
    pub(crate) token_service: TokenService<T>,
}

impl<U, T> AuthService<U, T>
where
    U: UserRepository,
    T: TokenRepository,
{
    /// Creates a new authentication service
    pub fn new(user_repository: U, token_service: TokenService<T>) -> Self {
        Self {
            user_repository,
            token_service,
        }
    }

    /// Registers a new account and issues its first token pair
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - Account created, pair issued
    /// * `Err(DomainError)` - Email taken, invalid input, or storage
    ///   failure
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<TokenPair, DomainError> {
        if self.user_repository.find_by_email(email).await?.is_some() {
            return Err(DomainError::Auth(AuthError::EmailAlreadyInUse));
        }

        let user = self.user_repository.create(username, email, password).await?;
        info!(user_id = %user.id, "registered new user");

        self.token_service.issue_tokens(&user).await
    }

    /// Authenticates by email and password and issues a token pair
    ///
    /// Unknown email and wrong password produce the same error so a
    /// caller cannot probe which emails exist.
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenPair, DomainError> {
        let user = match self.user_repository.find_by_email(email).await? {
            Some(user) => user,
            None => return Err(DomainError::Auth(AuthError::AuthenticationFailed)),
        };

        if !self.user_repository.verify_password(&user, password).await? {
            return Err(DomainError::Auth(AuthError::AuthenticationFailed));
        }

        self.token_service.issue_tokens(&user).await
    }

    /// Rotates an expired access token and its single-use refresh token
    /// into a fresh pair
    ///
    /// The specific rejection is logged here for operators; callers at
    /// the HTTP boundary see one opaque failure regardless of which
    /// check tripped.
    pub async fn refresh(
        &self,
        access_token: &str,
        refresh_token: &str,
    ) -> Result<TokenPair, DomainError> {
        let user_id = self
            .token_service
            .consume_refresh_token(access_token, refresh_token)
            .await
            .map_err(|e| {
                warn!(error = %e, "refresh token rotation rejected");
                e
            })?;

        let user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::Auth(AuthError::UserNotFound))?;

        self.token_service.issue_tokens(&user).await
    }
}
