//! User directory trait defining the interface for account lookup and
//! password verification.
//!
//! Account storage and password checking live outside the token
//! lifecycle core; this trait is the boundary. Implementations own the
//! password hashing scheme, the engine only ever sees the verdict.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for the user directory
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their login email
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user with that email
    /// * `Err(DomainError)` - Storage error occurred
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by their unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Check a plaintext password against the stored hash
    ///
    /// # Returns
    /// * `Ok(true)` - Password matches
    /// * `Ok(false)` - Password does not match
    /// * `Err(DomainError)` - Verification could not run
    async fn verify_password(&self, user: &User, password: &str) -> Result<bool, DomainError>;

    /// Create a new account
    ///
    /// Implementations must reject duplicate emails and hash the
    /// password before storing it.
    ///
    /// # Returns
    /// * `Ok(User)` - The created user
    /// * `Err(DomainError)` - Email taken, invalid input, or storage error
    async fn create(&self, username: &str, email: &str, password: &str)
        -> Result<User, DomainError>;
}
