//! In-memory implementation of UserRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError};

use super::r#trait::UserRepository;

/// bcrypt cost for test fixtures; low on purpose to keep tests fast
const MOCK_BCRYPT_COST: u32 = 4;

/// Mock user directory backed by a `HashMap`
pub struct MockUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl MockUserRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Remove a user, simulating an account deleted out-of-band
    pub async fn remove(&self, id: Uuid) -> Option<User> {
        self.users.write().await.remove(&id)
    }
}

impl Default for MockUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn verify_password(&self, user: &User, password: &str) -> Result<bool, DomainError> {
        bcrypt::verify(password, &user.password_hash).map_err(|e| DomainError::Internal {
            message: format!("Password verification failed: {}", e),
        })
    }

    async fn create(&self, username: &str, email: &str, password: &str)
        -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.email == email) {
            return Err(DomainError::Auth(AuthError::EmailAlreadyInUse));
        }

        let password_hash =
            bcrypt::hash(password, MOCK_BCRYPT_COST).map_err(|e| DomainError::Internal {
                message: format!("Password hashing failed: {}", e),
            })?;

        let user = User::new(username.to_string(), email.to_string(), password_hash);
        users.insert(user.id, user.clone());
        Ok(user)
    }
}
