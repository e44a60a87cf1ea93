//! MySQL implementation of the UserRepository trait.
//!
//! Passwords are bcrypt-hashed on create and verified here; the core
//! never sees a hash scheme, only the verdict.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use km_core::domain::entities::user::User;
use km_core::errors::{AuthError, DomainError};
use km_core::repositories::UserRepository;

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    /// Create a new MySQL user repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert a database row to a User entity
    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| storage_error("read id", e))?;

        Ok(User {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
                message: format!("Invalid user UUID: {}", e),
            })?,
            username: row
                .try_get("username")
                .map_err(|e| storage_error("read username", e))?,
            email: row
                .try_get("email")
                .map_err(|e| storage_error("read email", e))?,
            password_hash: row
                .try_get("password_hash")
                .map_err(|e| storage_error("read password_hash", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| storage_error("read created_at", e))?,
        })
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let query = r#"
            SELECT id, username, email, password_hash, created_at
            FROM users
            WHERE email = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| storage_error("find user by email", e))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let query = r#"
            SELECT id, username, email, password_hash, created_at
            FROM users
            WHERE id = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| storage_error("find user by id", e))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn verify_password(&self, user: &User, password: &str) -> Result<bool, DomainError> {
        // bcrypt verification is CPU work; keep it off the async
        // executor threads
        let password = password.to_string();
        let hash = user.password_hash.clone();

        tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Verification task failed: {}", e),
            })?
            .map_err(|e| DomainError::Internal {
                message: format!("Password verification failed: {}", e),
            })
    }

    async fn create(&self, username: &str, email: &str, password: &str)
        -> Result<User, DomainError> {
        if self.find_by_email(email).await?.is_some() {
            return Err(DomainError::Auth(AuthError::EmailAlreadyInUse));
        }

        let password = password.to_string();
        let password_hash =
            tokio::task::spawn_blocking(move || bcrypt::hash(password, bcrypt::DEFAULT_COST))
                .await
                .map_err(|e| DomainError::Internal {
                    message: format!("Hashing task failed: {}", e),
                })?
                .map_err(|e| DomainError::Internal {
                    message: format!("Password hashing failed: {}", e),
                })?;

        let user = User::new(username.to_string(), email.to_string(), password_hash);

        let query = r#"
            INSERT INTO users (id, username, email, password_hash, created_at)
            VALUES (?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(user.id.to_string())
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("insert user", e))?;

        Ok(user)
    }
}

fn storage_error(action: &str, e: sqlx::Error) -> DomainError {
    DomainError::Storage {
        message: format!("Failed to {}: {}", action, e),
    }
}
