//! MySQL implementation of the TokenRepository trait.
//!
//! Refresh-token records are insert-only rows; the single mutation the
//! rotation protocol performs is the conditional `is_used` update,
//! whose affected-row count is what arbitrates concurrent rotations of
//! the same token.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use km_core::domain::entities::token::RefreshToken;
use km_core::errors::DomainError;
use km_core::repositories::TokenRepository;

/// MySQL implementation of TokenRepository
pub struct MySqlTokenRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlTokenRepository {
    /// Create a new MySQL token repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert a database row to a RefreshToken entity
    fn row_to_token(row: &sqlx::mysql::MySqlRow) -> Result<RefreshToken, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| storage_error("read id", e))?;
        let user_id: String = row
            .try_get("user_id")
            .map_err(|e| storage_error("read user_id", e))?;

        Ok(RefreshToken {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
                message: format!("Invalid token UUID: {}", e),
            })?,
            user_id: Uuid::parse_str(&user_id).map_err(|e| DomainError::Internal {
                message: format!("Invalid user UUID: {}", e),
            })?,
            token: row
                .try_get("token")
                .map_err(|e| storage_error("read token", e))?,
            jwt_id: row
                .try_get("jwt_id")
                .map_err(|e| storage_error("read jwt_id", e))?,
            is_used: row
                .try_get("is_used")
                .map_err(|e| storage_error("read is_used", e))?,
            is_revoked: row
                .try_get("is_revoked")
                .map_err(|e| storage_error("read is_revoked", e))?,
            added_date: row
                .try_get::<DateTime<Utc>, _>("added_date")
                .map_err(|e| storage_error("read added_date", e))?,
            expiry_date: row
                .try_get::<DateTime<Utc>, _>("expiry_date")
                .map_err(|e| storage_error("read expiry_date", e))?,
        })
    }
}

#[async_trait]
impl TokenRepository for MySqlTokenRepository {
    async fn insert(&self, token: RefreshToken) -> Result<RefreshToken, DomainError> {
        let query = r#"
            INSERT INTO refresh_tokens (
                id, user_id, token, jwt_id, is_used, is_revoked, added_date, expiry_date
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        // The unique index on `token` turns a duplicate value into an
        // error rather than a silent overwrite
        sqlx::query(query)
            .bind(token.id.to_string())
            .bind(token.user_id.to_string())
            .bind(&token.token)
            .bind(&token.jwt_id)
            .bind(token.is_used)
            .bind(token.is_revoked)
            .bind(token.added_date)
            .bind(token.expiry_date)
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("insert refresh token", e))?;

        Ok(token)
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<RefreshToken>, DomainError> {
        let query = r#"
            SELECT id, user_id, token, jwt_id, is_used, is_revoked, added_date, expiry_date
            FROM refresh_tokens
            WHERE token = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| storage_error("find refresh token", e))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_token(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<RefreshToken>, DomainError> {
        let query = r#"
            SELECT id, user_id, token, jwt_id, is_used, is_revoked, added_date, expiry_date
            FROM refresh_tokens
            WHERE id = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| storage_error("find token by id", e))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_token(&row)?)),
            None => Ok(None),
        }
    }

    async fn mark_used(&self, id: Uuid) -> Result<bool, DomainError> {
        // Conditional update: of two racing rotations, only one sees an
        // affected row
        let query = r#"
            UPDATE refresh_tokens
            SET is_used = TRUE
            WHERE id = ? AND is_used = FALSE
        "#;

        let result = sqlx::query(query)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("mark token used", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn revoke(&self, token: &str) -> Result<bool, DomainError> {
        let query = r#"
            UPDATE refresh_tokens
            SET is_revoked = TRUE
            WHERE token = ? AND is_revoked = FALSE
        "#;

        let result = sqlx::query(query)
            .bind(token)
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("revoke token", e))?;

        Ok(result.rows_affected() > 0)
    }
}

fn storage_error(action: &str, e: sqlx::Error) -> DomainError {
    DomainError::Storage {
        message: format!("Failed to {}: {}", action, e),
    }
}
