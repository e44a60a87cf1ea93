//! Token repository trait defining the interface for refresh-token
//! record persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::token::RefreshToken;
use crate::errors::DomainError;

/// Repository trait for refresh-token record persistence
///
/// This trait defines the contract the rotation protocol relies on.
/// Records are insert-only apart from the two one-way flag transitions
/// (`mark_used`, `revoke`); this core never deletes them.
///
/// # Concurrency
/// `mark_used` is the linchpin of the single-use guarantee and must be
/// an atomic check-and-set against the backing store: when two rotation
/// calls race on the same record, at most one may observe `Ok(true)`.
/// Row-level locking or a conditional update both satisfy this; an
/// in-process mutex does not if the store is shared.
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Insert a freshly minted refresh-token record
    ///
    /// # Returns
    /// * `Ok(RefreshToken)` - The persisted record
    /// * `Err(DomainError)` - Insert failed (e.g. duplicate token value)
    async fn insert(&self, token: RefreshToken) -> Result<RefreshToken, DomainError>;

    /// Find a record by the opaque token value presented by a client
    ///
    /// # Returns
    /// * `Ok(Some(RefreshToken))` - Record found
    /// * `Ok(None)` - No record carries that value
    /// * `Err(DomainError)` - Storage error occurred
    async fn find_by_token(&self, token: &str) -> Result<Option<RefreshToken>, DomainError>;

    /// Find a record by its surrogate key
    async fn find_by_id(&self, id: Uuid) -> Result<Option<RefreshToken>, DomainError>;

    /// Atomically flip `is_used` from false to true
    ///
    /// # Returns
    /// * `Ok(true)` - This call performed the transition
    /// * `Ok(false)` - The record is missing or was already consumed
    ///   (a concurrent rotation won the race)
    /// * `Err(DomainError)` - Storage error occurred
    async fn mark_used(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Revoke the record carrying the given token value
    ///
    /// # Returns
    /// * `Ok(true)` - A live record was revoked
    /// * `Ok(false)` - No matching live record
    /// * `Err(DomainError)` - Storage error occurred
    async fn revoke(&self, token: &str) -> Result<bool, DomainError>;
}
