//! Unit tests for the mock token repository implementation

use chrono::Duration;
use uuid::Uuid;

use crate::domain::entities::token::RefreshToken;
use crate::repositories::token::{MockTokenRepository, TokenRepository};

fn test_record(token: &str) -> RefreshToken {
    RefreshToken::new(
        Uuid::new_v4(),
        token.to_string(),
        Uuid::new_v4().to_string(),
        Duration::days(180),
    )
}

#[tokio::test]
async fn test_insert_and_find_by_token() {
    let repo = MockTokenRepository::new();
    let record = test_record("opaque-value-1");

    let saved = repo.insert(record.clone()).await.unwrap();
    assert_eq!(saved.id, record.id);

    let found = repo.find_by_token("opaque-value-1").await.unwrap().unwrap();
    assert_eq!(found.id, record.id);
    assert_eq!(found.user_id, record.user_id);
    assert_eq!(found.jwt_id, record.jwt_id);
}

#[tokio::test]
async fn test_duplicate_token_value_rejected() {
    let repo = MockTokenRepository::new();

    repo.insert(test_record("same-value")).await.unwrap();
    let result = repo.insert(test_record("same-value")).await;

    assert!(result.is_err());
    assert_eq!(repo.len().await, 1);
}

#[tokio::test]
async fn test_find_unknown_token_returns_none() {
    let repo = MockTokenRepository::new();
    assert!(repo.find_by_token("missing").await.unwrap().is_none());
}

#[tokio::test]
async fn test_mark_used_transitions_once() {
    let repo = MockTokenRepository::new();
    let record = repo.insert(test_record("opaque-value-2")).await.unwrap();

    assert!(repo.mark_used(record.id).await.unwrap());

    // Second transition reports the conflict
    assert!(!repo.mark_used(record.id).await.unwrap());

    let stored = repo.find_by_id(record.id).await.unwrap().unwrap();
    assert!(stored.is_used);
}

#[tokio::test]
async fn test_mark_used_missing_record() {
    let repo = MockTokenRepository::new();
    assert!(!repo.mark_used(Uuid::new_v4()).await.unwrap());
}

#[tokio::test]
async fn test_revoke() {
    let repo = MockTokenRepository::new();
    repo.insert(test_record("opaque-value-3")).await.unwrap();

    assert!(repo.revoke("opaque-value-3").await.unwrap());
    assert!(!repo.revoke("opaque-value-3").await.unwrap());

    let stored = repo.find_by_token("opaque-value-3").await.unwrap().unwrap();
    assert!(stored.is_revoked);
}
