//! Unit tests for token issuance and verification

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::token::RefreshToken;
use crate::domain::entities::user::User;
use crate::errors::{DomainError, TokenError};
use crate::repositories::{MockTokenRepository, TokenRepository};
use crate::services::token::{TokenService, TokenServiceConfig};

fn test_user() -> User {
    User::new(
        "frankie".to_string(),
        "frankie@example.com".to_string(),
        "$2b$04$somehash".to_string(),
    )
}

fn create_test_service() -> TokenService<MockTokenRepository> {
    TokenService::new(MockTokenRepository::new(), TokenServiceConfig::default())
}

#[tokio::test]
async fn test_issue_tokens_returns_pair() {
    let service = create_test_service();
    let user = test_user();

    let pair = service.issue_tokens(&user).await.unwrap();

    assert!(!pair.access_token.is_empty());
    // 35 random characters plus a 36-character UUID suffix
    assert_eq!(pair.refresh_token.len(), 35 + 36);
}

#[tokio::test]
async fn test_issue_tokens_binds_record_to_jti() {
    let service = create_test_service();
    let user = test_user();

    let pair = service.issue_tokens(&user).await.unwrap();
    let claims = service.verify_access_token(&pair.access_token).unwrap();

    let record = service
        .repository
        .find_by_token(&pair.refresh_token)
        .await
        .unwrap()
        .expect("record must be persisted at issuance");

    assert_eq!(record.jwt_id, claims.jti);
    assert_eq!(record.user_id, user.id);
    assert!(!record.is_used);
    assert!(!record.is_revoked);
}

#[tokio::test]
async fn test_issued_pairs_are_distinct() {
    let service = create_test_service();
    let user = test_user();

    let first = service.issue_tokens(&user).await.unwrap();
    let second = service.issue_tokens(&user).await.unwrap();

    assert_ne!(first.refresh_token, second.refresh_token);

    let first_claims = service.verify_access_token(&first.access_token).unwrap();
    let second_claims = service.verify_access_token(&second.access_token).unwrap();
    assert_ne!(first_claims.jti, second_claims.jti);
}

#[tokio::test]
async fn test_verify_access_token_claims() {
    let service = create_test_service();
    let user = test_user();

    let pair = service.issue_tokens(&user).await.unwrap();
    let claims = service.verify_access_token(&pair.access_token).unwrap();

    assert_eq!(claims.sub, user.email);
    assert_eq!(claims.email, user.email);
    assert_eq!(claims.name, user.username);
    assert_eq!(claims.user_id().unwrap(), user.id);
}

#[tokio::test]
async fn test_verify_rejects_wrong_secret() {
    let service = create_test_service();
    let user = test_user();
    let pair = service.issue_tokens(&user).await.unwrap();

    let other = TokenService::new(
        MockTokenRepository::new(),
        TokenServiceConfig {
            jwt_secret: "a-different-secret".to_string(),
            ..TokenServiceConfig::default()
        },
    );

    let result = other.verify_access_token(&pair.access_token);
    assert_eq!(
        result.unwrap_err(),
        DomainError::Token(TokenError::InvalidSignature)
    );
}

#[tokio::test]
async fn test_verify_rejects_tampered_signature() {
    let service = create_test_service();
    let user = test_user();
    let pair = service.issue_tokens(&user).await.unwrap();

    let tampered = flip_last_char(&pair.access_token);
    let result = service.verify_access_token(&tampered);

    assert!(matches!(
        result.unwrap_err(),
        DomainError::Token(TokenError::InvalidSignature)
            | DomainError::Token(TokenError::InvalidTokenFormat)
    ));
}

#[tokio::test]
async fn test_verify_rejects_tampered_payload() {
    let service = create_test_service();
    let user = test_user();
    let pair = service.issue_tokens(&user).await.unwrap();

    // Flip one byte in the payload segment; the signature no longer
    // covers the claims
    let mut parts: Vec<String> = pair.access_token.split('.').map(String::from).collect();
    assert_eq!(parts.len(), 3);
    parts[1] = flip_last_char(&parts[1]);
    let tampered = parts.join(".");

    let result = service.verify_access_token(&tampered);
    assert!(result.is_err());
}

#[tokio::test]
async fn test_verify_rejects_garbage() {
    let service = create_test_service();

    let result = service.verify_access_token("not-a-jwt-at-all");
    assert_eq!(
        result.unwrap_err(),
        DomainError::Token(TokenError::InvalidTokenFormat)
    );
}

#[tokio::test]
async fn test_verify_rejects_expired_token() {
    let service = TokenService::new(
        MockTokenRepository::new(),
        TokenServiceConfig {
            access_token_lifetime_secs: -60,
            ..TokenServiceConfig::default()
        },
    );
    let user = test_user();
    let pair = service.issue_tokens(&user).await.unwrap();

    let result = service.verify_access_token(&pair.access_token);
    assert_eq!(
        result.unwrap_err(),
        DomainError::Token(TokenError::TokenExpired)
    );
}

/// Record store that fails every write, for exercising the
/// no-partial-success guarantee
struct FailingTokenRepository;

#[async_trait]
impl TokenRepository for FailingTokenRepository {
    async fn insert(&self, _token: RefreshToken) -> Result<RefreshToken, DomainError> {
        Err(DomainError::Storage {
            message: "insert rejected".to_string(),
        })
    }

    async fn find_by_token(&self, _token: &str) -> Result<Option<RefreshToken>, DomainError> {
        Ok(None)
    }

    async fn find_by_id(&self, _id: Uuid) -> Result<Option<RefreshToken>, DomainError> {
        Ok(None)
    }

    async fn mark_used(&self, _id: Uuid) -> Result<bool, DomainError> {
        Err(DomainError::Storage {
            message: "update rejected".to_string(),
        })
    }

    async fn revoke(&self, _token: &str) -> Result<bool, DomainError> {
        Err(DomainError::Storage {
            message: "update rejected".to_string(),
        })
    }
}

#[tokio::test]
async fn test_issue_aborts_on_storage_failure() {
    let service = TokenService::new(FailingTokenRepository, TokenServiceConfig::default());
    let user = test_user();

    // No token may be handed out without its persisted record
    let result = service.issue_tokens(&user).await;
    assert!(matches!(
        result.unwrap_err(),
        DomainError::Storage { .. }
    ));
}

fn flip_last_char(s: &str) -> String {
    let mut out = s.to_string();
    let replacement = if out.ends_with('A') { "B" } else { "A" };
    out.replace_range(out.len() - 1.., replacement);
    out
}
