//! Unit tests for the authentication service

use crate::errors::{AuthError, DomainError, TokenError};
use crate::repositories::{MockTokenRepository, MockUserRepository, UserRepository};
use crate::services::auth::AuthService;
use crate::services::token::{TokenService, TokenServiceConfig};

fn create_service(
    config: TokenServiceConfig,
) -> AuthService<MockUserRepository, MockTokenRepository> {
    AuthService::new(
        MockUserRepository::new(),
        TokenService::new(MockTokenRepository::new(), config),
    )
}

fn rotation_ready_config() -> TokenServiceConfig {
    TokenServiceConfig {
        access_token_lifetime_secs: 0,
        ..TokenServiceConfig::default()
    }
}

#[tokio::test]
async fn test_register_issues_pair() {
    let service = create_service(TokenServiceConfig::default());

    let pair = service
        .register("frankie", "frankie@example.com", "hunter22!")
        .await
        .unwrap();

    assert!(!pair.access_token.is_empty());
    assert!(!pair.refresh_token.is_empty());

    let claims = service
        .token_service
        .verify_access_token(&pair.access_token)
        .unwrap();
    assert_eq!(claims.email, "frankie@example.com");
    assert_eq!(claims.name, "frankie");
}

#[tokio::test]
async fn test_register_rejects_taken_email() {
    let service = create_service(TokenServiceConfig::default());
    service
        .register("frankie", "frankie@example.com", "hunter22!")
        .await
        .unwrap();

    let result = service
        .register("impostor", "frankie@example.com", "other-pass")
        .await;

    assert_eq!(
        result.unwrap_err(),
        DomainError::Auth(AuthError::EmailAlreadyInUse)
    );
}

#[tokio::test]
async fn test_login_with_valid_credentials() {
    let service = create_service(TokenServiceConfig::default());
    service
        .register("frankie", "frankie@example.com", "hunter22!")
        .await
        .unwrap();

    let pair = service
        .login("frankie@example.com", "hunter22!")
        .await
        .unwrap();

    let claims = service
        .token_service
        .verify_access_token(&pair.access_token)
        .unwrap();
    assert_eq!(claims.sub, "frankie@example.com");
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let service = create_service(TokenServiceConfig::default());
    service
        .register("frankie", "frankie@example.com", "hunter22!")
        .await
        .unwrap();

    let wrong_password = service
        .login("frankie@example.com", "not-the-password")
        .await
        .unwrap_err();
    let unknown_email = service
        .login("nobody@example.com", "hunter22!")
        .await
        .unwrap_err();

    assert_eq!(wrong_password, unknown_email);
    assert_eq!(
        wrong_password,
        DomainError::Auth(AuthError::AuthenticationFailed)
    );
}

#[tokio::test]
async fn test_refresh_round_trip() {
    let service = create_service(rotation_ready_config());

    let original = service
        .register("frankie", "frankie@example.com", "hunter22!")
        .await
        .unwrap();

    let renewed = service
        .refresh(&original.access_token, &original.refresh_token)
        .await
        .unwrap();

    // A brand-new pair: fresh refresh value, fresh jti
    assert_ne!(renewed.refresh_token, original.refresh_token);
    assert_ne!(renewed.access_token, original.access_token);

    // The new access token carries a valid signature over the same
    // subject
    let claims = service
        .token_service
        .decode_for_rotation(&renewed.access_token)
        .unwrap();
    assert_eq!(claims.email, "frankie@example.com");
}

#[tokio::test]
async fn test_refresh_replay_after_round_trip() {
    let service = create_service(rotation_ready_config());

    let original = service
        .register("frankie", "frankie@example.com", "hunter22!")
        .await
        .unwrap();

    service
        .refresh(&original.access_token, &original.refresh_token)
        .await
        .unwrap();

    let replay = service
        .refresh(&original.access_token, &original.refresh_token)
        .await;

    assert_eq!(
        replay.unwrap_err(),
        DomainError::Token(TokenError::TokenAlreadyUsed)
    );
}

#[tokio::test]
async fn test_refresh_for_deleted_user() {
    let service = create_service(rotation_ready_config());

    let pair = service
        .register("frankie", "frankie@example.com", "hunter22!")
        .await
        .unwrap();

    let user = service
        .user_repository
        .find_by_email("frankie@example.com")
        .await
        .unwrap()
        .unwrap();
    service.user_repository.remove(user.id).await;

    let result = service.refresh(&pair.access_token, &pair.refresh_token).await;
    assert_eq!(
        result.unwrap_err(),
        DomainError::Auth(AuthError::UserNotFound)
    );
}
