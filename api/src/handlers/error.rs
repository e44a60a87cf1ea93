use actix_web::HttpResponse;
use km_core::errors::{AuthError, DomainError};
use km_shared::types::response::ErrorResponse;
use validator::ValidationErrors;

use crate::dto::auth::AuthResponse;

/// Flattens validator output into the flat message list the auth
/// endpoints return.
pub fn validation_messages(errors: ValidationErrors) -> Vec<String> {
    let mut messages = Vec::new();
    for (field, field_errors) in errors.field_errors() {
        for error in field_errors {
            match &error.message {
                Some(message) => messages.push(format!("{}: {}", field, message)),
                None => messages.push(format!("Invalid value for field: {}", field)),
            }
        }
    }
    messages.sort();
    messages
}

pub fn registration_error(error: DomainError) -> HttpResponse {
    match error {
        DomainError::Auth(AuthError::EmailAlreadyInUse) => HttpResponse::BadRequest()
            .json(AuthResponse::failed(vec!["Email already in use.".to_string()])),
        DomainError::Storage { .. } => internal_error(error),
        other => {
            log::warn!("Registration rejected: {}", other);
            HttpResponse::BadRequest()
                .json(AuthResponse::failed(vec!["Unable to register.".to_string()]))
        }
    }
}

pub fn login_error(error: DomainError) -> HttpResponse {
    match error {
        DomainError::Storage { .. } => internal_error(error),
        other => {
            log::warn!("Login rejected: {}", other);
            HttpResponse::BadRequest()
                .json(AuthResponse::failed(vec!["Invalid login request.".to_string()]))
        }
    }
}

/// Every rotation failure collapses to the same opaque client message so
/// the response body never reveals which check rejected the pair. The
/// precise reason is logged server-side before this mapping runs.
pub fn rotation_error(error: DomainError) -> HttpResponse {
    match error {
        DomainError::Storage { .. } => internal_error(error),
        _ => HttpResponse::BadRequest()
            .json(AuthResponse::failed(vec!["Invalid tokens.".to_string()])),
    }
}

fn internal_error(error: DomainError) -> HttpResponse {
    log::error!("Storage failure while handling auth request: {}", error);
    HttpResponse::InternalServerError().json(ErrorResponse::new(
        "internal_error",
        "An internal error occurred",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use km_core::errors::TokenError;

    #[test]
    fn rotation_failures_collapse_to_the_same_status() {
        let expired = rotation_error(DomainError::Token(TokenError::TokenNotExpired));
        let unknown = rotation_error(DomainError::Token(TokenError::TokenNotFound));
        let replayed = rotation_error(DomainError::Token(TokenError::TokenAlreadyUsed));
        assert_eq!(expired.status(), replayed.status());
        assert_eq!(unknown.status(), replayed.status());
        assert_eq!(replayed.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn storage_failures_surface_as_server_errors() {
        let response = rotation_error(DomainError::Storage {
            message: "pool exhausted".to_string(),
        });
        assert_eq!(
            response.status(),
            actix_web::http::StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
