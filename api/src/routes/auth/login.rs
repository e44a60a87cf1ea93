use actix_web::{web, HttpResponse};
use validator::Validate;

use km_core::repositories::{TokenRepository, UserRepository};

use crate::dto::auth::{AuthResponse, LoginRequest};
use crate::handlers::error::{login_error, validation_messages};

use super::AppState;

/// Handler for POST /api/v1/auth/login
///
/// Authenticates an existing user and issues a fresh token pair. Unknown
/// email and wrong password produce the same response body.
///
/// # Errors
/// - 400 Bad Request: Validation failure or credentials rejected
/// - 500 Internal Server Error: Storage failure
pub async fn login<U, T>(
    state: web::Data<AppState<U, T>>,
    request: web::Json<LoginRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
{
    if let Err(errors) = request.validate() {
        return HttpResponse::BadRequest().json(AuthResponse::failed(validation_messages(errors)));
    }

    match state
        .auth_service
        .login(&request.email, &request.password)
        .await
    {
        Ok(pair) => HttpResponse::Ok().json(AuthResponse::successful(pair)),
        Err(error) => login_error(error),
    }
}
