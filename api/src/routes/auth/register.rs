use actix_web::{web, HttpResponse};
use validator::Validate;

use km_core::repositories::{TokenRepository, UserRepository};

use crate::dto::auth::{AuthResponse, RegisterRequest};
use crate::handlers::error::{registration_error, validation_messages};

use super::AppState;

/// Handler for POST /api/v1/auth/register
///
/// Creates a new user account and immediately issues a token pair.
///
/// # Request Body
///
/// ```json
/// {
///     "username": "string",
///     "email": "string",
///     "password": "string"
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "token": "eyJ...",
///     "refresh_token": "opaque_string",
///     "success": true
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Validation failure or email already registered
/// - 500 Internal Server Error: Storage failure
pub async fn register<U, T>(
    state: web::Data<AppState<U, T>>,
    request: web::Json<RegisterRequest>,
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
        .register(&request.username, &request.email, &request.password)
        .await
    {
        Ok(pair) => HttpResponse::Ok().json(AuthResponse::successful(pair)),
        Err(error) => registration_error(error),
    }
}
