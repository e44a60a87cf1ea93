use actix_web::{web, HttpResponse};

use km_core::repositories::{TokenRepository, UserRepository};

use crate::dto::auth::{AuthResponse, TokenRequest};
use crate::handlers::error::rotation_error;

use super::AppState;

/// Handler for POST /api/v1/auth/refresh
///
/// Exchanges an expired access token plus its refresh token for a brand
/// new pair. The refresh token is single-use; a second attempt with the
/// same pair fails.
///
/// # Request Body
///
/// ```json
/// {
///     "token": "eyJ...",
///     "refresh_token": "opaque_string"
/// }
/// ```
///
/// # Errors
/// - 400 Bad Request: Any rotation rejection, always with the body
///   `{"success": false, "errors": ["Invalid tokens."]}`
/// - 500 Internal Server Error: Storage failure
pub async fn refresh_token<U, T>(
    state: web::Data<AppState<U, T>>,
    request: web::Json<TokenRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
{
    if request.token.is_empty() || request.refresh_token.is_empty() {
        return HttpResponse::BadRequest()
            .json(AuthResponse::failed(vec!["Invalid tokens.".to_string()]));
    }

    match state
        .auth_service
        .refresh(&request.token, &request.refresh_token)
        .await
    {
        Ok(pair) => HttpResponse::Ok().json(AuthResponse::successful(pair)),
        Err(error) => rotation_error(error),
    }
}
