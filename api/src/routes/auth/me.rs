use actix_web::HttpResponse;
use serde::Serialize;

use crate::middleware::AuthContext;

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user_id: String,
    pub username: String,
    pub email: String,
}

/// Handler for GET /api/v1/auth/me
///
/// Returns the identity bound to the presented access token. Requires a
/// valid bearer token; the JWT middleware rejects the request otherwise.
pub async fn me(auth: AuthContext) -> HttpResponse {
    HttpResponse::Ok().json(MeResponse {
        user_id: auth.user_id.to_string(),
        username: auth.username,
        email: auth.email,
    })
}
