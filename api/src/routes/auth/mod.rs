//! Authentication route handlers
//!
//! This module contains all authentication-related endpoints:
//! - User registration
//! - Login with email and password
//! - Access token refresh (single-use rotation)
//! - Current user lookup behind JWT middleware

pub mod login;
pub mod me;
pub mod refresh;
pub mod register;

use actix_web::{web, Scope};
use km_core::repositories::{TokenRepository, UserRepository};
use km_core::services::auth::AuthService;
use std::sync::Arc;

use crate::middleware::JwtAuth;

/// Shared application state handed to every auth handler.
pub struct AppState<U, T>
where
    U: UserRepository,
    T: TokenRepository,
{
    pub auth_service: Arc<AuthService<U, T>>,
}

/// Builds the `/auth` scope. The `/me` endpoint sits behind the JWT
/// middleware; everything else is anonymous.
pub fn scope<U, T>(jwt_secret: &str) -> Scope
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
{
    web::scope("/auth")
        .route("/register", web::post().to(register::register::<U, T>))
        .route("/login", web::post().to(login::login::<U, T>))
        .route("/refresh", web::post().to(refresh::refresh_token::<U, T>))
        .service(
            web::resource("/me")
                .wrap(JwtAuth::with_secret(jwt_secret.to_string()))
                .route(web::get().to(me::me)),
        )
}
