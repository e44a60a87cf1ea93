use actix_web::{middleware::Logger, web, App, HttpResponse, HttpServer};
use dotenvy::dotenv;
use log::info;
use std::sync::Arc;

use km_api::middleware::create_cors;
use km_api::routes::{self, auth::AppState};
use km_core::services::auth::AuthService;
use km_core::services::token::{TokenService, TokenServiceConfig};
use km_infra::database::mysql::{MySqlTokenRepository, MySqlUserRepository};
use km_infra::database::create_pool;
use km_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting keymint API server");

    let config = AppConfig::from_env();
    if config.jwt.is_using_default_secret() {
        log::warn!("JWT_SECRET is not set; falling back to the development default");
    }

    let pool = create_pool(&config.database)
        .await
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;

    let user_repository = MySqlUserRepository::new(pool.clone());
    let token_repository = MySqlTokenRepository::new(pool.clone());
    let token_service = TokenService::new(token_repository, TokenServiceConfig::from(&config.jwt));
    let auth_service = Arc::new(AuthService::new(user_repository, token_service));

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let jwt_secret = config.jwt.secret.clone();
    let workers = config.server.workers;

    let mut server = HttpServer::new(move || {
        let state = AppState {
            auth_service: Arc::clone(&auth_service),
        };

        App::new()
            .wrap(Logger::default())
            .wrap(create_cors())
            .app_data(web::Data::new(state))
            .route("/health", web::get().to(routes::health::health_check))
            .service(
                web::scope("/api/v1").service(routes::auth::scope::<
                    MySqlUserRepository,
                    MySqlTokenRepository,
                >(&jwt_secret)),
            )
            .default_service(web::route().to(not_found))
    })
    .bind(&bind_address)?;

    if workers > 0 {
        server = server.workers(workers);
    }

    server.run().await
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "error": "not_found",
        "message": "The requested resource was not found"
    }))
}
