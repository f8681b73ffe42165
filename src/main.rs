mod api;
mod database;
mod jobs;
mod models;
mod services;
mod utils;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::env;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    // Get configuration from environment
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = env::var("PORT").unwrap_or_else(|_| "3003".to_string());
    let database_url = env::var("DATABASE_URL")
        .expect("DATABASE_URL must be set");

    log::info!("🚀 Starting Emergency Service...");
    log::info!("📊 Database: {}", database_url);

    // Initialize MongoDB connection
    let db = database::MongoDB::new(&database_url)
        .await
        .expect("Failed to connect to MongoDB");

    let db_data = web::Data::new(db.clone());

    log::info!("✅ MongoDB connected successfully");

    // Cliente FCM construído uma vez e entregue ao watcher (injeção
    // explícita, sem estado global)
    let fcm = services::notification_service::FcmClient::from_env();

    // 👀 Start emergency creation watcher
    log::info!("📅 Starting background jobs...");
    jobs::emergency_watcher::start_emergency_watcher(db.clone(), fcm).await;
    log::info!("✅ Background jobs started");

    log::info!("🌐 Server starting on {}:{}", host, port);
    log::info!("📚 Swagger UI available at: http://{}:{}/swagger-ui/", host, port);
    log::info!("📄 OpenAPI spec at: http://{}:{}/api-docs/openapi.json", host, port);

    // Start HTTP server
    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin("http://localhost:3000") // Frontend Web (Expo)
            .allowed_origin("http://localhost:8081")
            .allowed_origin("http://localhost:19006")
            .allowed_origin("http://127.0.0.1:3000")
            .allowed_origin("http://127.0.0.1:8081")
            .allowed_origin("http://127.0.0.1:19006")
            .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::AUTHORIZATION,
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .max_age(3600);

        // Generate OpenAPI specification
        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(db_data.clone())
            .wrap(cors)
            .wrap(Logger::default())
            // Swagger UI
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi.clone())
            )
            // Health check
            .route("/health", web::get().to(api::health::health_check))
            // User profiles
            .service(
                web::scope("/api/v1/users")
                    .route("", web::post().to(api::users::set_user_profile))
                    .route("", web::patch().to(api::users::update_user_profile))
                    .route("", web::put().to(api::users::set_user_profile_uid))
                    .route("/{uid}", web::get().to(api::users::get_user_profile_by_uid))
            )
            // Emergencies (read-only)
            .service(
                web::scope("/api/v1/emergencies")
                    .route("", web::get().to(api::emergencies::get_all_emergencies))
                    .route("/open", web::get().to(api::emergencies::get_emergencies_by_status))
                    .route("/{uid}", web::get().to(api::emergencies::get_emergency_by_uid))  // DEVE FICAR POR ÚLTIMO (catch-all)
            )
    })
    .bind(format!("{}:{}", host, port))?
    .run()
    .await
}
