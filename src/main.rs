mod api;
mod config;
mod database;
mod models;
mod services;
mod utils;

use actix_cors::Cors;
use actix_web::{middleware::Compress, web, App, HttpServer};
use dotenv::dotenv;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::database::DocumentStore;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = config::AppConfig::from_env().expect("Invalid configuration");

    log::info!("🚀 Starting Contact Pilot...");
    log::info!("📊 Database: {}", config.database_name);

    // Opened once, shared by every worker, closed after the server stops
    let db = database::MongoDB::new(&config.mongodb_uri, &config.database_name)
        .await
        .expect("Failed to connect to MongoDB");

    let store: Arc<dyn DocumentStore> = Arc::new(db.clone());
    let store_data = web::Data::from(store);

    log::info!("✅ MongoDB connected successfully");
    log::info!("🌐 Server starting on {}", config.bind_address());
    log::info!("📚 Swagger UI available at: http://{}/swagger-ui/", config.bind_address());

    let server = HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .expose_headers(vec![
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::CONTENT_DISPOSITION,
            ])
            .max_age(3600);

        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(store_data.clone())
            .wrap(cors)
            .wrap(Compress::default())
            .wrap(api::access_log())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi)
            )
            .configure(api::configure)
    })
    .bind(config.bind_address())?
    .run()
    .await;

    db.shutdown().await;
    log::info!("👋 Contact Pilot stopped");

    server
}
