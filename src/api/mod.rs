pub mod contacts;
pub mod health;
pub mod swagger;
pub mod users;

use actix_web::{middleware::Logger, web};

use crate::database::DocumentStore;

/// Shared store handle injected into every handler
pub type Store = web::Data<dyn DocumentStore>;

/// Access log line. `%U` is the path only: `GET /api/users` carries the
/// credentials in its query string, which must never reach the logs.
pub const ACCESS_LOG_FORMAT: &str = "%a \"%m %U\" %s %b %T";

pub fn access_log() -> Logger {
    Logger::new(ACCESS_LOG_FORMAT)
}

/// Registers every route. Actix tries resources in registration order, so
/// the literal contact sub-paths must stay ahead of `/{id}`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(health::welcome))
        .route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/api/users")
                .route("", web::get().to(users::get_user_by_credentials))
                .route("", web::post().to(users::save_user))
                .route("/{id}", web::get().to(users::get_user)),
        )
        .service(
            web::scope("/api/contacts")
                .route("", web::get().to(contacts::list_contacts))
                .route("", web::post().to(contacts::create_contact))
                .route("/10", web::get().to(contacts::list_recent))
                .route("/name", web::get().to(contacts::list_by_name))
                .route("/date", web::get().to(contacts::list_by_date))
                .route("/email", web::get().to(contacts::list_by_email))
                .route("/download", web::get().to(contacts::download_contacts))
                .route("/contact", web::get().to(contacts::find_by_name))
                // Generic id routes, after every literal
                .route("/{id}", web::get().to(contacts::get_contact))
                .route("/{id}", web::put().to(contacts::replace_contact))
                .route("/{id}", web::delete().to(contacts::delete_contact)),
        );
}
