use actix_web::{web, HttpResponse};
use serde_json::{Map, Value};

use crate::api::Store;
use crate::database::UpdateResult;
use crate::models::CredentialsQuery;
use crate::services::user_service;
use crate::utils::{json_to_document, optional_document_to_json, AppError};

#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    params(CredentialsQuery),
    responses(
        (status = 200, description = "The user whose email and password match exactly, or null"),
        (status = 500, description = "Store failure")
    )
)]
pub async fn get_user_by_credentials(
    store: Store,
    query: web::Query<CredentialsQuery>,
) -> Result<HttpResponse, AppError> {
    log::info!("🔐 GET /api/users - email: {}", query.email);

    let user = user_service::find_by_credentials(store.get_ref(), &query.email, &query.password).await?;
    if user.is_none() {
        log::warn!("❌ No user matches credentials for {}", query.email);
    }

    Ok(HttpResponse::Ok().json(optional_document_to_json(user)))
}

#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User ObjectId (24 hex chars)")),
    responses(
        (status = 200, description = "The user, or null"),
        (status = 400, description = "Malformed identifier")
    )
)]
pub async fn get_user(store: Store, path: web::Path<String>) -> Result<HttpResponse, AppError> {
    let user = user_service::find_by_id(store.get_ref(), &path).await?;
    Ok(HttpResponse::Ok().json(optional_document_to_json(user)))
}

#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Users",
    responses(
        (status = 200, description = "Upsert result keyed by email", body = UpdateResult),
        (status = 400, description = "Body has no email")
    )
)]
pub async fn save_user(store: Store, body: web::Json<Map<String, Value>>) -> Result<HttpResponse, AppError> {
    let user = json_to_document(body.into_inner())?;
    let result = user_service::save_user(store.get_ref(), user).await?;

    match &result.upserted_id {
        Some(id) => log::info!("📝 User created: {}", id),
        None => log::info!("📝 User updated (modified: {})", result.modified_count),
    }

    Ok(HttpResponse::Ok().json(result))
}
