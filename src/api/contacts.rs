use actix_web::{http::header, web, HttpResponse};
use serde_json::{Map, Value};

use crate::api::Store;
use crate::database::{DeleteResult, InsertResult, UpdateResult};
use crate::models::{NameQuery, OwnerQuery};
use crate::services::contact_service::{self, ContactListing};
use crate::services::export_service;
use crate::utils::{documents_to_json, json_to_document, optional_document_to_json, AppError};

async fn listing(store: Store, owner: &str, kind: ContactListing) -> Result<HttpResponse, AppError> {
    let contacts = contact_service::list_contacts(store.get_ref(), owner, kind).await?;
    log::debug!("📇 {:?} listing for {}: {} contacts", kind, owner, contacts.len());

    Ok(HttpResponse::Ok().json(documents_to_json(contacts)))
}

#[utoipa::path(
    get,
    path = "/api/contacts",
    tag = "Contacts",
    params(OwnerQuery),
    responses(
        (status = 200, description = "All contacts of the owner, in store order"),
        (status = 500, description = "Store failure")
    )
)]
pub async fn list_contacts(store: Store, query: web::Query<OwnerQuery>) -> Result<HttpResponse, AppError> {
    listing(store, &query.user_id, ContactListing::All).await
}

#[utoipa::path(
    get,
    path = "/api/contacts/10",
    tag = "Contacts",
    params(OwnerQuery),
    responses((status = 200, description = "The 10 most recently created contacts, newest first"))
)]
pub async fn list_recent(store: Store, query: web::Query<OwnerQuery>) -> Result<HttpResponse, AppError> {
    listing(store, &query.user_id, ContactListing::Recent).await
}

#[utoipa::path(
    get,
    path = "/api/contacts/name",
    tag = "Contacts",
    params(OwnerQuery),
    responses((status = 200, description = "Contacts sorted by name ascending"))
)]
pub async fn list_by_name(store: Store, query: web::Query<OwnerQuery>) -> Result<HttpResponse, AppError> {
    listing(store, &query.user_id, ContactListing::ByName).await
}

#[utoipa::path(
    get,
    path = "/api/contacts/date",
    tag = "Contacts",
    params(OwnerQuery),
    responses((status = 200, description = "Contacts newest first"))
)]
pub async fn list_by_date(store: Store, query: web::Query<OwnerQuery>) -> Result<HttpResponse, AppError> {
    listing(store, &query.user_id, ContactListing::ByDate).await
}

#[utoipa::path(
    get,
    path = "/api/contacts/email",
    tag = "Contacts",
    params(OwnerQuery),
    responses((status = 200, description = "Contacts sorted by email ascending"))
)]
pub async fn list_by_email(store: Store, query: web::Query<OwnerQuery>) -> Result<HttpResponse, AppError> {
    listing(store, &query.user_id, ContactListing::ByEmail).await
}

#[utoipa::path(
    get,
    path = "/api/contacts/download",
    tag = "Contacts",
    params(OwnerQuery),
    responses(
        (status = 200, description = "Spreadsheet with Name, Phone and Email columns",
            content_type = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"),
        (status = 500, description = "Store or export failure")
    )
)]
pub async fn download_contacts(store: Store, query: web::Query<OwnerQuery>) -> Result<HttpResponse, AppError> {
    let contacts = contact_service::list_contacts(store.get_ref(), &query.user_id, ContactListing::All).await?;
    log::info!("📥 Exporting {} contacts for {}", contacts.len(), query.user_id);

    let bytes = web::block(move || export_service::build_contacts_workbook(&contacts))
        .await
        .map_err(|e| AppError::ExportError(e.to_string()))??;

    Ok(HttpResponse::Ok()
        .content_type(export_service::XLSX_CONTENT_TYPE)
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename={}", export_service::EXPORT_FILENAME),
        ))
        .body(bytes))
}

#[utoipa::path(
    get,
    path = "/api/contacts/contact",
    tag = "Contacts",
    params(NameQuery),
    responses((status = 200, description = "First contact with this exact name, or null"))
)]
pub async fn find_by_name(store: Store, query: web::Query<NameQuery>) -> Result<HttpResponse, AppError> {
    let contact = contact_service::find_by_name(store.get_ref(), &query.name).await?;
    Ok(HttpResponse::Ok().json(optional_document_to_json(contact)))
}

#[utoipa::path(
    get,
    path = "/api/contacts/{id}",
    tag = "Contacts",
    params(("id" = String, Path, description = "Contact ObjectId (24 hex chars)")),
    responses(
        (status = 200, description = "The contact, or null"),
        (status = 400, description = "Malformed identifier")
    )
)]
pub async fn get_contact(store: Store, path: web::Path<String>) -> Result<HttpResponse, AppError> {
    let contact = contact_service::find_by_id(store.get_ref(), &path).await?;
    Ok(HttpResponse::Ok().json(optional_document_to_json(contact)))
}

#[utoipa::path(
    post,
    path = "/api/contacts",
    tag = "Contacts",
    responses((status = 200, description = "Contact stored", body = InsertResult))
)]
pub async fn create_contact(
    store: Store,
    body: web::Json<Map<String, Value>>,
) -> Result<HttpResponse, AppError> {
    let contact = json_to_document(body.into_inner())?;
    let result = contact_service::create_contact(store.get_ref(), contact).await?;
    log::info!("➕ Contact created: {}", result.inserted_id);

    Ok(HttpResponse::Ok().json(result))
}

#[utoipa::path(
    put,
    path = "/api/contacts/{id}",
    tag = "Contacts",
    params(("id" = String, Path, description = "Contact ObjectId (24 hex chars)")),
    responses(
        (status = 200, description = "Replace result; matchedCount is 0 when the id is unknown", body = UpdateResult),
        (status = 400, description = "Malformed identifier")
    )
)]
pub async fn replace_contact(
    store: Store,
    path: web::Path<String>,
    body: web::Json<Map<String, Value>>,
) -> Result<HttpResponse, AppError> {
    let replacement = json_to_document(body.into_inner())?;
    let result = contact_service::replace_contact(store.get_ref(), &path, replacement).await?;
    log::info!("✏️  Contact {} replaced (matched: {})", path.as_str(), result.matched_count);

    Ok(HttpResponse::Ok().json(result))
}

#[utoipa::path(
    delete,
    path = "/api/contacts/{id}",
    tag = "Contacts",
    params(("id" = String, Path, description = "Contact ObjectId (24 hex chars)")),
    responses(
        (status = 200, description = "Delete result; deletedCount is 0 when the id is unknown", body = DeleteResult),
        (status = 400, description = "Malformed identifier")
    )
)]
pub async fn delete_contact(store: Store, path: web::Path<String>) -> Result<HttpResponse, AppError> {
    let result = contact_service::delete_contact(store.get_ref(), &path).await?;
    log::info!("🗑️  Contact {} deleted (count: {})", path.as_str(), result.deleted_count);

    Ok(HttpResponse::Ok().json(result))
}
