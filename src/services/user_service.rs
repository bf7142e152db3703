use mongodb::bson::{doc, Document};

use crate::database::{DocumentStore, UpdateResult, USERS};
use crate::services::contact_service::parse_id;
use crate::utils::AppError;

/// Looks up a user by exact email and password match.
///
/// Passwords are stored and compared in cleartext. This is the only
/// credential check in the service and must be replaced by a real identity
/// provider (hashed secrets, tokens) before any production use.
pub async fn find_by_credentials(
    store: &dyn DocumentStore,
    email: &str,
    password: &str,
) -> Result<Option<Document>, AppError> {
    store
        .find_one(USERS, doc! { "email": email, "password": password })
        .await
}

pub async fn find_by_id(store: &dyn DocumentStore, id: &str) -> Result<Option<Document>, AppError> {
    let oid = parse_id(id)?;
    store.find_one(USERS, doc! { "_id": oid }).await
}

/// Creates the user, or sets every supplied field on the user with the same email.
///
/// Two concurrent first saves of one email can both miss the match; the
/// unique `users(email)` index rejects the second insert, which is then
/// retried once as a plain update of the user the other request created.
pub async fn save_user(store: &dyn DocumentStore, mut user: Document) -> Result<UpdateResult, AppError> {
    user.remove("_id");

    let email = user
        .get("email")
        .cloned()
        .ok_or_else(|| AppError::InvalidRequest("user document must contain an email".into()))?;
    let filter = doc! { "email": email };

    match store.upsert_one(USERS, filter.clone(), user.clone()).await {
        Err(AppError::DuplicateKey(detail)) => {
            log::warn!("🔁 Concurrent user insert, retrying as update: {}", detail);
            store.upsert_one(USERS, filter, user).await
        }
        result => result,
    }
}
