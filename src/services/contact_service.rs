use mongodb::bson::{doc, oid::ObjectId, Document};

use crate::database::{DeleteResult, DocumentStore, FindSpec, InsertResult, UpdateResult, CONTACTS};
use crate::utils::AppError;

/// Field on a contact that references its owning user (`_id` hex of the user)
pub const OWNER_FIELD: &str = "userId";

/// Fixed size of the "recent contacts" listing
pub const RECENT_LIMIT: i64 = 10;

/// Owner-scoped listings exposed under `/api/contacts`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactListing {
    All,
    Recent,
    ByName,
    ByDate,
    ByEmail,
}

impl ContactListing {
    /// Builds the filter/sort/limit for this listing of `owner`'s contacts
    pub fn query(self, owner: &str) -> FindSpec {
        let spec = FindSpec::new(doc! { OWNER_FIELD: owner });

        match self {
            ContactListing::All => spec,
            ContactListing::Recent => spec.sort(doc! { "_id": -1 }).limit(RECENT_LIMIT),
            ContactListing::ByName => spec.sort(doc! { "name": 1 }),
            ContactListing::ByDate => spec.sort(doc! { "_id": -1 }),
            ContactListing::ByEmail => spec.sort(doc! { "email": 1 }),
        }
    }
}

pub fn parse_id(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id).map_err(|_| AppError::InvalidIdentifier(id.to_string()))
}

pub async fn list_contacts(
    store: &dyn DocumentStore,
    owner: &str,
    listing: ContactListing,
) -> Result<Vec<Document>, AppError> {
    store.find(CONTACTS, listing.query(owner)).await
}

/// Global lookup by exact name; not scoped to an owner.
pub async fn find_by_name(store: &dyn DocumentStore, name: &str) -> Result<Option<Document>, AppError> {
    store.find_one(CONTACTS, doc! { "name": name }).await
}

pub async fn find_by_id(store: &dyn DocumentStore, id: &str) -> Result<Option<Document>, AppError> {
    let oid = parse_id(id)?;
    store.find_one(CONTACTS, doc! { "_id": oid }).await
}

pub async fn create_contact(store: &dyn DocumentStore, contact: Document) -> Result<InsertResult, AppError> {
    store.insert_one(CONTACTS, contact).await
}

/// Overwrites every field of the contact; the stored `_id` is kept.
pub async fn replace_contact(
    store: &dyn DocumentStore,
    id: &str,
    mut replacement: Document,
) -> Result<UpdateResult, AppError> {
    let oid = parse_id(id)?;
    replacement.remove("_id");

    store.replace_one(CONTACTS, doc! { "_id": oid }, replacement).await
}

pub async fn delete_contact(store: &dyn DocumentStore, id: &str) -> Result<DeleteResult, AppError> {
    let oid = parse_id(id)?;
    store.delete_one(CONTACTS, doc! { "_id": oid }).await
}
