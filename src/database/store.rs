use async_trait::async_trait;
use mongodb::bson::{Bson, Document};
use serde::Serialize;

use crate::utils::AppError;

pub const USERS: &str = "users";
pub const CONTACTS: &str = "contacts";

/// Filter / sort / limit shape of a read-many query
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FindSpec {
    pub filter: Document,
    pub sort: Option<Document>,
    pub limit: Option<i64>,
}

impl FindSpec {
    pub fn new(filter: Document) -> Self {
        Self {
            filter,
            ..Default::default()
        }
    }

    pub fn sort(mut self, sort: Document) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsertResult {
    pub acknowledged: bool,
    #[schema(value_type = String)]
    pub inserted_id: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResult {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    #[schema(value_type = Option<String>)]
    pub upserted_id: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResult {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

/// Renders a generated identifier the same way documents render `_id`.
pub fn id_to_json(id: Bson) -> serde_json::Value {
    match id {
        Bson::ObjectId(oid) => serde_json::Value::String(oid.to_hex()),
        other => other.into_relaxed_extjson(),
    }
}

/// Document store operations used by the query layer
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn find(&self, collection: &str, spec: FindSpec) -> Result<Vec<Document>, AppError>;

    async fn find_one(&self, collection: &str, filter: Document)
        -> Result<Option<Document>, AppError>;

    async fn insert_one(&self, collection: &str, doc: Document) -> Result<InsertResult, AppError>;

    async fn replace_one(
        &self,
        collection: &str,
        filter: Document,
        replacement: Document,
    ) -> Result<UpdateResult, AppError>;

    /// `$set` every field of `fields` on the first match, inserting when none matches
    async fn upsert_one(
        &self,
        collection: &str,
        filter: Document,
        fields: Document,
    ) -> Result<UpdateResult, AppError>;

    async fn delete_one(&self, collection: &str, filter: Document) -> Result<DeleteResult, AppError>;
}
