pub mod store;

#[cfg(test)]
pub mod memory;

pub use store::*;

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::options::IndexOptions;
use mongodb::{Client, Collection, Database, IndexModel};
use std::error::Error;

use crate::utils::AppError;

#[derive(Clone)]
pub struct MongoDB {
    client: Client,
    db: Database,
}

impl MongoDB {
    pub async fn new(uri: &str, db_name: &str) -> Result<Self, Box<dyn Error>> {
        let mut client_options = mongodb::options::ClientOptions::parse(uri).await?;

        // Connection pool
        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(5);
        client_options.max_idle_time = Some(std::time::Duration::from_secs(300));

        client_options.connect_timeout = Some(std::time::Duration::from_secs(5));
        client_options.server_selection_timeout = Some(std::time::Duration::from_secs(5));

        let client = Client::with_options(client_options)?;
        let db = client.database(db_name);

        // Test connection
        db.list_collection_names().await?;

        let mongodb = Self { client, db };
        mongodb.ensure_indexes().await;

        Ok(mongodb)
    }

    /// Creates the lookup indexes used by the contact and user queries
    async fn ensure_indexes(&self) {
        log::info!("🔧 Creating database indexes...");

        for (collection, model, label) in index_models() {
            match self.collection::<Document>(collection).create_index(model).await {
                Ok(_) => log::info!("   ✅ Index created: {}", label),
                Err(e) => log::debug!("   ℹ️  Index not created for {}: {}", label, e),
            }
        }

        log::info!("✅ Database indexes ready");
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }

    /// Closes pooled connections; called once the HTTP server has stopped
    pub async fn shutdown(self) {
        log::info!("🔌 Closing MongoDB connections...");
        self.client.shutdown().await;
    }
}

/// Indexes per collection. `users(email)` is unique: email is the upsert key.
fn index_models() -> Vec<(&'static str, IndexModel, &'static str)> {
    let unique = IndexOptions::builder().unique(true).build();

    vec![
        (
            USERS,
            IndexModel::builder().keys(doc! { "email": 1 }).options(unique).build(),
            "users(email) unique",
        ),
        (
            CONTACTS,
            IndexModel::builder().keys(doc! { "userId": 1 }).build(),
            "contacts(userId)",
        ),
        (
            CONTACTS,
            IndexModel::builder().keys(doc! { "name": 1 }).build(),
            "contacts(name)",
        ),
    ]
}

#[async_trait]
impl DocumentStore for MongoDB {
    async fn find(&self, collection: &str, spec: FindSpec) -> Result<Vec<Document>, AppError> {
        let coll = self.collection::<Document>(collection);
        let mut find = coll.find(spec.filter);

        if let Some(sort) = spec.sort {
            find = find.sort(sort);
        }
        if let Some(limit) = spec.limit {
            find = find.limit(limit);
        }

        let cursor = find.await?;
        let docs: Vec<Document> = cursor.try_collect().await?;
        Ok(docs)
    }

    async fn find_one(
        &self,
        collection: &str,
        filter: Document,
    ) -> Result<Option<Document>, AppError> {
        Ok(self.collection::<Document>(collection).find_one(filter).await?)
    }

    async fn insert_one(&self, collection: &str, doc: Document) -> Result<InsertResult, AppError> {
        let result = self.collection::<Document>(collection).insert_one(doc).await?;

        Ok(InsertResult {
            acknowledged: true,
            inserted_id: id_to_json(result.inserted_id),
        })
    }

    async fn replace_one(
        &self,
        collection: &str,
        filter: Document,
        replacement: Document,
    ) -> Result<UpdateResult, AppError> {
        let result = self
            .collection::<Document>(collection)
            .replace_one(filter, replacement)
            .await?;

        Ok(UpdateResult {
            acknowledged: true,
            matched_count: result.matched_count,
            modified_count: result.modified_count,
            upserted_id: result.upserted_id.map(id_to_json),
        })
    }

    async fn upsert_one(
        &self,
        collection: &str,
        filter: Document,
        fields: Document,
    ) -> Result<UpdateResult, AppError> {
        let result = self
            .collection::<Document>(collection)
            .update_one(filter, doc! { "$set": fields })
            .upsert(true)
            .await?;

        Ok(UpdateResult {
            acknowledged: true,
            matched_count: result.matched_count,
            modified_count: result.modified_count,
            upserted_id: result.upserted_id.map(id_to_json),
        })
    }

    async fn delete_one(&self, collection: &str, filter: Document) -> Result<DeleteResult, AppError> {
        let result = self.collection::<Document>(collection).delete_one(filter).await?;

        Ok(DeleteResult {
            acknowledged: true,
            deleted_count: result.deleted_count,
        })
    }
}
